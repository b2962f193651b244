//! Trip and history commands and results.

use crate::domain::models::trip::TripRecord;
use crate::domain::models::vehicle::VehicleCategory;

/// Raw form input for one trip calculation. Numeric fields arrive exactly
/// as the user typed them (comma or dot decimals); a blank earnings field
/// means "not reported", which is different from zero.
#[derive(Debug, Clone)]
pub struct RecordTripCommand {
    pub category: VehicleCategory,
    /// Vehicle the trip was driven with, when one is selected.
    pub vehicle_id: Option<String>,
    pub odometer_start: String,
    pub odometer_end: String,
    pub efficiency: String,
    pub price_per_liter: String,
    pub earnings: String,
}

#[derive(Debug, Clone)]
pub struct RecordTripResult {
    pub trip: TripRecord,
}

#[derive(Debug, Clone)]
pub struct HistoryQuery {
    pub category: VehicleCategory,
}

/// `confirmed` carries the UI layer's confirmation step; clearing refuses
/// to run without it.
#[derive(Debug, Clone)]
pub struct ClearHistoryCommand {
    pub category: VehicleCategory,
    pub confirmed: bool,
}

#[derive(Debug, Clone)]
pub struct ClearHistoryResult {
    pub removed: usize,
}
