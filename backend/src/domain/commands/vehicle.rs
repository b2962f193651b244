//! Vehicle commands and results.

use crate::domain::models::vehicle::{Vehicle, VehicleCategory};

/// Raw form input for registering a vehicle. Numeric fields arrive exactly
/// as the user typed them; the validator parses them.
#[derive(Debug, Clone)]
pub struct CreateVehicleCommand {
    pub name: String,
    pub efficiency: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct CreateVehicleResult {
    pub vehicle: Vehicle,
    /// True when the vehicle was the first of the active category and was
    /// loaded into the session selection automatically.
    pub auto_selected: bool,
}

#[derive(Debug, Clone)]
pub struct SelectVehicleCommand {
    pub vehicle_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteVehicleCommand {
    pub vehicle_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteVehicleResult {
    pub deleted: Vehicle,
}

#[derive(Debug, Clone, Default)]
pub struct ListVehiclesQuery {
    /// Restrict to one category; `None` lists everything.
    pub category: Option<VehicleCategory>,
}

#[derive(Debug, Clone)]
pub struct ListVehiclesResult {
    pub vehicles: Vec<Vehicle>,
}
