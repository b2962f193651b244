//! Domain model for a logged trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vehicle::VehicleCategory;

/// One logged trip calculation.
///
/// The derived fields (`distance_km`, `liters`, `cost`, `profit`) are
/// computed once when the record is saved and never recomputed afterwards,
/// even if the referenced vehicle's stored efficiency later changes: a trip
/// record is immutable history. All values are kept at full `f64` precision;
/// rounding happens only at display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub category: VehicleCategory,
    /// Vehicle used for this trip. Trips may be logged without a saved
    /// vehicle, in which case this is `None`.
    pub vehicle_id: Option<String>,
    pub odometer_start: f64,
    pub odometer_end: f64,
    /// Efficiency used for this specific calculation (km per liter). May
    /// differ from the vehicle's stored efficiency if edited by hand.
    pub efficiency: f64,
    pub price_per_liter: f64,
    pub distance_km: f64,
    pub liters: f64,
    pub cost: f64,
    /// Gross earnings. Absent is distinct from zero: the driver simply did
    /// not report them.
    pub earnings: Option<f64>,
    /// Net profit (earnings - cost). `None` whenever earnings is `None`.
    pub profit: Option<f64>,
}

impl TripRecord {
    /// Generate a unique trip ID.
    /// Format: trip-<timestamp_ms>-<random_suffix>
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("trip-{}-{}", timestamp_millis, super::random_suffix(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_the_timestamp() {
        let id = TripRecord::generate_id(1625846400123);
        assert!(id.starts_with("trip-1625846400123-"));
    }

    #[test]
    fn absent_optionals_deserialize_as_none() {
        let json = r#"{
            "id": "trip-1-a",
            "created_at": "2024-03-01T12:00:00Z",
            "category": "car",
            "vehicle_id": null,
            "odometer_start": 100.0,
            "odometer_end": 150.0,
            "efficiency": 10.0,
            "price_per_liter": 5.0,
            "distance_km": 50.0,
            "liters": 5.0,
            "cost": 25.0,
            "earnings": null,
            "profit": null
        }"#;
        let trip: TripRecord = serde_json::from_str(json).unwrap();
        assert_eq!(trip.earnings, None);
        assert_eq!(trip.profit, None);
    }
}
