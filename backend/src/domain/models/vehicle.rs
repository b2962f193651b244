//! Domain model for a registered vehicle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vehicle class that partitions all data: vehicles, trips, history views
/// and statistics are always scoped to one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    Car,
    Motorcycle,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 2] = [VehicleCategory::Car, VehicleCategory::Motorcycle];

    pub fn code(&self) -> &'static str {
        match self {
            VehicleCategory::Car => "car",
            VehicleCategory::Motorcycle => "motorcycle",
        }
    }

    /// Parse a category code. Returns `None` for anything outside the fixed set.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "car" => Some(VehicleCategory::Car),
            "motorcycle" => Some(VehicleCategory::Motorcycle),
            _ => None,
        }
    }

    /// Translation-catalog key for the category name.
    pub fn label_key(&self) -> &'static str {
        match self {
            VehicleCategory::Car => "category.car",
            VehicleCategory::Motorcycle => "category.motorcycle",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A registered vehicle. Created once via a validated command, deleted by id,
/// never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    /// Fuel efficiency in km per liter
    pub efficiency: f64,
    pub category: VehicleCategory,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Generate a unique vehicle ID.
    /// Format: vehicle-<timestamp_ms>-<random_suffix>
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!(
            "vehicle-{}-{}",
            timestamp_millis,
            super::random_suffix(4)
        )
    }
}
