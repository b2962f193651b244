//! Storage layer: abstraction traits and the JSON file backend.

pub mod json;
pub mod traits;

pub use json::{JsonStore, SettingsRepository, StoreError, TripRepository, VehicleRepository};
pub use traits::{SettingsStorage, TripStorage, VehicleStorage};
