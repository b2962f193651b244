//! # Storage Traits
//!
//! Storage abstraction traits so the domain layer can work with different
//! backends without modification. Reads are infallible by design: the
//! underlying store substitutes a default for missing or corrupt data, so
//! only mutations can fail.

use crate::domain::models::settings::AppSettings;
use crate::domain::models::trip::TripRecord;
use crate::domain::models::vehicle::{Vehicle, VehicleCategory};
use crate::storage::json::store::StoreError;

/// Interface for vehicle collection storage.
pub trait VehicleStorage: Send + Sync {
    /// List all vehicles in insertion order.
    fn list_vehicles(&self) -> Vec<Vehicle>;

    /// Append a new vehicle to the collection.
    fn store_vehicle(&self, vehicle: &Vehicle) -> Result<(), StoreError>;

    /// Delete a vehicle by ID.
    /// Returns true if the vehicle was found and deleted, false otherwise.
    fn delete_vehicle(&self, vehicle_id: &str) -> Result<bool, StoreError>;

    /// Replace the whole collection (used by backup import).
    fn replace_all_vehicles(&self, vehicles: &[Vehicle]) -> Result<(), StoreError>;
}

/// Interface for trip history storage.
pub trait TripStorage: Send + Sync {
    /// List all trips, newest first.
    fn list_trips(&self) -> Vec<TripRecord>;

    /// Prepend a new trip and truncate the collection to its cap from the
    /// tail, so the oldest records are evicted first.
    fn store_trip(&self, trip: &TripRecord) -> Result<(), StoreError>;

    /// Remove every trip of the given category, leaving the other
    /// categories untouched. Returns the number of records removed.
    fn clear_category(&self, category: VehicleCategory) -> Result<usize, StoreError>;

    /// Replace the whole collection (used by backup import), re-applying
    /// the cap.
    fn replace_all_trips(&self, trips: &[TripRecord]) -> Result<(), StoreError>;
}

/// Interface for settings storage.
pub trait SettingsStorage: Send + Sync {
    /// Load persisted settings, falling back to the defaults.
    fn load_settings(&self) -> AppSettings;

    /// Persist the settings.
    fn store_settings(&self, settings: &AppSettings) -> Result<(), StoreError>;
}
