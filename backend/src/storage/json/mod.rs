//! # JSON Storage Module
//!
//! File-backed storage implementation: a JSON key-value store plus one
//! repository per persisted collection. The domain layer only sees the
//! traits in `storage::traits`, so this backend is replaceable.

pub mod settings_repository;
pub mod store;
pub mod trip_repository;
pub mod vehicle_repository;

pub use settings_repository::SettingsRepository;
pub use store::{JsonStore, StoreError};
pub use trip_repository::TripRepository;
pub use vehicle_repository::VehicleRepository;
