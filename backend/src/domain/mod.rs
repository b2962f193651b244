//! Domain layer: services, models, commands, validation and session state.

pub mod backup_service;
pub mod commands;
pub mod config;
pub mod events;
pub mod history_service;
pub mod localization_service;
pub mod models;
pub mod session;
pub mod statistics_service;
pub mod trip_service;
pub mod validation;
pub mod vehicle_service;

// Re-export commonly used types
pub use backup_service::BackupService;
pub use history_service::HistoryService;
pub use localization_service::LocalizationService;
pub use statistics_service::StatisticsService;
pub use trip_service::TripService;
pub use vehicle_service::VehicleService;
