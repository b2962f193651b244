//! # fuel-tracker backend
//!
//! Core of a fuel-expense tracker for ride-share drivers: register
//! vehicles, log trips (odometer readings, fuel price, optional gross
//! earnings), browse history and per-category statistics, all persisted to
//! a local JSON key-value store, with bilingual (pt/en) message catalogs.
//!
//! The `Backend` struct is the composition root: it opens the store
//! (running the storage capability probe), builds repositories and services
//! in dependency order, and wires the cross-cutting change notifications.
//! Everything is synchronous; there is no server and no concurrent writer.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod i18n;
pub mod storage;

use domain::config::Limits;
use domain::events::{ChangeEvent, EventBus};
use domain::session::SessionState;
use domain::{
    BackupService, HistoryService, LocalizationService, StatisticsService, TripService,
    VehicleService,
};
use storage::json::{JsonStore, SettingsRepository, TripRepository, VehicleRepository};

/// Main backend struct that orchestrates all services.
pub struct Backend {
    pub vehicle_service: VehicleService,
    pub trip_service: TripService,
    pub history_service: HistoryService,
    pub statistics_service: StatisticsService,
    pub backup_service: BackupService,
    pub localization_service: LocalizationService,
    pub events: Arc<EventBus>,
}

impl Backend {
    /// Create a backend with the default limits, storing data under
    /// `data_dir`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Self::with_limits(data_dir, Limits::default())
    }

    /// Create a backend with explicit limits.
    pub fn with_limits<P: AsRef<Path>>(data_dir: P, limits: Limits) -> Result<Self> {
        let store =
            Arc::new(JsonStore::open(data_dir).context("opening the local data store")?);
        let events = Arc::new(EventBus::new());

        let vehicle_repository = VehicleRepository::new(store.clone());
        let trip_repository = TripRepository::new(store.clone(), limits.history_cap);
        let settings_repository = SettingsRepository::new(store);

        let vehicle_service =
            VehicleService::new(vehicle_repository.clone(), limits.clone(), events.clone());
        let trip_service =
            TripService::new(trip_repository.clone(), limits.clone(), events.clone());
        let history_service = HistoryService::new(trip_repository.clone(), events.clone());
        let statistics_service = StatisticsService::new(trip_repository.clone(), limits);
        let localization_service =
            LocalizationService::new(settings_repository.clone(), events.clone());
        let backup_service = BackupService::new(
            vehicle_repository,
            trip_repository,
            settings_repository,
            events.clone(),
        );

        // Data changes mark the statistics for a coalesced refresh; an
        // import may also have rewritten the persisted language.
        {
            let statistics = statistics_service.clone();
            let localization = localization_service.clone();
            events.subscribe(move |event| match event {
                ChangeEvent::TripsChanged | ChangeEvent::HistoryCleared => {
                    statistics.mark_dirty()
                }
                ChangeEvent::DataImported => {
                    statistics.mark_dirty();
                    localization.reload();
                }
                ChangeEvent::VehiclesChanged | ChangeEvent::LanguageChanged => {}
            });
        }

        Ok(Self {
            vehicle_service,
            trip_service,
            history_service,
            statistics_service,
            backup_service,
            localization_service,
            events,
        })
    }

    /// Fresh transient session state: active category, vehicle selection
    /// and history view toggle.
    pub fn new_session(&self) -> SessionState {
        SessionState::default()
    }
}
