//! Backup export/import.
//!
//! Exports the three persisted sections into one JSON document and imports
//! them back with a deliberately forgiving policy: each section is accepted
//! or skipped on its own, and the import counts as successful when at least
//! one section was accepted.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use shared::{BackupDocument, BackupSettings, BackupTrip, BackupVehicle};

use crate::domain::commands::backup::{ImportReport, SectionStatus};
use crate::domain::events::{ChangeEvent, EventBus};
use crate::domain::models::settings::AppSettings;
use crate::domain::models::trip::TripRecord;
use crate::domain::models::vehicle::{Vehicle, VehicleCategory};
use crate::i18n::Language;
use crate::storage::json::{SettingsRepository, StoreError, TripRepository, VehicleRepository};
use crate::storage::traits::{SettingsStorage, TripStorage, VehicleStorage};

/// Application identifier written into every backup file.
pub const APP_NAME: &str = "fuel-tracker";

/// Fatal import failures. Anything section-level is reported through
/// `ImportReport` instead.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("backup file is not valid JSON")]
    InvalidJson(#[from] serde_json::Error),

    #[error("backup file must contain a JSON object")]
    NotAnObject,

    /// A second import was attempted while one was still running.
    #[error("an import is already running")]
    AlreadyRunning,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ImportError {
    /// Translation-catalog key for the user-visible message.
    pub fn message_key(&self) -> &'static str {
        match self {
            ImportError::InvalidJson(_) => "import.invalid_json",
            ImportError::NotAnObject => "import.not_an_object",
            ImportError::AlreadyRunning => "import.already_running",
            ImportError::Storage(e) => e.message_key(),
        }
    }
}

/// Maps between domain records and the backup file DTOs.
struct BackupMapper;

impl BackupMapper {
    fn vehicle_to_dto(vehicle: &Vehicle) -> BackupVehicle {
        BackupVehicle {
            id: vehicle.id.clone(),
            name: vehicle.name.clone(),
            efficiency: vehicle.efficiency,
            category: vehicle.category.code().to_string(),
            created_at: vehicle.created_at.to_rfc3339(),
        }
    }

    /// Returns `None` when the record is not usable (unknown category or
    /// unparseable timestamp); the import skips such records.
    fn vehicle_from_dto(dto: BackupVehicle) -> Option<Vehicle> {
        let category = VehicleCategory::from_code(&dto.category)?;
        let created_at = parse_rfc3339(&dto.created_at)?;
        Some(Vehicle {
            id: dto.id,
            name: dto.name,
            efficiency: dto.efficiency,
            category,
            created_at,
        })
    }

    fn trip_to_dto(trip: &TripRecord) -> BackupTrip {
        BackupTrip {
            id: trip.id.clone(),
            created_at: trip.created_at.to_rfc3339(),
            category: trip.category.code().to_string(),
            vehicle_id: trip.vehicle_id.clone(),
            odometer_start: trip.odometer_start,
            odometer_end: trip.odometer_end,
            efficiency: trip.efficiency,
            price_per_liter: trip.price_per_liter,
            distance_km: trip.distance_km,
            liters: trip.liters,
            cost: trip.cost,
            earnings: trip.earnings,
            profit: trip.profit,
        }
    }

    fn trip_from_dto(dto: BackupTrip) -> Option<TripRecord> {
        let category = VehicleCategory::from_code(&dto.category)?;
        let created_at = parse_rfc3339(&dto.created_at)?;
        Some(TripRecord {
            id: dto.id,
            created_at,
            category,
            vehicle_id: dto.vehicle_id,
            odometer_start: dto.odometer_start,
            odometer_end: dto.odometer_end,
            efficiency: dto.efficiency,
            price_per_liter: dto.price_per_liter,
            distance_km: dto.distance_km,
            liters: dto.liters,
            cost: dto.cost,
            earnings: dto.earnings,
            profit: dto.profit,
        })
    }
}

fn parse_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Clone)]
pub struct BackupService {
    vehicle_repository: VehicleRepository,
    trip_repository: TripRepository,
    settings_repository: SettingsRepository,
    events: Arc<EventBus>,
    importing: Arc<AtomicBool>,
}

impl BackupService {
    pub fn new(
        vehicle_repository: VehicleRepository,
        trip_repository: TripRepository,
        settings_repository: SettingsRepository,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            vehicle_repository,
            trip_repository,
            settings_repository,
            events,
            importing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot the three persisted sections into a backup document.
    pub fn export(&self) -> BackupDocument {
        BackupDocument {
            app: APP_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            export_date: Utc::now().to_rfc3339(),
            vehicles: self
                .vehicle_repository
                .list_vehicles()
                .iter()
                .map(BackupMapper::vehicle_to_dto)
                .collect(),
            history: self
                .trip_repository
                .list_trips()
                .iter()
                .map(BackupMapper::trip_to_dto)
                .collect(),
            settings: BackupSettings {
                language: self
                    .settings_repository
                    .load_settings()
                    .language
                    .code()
                    .to_string(),
            },
        }
    }

    /// Export as pretty-printed JSON, ready to be written to a file.
    pub fn export_json(&self) -> Result<String> {
        let document = self.export();
        let json =
            serde_json::to_string_pretty(&document).context("serializing backup document")?;
        info!(
            "exported backup: {} vehicles, {} history records",
            document.vehicles.len(),
            document.history.len()
        );
        Ok(json)
    }

    /// Import a backup from raw JSON text.
    ///
    /// Only one import may run at a time; a second call while one is in
    /// flight fails with `AlreadyRunning` instead of interleaving writes.
    pub fn import_json(&self, raw: &str) -> Result<ImportReport, ImportError> {
        if self
            .importing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ImportError::AlreadyRunning);
        }
        let result = self.import_inner(raw);
        self.importing.store(false, Ordering::SeqCst);
        result
    }

    fn import_inner(&self, raw: &str) -> Result<ImportReport, ImportError> {
        let value: Value = serde_json::from_str(raw)?;
        let document = value.as_object().ok_or(ImportError::NotAnObject)?;

        let vehicles = match document.get("vehicles") {
            None => SectionStatus::Missing,
            Some(Value::Array(items)) => {
                let mut imported = Vec::new();
                let mut skipped = 0usize;
                for item in items {
                    let parsed = serde_json::from_value::<BackupVehicle>(item.clone())
                        .ok()
                        .and_then(BackupMapper::vehicle_from_dto);
                    match parsed {
                        Some(vehicle) => imported.push(vehicle),
                        None => skipped += 1,
                    }
                }
                if skipped > 0 {
                    warn!("skipped {} malformed vehicle records during import", skipped);
                }
                self.vehicle_repository.replace_all_vehicles(&imported)?;
                SectionStatus::Imported {
                    count: imported.len(),
                    skipped,
                }
            }
            Some(_) => {
                warn!("'vehicles' section is not an array; skipping");
                SectionStatus::Malformed
            }
        };

        let history = match document.get("history") {
            None => SectionStatus::Missing,
            Some(Value::Array(items)) => {
                let mut imported = Vec::new();
                let mut skipped = 0usize;
                for item in items {
                    let parsed = serde_json::from_value::<BackupTrip>(item.clone())
                        .ok()
                        .and_then(BackupMapper::trip_from_dto);
                    match parsed {
                        Some(trip) => imported.push(trip),
                        None => skipped += 1,
                    }
                }
                if skipped > 0 {
                    warn!("skipped {} malformed history records during import", skipped);
                }
                self.trip_repository.replace_all_trips(&imported)?;
                SectionStatus::Imported {
                    count: imported.len(),
                    skipped,
                }
            }
            Some(_) => {
                warn!("'history' section is not an array; skipping");
                SectionStatus::Malformed
            }
        };

        let (settings, unknown_language) = match document.get("settings") {
            None => (SectionStatus::Missing, None),
            Some(Value::Object(obj)) => match obj.get("language").and_then(Value::as_str) {
                Some(code) => match Language::from_code(code) {
                    Some(language) => {
                        self.settings_repository
                            .store_settings(&AppSettings { language })?;
                        (SectionStatus::Imported { count: 1, skipped: 0 }, None)
                    }
                    None => {
                        // Unsupported language: keep the current one
                        let current = self.settings_repository.load_settings().language;
                        self.settings_repository
                            .store_settings(&AppSettings { language: current })?;
                        warn!(
                            "unsupported language '{}' in backup, keeping '{}'",
                            code,
                            current.code()
                        );
                        (
                            SectionStatus::Imported { count: 1, skipped: 0 },
                            Some(code.to_string()),
                        )
                    }
                },
                None => {
                    warn!("'settings' section has no language; skipping");
                    (SectionStatus::Malformed, None)
                }
            },
            Some(_) => {
                warn!("'settings' section is not an object; skipping");
                (SectionStatus::Malformed, None)
            }
        };

        let report = ImportReport {
            vehicles,
            history,
            settings,
            unknown_language,
        };

        if report.success() {
            info!(
                "backup import accepted: vehicles={:?}, history={:?}, settings={:?}",
                report.vehicles, report.history, report.settings
            );
            self.events.publish(ChangeEvent::DataImported);
            if report.settings.accepted() {
                self.events.publish(ChangeEvent::LanguageChanged);
            }
        } else {
            warn!("backup import accepted no sections");
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::JsonStore;
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn setup() -> (BackupService, Arc<EventBus>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(JsonStore::open(dir.path()).unwrap());
        let events = Arc::new(EventBus::new());
        let service = BackupService::new(
            VehicleRepository::new(store.clone()),
            TripRepository::new(store.clone(), 100),
            SettingsRepository::new(store),
            events.clone(),
        );
        (service, events, dir)
    }

    fn sample_vehicle() -> Vehicle {
        Vehicle {
            id: "vehicle-1-aaaa".to_string(),
            name: "Onix".to_string(),
            efficiency: 12.5,
            category: VehicleCategory::Car,
            created_at: Utc::now(),
        }
    }

    fn sample_trip() -> TripRecord {
        TripRecord {
            id: "trip-1-bbbb".to_string(),
            created_at: Utc::now(),
            category: VehicleCategory::Car,
            vehicle_id: Some("vehicle-1-aaaa".to_string()),
            odometer_start: 15000.0,
            odometer_end: 15120.5,
            efficiency: 12.5,
            price_per_liter: 5.89,
            distance_km: 120.5,
            liters: 9.64,
            cost: 56.7796,
            earnings: Some(75.5),
            profit: Some(18.7204),
        }
    }

    #[test]
    fn export_then_import_round_trips_the_data() {
        let (service, _events, _dir) = setup();
        service.vehicle_repository.store_vehicle(&sample_vehicle()).unwrap();
        service.trip_repository.store_trip(&sample_trip()).unwrap();

        let json = service.export_json().unwrap();

        // Wipe everything, then restore from the export
        service.vehicle_repository.replace_all_vehicles(&[]).unwrap();
        service.trip_repository.replace_all_trips(&[]).unwrap();

        let report = service.import_json(&json).unwrap();
        assert!(report.success());
        assert_eq!(report.vehicles, SectionStatus::Imported { count: 1, skipped: 0 });
        assert_eq!(report.history, SectionStatus::Imported { count: 1, skipped: 0 });

        let vehicles = service.vehicle_repository.list_vehicles();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].name, "Onix");

        let trips = service.trip_repository.list_trips();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].cost, 56.7796);
        assert_eq!(trips[0].profit, Some(18.7204));
    }

    #[test]
    fn export_carries_the_app_identity() {
        let (service, _events, _dir) = setup();
        let document = service.export();
        assert_eq!(document.app, APP_NAME);
        assert_eq!(document.version, env!("CARGO_PKG_VERSION"));
        assert!(DateTime::parse_from_rfc3339(&document.export_date).is_ok());
    }

    #[test]
    fn malformed_history_does_not_block_the_vehicles_section() {
        let (service, _events, _dir) = setup();
        let raw = r#"{
            "app": "fuel-tracker",
            "version": "0.1.0",
            "exportDate": "2024-03-01T12:00:00Z",
            "vehicles": [{
                "id": "vehicle-1-aaaa",
                "name": "Onix",
                "efficiency": 12.5,
                "category": "car",
                "createdAt": "2024-02-01T08:00:00Z"
            }],
            "history": "definitely not an array",
            "settings": { "language": "en" }
        }"#;

        let report = service.import_json(raw).unwrap();
        assert!(report.success());
        assert_eq!(report.vehicles, SectionStatus::Imported { count: 1, skipped: 0 });
        assert_eq!(report.history, SectionStatus::Malformed);
        assert_eq!(report.settings, SectionStatus::Imported { count: 1, skipped: 0 });
        assert_eq!(service.vehicle_repository.list_vehicles().len(), 1);
        assert_eq!(service.settings_repository.load_settings().language, Language::En);
    }

    #[test]
    fn malformed_records_are_skipped_individually() {
        let (service, _events, _dir) = setup();
        let raw = r#"{
            "vehicles": [
                {
                    "id": "vehicle-1-aaaa",
                    "name": "Onix",
                    "efficiency": 12.5,
                    "category": "car",
                    "createdAt": "2024-02-01T08:00:00Z"
                },
                { "this": "is not a vehicle" },
                {
                    "id": "vehicle-2-bbbb",
                    "name": "Submarine",
                    "efficiency": 1.0,
                    "category": "boat",
                    "createdAt": "2024-02-01T08:00:00Z"
                }
            ]
        }"#;

        let report = service.import_json(raw).unwrap();
        assert_eq!(report.vehicles, SectionStatus::Imported { count: 1, skipped: 2 });
        assert_eq!(report.history, SectionStatus::Missing);
    }

    #[test]
    fn unknown_language_falls_back_to_the_current_one() {
        let (service, _events, _dir) = setup();
        service
            .settings_repository
            .store_settings(&AppSettings { language: Language::En })
            .unwrap();

        let raw = r#"{ "settings": { "language": "klingon" } }"#;
        let report = service.import_json(raw).unwrap();

        assert!(report.success());
        assert_eq!(report.unknown_language, Some("klingon".to_string()));
        assert_eq!(service.settings_repository.load_settings().language, Language::En);
    }

    #[test]
    fn fatal_errors_are_typed() {
        let (service, _events, _dir) = setup();
        assert!(matches!(
            service.import_json("{not json"),
            Err(ImportError::InvalidJson(_))
        ));
        assert!(matches!(
            service.import_json("[1, 2, 3]"),
            Err(ImportError::NotAnObject)
        ));
    }

    #[test]
    fn import_with_no_usable_section_reports_failure() {
        let (service, _events, _dir) = setup();
        let raw = r#"{ "vehicles": 42, "history": "nope", "settings": [] }"#;
        let report = service.import_json(raw).unwrap();
        assert!(!report.success());
        assert_eq!(report.vehicles, SectionStatus::Malformed);
        assert_eq!(report.history, SectionStatus::Malformed);
        assert_eq!(report.settings, SectionStatus::Malformed);
    }

    #[test]
    fn a_second_import_during_the_first_is_rejected() {
        let (service, events, _dir) = setup();

        // Re-enter the import from inside the change notification the
        // first import publishes: the guard must reject it.
        let reentrant: Arc<Mutex<Option<Result<ImportReport, ImportError>>>> =
            Arc::new(Mutex::new(None));
        let sink = reentrant.clone();
        let inner_service = service.clone();
        events.subscribe(move |event| {
            if event == ChangeEvent::DataImported {
                *sink.lock().unwrap() =
                    Some(inner_service.import_json(r#"{ "vehicles": [] }"#));
            }
        });

        let report = service.import_json(r#"{ "vehicles": [] }"#).unwrap();
        assert!(report.success());

        let inner = reentrant.lock().unwrap().take().unwrap();
        assert!(matches!(inner, Err(ImportError::AlreadyRunning)));
    }
}
