//! Trip history: per-category listing, the summary/full view, and clearing.

use log::info;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::commands::trips::{ClearHistoryCommand, ClearHistoryResult, HistoryQuery};
use crate::domain::events::{ChangeEvent, EventBus};
use crate::domain::models::trip::TripRecord;
use crate::domain::session::{HistoryView, SessionState};
use crate::storage::json::{StoreError, TripRepository};
use crate::storage::traits::TripStorage;

/// How many records the summary view shows.
const SUMMARY_LEN: usize = 5;

#[derive(Debug, Error)]
pub enum HistoryError {
    /// Clearing is destructive and requires the UI layer's confirmation
    /// step to have happened first.
    #[error("history clear requires prior confirmation")]
    ConfirmationRequired,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Clone)]
pub struct HistoryService {
    trip_repository: TripRepository,
    events: Arc<EventBus>,
}

impl HistoryService {
    pub fn new(trip_repository: TripRepository, events: Arc<EventBus>) -> Self {
        Self {
            trip_repository,
            events,
        }
    }

    /// Full history for one category, newest first.
    pub fn list(&self, query: HistoryQuery) -> Vec<TripRecord> {
        self.trip_repository
            .list_trips()
            .into_iter()
            .filter(|t| t.category == query.category)
            .collect()
    }

    /// History for the session's active category, truncated to the summary
    /// length unless the session's view toggle asks for the full list.
    pub fn visible(&self, session: &SessionState) -> Vec<TripRecord> {
        let mut trips = self.list(HistoryQuery {
            category: session.active_category(),
        });
        if session.history_view() == HistoryView::Summary {
            trips.truncate(SUMMARY_LEN);
        }
        trips
    }

    /// Remove every record of one category, leaving the other categories
    /// untouched. Refuses to run without the confirmation flag.
    pub fn clear(&self, command: ClearHistoryCommand) -> Result<ClearHistoryResult, HistoryError> {
        if !command.confirmed {
            return Err(HistoryError::ConfirmationRequired);
        }

        let removed = self.trip_repository.clear_category(command.category)?;
        info!("cleared {} {} records", removed, command.category);
        self.events.publish(ChangeEvent::HistoryCleared);

        Ok(ClearHistoryResult { removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::vehicle::VehicleCategory;
    use crate::storage::json::JsonStore;
    use chrono::Utc;
    use tempfile::tempdir;

    fn trip(id: &str, category: VehicleCategory) -> TripRecord {
        TripRecord {
            id: id.to_string(),
            created_at: Utc::now(),
            category,
            vehicle_id: None,
            odometer_start: 100.0,
            odometer_end: 150.0,
            efficiency: 10.0,
            price_per_liter: 5.0,
            distance_km: 50.0,
            liters: 5.0,
            cost: 25.0,
            earnings: None,
            profit: None,
        }
    }

    fn setup() -> (HistoryService, TripRepository, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(JsonStore::open(dir.path()).unwrap());
        let repository = TripRepository::new(store, 100);
        let service = HistoryService::new(repository.clone(), Arc::new(EventBus::new()));
        (service, repository, dir)
    }

    #[test]
    fn list_is_scoped_to_the_requested_category() {
        let (service, repository, _dir) = setup();
        repository.store_trip(&trip("car-1", VehicleCategory::Car)).unwrap();
        repository
            .store_trip(&trip("moto-1", VehicleCategory::Motorcycle))
            .unwrap();

        let cars = service.list(HistoryQuery {
            category: VehicleCategory::Car,
        });
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].id, "car-1");
    }

    #[test]
    fn summary_view_truncates_and_full_view_does_not() {
        let (service, repository, _dir) = setup();
        for i in 0..8 {
            repository
                .store_trip(&trip(&format!("t-{}", i), VehicleCategory::Car))
                .unwrap();
        }

        let mut session = SessionState::new(VehicleCategory::Car);
        assert_eq!(service.visible(&session).len(), SUMMARY_LEN);

        session.toggle_history_view();
        assert_eq!(service.visible(&session).len(), 8);
    }

    #[test]
    fn clear_requires_confirmation() {
        let (service, repository, _dir) = setup();
        repository.store_trip(&trip("car-1", VehicleCategory::Car)).unwrap();

        let err = service
            .clear(ClearHistoryCommand {
                category: VehicleCategory::Car,
                confirmed: false,
            })
            .unwrap_err();
        assert!(matches!(err, HistoryError::ConfirmationRequired));
        assert_eq!(repository.list_trips().len(), 1);
    }

    #[test]
    fn clear_removes_only_the_given_category() {
        let (service, repository, _dir) = setup();
        repository.store_trip(&trip("car-1", VehicleCategory::Car)).unwrap();
        repository
            .store_trip(&trip("moto-1", VehicleCategory::Motorcycle))
            .unwrap();
        repository.store_trip(&trip("car-2", VehicleCategory::Car)).unwrap();

        let motorcycle_before: Vec<_> = repository
            .list_trips()
            .into_iter()
            .filter(|t| t.category == VehicleCategory::Motorcycle)
            .collect();

        let result = service
            .clear(ClearHistoryCommand {
                category: VehicleCategory::Car,
                confirmed: true,
            })
            .unwrap();
        assert_eq!(result.removed, 2);

        // The other category's records are untouched
        assert_eq!(repository.list_trips(), motorcycle_before);
    }
}
