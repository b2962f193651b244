//! Trip history repository backed by the JSON store.

use log::debug;
use std::sync::Arc;

use crate::domain::models::trip::TripRecord;
use crate::domain::models::vehicle::VehicleCategory;
use crate::storage::json::store::{JsonStore, StoreError};
use crate::storage::traits::TripStorage;

const HISTORY_KEY: &str = "history";

/// Stores the trip history, newest first, capped at a fixed number of
/// records. Overflow evicts from the tail: FIFO by insertion.
#[derive(Clone)]
pub struct TripRepository {
    store: Arc<JsonStore>,
    cap: usize,
}

impl TripRepository {
    pub fn new(store: Arc<JsonStore>, cap: usize) -> Self {
        Self { store, cap }
    }
}

impl TripStorage for TripRepository {
    fn list_trips(&self) -> Vec<TripRecord> {
        self.store.get(HISTORY_KEY, Vec::new())
    }

    fn store_trip(&self, trip: &TripRecord) -> Result<(), StoreError> {
        let mut trips = self.list_trips();
        trips.insert(0, trip.clone());
        trips.truncate(self.cap);
        self.store.set(HISTORY_KEY, &trips)?;
        debug!("stored trip {} ({} in history)", trip.id, trips.len());
        Ok(())
    }

    fn clear_category(&self, category: VehicleCategory) -> Result<usize, StoreError> {
        let mut trips = self.list_trips();
        let before = trips.len();
        trips.retain(|t| t.category != category);
        let removed = before - trips.len();
        if removed > 0 {
            self.store.set(HISTORY_KEY, &trips)?;
        }
        Ok(removed)
    }

    fn replace_all_trips(&self, trips: &[TripRecord]) -> Result<(), StoreError> {
        let mut trips = trips.to_vec();
        trips.truncate(self.cap);
        self.store.set(HISTORY_KEY, &trips)
    }
}
