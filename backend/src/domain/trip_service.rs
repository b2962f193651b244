//! Trip calculator: validates form input, computes the derived values and
//! records the trip.

use chrono::Utc;
use log::info;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::commands::trips::{RecordTripCommand, RecordTripResult};
use crate::domain::config::Limits;
use crate::domain::events::{ChangeEvent, EventBus};
use crate::domain::models::trip::TripRecord;
use crate::domain::validation::{validate_trip, ValidationIssue};
use crate::storage::json::{StoreError, TripRepository};
use crate::storage::traits::TripStorage;

#[derive(Debug, Error)]
pub enum TripError {
    /// The form input failed validation; every violation is listed.
    #[error("trip input failed validation")]
    Invalid(Vec<ValidationIssue>),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Service that turns validated trip input into an immutable history record.
#[derive(Clone)]
pub struct TripService {
    trip_repository: TripRepository,
    limits: Limits,
    events: Arc<EventBus>,
}

impl TripService {
    pub fn new(trip_repository: TripRepository, limits: Limits, events: Arc<EventBus>) -> Self {
        Self {
            trip_repository,
            limits,
            events,
        }
    }

    /// Validate, compute and persist one trip.
    ///
    /// The derived values are frozen into the record at full precision:
    ///   distance = final − initial
    ///   liters   = distance / efficiency
    ///   cost     = liters × price
    ///   profit   = earnings − cost   (only when earnings were reported)
    ///
    /// On success the record is prepended to the history (evicting the
    /// oldest entry beyond the cap) and a change event is published so
    /// history and statistics refresh.
    pub fn compute_and_record(
        &self,
        command: RecordTripCommand,
    ) -> Result<RecordTripResult, TripError> {
        let input = validate_trip(
            &self.limits,
            &command.odometer_start,
            &command.odometer_end,
            &command.efficiency,
            &command.price_per_liter,
            &command.earnings,
        )
        .map_err(TripError::Invalid)?;

        let distance_km = input.odometer_end - input.odometer_start;
        let liters = distance_km / input.efficiency;
        let cost = liters * input.price_per_liter;
        let profit = input.earnings.map(|earnings| earnings - cost);

        let now = Utc::now();
        let trip = TripRecord {
            id: TripRecord::generate_id(now.timestamp_millis() as u64),
            created_at: now,
            category: command.category,
            vehicle_id: command.vehicle_id,
            odometer_start: input.odometer_start,
            odometer_end: input.odometer_end,
            efficiency: input.efficiency,
            price_per_liter: input.price_per_liter,
            distance_km,
            liters,
            cost,
            earnings: input.earnings,
            profit,
        };

        self.trip_repository.store_trip(&trip)?;

        info!(
            "recorded trip {}: {:.1} km, {:.1} L, R$ {:.2}",
            trip.id, trip.distance_km, trip.liters, trip.cost
        );
        self.events.publish(ChangeEvent::TripsChanged);

        Ok(RecordTripResult { trip })
    }
}
