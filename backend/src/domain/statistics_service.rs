//! Statistics over the trip history: per-category totals and the daily
//! cost buckets used for charting.

use chrono::{Duration as ChronoDuration, NaiveDate};
use log::debug;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::domain::config::Limits;
use crate::domain::events::RefreshDebouncer;
use crate::domain::models::trip::TripRecord;
use crate::domain::models::vehicle::VehicleCategory;
use crate::storage::json::TripRepository;
use crate::storage::traits::TripStorage;

/// How long a burst of change events is coalesced before the summary is
/// recomputed.
const REFRESH_WINDOW: Duration = Duration::from_millis(250);

/// Aggregates for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSummary {
    pub trip_count: usize,
    pub total_distance_km: f64,
    pub total_liters: f64,
    pub total_cost: f64,
    /// total distance / total liters; 0.0 when no fuel consumption was
    /// recorded, never NaN or infinity.
    pub average_efficiency: f64,
}

/// Cost accumulated on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCost {
    pub day: NaiveDate,
    pub cost: f64,
}

#[derive(Clone)]
pub struct StatisticsService {
    trip_repository: TripRepository,
    limits: Limits,
    debouncer: Arc<Mutex<RefreshDebouncer>>,
}

impl StatisticsService {
    pub fn new(trip_repository: TripRepository, limits: Limits) -> Self {
        Self {
            trip_repository,
            limits,
            debouncer: Arc::new(Mutex::new(RefreshDebouncer::new(REFRESH_WINDOW))),
        }
    }

    fn trips_of(&self, category: VehicleCategory) -> Vec<TripRecord> {
        self.trip_repository
            .list_trips()
            .into_iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Compute the totals for one category.
    pub fn summarize(&self, category: VehicleCategory) -> StatisticsSummary {
        let trips = self.trips_of(category);

        let total_distance_km: f64 = trips.iter().map(|t| t.distance_km).sum();
        let total_liters: f64 = trips.iter().map(|t| t.liters).sum();
        let total_cost: f64 = trips.iter().map(|t| t.cost).sum();
        let average_efficiency = if total_liters > 0.0 {
            total_distance_km / total_liters
        } else {
            0.0
        };

        StatisticsSummary {
            trip_count: trips.len(),
            total_distance_km,
            total_liters,
            total_cost,
            average_efficiency,
        }
    }

    /// Bucket cost by calendar day over the trailing window ending at
    /// `today`, zero-filled and in chronological order. Days are compared
    /// as dates, not as strings, so month and year boundaries order
    /// correctly.
    pub fn daily_costs(&self, category: VehicleCategory, today: NaiveDate) -> Vec<DailyCost> {
        let window = self.limits.stats_window_days;
        let start = today - ChronoDuration::days(window - 1);

        let mut buckets: Vec<DailyCost> = (0..window)
            .map(|offset| DailyCost {
                day: start + ChronoDuration::days(offset),
                cost: 0.0,
            })
            .collect();

        for trip in self.trips_of(category) {
            let day = trip.created_at.date_naive();
            if day < start || day > today {
                continue;
            }
            let index = (day - start).num_days() as usize;
            buckets[index].cost += trip.cost;
        }

        buckets
    }

    /// Note that the underlying data changed. Repeated marks within the
    /// refresh window coalesce into a single recomputation.
    pub fn mark_dirty(&self) {
        self.debouncer.lock().unwrap().mark();
    }

    pub fn refresh_pending(&self) -> bool {
        self.debouncer.lock().unwrap().is_pending()
    }

    /// Recompute the summary if a coalesced refresh is due at `now`;
    /// otherwise return `None` and keep waiting.
    pub fn poll_refresh(
        &self,
        category: VehicleCategory,
        now: Instant,
    ) -> Option<StatisticsSummary> {
        if self.debouncer.lock().unwrap().fire_at(now) {
            debug!("recomputing {} statistics after change burst", category);
            Some(self.summarize(category))
        } else {
            None
        }
    }
}
