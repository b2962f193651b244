//! Configured bounds for validation and collection sizes.

/// Bounds applied by the validator and by the trip/history collections.
/// One instance is built at startup and shared by every service.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Vehicle name length, in characters
    pub name_min_len: usize,
    pub name_max_len: usize,
    /// Fuel efficiency, km per liter
    pub efficiency_min: f64,
    pub efficiency_max: f64,
    /// Largest accepted odometer reading, km
    pub odometer_max_km: f64,
    /// Largest accepted single-trip distance, km
    pub trip_max_km: f64,
    /// Fuel price per liter
    pub price_min: f64,
    pub price_max: f64,
    /// Largest accepted gross earnings for one trip
    pub earnings_max: f64,
    /// Maximum number of trip records kept; oldest are evicted first
    pub history_cap: usize,
    /// Trailing window for the daily cost buckets, in days
    pub stats_window_days: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            name_min_len: 2,
            name_max_len: 40,
            efficiency_min: 1.0,
            efficiency_max: 50.0,
            odometer_max_km: 9_999_999.0,
            trip_max_km: 2_000.0,
            price_min: 0.01,
            price_max: 50.0,
            earnings_max: 10_000.0,
            history_cap: 100,
            stats_window_days: 7,
        }
    }
}
