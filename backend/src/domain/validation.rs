//! # Input validation
//!
//! Pure validation functions for the two user-facing forms. No side
//! effects, never panics on user-shaped input, and every violation is
//! collected — the caller gets the full list, not just the first failure.
//!
//! Numeric parsing accepts the locale variant with a comma as the decimal
//! separator by normalizing it to a dot before parsing.

use crate::domain::config::Limits;
use crate::domain::models::vehicle::VehicleCategory;

/// Form field a validation issue is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Efficiency,
    Category,
    OdometerStart,
    OdometerEnd,
    Price,
    Earnings,
}

/// One violation: the offending field plus a translation-catalog key and
/// the placeholder values its template needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub field: Field,
    pub key: &'static str,
    pub args: Vec<(&'static str, String)>,
}

impl ValidationIssue {
    fn new(field: Field, key: &'static str) -> Self {
        Self {
            field,
            key,
            args: Vec::new(),
        }
    }

    fn with_args(field: Field, key: &'static str, args: Vec<(&'static str, String)>) -> Self {
        Self { field, key, args }
    }
}

/// Parsed, validated vehicle form input.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleInput {
    pub name: String,
    pub efficiency: f64,
    pub category: VehicleCategory,
}

/// Parsed, validated trip form input.
#[derive(Debug, Clone, PartialEq)]
pub struct TripInput {
    pub odometer_start: f64,
    pub odometer_end: f64,
    pub efficiency: f64,
    pub price_per_liter: f64,
    /// `None` when the earnings field was left blank — distinct from zero.
    pub earnings: Option<f64>,
}

/// Parse a decimal number, accepting "12,5" as well as "12.5".
/// Returns `None` for blank input, non-numbers, infinities and NaN.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate the vehicle registration form.
pub fn validate_vehicle(
    limits: &Limits,
    name: &str,
    efficiency: &str,
    category: &str,
) -> Result<VehicleInput, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let name = name.trim();
    let name_len = name.chars().count();
    if name_len < limits.name_min_len || name_len > limits.name_max_len {
        issues.push(ValidationIssue::with_args(
            Field::Name,
            "error.vehicle_name_length",
            vec![
                ("min", limits.name_min_len.to_string()),
                ("max", limits.name_max_len.to_string()),
            ],
        ));
    }

    let efficiency_value = parse_decimal(efficiency);
    match efficiency_value {
        Some(v) if v >= limits.efficiency_min && v <= limits.efficiency_max => {}
        // A non-number gets the same message as an out-of-range value
        _ => issues.push(ValidationIssue::with_args(
            Field::Efficiency,
            "error.vehicle_efficiency_range",
            vec![
                ("min", limits.efficiency_min.to_string()),
                ("max", limits.efficiency_max.to_string()),
            ],
        )),
    }

    let category_value = VehicleCategory::from_code(category);
    if category_value.is_none() {
        issues.push(ValidationIssue::new(
            Field::Category,
            "error.vehicle_category_unknown",
        ));
    }

    match (efficiency_value, category_value) {
        (Some(efficiency), Some(category)) if issues.is_empty() => Ok(VehicleInput {
            name: name.to_string(),
            efficiency,
            category,
        }),
        _ => Err(issues),
    }
}

/// Validate the trip calculation form.
pub fn validate_trip(
    limits: &Limits,
    odometer_start: &str,
    odometer_end: &str,
    efficiency: &str,
    price_per_liter: &str,
    earnings: &str,
) -> Result<TripInput, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let start = parse_decimal(odometer_start);
    match start {
        Some(v) if v >= 0.0 && v <= limits.odometer_max_km => {}
        _ => issues.push(ValidationIssue::with_args(
            Field::OdometerStart,
            "error.odometer_start_range",
            vec![("max", limits.odometer_max_km.to_string())],
        )),
    }

    let end = parse_decimal(odometer_end);
    match end {
        Some(v) if v >= 0.0 && v <= limits.odometer_max_km => {}
        _ => issues.push(ValidationIssue::with_args(
            Field::OdometerEnd,
            "error.odometer_end_range",
            vec![("max", limits.odometer_max_km.to_string())],
        )),
    }

    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            issues.push(ValidationIssue::new(
                Field::OdometerEnd,
                "error.odometer_end_greater",
            ));
        } else if end - start > limits.trip_max_km {
            issues.push(ValidationIssue::with_args(
                Field::OdometerEnd,
                "error.trip_distance_max",
                vec![("max", limits.trip_max_km.to_string())],
            ));
        }
    }

    let efficiency_value = parse_decimal(efficiency);
    match efficiency_value {
        Some(v) if v >= limits.efficiency_min && v <= limits.efficiency_max => {}
        _ => issues.push(ValidationIssue::with_args(
            Field::Efficiency,
            "error.vehicle_efficiency_range",
            vec![
                ("min", limits.efficiency_min.to_string()),
                ("max", limits.efficiency_max.to_string()),
            ],
        )),
    }

    let price_value = parse_decimal(price_per_liter);
    match price_value {
        Some(v) if v >= limits.price_min && v <= limits.price_max => {}
        _ => issues.push(ValidationIssue::with_args(
            Field::Price,
            "error.price_range",
            vec![
                ("min", limits.price_min.to_string()),
                ("max", limits.price_max.to_string()),
            ],
        )),
    }

    // Blank earnings is valid and means "not reported"; zero is a reported
    // value and goes through the range check like any other number.
    let earnings_value = if earnings.trim().is_empty() {
        None
    } else {
        match parse_decimal(earnings) {
            Some(v) if v >= 0.0 && v <= limits.earnings_max => Some(v),
            _ => {
                issues.push(ValidationIssue::with_args(
                    Field::Earnings,
                    "error.earnings_range",
                    vec![("max", limits.earnings_max.to_string())],
                ));
                None
            }
        }
    };

    match (start, end, efficiency_value, price_value) {
        (Some(odometer_start), Some(odometer_end), Some(efficiency), Some(price_per_liter))
            if issues.is_empty() =>
        {
            Ok(TripInput {
                odometer_start,
                odometer_end,
                efficiency,
                price_per_liter,
                earnings: earnings_value,
            })
        }
        _ => Err(issues),
    }
}
