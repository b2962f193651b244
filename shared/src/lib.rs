//! Serialized shapes that cross the application boundary: the backup file a
//! user exports and re-imports. Field names are camelCase because backup
//! files written by earlier releases of the app use that convention and must
//! keep round-tripping.

use serde::{Deserialize, Serialize};

/// Top-level backup document, one per exported file.
///
/// `vehicles` and `history` are snapshots of the persisted collections at
/// export time; `exportDate` is an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    /// Application identifier, e.g. "fuel-tracker"
    pub app: String,
    /// Application version that produced the file
    pub version: String,
    /// When the export was taken (RFC 3339)
    pub export_date: String,
    pub vehicles: Vec<BackupVehicle>,
    pub history: Vec<BackupTrip>,
    pub settings: BackupSettings,
}

/// A registered vehicle as stored in a backup file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupVehicle {
    pub id: String,
    pub name: String,
    /// Fuel efficiency in km per liter
    pub efficiency: f64,
    /// Category code, e.g. "car" or "motorcycle"
    pub category: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// One logged trip calculation as stored in a backup file.
///
/// The derived fields (`distanceKm`, `liters`, `cost`, `profit`) are frozen
/// at the values computed when the trip was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupTrip {
    pub id: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Category code, e.g. "car" or "motorcycle"
    pub category: String,
    /// Vehicle used for this trip, if one was registered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    pub odometer_start: f64,
    pub odometer_end: f64,
    /// Efficiency used for this specific calculation (km per liter)
    pub efficiency: f64,
    pub price_per_liter: f64,
    pub distance_km: f64,
    pub liters: f64,
    pub cost: f64,
    /// Gross earnings, absent when the driver did not report them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earnings: Option<f64>,
    /// Net profit (earnings - cost), absent whenever earnings is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
}

/// Persisted application settings as stored in a backup file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSettings {
    /// Language code, e.g. "pt" or "en"
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_document_round_trips_camel_case() {
        let doc = BackupDocument {
            app: "fuel-tracker".to_string(),
            version: "0.1.0".to_string(),
            export_date: "2024-03-01T12:00:00Z".to_string(),
            vehicles: vec![BackupVehicle {
                id: "vehicle-1".to_string(),
                name: "Onix".to_string(),
                efficiency: 12.5,
                category: "car".to_string(),
                created_at: "2024-02-01T08:00:00Z".to_string(),
            }],
            history: vec![],
            settings: BackupSettings {
                language: "pt".to_string(),
            },
        };

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"exportDate\""));
        assert!(json.contains("\"createdAt\""));

        let back: BackupDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn trip_optional_fields_are_omitted_when_absent() {
        let trip = BackupTrip {
            id: "trip-1".to_string(),
            created_at: "2024-03-01T12:00:00Z".to_string(),
            category: "car".to_string(),
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
        };

        let json = serde_json::to_string(&trip).unwrap();
        assert!(!json.contains("earnings"));
        assert!(!json.contains("profit"));
        assert!(!json.contains("vehicleId"));

        let back: BackupTrip = serde_json::from_str(&json).unwrap();
        assert_eq!(back.earnings, None);
        assert_eq!(back.profit, None);
    }
}
