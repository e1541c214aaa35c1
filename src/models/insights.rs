use serde::{Deserialize, Serialize};

/// Dataset-wide aggregate snapshot.
///
/// Every field is optional: a missing value renders as a placeholder rather
/// than failing the KPI panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total_rows: Option<u64>,
    pub avg_speed_kmh: Option<f64>,
    pub avg_distance_km: Option<f64>,
}

/// Aggregates for a single calendar date. The service returns `null` for
/// dates with no trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: String,
    pub trips: Option<u64>,
    pub avg_speed_kmh: Option<f64>,
    pub avg_distance_km: Option<f64>,
    pub avg_duration_min: Option<f64>,
}

/// Trip count for one hour of day (0-23).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyVolume {
    pub pickup_hour: u32,
    pub trips: u64,
}

/// Average speed for one weekday; the endpoint returns seven rows, Monday
/// through Sunday, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekdaySpeed {
    pub avg_speed_kmh: f64,
}

/// Congestion metric (seconds per kilometer) for one hour of day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlowHour {
    pub pickup_hour: u32,
    pub avg_sec_per_km: f64,
}
