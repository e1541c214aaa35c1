use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TripRecord — one row of the trip listing
// ---------------------------------------------------------------------------

/// Read-only projection of a single trip as returned by the service.
///
/// Immutable once received; a rendered page of records is replaced wholesale
/// when a newer page arrives. Fields the service may omit are `Option` so a
/// partial row decodes instead of failing the whole page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: String,
    pub pickup_datetime: String,
    pub dropoff_datetime: Option<String>,
    pub passenger_count: Option<u32>,
    pub vendor_id: Option<u32>,
    pub speed_kmh: Option<f64>,
    pub distance_km: Option<f64>,
    /// Trip duration in seconds.
    pub trip_duration: Option<u64>,
    pub pickup_latitude: Option<f64>,
    pub pickup_longitude: Option<f64>,
    pub dropoff_latitude: Option<f64>,
    pub dropoff_longitude: Option<f64>,
}

// ---------------------------------------------------------------------------
// Paginated
// ---------------------------------------------------------------------------

/// One page of an ordered result set, with the service-reported total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub total: u64,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    /// Page count derived from the service-provided total. Display only --
    /// the service stays the source of truth for which pages exist.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }
}

// ---------------------------------------------------------------------------
// NearbyPickup — proximity search row
// ---------------------------------------------------------------------------

/// One pickup location within the proximity search radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyPickup {
    pub id: String,
    pub pickup_datetime: String,
    pub pickup_latitude: f64,
    pub pickup_longitude: f64,
    pub meters_away: f64,
}

// ---------------------------------------------------------------------------
// Service meta
// ---------------------------------------------------------------------------

/// Response of the health probe endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Per-vendor aggregate row from the vendor statistics endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorStats {
    pub vendor_id: Option<u32>,
    pub total_trips: u64,
    pub avg_duration: Option<f64>,
    pub avg_distance: Option<f64>,
    pub avg_speed: Option<f64>,
    pub avg_passengers: Option<f64>,
}
