//! Service address and fixed query constants.

/// Default base address of the trip analytics service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

// Endpoint paths, relative to the base URL.
pub const STATS_PATH: &str = "api/stats";
pub const SUMMARY_PATH: &str = "api/summary";
pub const TRIPS_PATH: &str = "api/trips";
pub const HEALTH_PATH: &str = "api/health";
pub const VENDORS_PATH: &str = "api/vendors";
pub const HOURLY_PATH: &str = "api/insights/hourly";
pub const WEEKDAY_SPEED_PATH: &str = "api/insights/weekday-speed";
pub const SLOW_HOURS_PATH: &str = "api/insights/slow-hours";
pub const NEAR_PATH: &str = "api/insights/near";

/// Page size for the trip list view. Fixed so pagination math stays
/// consistent across requests.
pub const LIST_PAGE_SIZE: u32 = 20;

/// Page size for the proximity view (one page of nearest pickups).
pub const NEAR_PAGE_SIZE: u32 = 100;

/// Search radius in meters used when the caller supplies none, or an
/// unparseable value.
pub const DEFAULT_NEAR_RADIUS_M: f64 = 1000.0;
