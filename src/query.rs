//! Canonical query construction for the trip service.
//!
//! User-entered criteria are carried as explicit value objects and serialized
//! through [`QueryString`], which percent-encodes values and skips empty
//! fields entirely. Serialization is deterministic: equal states always yield
//! byte-identical query strings.
//!
//! # Example
//!
//! ```rust
//! use tripdash::query::{FilterCriteria, QueryState};
//!
//! let mut state = QueryState::list_default();
//! state.filters = FilterCriteria {
//!     min_speed: Some(20.0),
//!     max_speed: Some(40.0),
//!     ..FilterCriteria::default()
//! };
//! let q = state.to_query();
//! assert!(q.contains("minSpeed=20"));
//! assert!(!q.contains("vendorId"));
//! ```

use url::form_urlencoded;

use crate::config::LIST_PAGE_SIZE;
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// QueryString
// ---------------------------------------------------------------------------

/// Builds a percent-encoded query string, skipping empty values.
///
/// A value that is `None`, or whose trimmed text form is empty, is excluded
/// entirely rather than serialized as an empty parameter. Methods return
/// `&mut Self` for chaining.
#[derive(Debug, Default)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Skipped when the value is blank.
    pub fn param(&mut self, key: &str, value: &str) -> &mut Self {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.pairs.push((key.to_string(), trimmed.to_string()));
        }
        self
    }

    /// Append an optional parameter. `None` is skipped.
    pub fn opt(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            self.param(key, v);
        }
        self
    }

    /// Append an optional numeric parameter in decimal text form.
    pub fn opt_num<N: ToString>(&mut self, key: &str, value: Option<N>) -> &mut Self {
        if let Some(v) = value {
            self.param(key, &v.to_string());
        }
        self
    }

    /// Serialize the accumulated pairs as `k=v&k=v`, percent-encoded.
    pub fn build(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.pairs {
            ser.append_pair(k, v);
        }
        ser.finish()
    }
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

/// Trip columns the service can sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    PickupDatetime,
    DropoffDatetime,
    SpeedKmh,
    DistanceKm,
    TripDuration,
    PassengerCount,
    VendorId,
}

impl SortField {
    /// The wire name passed through as `sortBy`, uninterpreted by the client.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::PickupDatetime => "pickup_datetime",
            SortField::DropoffDatetime => "dropoff_datetime",
            SortField::SpeedKmh => "speed_kmh",
            SortField::DistanceKm => "distance_km",
            SortField::TripDuration => "trip_duration",
            SortField::PassengerCount => "passenger_count",
            SortField::VendorId => "vendor_id",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pickup_datetime" => Some(SortField::PickupDatetime),
            "dropoff_datetime" => Some(SortField::DropoffDatetime),
            "speed_kmh" => Some(SortField::SpeedKmh),
            "distance_km" => Some(SortField::DistanceKm),
            "trip_duration" => Some(SortField::TripDuration),
            "passenger_count" => Some(SortField::PassengerCount),
            "vendor_id" => Some(SortField::VendorId),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Sort key and direction. Defaults to newest pickups first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// User-entered trip filters. All fields optional; absence means
/// unconstrained.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub vendor_id: Option<String>,
    pub passenger_count: Option<u32>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    /// `minLon,minLat,maxLon,maxLat`, passed through uninterpreted.
    pub bounding_box: Option<String>,
}

impl FilterCriteria {
    /// Normalize form input: a string field present as empty or whitespace
    /// becomes absent.
    pub fn normalized(mut self) -> Self {
        let blank_to_none = |field: &mut Option<String>| {
            if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *field = None;
            }
        };
        blank_to_none(&mut self.start_date);
        blank_to_none(&mut self.end_date);
        blank_to_none(&mut self.vendor_id);
        blank_to_none(&mut self.bounding_box);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &FilterCriteria::default()
    }
}

// ---------------------------------------------------------------------------
// PageCursor / QueryState
// ---------------------------------------------------------------------------

/// Current page within a fixed-size pagination window.
///
/// The page size is fixed per surface (see [`crate::config`]) so pagination
/// math never shifts between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
    pub page_size: u32,
}

impl PageCursor {
    /// First page of the trip list view.
    pub fn list() -> Self {
        Self {
            page: 1,
            page_size: LIST_PAGE_SIZE,
        }
    }
}

/// The full query state for one paginated, sorted, filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub filters: FilterCriteria,
    pub sort: SortSpec,
    pub cursor: PageCursor,
}

impl QueryState {
    /// Unfiltered state with default sort on the first trip-list page.
    pub fn list_default() -> Self {
        Self {
            filters: FilterCriteria::default(),
            sort: SortSpec::default(),
            cursor: PageCursor::list(),
        }
    }

    /// Serialize to the canonical query string.
    ///
    /// Deterministic and side-effect free: equal states yield byte-identical
    /// output. Absent filter fields are omitted entirely. The parameter
    /// order is fixed here for reproducibility but is not contractual; the
    /// service accepts any order.
    pub fn to_query(&self) -> String {
        QueryString::new()
            .param("page", &self.cursor.page.to_string())
            .param("pageSize", &self.cursor.page_size.to_string())
            .param("sortBy", self.sort.field.as_str())
            .param("sortOrder", self.sort.direction.as_str())
            .opt("start", self.filters.start_date.as_deref())
            .opt("end", self.filters.end_date.as_deref())
            .opt("vendorId", self.filters.vendor_id.as_deref())
            .opt_num("passengerCount", self.filters.passenger_count)
            .opt_num("minSpeed", self.filters.min_speed)
            .opt_num("maxSpeed", self.filters.max_speed)
            .opt("bbox", self.filters.bounding_box.as_deref())
            .build()
    }

    /// Parse a canonical query string back into a state.
    ///
    /// Inverse of [`to_query`](Self::to_query) for canonical output:
    /// round-tripping a state through `to_query` and back is stable.
    /// Unknown parameters and unparseable numeric values are rejected.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut state = QueryState::list_default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page" => {
                    state.cursor.page = value.parse().map_err(|_| {
                        DashboardError::Validation(format!("bad page number: {value}"))
                    })?;
                }
                "pageSize" => {
                    state.cursor.page_size = value.parse().map_err(|_| {
                        DashboardError::Validation(format!("bad page size: {value}"))
                    })?;
                }
                "sortBy" => {
                    state.sort.field = SortField::parse(&value).ok_or_else(|| {
                        DashboardError::Validation(format!("unknown sort field: {value}"))
                    })?;
                }
                "sortOrder" => {
                    state.sort.direction = SortDirection::parse(&value).ok_or_else(|| {
                        DashboardError::Validation(format!("unknown sort order: {value}"))
                    })?;
                }
                "start" => state.filters.start_date = Some(value.into_owned()),
                "end" => state.filters.end_date = Some(value.into_owned()),
                "vendorId" => state.filters.vendor_id = Some(value.into_owned()),
                "passengerCount" => {
                    state.filters.passenger_count = Some(value.parse().map_err(|_| {
                        DashboardError::Validation(format!("bad passenger count: {value}"))
                    })?);
                }
                "minSpeed" => {
                    state.filters.min_speed = Some(value.parse().map_err(|_| {
                        DashboardError::Validation(format!("bad minimum speed: {value}"))
                    })?);
                }
                "maxSpeed" => {
                    state.filters.max_speed = Some(value.parse().map_err(|_| {
                        DashboardError::Validation(format!("bad maximum speed: {value}"))
                    })?);
                }
                "bbox" => state.filters.bounding_box = Some(value.into_owned()),
                other => {
                    return Err(DashboardError::Validation(format!(
                        "unknown query parameter: {other}"
                    )));
                }
            }
        }
        Ok(state)
    }
}
