//! Client-side dashboard controller for a taxi-trip analytics service.
//!
//! Translates user-entered filter/sort/page criteria into canonical remote
//! queries, manages request lifecycles across overlapping user actions, and
//! drives pluggable render sinks (trip list, KPI panels, insight charts,
//! proximity map) to a consistent state after each query. The remote REST
//! service and the concrete chart/map widgets stay outside the crate: the
//! former behind [`Fetch`], the latter behind the sink traits in [`render`].
//!
//! # Quick start
//!
//! ```no_run
//! use tripdash::Dashboard;
//! use tripdash::query::FilterCriteria;
//! # use tripdash::render::{TripListSink, TripListView};
//! # struct Panel;
//! # impl TripListSink for Panel {
//! #     fn render(&mut self, _: &TripListView) {}
//! #     fn render_empty(&mut self, _: &TripListView) {}
//! #     fn render_error(&mut self, _: &str) {}
//! # }
//!
//! let dashboard = Dashboard::builder()
//!     .base_url("http://localhost:5000")
//!     .build()
//!     .unwrap();
//!
//! let mut trips = dashboard.trip_list(Box::new(Panel));
//! trips.apply_filters(FilterCriteria {
//!     min_speed: Some(20.0),
//!     ..FilterCriteria::default()
//! });
//! ```
//!
//! # Concurrency model
//!
//! Single-threaded and event-driven: every operation is triggered by a
//! discrete user action, and the only suspension point is the network call
//! itself. Because a second action can be dispatched while an earlier
//! request is still in flight, responses are applied in *token* order, not
//! arrival order -- each surface keeps the latest
//! [`RequestToken`](state::RequestToken) it minted and discards responses
//! from superseded requests. There is no transport-level cancellation; the
//! token compare on completion is the sole staleness defense.

pub mod client;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod query;
pub mod render;
pub mod state;

pub use client::{Fetch, RemoteClient};
pub use controllers::{InsightsController, ProximityController, TripListController};
pub use error::{DashboardError, Result};
pub use state::{DashboardState, RequestToken, Surface};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use serde::Deserialize;

use crate::client::decode;
use crate::models::{HealthStatus, TripRecord, VendorStats};
use crate::render::{ChartSink, KpiSink, MapSink, SummarySink, TripListSink};

// ---------------------------------------------------------------------------
// DashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Dashboard`] instance.
pub struct DashboardBuilder {
    base_url: String,
    timeout: Duration,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl DashboardBuilder {
    /// Set the service base address. Defaults to
    /// [`DEFAULT_BASE_URL`](config::DEFAULT_BASE_URL).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the dashboard, creating the HTTP client and shared state.
    pub fn build(self) -> Result<Dashboard> {
        let client = RemoteClient::new(&self.base_url, self.timeout)?;
        Ok(Dashboard::with_client(Rc::new(client)))
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// The dashboard entry point.
///
/// Owns the [`RemoteClient`] and the shared [`DashboardState`], and hands
/// out controllers bound to caller-supplied render sinks. Controllers share
/// both via `Rc`, so they can outlive this value; each writes a disjoint
/// slice of the state.
pub struct Dashboard {
    client: Rc<dyn Fetch>,
    state: Rc<RefCell<DashboardState>>,
}

impl Dashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// Assemble a dashboard around an existing fetch implementation.
    ///
    /// The escape hatch tests use to substitute a scripted [`Fetch`].
    pub fn with_client(client: Rc<dyn Fetch>) -> Self {
        Self {
            client,
            state: Rc::new(RefCell::new(DashboardState::new())),
        }
    }

    // -- Controller accessors ----------------------------------------------

    /// Controller for the filtered, sorted, paginated trip list.
    pub fn trip_list(&self, sink: Box<dyn TripListSink>) -> TripListController {
        TripListController::new(self.client.clone(), self.state.clone(), sink)
    }

    /// Controller for the KPI panel, date summary, and insight charts.
    pub fn insights(
        &self,
        kpi: Box<dyn KpiSink>,
        summary: Box<dyn SummarySink>,
        hourly: Box<dyn ChartSink>,
        weekday: Box<dyn ChartSink>,
        slow: Box<dyn ChartSink>,
    ) -> InsightsController {
        InsightsController::new(
            self.client.clone(),
            self.state.clone(),
            kpi,
            summary,
            hourly,
            weekday,
            slow,
        )
    }

    /// Controller for the proximity map.
    pub fn proximity(&self, sink: Box<dyn MapSink>) -> ProximityController {
        ProximityController::new(self.client.clone(), self.state.clone(), sink)
    }

    // -- Direct service queries --------------------------------------------

    /// Probe the service health endpoint.
    pub fn health(&self) -> Result<HealthStatus> {
        decode(self.client.get_json(config::HEALTH_PATH, "")?)
    }

    /// Fetch a single trip by id. Returns `None` when the service reports
    /// the trip does not exist.
    pub fn trip(&self, id: &str) -> Result<Option<TripRecord>> {
        let id = id.trim();
        if id.is_empty() {
            return Err(DashboardError::Validation("trip id is empty".into()));
        }
        // Encode the id so reserved characters stay inside the path segment.
        let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
        match self
            .client
            .get_json(&format!("{}/{}", config::TRIPS_PATH, encoded), "")
        {
            Ok(value) => decode(value).map(Some),
            Err(DashboardError::Remote { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fetch the per-vendor aggregate breakdown.
    pub fn vendors(&self) -> Result<Vec<VendorStats>> {
        #[derive(Deserialize)]
        struct VendorList {
            vendors: Vec<VendorStats>,
        }
        let list: VendorList = decode(self.client.get_json(config::VENDORS_PATH, "")?)?;
        Ok(list.vendors)
    }

    // -- Shared internals --------------------------------------------------

    /// Handle to the shared state, for advanced usage and inspection.
    pub fn state(&self) -> Rc<RefCell<DashboardState>> {
        self.state.clone()
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        write!(
            f,
            "Dashboard(page={}, filters_set={})",
            state.trip_query().cursor.page,
            !state.trip_query().filters.is_empty()
        )
    }
}
