//! Nearest-pickups search driving the proximity map.

use std::cell::RefCell;
use std::rc::Rc;

use crate::client::{decode, Fetch};
use crate::config::{DEFAULT_NEAR_RADIUS_M, NEAR_PAGE_SIZE, NEAR_PATH};
use crate::error::{DashboardError, Result};
use crate::models::{NearbyPickup, Paginated};
use crate::query::QueryString;
use crate::render::{MapSink, MapView, MarkerView};
use crate::state::{DashboardState, Surface};

/// Loads pickups near a point and refreshes the map markers.
pub struct ProximityController {
    client: Rc<dyn Fetch>,
    state: Rc<RefCell<DashboardState>>,
    sink: Box<dyn MapSink>,
}

impl ProximityController {
    pub fn new(
        client: Rc<dyn Fetch>,
        state: Rc<RefCell<DashboardState>>,
        sink: Box<dyn MapSink>,
    ) -> Self {
        Self {
            client,
            state,
            sink,
        }
    }

    /// Load up to one page of pickups nearest to `(lat, lon)` and replace
    /// the map state.
    ///
    /// `lat` and `lon` are user-entered text and must parse as finite
    /// numbers; otherwise the call fails with `Validation` before any
    /// request is issued. A blank or unparseable `radius` falls back to the
    /// default search radius. On success the whole marker set is replaced
    /// and the map recenters; on any network failure the prior markers and
    /// view are left untouched and the error is only logged.
    pub fn load_near(&mut self, lat: &str, lon: &str, radius: &str) -> Result<()> {
        let lat = parse_coordinate("latitude", lat)?;
        let lon = parse_coordinate("longitude", lon)?;
        let radius = radius
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(DEFAULT_NEAR_RADIUS_M);

        let token = self.state.borrow_mut().begin(Surface::Proximity);

        let query = QueryString::new()
            .param("lat", &lat.to_string())
            .param("lon", &lon.to_string())
            .param("radius", &radius.to_string())
            .param("page", "1")
            .param("pageSize", &NEAR_PAGE_SIZE.to_string())
            .build();

        let outcome: Result<Paginated<NearbyPickup>> =
            self.client.get_json(NEAR_PATH, &query).and_then(decode);

        if !self.state.borrow().is_current(Surface::Proximity, token) {
            tracing::debug!(?token, "discarding stale proximity response");
            return Ok(());
        }

        match outcome {
            Ok(page) => {
                let markers = page
                    .data
                    .iter()
                    .map(|row| MarkerView {
                        latitude: row.pickup_latitude,
                        longitude: row.pickup_longitude,
                        label: format!(
                            "{}\n{}\n{:.0} m away",
                            row.id, row.pickup_datetime, row.meters_away
                        ),
                    })
                    .collect();
                self.sink.render(&MapView {
                    center_latitude: lat,
                    center_longitude: lon,
                    markers,
                });
            }
            Err(e) => tracing::error!(error = %e, "failed to load nearby pickups"),
        }
        Ok(())
    }
}

fn parse_coordinate(name: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DashboardError::Validation(format!("{name} is not a number: {value}")))
}
