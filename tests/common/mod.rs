//! Shared test fixtures for the dashboard integration tests.
//!
//! Provides `FakeFetch`, a scripted [`Fetch`] implementation with per-path
//! response queues, a call log, and an on-request hook (used to mint
//! competing request tokens mid-flight for staleness tests), plus recording
//! sinks whose logs the tests keep a shared handle to.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use serde_json::{json, Value};
use tripdash::render::{
    ChartData, ChartSink, KpiSink, KpiView, MapSink, MapView, SummarySink, SummaryView,
    TripListSink, TripListView,
};
use tripdash::{DashboardError, Fetch, Result};

// ---------------------------------------------------------------------------
// FakeFetch
// ---------------------------------------------------------------------------

/// One scripted response for a path.
pub enum Scripted {
    Ok(Value),
    /// Non-success HTTP status with a raw body.
    Remote(u16, &'static str),
    /// Malformed body: produces a decode error.
    Garbage,
}

type Hook = Box<dyn FnMut(&str, &str)>;

/// Scripted fetch: responses are queued per path and consumed in order.
#[derive(Default)]
pub struct FakeFetch {
    responses: RefCell<HashMap<String, VecDeque<Scripted>>>,
    calls: RefCell<Vec<(String, String)>>,
    on_request: RefCell<Option<Hook>>,
}

impl FakeFetch {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Queue a response for `path`.
    pub fn script(&self, path: &str, response: Scripted) {
        self.responses
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(response);
    }

    /// Install a hook invoked at the suspension point, after the request is
    /// issued and before its response is produced. Lets a test simulate a
    /// second user action dispatched while the first request is in flight.
    pub fn on_request(&self, hook: impl FnMut(&str, &str) + 'static) {
        *self.on_request.borrow_mut() = Some(Box::new(hook));
    }

    pub fn clear_hook(&self) {
        *self.on_request.borrow_mut() = None;
    }

    /// All `(path, query)` pairs requested so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Fetch for FakeFetch {
    fn get_json(&self, path: &str, query: &str) -> Result<Value> {
        self.calls
            .borrow_mut()
            .push((path.to_string(), query.to_string()));
        if let Some(hook) = self.on_request.borrow_mut().as_mut() {
            hook(path, query);
        }
        let scripted = self
            .responses
            .borrow_mut()
            .get_mut(path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("no scripted response for {path}"));
        match scripted {
            Scripted::Ok(value) => Ok(value),
            Scripted::Remote(status, body) => Err(DashboardError::Remote {
                status,
                body: body.to_string(),
            }),
            Scripted::Garbage => {
                Err(serde_json::from_str::<Value>("{not json").unwrap_err().into())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

/// A full trip row as the service serializes it.
pub fn trip_json(id: &str) -> Value {
    json!({
        "id": id,
        "pickup_datetime": "2016-03-14 17:24:55",
        "dropoff_datetime": "2016-03-14 17:32:30",
        "passenger_count": 1,
        "vendor_id": 2,
        "speed_kmh": 12.3,
        "distance_km": 1.5,
        "trip_duration": 455,
        "pickup_latitude": 40.7673,
        "pickup_longitude": -73.9822,
        "dropoff_latitude": 40.7658,
        "dropoff_longitude": -73.9648
    })
}

/// One page of the trips endpoint.
pub fn trips_page(page: u32, page_size: u32, total: u64, ids: &[&str]) -> Value {
    json!({
        "page": page,
        "pageSize": page_size,
        "total": total,
        "data": ids.iter().map(|id| trip_json(id)).collect::<Vec<_>>()
    })
}

/// One page of the proximity endpoint.
pub fn near_page(ids_and_coords: &[(&str, f64, f64)]) -> Value {
    json!({
        "page": 1,
        "pageSize": 100,
        "total": ids_and_coords.len(),
        "data": ids_and_coords
            .iter()
            .map(|(id, lat, lon)| json!({
                "id": id,
                "pickup_datetime": "2016-03-14 17:24:55",
                "pickup_latitude": lat,
                "pickup_longitude": lon,
                "meters_away": 250.4
            }))
            .collect::<Vec<_>>()
    })
}

// ---------------------------------------------------------------------------
// Recording sinks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum TripListEvent {
    Rendered { label: String, ids: Vec<String> },
    Empty { label: String },
    Error(String),
}

pub struct RecordingTripList {
    log: Rc<RefCell<Vec<TripListEvent>>>,
}

impl RecordingTripList {
    pub fn new() -> (Box<dyn TripListSink>, Rc<RefCell<Vec<TripListEvent>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Box::new(Self { log: log.clone() }), log)
    }
}

impl TripListSink for RecordingTripList {
    fn render(&mut self, view: &TripListView) {
        self.log.borrow_mut().push(TripListEvent::Rendered {
            label: view.page_label(),
            ids: view.trips.iter().map(|t| t.id.clone()).collect(),
        });
    }

    fn render_empty(&mut self, view: &TripListView) {
        self.log.borrow_mut().push(TripListEvent::Empty {
            label: view.page_label(),
        });
    }

    fn render_error(&mut self, message: &str) {
        self.log
            .borrow_mut()
            .push(TripListEvent::Error(message.to_string()));
    }
}

pub struct RecordingKpi {
    log: Rc<RefCell<Vec<KpiView>>>,
}

impl RecordingKpi {
    pub fn new() -> (Box<dyn KpiSink>, Rc<RefCell<Vec<KpiView>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Box::new(Self { log: log.clone() }), log)
    }
}

impl KpiSink for RecordingKpi {
    fn render(&mut self, view: &KpiView) {
        self.log.borrow_mut().push(view.clone());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryEvent {
    Rendered { date: String, trips: String },
    Prompt(String),
    Empty(String),
    Error(String),
}

pub struct RecordingSummary {
    log: Rc<RefCell<Vec<SummaryEvent>>>,
}

impl RecordingSummary {
    pub fn new() -> (Box<dyn SummarySink>, Rc<RefCell<Vec<SummaryEvent>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Box::new(Self { log: log.clone() }), log)
    }
}

impl SummarySink for RecordingSummary {
    fn render(&mut self, view: &SummaryView) {
        self.log.borrow_mut().push(SummaryEvent::Rendered {
            date: view.date.clone(),
            trips: view.trips.clone(),
        });
    }

    fn render_prompt(&mut self, message: &str) {
        self.log
            .borrow_mut()
            .push(SummaryEvent::Prompt(message.to_string()));
    }

    fn render_empty(&mut self, message: &str) {
        self.log
            .borrow_mut()
            .push(SummaryEvent::Empty(message.to_string()));
    }

    fn render_error(&mut self, message: &str) {
        self.log
            .borrow_mut()
            .push(SummaryEvent::Error(message.to_string()));
    }
}

/// Chart slot state: the currently drawn series plus a draw counter, so
/// tests can assert redraws replace instead of stacking.
#[derive(Debug, Default)]
pub struct ChartSlot {
    pub current: Option<ChartData>,
    pub draws: u32,
}

pub struct RecordingChart {
    slot: Rc<RefCell<ChartSlot>>,
}

impl RecordingChart {
    pub fn new() -> (Box<dyn ChartSink>, Rc<RefCell<ChartSlot>>) {
        let slot = Rc::new(RefCell::new(ChartSlot::default()));
        (Box::new(Self { slot: slot.clone() }), slot)
    }
}

impl ChartSink for RecordingChart {
    fn render(&mut self, chart: &ChartData) {
        let mut slot = self.slot.borrow_mut();
        // Teardown-then-draw: the previous instance is replaced, not stacked.
        slot.current = Some(chart.clone());
        slot.draws += 1;
    }
}

pub struct RecordingMap {
    current: Rc<RefCell<Option<MapView>>>,
}

impl RecordingMap {
    pub fn new() -> (Box<dyn MapSink>, Rc<RefCell<Option<MapView>>>) {
        let current = Rc::new(RefCell::new(None));
        (
            Box::new(Self {
                current: current.clone(),
            }),
            current,
        )
    }
}

impl MapSink for RecordingMap {
    fn render(&mut self, view: &MapView) {
        // Full replacement of the marker set, then recenter.
        *self.current.borrow_mut() = Some(view.clone());
    }
}
