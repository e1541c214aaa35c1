//! View models and render sinks.
//!
//! Controllers compute renderer-agnostic view models and hand them to sink
//! traits; concrete sinks adapt them to whatever widget, chart, or map
//! library is in use. Sinks are side-effect-only: they never fetch data,
//! never hold query state, and must be safe to call repeatedly on the same
//! target (replace the previous render, don't stack on top of it).

use crate::models::{DatasetStats, DaySummary, Paginated, TripRecord};

/// Placeholder text for a metric the service did not report.
pub const PLACEHOLDER: &str = "—";

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// One rendered page of the trip list.
#[derive(Debug, Clone)]
pub struct TripListView {
    pub page: u32,
    /// Derived from the service-provided total; display only.
    pub page_count: u64,
    pub total: u64,
    pub trips: Vec<TripRecord>,
}

impl TripListView {
    pub fn page_label(&self) -> String {
        format!(
            "Page {} of {} (Total: {})",
            self.page, self.page_count, self.total
        )
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl From<Paginated<TripRecord>> for TripListView {
    fn from(page: Paginated<TripRecord>) -> Self {
        Self {
            page: page.page,
            page_count: page.page_count(),
            total: page.total,
            trips: page.data,
        }
    }
}

/// Dataset-wide KPI panel, already formatted for display. Missing metrics
/// carry [`PLACEHOLDER`] instead of a value.
#[derive(Debug, Clone)]
pub struct KpiView {
    pub total_trips: String,
    pub avg_speed: String,
    pub avg_distance: String,
}

impl From<&DatasetStats> for KpiView {
    fn from(stats: &DatasetStats) -> Self {
        Self {
            total_trips: fmt_count(stats.total_rows),
            avg_speed: fmt_metric(stats.avg_speed_kmh),
            avg_distance: fmt_metric(stats.avg_distance_km),
        }
    }
}

/// Single-date summary panel, formatted for display.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub date: String,
    pub trips: String,
    pub avg_speed: String,
    pub avg_distance: String,
    pub avg_duration: String,
}

impl From<&DaySummary> for SummaryView {
    fn from(summary: &DaySummary) -> Self {
        Self {
            date: summary.date.clone(),
            trips: fmt_count(summary.trips),
            avg_speed: fmt_metric(summary.avg_speed_kmh),
            avg_distance: fmt_metric(summary.avg_distance_km),
            avg_duration: fmt_metric(summary.avg_duration_min),
        }
    }
}

/// One chart series: parallel label and value sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// One map marker with its popup text.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

/// Full replacement state for the proximity map: the new center and the
/// complete marker set.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub markers: Vec<MarkerView>,
}

fn fmt_count(value: Option<u64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |n| n.to_string())
}

fn fmt_metric(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Render target for the paginated trip list.
pub trait TripListSink {
    /// Replace the rendered list and page label with `view`.
    fn render(&mut self, view: &TripListView);

    /// The query matched nothing (service-reported total of zero). Distinct
    /// from an error.
    fn render_empty(&mut self, view: &TripListView);

    /// Show an inline error without touching the previously rendered list.
    fn render_error(&mut self, message: &str);
}

/// Render target for the dataset-wide KPI panel.
pub trait KpiSink {
    fn render(&mut self, view: &KpiView);
}

/// Render target for the single-date summary panel.
pub trait SummarySink {
    fn render(&mut self, view: &SummaryView);

    /// Input prompt shown before any request is issued.
    fn render_prompt(&mut self, message: &str);

    /// The service had no rows for the date; the date KPI display must be
    /// reset to a placeholder.
    fn render_empty(&mut self, message: &str);

    fn render_error(&mut self, message: &str);
}

/// Render target for one chart slot.
///
/// Implementations must tear down any chart instance previously drawn to
/// the slot before drawing the new one, so repeated loads never stack
/// overlapping renders.
pub trait ChartSink {
    fn render(&mut self, chart: &ChartData);
}

/// Render target for the proximity map.
///
/// A render replaces the entire marker set (never an incremental merge) and
/// recenters the view on the new center.
pub trait MapSink {
    fn render(&mut self, view: &MapView);
}
