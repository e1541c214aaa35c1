//! Dataset KPIs, per-date summary, and the three insight charts.

use std::cell::RefCell;
use std::rc::Rc;

use crate::client::{decode, Fetch};
use crate::config::{HOURLY_PATH, SLOW_HOURS_PATH, STATS_PATH, SUMMARY_PATH, WEEKDAY_SPEED_PATH};
use crate::error::Result;
use crate::models::{DatasetStats, DaySummary, HourlyVolume, SlowHour, WeekdaySpeed};
use crate::query::QueryString;
use crate::render::{ChartData, ChartSink, KpiSink, KpiView, SummarySink, SummaryView};
use crate::state::{DashboardState, Surface};

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Loads the KPI snapshot, the date-scoped summary, and the three derived
/// chart series. Independent of the trip-list filters.
pub struct InsightsController {
    client: Rc<dyn Fetch>,
    state: Rc<RefCell<DashboardState>>,
    kpi: Box<dyn KpiSink>,
    summary: Box<dyn SummarySink>,
    hourly: Box<dyn ChartSink>,
    weekday: Box<dyn ChartSink>,
    slow: Box<dyn ChartSink>,
}

impl InsightsController {
    pub fn new(
        client: Rc<dyn Fetch>,
        state: Rc<RefCell<DashboardState>>,
        kpi: Box<dyn KpiSink>,
        summary: Box<dyn SummarySink>,
        hourly: Box<dyn ChartSink>,
        weekday: Box<dyn ChartSink>,
        slow: Box<dyn ChartSink>,
    ) -> Self {
        Self {
            client,
            state,
            kpi,
            summary,
            hourly,
            weekday,
            slow,
        }
    }

    /// Fetch the dataset-wide aggregate stats and render the KPI panel.
    ///
    /// Metrics the service omits render as a placeholder. On failure the
    /// panel keeps whatever it last showed.
    pub fn load_kpis(&mut self) {
        let token = self.state.borrow_mut().begin(Surface::Kpi);

        let outcome: Result<DatasetStats> =
            self.client.get_json(STATS_PATH, "").and_then(decode);

        if !self.state.borrow().is_current(Surface::Kpi, token) {
            tracing::debug!(?token, "discarding stale KPI response");
            return;
        }

        match outcome {
            Ok(stats) => self.kpi.render(&KpiView::from(&stats)),
            Err(e) => tracing::error!(error = %e, "failed to load KPI snapshot"),
        }
    }

    /// Fetch the summary for one calendar date and render it.
    ///
    /// An empty date short-circuits with a prompt, before any request. A
    /// null or empty payload means the date has no trips: an explicit
    /// no-data state is rendered and the date KPI is reset.
    pub fn load_summary(&mut self, date: &str) {
        let date = date.trim();
        if date.is_empty() {
            self.summary.render_prompt("Pick a date");
            return;
        }

        let token = self.state.borrow_mut().begin(Surface::Summary);

        let query = QueryString::new().param("date", date).build();
        let outcome = self.client.get_json(SUMMARY_PATH, &query);

        if !self.state.borrow().is_current(Surface::Summary, token) {
            tracing::debug!(?token, "discarding stale summary response");
            return;
        }

        match outcome {
            Ok(value) if is_no_data(&value) => {
                self.summary.render_empty("No data for selected date");
            }
            Ok(value) => match decode::<DaySummary>(value) {
                Ok(summary) => self.summary.render(&SummaryView::from(&summary)),
                Err(e) => {
                    tracing::error!(error = %e, "malformed summary payload");
                    self.summary.render_error("Error loading summary");
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to load summary");
                self.summary.render_error("Error loading summary");
            }
        }
    }

    /// Fetch the three insight series and redraw their charts.
    ///
    /// The three fetches share one failure boundary: any failure aborts the
    /// batch and leaves all three charts on their last successful render.
    /// Decoupling them would improve partial availability but would be a
    /// behavior change. Each chart sink tears down its previous instance
    /// before drawing, so repeated calls never stack renders.
    pub fn load_charts(&mut self) {
        let token = self.state.borrow_mut().begin(Surface::Charts);

        let outcome = self.fetch_chart_series();

        if !self.state.borrow().is_current(Surface::Charts, token) {
            tracing::debug!(?token, "discarding stale chart response");
            return;
        }

        match outcome {
            Ok((hourly, weekday, slow)) => {
                self.hourly.render(&ChartData {
                    labels: hourly.iter().map(|h| h.pickup_hour.to_string()).collect(),
                    values: hourly.iter().map(|h| h.trips as f64).collect(),
                });
                self.weekday.render(&ChartData {
                    labels: WEEKDAY_LABELS.iter().map(|d| d.to_string()).collect(),
                    values: weekday.iter().map(|w| w.avg_speed_kmh).collect(),
                });
                self.slow.render(&ChartData {
                    labels: slow.iter().map(|s| s.pickup_hour.to_string()).collect(),
                    values: slow.iter().map(|s| s.avg_sec_per_km).collect(),
                });
            }
            Err(e) => tracing::error!(error = %e, "failed to load insight charts"),
        }
    }

    fn fetch_chart_series(
        &self,
    ) -> Result<(Vec<HourlyVolume>, Vec<WeekdaySpeed>, Vec<SlowHour>)> {
        let hourly = decode(self.client.get_json(HOURLY_PATH, "")?)?;
        let weekday = decode(self.client.get_json(WEEKDAY_SPEED_PATH, "")?)?;
        let slow = decode(self.client.get_json(SLOW_HOURS_PATH, "")?)?;
        Ok((hourly, weekday, slow))
    }
}

/// A summary payload of `null`, `{}`, or `[]` means no rows for the date.
fn is_no_data(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
