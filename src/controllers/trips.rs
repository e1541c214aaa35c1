//! Filtered, sorted, paginated trip listing.

use std::cell::RefCell;
use std::rc::Rc;

use crate::client::{decode, Fetch};
use crate::config::TRIPS_PATH;
use crate::error::Result;
use crate::models::{Paginated, TripRecord};
use crate::query::{FilterCriteria, QueryState, SortDirection, SortField, SortSpec};
use crate::render::{TripListSink, TripListView};
use crate::state::{DashboardState, Surface};

/// Orchestrates filter, sort, and page changes into trip-list queries.
///
/// The current [`QueryState`] lives in the shared [`DashboardState`] slice
/// this controller owns; every mutating operation resets or adjusts the page
/// and triggers a reload. Responses are applied in token order: a response
/// from a superseded request is discarded silently.
pub struct TripListController {
    client: Rc<dyn Fetch>,
    state: Rc<RefCell<DashboardState>>,
    sink: Box<dyn TripListSink>,
}

impl TripListController {
    pub fn new(
        client: Rc<dyn Fetch>,
        state: Rc<RefCell<DashboardState>>,
        sink: Box<dyn TripListSink>,
    ) -> Self {
        Self {
            client,
            state,
            sink,
        }
    }

    /// Apply a new set of filters, reset to page 1, and reload.
    ///
    /// The incoming criteria replace the filter slice wholesale (after
    /// empty-string normalization); the sort survives.
    pub fn apply_filters(&mut self, criteria: FilterCriteria) {
        {
            let mut state = self.state.borrow_mut();
            let query = state.trip_query_mut();
            query.filters = criteria.normalized();
            query.cursor.page = 1;
        }
        self.reload();
    }

    /// Clear all filters, restore the default sort, reset to page 1, reload.
    pub fn reset_filters(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            let query = state.trip_query_mut();
            query.filters = FilterCriteria::default();
            query.sort = SortSpec::default();
            query.cursor.page = 1;
        }
        self.reload();
    }

    /// Change the sort key or direction, reset to page 1, and reload.
    pub fn change_sort(&mut self, field: SortField, direction: SortDirection) {
        {
            let mut state = self.state.borrow_mut();
            let query = state.trip_query_mut();
            query.sort = SortSpec { field, direction };
            query.cursor.page = 1;
        }
        self.reload();
    }

    /// Jump to page `page` without touching filters or sort.
    ///
    /// Page numbers below 1 are rejected as a no-op. Pages beyond the known
    /// total are allowed: the service is the source of truth for emptiness.
    pub fn go_to_page(&mut self, page: u32) {
        if page == 0 {
            return;
        }
        self.state.borrow_mut().trip_query_mut().cursor.page = page;
        self.reload();
    }

    /// Step back one page; a no-op at page 1.
    pub fn prev_page(&mut self) {
        let page = self.current_page();
        if page > 1 {
            self.go_to_page(page - 1);
        }
    }

    /// Step forward one page.
    pub fn next_page(&mut self) {
        let page = self.current_page();
        self.go_to_page(page + 1);
    }

    pub fn current_page(&self) -> u32 {
        self.state.borrow().trip_query().cursor.page
    }

    pub fn current_query(&self) -> QueryState {
        self.state.borrow().trip_query().clone()
    }

    /// Build the canonical query, mint a token, fetch, and render.
    ///
    /// The state borrow is released before the fetch so a competing action
    /// dispatched while this request is in flight can supersede it.
    fn reload(&mut self) {
        let (query, token) = {
            let mut state = self.state.borrow_mut();
            let query = state.trip_query().to_query();
            (query, state.begin(Surface::TripList))
        };

        let outcome: Result<Paginated<TripRecord>> = self
            .client
            .get_json(TRIPS_PATH, &query)
            .and_then(decode);

        if !self.state.borrow().is_current(Surface::TripList, token) {
            tracing::debug!(?token, "discarding stale trip list response");
            return;
        }

        match outcome {
            Ok(page) => {
                let view = TripListView::from(page);
                if view.is_empty() {
                    self.sink.render_empty(&view);
                } else {
                    self.sink.render(&view);
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load trips");
                // Previously rendered list, page, and filters stay as they are.
                self.sink.render_error("Error loading trips");
            }
        }
    }
}
