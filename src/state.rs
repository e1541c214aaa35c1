//! Shared dashboard state: per-surface request tokens and the trip-list
//! query.
//!
//! Each data surface owns a disjoint slice of this state, so controllers
//! never contend for the same field. Mutation is synchronous and
//! single-threaded; the state is shared via `Rc<RefCell<_>>` and borrowed
//! only for the duration of a mutation, never across a network call.

use std::collections::HashMap;

use crate::query::QueryState;

/// One independently fetched and rendered data view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    TripList,
    Kpi,
    Summary,
    Charts,
    Proximity,
}

/// Opaque identity of one issued request.
///
/// Tokens are minted from a single monotonically increasing counter, so a
/// later request on any surface always carries a larger token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Mutable dashboard state shared across controllers.
#[derive(Debug)]
pub struct DashboardState {
    next_token: u64,
    latest: HashMap<Surface, RequestToken>,
    trip_query: QueryState,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            next_token: 0,
            latest: HashMap::new(),
            trip_query: QueryState::list_default(),
        }
    }

    /// Mint a token for a request about to be issued against `surface`,
    /// superseding any request still in flight there.
    pub fn begin(&mut self, surface: Surface) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.latest.insert(surface, token);
        token
    }

    /// Whether `token` is still the latest issued for `surface`.
    ///
    /// A response arriving with a superseded token must be discarded; this
    /// comparison is the sole defense against out-of-order application,
    /// since there is no transport-level cancellation.
    pub fn is_current(&self, surface: Surface, token: RequestToken) -> bool {
        self.latest.get(&surface) == Some(&token)
    }

    /// Latest token minted for `surface`, if any request was ever issued.
    pub fn latest(&self, surface: Surface) -> Option<RequestToken> {
        self.latest.get(&surface).copied()
    }

    /// Current trip-list query. Owned by the trip-list controller slice.
    pub fn trip_query(&self) -> &QueryState {
        &self.trip_query
    }

    pub fn trip_query_mut(&mut self) -> &mut QueryState {
        &mut self.trip_query
    }
}
