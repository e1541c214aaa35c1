//! Per-surface controllers.
//!
//! Each controller turns user actions into remote queries, guards response
//! application with request tokens from
//! [`DashboardState`](crate::state::DashboardState), and drives its render
//! sinks. Network failures never escape a controller: each surface degrades
//! independently, leaving its last successful render intact.

pub mod insights;
pub mod proximity;
pub mod trips;

pub use insights::InsightsController;
pub use proximity::ProximityController;
pub use trips::TripListController;
