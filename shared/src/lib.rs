//! Domain model and view logic of the trends dashboard.
//!
//! Everything here is transport-free so it can be shared between the Yew
//! frontend and the command-line client: wire types, filter state, query
//! building, grouping, selection, the detail panel and the dashboard
//! controller that ties them together.

pub mod api;
pub mod attribution;
pub mod catalog;
pub mod dashboard;
pub mod detail;
pub mod filters;
pub mod grouping;
pub mod model;
pub mod moderation;
pub mod multi_select;
pub mod notify;
pub mod query;
pub mod selection;
pub mod stats;
pub mod table;
pub mod users;
