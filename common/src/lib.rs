//! Common library exports shared between frontend and backend.

extern crate serde;

pub mod facet_catalog;
pub mod facet_panel;
pub mod facet_selection;
pub mod filter_settings;
pub mod query_conditions;
pub mod sanitize;
pub mod search_request;
