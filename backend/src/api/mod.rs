//! Backend API functions, shared by the HTTP routes and the frontend server functions.

pub mod filter_settings;
pub mod results_page;
pub mod search;
