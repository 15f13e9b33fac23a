pub mod api;
pub mod config;
pub mod listing;
pub mod server_extra;
