pub mod filter_api;
