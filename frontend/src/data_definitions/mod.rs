pub mod search_params;
