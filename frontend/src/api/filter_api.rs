//! Server functions backing the filter form.

use common::{facet_catalog::FacetCatalog, filter_settings::FilterSettings, query_conditions::SearchPlan};
use dioxus::prelude::*;

#[server]
pub async fn get_filter_settings() -> Result<FilterSettings, ServerFnError> {
    let x = backend::api::filter_settings::get_filter_settings().await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn get_facet_catalog() -> Result<FacetCatalog, ServerFnError> {
    let x = backend::api::filter_settings::get_facet_catalog().await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn get_results_url() -> Result<String, ServerFnError> {
    let x = backend::api::results_page::get_results_url().await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

/// Conditions the host search would receive for this query string.
#[server]
pub async fn get_search_plan(query_string: String) -> Result<SearchPlan, ServerFnError> {
    let request = common::search_request::SearchRequest::from_query_string(&query_string);
    Ok(backend::api::search::build_search_plan(vec![], &request))
}
