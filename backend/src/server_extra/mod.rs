//! Plain HTTP routes for hosts that talk to the filters without the UI.

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use common::search_request::SearchRequest;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    api::{
        results_page::resolve_results_url,
        search::{
            build_search_plan,
            host_query::{HostSearchArgs, extend_search_args},
        },
    },
    config::FilterConfig,
    listing::listing_fields::{EditGuard, ListingId, ListingMetaStore, edit_form, save_listing_meta},
};

pub const EDIT_TOKEN_HEADER: &str = "x-edit-token";

#[derive(Clone)]
pub struct FilterApiState {
    pub config: Arc<FilterConfig>,
    pub store: Arc<dyn ListingMetaStore>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingMetaSubmission {
    #[serde(default)]
    pub fields: HashMap<String, String>,
    #[serde(default)]
    pub autosave: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsUrl {
    pub url: String,
}

pub fn router(state: FilterApiState) -> Router {
    Router::new()
        .route("/api/search_plan", get(search_plan))
        .route("/api/host_search_args", get(host_search_args).post(extend_host_search_args))
        .route("/api/settings", get(settings))
        .route("/api/catalog", get(catalog))
        .route("/api/results_url", get(results_url))
        .route("/api/listings/{listing}/meta", get(listing_meta_form).post(update_listing_meta))
        .with_state(state)
}

fn request_from(query: Option<String>) -> SearchRequest {
    SearchRequest::from_query_string(query.as_deref().unwrap_or_default())
}

async fn search_plan(RawQuery(query): RawQuery) -> Response {
    let request = request_from(query);
    info!("search plan for {:?}", request);
    Json(build_search_plan(vec![], &request)).into_response()
}

async fn host_search_args(RawQuery(query): RawQuery) -> Response {
    Json(extend_search_args(HostSearchArgs::default(), &request_from(query))).into_response()
}

async fn extend_host_search_args(RawQuery(query): RawQuery, Json(args): Json<HostSearchArgs>) -> Response {
    Json(extend_search_args(args, &request_from(query))).into_response()
}

async fn settings(State(state): State<FilterApiState>) -> Response {
    Json(state.config.settings.clone()).into_response()
}

async fn catalog(State(state): State<FilterApiState>) -> Response {
    Json(state.config.catalog.clone()).into_response()
}

async fn results_url(State(state): State<FilterApiState>) -> Response {
    let url = resolve_results_url(&state.config.settings, &state.config.host);
    Json(ResultsUrl { url }).into_response()
}

async fn listing_meta_form(State(state): State<FilterApiState>, Path(listing): Path<ListingId>) -> Response {
    Json(edit_form(state.store.as_ref(), listing, &state.config.catalog)).into_response()
}

fn _update_listing_meta(
    state: &FilterApiState,
    listing: ListingId,
    headers: &HeaderMap,
    submission: &ListingMetaSubmission,
) -> anyhow::Result<Response> {
    let token = headers
        .get(EDIT_TOKEN_HEADER)
        .map(|value| value.to_str())
        .transpose()
        .map_err(|e| anyhow::anyhow!("{} is not valid text: {}", EDIT_TOKEN_HEADER, e))?;
    let guard = EditGuard {
        token_valid: matches!((token, state.config.edit_token.as_deref()), (Some(given), Some(expected)) if given == expected),
        is_autosave: submission.autosave,
        can_edit: state.store.can_edit(listing),
    };
    let outcome = save_listing_meta(state.store.as_ref(), listing, &submission.fields, guard);
    Ok(Json(outcome).into_response())
}

async fn update_listing_meta(
    State(state): State<FilterApiState>,
    Path(listing): Path<ListingId>,
    headers: HeaderMap,
    Json(submission): Json<ListingMetaSubmission>,
) -> Response {
    match _update_listing_meta(&state, listing, &headers, &submission) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("update_listing_meta: request failed: {:#?}", e);
            (StatusCode::BAD_REQUEST, Body::from(e.to_string())).into_response()
        }
    }
}
