use common::search_request::SearchRequest;
use dioxus::prelude::*;

use crate::components::page_shell::PageShell;
use crate::data_definitions::search_params::SearchParams;
use crate::pages::home_page::HomePage;
use crate::pages::results_page::ResultsPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(PageShell)]


    #[route("/?:..query")]
    HomePage { query: SearchParams },


    #[route("/search?:..query")]
    ResultsPage { query: SearchParams },

}

impl Route {
    /// Filter values the current page was opened with.
    pub fn current_request(&self) -> SearchRequest {
        match self {
            Route::HomePage { query } | Route::ResultsPage { query } => query.0.clone(),
        }
    }

    pub fn results_page_from_request(request: SearchRequest) -> Self {
        Self::ResultsPage { query: SearchParams::from(request) }
    }
}
