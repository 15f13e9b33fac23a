//! Filter parameters carried in the page URL.

use std::fmt::Display;

use common::search_request::SearchRequest;

/// The query string of a results page, parsed the same way the server
/// parses it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchParams(pub SearchRequest);

impl From<SearchRequest> for SearchParams {
    fn from(value: SearchRequest) -> Self {
        SearchParams(value)
    }
}

impl From<&str> for SearchParams {
    fn from(raw_query: &str) -> Self {
        SearchParams(SearchRequest::from_query_string(raw_query))
    }
}

// Display must stay parseable by From<&str>
impl Display for SearchParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_query_string())
    }
}
