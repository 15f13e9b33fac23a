//! The two places the host search hands us its query: the search engine's
//! argument object and the listing archive's main query.

use std::collections::BTreeMap;

use common::{query_conditions::QueryConditionSet, search_request::SearchRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::search::search_conditions::build_search_plan;

pub const LISTING_POST_TYPE: &str = "property";
pub const SEARCH_PAGE_TEMPLATE: &str = "template-search.php";

/// Arguments the host search engine builds before running its query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HostSearchArgs {
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_query: Option<QueryConditionSet>,
    /// Host arguments we do not touch.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// The main listing query of an archive or search template page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArchiveQuery {
    pub is_admin: bool,
    pub is_main_query: bool,
    pub post_type_archive: Option<String>,
    pub page_template: Option<String>,
    pub search_term: Option<String>,
    pub meta_query: Option<QueryConditionSet>,
}

impl ArchiveQuery {
    fn lists_properties(&self) -> bool {
        self.post_type_archive.as_deref() == Some(LISTING_POST_TYPE)
            || self.page_template.as_deref() == Some(SEARCH_PAGE_TEMPLATE)
    }
}

pub fn extend_search_args(mut args: HostSearchArgs, request: &SearchRequest) -> HostSearchArgs {
    let existing = args.meta_query.take().map(|set| set.entries).unwrap_or_default();
    let plan = build_search_plan(existing, request);
    debug!("search args plan: {:?}", plan);
    if let Some(term) = plan.search_term {
        args.search_term = Some(term);
    }
    args.meta_query = plan.conditions;
    args
}

/// Returns whether the query was one of ours to amend.
pub fn modify_archive_query(query: &mut ArchiveQuery, request: &SearchRequest) -> bool {
    if query.is_admin || !query.is_main_query || !query.lists_properties() {
        return false;
    }
    let existing = query.meta_query.take().map(|set| set.entries).unwrap_or_default();
    let plan = build_search_plan(existing, request);
    debug!("archive query plan: {:?}", plan);
    if let Some(term) = plan.search_term {
        query.search_term = Some(term);
    }
    query.meta_query = plan.conditions;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::query_conditions::{Condition, Relation};
    use pretty_assertions::assert_eq;

    fn archive() -> ArchiveQuery {
        ArchiveQuery {
            is_main_query: true,
            post_type_archive: Some(LISTING_POST_TYPE.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn both_integration_points_agree() {
        let request = SearchRequest::from_query_string("reference=0001&type_lieu=Studio&pieces=Cour&pieces=Serre");
        let args = extend_search_args(HostSearchArgs::default(), &request);
        let mut query = archive();
        assert!(modify_archive_query(&mut query, &request));
        assert_eq!(args.search_term, query.search_term);
        assert_eq!(args.meta_query, query.meta_query);
        assert_eq!(args.search_term.as_deref(), Some("0001"));
    }

    #[test]
    fn host_arguments_are_preserved() {
        let mut extra = BTreeMap::new();
        extra.insert("post_type".to_string(), serde_json::json!("property"));
        extra.insert("posts_per_page".to_string(), serde_json::json!(12));
        let args = HostSearchArgs {
            search_term: Some("villa".to_string()),
            meta_query: Some(QueryConditionSet::from_entries(vec![Condition::equals("featured", "1").into()])),
            extra: extra.clone(),
        };
        let args = extend_search_args(args, &SearchRequest::from_query_string("architecture=Moderne"));
        assert_eq!(args.extra, extra);
        assert_eq!(args.search_term.as_deref(), Some("villa"));
        let meta = args.meta_query.unwrap();
        assert_eq!(meta.relation, Some(Relation::And));
        assert_eq!(meta.entries[0], Condition::equals("featured", "1").into());
    }

    #[test]
    fn args_serialize_in_host_shape() {
        let args = extend_search_args(HostSearchArgs::default(), &SearchRequest::from_query_string("reference=0001"));
        assert_eq!(serde_json::to_value(&args).unwrap(), serde_json::json!({"s": "0001"}));
    }

    #[test]
    fn unrelated_queries_are_left_alone() {
        let request = SearchRequest::from_query_string("architecture=Moderne");
        for mut query in [
            ArchiveQuery { is_admin: true, ..archive() },
            ArchiveQuery { is_main_query: false, ..archive() },
            ArchiveQuery { post_type_archive: Some("post".to_string()), ..archive() },
        ] {
            let before = query.clone();
            assert!(!modify_archive_query(&mut query, &request));
            assert_eq!(query, before);
        }
    }

    #[test]
    fn search_template_pages_are_amended() {
        let mut query = ArchiveQuery {
            is_main_query: true,
            page_template: Some(SEARCH_PAGE_TEMPLATE.to_string()),
            ..Default::default()
        };
        assert!(modify_archive_query(&mut query, &SearchRequest::from_query_string("location=Nice")));
        assert_eq!(query.meta_query.unwrap().entries, vec![Condition::contains("property_address", "Nice").into()]);
    }
}
