//! Condition builder for search requests.

use common::{
    facet_catalog::{ARCHITECTURE, DECORATION, PIECES, TYPE_LIEU},
    query_conditions::{Condition, ConditionEntry, ConditionGroup, QueryConditionSet, Relation, SearchPlan},
    sanitize::sanitize_non_empty,
    search_request::{SearchRequest, TYPE_PROJET},
};

pub const ADDRESS_META_KEY: &str = "property_address";

/// Appends the request's conditions to the ones the host already had.
///
/// Pure: absent or empty fields are skipped and nothing here can fail.
/// `pieces` stays a plain equality for a single value and only becomes an
/// OR group from two values on.
pub fn build_search_plan(existing: Vec<ConditionEntry>, request: &SearchRequest) -> SearchPlan {
    let mut terms = existing;

    if let Some(project_type) = &request.project_type {
        push_equals(&mut terms, TYPE_PROJET, project_type.token());
    }

    let search_term = request.reference.as_deref().and_then(sanitize_non_empty);

    if let Some(location) = request.location.as_deref().and_then(sanitize_non_empty) {
        terms.push(Condition::contains(ADDRESS_META_KEY, location).into());
    }

    let singles = [
        (TYPE_LIEU, &request.type_lieu),
        (ARCHITECTURE, &request.architecture),
        (DECORATION, &request.decoration),
    ];
    for (key, value) in singles {
        if let Some(value) = value {
            push_equals(&mut terms, key, value);
        }
    }

    let mut pieces = request
        .pieces
        .iter()
        .filter_map(|piece| sanitize_non_empty(piece))
        .map(|piece| Condition::equals(PIECES, piece))
        .collect::<Vec<_>>();
    match pieces.len() {
        0 => {}
        1 => terms.extend(pieces.pop().map(ConditionEntry::from)),
        _ => terms.push(ConditionGroup { relation: Relation::Or, entries: pieces }.into()),
    }

    let conditions = Some(QueryConditionSet::from_entries(terms)).filter(|set| !set.is_empty());
    SearchPlan { search_term, conditions }
}

fn push_equals(terms: &mut Vec<ConditionEntry>, key: &str, raw: &str) {
    if let Some(value) = sanitize_non_empty(raw) {
        terms.push(Condition::equals(key, value).into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::search_request::ProjectType;
    use pretty_assertions::assert_eq;

    fn plan(query: &str) -> SearchPlan {
        build_search_plan(vec![], &SearchRequest::from_query_string(query))
    }

    #[test]
    fn empty_request_yields_nothing() {
        assert_eq!(plan(""), SearchPlan::default());
    }

    #[test]
    fn no_pieces_no_condition() {
        let request = SearchRequest { pieces: vec![], ..Default::default() };
        assert_eq!(build_search_plan(vec![], &request).conditions, None);
    }

    #[test]
    fn single_piece_is_a_plain_top_level_equality() {
        let conditions = plan("pieces=Terrasse").conditions.unwrap();
        assert_eq!(conditions.relation, None);
        assert_eq!(conditions.entries, vec![Condition::equals("pieces", "Terrasse").into()]);
    }

    #[test]
    fn two_pieces_form_one_or_group() {
        let conditions = plan("pieces[]=Terrasse&pieces[]=Jardin").conditions.unwrap();
        assert_eq!(conditions.relation, None);
        assert_eq!(
            conditions.entries,
            vec![ConditionEntry::Group(ConditionGroup {
                relation: Relation::Or,
                entries: vec![Condition::equals("pieces", "Terrasse"), Condition::equals("pieces", "Jardin")],
            })]
        );
    }

    #[test]
    fn or_group_is_one_and_member() {
        let conditions = plan("architecture=Moderne&pieces=Terrasse&pieces=Jardin").conditions.unwrap();
        assert_eq!(conditions.relation, Some(Relation::And));
        assert_eq!(conditions.entries.len(), 2);
        assert!(matches!(conditions.entries[1], ConditionEntry::Group(_)));
    }

    #[test]
    fn two_facets_are_and_combined() {
        let conditions = plan("type_lieu=Appartement+moderne&architecture=Moderne").conditions.unwrap();
        assert_eq!(
            conditions,
            QueryConditionSet {
                relation: Some(Relation::And),
                entries: vec![
                    Condition::equals("type_lieu", "Appartement moderne").into(),
                    Condition::equals("architecture", "Moderne").into(),
                ],
            }
        );
    }

    #[test]
    fn reference_sets_the_term_alongside_conditions() {
        let plan = plan("reference=0001&decoration=Design");
        assert_eq!(plan.search_term.as_deref(), Some("0001"));
        assert_eq!(plan.conditions.unwrap().entries, vec![Condition::equals("decoration", "Design").into()]);
    }

    #[test]
    fn location_is_a_substring_match_on_the_address() {
        let conditions = plan("location=Lyon").conditions.unwrap();
        assert_eq!(conditions.entries, vec![Condition::contains("property_address", "Lyon").into()]);
    }

    #[test]
    fn unknown_values_pass_through() {
        let request = SearchRequest {
            project_type: Some(ProjectType::Unlisted("castle".to_string())),
            type_lieu: Some("Igloo".to_string()),
            ..Default::default()
        };
        let conditions = build_search_plan(vec![], &request).conditions.unwrap();
        assert_eq!(
            conditions.entries,
            vec![Condition::equals("type_projet", "castle").into(), Condition::equals("type_lieu", "Igloo").into()]
        );
    }

    #[test]
    fn unsanitized_values_are_cleaned_before_use() {
        let request = SearchRequest {
            type_lieu: Some("Loft<script>alert(1)</script>".to_string()),
            architecture: Some("<b></b>".to_string()),
            pieces: vec!["<i>Serre</i>".to_string(), "  ".to_string()],
            ..Default::default()
        };
        let conditions = build_search_plan(vec![], &request).conditions.unwrap();
        assert_eq!(
            conditions.entries,
            vec![Condition::equals("type_lieu", "Loft").into(), Condition::equals("pieces", "Serre").into()]
        );
    }

    #[test]
    fn existing_host_conditions_count_toward_the_and() {
        let existing = vec![Condition::equals("property_status", "for-rent").into()];
        let conditions = build_search_plan(existing, &SearchRequest::from_query_string("decoration=Design"))
            .conditions
            .unwrap();
        assert_eq!(conditions.relation, Some(Relation::And));
        assert_eq!(conditions.entries.len(), 2);
    }

    #[test]
    fn order_follows_the_request_fields() {
        let conditions = plan("pieces=Cour&decoration=Design&location=Nice&type_projet=other&type_lieu=Villa&architecture=Moderne")
            .conditions
            .unwrap();
        let keys: Vec<&str> = conditions
            .entries
            .iter()
            .map(|entry| match entry {
                ConditionEntry::Condition(condition) => condition.key.as_str(),
                ConditionEntry::Group(_) => "group",
            })
            .collect();
        assert_eq!(keys, vec!["type_projet", "property_address", "type_lieu", "architecture", "decoration", "pieces"]);
    }
}
