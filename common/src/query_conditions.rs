//! Structured meta-field conditions handed to the host search engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = "=")]
    Equals,
    /// Substring match.
    #[serde(rename = "LIKE")]
    Contains,
}

impl Comparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Equals => "=",
            Comparator::Contains => "LIKE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Relation {
    And,
    Or,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::And => "AND",
            Relation::Or => "OR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub key: String,
    pub value: String,
    pub compare: Comparator,
}

impl Condition {
    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into(), compare: Comparator::Equals }
    }

    pub fn contains(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into(), compare: Comparator::Contains }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub relation: Relation,
    pub entries: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionEntry {
    Condition(Condition),
    Group(ConditionGroup),
}

impl From<Condition> for ConditionEntry {
    fn from(condition: Condition) -> Self {
        ConditionEntry::Condition(condition)
    }
}

impl From<ConditionGroup> for ConditionEntry {
    fn from(group: ConditionGroup) -> Self {
        ConditionEntry::Group(group)
    }
}

/// Top-level entries are always AND-combined; the relation is only spelled
/// out once there are at least two of them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryConditionSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
    pub entries: Vec<ConditionEntry>,
}

impl QueryConditionSet {
    pub fn from_entries(entries: Vec<ConditionEntry>) -> Self {
        let relation = if entries.len() > 1 { Some(Relation::And) } else { None };
        Self { relation, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What a request contributes to the host query: an optional free-text term
/// plus the meta conditions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchPlan {
    pub search_term: Option<String>,
    pub conditions: Option<QueryConditionSet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_is_only_set_for_two_or_more_entries() {
        assert_eq!(QueryConditionSet::from_entries(vec![]).relation, None);
        assert!(QueryConditionSet::from_entries(vec![]).is_empty());
        let one = QueryConditionSet::from_entries(vec![Condition::equals("a", "1").into()]);
        assert_eq!(one.relation, None);
        let two = QueryConditionSet::from_entries(vec![Condition::equals("a", "1").into(), Condition::equals("b", "2").into()]);
        assert_eq!(two.relation, Some(Relation::And));
    }

    #[test]
    fn serializes_in_meta_query_shape() {
        let set = QueryConditionSet::from_entries(vec![
            Condition::contains("property_address", "Lyon").into(),
            ConditionGroup {
                relation: Relation::Or,
                entries: vec![Condition::equals("pieces", "Serre"), Condition::equals("pieces", "Cour")],
            }
            .into(),
        ]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "relation": "AND",
                "entries": [
                    {"key": "property_address", "value": "Lyon", "compare": "LIKE"},
                    {"relation": "OR", "entries": [
                        {"key": "pieces", "value": "Serre", "compare": "="},
                        {"key": "pieces", "value": "Cour", "compare": "="}
                    ]}
                ]
            })
        );
        let back: QueryConditionSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }
}
