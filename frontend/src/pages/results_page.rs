//! Results page: the filter form again, pre-filled, above the conditions
//! the host search receives for this query.

use common::query_conditions::{ConditionEntry, SearchPlan};
use dioxus::prelude::*;

use crate::{
    api::filter_api::get_search_plan,
    components::{
        error_boundary::ComponentErrorDisplay, filter_components::filter_form::FilterForm,
        suspend_boundary::SuspendWrapper,
    },
    data_definitions::search_params::SearchParams,
};

#[component]
pub fn ResultsPage(query: SearchParams) -> Element {
    let query_string = query.to_string();
    rsx! {
        Title { "Recherche de biens : résultats" }
        div {
            id: "x-results-container",
            class: "ff-results",
            FilterForm {}
            SuspendWrapper {
                SearchPlanView { query_string }
            }
        }
    }
}

#[component]
fn SearchPlanView(query_string: ReadSignal<String>) -> Element {
    let plan = use_resource(move || {
        let q = query_string.read().clone();
        get_search_plan(q)
    })
    .suspend()?
    .cloned();
    let SearchPlan { search_term, conditions } = match plan {
        Err(e) => return rsx! { ComponentErrorDisplay { error_txt: format!("{:#?}", e) } },
        Ok(plan) => plan,
    };

    rsx! {
        section {
            class: "ff-plan",
            h2 { "Critères appliqués" }
            if let Some(term) = search_term {
                p { class: "ff-plan-term", "Référence : {term}" }
            }
            {match conditions {
                None => rsx! { p { class: "ff-plan-empty", "Aucun filtre : tous les biens sont listés." } },
                Some(conditions) => rsx! {
                    ul {
                        class: "ff-plan-conditions",
                        for (index, entry) in conditions.entries.into_iter().enumerate() {
                            li { key: "{index}", ConditionLine { entry } }
                        }
                    }
                },
            }}
        }
    }
}

#[component]
fn ConditionLine(entry: ReadSignal<ConditionEntry>) -> Element {
    match entry.read().clone() {
        ConditionEntry::Condition(condition) => rsx! {
            code { "{condition.key} {condition.compare.as_str()} {condition.value}" }
        },
        ConditionEntry::Group(group) => rsx! {
            span { "{group.relation.as_str()} :" }
            ul {
                for (index, condition) in group.entries.into_iter().enumerate() {
                    li {
                        key: "{index}",
                        code { "{condition.key} {condition.compare.as_str()} {condition.value}" }
                    }
                }
            }
        },
    }
}
