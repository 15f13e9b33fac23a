//! Drill-down panel: one list per materialized level, only the active one
//! shown.

use common::facet_panel::{LevelView, RowAffordance};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdArrowBack, MdChevronRight}};

use crate::components::filter_components::{
    filter_form::FilterFormContext,
    flat_panel::{ClearRow, SelectRow},
};

#[component]
pub fn HierarchicalPanel(facet_key: ReadSignal<String>, levels: ReadSignal<Vec<LevelView>>, active: usize) -> Element {
    let ctx = use_context::<FilterFormContext>();
    let mut selection = ctx.selection;
    let catalog = ctx.catalog;

    rsx! {
        div {
            class: "ff-levels",
            if active > 0 {
                button {
                    r#type: "button",
                    class: "ff-level-back",
                    onclick: move |_| {
                        selection.write().navigate_up(&catalog.read(), &facet_key.read());
                    },
                    Icon { icon: MdArrowBack, style: "width: 18px; height: 18px;" }
                    "Retour"
                }
            }
            for (index, level) in levels.read().iter().cloned().enumerate() {
                ul {
                    key: "{level.key.depth}-{level.key.parent:?}",
                    class: "ff-option-list ff-level",
                    "data-depth": "{level.key.depth}",
                    hidden: index != active,
                    if index == 0 {
                        ClearRow { facet_key }
                    }
                    for row in level.rows {
                        {match row.affordance {
                            RowAffordance::DrillDown => rsx! {
                                DrillDownRow { key: "{row.name}", facet_key, parent: row.name.clone() }
                            },
                            RowAffordance::Select { selected } => rsx! {
                                SelectRow { key: "{row.name}", facet_key, value: row.name.clone(), selected }
                            },
                            RowAffordance::Check { .. } => rsx! {},
                        }}
                    }
                }
            }
        }
    }
}

#[component]
fn DrillDownRow(facet_key: ReadSignal<String>, parent: ReadSignal<String>) -> Element {
    let ctx = use_context::<FilterFormContext>();
    let mut selection = ctx.selection;
    let catalog = ctx.catalog;

    rsx! {
        li {
            class: "ff-option ff-option-branch",
            onclick: move |_| {
                selection.write().navigate(&catalog.read(), &facet_key.read(), &parent.read());
            },
            span { "{parent}" }
            Icon { icon: MdChevronRight, style: "width: 18px; height: 18px; margin-left: auto;" }
        }
    }
}
