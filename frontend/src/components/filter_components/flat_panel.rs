use common::facet_panel::{PanelRow, RowAffordance};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_toggle_icons::{MdRadioButtonChecked, MdRadioButtonUnchecked}};

use crate::components::filter_components::filter_form::FilterFormContext;

#[component]
pub fn FlatPanel(facet_key: ReadSignal<String>, rows: ReadSignal<Vec<PanelRow>>) -> Element {
    rsx! {
        ul {
            class: "ff-option-list",
            ClearRow { facet_key }
            for row in rows.read().iter().cloned() {
                if let RowAffordance::Select { selected } = row.affordance {
                    SelectRow { key: "{row.name}", facet_key, value: row.name.clone(), selected }
                }
            }
        }
    }
}

/// One value of a single-select facet. Picking it commits the selection.
#[component]
pub fn SelectRow(facet_key: ReadSignal<String>, value: ReadSignal<String>, selected: bool) -> Element {
    let ctx = use_context::<FilterFormContext>();
    let mut selection = ctx.selection;

    rsx! {
        li {
            class: if selected { "ff-option ff-option-selected" } else { "ff-option" },
            onclick: move |_| {
                let change = selection.write().select(&ctx.catalog.read(), &facet_key.read(), &value.read());
                ctx.apply(change);
            },
            if selected {
                Icon { icon: MdRadioButtonChecked, style: "width: 18px; height: 18px; flex-shrink: 0;" }
            } else {
                Icon { icon: MdRadioButtonUnchecked, style: "width: 18px; height: 18px; flex-shrink: 0;" }
            }
            span { "{value}" }
        }
    }
}

/// Drops the facet's value without leaving the panel.
#[component]
pub fn ClearRow(facet_key: ReadSignal<String>) -> Element {
    let ctx = use_context::<FilterFormContext>();
    let mut selection = ctx.selection;
    let has_value = use_memo(move || selection.read().has_value(&facet_key.read()));

    rsx! {
        if has_value() {
            li {
                class: "ff-option ff-option-clear",
                onclick: move |_| {
                    selection.write().clear(&facet_key.read());
                },
                "Effacer la sélection"
            }
        }
    }
}
