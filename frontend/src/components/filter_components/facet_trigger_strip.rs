use common::{facet_catalog::FacetDefinition, facet_panel::{PanelView, render_panel}};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdArrowDropDown, MdArrowDropUp}};

use crate::components::filter_components::{
    filter_form::FilterFormContext, flat_panel::FlatPanel, hierarchical_panel::HierarchicalPanel,
    sectioned_panel::SectionedPanel,
};

#[component]
pub fn FacetTriggerStrip(filters_per_row: u32, panel_max_height: u32) -> Element {
    let ctx = use_context::<FilterFormContext>();
    let mut selection = ctx.selection;
    let catalog = ctx.catalog;
    let any_open = use_memo(move || selection.read().open_facet().is_some());

    rsx! {
        if any_open() {
            // click-away backdrop
            div {
                class: "ff-backdrop",
                onclick: move |_| {
                    selection.write().close_all_panels();
                },
            }
        }
        div {
            class: "ff-trigger-grid",
            style: "grid-template-columns: repeat({filters_per_row}, minmax(0, 1fr));",
            for facet in catalog.read().facets.iter().cloned() {
                FacetTrigger {
                    key: "{facet.key}",
                    facet,
                    panel_max_height,
                }
            }
        }
    }
}

#[component]
fn FacetTrigger(facet: ReadSignal<FacetDefinition>, panel_max_height: u32) -> Element {
    let ctx = use_context::<FilterFormContext>();
    let mut selection = ctx.selection;

    let is_open = use_memo(move || selection.read().is_open(&facet.read().key));
    let display_value = use_memo(move || selection.read().display_value(&facet.read().key));
    let has_value = use_memo(move || selection.read().has_value(&facet.read().key));
    let trigger_class = use_memo(move || match (is_open(), has_value()) {
        (true, _) => "ff-trigger ff-trigger-open",
        (false, true) => "ff-trigger ff-trigger-filtered",
        (false, false) => "ff-trigger",
    });

    rsx! {
        div {
            class: "ff-trigger-cell",
            button {
                r#type: "button",
                class: "{trigger_class}",
                onclick: move |_| {
                    selection.write().toggle_panel(&facet.read().key);
                },
                span { class: "ff-trigger-label", "{facet.read().label}" }
                span {
                    class: "ff-trigger-value",
                    if display_value().is_empty() { "Tous" } else { "{display_value}" }
                }
                if is_open() {
                    Icon { icon: MdArrowDropUp, style: "width: 20px; height: 20px;" }
                } else {
                    Icon { icon: MdArrowDropDown, style: "width: 20px; height: 20px;" }
                }
            }
            if is_open() {
                div {
                    class: "ff-panel",
                    style: "max-height: {panel_max_height}px;",
                    FacetPanel { facet }
                }
            }
        }
    }
}

#[component]
fn FacetPanel(facet: ReadSignal<FacetDefinition>) -> Element {
    let ctx = use_context::<FilterFormContext>();
    let selection = ctx.selection;
    let view = use_memo(move || render_panel(&facet.read(), &selection.read()));
    let facet_key = facet.read().key.clone();

    match view() {
        PanelView::Levels { levels, active } => rsx! {
            HierarchicalPanel { facet_key, levels, active }
        },
        PanelView::List { rows } => rsx! {
            FlatPanel { facet_key, rows }
        },
        PanelView::Sections { sections } => rsx! {
            SectionedPanel { facet_key, sections }
        },
    }
}
