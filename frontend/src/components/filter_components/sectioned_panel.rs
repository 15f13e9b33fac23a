//! Multi-select panel grouped in collapsible sections, with a submenu for
//! items that carry their own sub-values.

use common::facet_panel::{PanelRow, RowAffordance, SectionView, SubmenuView};
use dioxus::prelude::*;
use dioxus_free_icons::{
    Icon,
    icons::{
        md_navigation_icons::{MdClose, MdExpandLess, MdExpandMore},
        md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank},
    },
};

use crate::components::filter_components::{filter_form::FilterFormContext, flat_panel::ClearRow};

#[component]
pub fn SectionedPanel(facet_key: ReadSignal<String>, sections: ReadSignal<Vec<SectionView>>) -> Element {
    rsx! {
        div {
            class: "ff-sections",
            ul { class: "ff-option-list", ClearRow { facet_key } }
            for section in sections.read().iter().cloned() {
                Section { key: "{section.name}", facet_key, section }
            }
        }
    }
}

#[component]
fn Section(facet_key: ReadSignal<String>, section: ReadSignal<SectionView>) -> Element {
    let ctx = use_context::<FilterFormContext>();
    let mut selection = ctx.selection;
    let SectionView { name, image, expanded, rows, submenu } = section.read().clone();
    let section_name = name.clone();

    rsx! {
        div {
            class: "ff-section",
            button {
                r#type: "button",
                class: "ff-section-header",
                onclick: move |_| {
                    selection.write().toggle_section(&facet_key.read(), &section_name);
                },
                if let Some(image) = image {
                    img { class: "ff-section-image", src: "{image}", alt: "{name}" }
                }
                span { "{name}" }
                if expanded {
                    Icon { icon: MdExpandLess, style: "width: 20px; height: 20px; margin-left: auto;" }
                } else {
                    Icon { icon: MdExpandMore, style: "width: 20px; height: 20px; margin-left: auto;" }
                }
            }
            if expanded {
                ul {
                    class: "ff-option-list",
                    for row in rows {
                        CheckRow { key: "{row.name}", facet_key, row: row.clone(), in_submenu: false }
                        if let Some(submenu) = submenu.clone().filter(|submenu| submenu.parent == row.name) {
                            li {
                                class: "ff-submenu-anchor",
                                Submenu { facet_key, submenu }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Submenu(facet_key: ReadSignal<String>, submenu: ReadSignal<SubmenuView>) -> Element {
    let ctx = use_context::<FilterFormContext>();
    let mut selection = ctx.selection;
    let SubmenuView { parent, rows } = submenu.read().clone();

    rsx! {
        div {
            class: "ff-submenu",
            div {
                class: "ff-submenu-header",
                span { "{parent}" }
                button {
                    r#type: "button",
                    class: "ff-submenu-close",
                    onclick: move |_| {
                        selection.write().close_submenu();
                    },
                    Icon { icon: MdClose, style: "width: 18px; height: 18px;" }
                }
            }
            ul {
                class: "ff-option-list",
                for row in rows {
                    CheckRow { key: "{row.name}", facet_key, row, in_submenu: true }
                }
            }
        }
    }
}

#[component]
fn CheckRow(facet_key: ReadSignal<String>, row: ReadSignal<PanelRow>, in_submenu: bool) -> Element {
    let ctx = use_context::<FilterFormContext>();
    let mut selection = ctx.selection;
    let catalog = ctx.catalog;
    let (checked, has_children) = match row.read().affordance {
        RowAffordance::Check { checked, has_children } => (checked, has_children),
        _ => (false, false),
    };

    rsx! {
        li {
            class: if has_children { "ff-option ff-option-branch" } else { "ff-option" },
            onclick: move |_| {
                let name = row.read().name.clone();
                let change = if in_submenu {
                    selection.write().check_submenu_entry(&facet_key.read(), &name, !checked)
                } else {
                    selection.write().check_item(&catalog.read(), &facet_key.read(), &name, !checked)
                };
                ctx.apply(change);
            },
            if checked {
                Icon { icon: MdCheckBox, style: "width: 20px; height: 20px; flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 20px; height: 20px; flex-shrink: 0;" }
            }
            span { "{row.read().name}" }
        }
    }
}
