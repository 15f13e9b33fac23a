//! Render-ready views of the facet panels.

use serde::{Deserialize, Serialize};

use crate::facet_catalog::{FacetDefinition, FacetLayout, FacetNode, find_node_by_value};
use crate::facet_selection::{LevelKey, SelectionState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowAffordance {
    /// Navigates one level deeper.
    DrillDown,
    /// Commits the value as the facet's sole selection.
    Select { selected: bool },
    /// Adds or removes the value from a multi-select facet.
    Check { checked: bool, has_children: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRow {
    pub name: String,
    pub affordance: RowAffordance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelView {
    pub key: LevelKey,
    pub rows: Vec<PanelRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionView {
    pub name: String,
    pub image: Option<String>,
    pub expanded: bool,
    pub rows: Vec<PanelRow>,
    /// Open submenu of one of this section's rows, shown under that row.
    pub submenu: Option<SubmenuView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmenuView {
    pub parent: String,
    pub rows: Vec<PanelRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelView {
    /// Every materialized level; only `levels[active]` is visible.
    Levels { levels: Vec<LevelView>, active: usize },
    List { rows: Vec<PanelRow> },
    Sections { sections: Vec<SectionView> },
}

pub fn render_panel(facet: &FacetDefinition, state: &SelectionState) -> PanelView {
    match &facet.layout {
        FacetLayout::HierarchicalSingle { roots } => {
            let selected = state.single_value(&facet.key);
            let (keys, active) = match state.levels(&facet.key) {
                Some(stack) => (stack.levels().to_vec(), stack.active_index()),
                None => (vec![LevelKey::root()], 0),
            };
            let levels = keys
                .into_iter()
                .map(|key| {
                    let nodes = level_nodes(roots, &key);
                    LevelView { rows: nodes.iter().map(|node| tree_row(node, selected)).collect(), key }
                })
                .collect();
            PanelView::Levels { levels, active }
        }
        FacetLayout::FlatSingle { items } => {
            let selected = state.single_value(&facet.key);
            PanelView::List { rows: items.iter().map(|node| select_row(node, selected)).collect() }
        }
        FacetLayout::FlatMultiSectioned { sections } => {
            let mut submenu = state
                .submenu()
                .filter(|submenu| submenu.facet == facet.key)
                .and_then(|submenu| facet.find_node(&submenu.parent))
                .filter(|parent| parent.is_drill_down())
                .map(|parent| SubmenuView {
                    parent: parent.name.clone(),
                    rows: parent
                        .children
                        .iter()
                        .map(|child| PanelRow {
                            name: child.name.clone(),
                            affordance: RowAffordance::Check {
                                checked: state.multi_values(&facet.key).contains(&child.name),
                                has_children: false,
                            },
                        })
                        .collect(),
                });
            let sections = sections
                .iter()
                .map(|section| SectionView {
                    name: section.name.clone(),
                    image: section.image.clone(),
                    expanded: state.is_section_expanded(&facet.key, &section.name),
                    rows: section.items.iter().map(|node| check_row(&facet.key, node, state)).collect(),
                    submenu: submenu.take_if(|submenu| section.items.iter().any(|item| item.name == submenu.parent)),
                })
                .collect();
            PanelView::Sections { sections }
        }
    }
}

/// Nodes listed by a level: the roots for level 1, else the parent's children.
fn level_nodes<'a>(roots: &'a [FacetNode], key: &LevelKey) -> &'a [FacetNode] {
    match &key.parent {
        None => roots,
        Some(parent) => find_node_by_value(roots, parent).map(|node| node.children.as_slice()).unwrap_or(&[]),
    }
}

fn tree_row(node: &FacetNode, selected: Option<&str>) -> PanelRow {
    if node.is_drill_down() {
        PanelRow { name: node.name.clone(), affordance: RowAffordance::DrillDown }
    } else {
        select_row(node, selected)
    }
}

fn select_row(node: &FacetNode, selected: Option<&str>) -> PanelRow {
    PanelRow {
        name: node.name.clone(),
        affordance: RowAffordance::Select { selected: selected == Some(node.name.as_str()) },
    }
}

fn check_row(key: &str, node: &FacetNode, state: &SelectionState) -> PanelRow {
    PanelRow {
        name: node.name.clone(),
        affordance: RowAffordance::Check { checked: state.is_checked(key, &node.name), has_children: node.is_drill_down() },
    }
}
