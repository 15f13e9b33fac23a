//! Selection and visibility state of the facet panels for one page view.
//!
//! All transitions are plain methods on [`SelectionState`]; the UI layer only
//! forwards clicks and renders what the state reports.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::facet_catalog::{FacetCatalog, FacetMode, FacetNode, find_path};
use crate::search_request::SearchRequest;

/// What the form should do after a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterChange {
    Stay,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Created,
    Reused,
    Ignored,
}

/// One materialized level of a hierarchical panel. Level 1 has no parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelKey {
    pub depth: usize,
    pub parent: Option<String>,
}

impl LevelKey {
    pub fn root() -> Self {
        Self { depth: 1, parent: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelStack {
    materialized: Vec<LevelKey>,
    active: usize,
}

impl Default for LevelStack {
    fn default() -> Self {
        Self { materialized: vec![LevelKey::root()], active: 0 }
    }
}

impl LevelStack {
    pub fn levels(&self) -> &[LevelKey] {
        &self.materialized
    }

    pub fn active(&self) -> &LevelKey {
        &self.materialized[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    fn show(&mut self, key: LevelKey) -> Navigation {
        match self.materialized.iter().position(|level| *level == key) {
            Some(index) => {
                self.active = index;
                Navigation::Reused
            }
            None => {
                self.materialized.push(key);
                self.active = self.materialized.len() - 1;
                Navigation::Created
            }
        }
    }

    fn reset(&mut self) {
        self.active = 0;
    }
}

/// Submenu of sub-values opened from a checked sectioned item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submenu {
    pub facet: String,
    pub parent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    modes: BTreeMap<String, FacetMode>,
    single: BTreeMap<String, String>,
    multi: BTreeMap<String, Vec<String>>,
    open_facet: Option<String>,
    levels: BTreeMap<String, LevelStack>,
    expanded_sections: BTreeMap<String, BTreeSet<String>>,
    checked_parents: BTreeMap<String, BTreeSet<String>>,
    submenu: Option<Submenu>,
    auto_submit: bool,
}

impl SelectionState {
    pub fn new(catalog: &FacetCatalog, auto_submit: bool) -> Self {
        let modes = catalog.facets.iter().map(|facet| (facet.key.clone(), facet.mode())).collect();
        Self {
            modes,
            single: BTreeMap::new(),
            multi: BTreeMap::new(),
            open_facet: None,
            levels: BTreeMap::new(),
            expanded_sections: BTreeMap::new(),
            checked_parents: BTreeMap::new(),
            submenu: None,
            auto_submit,
        }
    }

    /// Seeds the selection from the facet values of an incoming request.
    pub fn from_request(catalog: &FacetCatalog, request: &SearchRequest, auto_submit: bool) -> Self {
        let mut state = Self::new(catalog, auto_submit);
        for facet in &catalog.facets {
            if facet.mode().is_single_select() {
                if let Some(value) = request.facet_value(&facet.key) {
                    state.single.insert(facet.key.clone(), value.to_string());
                }
            } else {
                for value in request.facet_values(&facet.key) {
                    state.insert_multi(&facet.key, value);
                }
            }
        }
        state
    }

    /// Writes the facet values back over the free-text fields of `base`.
    pub fn to_request(&self, base: &SearchRequest) -> SearchRequest {
        let mut request = base.clone();
        for (key, mode) in &self.modes {
            if mode.is_single_select() {
                request.set_facet_value(key, self.single.get(key).cloned());
            } else {
                request.set_facet_values(key, self.multi_values(key).to_vec());
            }
        }
        request
    }

    pub fn mode(&self, key: &str) -> Option<FacetMode> {
        self.modes.get(key).copied()
    }

    /// Commits the sole value of a single-select facet and closes the panels.
    ///
    /// A value with children is a navigation step, never a selection.
    pub fn select(&mut self, catalog: &FacetCatalog, key: &str, value: &str) -> AfterChange {
        if !self.mode(key).is_some_and(|mode| mode.is_single_select()) {
            return AfterChange::Stay;
        }
        if catalog.facet(key).and_then(|facet| facet.find_node(value)).is_some_and(FacetNode::is_drill_down) {
            return AfterChange::Stay;
        }
        self.single.insert(key.to_string(), value.to_string());
        self.close_all_panels();
        if self.auto_submit { AfterChange::Submit } else { AfterChange::Stay }
    }

    pub fn clear(&mut self, key: &str) {
        self.single.remove(key);
        self.multi.remove(key);
        if let Some(parents) = self.checked_parents.get_mut(key) {
            parents.clear();
        }
    }

    /// Adds or removes one value of a multi-select facet.
    pub fn toggle(&mut self, key: &str, value: &str, is_now_selected: bool) -> AfterChange {
        if self.mode(key) != Some(FacetMode::FlatMultiSectioned) {
            return AfterChange::Stay;
        }
        if is_now_selected {
            self.insert_multi(key, value);
        } else if let Some(values) = self.multi.get_mut(key) {
            values.retain(|v| v != value);
            if values.is_empty() {
                self.multi.remove(key);
            }
        }
        if self.auto_submit && !self.multi_values(key).is_empty() {
            AfterChange::Submit
        } else {
            AfterChange::Stay
        }
    }

    /// Checkbox change on an item of a sectioned panel.
    ///
    /// Checking an item with children opens its submenu instead of selecting
    /// it. Unchecking such an item keeps the sub-values already picked.
    pub fn check_item(&mut self, catalog: &FacetCatalog, key: &str, item: &str, checked: bool) -> AfterChange {
        let Some(facet) = catalog.facet(key) else {
            return AfterChange::Stay;
        };
        match facet.find_node(item) {
            Some(node) if node.is_drill_down() => {
                let parents = self.checked_parents.entry(key.to_string()).or_default();
                if checked {
                    parents.insert(item.to_string());
                    self.submenu = Some(Submenu { facet: key.to_string(), parent: item.to_string() });
                } else {
                    parents.remove(item);
                }
                AfterChange::Stay
            }
            _ => self.toggle(key, item, checked),
        }
    }

    /// Checkbox change inside the open submenu. Selects the sub-value itself.
    pub fn check_submenu_entry(&mut self, key: &str, sub_value: &str, checked: bool) -> AfterChange {
        if self.submenu.as_ref().is_some_and(|submenu| submenu.facet == key) {
            self.toggle(key, sub_value, checked)
        } else {
            AfterChange::Stay
        }
    }

    pub fn close_submenu(&mut self) {
        self.submenu = None;
    }

    pub fn submenu(&self) -> Option<&Submenu> {
        self.submenu.as_ref()
    }

    /// Trigger click: closes the facet's panel if it is the open one,
    /// otherwise opens it in place of any other.
    pub fn toggle_panel(&mut self, key: &str) {
        if self.is_open(key) {
            self.close_all_panels();
        } else {
            self.open_panel(key);
        }
    }

    pub fn open_panel(&mut self, key: &str) {
        let Some(mode) = self.mode(key) else {
            return;
        };
        self.close_all_panels();
        self.open_facet = Some(key.to_string());
        if mode == FacetMode::HierarchicalSingle {
            self.levels.entry(key.to_string()).or_default().reset();
        }
    }

    pub fn close_all_panels(&mut self) {
        self.open_facet = None;
        self.submenu = None;
    }

    pub fn open_facet(&self) -> Option<&str> {
        self.open_facet.as_deref()
    }

    pub fn is_open(&self, key: &str) -> bool {
        self.open_facet.as_deref() == Some(key)
    }

    /// Drills into `parent` on a hierarchical facet.
    ///
    /// The level scoped to `parent` is built once per page view and reused on
    /// later visits, together with whatever was materialized below it.
    pub fn navigate(&mut self, catalog: &FacetCatalog, key: &str, parent: &str) -> Navigation {
        let Some(facet) = catalog.facet(key) else {
            return Navigation::Ignored;
        };
        if facet.mode() != FacetMode::HierarchicalSingle {
            return Navigation::Ignored;
        }
        let Some(path) = find_path(facet.top_level(), parent) else {
            return Navigation::Ignored;
        };
        if !path.last().is_some_and(|node| node.is_drill_down()) {
            return Navigation::Ignored;
        }
        let level = LevelKey { depth: path.len() + 1, parent: Some(parent.to_string()) };
        self.levels.entry(key.to_string()).or_default().show(level)
    }

    /// Goes back to the level that lists the parent of the active level.
    pub fn navigate_up(&mut self, catalog: &FacetCatalog, key: &str) -> Navigation {
        let Some(facet) = catalog.facet(key) else {
            return Navigation::Ignored;
        };
        let Some(stack) = self.levels.get_mut(key) else {
            return Navigation::Ignored;
        };
        let Some(parent) = stack.active().parent.clone() else {
            return Navigation::Ignored;
        };
        let target = match find_path(facet.top_level(), &parent) {
            Some(path) if path.len() > 1 => LevelKey {
                depth: path.len(),
                parent: Some(path[path.len() - 2].name.clone()),
            },
            _ => LevelKey::root(),
        };
        stack.show(target)
    }

    pub fn levels(&self, key: &str) -> Option<&LevelStack> {
        self.levels.get(key)
    }

    pub fn active_level(&self, key: &str) -> LevelKey {
        self.levels.get(key).map(|stack| stack.active().clone()).unwrap_or_else(LevelKey::root)
    }

    /// Expands or collapses the body of a section. Returns the new state.
    pub fn toggle_section(&mut self, key: &str, section: &str) -> bool {
        let expanded = self.expanded_sections.entry(key.to_string()).or_default();
        if expanded.remove(section) {
            false
        } else {
            expanded.insert(section.to_string());
            true
        }
    }

    pub fn is_section_expanded(&self, key: &str, section: &str) -> bool {
        self.expanded_sections.get(key).is_some_and(|sections| sections.contains(section))
    }

    pub fn single_value(&self, key: &str) -> Option<&str> {
        self.single.get(key).map(String::as_str)
    }

    pub fn multi_values(&self, key: &str) -> &[String] {
        self.multi.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a checkbox of a sectioned panel renders as checked.
    pub fn is_checked(&self, key: &str, value: &str) -> bool {
        self.multi_values(key).iter().any(|v| v == value)
            || self.checked_parents.get(key).is_some_and(|parents| parents.contains(value))
    }

    pub fn has_value(&self, key: &str) -> bool {
        self.single.contains_key(key) || !self.multi_values(key).is_empty()
    }

    /// Text shown on a facet trigger.
    pub fn display_value(&self, key: &str) -> String {
        if let Some(value) = self.single.get(key) {
            return value.clone();
        }
        match self.multi_values(key) {
            [] => String::new(),
            [only] => only.clone(),
            values => format!("{} items", values.len()),
        }
    }

    fn insert_multi(&mut self, key: &str, value: &str) {
        let values = self.multi.entry(key.to_string()).or_default();
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet_catalog::{ARCHITECTURE, DECORATION, PIECES, TYPE_LIEU};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn state() -> (FacetCatalog, SelectionState) {
        let catalog = FacetCatalog::builtin();
        let state = SelectionState::new(&catalog, false);
        (catalog, state)
    }

    #[test]
    fn selecting_a_leaf_replaces_and_closes() {
        let (catalog, mut state) = state();
        state.open_panel(TYPE_LIEU);
        assert_eq!(state.select(&catalog, TYPE_LIEU, "Studio"), AfterChange::Stay);
        assert_eq!(state.open_facet(), None);
        state.select(&catalog, TYPE_LIEU, "Loft");
        assert_eq!(state.single_value(TYPE_LIEU), Some("Loft"));
        assert_eq!(state.display_value(TYPE_LIEU), "Loft");
    }

    #[test]
    fn select_ignores_multi_select_facets() {
        let (catalog, mut state) = state();
        assert_eq!(state.select(&catalog, PIECES, "Jardin"), AfterChange::Stay);
        assert!(!state.has_value(PIECES));
        assert_eq!(state.select(&catalog, "unknown", "x"), AfterChange::Stay);
    }

    #[test]
    fn select_refuses_values_with_children() {
        let catalog = FacetCatalog::builtin();
        let mut state = SelectionState::new(&catalog, true);
        state.select(&catalog, TYPE_LIEU, "Loft");
        state.open_panel(TYPE_LIEU);
        assert_eq!(state.select(&catalog, TYPE_LIEU, "Habitations"), AfterChange::Stay);
        assert_eq!(state.single_value(TYPE_LIEU), Some("Loft"));
        assert!(state.is_open(TYPE_LIEU));
    }

    #[test]
    fn auto_submit_follows_commits() {
        let catalog = FacetCatalog::builtin();
        let mut state = SelectionState::new(&catalog, true);
        assert_eq!(state.select(&catalog, ARCHITECTURE, "Moderne"), AfterChange::Submit);
        assert_eq!(state.toggle(PIECES, "Jardin", true), AfterChange::Submit);
        assert_eq!(state.toggle(PIECES, "Jardin", false), AfterChange::Stay);
        assert_eq!(state.check_item(&catalog, PIECES, "Bureau", true), AfterChange::Stay);
    }

    #[test]
    fn only_one_panel_is_open() {
        let (_, mut state) = state();
        state.open_panel(TYPE_LIEU);
        state.open_panel(DECORATION);
        assert!(state.is_open(DECORATION));
        assert!(!state.is_open(TYPE_LIEU));
        state.toggle_panel(DECORATION);
        assert_eq!(state.open_facet(), None);
        state.open_panel("nope");
        assert_eq!(state.open_facet(), None);
    }

    #[test]
    fn toggling_another_trigger_switches_panels_at_once() {
        let (_, mut state) = state();
        state.toggle_panel(ARCHITECTURE);
        state.toggle_panel(PIECES);
        assert_eq!(state.open_facet(), Some(PIECES));
        assert!(!state.is_open(ARCHITECTURE));
    }

    #[test]
    fn navigate_reuses_materialized_levels() {
        let (catalog, mut state) = state();
        state.open_panel(TYPE_LIEU);
        assert_eq!(state.navigate(&catalog, TYPE_LIEU, "Habitations"), Navigation::Created);
        assert_eq!(state.navigate(&catalog, TYPE_LIEU, "Habitations"), Navigation::Reused);
        assert_eq!(state.levels(TYPE_LIEU).unwrap().levels().len(), 2);
        assert_eq!(
            state.active_level(TYPE_LIEU),
            LevelKey { depth: 2, parent: Some("Habitations".to_string()) }
        );
    }

    #[test]
    fn deeper_levels_survive_reopening() {
        let (catalog, mut state) = state();
        state.open_panel(TYPE_LIEU);
        state.navigate(&catalog, TYPE_LIEU, "Habitations");
        state.navigate(&catalog, TYPE_LIEU, "Appartement");
        assert_eq!(state.active_level(TYPE_LIEU).depth, 3);

        state.close_all_panels();
        state.open_panel(TYPE_LIEU);
        assert_eq!(state.active_level(TYPE_LIEU), LevelKey::root());

        assert_eq!(state.navigate(&catalog, TYPE_LIEU, "Habitations"), Navigation::Reused);
        assert_eq!(state.navigate(&catalog, TYPE_LIEU, "Appartement"), Navigation::Reused);
        assert_eq!(state.levels(TYPE_LIEU).unwrap().levels().len(), 3);
    }

    #[test]
    fn navigate_into_leaf_or_unknown_is_ignored() {
        let (catalog, mut state) = state();
        state.open_panel(TYPE_LIEU);
        assert_eq!(state.navigate(&catalog, TYPE_LIEU, "Studio"), Navigation::Ignored);
        assert_eq!(state.navigate(&catalog, TYPE_LIEU, "Igloo"), Navigation::Ignored);
        assert_eq!(state.navigate(&catalog, ARCHITECTURE, "Moderne"), Navigation::Ignored);
        assert_eq!(state.active_level(TYPE_LIEU), LevelKey::root());
    }

    #[test]
    fn navigate_up_returns_to_the_parent_level() {
        let (catalog, mut state) = state();
        state.open_panel(TYPE_LIEU);
        state.navigate(&catalog, TYPE_LIEU, "Habitations");
        state.navigate(&catalog, TYPE_LIEU, "Maison");
        assert_eq!(state.navigate_up(&catalog, TYPE_LIEU), Navigation::Reused);
        assert_eq!(state.active_level(TYPE_LIEU).parent.as_deref(), Some("Habitations"));
        assert_eq!(state.navigate_up(&catalog, TYPE_LIEU), Navigation::Reused);
        assert_eq!(state.active_level(TYPE_LIEU), LevelKey::root());
        assert_eq!(state.navigate_up(&catalog, TYPE_LIEU), Navigation::Ignored);
    }

    #[test]
    fn parent_items_open_a_submenu_and_keep_sub_values() {
        let (catalog, mut state) = state();
        state.open_panel(PIECES);
        state.check_item(&catalog, PIECES, "Bureau", true);
        assert_eq!(state.submenu(), Some(&Submenu { facet: PIECES.to_string(), parent: "Bureau".to_string() }));
        assert!(state.multi_values(PIECES).is_empty());

        state.check_submenu_entry(PIECES, "Open space", true);
        assert_eq!(state.multi_values(PIECES), ["Open space".to_string()]);

        state.check_item(&catalog, PIECES, "Bureau", false);
        assert!(!state.is_checked(PIECES, "Bureau"));
        assert_eq!(state.multi_values(PIECES), ["Open space".to_string()]);
    }

    #[test]
    fn submenu_entries_need_an_open_submenu() {
        let (_, mut state) = state();
        assert_eq!(state.check_submenu_entry(PIECES, "Open space", true), AfterChange::Stay);
        assert!(state.multi_values(PIECES).is_empty());
    }

    #[test]
    fn sections_start_collapsed() {
        let (_, mut state) = state();
        assert!(!state.is_section_expanded(PIECES, "Pièces intérieures"));
        assert!(state.toggle_section(PIECES, "Pièces intérieures"));
        assert!(state.is_section_expanded(PIECES, "Pièces intérieures"));
        assert!(!state.toggle_section(PIECES, "Pièces intérieures"));
    }

    #[test]
    fn display_value_counts_multi_values() {
        let (_, mut state) = state();
        assert_eq!(state.display_value(PIECES), "");
        state.toggle(PIECES, "Jardin", true);
        assert_eq!(state.display_value(PIECES), "Jardin");
        state.toggle(PIECES, "Serre", true);
        assert_eq!(state.display_value(PIECES), "2 items");
    }

    #[test]
    fn request_round_trip_keeps_free_text_fields() {
        let catalog = FacetCatalog::builtin();
        let request = SearchRequest::from_query_string("reference=0001&type_lieu=Villa&pieces=Cour&pieces=Serre");
        let mut state = SelectionState::from_request(&catalog, &request, false);
        assert_eq!(state.single_value(TYPE_LIEU), Some("Villa"));
        assert!(state.is_checked(PIECES, "Serre"));

        state.select(&catalog, DECORATION, "Design");
        state.toggle(PIECES, "Cour", false);
        let next = state.to_request(&request);
        assert_eq!(next.reference.as_deref(), Some("0001"));
        assert_eq!(next.decoration.as_deref(), Some("Design"));
        assert_eq!(next.pieces, vec!["Serre".to_string()]);
    }

    proptest! {
        #[test]
        fn toggle_on_then_off_restores_the_set(
            initial in proptest::collection::vec("[A-Za-z ]{1,12}", 0..6),
            value in "[A-Za-z ]{1,12}",
        ) {
            let (_, mut state) = state();
            for v in &initial {
                state.toggle(PIECES, v, true);
            }
            prop_assume!(!state.multi_values(PIECES).contains(&value));
            let before = state.multi_values(PIECES).to_vec();
            state.toggle(PIECES, &value, true);
            state.toggle(PIECES, &value, false);
            prop_assert_eq!(state.multi_values(PIECES).to_vec(), before);
        }

        #[test]
        fn single_select_holds_at_most_one_value(values in proptest::collection::vec("[a-z]{1,10}", 1..8)) {
            let (catalog, mut state) = state();
            for v in &values {
                state.select(&catalog, TYPE_LIEU, v);
            }
            prop_assert_eq!(state.single_value(TYPE_LIEU), values.last().map(String::as_str));
        }

        #[test]
        fn toggling_twice_on_never_duplicates(value in "[A-Za-z]{1,10}") {
            let (_, mut state) = state();
            state.toggle(PIECES, &value, true);
            state.toggle(PIECES, &value, true);
            prop_assert_eq!(state.multi_values(PIECES).len(), 1);
        }
    }
}
