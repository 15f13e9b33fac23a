pub mod facet_trigger_strip;
pub mod filter_form;
pub mod flat_panel;
pub mod hierarchical_panel;
pub mod sectioned_panel;
