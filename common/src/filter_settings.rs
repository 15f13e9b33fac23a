//! Administrative settings consumed by the filter form.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_text_field;

pub const DEFAULT_BUTTON_TEXT: &str = "Rechercher";
pub const DEFAULT_BUTTON_COLOR: &str = "#0073aa";
pub const DEFAULT_BUTTON_HOVER_COLOR: &str = "#005a87";
pub const DEFAULT_BUTTON_TEXT_COLOR: &str = "#ffffff";
pub const DEFAULT_FILTERS_PER_ROW: u32 = 4;
pub const DEFAULT_PANEL_MAX_HEIGHT: u32 = 600;

pub const FILTERS_PER_ROW_RANGE: (u32, u32) = (1, 6);
pub const PANEL_MAX_HEIGHT_RANGE: (u32, u32) = (300, 1200);
pub const PANEL_MAX_HEIGHT_STEP: u32 = 50;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#(?:[A-Fa-f0-9]{3}){1,2}$").unwrap());

/// Settings as submitted from the admin form or read from a settings file,
/// before validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsInput {
    pub search_page_url: Option<i64>,
    pub enable_auto_submit: Option<bool>,
    pub button_text: Option<String>,
    pub button_color: Option<String>,
    pub button_hover_color: Option<String>,
    pub button_text_color: Option<String>,
    pub filters_per_row: Option<i64>,
    pub panel_max_height: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Page id of the explicit results page, if configured.
    pub search_page_url: Option<u64>,
    pub enable_auto_submit: bool,
    pub button_text: String,
    pub button_color: String,
    pub button_hover_color: String,
    pub button_text_color: String,
    pub filters_per_row: u32,
    pub panel_max_height: u32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            search_page_url: None,
            enable_auto_submit: false,
            button_text: DEFAULT_BUTTON_TEXT.to_string(),
            button_color: DEFAULT_BUTTON_COLOR.to_string(),
            button_hover_color: DEFAULT_BUTTON_HOVER_COLOR.to_string(),
            button_text_color: DEFAULT_BUTTON_TEXT_COLOR.to_string(),
            filters_per_row: DEFAULT_FILTERS_PER_ROW,
            panel_max_height: DEFAULT_PANEL_MAX_HEIGHT,
        }
    }
}

impl FilterSettings {
    /// Validates raw input. Numbers are clamped to their range, colors fall
    /// back to their defaults and the button text is reduced to plain text.
    pub fn from_input(input: SettingsInput) -> Self {
        let defaults = FilterSettings::default();
        let button_text = input
            .button_text
            .map(|text| sanitize_text_field(&text))
            .filter(|text| !text.is_empty())
            .unwrap_or(defaults.button_text);
        Self {
            search_page_url: input.search_page_url.map(i64::unsigned_abs).filter(|id| *id > 0),
            enable_auto_submit: input.enable_auto_submit.unwrap_or(false),
            button_text,
            button_color: color_or(input.button_color, DEFAULT_BUTTON_COLOR),
            button_hover_color: color_or(input.button_hover_color, DEFAULT_BUTTON_HOVER_COLOR),
            button_text_color: color_or(input.button_text_color, DEFAULT_BUTTON_TEXT_COLOR),
            filters_per_row: input
                .filters_per_row
                .map(|n| clamp_abs(n, FILTERS_PER_ROW_RANGE))
                .unwrap_or(defaults.filters_per_row),
            panel_max_height: input
                .panel_max_height
                .map(|n| snap_to_step(clamp_abs(n, PANEL_MAX_HEIGHT_RANGE), PANEL_MAX_HEIGHT_STEP, PANEL_MAX_HEIGHT_RANGE))
                .unwrap_or(defaults.panel_max_height),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let input: SettingsInput = serde_json::from_str(json)?;
        Ok(Self::from_input(input))
    }
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

fn color_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(color) if is_hex_color(color.trim()) => color.trim().to_string(),
        _ => default.to_string(),
    }
}

fn clamp_abs(value: i64, (min, max): (u32, u32)) -> u32 {
    value.unsigned_abs().clamp(min as u64, max as u64) as u32
}

fn snap_to_step(value: u32, step: u32, (min, max): (u32, u32)) -> u32 {
    let snapped = (value + step / 2) / step * step;
    snapped.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_yields_defaults() {
        assert_eq!(FilterSettings::from_input(SettingsInput::default()), FilterSettings::default());
    }

    #[test]
    fn numbers_are_clamped() {
        let input = SettingsInput { filters_per_row: Some(9), panel_max_height: Some(1234), ..Default::default() };
        let settings = FilterSettings::from_input(input);
        assert_eq!(settings.filters_per_row, 6);
        assert_eq!(settings.panel_max_height, 1200);

        let input = SettingsInput { filters_per_row: Some(0), panel_max_height: Some(10), ..Default::default() };
        let settings = FilterSettings::from_input(input);
        assert_eq!(settings.filters_per_row, 1);
        assert_eq!(settings.panel_max_height, 300);
    }

    #[test]
    fn panel_height_snaps_to_step() {
        let input = SettingsInput { panel_max_height: Some(333), ..Default::default() };
        assert_eq!(FilterSettings::from_input(input).panel_max_height, 350);
        let input = SettingsInput { panel_max_height: Some(-620), ..Default::default() };
        assert_eq!(FilterSettings::from_input(input).panel_max_height, 600);
    }

    #[test]
    fn invalid_colors_fall_back() {
        let input = SettingsInput {
            button_color: Some("red".to_string()),
            button_hover_color: Some("#abc".to_string()),
            button_text_color: Some("#12345".to_string()),
            ..Default::default()
        };
        let settings = FilterSettings::from_input(input);
        assert_eq!(settings.button_color, DEFAULT_BUTTON_COLOR);
        assert_eq!(settings.button_hover_color, "#abc");
        assert_eq!(settings.button_text_color, DEFAULT_BUTTON_TEXT_COLOR);
    }

    #[test]
    fn button_text_is_plain_text() {
        let input = SettingsInput { button_text: Some("<b>Chercher</b>".to_string()), ..Default::default() };
        assert_eq!(FilterSettings::from_input(input).button_text, "Chercher");
        let input = SettingsInput { button_text: Some("<i></i>".to_string()), ..Default::default() };
        assert_eq!(FilterSettings::from_input(input).button_text, DEFAULT_BUTTON_TEXT);
    }

    #[test]
    fn search_page_zero_means_unset() {
        let settings = FilterSettings::from_json(r#"{"search_page_url": 0, "enable_auto_submit": true}"#).unwrap();
        assert_eq!(settings.search_page_url, None);
        assert!(settings.enable_auto_submit);
        let settings = FilterSettings::from_json(r#"{"search_page_url": 42}"#).unwrap();
        assert_eq!(settings.search_page_url, Some(42));
    }
}
