//! Process-wide configuration read once from the environment.

use std::sync::OnceLock;

use anyhow::Context;
use common::{facet_catalog::FacetCatalog, filter_settings::FilterSettings};
use tracing::info;

use crate::api::results_page::ConfiguredHost;

#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub settings: FilterSettings,
    pub catalog: FacetCatalog,
    pub host: ConfiguredHost,
    /// Token expected on listing meta writes. Writes are refused when unset.
    pub edit_token: Option<String>,
}

static FILTER_CONFIG: OnceLock<FilterConfig> = OnceLock::new();

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn env_page_id(name: &str) -> anyhow::Result<Option<u64>> {
    env_var(name)
        .map(|value| value.trim().parse::<u64>().with_context(|| format!("{name} must be a page id, got {value:?}")))
        .transpose()
        .map(|id| id.filter(|id| *id > 0))
}

impl FilterConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = match env_var("FACET_FILTERS_SETTINGS") {
            Some(path) => {
                let json = std::fs::read_to_string(&path).with_context(|| format!("reading settings file {path}"))?;
                FilterSettings::from_json(&json).with_context(|| format!("parsing settings file {path}"))?
            }
            None => FilterSettings::default(),
        };
        let catalog = match env_var("FACET_FILTERS_CATALOG") {
            Some(path) => {
                let json = std::fs::read_to_string(&path).with_context(|| format!("reading catalog file {path}"))?;
                FacetCatalog::from_json(&json).with_context(|| format!("loading catalog file {path}"))?
            }
            None => FacetCatalog::builtin(),
        };
        let host = ConfiguredHost {
            site_url: env_var("FACET_FILTERS_SITE_URL").unwrap_or("http://localhost:8080".to_string()),
            search_result_page: env_page_id("FACET_FILTERS_SEARCH_RESULT_PAGE")?,
            properties_page: env_page_id("FACET_FILTERS_PROPERTIES_PAGE")?,
            listing_archive: env_var("FACET_FILTERS_LISTING_ARCHIVE"),
        };
        Ok(Self { settings, catalog, host, edit_token: env_var("FACET_FILTERS_EDIT_TOKEN") })
    }
}

/// Loads the configuration on first use and hands out the same instance after.
pub fn filter_config() -> anyhow::Result<&'static FilterConfig> {
    if let Some(config) = FILTER_CONFIG.get() {
        return Ok(config);
    }
    let config = FilterConfig::from_env()?;
    info!(
        "filter config loaded: {} facets, auto submit = {}",
        config.catalog.facets.len(),
        config.settings.enable_auto_submit
    );
    Ok(FILTER_CONFIG.get_or_init(|| config))
}
