use common::{facet_catalog::FacetCatalog, filter_settings::FilterSettings};

use crate::config::filter_config;

pub async fn get_filter_settings() -> anyhow::Result<FilterSettings> {
    Ok(filter_config()?.settings.clone())
}

pub async fn get_facet_catalog() -> anyhow::Result<FacetCatalog> {
    Ok(filter_config()?.catalog.clone())
}
