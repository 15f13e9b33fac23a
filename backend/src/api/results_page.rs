//! Where the filter form submits to.

use common::filter_settings::FilterSettings;
use serde::{Deserialize, Serialize};

use crate::config::filter_config;

/// Lookups the host site answers for results page resolution.
pub trait HostSite {
    fn permalink(&self, page_id: u64) -> Option<String>;
    /// Results page configured in the host theme.
    fn search_result_page(&self) -> Option<u64>;
    /// Listing page configured in the host theme.
    fn properties_page(&self) -> Option<u64>;
    fn listing_archive_link(&self) -> Option<String>;
    fn home_url(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredHost {
    pub site_url: String,
    pub search_result_page: Option<u64>,
    pub properties_page: Option<u64>,
    pub listing_archive: Option<String>,
}

impl HostSite for ConfiguredHost {
    fn permalink(&self, page_id: u64) -> Option<String> {
        Some(format!("{}/?page_id={}", self.site_url.trim_end_matches('/'), page_id))
    }

    fn search_result_page(&self) -> Option<u64> {
        self.search_result_page
    }

    fn properties_page(&self) -> Option<u64> {
        self.properties_page
    }

    fn listing_archive_link(&self) -> Option<String> {
        let archive = self.listing_archive.as_deref()?;
        if archive.starts_with("http://") || archive.starts_with("https://") {
            Some(archive.to_string())
        } else {
            Some(format!("{}/{}", self.site_url.trim_end_matches('/'), archive.trim_start_matches('/')))
        }
    }

    fn home_url(&self) -> String {
        format!("{}/", self.site_url.trim_end_matches('/'))
    }
}

/// Explicit setting, then the theme's results page, then its listing page,
/// then the listing archive, then the site root.
pub fn resolve_results_url(settings: &FilterSettings, host: &impl HostSite) -> String {
    settings
        .search_page_url
        .and_then(|page| host.permalink(page))
        .or_else(|| host.search_result_page().and_then(|page| host.permalink(page)))
        .or_else(|| host.properties_page().and_then(|page| host.permalink(page)))
        .or_else(|| host.listing_archive_link())
        .unwrap_or_else(|| host.home_url())
}

pub async fn get_results_url() -> anyhow::Result<String> {
    let config = filter_config()?;
    Ok(resolve_results_url(&config.settings, &config.host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn host() -> ConfiguredHost {
        ConfiguredHost {
            site_url: "https://example.org/".to_string(),
            search_result_page: None,
            properties_page: None,
            listing_archive: None,
        }
    }

    #[test]
    fn falls_back_to_site_root() {
        assert_eq!(resolve_results_url(&FilterSettings::default(), &host()), "https://example.org/");
    }

    #[test]
    fn resolution_order_is_respected() {
        let mut host = host();
        host.listing_archive = Some("/properties/".to_string());
        assert_eq!(resolve_results_url(&FilterSettings::default(), &host), "https://example.org/properties/");

        host.properties_page = Some(7);
        assert_eq!(resolve_results_url(&FilterSettings::default(), &host), "https://example.org/?page_id=7");

        host.search_result_page = Some(9);
        assert_eq!(resolve_results_url(&FilterSettings::default(), &host), "https://example.org/?page_id=9");

        let settings = FilterSettings { search_page_url: Some(42), ..Default::default() };
        assert_eq!(resolve_results_url(&settings, &host), "https://example.org/?page_id=42");
    }

    struct NoPermalinks;

    impl HostSite for NoPermalinks {
        fn permalink(&self, _page_id: u64) -> Option<String> {
            None
        }
        fn search_result_page(&self) -> Option<u64> {
            Some(3)
        }
        fn properties_page(&self) -> Option<u64> {
            None
        }
        fn listing_archive_link(&self) -> Option<String> {
            Some("https://example.org/biens/".to_string())
        }
        fn home_url(&self) -> String {
            "https://example.org/".to_string()
        }
    }

    #[test]
    fn unresolvable_pages_are_skipped() {
        let settings = FilterSettings { search_page_url: Some(1), ..Default::default() };
        assert_eq!(resolve_results_url(&settings, &NoPermalinks), "https://example.org/biens/");
    }
}
