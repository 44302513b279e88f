use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::destination::DestinationTable;
use crate::error::UpgradePageError;
use crate::navigation::SiteUrlResolver;
use crate::variant::PageVariant;

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_MOBILE_MAX_WIDTH_PX: u32 = 767;
pub const DEFAULT_LOCALE: &str = "en";

/// Runtime settings for the upgrade page.
///
/// Every field is optional on the wire; missing fields take the defaults above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct UpgradePageConfig {
    /// Root url used to make navigation paths absolute. Falls back to the
    /// window origin when unset.
    pub site_url: Option<String>,
    pub destinations: BTreeMap<PageVariant, String>,
    pub log_filter: String,
    pub mobile_max_width_px: u32,
    pub default_locale: String,
}

impl Default for UpgradePageConfig {
    fn default() -> Self {
        Self {
            site_url: None,
            destinations: BTreeMap::new(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            mobile_max_width_px: DEFAULT_MOBILE_MAX_WIDTH_PX,
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl UpgradePageConfig {
    /// Parses the page config blob. `None` or blank input means defaults.
    pub fn from_json(raw: Option<&str>) -> Result<Self, UpgradePageError> {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(Self::default());
        };
        let mut config = serde_json::from_str::<Self>(raw)
            .map_err(|error| UpgradePageError::Config(error.to_string()))?;
        config.normalize();
        Ok(config)
    }

    fn normalize(&mut self) {
        if self.log_filter.trim().is_empty() {
            self.log_filter = DEFAULT_LOG_FILTER.to_string();
        }
        if self.default_locale.trim().is_empty() {
            self.default_locale = DEFAULT_LOCALE.to_string();
        }
        self.site_url = self
            .site_url
            .take()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
    }

    pub fn destination_table(&self) -> Result<DestinationTable, UpgradePageError> {
        DestinationTable::with_overrides(&self.destinations)
    }

    pub fn site_resolver(&self, window_origin: &str) -> Result<SiteUrlResolver, UpgradePageError> {
        SiteUrlResolver::new(self.site_url.as_deref().unwrap_or(window_origin))
    }

    #[must_use]
    pub fn is_mobile_width(&self, viewport_width_px: f64) -> bool {
        viewport_width_px <= f64::from(self.mobile_max_width_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_config_uses_defaults() {
        assert_eq!(
            UpgradePageConfig::from_json(None),
            Ok(UpgradePageConfig::default())
        );
        assert_eq!(
            UpgradePageConfig::from_json(Some("  ")),
            Ok(UpgradePageConfig::default())
        );
        assert_eq!(
            UpgradePageConfig::from_json(Some("{}")),
            Ok(UpgradePageConfig::default())
        );
    }

    #[test]
    fn parses_overrides() {
        let config = UpgradePageConfig::from_json(Some(
            r#"{
                "siteUrl": " https://chat.example.com/ ",
                "destinations": { "trial-gold": "https://staging.example.com/gold" },
                "logFilter": "debug",
                "mobileMaxWidthPx": 600,
                "defaultLocale": "pt-BR"
            }"#,
        ))
        .expect("valid config");

        assert_eq!(config.site_url.as_deref(), Some("https://chat.example.com/"));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.mobile_max_width_px, 600);
        assert_eq!(config.default_locale, "pt-BR");
        let table = config.destination_table().expect("table");
        assert_eq!(
            table.base_url(PageVariant::TrialGold).as_str(),
            "https://staging.example.com/gold"
        );
    }

    #[test]
    fn blank_values_fall_back() {
        let config = UpgradePageConfig::from_json(Some(
            r#"{ "siteUrl": "", "logFilter": " ", "defaultLocale": "" }"#,
        ))
        .expect("valid config");
        assert_eq!(config, UpgradePageConfig::default());
    }

    #[test]
    fn rejects_malformed_config() {
        assert!(matches!(
            UpgradePageConfig::from_json(Some("{not json")),
            Err(UpgradePageError::Config(_))
        ));
        assert!(matches!(
            UpgradePageConfig::from_json(Some(r#"{ "destinations": { "trial-platinum": "https://x.test" } }"#)),
            Err(UpgradePageError::Config(_))
        ));
        assert!(matches!(
            UpgradePageConfig::from_json(Some(r#"{ "unknownKey": true }"#)),
            Err(UpgradePageError::Config(_))
        ));
    }

    #[test]
    fn site_resolver_prefers_configured_url() {
        let config = UpgradePageConfig {
            site_url: Some("https://chat.example.com/base".to_string()),
            ..UpgradePageConfig::default()
        };
        let resolver = config
            .site_resolver("https://origin.example.com")
            .expect("resolver");
        assert_eq!(resolver.root().as_str(), "https://chat.example.com/base/");

        let resolver = UpgradePageConfig::default()
            .site_resolver("https://origin.example.com")
            .expect("resolver");
        assert_eq!(resolver.root().as_str(), "https://origin.example.com/");
    }

    #[test]
    fn mobile_breakpoint_is_inclusive() {
        let config = UpgradePageConfig::default();
        assert!(config.is_mobile_width(767.0));
        assert!(!config.is_mobile_width(768.0));
    }
}
