use std::collections::BTreeMap;

use url::Url;

use crate::error::UpgradePageError;
use crate::variant::PageVariant;

pub const LANG_QUERY_PARAM: &str = "lang";
pub const DATE_QUERY_PARAM: &str = "date";

/// Destination url for every [`PageVariant`].
///
/// One field per variant, so every lookup is an exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationTable {
    go_fully_featured: Url,
    go_fully_featured_registered: Url,
    trial_gold: Url,
    trial_enterprise: Url,
    upgrade_your_plan: Url,
}

impl DestinationTable {
    /// Fails unless each variant maps to a parseable http(s) url.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, UpgradePageError>
    where
        I: IntoIterator<Item = (PageVariant, S)>,
        S: AsRef<str>,
    {
        let mut urls = BTreeMap::new();
        for (variant, raw) in entries {
            urls.insert(variant, parse_destination(variant, raw.as_ref())?);
        }
        let mut take = |variant: PageVariant| {
            urls.remove(&variant)
                .ok_or(UpgradePageError::MissingDestination(variant))
        };
        Ok(Self {
            go_fully_featured: take(PageVariant::GoFullyFeatured)?,
            go_fully_featured_registered: take(PageVariant::GoFullyFeaturedRegistered)?,
            trial_gold: take(PageVariant::TrialGold)?,
            trial_enterprise: take(PageVariant::TrialEnterprise)?,
            upgrade_your_plan: take(PageVariant::UpgradeYourPlan)?,
        })
    }

    pub fn builtin() -> Result<Self, UpgradePageError> {
        Self::with_overrides(&BTreeMap::new())
    }

    /// Built-in table with `overrides` applied on top.
    pub fn with_overrides(
        overrides: &BTreeMap<PageVariant, String>,
    ) -> Result<Self, UpgradePageError> {
        Self::from_entries(PageVariant::ALL.into_iter().map(|variant| {
            let raw = overrides
                .get(&variant)
                .map_or(variant.default_destination(), String::as_str);
            (variant, raw)
        }))
    }

    #[must_use]
    pub fn base_url(&self, variant: PageVariant) -> &Url {
        match variant {
            PageVariant::GoFullyFeatured => &self.go_fully_featured,
            PageVariant::GoFullyFeaturedRegistered => &self.go_fully_featured_registered,
            PageVariant::TrialGold => &self.trial_gold,
            PageVariant::TrialEnterprise => &self.trial_enterprise,
            PageVariant::UpgradeYourPlan => &self.upgrade_your_plan,
        }
    }
}

fn parse_destination(variant: PageVariant, raw: &str) -> Result<Url, UpgradePageError> {
    let url = Url::parse(raw.trim()).map_err(|error| UpgradePageError::InvalidDestinationUrl {
        variant,
        reason: error.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(UpgradePageError::InvalidDestinationUrl {
            variant,
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }
    Ok(url)
}

/// Builds the iframe `src` for a page view.
///
/// `lang` always carries the lower-cased locale. `date` is only appended for
/// a non-empty trial end date and is passed through verbatim.
#[must_use]
pub fn resolve_destination_url(
    table: &DestinationTable,
    variant: PageVariant,
    trial_end_date: Option<&str>,
    locale: &str,
) -> Url {
    let mut url = table.base_url(variant).clone();
    // the table owns the query string; parameters on a configured base are dropped
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.append_pair(LANG_QUERY_PARAM, &locale.to_lowercase());
        if let Some(date) = trial_end_date.filter(|date| !date.is_empty()) {
            query.append_pair(DATE_QUERY_PARAM, date);
        }
    }
    tracing::debug!(variant = %variant, url = %url, "resolved upgrade destination");
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.into_owned())
    }

    #[test]
    fn every_variant_resolves_to_its_documented_base() {
        let table = DestinationTable::builtin().expect("builtin table");
        let expected = [
            (
                PageVariant::GoFullyFeatured,
                "https://go.rocket.chat/i/upgrade-ce-1-unregistered",
            ),
            (
                PageVariant::GoFullyFeaturedRegistered,
                "https://go.rocket.chat/i/upgrade-ce-1-registered",
            ),
            (
                PageVariant::TrialGold,
                "https://go.rocket.chat/i/upgrade-gold-trial",
            ),
            (
                PageVariant::TrialEnterprise,
                "https://go.rocket.chat/i/upgrade-ee-trial",
            ),
            (
                PageVariant::UpgradeYourPlan,
                "https://go.rocket.chat/i/upgrade-ce-2",
            ),
        ];

        for (variant, base) in expected {
            let url = resolve_destination_url(&table, variant, None, "pt-BR");
            assert_eq!(url.as_str(), format!("{base}?lang=pt-br"));
        }
    }

    #[test]
    fn locale_is_lower_cased() {
        let url = resolve_destination_url(
            &DestinationTable::builtin().expect("builtin table"),
            PageVariant::TrialGold,
            None,
            "EN-us",
        );
        assert_eq!(query_value(&url, "lang").as_deref(), Some("en-us"));
    }

    #[test]
    fn trial_end_date_is_forwarded_verbatim() {
        let url = resolve_destination_url(
            &DestinationTable::builtin().expect("builtin table"),
            PageVariant::TrialEnterprise,
            Some("2026-11-30T00:00:00.000Z"),
            "en",
        );
        assert_eq!(
            query_value(&url, "date").as_deref(),
            Some("2026-11-30T00:00:00.000Z")
        );
        assert_eq!(
            url.query(),
            Some("lang=en&date=2026-11-30T00%3A00%3A00.000Z")
        );
    }

    #[test]
    fn absent_or_empty_trial_end_date_omits_date() {
        let table = DestinationTable::builtin().expect("builtin table");
        for date in [None, Some("")] {
            let url = resolve_destination_url(&table, PageVariant::UpgradeYourPlan, date, "de");
            assert_eq!(query_value(&url, "date"), None);
            assert_eq!(url.query(), Some("lang=de"));
        }
    }

    #[test]
    fn overrides_replace_single_variants() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            PageVariant::TrialGold,
            "https://staging.example.com/gold".to_string(),
        );
        let table = DestinationTable::with_overrides(&overrides).expect("valid overrides");

        assert_eq!(
            table.base_url(PageVariant::TrialGold).as_str(),
            "https://staging.example.com/gold"
        );
        assert_eq!(
            table.base_url(PageVariant::TrialEnterprise).as_str(),
            PageVariant::TrialEnterprise.default_destination()
        );
    }

    #[test]
    fn incomplete_table_is_rejected() {
        let error = DestinationTable::from_entries([(
            PageVariant::GoFullyFeatured,
            "https://go.rocket.chat/a",
        )])
        .expect_err("table missing variants");
        assert_eq!(
            error,
            UpgradePageError::MissingDestination(PageVariant::GoFullyFeaturedRegistered)
        );
    }

    #[test]
    fn every_variant_has_its_own_slot() {
        let table = DestinationTable::from_entries(
            PageVariant::ALL.map(|variant| (variant, format!("https://dest.test/{variant}"))),
        )
        .expect("complete table");

        for variant in PageVariant::ALL {
            assert_eq!(
                table.base_url(variant).as_str(),
                format!("https://dest.test/{variant}")
            );
        }
    }

    #[test]
    fn invalid_destination_is_rejected() {
        let mut overrides = BTreeMap::new();
        overrides.insert(PageVariant::TrialGold, "go.rocket.chat/gold".to_string());
        assert!(matches!(
            DestinationTable::with_overrides(&overrides),
            Err(UpgradePageError::InvalidDestinationUrl {
                variant: PageVariant::TrialGold,
                ..
            })
        ));

        overrides.insert(PageVariant::TrialGold, "javascript:alert(1)".to_string());
        assert!(DestinationTable::with_overrides(&overrides).is_err());
    }
}
