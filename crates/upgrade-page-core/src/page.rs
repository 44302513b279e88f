use serde::Serialize;
use url::Url;

use crate::destination::{DestinationTable, resolve_destination_url};
use crate::error::UpgradePageError;
use crate::variant::PageVariant;

pub const UPGRADE_ROUTE_PREFIX: &str = "/admin/upgrade/";
pub const TRIAL_END_DATE_QUERY_PARAM: &str = "trialEndDate";

/// Reads the `type` route parameter out of `/admin/upgrade/<type>`.
pub fn variant_from_path(pathname: &str) -> Result<PageVariant, UpgradePageError> {
    let raw = pathname
        .strip_prefix(UPGRADE_ROUTE_PREFIX)
        .map(|rest| rest.trim_end_matches('/'))
        .filter(|rest| !rest.is_empty())
        .ok_or(UpgradePageError::MissingRouteParameter)?;
    raw.parse()
}

/// First `trialEndDate` value in a `location.search` string.
#[must_use]
pub fn trial_end_date_from_query(search: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == TRIAL_END_DATE_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Inputs of a single page view. Fixed once the view is mounted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    pub variant: PageVariant,
    pub trial_end_date: Option<String>,
    pub locale: String,
    pub is_mobile: bool,
    pub online: bool,
}

impl PageContext {
    pub fn from_location(
        pathname: &str,
        search: &str,
        locale: &str,
        is_mobile: bool,
        online: bool,
    ) -> Result<Self, UpgradePageError> {
        Ok(Self {
            variant: variant_from_path(pathname)?,
            trial_end_date: trial_end_date_from_query(search),
            locale: locale.to_string(),
            is_mobile,
            online,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageBody {
    Offline,
    Embedded { src: String, loading: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub show_header: bool,
    pub body: PageBody,
}

/// View model behind the upgrade page shell.
#[derive(Debug, Clone, Serialize)]
pub struct UpgradePage {
    context: PageContext,
    #[serde(serialize_with = "serialize_url")]
    destination: Url,
    frame_loaded: bool,
}

impl UpgradePage {
    #[must_use]
    pub fn new(context: PageContext, table: &DestinationTable) -> Self {
        let destination = resolve_destination_url(
            table,
            context.variant,
            context.trial_end_date.as_deref(),
            &context.locale,
        );
        Self {
            context,
            destination,
            frame_loaded: false,
        }
    }

    #[must_use]
    pub fn context(&self) -> &PageContext {
        &self.context
    }

    #[must_use]
    pub fn destination(&self) -> &Url {
        &self.destination
    }

    /// Records the iframe `load` event. Returns false if it was already seen.
    pub fn mark_frame_loaded(&mut self) -> bool {
        !std::mem::replace(&mut self.frame_loaded, true)
    }

    #[must_use]
    pub fn view(&self) -> PageView {
        let body = if self.context.online {
            PageBody::Embedded {
                src: self.destination.to_string(),
                loading: !self.frame_loaded,
            }
        } else {
            PageBody::Offline
        };
        PageView {
            show_header: self.context.is_mobile,
            body,
        }
    }
}

fn serialize_url<S>(url: &Url, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(url.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> DestinationTable {
        DestinationTable::builtin().expect("builtin table")
    }

    fn context(online: bool, is_mobile: bool) -> PageContext {
        PageContext::from_location(
            "/admin/upgrade/trial-gold",
            "?trialEndDate=2026-12-01",
            "EN-us",
            is_mobile,
            online,
        )
        .expect("valid route")
    }

    #[test]
    fn reads_variant_from_route() {
        assert_eq!(
            variant_from_path("/admin/upgrade/go-fully-featured"),
            Ok(PageVariant::GoFullyFeatured)
        );
        assert_eq!(
            variant_from_path("/admin/upgrade/upgrade-your-plan/"),
            Ok(PageVariant::UpgradeYourPlan)
        );
        assert_eq!(
            variant_from_path("/admin/upgrade/"),
            Err(UpgradePageError::MissingRouteParameter)
        );
        assert_eq!(
            variant_from_path("/admin/rooms"),
            Err(UpgradePageError::MissingRouteParameter)
        );
        assert_eq!(
            variant_from_path("/admin/upgrade/trial-platinum"),
            Err(UpgradePageError::UnknownPageVariant(
                "trial-platinum".to_string()
            ))
        );
    }

    #[test]
    fn reads_trial_end_date_from_query() {
        assert_eq!(
            trial_end_date_from_query("?trialEndDate=2026-12-01&x=1").as_deref(),
            Some("2026-12-01")
        );
        assert_eq!(
            trial_end_date_from_query("x=1&trialEndDate=Dec%201%2C%202026").as_deref(),
            Some("Dec 1, 2026")
        );
        assert_eq!(trial_end_date_from_query("?trialEndDate="), None);
        assert_eq!(trial_end_date_from_query(""), None);
    }

    #[test]
    fn online_view_shows_loader_until_frame_loads() {
        let mut page = UpgradePage::new(context(true, false), &table());
        let src = "https://go.rocket.chat/i/upgrade-gold-trial?lang=en-us&date=2026-12-01";

        assert_eq!(
            page.view(),
            PageView {
                show_header: false,
                body: PageBody::Embedded {
                    src: src.to_string(),
                    loading: true
                },
            }
        );

        assert!(page.mark_frame_loaded());
        assert!(!page.mark_frame_loaded());
        assert_eq!(
            page.view().body,
            PageBody::Embedded {
                src: src.to_string(),
                loading: false
            }
        );
    }

    #[test]
    fn offline_view_replaces_frame() {
        let page = UpgradePage::new(context(false, true), &table());
        assert_eq!(
            page.view(),
            PageView {
                show_header: true,
                body: PageBody::Offline,
            }
        );
    }

    #[test]
    fn view_serializes_for_diagnostics() {
        let page = UpgradePage::new(context(false, false), &table());
        assert_eq!(
            serde_json::to_value(page.view()).expect("view serializes"),
            json!({ "show_header": false, "body": { "state": "offline" } })
        );
        let encoded = serde_json::to_value(&page).expect("page serializes");
        assert_eq!(encoded["context"]["variant"], json!("trial-gold"));
        assert_eq!(
            encoded["destination"],
            json!("https://go.rocket.chat/i/upgrade-gold-trial?lang=en-us&date=2026-12-01")
        );
    }
}
