use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UpgradePageError;

/// Marketing destination selected by the `type` route parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageVariant {
    GoFullyFeatured,
    GoFullyFeaturedRegistered,
    TrialGold,
    TrialEnterprise,
    UpgradeYourPlan,
}

impl PageVariant {
    pub const ALL: [PageVariant; 5] = [
        Self::GoFullyFeatured,
        Self::GoFullyFeaturedRegistered,
        Self::TrialGold,
        Self::TrialEnterprise,
        Self::UpgradeYourPlan,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoFullyFeatured => "go-fully-featured",
            Self::GoFullyFeaturedRegistered => "go-fully-featured-registered",
            Self::TrialGold => "trial-gold",
            Self::TrialEnterprise => "trial-enterprise",
            Self::UpgradeYourPlan => "upgrade-your-plan",
        }
    }

    /// Built-in destination for the variant.
    #[must_use]
    pub fn default_destination(self) -> &'static str {
        match self {
            Self::GoFullyFeatured => "https://go.rocket.chat/i/upgrade-ce-1-unregistered",
            Self::GoFullyFeaturedRegistered => "https://go.rocket.chat/i/upgrade-ce-1-registered",
            Self::TrialGold => "https://go.rocket.chat/i/upgrade-gold-trial",
            Self::TrialEnterprise => "https://go.rocket.chat/i/upgrade-ee-trial",
            Self::UpgradeYourPlan => "https://go.rocket.chat/i/upgrade-ce-2",
        }
    }
}

impl fmt::Display for PageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageVariant {
    type Err = UpgradePageError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == raw)
            .ok_or_else(|| UpgradePageError::UnknownPageVariant(raw.to_string()))
    }
}
