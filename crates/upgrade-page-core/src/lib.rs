//! Admin upgrade page: destination resolution for the embedded marketing
//! page and the `{ "goTo": ... }` cross-frame navigation contract.

pub mod config;
pub mod destination;
pub mod error;
pub mod navigation;
pub mod page;
pub mod subscription;
pub mod variant;

pub use config::UpgradePageConfig;
pub use destination::{DestinationTable, resolve_destination_url};
pub use error::UpgradePageError;
pub use navigation::{
    AbsoluteUrlResolver, HostNavigator, MessageOutcome, NavigationMessageListener,
    NavigationRequest, SiteUrlResolver, evaluate_message,
};
pub use page::{PageBody, PageContext, PageView, UpgradePage};
pub use subscription::{MessageChannel, ScopedSubscription};
pub use variant::PageVariant;
