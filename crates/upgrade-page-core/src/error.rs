use crate::variant::PageVariant;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpgradePageError {
    #[error("unknown upgrade page variant `{0}`")]
    UnknownPageVariant(String),
    #[error("route is missing the upgrade page `type` parameter")]
    MissingRouteParameter,
    #[error("destination table has no url for `{0}`")]
    MissingDestination(PageVariant),
    #[error("destination url for `{variant}` is invalid: {reason}")]
    InvalidDestinationUrl { variant: PageVariant, reason: String },
    #[error("site url `{url}` is invalid: {reason}")]
    InvalidSiteUrl { url: String, reason: String },
    #[error("configuration is invalid: {0}")]
    Config(String),
}
