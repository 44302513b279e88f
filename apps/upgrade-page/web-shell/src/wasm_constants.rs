pub(crate) const CONFIG_GLOBAL: &str = "__UPGRADE_PAGE_CONFIG__";
pub(crate) const MESSAGE_EVENT: &str = "message";
pub(crate) const PAGEHIDE_EVENT: &str = "pagehide";
pub(crate) const PAGE_ROOT_ID: &str = "admin-upgrade-page";
pub(crate) const PAGE_QA_ATTRIBUTE: &str = "data-qa";
pub(crate) const PAGE_QA_VALUE: &str = "admin-upgrade";
pub(crate) const PAGE_HEADER_ID: &str = "admin-upgrade-page-header";
pub(crate) const PAGE_STATUS_ID: &str = "admin-upgrade-page-status";
pub(crate) const PAGE_LOADER_ID: &str = "admin-upgrade-page-loader";
pub(crate) const PAGE_FRAME_ID: &str = "admin-upgrade-page-frame";
pub(crate) const PAGE_OFFLINE_ID: &str = "admin-upgrade-page-offline";
pub(crate) const OFFLINE_TITLE: &str = "Connection lost";
pub(crate) const OFFLINE_BODY: &str =
    "The upgrade page could not be loaded because this browser is offline. Reconnect and reload the page.";
pub(crate) const LOADER_TEXT: &str = "Loading…";
pub(crate) const ERROR_TEXT_COLOR: &str = "#f87171";
pub(crate) const MUTED_TEXT_COLOR: &str = "#6c727a";
