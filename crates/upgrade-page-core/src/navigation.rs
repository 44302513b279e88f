use serde_json::Value;
use url::Url;

use crate::error::UpgradePageError;

/// Wire field carrying the requested host path: `{ "goTo": "<path>" }`.
pub const NAVIGATION_PATH_FIELD: &str = "goTo";

/// A navigation request posted by the embedded upgrade page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub go_to: String,
}

impl NavigationRequest {
    /// Shape check over an already decoded value.
    ///
    /// Only a JSON object with a string `goTo` matches. Every other shape
    /// yields `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let go_to = object.get(NAVIGATION_PATH_FIELD)?.as_str()?;
        Some(Self {
            go_to: go_to.to_string(),
        })
    }

    /// Decodes the raw `MessageEvent.data` string.
    #[must_use]
    pub fn decode(data: &str) -> Option<Self> {
        let value = serde_json::from_str::<Value>(data).ok()?;
        Self::from_value(&value)
    }

    /// Path to navigate to, if the request names one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        if self.go_to.is_empty() {
            None
        } else {
            Some(&self.go_to)
        }
    }
}

/// Turns a host-relative path into a fully qualified url.
pub trait AbsoluteUrlResolver {
    fn absolute_url(&self, path: &str) -> Option<String>;
}

impl<F> AbsoluteUrlResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn absolute_url(&self, path: &str) -> Option<String> {
        self(path)
    }
}

/// Resolves paths against the site root url.
///
/// Results are pinned to the site origin; a path that would resolve to any
/// other origin yields `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrlResolver {
    root: Url,
}

impl SiteUrlResolver {
    pub fn new(site_url: &str) -> Result<Self, UpgradePageError> {
        let trimmed = site_url.trim();
        let invalid = |reason: String| UpgradePageError::InvalidSiteUrl {
            url: trimmed.to_string(),
            reason,
        };
        let mut root = Url::parse(trimmed).map_err(|error| invalid(error.to_string()))?;
        if !matches!(root.scheme(), "http" | "https") || root.host_str().is_none() {
            return Err(invalid("site url must be http(s) with a host".to_string()));
        }
        root.set_query(None);
        root.set_fragment(None);
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Url {
        &self.root
    }
}

impl AbsoluteUrlResolver for SiteUrlResolver {
    fn absolute_url(&self, path: &str) -> Option<String> {
        // "./" keeps a colon in the first segment from reading as a scheme
        let relative = format!("./{}", path.trim_start_matches('/'));
        let resolved = self.root.join(&relative).ok()?;
        if resolved.origin() != self.root.origin() {
            return None;
        }
        Some(resolved.into())
    }
}

/// Sets the top-level browsing context location.
pub trait HostNavigator {
    type Error;

    fn navigate_to(&self, absolute_url: &str) -> Result<(), Self::Error>;
}

/// Result of running one message event through the listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    ForeignSource,
    Discarded,
    Navigate(String),
}

/// Applies the navigation contract to one `message` event.
///
/// `from_tracked_frame` must be true only when the event source is the
/// tracked iframe's content window. `data` is `None` when the event payload
/// is not a string.
pub fn evaluate_message<R>(
    from_tracked_frame: bool,
    data: Option<&str>,
    resolver: &R,
) -> MessageOutcome
where
    R: AbsoluteUrlResolver + ?Sized,
{
    if !from_tracked_frame {
        return MessageOutcome::ForeignSource;
    }
    let Some(request) = data.and_then(NavigationRequest::decode) else {
        return MessageOutcome::Discarded;
    };
    let Some(path) = request.path() else {
        return MessageOutcome::Discarded;
    };
    match resolver.absolute_url(path) {
        Some(url) => MessageOutcome::Navigate(url),
        None => MessageOutcome::Discarded,
    }
}

/// Message handler bound to the page's resolver and navigator.
#[derive(Debug)]
pub struct NavigationMessageListener<R, N> {
    resolver: R,
    navigator: N,
}

impl<R, N> NavigationMessageListener<R, N>
where
    R: AbsoluteUrlResolver,
    N: HostNavigator,
{
    pub fn new(resolver: R, navigator: N) -> Self {
        Self {
            resolver,
            navigator,
        }
    }

    pub fn handle(
        &self,
        from_tracked_frame: bool,
        data: Option<&str>,
    ) -> Result<MessageOutcome, N::Error> {
        let outcome = evaluate_message(from_tracked_frame, data, &self.resolver);
        if let MessageOutcome::Navigate(url) = &outcome {
            tracing::info!(url = %url, "embedded upgrade page requested navigation");
            self.navigator.navigate_to(url)?;
        }
        Ok(outcome)
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
