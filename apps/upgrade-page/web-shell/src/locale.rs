/// Picks the page locale: document `lang`, then the browser language, then
/// the configured default.
pub(crate) fn pick_locale(
    document_lang: Option<&str>,
    navigator_language: Option<&str>,
    default_locale: &str,
) -> String {
    [document_lang, navigator_language]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(default_locale)
        .to_string()
}
