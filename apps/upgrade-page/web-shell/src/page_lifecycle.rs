/// Whether a `pagehide` should unmount the page view.
///
/// `persisted` is the event's `PageTransitionEvent.persisted`, or `None` when
/// the event carried no transition data. A persisted hide means the document
/// is entering the back/forward cache and will be shown again as-is, so the
/// listener and frame have to survive it.
pub(crate) fn pagehide_tears_down(persisted: Option<bool>) -> bool {
    !persisted.unwrap_or(false)
}
