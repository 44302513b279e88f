/// A window-level event channel that hands out removable listener handles.
pub trait MessageChannel {
    type Handle;
    type Error;

    fn unsubscribe(&self, handle: &Self::Handle) -> Result<(), Self::Error>;
}

/// Listener registration that is removed when dropped.
///
/// Holds the channel and the handle returned at subscribe time, so teardown
/// happens on every exit path of the owning page view.
pub struct ScopedSubscription<C>
where
    C: MessageChannel,
{
    channel: C,
    handle: Option<C::Handle>,
}

impl<C> ScopedSubscription<C>
where
    C: MessageChannel,
{
    pub fn new(channel: C, handle: C::Handle) -> Self {
        Self {
            channel,
            handle: Some(handle),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Removes the listener now. Later calls and the eventual drop are no-ops.
    pub fn release(&mut self) -> Result<(), C::Error> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        self.channel.unsubscribe(&handle)
    }
}

impl<C> Drop for ScopedSubscription<C>
where
    C: MessageChannel,
{
    fn drop(&mut self) {
        if self.release().is_err() {
            tracing::warn!("failed to remove message listener during teardown");
        }
    }
}

impl<C> std::fmt::Debug for ScopedSubscription<C>
where
    C: MessageChannel,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedSubscription")
            .field("active", &self.is_active())
            .finish()
    }
}
