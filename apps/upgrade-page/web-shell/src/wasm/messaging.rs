use super::*;

    /// `window` as the source of cross-document `message` events.
    pub(super) struct WindowMessageChannel {
        window: web_sys::Window,
    }

    impl MessageChannel for WindowMessageChannel {
        type Handle = Closure<dyn FnMut(MessageEvent)>;
        type Error = JsValue;

        fn unsubscribe(&self, handle: &Self::Handle) -> Result<(), Self::Error> {
            self.window
                .remove_event_listener_with_callback(MESSAGE_EVENT, handle.as_ref().unchecked_ref())?;
            tracing::debug!("navigation message listener removed");
            Ok(())
        }
    }

    pub(super) struct LocationNavigator {
        window: web_sys::Window,
    }

    impl HostNavigator for LocationNavigator {
        type Error = JsValue;

        fn navigate_to(&self, absolute_url: &str) -> Result<(), Self::Error> {
            self.window.location().set_href(absolute_url)
        }
    }

    pub(super) fn subscribe_navigation_messages(
        window: &web_sys::Window,
        frame: HtmlIFrameElement,
        resolver: SiteUrlResolver,
    ) -> Result<ScopedSubscription<WindowMessageChannel>, ShellError> {
        let listener = NavigationMessageListener::new(
            resolver,
            LocationNavigator {
                window: window.clone(),
            },
        );
        let callback = Closure::<dyn FnMut(MessageEvent)>::wrap(Box::new(move |event: MessageEvent| {
            let from_tracked_frame = is_from_frame(&frame, &event);
            let data = event.data().as_string();
            match listener.handle(from_tracked_frame, data.as_deref()) {
                Ok(MessageOutcome::Navigate(_)) => record_navigation(),
                Ok(MessageOutcome::ForeignSource | MessageOutcome::Discarded) => {}
                Err(error) => tracing::warn!(error = ?error, "host navigation failed"),
            }
        }));
        window
            .add_event_listener_with_callback(MESSAGE_EVENT, callback.as_ref().unchecked_ref())
            .map_err(|_| ShellError::Dom("failed to add message listener"))?;
        tracing::debug!("navigation message listener installed");

        Ok(ScopedSubscription::new(
            WindowMessageChannel {
                window: window.clone(),
            },
            callback,
        ))
    }

    /// True only when the event came from the tracked frame's own window.
    fn is_from_frame(frame: &HtmlIFrameElement, event: &MessageEvent) -> bool {
        let (Some(content_window), Some(source)) = (frame.content_window(), event.source()) else {
            return false;
        };
        js_sys::Object::is(content_window.as_ref(), source.as_ref())
    }
