use super::*;

    /// Browser-derived inputs sampled once per page view.
    pub(super) struct PageInputs {
        pub(super) pathname: String,
        pub(super) search: String,
        pub(super) origin: String,
        pub(super) locale: String,
        pub(super) is_mobile: bool,
        pub(super) online: bool,
    }

    pub(super) fn read_page_inputs(
        window: &web_sys::Window,
        config: &UpgradePageConfig,
    ) -> Result<PageInputs, ShellError> {
        let location = window.location();
        let pathname = location
            .pathname()
            .map_err(|_| ShellError::Unavailable("location.pathname"))?;
        let search = location.search().unwrap_or_default();
        let origin = location
            .origin()
            .map_err(|_| ShellError::Unavailable("location.origin"))?;

        let document_lang = window
            .document()
            .and_then(|document| document.document_element())
            .and_then(|element| element.get_attribute("lang"));
        let navigator = window.navigator();
        let navigator_language = navigator.language();
        let locale = pick_locale(
            document_lang.as_deref(),
            navigator_language.as_deref(),
            &config.default_locale,
        );

        let is_mobile = window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .is_some_and(|width| config.is_mobile_width(width));

        Ok(PageInputs {
            pathname,
            search,
            origin,
            locale,
            is_mobile,
            online: navigator.on_line(),
        })
    }

    pub(super) fn read_config_global(window: &web_sys::Window) -> Option<String> {
        let value = js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
        value.as_string()
    }

    pub(super) fn install_pagehide_handler(window: &web_sys::Window) {
        PAGEHIDE_HANDLER.with(|slot| {
            if slot.borrow().is_some() {
                return;
            }
            let callback =
                Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event: web_sys::Event| {
                    let persisted = event
                        .dyn_ref::<web_sys::PageTransitionEvent>()
                        .map(web_sys::PageTransitionEvent::persisted);
                    if pagehide_tears_down(persisted) {
                        teardown();
                    } else {
                        tracing::debug!("page entering back/forward cache; keeping view mounted");
                    }
                }));
            if window
                .add_event_listener_with_callback(PAGEHIDE_EVENT, callback.as_ref().unchecked_ref())
                .is_err()
            {
                tracing::warn!("failed to install pagehide teardown handler");
                return;
            }
            *slot.borrow_mut() = Some(callback);
        });
    }

    pub(super) fn record_navigation() {
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.navigations = state.navigations.saturating_add(1);
        });
    }

    pub(super) fn set_boot_phase(phase: &str, detail: &str) {
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.phase = phase.to_string();
            state.detail = detail.to_string();
            if phase != "error" {
                state.last_error = None;
            }
        });
        tracing::debug!(phase, detail, "upgrade page boot phase");
    }

    pub(super) fn set_boot_error(message: &str) {
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.phase = "error".to_string();
            state.detail = "startup failed".to_string();
            state.last_error = Some(message.to_string());
        });
        tracing::error!(error = message, "admin upgrade page failed to start");
        render_error_state(message);
    }
