#[cfg(any(target_arch = "wasm32", test))]
mod console_log;
#[cfg(any(target_arch = "wasm32", test))]
mod locale;
#[cfg(any(target_arch = "wasm32", test))]
mod page_lifecycle;
#[cfg(target_arch = "wasm32")]
mod wasm_constants;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use serde::Serialize;
    use upgrade_page_core::{
        HostNavigator, MessageChannel, MessageOutcome, NavigationMessageListener, PageBody,
        PageContext, ScopedSubscription, SiteUrlResolver, UpgradePage, UpgradePageConfig,
        UpgradePageError,
    };
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlElement, HtmlIFrameElement, MessageEvent};

    use crate::console_log::init_console_tracing;
    use crate::locale::pick_locale;
    use crate::page_lifecycle::pagehide_tears_down;
    use crate::wasm_constants::*;

    mod dom;
    mod lifecycle;
    mod messaging;

    use dom::*;
    use lifecycle::*;
    use messaging::*;

    thread_local! {
        static PAGE: RefCell<Option<MountedPage>> = const { RefCell::new(None) };
        static DIAGNOSTICS: RefCell<BootDiagnostics> = RefCell::new(BootDiagnostics::default());
        static PAGEHIDE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
    }

    #[derive(Debug, Clone, Default, Serialize)]
    struct BootDiagnostics {
        phase: String,
        detail: String,
        last_error: Option<String>,
        listener_active: bool,
        navigations: u32,
    }

    #[derive(Debug, thiserror::Error)]
    pub(super) enum ShellError {
        #[error("{0} is unavailable")]
        Unavailable(&'static str),
        #[error("{0}")]
        Dom(&'static str),
        #[error(transparent)]
        Page(#[from] UpgradePageError),
    }

    /// Everything owned by the mounted page view. Dropping it tears the view
    /// down: the message listener is removed and the frame loses its handler.
    struct MountedPage {
        page: UpgradePage,
        frame: Option<HtmlIFrameElement>,
        load_handler: Option<Closure<dyn FnMut(web_sys::Event)>>,
        subscription: Option<ScopedSubscription<WindowMessageChannel>>,
    }

    impl Drop for MountedPage {
        fn drop(&mut self) {
            if let Some(frame) = &self.frame {
                frame.set_onload(None);
            }
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        set_boot_phase("booting", "initializing admin upgrade page");
        if let Err(error) = boot() {
            set_boot_error(&error.to_string());
        }
    }

    /// Unmounts the page view. Safe to call more than once.
    #[wasm_bindgen]
    pub fn teardown() {
        let previous = PAGE.with(|slot| slot.borrow_mut().take());
        if previous.is_some() {
            drop(previous);
            DIAGNOSTICS.with(|state| state.borrow_mut().listener_active = false);
            tracing::debug!("upgrade page torn down");
        }
    }

    #[wasm_bindgen]
    pub fn boot_diagnostics_json() -> String {
        DIAGNOSTICS.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| {
                "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
            })
        })
    }

    #[wasm_bindgen]
    pub fn page_state_json() -> String {
        PAGE.with(|slot| {
            let slot = slot.borrow();
            let Some(mounted) = slot.as_ref() else {
                return "null".to_string();
            };
            serde_json::json!({
                "page": &mounted.page,
                "view": mounted.page.view(),
            })
            .to_string()
        })
    }

    fn boot() -> Result<(), ShellError> {
        let window = web_sys::window().ok_or(ShellError::Unavailable("window"))?;
        let config = UpgradePageConfig::from_json(read_config_global(&window).as_deref())?;
        if !init_console_tracing(&config.log_filter) {
            tracing::debug!("tracing subscriber already installed");
        }
        set_boot_phase("config", "configuration loaded");

        let inputs = read_page_inputs(&window, &config)?;
        let context = PageContext::from_location(
            &inputs.pathname,
            &inputs.search,
            &inputs.locale,
            inputs.is_mobile,
            inputs.online,
        )?;
        let table = config.destination_table()?;
        let resolver = config.site_resolver(&inputs.origin)?;
        let page = UpgradePage::new(context, &table);
        tracing::info!(
            variant = %page.context().variant,
            destination = %page.destination(),
            online = page.context().online,
            "mounting upgrade page"
        );

        mount_page(&window, page, resolver)?;
        install_pagehide_handler(&window);
        set_boot_phase("ready", "upgrade page mounted");
        Ok(())
    }

    fn mount_page(
        window: &web_sys::Window,
        page: UpgradePage,
        resolver: SiteUrlResolver,
    ) -> Result<(), ShellError> {
        teardown();

        let document = window
            .document()
            .ok_or(ShellError::Unavailable("document"))?;
        let root = ensure_page_root(&document)?;
        clear_page_body(&root);

        let view = page.view();
        if view.show_header {
            render_header(&document, &root)?;
        }

        let mut mounted = MountedPage {
            page,
            frame: None,
            load_handler: None,
            subscription: None,
        };

        match view.body {
            PageBody::Offline => render_offline_state(&document, &root)?,
            PageBody::Embedded { src, loading } => {
                render_loader(&document, &root, loading)?;
                let frame = create_frame(&document, &src)?;
                let load_handler =
                    Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                        on_frame_loaded();
                    }));
                frame.set_onload(Some(load_handler.as_ref().unchecked_ref()));
                mounted.subscription =
                    Some(subscribe_navigation_messages(window, frame.clone(), resolver)?);
                root.append_child(&frame)
                    .map_err(|_| ShellError::Dom("failed to append upgrade frame"))?;
                mounted.frame = Some(frame);
                mounted.load_handler = Some(load_handler);
                DIAGNOSTICS.with(|state| state.borrow_mut().listener_active = true);
            }
        }

        PAGE.with(|slot| *slot.borrow_mut() = Some(mounted));
        Ok(())
    }

    fn on_frame_loaded() {
        let loading = PAGE.with(|slot| {
            let mut slot = slot.borrow_mut();
            let mounted = slot.as_mut()?;
            if mounted.page.mark_frame_loaded() {
                tracing::debug!("upgrade frame finished loading");
            }
            match mounted.page.view().body {
                PageBody::Embedded { loading, .. } => Some(loading),
                PageBody::Offline => None,
            }
        });
        if let Some(loading) = loading {
            set_loader_visible(loading);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{boot_diagnostics_json, page_state_json, teardown};

#[cfg(not(target_arch = "wasm32"))]
pub fn boot_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"upgrade page diagnostics only available on wasm\"}"
        .to_string()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_state_json() -> String {
    "null".to_string()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_diagnostics_report_native_phase() {
        let value: serde_json::Value =
            serde_json::from_str(&boot_diagnostics_json()).expect("diagnostics are json");
        assert_eq!(value["phase"], "native");
        assert_eq!(page_state_json(), "null");
    }
}
