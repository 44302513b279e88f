use super::*;

    fn create_html_element(
        document: &web_sys::Document,
        tag: &str,
        id: &str,
    ) -> Result<HtmlElement, ShellError> {
        let element = document
            .create_element(tag)
            .map_err(|_| ShellError::Dom("failed to create element"))?;
        element.set_id(id);
        element
            .dyn_into::<HtmlElement>()
            .map_err(|_| ShellError::Dom("created element is not HtmlElement"))
    }

    fn apply_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), ShellError> {
        let style = element.style();
        for (property, value) in styles {
            style
                .set_property(property, value)
                .map_err(|_| ShellError::Dom("failed to style element"))?;
        }
        Ok(())
    }

    fn append(parent: &HtmlElement, child: &HtmlElement) -> Result<(), ShellError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|_| ShellError::Dom("failed to append element"))
    }

    pub(super) fn ensure_page_root(document: &web_sys::Document) -> Result<HtmlElement, ShellError> {
        if let Some(existing) = document.get_element_by_id(PAGE_ROOT_ID) {
            return existing
                .dyn_into::<HtmlElement>()
                .map_err(|_| ShellError::Dom("page root exists but is not HtmlElement"));
        }

        let body = document.body().ok_or(ShellError::Unavailable("document body"))?;
        let root = create_html_element(document, "div", PAGE_ROOT_ID)?;
        root.set_attribute(PAGE_QA_ATTRIBUTE, PAGE_QA_VALUE)
            .map_err(|_| ShellError::Dom("failed to tag page root"))?;
        apply_styles(
            &root,
            &[
                ("display", "flex"),
                ("flex-direction", "column"),
                ("width", "100%"),
                ("height", "100vh"),
            ],
        )?;
        append(&body, &root)?;
        Ok(root)
    }

    pub(super) fn clear_page_body(root: &HtmlElement) {
        root.set_inner_html("");
    }

    pub(super) fn render_header(
        document: &web_sys::Document,
        root: &HtmlElement,
    ) -> Result<(), ShellError> {
        let header = create_html_element(document, "header", PAGE_HEADER_ID)?;
        apply_styles(&header, &[("min-height", "64px"), ("flex-shrink", "0")])?;
        let title = document
            .create_element("h1")
            .map_err(|_| ShellError::Dom("failed to create header title"))?;
        header
            .append_child(&title)
            .map_err(|_| ShellError::Dom("failed to append header title"))?;
        append(root, &header)
    }

    pub(super) fn render_offline_state(
        document: &web_sys::Document,
        root: &HtmlElement,
    ) -> Result<(), ShellError> {
        let container = create_html_element(document, "section", PAGE_OFFLINE_ID)?;
        apply_styles(
            &container,
            &[
                ("display", "flex"),
                ("flex-direction", "column"),
                ("align-items", "center"),
                ("justify-content", "center"),
                ("flex-grow", "1"),
                ("text-align", "center"),
            ],
        )?;

        let title = create_html_element(document, "h2", &format!("{PAGE_OFFLINE_ID}-title"))?;
        title.set_inner_text(OFFLINE_TITLE);
        let body = create_html_element(document, "p", &format!("{PAGE_OFFLINE_ID}-body"))?;
        body.set_inner_text(OFFLINE_BODY);
        apply_styles(&body, &[("color", MUTED_TEXT_COLOR)])?;

        append(&container, &title)?;
        append(&container, &body)?;
        append(root, &container)
    }

    pub(super) fn render_loader(
        document: &web_sys::Document,
        root: &HtmlElement,
        visible: bool,
    ) -> Result<(), ShellError> {
        let loader = create_html_element(document, "div", PAGE_LOADER_ID)?;
        loader
            .set_attribute("role", "progressbar")
            .map_err(|_| ShellError::Dom("failed to label loader"))?;
        loader.set_inner_text(LOADER_TEXT);
        apply_styles(
            &loader,
            &[
                ("padding-block", "24px"),
                ("text-align", "center"),
                ("color", MUTED_TEXT_COLOR),
            ],
        )?;
        append(root, &loader)?;
        set_loader_visible(visible);
        Ok(())
    }

    pub(super) fn set_loader_visible(visible: bool) {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let Some(loader) = document.get_element_by_id(PAGE_LOADER_ID) else {
            return;
        };
        if let Ok(loader) = loader.dyn_into::<HtmlElement>() {
            let display = if visible { "block" } else { "none" };
            if loader.style().set_property("display", display).is_err() {
                tracing::warn!(display, "failed to toggle upgrade loader");
            }
        }
    }

    /// Builds the iframe detached so its `load` handler can be set first.
    pub(super) fn create_frame(
        document: &web_sys::Document,
        src: &str,
    ) -> Result<HtmlIFrameElement, ShellError> {
        let frame = document
            .create_element("iframe")
            .map_err(|_| ShellError::Dom("failed to create upgrade frame"))?
            .dyn_into::<HtmlIFrameElement>()
            .map_err(|_| ShellError::Dom("upgrade frame is not HtmlIFrameElement"))?;
        frame.set_id(PAGE_FRAME_ID);
        frame.set_src(src);
        apply_styles(
            &frame,
            &[("width", "100%"), ("height", "100%"), ("border", "none")],
        )?;
        Ok(frame)
    }

    pub(super) fn render_error_state(message: &str) {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let Ok(root) = ensure_page_root(&document) else {
            return;
        };
        clear_page_body(&root);
        let Ok(status) = create_html_element(&document, "p", PAGE_STATUS_ID) else {
            return;
        };
        status.set_inner_text(&format!("Upgrade page unavailable: {message}"));
        if let Err(error) = apply_styles(
            &status,
            &[("color", ERROR_TEXT_COLOR), ("padding", "24px")],
        ) {
            tracing::warn!(%error, "failed to style error state");
        }
        if let Err(error) = append(&root, &status) {
            tracing::warn!(%error, "failed to attach error state");
        }
    }
