/// Text handed to the browser console for one formatted log event.
pub(crate) fn console_line(buffer: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(buffer);
    let text = text.trim_end_matches(['\r', '\n']);
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use wasm::init_console_tracing;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt::MakeWriter;
    use upgrade_page_core::config::DEFAULT_LOG_FILTER;

    use super::console_line;

    /// Installs a `fmt` subscriber that writes through `console.*`.
    ///
    /// Returns false when a global subscriber was already set.
    pub(crate) fn init_console_tracing(filter: &str) -> bool {
        let env_filter =
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .without_time()
            .with_target(true)
            .with_writer(ConsoleMakeWriter)
            .try_init()
            .is_ok()
    }

    struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter::new(Level::INFO)
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter::new(*meta.level())
        }
    }

    struct ConsoleWriter {
        level: Level,
        buffer: Vec<u8>,
    }

    impl ConsoleWriter {
        fn new(level: Level) -> Self {
            Self {
                level,
                buffer: Vec::new(),
            }
        }
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            let Some(line) = console_line(&self.buffer) else {
                return Ok(());
            };
            self.buffer.clear();
            let line = wasm_bindgen::JsValue::from(line);
            match self.level {
                Level::ERROR => web_sys::console::error_1(&line),
                Level::WARN => web_sys::console::warn_1(&line),
                Level::INFO => web_sys::console::info_1(&line),
                _ => web_sys::console::debug_1(&line),
            }
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let _ = io::Write::flush(self);
        }
    }
}
