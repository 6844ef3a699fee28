//! Process-wide tracing setup.
//!
//! In the browser, formatted events go to the developer console; natively
//! they go to stderr. Installing twice is a no-op that reports the level
//! chosen by the first call.

use std::sync::OnceLock;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, Layer, Registry};

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Level string is not one of off/error/warn/info/debug/trace
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),
    /// Another global subscriber is already installed
    #[error("failed to install the global subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

static INSTALLED: OnceLock<LevelFilter> = OnceLock::new();

/// Default level for the browser build.
pub const DEFAULT_LEVEL: &str = "info";

/// Install the global subscriber at `level`.
///
/// Returns the level actually in effect.
pub fn init(level: &str) -> Result<LevelFilter, LoggingError> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| LoggingError::InvalidLevel(level.to_string()))?;
    if let Some(installed) = INSTALLED.get() {
        return Ok(*installed);
    }

    let layer = fmt::layer()
        .without_time()
        .with_target(true)
        .with_writer(writer())
        .with_filter(filter);
    tracing::subscriber::set_global_default(Registry::default().with(layer))?;

    let installed = *INSTALLED.get_or_init(|| filter);
    tracing::info!(level = %installed, "logging initialized");
    Ok(installed)
}

#[cfg(not(target_arch = "wasm32"))]
fn writer() -> fn() -> std::io::Stderr {
    std::io::stderr
}

#[cfg(target_arch = "wasm32")]
fn writer() -> console::MakeConsoleWriter {
    console::MakeConsoleWriter
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing_subscriber::fmt::MakeWriter;

    /// Hands out one buffered writer per event.
    #[derive(Debug, Clone, Copy, Default)]
    pub(super) struct MakeConsoleWriter;

    /// Buffers one formatted event and logs it on drop.
    pub(super) struct ConsoleWriter {
        buf: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            if self.buf.is_empty() {
                return;
            }
            let line = String::from_utf8_lossy(&self.buf);
            web_sys::console::log_1(&line.trim_end().into());
        }
    }

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter { buf: Vec::new() }
        }
    }
}
