//! Logger Module - `log` facade backends
//!
//! On wasm, records go to the browser console through [`ConsoleLogger`].
//! Everywhere else `env_logger` handles them, so `RUST_LOG` overrides the
//! level passed to [`init`]. Install once at startup:
//!
//! ```ignore
//! folio_ui::logger::init(log::LevelFilter::Info);
//! log::info!("page ready");
//! ```

use log::{Level, LevelFilter};

/// Format a console line as `[LEVEL target] message`.
pub fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{level} {target}] {message}")
}

// =============================================================================
// BROWSER CONSOLE
// =============================================================================

#[cfg(target_arch = "wasm32")]
pub use console::ConsoleLogger;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use wasm_bindgen::JsValue;
    use web_sys::console;

    use super::format_record;

    pub struct ConsoleLogger {
        level: LevelFilter,
    }

    impl ConsoleLogger {
        pub const fn new(level: LevelFilter) -> Self {
            Self { level }
        }
    }

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= self.level
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = format_record(record.level(), record.target(), &record.args().to_string());
            let value = JsValue::from_str(&line);
            match record.level() {
                Level::Error => console::error_1(&value),
                Level::Warn => console::warn_1(&value),
                Level::Info => console::info_1(&value),
                Level::Debug | Level::Trace => console::debug_1(&value),
            }
        }

        fn flush(&self) {}
    }
}

// =============================================================================
// INIT
// =============================================================================

/// Install the console logger. Later calls are no-ops.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    let logger: &'static ConsoleLogger = Box::leak(Box::new(ConsoleLogger::new(level)));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

/// Install `env_logger` at `level` unless `RUST_LOG` says otherwise.
/// Later calls are no-ops.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    let _ = env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
