//! Logging Bootstrap
//!
//! Installs the rolling logger as the `tracing` subscriber. Every line is
//! mirrored to the browser console and the most recent ones stay readable
//! from the admin dashboard.

use std::sync::OnceLock;

use rolling_logger::{LogLine, RollingLogger, DEFAULT_CAPACITY};
use tracing::Level;
use wasm_bindgen::JsValue;

use crate::config::Config;

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

fn to_console(level: Level, line: &str) {
    let line = JsValue::from_str(line);
    if level == Level::ERROR {
        web_sys::console::error_1(&line);
    } else if level == Level::WARN {
        web_sys::console::warn_1(&line);
    } else if level == Level::INFO {
        web_sys::console::info_1(&line);
    } else {
        web_sys::console::debug_1(&line);
    }
}

pub fn init(config: &Config) {
    let logger = LOGGER.get_or_init(|| RollingLogger::with_sink(DEFAULT_CAPACITY, to_console));
    if let Err(e) = logger.init(config.log_level) {
        web_sys::console::warn_1(&JsValue::from_str(&e));
    }
}

/// The `n` most recent lines, oldest first; empty before [`init`]
pub fn recent_lines(n: usize) -> Vec<LogLine> {
    LOGGER.get().map(|logger| logger.tail(n)).unwrap_or_default()
}
