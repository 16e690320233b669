//! Logging to the browser console.
//!
//! Records go through the `log` facade and are dispatched by `fern`, which
//! formats each line with a UTC timestamp and forwards it to the matching
//! `console` method. Host builds write to stderr instead.
//!
//! The dispatch itself passes every level; filtering is done through
//! [`log::set_max_level`] so that a later [`init`] can change it.

use std::fmt;

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter};

/// Installs the console logger on the first call and sets the active level on
/// every call.
pub fn init(level: LevelFilter) {
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}",
                format_line(Utc::now(), record.level(), record.target(), message)
            ))
        })
        .level(LevelFilter::Trace)
        .chain(fern::Output::call(|record| {
            write_console(record.level(), &record.args().to_string())
        }))
        .apply();

    log::set_max_level(level);
    if result.is_err() {
        log::debug!("logger already installed, level set to {level}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&line),
        Level::Warn => web_sys::console::warn_1(&line),
        Level::Info => web_sys::console::info_1(&line),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
    }
}

/// `[HH:MM:SS.mmm LEVEL target] message`
pub fn format_line(
    now: DateTime<Utc>,
    level: Level,
    target: &str,
    message: &fmt::Arguments,
) -> String {
    format!("[{} {} {}] {}", now.format("%H:%M:%S%.3f"), level, target, message)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_later_init_changes_level() {
        init(LevelFilter::Warn);
        assert_eq!(log::max_level(), LevelFilter::Warn);

        init(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(log::log_enabled!(Level::Debug));

        init(LevelFilter::Error);
        assert!(!log::log_enabled!(Level::Warn));
    }

    #[test]
    fn test_format_line() {
        let now = Utc
            .with_ymd_and_hms(2024, 5, 1, 13, 4, 9)
            .unwrap()
            + chrono::Duration::milliseconds(27);
        let line = format_line(now, Level::Warn, "trispin::app", &format_args!("{} frames", 3));
        assert_eq!(line, "[13:04:09.027 WARN trispin::app] 3 frames");
    }
}
