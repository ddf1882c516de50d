//! Log callback used by the token array constructors.
//!
//! The host editor installs one process-wide callback; with none installed,
//! [`emit_log`] is a lock and a branch.

use std::sync::{Mutex, OnceLock};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback, replacing any previous one.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Emit a log message to the registered callback.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Single test: the callback is process-global and tests run in parallel.
    #[test]
    fn test_log_callback_lifecycle() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        set_log_callback(move |level, msg| {
            if level == LogLevel::Info && msg == "event-test-marker" {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            }
        });
        emit_log(LogLevel::Info, "event-test-marker");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        clear_log_callback();
        emit_log(LogLevel::Info, "event-test-marker");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
