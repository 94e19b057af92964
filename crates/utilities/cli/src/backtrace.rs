//! Helper to set the backtrace env var.

use std::sync::Once;

static INIT: Once = Once::new();

/// Sets `RUST_BACKTRACE=1` unless a value was provided explicitly.
///
/// Must be called at startup, before the async runtime spawns any threads.
pub fn enable() {
    INIT.call_once(|| {
        if std::env::var_os("RUST_BACKTRACE").is_none() {
            // SAFETY: runs once, on the main thread, before any other thread reads the environment.
            unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_keeps_explicit_value() {
        let before = std::env::var_os("RUST_BACKTRACE");
        enable();
        match before {
            Some(value) => assert_eq!(std::env::var_os("RUST_BACKTRACE"), Some(value)),
            None => assert_eq!(std::env::var("RUST_BACKTRACE").unwrap(), "1"),
        }
    }
}
