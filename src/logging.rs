#[cfg(not(target_arch = "wasm32"))]
use log::LevelFilter;

/// Initialize logging for the CLI binaries and the WASM module.
///
/// - **Native:** `Debug` when `debug_enabled`, `Info` otherwise; `RUST_LOG` overrides both.
///   Calling it a second time is a no-op.
/// - **WASM:** logs to the browser console at `Debug` or `Info`.
pub fn init_logger(debug_enabled: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let level = if debug_enabled { log::Level::Debug } else { log::Level::Info };

        match console_log::init_with_level(level) {
            Ok(()) => log::info!("WASM logger initialized at {level:?} level"),
            Err(e) => {
                // keep running without logs rather than failing module start-up
                let msg = format!("Failed to initialize console_log: {e}. Logging will be unavailable.");
                web_sys::console::error_1(&msg.into());
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let level = if debug_enabled { LevelFilter::Debug } else { LevelFilter::Info };

        let mut builder = env_logger::Builder::new();
        builder
            .filter(None, level)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false);

        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        if builder.try_init().is_ok() {
            log::debug!("native logger initialized at {level:?} level");
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice_is_harmless() {
        init_logger(true);
        init_logger(false);
        log::debug!("still logging");
    }
}
