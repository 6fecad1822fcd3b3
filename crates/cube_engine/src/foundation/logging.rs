//! Logging utilities and structured logging support

use std::sync::Once;

pub use log::{debug, error, info, trace, warn};

static INIT: Once = Once::new();

/// Initialize the logging system
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. `"info"`,
/// `"cube_engine=debug"`) is used. Calls after the first are no-ops.
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or(default_level.to_owned());
        // A host may already have installed its own logger.
        if env_logger::Builder::from_env(env).try_init().is_err() {
            log::debug!("Logger already installed; keeping existing logger");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("warn");
        init("trace");
        log::info!("logging initialized twice without panicking");
    }
}
