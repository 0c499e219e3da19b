//! tracing setup
//!
//! Events go to stderr. On Android they are also forwarded through the `log`
//! facade to logcat under [`LOG_TAG`].

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// logcat tag
pub const LOG_TAG: &str = "FingerprintInscreenService";

static LIBRARY_INIT: Once = Once::new();

/// Install the global subscriber. Quiet by default, verbose with `debug`.
/// `RUST_LOG` overrides both.
pub fn init(debug: bool) {
    let default_filter = if debug {
        "debug,fod_inscreen=debug"
    } else {
        "warn,fod_inscreen=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // tracing is built with `log-always`, so every event also becomes a log
    // record for android_logger to pick up
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag(LOG_TAG)
            .with_max_level(if debug {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            }),
    );

    // Another subscriber may already be installed by the host process
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Called from the C ABI the first time an adapter is created
pub(crate) fn init_library() {
    LIBRARY_INIT.call_once(|| init(false));
}
