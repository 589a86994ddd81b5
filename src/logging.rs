//! Diagnostic logging to stderr via `tracing`.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber once per process. A malformed filter falls
/// back to the default rather than aborting the launch.
pub fn init_logging(filter: Option<&str>) {
    INIT.get_or_init(|| {
        let env_filter = filter
            .and_then(|f| EnvFilter::try_new(f).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(false)
            .with_level(true)
            .with_file(false)
            .with_line_number(false);

        // Another subscriber may already be installed (tests); that one wins.
        let _ = tracing_subscriber::registry()
            .with(layer)
            .with(env_filter)
            .try_init();
    });
}
