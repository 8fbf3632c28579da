pub mod build_info;
pub mod persistence;

use std::sync::Once;

use tracing_subscriber::filter::LevelFilter;

static TRACING_INIT: Once = Once::new();

/// Default directive applied when `RUST_LOG` does not mention the crate.
pub const DEFAULT_LOG_DIRECTIVE: &str = "spendview=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// Logs go to stderr so shell output on stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();
        if let Ok(directive) = DEFAULT_LOG_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
