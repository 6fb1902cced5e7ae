/// Tracing subscriber setup
///
/// Filter directives come from `CLE_DU_TEMPS_LOG`, then `RUST_LOG`, and
/// default to info-level output for this crate and warnings for everything
/// else (iced and wgpu are chatty at info).

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CLE_DU_TEMPS_LOG";
const DEFAULT_DIRECTIVES: &str = "cle_du_temps=info,warn";

/// Install the global subscriber writing to stderr.
///
/// Call once, first thing in `main`.
pub fn init() {
    let filter = build_env_filter();
    let ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .with_target(true)
                .compact(),
        )
        .init();
}

fn build_env_filter() -> EnvFilter {
    // An unparsable value falls through instead of aborting startup
    if let Some(filter) = std::env::var(LOG_ENV)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
    {
        return filter;
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}
