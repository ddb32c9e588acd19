//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Per-target filter directives, e.g. `CODON_TABLES_LOG=codon_tables=debug`.
pub const LOG_ENV: &str = "CODON_TABLES_LOG";

static INIT: Once = Once::new();

/// Install a stderr fmt subscriber filtered by `CODON_TABLES_LOG`, falling
/// back to `default_directive`. Only the first call has any effect.
pub fn init_tracing(default_directive: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
