//! Kite command-line runner.
//!
//! The `kite` binary is a thin wrapper over this library: [`parse_args`]
//! turns the argument list into a [`Command`], and each command handler in
//! [`commands`] returns the process exit status instead of exiting, so the
//! whole pipeline can be driven from tests.

pub mod commands;
mod options;

pub use options::{parse_args, CliError, Command, RunOptions};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Does nothing unless `KITE_LOG` is set; its value is an `EnvFilter`
/// directive such as `kite_eval=debug`. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let Ok(directives) = std::env::var("KITE_LOG") else {
            return;
        };
        let filter = EnvFilter::new(directives);
        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_writer(std::io::stderr)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .with(filter)
            .init();
    });
}
