//! Log output setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr logger. `RUST_LOG` overrides the default level.
pub fn init(verbose: bool) {
    let default = if verbose {
        "chemenrich=debug,chemenrich_cli=debug"
    } else {
        "chemenrich=info,chemenrich_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
