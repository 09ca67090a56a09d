//! Logging setup for binaries embedding the page runtime

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global `fmt` subscriber
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` when verbose
/// and `info` when not. Calling this twice is harmless.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init_logging(false);
        init_logging(true);
        tracing::debug!("still running");
    }
}
