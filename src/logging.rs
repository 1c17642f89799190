use color_eyre::Result;
use tracing_subscriber::{
    fmt,
    prelude::*,
    EnvFilter,
};

/// Logs to stderr, leaving stdout to the tables printed by the commands.
///
/// `RUST_LOG` takes precedence; otherwise `info`, or `debug` with `--verbose`.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_filter(filter),
        )
        .with(tracing_error::ErrorLayer::default())
        .try_init()?;
    Ok(())
}
