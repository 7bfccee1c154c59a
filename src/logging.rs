use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Routes `log` records to stderr so stdout carries only the status report.
///
/// `RUST_LOG` wins over the default filter; `verbose` lowers that default
/// from `warn` to `debug`.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose {
        "abc_cost_model=debug"
    } else {
        "warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(())
}
