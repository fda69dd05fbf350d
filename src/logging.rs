use tracing_subscriber::EnvFilter;

/// Install the stderr diagnostics subscriber.
///
/// Defaults to `warn` so routine runs stay quiet; set `RUST_LOG` (e.g.
/// `RUST_LOG=docs_manifest=trace`) to see every indexed and skipped file.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()?;

    Ok(())
}
