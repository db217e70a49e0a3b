//! Tracing setup shared by the binaries.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Load `./.env`, then install a fmt subscriber filtered by `RUST_LOG`
/// (default `info`).
pub fn init() -> anyhow::Result<()> {
    load_env_file(Path::new(".env"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Export the variables in `path` without overriding ones already set.
/// A missing file is not an error.
pub fn load_env_file(path: &Path) -> anyhow::Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(anyhow::anyhow!("failed to read {}: {e}", path.display())),
    }
}

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
