use std::fs::{self, File};
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::fmt::format::FmtSpan;

/// `$CACHE_DIR/sysglance/sysglance.jsonl`, or the temp dir when there is no
/// cache dir.
pub fn log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("sysglance")
        .join("sysglance.jsonl")
}

/// Sends `tracing` output to `output_path` as JSON lines. The terminal is
/// owned by the dashboard, so nothing is ever written to stdout.
pub fn init_tracing_json(output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let file = File::create(output_path)?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::sync::Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
