use anyhow::{Context, Result};
use std::path::Path;

use crate::defaults;

/// Write the default event model as a JSON parameter file.
pub fn write_params(output: &Path) -> Result<()> {
    let config = defaults::probability_config();
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize parameters")?;
    std::fs::write(output, json + "\n")
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("✓ Wrote default parameters to {}", output.display());
    Ok(())
}
