use anyhow::{Context, Result};
use std::path::Path;
use vintsim_sim::events::{check_junction_length, expected_junction_bases};
use vintsim_sim::simulation::ProbabilityConfig;

use crate::printing::print_probabilities;

pub fn validate_params(params: &Path, min_len: i64) -> Result<()> {
    println!("🔍 Validating parameters: {}", params.display());

    if min_len <= 0 {
        anyhow::bail!("Minimum fragment length must be positive, got {min_len}");
    }

    let config = ProbabilityConfig::from_path(params)
        .with_context(|| format!("Failed to load {}", params.display()))?;
    println!("✓ All parameters present");

    config
        .check_ranges()
        .context("Parameter out of range")?;
    println!("✓ Parameters in range");

    check_junction_length(&config, min_len as usize).context("Junctions too long")?;
    println!(
        "✓ Expected junction length {:.2} bp fits minimum fragment length {min_len} bp",
        expected_junction_bases(&config)
    );

    print_probabilities(&config);
    Ok(())
}
