use anyhow::{Context, Result};
use std::collections::HashMap;
use vintsim_sim::simulation::{Events, GenerationOptions};

use crate::args::SimulateArgs;
use crate::defaults;
use crate::printing::{print_parameters, print_summary};

/// Collect the event model parameters: the parameter file if one is given,
/// the defaults otherwise, with command line flags on top.
pub fn load_probabilities(args: &SimulateArgs) -> Result<HashMap<String, f64>> {
    let mut probs = match &args.params {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read parameter file {}", path.display()))?;
            serde_json::from_str::<HashMap<String, f64>>(&text)
                .with_context(|| format!("Failed to parse parameter file {}", path.display()))?
        }
        None => defaults::probability_config().to_map(),
    };
    probs.extend(args.probability_overrides());
    Ok(probs)
}

pub fn run_simulation(args: &SimulateArgs) -> Result<()> {
    println!("🧬 vintsim - Simulating Integrations");
    println!("============================================\n");

    let probs = load_probabilities(args)?;

    let mut events = Events::builder(&args.host, &args.virus)
        .seed(args.seed)
        .min_len(args.min_len)
        .max_len(args.max_len)
        .build()
        .context("Failed to set up simulation")?;
    let config = events
        .check_probs(&probs)
        .context("Invalid event model parameters")?;
    print_parameters(args, &config);

    let options = GenerationOptions {
        max_attempts: args.max_attempts,
        min_sep: args.min_sep,
    };
    events
        .add_integrations_with(&probs, args.int_num, options)
        .context("Failed to generate integrations")?;
    events
        .add_episomes_with(&probs, args.epi_num, args.max_attempts)
        .context("Failed to generate episomes")?;

    events
        .save_fasta(&args.fasta_out)
        .with_context(|| format!("Failed to write {}", args.fasta_out.display()))?;
    events
        .save_integrations_info(&args.int_info)
        .with_context(|| format!("Failed to write {}", args.int_info.display()))?;
    events
        .save_episomes_info(&args.epi_info)
        .with_context(|| format!("Failed to write {}", args.epi_info.display()))?;

    print_summary(&events, args);
    Ok(())
}
