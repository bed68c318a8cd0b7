use clap::Args;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::defaults;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Host reference (FASTA)
    #[arg(long)]
    pub host: PathBuf,

    /// Virus reference (FASTA)
    #[arg(long)]
    pub virus: PathBuf,

    /// Output FASTA with the mutated host and episomes
    #[arg(long)]
    pub fasta_out: PathBuf,

    /// Output table describing each integration
    #[arg(long)]
    pub int_info: PathBuf,

    /// Output table describing each episome
    #[arg(long)]
    pub epi_info: PathBuf,

    /// Number of integrations
    #[arg(long, default_value_t = defaults::INT_NUM, allow_negative_numbers = true)]
    pub int_num: i64,

    /// Number of episomes
    #[arg(long, default_value_t = defaults::EPI_NUM, allow_negative_numbers = true)]
    pub epi_num: i64,

    /// JSON file with the nine event model parameters
    ///
    /// Individual flags below override values from the file. Without a
    /// file, unspecified parameters take their defaults.
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Probability of inserting a whole virus
    #[arg(long)]
    pub p_whole: Option<f64>,
    /// Probability of rearranging the inserted material
    #[arg(long)]
    pub p_rearrange: Option<f64>,
    /// Probability of an internal deletion in the inserted material
    #[arg(long)]
    pub p_delete: Option<f64>,
    /// Mean number of rearrangement breakpoints
    #[arg(long)]
    pub lambda_split: Option<f64>,
    /// Probability of a junction overlap
    #[arg(long)]
    pub p_overlap: Option<f64>,
    /// Probability of a junction gap
    #[arg(long)]
    pub p_gap: Option<f64>,
    /// Mean length of junction gaps and overlaps
    #[arg(long)]
    pub lambda_junction: Option<f64>,
    /// Probability of deleting host bases at an integration site
    #[arg(long)]
    pub p_host_del: Option<f64>,
    /// Mean number of deleted host bases
    #[arg(long)]
    pub lambda_host_del: Option<f64>,

    /// Random seed
    #[arg(long, default_value_t = defaults::SEED, allow_negative_numbers = true)]
    pub seed: i64,

    /// Minimum length of partial virus fragments
    #[arg(long, default_value_t = defaults::MIN_LEN, allow_negative_numbers = true)]
    pub min_len: i64,

    /// Maximum length of partial virus fragments (default: virus length)
    #[arg(long, allow_negative_numbers = true)]
    pub max_len: Option<i64>,

    /// Minimum distance between integrations
    #[arg(long, default_value_t = defaults::MIN_SEP, allow_negative_numbers = true)]
    pub min_sep: i64,

    /// Consecutive failed placements before giving up
    #[arg(long, default_value_t = defaults::MAX_ATTEMPTS, allow_negative_numbers = true)]
    pub max_attempts: i64,
}

impl SimulateArgs {
    /// Parameters given on the command line, keyed like the parameter file.
    pub fn probability_overrides(&self) -> HashMap<String, f64> {
        [
            ("p_whole", self.p_whole),
            ("p_rearrange", self.p_rearrange),
            ("p_delete", self.p_delete),
            ("lambda_split", self.lambda_split),
            ("p_overlap", self.p_overlap),
            ("p_gap", self.p_gap),
            ("lambda_junction", self.lambda_junction),
            ("p_host_del", self.p_host_del),
            ("lambda_host_del", self.lambda_host_del),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect()
    }
}
