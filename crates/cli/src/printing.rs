use vintsim_sim::simulation::{Events, ProbabilityConfig};

use crate::args::SimulateArgs;

pub fn print_parameters(args: &SimulateArgs, config: &ProbabilityConfig) {
    println!("\n📋 Simulation Configuration");
    println!("  • Host: {} [--host]", args.host.display());
    println!("  • Virus: {} [--virus]", args.virus.display());
    println!("  • Integrations: {} [--int-num]", args.int_num);
    println!("  • Episomes: {} [--epi-num]", args.epi_num);
    println!("  • Random Seed: {} [--seed]", args.seed);
    match args.max_len {
        Some(max_len) => println!(
            "  • Fragment Length: {}-{max_len} bp [--min-len, --max-len]",
            args.min_len
        ),
        None => println!(
            "  • Fragment Length: at least {} bp [--min-len]",
            args.min_len
        ),
    }
    println!("  • Minimum Separation: {} bp [--min-sep]", args.min_sep);
    println!("  • Max Attempts: {} [--max-attempts]", args.max_attempts);

    print_probabilities(config);
}

pub fn print_probabilities(config: &ProbabilityConfig) {
    println!("\n🦠 Viral Fragment");
    println!("  • Whole Virus: {:.2} [--p-whole]", config.p_whole);
    println!(
        "  • Rearrangement: {:.2}, mean {:.1} breakpoints [--p-rearrange, --lambda-split]",
        config.p_rearrange, config.lambda_split
    );
    println!("  • Internal Deletion: {:.2} [--p-delete]", config.p_delete);

    println!("\n🔗 Junctions");
    println!("  • Gap: {:.2} [--p-gap]", config.p_gap);
    println!("  • Overlap: {:.2} [--p-overlap]", config.p_overlap);
    println!(
        "  • Mean Length: {:.1} bp [--lambda-junction]",
        config.lambda_junction
    );

    println!("\n✂️  Host Deletion");
    println!(
        "  • Probability: {:.2}, mean {:.1} bp [--p-host-del, --lambda-host-del]",
        config.p_host_del, config.lambda_host_del
    );
}

pub fn print_summary(events: &Events, args: &SimulateArgs) {
    let integrations = events.integrations();
    let episomes = events.episomes();

    println!("\n✓ Simulation complete!");
    println!("  Integrations: {}", integrations.len());
    println!(
        "    - whole: {}, rearranged: {}, with deletion: {}",
        integrations.iter().filter(|e| e.fragment.whole).count(),
        integrations
            .iter()
            .filter(|e| e.fragment.is_rearranged())
            .count(),
        integrations.iter().filter(|e| e.fragment.is_deleted()).count()
    );
    println!(
        "    - host bases deleted: {}",
        integrations.iter().map(|e| e.host_deleted()).sum::<usize>()
    );
    println!("  Episomes: {}", episomes.len());
    println!(
        "    - circular: {}",
        episomes.iter().filter(|e| e.circular).count()
    );

    println!("\n📁 Output");
    println!("  • Genome: {}", args.fasta_out.display());
    println!("  • Integrations: {}", args.int_info.display());
    println!("  • Episomes: {}", args.epi_info.display());
}
