//! Full analysis of an observation log.

use clap::Args;
use cyclewise_core::report::{render_cycle_strip, render_cycle_table};
use cyclewise_core::CycleEngine;

use super::{load_config, InputArgs};

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Print the full analysis as JSON
    #[arg(long)]
    pub json: bool,
    /// Ignore cervical mucus observations for this run
    #[arg(long)]
    pub no_mucus: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();
    let observations = args.input.load()?;
    let mut options = config.analysis_options(args.input.reference_date()?);
    if args.no_mucus {
        options.use_mucus_method = false;
    }

    let mut engine = CycleEngine::new();
    let analysis = engine.analyze(&observations, &options);

    if args.json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
        return Ok(());
    }

    if analysis.cycles.is_empty() {
        println!("No period logged yet.");
        return Ok(());
    }

    print!(
        "{}",
        render_cycle_table(analysis, &config.display.uncertainty_marker)
    );
    println!();

    let stats = &analysis.stats;
    if let Some(avg) = stats.average_cycle_length {
        println!(
            "Average cycle: {avg:.1} days over {} cycles (range {}-{})",
            stats.completed_cycles,
            stats.shortest_cycle.unwrap_or_default(),
            stats.longest_cycle.unwrap_or_default()
        );
    }
    match analysis.personal_luteal_phase {
        Some(luteal) => println!("Personal luteal phase: {luteal} days"),
        None => println!("Personal luteal phase: not enough confident cycles"),
    }
    println!();
    print!("{}", render_cycle_strip(analysis));
    Ok(())
}
