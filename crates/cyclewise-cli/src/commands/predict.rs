//! Prediction for the ongoing cycle.

use clap::Args;
use cyclewise_core::analyze;

use super::{load_config, InputArgs};

#[derive(Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Print the prediction as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PredictArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();
    let observations = args.input.load()?;
    let options = config.analysis_options(args.input.reference_date()?);
    let analysis = analyze(&observations, &options);

    let Some(prediction) = analysis.prediction else {
        if args.json {
            println!("null");
        } else {
            println!("No period logged yet.");
        }
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    let window = &prediction.fertile_window;
    println!(
        "Cycle day {} ({})",
        prediction.current_cycle_day,
        prediction.phase.label()
    );
    println!(
        "Ovulation: day {} ({}% confidence, {} cycles)",
        prediction.display_ovulation_day(),
        prediction.confidence,
        prediction.based_on_cycles
    );
    match prediction.days_until_ovulation {
        d if d > 0 => println!("  in {d} days"),
        0 => println!("  today"),
        d => println!("  {} days ago", -d),
    }
    println!(
        "Fertile window: days {}-{}{}",
        window.start,
        window.end,
        if prediction.is_fertile_today { " (fertile today)" } else { "" }
    );
    let next = &prediction.next_period;
    println!(
        "Next period: {} ({})",
        next.expected_start.format("%Y-%m-%d"),
        match next.days_until {
            d if d > 0 => format!("in {d} days"),
            0 => "today".to_string(),
            d => format!("{} days late", -d),
        }
    );
    Ok(())
}
