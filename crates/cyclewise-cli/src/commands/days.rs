//! Per-day cycle numbering.

use clap::Args;
use cyclewise_core::assign_cycle_days;

use super::InputArgs;

#[derive(Args)]
pub struct DaysArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Print assignments as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: DaysArgs) -> Result<(), Box<dyn std::error::Error>> {
    let observations = args.input.load()?;
    let assignments = assign_cycle_days(&observations);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assignments)?);
        return Ok(());
    }

    for assignment in &assignments {
        let day = assignment
            .cycle_day
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        let marker = if assignment.starts_cycle { "  new cycle" } else { "" };
        println!("{}  {:>3}{marker}", assignment.date, day);
    }
    Ok(())
}
