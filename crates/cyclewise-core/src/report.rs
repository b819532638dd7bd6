//! Plain-text rendering of an analysis.

use crate::ovulation::calculate_fertile_window;
use crate::pipeline::CycleAnalysis;
use crate::prediction::ConfidenceQualifier;

/// Render one line per cycle with its ovulation estimate.
pub fn render_cycle_table(analysis: &CycleAnalysis, marker: &str) -> String {
    let mut output = String::from("Start       Length  Ovulation  Conf  Method\n");
    output.push_str(&"─".repeat(56));
    output.push('\n');

    for (cycle, estimate) in analysis.cycles.iter().zip(&analysis.estimates) {
        let qualifier = ConfidenceQualifier::for_estimate(estimate, marker);
        let length = if cycle.is_completed {
            cycle.length.to_string()
        } else {
            format!("{}+", cycle.length)
        };
        output.push_str(&format!(
            "{}  {:>6}  {:>9}  {:>3}%  {}\n",
            cycle.start_date.format("%Y-%m-%d"),
            length,
            qualifier.format_day(estimate.ovulation_day),
            estimate.confidence,
            estimate.method.label(),
        ));
    }
    output
}

/// Render the ongoing cycle as a day strip.
///
/// `M` marks bleeding days, `F` the fertile window, `O` the predicted
/// ovulation day and `·` everything else. Today is bracketed.
pub fn render_cycle_strip(analysis: &CycleAnalysis) -> String {
    let (Some(current), Some(prediction)) = (analysis.current_cycle(), analysis.prediction.as_ref())
    else {
        return "No ongoing cycle.\n".to_string();
    };

    let window = calculate_fertile_window(prediction.predicted_ovulation_day);
    let period = current.period_length();
    let last_day = current
        .length
        .max(prediction.next_period.days_until.max(0) as u32 + prediction.current_cycle_day)
        .max(window.end);

    let mut strip = String::new();
    for day in 1..=last_day {
        let symbol = if day <= period {
            'M'
        } else if day == prediction.predicted_ovulation_day {
            'O'
        } else if window.contains(day) {
            'F'
        } else {
            '·'
        };
        if day == prediction.current_cycle_day {
            strip.push('[');
            strip.push(symbol);
            strip.push(']');
        } else {
            strip.push(symbol);
        }
    }

    format!(
        "Cycle started {} (day {})\n{}\nM period  F fertile  O ovulation  [ ] today\n",
        current.start_date.format("%Y-%m-%d"),
        prediction.current_cycle_day,
        strip
    )
}
