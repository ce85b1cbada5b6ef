//! @acp:module "Output Formatting"
//! @acp:summary "Text blocks, option lists, and progress spinners for the CLI"
//! @acp:domain cli
//! @acp:layer presentation

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::compose::RecommendationRecord;
use crate::flow::RecommendationOutcome;

const NO_DESCRIPTION: &str = "No description available.";

/// Format one recommendation as a text block
pub fn format_record(record: &RecommendationRecord) -> String {
    let description = if record.description.trim().is_empty() {
        NO_DESCRIPTION
    } else {
        record.description.as_str()
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n", style(&record.note).bold().cyan()));
    out.push_str(&format!("  {}\n", style(&record.imperative).dim()));
    out.push_str(&format!("  {}\n", description));
    out.push_str(&format!(
        "  {} {}\n",
        style("Estimated Cost:").bold(),
        record.cost
    ));
    out.push_str(&format!(
        "  {} {}\n",
        style("Estimated Timeframe:").bold(),
        record.timeframe
    ));
    if let Some(ref warning) = record.warning {
        out.push_str(&format!(
            "  {} {}\n",
            style("⚠").yellow(),
            style(format!("AI output unavailable: {}", warning)).yellow()
        ));
    }
    out
}

/// Format an outcome, including the inline note for a missing tactic
pub fn format_outcome(outcome: &RecommendationOutcome) -> String {
    match outcome {
        RecommendationOutcome::Generated(record) => format_record(record),
        RecommendationOutcome::MissingTactic { imperative, reason } => format!(
            "{} {}\n  {} No tactic available ({})\n",
            style("✗").red(),
            style(imperative).bold(),
            style("⚠").yellow(),
            reason
        ),
    }
}

/// Print a titled, numbered list
pub fn print_list(title: &str, items: &[String]) {
    println!("{} {}", style("→").cyan(), style(title).bold());
    if items.is_empty() {
        println!("    {}", style("(none)").dim());
    }
    for (i, item) in items.iter().enumerate() {
        println!("    {}. {}", i + 1, item);
    }
}

/// Section heading for a step of the guided flow
pub fn print_step(number: usize, title: &str) {
    println!();
    println!(
        "{} {}",
        style(format!("Step {}:", number)).bold().cyan(),
        style(title).bold()
    );
}

/// Steady spinner on stderr; hidden automatically when not a terminal
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let template = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(template);
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
