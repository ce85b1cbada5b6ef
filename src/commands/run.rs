//! @acp:module "Run Command"
//! @acp:summary "Interactive, gated selection flow"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Criteria first, then up to three imperatives, then up to three
//! differentiators, then generation. Multi-selects re-prompt until the
//! choice fits the step's bounds.

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect, Select};

use super::output::{format_outcome, print_step};
use super::recommend::{build_elaborator, generate_with_progress, load_reference};
use crate::catalog::{CriterionCategory, ReferenceData};
use crate::config::Config;
use crate::flow::Session;
use crate::generate::TextGenerator;
use crate::selection::{Criteria, SelectionState, SELECTION_LIMIT};

/// Execute the interactive flow
pub fn execute_run(config: &Config) -> Result<()> {
    // Missing credentials stop the run before any prompt is shown.
    let elaborator = build_elaborator(config)?;
    let data = load_reference(config)?;
    let session = Session::new(&data, elaborator);

    println!("{}", style("Pharma Strategy Online Tool").bold().underlined());

    loop {
        let mut state = SelectionState::new();
        if !run_selection(&session, &mut state)? {
            return Ok(());
        }

        println!();
        println!("{}", style("Strategic Recommendations").bold());
        println!();
        for outcome in generate_with_progress(&session, &state)? {
            println!("{}", format_outcome(&outcome));
        }

        let again = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Start another selection?")
            .default(false)
            .interact()?;
        if !again {
            return Ok(());
        }
    }
}

/// Walk the user through the steps; `false` means they backed out
fn run_selection<G: TextGenerator>(session: &Session<'_, G>, state: &mut SelectionState) -> Result<bool> {
    let data = session.data();
    let theme = ColorfulTheme::default();

    // Step 1: criteria, repeated until something is eligible
    loop {
        print_step(1, "Select Your Criteria");
        let role = pick_one(&theme, category_options(data, CriterionCategory::Role))?;
        let lifecycle = pick_one(&theme, category_options(data, CriterionCategory::Lifecycle))?;
        let journey = pick_one(&theme, category_options(data, CriterionCategory::Journey))?;

        let offered = session.select_criteria(state, Criteria::new(role, lifecycle, journey))?;
        if !offered.is_empty() {
            break;
        }
        println!(
            "{} No strategic imperatives found for these selections. Please try different options.",
            style("⚠").yellow()
        );
        let retry = Confirm::with_theme(&theme)
            .with_prompt("Choose different criteria?")
            .default(true)
            .interact()?;
        if !retry {
            return Ok(false);
        }
    }

    // Step 2: imperatives
    print_step(2, "Select Strategic Imperatives");
    let offered = state.offered().to_vec();
    loop {
        let chosen = pick_many(
            &theme,
            &format!("Select up to {} Strategic Imperatives", SELECTION_LIMIT),
            &offered,
        )?;
        if chosen.is_empty() {
            eprintln!(
                "{} Please select at least one strategic imperative.",
                style("✗").red()
            );
            continue;
        }
        match state.choose_imperatives(chosen) {
            Ok(()) => break,
            Err(e) => eprintln!("{} {}", style("✗").red(), e),
        }
    }

    // Step 3: differentiators
    print_step(3, "Select Product Differentiators");
    let names = data.differentiators.names().to_vec();
    if names.is_empty() {
        println!("    {}", style("(no differentiators defined)").dim());
        state.choose_differentiators(Vec::new(), &data.differentiators)?;
    } else {
        loop {
            let chosen = pick_many(
                &theme,
                &format!("Select up to {} Product Differentiators", SELECTION_LIMIT),
                &names,
            )?;
            match state.choose_differentiators(chosen, &data.differentiators) {
                Ok(()) => break,
                Err(e) => eprintln!("{} {}", style("✗").red(), e),
            }
        }
    }

    let go = Confirm::with_theme(&theme)
        .with_prompt("Generate Strategy?")
        .default(true)
        .interact()?;
    Ok(go)
}

fn category_options(data: &ReferenceData, category: CriterionCategory) -> (&'static str, &[String]) {
    (category.prompt(), data.criteria.options(category))
}

fn pick_one(theme: &ColorfulTheme, (prompt, items): (&str, &[String])) -> Result<String> {
    let idx = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?;
    Ok(items[idx].clone())
}

fn pick_many(theme: &ColorfulTheme, prompt: &str, items: &[String]) -> Result<Vec<String>> {
    let picked = MultiSelect::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .interact()?;
    Ok(picked.into_iter().map(|i| items[i].clone()).collect())
}
