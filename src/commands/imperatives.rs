//! @acp:module "Imperatives Command"
//! @acp:summary "Run the eligibility filter for a criteria triple"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use super::output::print_list;
use super::recommend::load_reference;
use crate::config::Config;
use crate::flow::select_criteria;
use crate::selection::{Criteria, SelectionState};

/// Options for the imperatives command
#[derive(Debug, Clone)]
pub struct ImperativesOptions {
    pub role: String,
    pub lifecycle: String,
    pub journey: String,
    /// Output as JSON
    pub json: bool,
}

/// Execute the imperatives command
pub fn execute_imperatives(options: ImperativesOptions, config: &Config) -> Result<()> {
    let data = load_reference(config)?;
    let mut state = SelectionState::new();
    let criteria = Criteria::new(options.role, options.lifecycle, options.journey);
    let offered = select_criteria(&data, &mut state, criteria)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&offered)?);
        return Ok(());
    }

    if offered.is_empty() {
        println!(
            "{} No strategic imperatives found for these selections. Please try different options.",
            style("⚠").yellow()
        );
        return Ok(());
    }
    print_list("Strategic imperatives", &offered);
    Ok(())
}
