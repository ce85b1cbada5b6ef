//! @acp:module "Check Command"
//! @acp:summary "Validate the workbook against the configured layout"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use crate::catalog::{ReferenceData, Workbook};
use crate::config::Config;

/// Execute the check command
pub fn execute_check(config: &Config) -> Result<()> {
    let workbook_config = &config.workbook;
    println!(
        "{} Checking {}",
        style("→").cyan(),
        workbook_config.path.display()
    );

    let mut workbook = match Workbook::open(&workbook_config.path) {
        Ok(workbook) => workbook,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            std::process::exit(1);
        }
    };
    println!("  Sheets: {}", workbook.sheet_names().join(", "));

    let data = match ReferenceData::from_source(&mut workbook, workbook_config) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            std::process::exit(1);
        }
    };

    let layout = &workbook_config.criteria;
    println!("{} Layout matches", style("✓").green());
    println!(
        "  Roles ({}): {}",
        layout.roles,
        data.criteria.roles.len()
    );
    println!(
        "  Lifecycle stages ({}): {}",
        layout.lifecycles,
        data.criteria.lifecycles.len()
    );
    println!(
        "  Journey stages ({}): {}",
        layout.journeys,
        data.criteria.journeys.len()
    );
    println!("  Matrix rows: {}", data.criteria.matrix.rows().len());
    println!("  Differentiators: {}", data.differentiators.len());
    println!("  Tactic rows: {}", data.tactics.len());

    let unnamed = data
        .criteria
        .matrix
        .rows()
        .iter()
        .filter(|r| r.imperative.is_none())
        .count();
    if unnamed > 0 {
        println!(
            "{} {} matrix row(s) have no imperative name and will be ignored",
            style("⚠").yellow(),
            unnamed
        );
    }

    Ok(())
}
