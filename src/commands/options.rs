//! @acp:module "Options Command"
//! @acp:summary "List the selectable criteria and differentiators"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;

use super::output::print_list;
use super::recommend::load_reference;
use crate::catalog::CriterionCategory;
use crate::config::Config;

/// Options for the options command
#[derive(Debug, Clone, Default)]
pub struct OptionsOptions {
    /// Output as JSON
    pub json: bool,
}

/// Execute the options command
pub fn execute_options(options: OptionsOptions, config: &Config) -> Result<()> {
    let data = load_reference(config)?;

    if options.json {
        let output = serde_json::json!({
            "roles": data.criteria.roles,
            "lifecycles": data.criteria.lifecycles,
            "journeys": data.criteria.journeys,
            "differentiators": data.differentiators,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for category in CriterionCategory::ALL {
        let title = match category {
            CriterionCategory::Role => "Role options",
            CriterionCategory::Lifecycle => "Lifecycle options",
            CriterionCategory::Journey => "Journey options",
        };
        print_list(title, data.criteria.options(category));
    }
    print_list("Product differentiators", data.differentiators.names());

    Ok(())
}
