//! @acp:module "Recommend Command"
//! @acp:summary "Non-interactive generation for a fully specified selection"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{Context, Result};
use console::style;

use super::output::{format_outcome, spinner};
use crate::catalog::ReferenceData;
use crate::compose::Elaborator;
use crate::config::Config;
use crate::flow::{RecommendationOutcome, Session};
use crate::generate::{resolve_api_key, OpenAiClient, PromptTemplate, TextGenerator};
use crate::selection::{Criteria, SelectionState};

/// Options for the recommend command
#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    pub role: String,
    pub lifecycle: String,
    pub journey: String,
    /// Chosen imperatives (1..=3)
    pub imperatives: Vec<String>,
    /// Chosen differentiators (0..=3)
    pub differentiators: Vec<String>,
    /// Output as JSON
    pub json: bool,
}

/// Read the workbook once for this run
pub fn load_reference(config: &Config) -> Result<ReferenceData> {
    ReferenceData::load(&config.workbook)
        .with_context(|| format!("Failed to load {}", config.workbook.path.display()))
}

/// Credentials and prompt template are checked here, before any prompt
pub fn build_elaborator(config: &Config) -> Result<Elaborator<OpenAiClient>> {
    let generator = &config.generator;
    let api_key = resolve_api_key(generator)?;
    let template = PromptTemplate::new(generator.prompt_template.as_deref())?;
    let client = OpenAiClient::new(generator, api_key);
    tracing::debug!("Completion endpoint: {}", client.endpoint());
    Ok(Elaborator::new(client, template, generator.system_prompt.clone()))
}

/// Run every chosen imperative behind a spinner
pub fn generate_with_progress<G: TextGenerator>(
    session: &Session<'_, G>,
    state: &SelectionState,
) -> Result<Vec<RecommendationOutcome>> {
    let mut outcomes = Vec::new();
    for imperative in state.imperatives() {
        let bar = spinner(format!("Generating AI output for {}...", imperative));
        let outcome = session.recommend_for(state, imperative);
        bar.finish_and_clear();
        outcomes.push(outcome?);
    }
    Ok(outcomes)
}

/// Execute the recommend command
pub fn execute_recommend(options: RecommendOptions, config: &Config) -> Result<()> {
    let elaborator = build_elaborator(config)?;
    let data = load_reference(config)?;
    let session = Session::new(&data, elaborator);

    let mut state = SelectionState::new();
    let criteria = Criteria::new(options.role, options.lifecycle, options.journey);
    let offered = session.select_criteria(&mut state, criteria)?;
    if offered.is_empty() {
        anyhow::bail!("No strategic imperatives found for these selections");
    }
    state.choose_imperatives(options.imperatives)?;
    state.choose_differentiators(options.differentiators, &data.differentiators)?;

    let outcomes = generate_with_progress(&session, &state)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    println!("{}\n", style("Strategic Recommendations").bold());
    for outcome in &outcomes {
        println!("{}", format_outcome(outcome));
    }
    Ok(())
}
