//! @acp:module "Recommendation Composer"
//! @acp:summary "Customization notes, elaboration, and final records"
//! @acp:domain cli
//! @acp:layer logic
//!
//! [`compose`] is pure. [`Elaborator::elaborate`] never fails: generator
//! errors and invalid replies become the `N/A` sentinel plus a warning.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::generate::{parse_fields, CompletionRequest, PromptTemplate, RecommendationFields, TextGenerator};

/// Append the differentiator suffix to a tactic, in selection order
pub fn compose(tactic: &str, differentiators: &[String]) -> String {
    if differentiators.is_empty() {
        return tactic.to_string();
    }
    format!("{} (Customized with: {})", tactic, differentiators.join(", "))
}

/// Generated fields plus the warning raised while producing them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elaboration {
    pub fields: RecommendationFields,
    pub warning: Option<String>,
}

impl Elaboration {
    fn failed(reason: String) -> Self {
        tracing::warn!("Elaboration unavailable: {}", reason);
        Self {
            fields: RecommendationFields::unavailable(),
            warning: Some(reason),
        }
    }
}

/// @acp:summary "Generator plus prompt settings used to elaborate notes"
pub struct Elaborator<G> {
    generator: G,
    template: PromptTemplate,
    system_prompt: String,
}

impl<G: TextGenerator> Elaborator<G> {
    pub fn new(generator: G, template: PromptTemplate, system_prompt: impl Into<String>) -> Self {
        Self {
            generator,
            template,
            system_prompt: system_prompt.into(),
        }
    }

    /// Ask the generator to expand a customization note
    pub fn elaborate(&self, note: &str, differentiators: &[String]) -> Elaboration {
        let prompt = match self.template.render(note, differentiators) {
            Ok(prompt) => prompt,
            Err(e) => return Elaboration::failed(e.to_string()),
        };
        let request = CompletionRequest {
            system: self.system_prompt.clone(),
            prompt,
        };

        let reply = match self.generator.complete(&request) {
            Ok(reply) => reply,
            Err(e) => return Elaboration::failed(e.to_string()),
        };

        match parse_fields(&reply) {
            Ok(fields) => Elaboration {
                fields,
                warning: None,
            },
            Err(e) => {
                tracing::debug!("Rejected reply: {}", reply);
                Elaboration::failed(e.to_string())
            }
        }
    }
}

/// @acp:summary "Displayable outcome for one chosen imperative"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationRecord {
    pub imperative: String,
    pub tactic: String,
    pub note: String,
    pub description: String,
    pub cost: String,
    pub timeframe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl RecommendationRecord {
    pub fn new(imperative: &str, tactic: String, note: String, elaboration: Elaboration) -> Self {
        let Elaboration { fields, warning } = elaboration;
        Self {
            imperative: imperative.to_string(),
            tactic,
            note,
            description: fields.description,
            cost: fields.cost,
            timeframe: fields.timeframe,
            warning,
            generated_at: Utc::now(),
        }
    }
}
