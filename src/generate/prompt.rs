//! @acp:module "Prompt Template"
//! @acp:summary "Handlebars rendering of the elaboration prompt"
//! @acp:domain cli
//! @acp:layer logic

use handlebars::Handlebars;
use serde_json::json;

use crate::error::{Result, StrategyError};

/// Built-in user prompt; `note` and `differentiators` are interpolated
pub const DEFAULT_PROMPT_TEMPLATE: &str = r#"Given the following strategy description: "{{note}}"
and the selected product differentiators: "{{differentiators}}",
please provide a short 2-3 sentence description of the strategic recommendation.
Also, provide an estimated cost range in USD and an estimated timeframe in months for implementation.
Return the output as a JSON object with keys "description", "cost", and "timeframe"."#;

const TEMPLATE_NAME: &str = "prompt";

/// @acp:summary "Compiled prompt template (strict, no HTML escaping)"
pub struct PromptTemplate {
    registry: Handlebars<'static>,
}

impl PromptTemplate {
    /// Compile `source`, or the built-in template when `None`
    pub fn new(source: Option<&str>) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, source.unwrap_or(DEFAULT_PROMPT_TEMPLATE))
            .map_err(|e| StrategyError::Configuration(format!("invalid prompt template: {}", e)))?;

        let template = Self { registry };
        // Strict mode only reports unknown variables at render time.
        template
            .render("sample", &[])
            .map_err(|e| StrategyError::Configuration(e.to_string()))?;
        Ok(template)
    }

    /// Render the prompt for a customization note
    pub fn render(&self, note: &str, differentiators: &[String]) -> Result<String> {
        let differentiators = if differentiators.is_empty() {
            "None".to_string()
        } else {
            differentiators.join(", ")
        };
        self.registry
            .render(
                TEMPLATE_NAME,
                &json!({ "note": note, "differentiators": differentiators }),
            )
            .map_err(|e| StrategyError::Generation(format!("prompt rendering failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_interpolates() {
        let template = PromptTemplate::new(None).unwrap();
        let prompt = template
            .render(
                "Run HCP webinar (Customized with: Oral)",
                &["Oral".to_string()],
            )
            .unwrap();
        assert!(prompt.contains(r#""Run HCP webinar (Customized with: Oral)""#));
        assert!(prompt.contains(r#"differentiators: "Oral""#));
        assert!(prompt.contains(r#""description", "cost", and "timeframe""#));
    }

    #[test]
    fn test_no_differentiators_renders_none() {
        let template = PromptTemplate::new(None).unwrap();
        let prompt = template.render("Send reminder", &[]).unwrap();
        assert!(prompt.contains(r#"differentiators: "None""#));
    }

    #[test]
    fn test_no_html_escaping() {
        let template = PromptTemplate::new(Some("{{note}}")).unwrap();
        assert_eq!(
            template.render("R&D <pilot> \"quoted\"", &[]).unwrap(),
            "R&D <pilot> \"quoted\""
        );
    }

    #[test]
    fn test_unknown_variable_rejected_up_front() {
        let err = PromptTemplate::new(Some("{{note}} {{budget}}")).err().unwrap();
        assert!(matches!(err, StrategyError::Configuration(_)));
    }

    #[test]
    fn test_malformed_template_rejected() {
        assert!(PromptTemplate::new(Some("{{#if note}}")).is_err());
    }
}
