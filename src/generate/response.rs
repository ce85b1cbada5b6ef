//! @acp:module "Reply Validation"
//! @acp:summary "Strict parsing of generated recommendation fields"
//! @acp:domain cli
//! @acp:layer logic
//!
//! Replies are untrusted free text. The outermost JSON object is pulled out
//! (models like to wrap it in prose or code fences) and must hold exactly
//! `description`, `cost`, and `timeframe`, all strings.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrategyError};

/// Placeholder used for every field when generation fails
pub const UNAVAILABLE: &str = "N/A";

/// @acp:summary "The three generated fields of a recommendation"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationFields {
    pub description: String,
    pub cost: String,
    pub timeframe: String,
}

impl RecommendationFields {
    /// Sentinel record substituted on failure
    pub fn unavailable() -> Self {
        Self {
            description: UNAVAILABLE.to_string(),
            cost: UNAVAILABLE.to_string(),
            timeframe: UNAVAILABLE.to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        *self == Self::unavailable()
    }
}

/// Pull the outermost `{ ... }` out of arbitrary text
fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Validate a completion reply against the three-field schema
pub fn parse_fields(text: &str) -> Result<RecommendationFields> {
    let object = extract_object(text).ok_or_else(|| {
        StrategyError::Generation("reply does not contain a JSON object".to_string())
    })?;
    let fields: RecommendationFields = serde_json::from_str(object)
        .map_err(|e| StrategyError::Generation(format!("reply failed validation: {}", e)))?;
    Ok(RecommendationFields {
        description: fields.description.trim().to_string(),
        cost: fields.cost.trim().to_string(),
        timeframe: fields.timeframe.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_object() {
        let fields = parse_fields(
            r#"{"description": "Run a webinar series.", "cost": "$50,000 - $100,000", "timeframe": "3-6 months"}"#,
        )
        .unwrap();
        assert_eq!(
            fields,
            RecommendationFields {
                description: "Run a webinar series.".to_string(),
                cost: "$50,000 - $100,000".to_string(),
                timeframe: "3-6 months".to_string(),
            }
        );
    }

    #[test]
    fn test_code_fence_and_prose_tolerated() {
        let reply = "Here you go:\n```json\n{\"description\": \"d\", \"cost\": \"c\", \"timeframe\": \"t\"}\n```";
        assert_eq!(parse_fields(reply).unwrap().timeframe, "t");
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            parse_fields("I cannot help with that."),
            Err(StrategyError::Generation(_))
        ));
        assert!(parse_fields("} backwards {").is_err());
    }

    #[test]
    fn test_missing_key_rejected() {
        assert!(parse_fields(r#"{"description": "d", "cost": "c"}"#).is_err());
    }

    #[test]
    fn test_extra_key_rejected() {
        assert!(parse_fields(
            r#"{"description": "d", "cost": "c", "timeframe": "t", "risk": "low"}"#
        )
        .is_err());
    }

    #[test]
    fn test_non_string_rejected() {
        assert!(parse_fields(r#"{"description": "d", "cost": 50000, "timeframe": "t"}"#).is_err());
        assert!(parse_fields(r#"{"description": "d", "cost": null, "timeframe": "t"}"#).is_err());
    }

    #[test]
    fn test_sentinel() {
        let sentinel = RecommendationFields::unavailable();
        assert_eq!(sentinel.cost, "N/A");
        assert!(sentinel.is_unavailable());
    }
}
