//! @acp:module "Selection Flow"
//! @acp:summary "Sequences filtering, tactic resolution, and elaboration"
//! @acp:domain cli
//! @acp:layer service
//!
//! Per-item problems (no tactic, generator trouble) never abort a batch:
//! they surface as [`RecommendationOutcome::MissingTactic`] or as a warning
//! on the record. Only gating and schema errors are returned as `Err`.

use serde::Serialize;

use crate::catalog::{CriterionCategory, ReferenceData};
use crate::compose::{compose, Elaborator, RecommendationRecord};
use crate::eligibility;
use crate::error::{Result, StrategyError};
use crate::generate::TextGenerator;
use crate::selection::{Criteria, SelectionState};

/// Result of processing one chosen imperative
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Generated(RecommendationRecord),
    MissingTactic { imperative: String, reason: String },
}

impl RecommendationOutcome {
    pub fn record(&self) -> Option<&RecommendationRecord> {
        match self {
            RecommendationOutcome::Generated(record) => Some(record),
            RecommendationOutcome::MissingTactic { .. } => None,
        }
    }
}

/// Validate criteria against the catalog, run the filter, and record both
pub fn select_criteria(
    data: &ReferenceData,
    state: &mut SelectionState,
    criteria: Criteria,
) -> Result<Vec<String>> {
    for (category, value) in [
        (CriterionCategory::Role, &criteria.role),
        (CriterionCategory::Lifecycle, &criteria.lifecycle),
        (CriterionCategory::Journey, &criteria.journey),
    ] {
        if !data.criteria.contains(category, value) {
            return Err(StrategyError::InvalidSelection(format!(
                "'{}' is not a {} option (available: {})",
                value,
                category,
                data.criteria.options(category).join(", ")
            )));
        }
    }

    let offered = eligibility::filter(
        &data.criteria.matrix,
        &criteria.role,
        &criteria.lifecycle,
        &criteria.journey,
    )?;
    state.set_criteria(criteria, offered.clone());
    Ok(offered)
}

/// @acp:summary "Reference data plus elaborator for one user session"
pub struct Session<'a, G> {
    data: &'a ReferenceData,
    elaborator: Elaborator<G>,
}

impl<'a, G: TextGenerator> Session<'a, G> {
    pub fn new(data: &'a ReferenceData, elaborator: Elaborator<G>) -> Self {
        Self { data, elaborator }
    }

    pub fn data(&self) -> &ReferenceData {
        self.data
    }

    pub fn select_criteria(&self, state: &mut SelectionState, criteria: Criteria) -> Result<Vec<String>> {
        select_criteria(self.data, state, criteria)
    }

    /// Resolve, compose, and elaborate one chosen imperative
    pub fn recommend_for(
        &self,
        state: &SelectionState,
        imperative: &str,
    ) -> Result<RecommendationOutcome> {
        state.ensure_ready()?;
        let criteria = state
            .criteria()
            .ok_or_else(|| StrategyError::StepOrder("criteria not selected".to_string()))?;
        if !state.imperatives().iter().any(|i| i == imperative) {
            return Err(StrategyError::InvalidSelection(format!(
                "imperative '{}' was not chosen",
                imperative
            )));
        }

        let tactic = match self.data.tactics.resolve(imperative, &criteria.role) {
            Ok(tactic) => tactic,
            Err(StrategyError::NotFound(reason)) => {
                tracing::warn!("No tactic available for '{}': {}", imperative, reason);
                return Ok(RecommendationOutcome::MissingTactic {
                    imperative: imperative.to_string(),
                    reason,
                });
            }
            Err(e) => return Err(e),
        };

        let differentiators = state.differentiators();
        let note = compose(&tactic, differentiators);
        let elaboration = self.elaborator.elaborate(&note, differentiators);
        Ok(RecommendationOutcome::Generated(RecommendationRecord::new(
            imperative,
            tactic,
            note,
            elaboration,
        )))
    }

    /// Process every chosen imperative in selection order
    pub fn recommend_all(&self, state: &SelectionState) -> Result<Vec<RecommendationOutcome>> {
        state.ensure_ready()?;
        state
            .imperatives()
            .iter()
            .map(|imperative| self.recommend_for(state, imperative))
            .collect()
    }
}
