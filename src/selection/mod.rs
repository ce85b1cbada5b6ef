//! @acp:module "Selection State"
//! @acp:summary "Gated per-session record of the user's choices"
//! @acp:domain cli
//! @acp:layer logic
//!
//! Steps run in order: criteria, imperatives, differentiators, generate.
//! Changing an earlier step clears everything after it.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::DifferentiatorCatalog;
use crate::error::{Result, StrategyError};

/// Most imperatives or differentiators a user may pick
pub const SELECTION_LIMIT: usize = 3;

/// The (role, lifecycle, journey) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criteria {
    pub role: String,
    pub lifecycle: String,
    pub journey: String,
}

impl Criteria {
    pub fn new(
        role: impl Into<String>,
        lifecycle: impl Into<String>,
        journey: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            lifecycle: lifecycle.into(),
            journey: journey.into(),
        }
    }
}

/// The next step the user has to complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Criteria,
    Imperatives,
    Differentiators,
    Generate,
}

/// @acp:summary "Mutable selection record owned by one session"
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    criteria: Option<Criteria>,
    offered: Vec<String>,
    imperatives: Vec<String>,
    differentiators: Option<Vec<String>>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        if self.criteria.is_none() {
            Step::Criteria
        } else if self.imperatives.is_empty() {
            Step::Imperatives
        } else if self.differentiators.is_none() {
            Step::Differentiators
        } else {
            Step::Generate
        }
    }

    /// Record the criteria and the imperatives they make available
    pub fn set_criteria(&mut self, criteria: Criteria, offered: Vec<String>) {
        self.criteria = Some(criteria);
        self.offered = offered;
        self.imperatives.clear();
        self.differentiators = None;
    }

    /// Choose 1..=3 of the offered imperatives
    pub fn choose_imperatives(&mut self, chosen: Vec<String>) -> Result<()> {
        if self.criteria.is_none() {
            return Err(StrategyError::StepOrder(
                "select criteria before choosing imperatives".to_string(),
            ));
        }
        if chosen.is_empty() {
            return Err(StrategyError::InvalidSelection(
                "select at least one strategic imperative".to_string(),
            ));
        }
        check_limit("imperatives", &chosen)?;
        check_unique("imperative", &chosen)?;
        if let Some(unknown) = chosen.iter().find(|c| !self.offered.contains(c)) {
            return Err(StrategyError::InvalidSelection(format!(
                "imperative '{}' is not available for the selected criteria",
                unknown
            )));
        }

        self.imperatives = chosen;
        self.differentiators = None;
        Ok(())
    }

    /// Choose 0..=3 differentiators from the catalog
    pub fn choose_differentiators(
        &mut self,
        chosen: Vec<String>,
        catalog: &DifferentiatorCatalog,
    ) -> Result<()> {
        if self.imperatives.is_empty() {
            return Err(StrategyError::StepOrder(
                "choose imperatives before differentiators".to_string(),
            ));
        }
        check_limit("differentiators", &chosen)?;
        check_unique("differentiator", &chosen)?;
        if let Some(unknown) = chosen.iter().find(|c| !catalog.contains(c)) {
            return Err(StrategyError::InvalidSelection(format!(
                "unknown differentiator '{}'",
                unknown
            )));
        }

        self.differentiators = Some(chosen);
        Ok(())
    }

    /// Fails unless every step before generation is complete
    pub fn ensure_ready(&self) -> Result<()> {
        match self.step() {
            Step::Generate => {
                check_limit("imperatives", &self.imperatives)?;
                check_limit("differentiators", self.differentiators())
            }
            Step::Criteria => Err(StrategyError::StepOrder("criteria not selected".to_string())),
            Step::Imperatives => Err(StrategyError::StepOrder(
                "no strategic imperatives chosen".to_string(),
            )),
            Step::Differentiators => Err(StrategyError::StepOrder(
                "differentiators not confirmed".to_string(),
            )),
        }
    }

    pub fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }

    pub fn offered(&self) -> &[String] {
        &self.offered
    }

    pub fn imperatives(&self) -> &[String] {
        &self.imperatives
    }

    pub fn differentiators(&self) -> &[String] {
        self.differentiators.as_deref().unwrap_or(&[])
    }
}

fn check_limit(kind: &'static str, items: &[String]) -> Result<()> {
    if items.len() > SELECTION_LIMIT {
        return Err(StrategyError::SelectionLimit {
            kind,
            max: SELECTION_LIMIT,
            got: items.len(),
        });
    }
    Ok(())
}

fn check_unique(kind: &str, items: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.as_str()) {
            return Err(StrategyError::InvalidSelection(format!(
                "{} '{}' selected twice",
                kind, item
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn with_criteria() -> SelectionState {
        let mut state = SelectionState::new();
        state.set_criteria(
            Criteria::new("HCP", "Launch", "Awareness"),
            strings(&["A", "B", "C", "D"]),
        );
        state
    }

    fn catalog() -> DifferentiatorCatalog {
        DifferentiatorCatalog::new(["Oral", "Once-daily", "Pediatric", "Generic"])
    }

    #[test]
    fn test_steps_progress_in_order() {
        let mut state = SelectionState::new();
        assert_eq!(state.step(), Step::Criteria);

        state.set_criteria(Criteria::new("HCP", "Launch", "Awareness"), strings(&["A"]));
        assert_eq!(state.step(), Step::Imperatives);

        state.choose_imperatives(strings(&["A"])).unwrap();
        assert_eq!(state.step(), Step::Differentiators);
        assert!(state.ensure_ready().is_err());

        state.choose_differentiators(vec![], &catalog()).unwrap();
        assert_eq!(state.step(), Step::Generate);
        assert!(state.ensure_ready().is_ok());
    }

    #[test]
    fn test_imperatives_before_criteria_rejected() {
        let mut state = SelectionState::new();
        assert!(matches!(
            state.choose_imperatives(strings(&["A"])),
            Err(StrategyError::StepOrder(_))
        ));
    }

    #[test]
    fn test_differentiators_before_imperatives_rejected() {
        let mut state = with_criteria();
        assert!(matches!(
            state.choose_differentiators(strings(&["Oral"]), &catalog()),
            Err(StrategyError::StepOrder(_))
        ));
    }

    #[test]
    fn test_imperative_limit() {
        let mut state = with_criteria();
        let err = state
            .choose_imperatives(strings(&["A", "B", "C", "D"]))
            .unwrap_err();
        assert!(matches!(
            err,
            StrategyError::SelectionLimit { max: 3, got: 4, .. }
        ));
        assert!(state.imperatives().is_empty());
    }

    #[test]
    fn test_empty_imperatives_rejected() {
        let mut state = with_criteria();
        assert!(matches!(
            state.choose_imperatives(vec![]),
            Err(StrategyError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_unoffered_and_repeated_imperatives_rejected() {
        let mut state = with_criteria();
        assert!(state.choose_imperatives(strings(&["Z"])).is_err());
        assert!(state.choose_imperatives(strings(&["A", "A"])).is_err());
    }

    #[test]
    fn test_differentiator_limit_and_catalog() {
        let mut state = with_criteria();
        state.choose_imperatives(strings(&["A", "B"])).unwrap();
        assert!(matches!(
            state.choose_differentiators(
                strings(&["Oral", "Once-daily", "Pediatric", "Generic"]),
                &catalog()
            ),
            Err(StrategyError::SelectionLimit { .. })
        ));
        assert!(state
            .choose_differentiators(strings(&["Injectable"]), &catalog())
            .is_err());
        state
            .choose_differentiators(strings(&["Pediatric", "Oral"]), &catalog())
            .unwrap();
        assert_eq!(state.differentiators(), ["Pediatric", "Oral"]);
    }

    #[test]
    fn test_new_criteria_clear_later_steps() {
        let mut state = with_criteria();
        state.choose_imperatives(strings(&["A"])).unwrap();
        state.choose_differentiators(strings(&["Oral"]), &catalog()).unwrap();

        state.set_criteria(Criteria::new("Patient", "Launch", "Awareness"), strings(&["B"]));
        assert_eq!(state.step(), Step::Imperatives);
        assert!(state.imperatives().is_empty());
        assert!(state.differentiators().is_empty());
    }
}
