//! Selection flow tests
//!
//! Runs the full criteria → imperatives → differentiators → generation path
//! against in-memory sheets and a scripted generator.

use std::cell::RefCell;
use std::collections::VecDeque;


use stratnav::catalog::{Grid, MemoryWorkbook};
use stratnav::config::WorkbookConfig;
use stratnav::{
    CompletionRequest, Criteria, Elaborator, PromptTemplate, RecommendationOutcome,
    ReferenceData, Result, SelectionState, Session, StrategyError, TextGenerator,
};

/// Replies handed out in order; records every prompt it sees
struct Scripted {
    replies: RefCell<VecDeque<Result<String>>>,
    prompts: RefCell<Vec<String>>,
}

impl Scripted {
    fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl TextGenerator for Scripted {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.prompts.borrow_mut().push(request.prompt.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(StrategyError::Generation("script exhausted".to_string())))
    }
}

fn ok(description: &str) -> Result<String> {
    Ok(format!(
        r#"{{"description": "{}", "cost": "$25,000 - $50,000", "timeframe": "3-6 months"}}"#,
        description
    ))
}

fn criteria_grid() -> Grid {
    Grid::from_rows(vec![
        vec![
            "Strategic Imperative", "HCP", "Patient", "Caregiver", "", "Launch", "Growth",
            "Mature", "LOE", "Awareness", "Consideration", "Adherence", "Advocacy",
        ],
        vec![
            "Improve Adherence", "x", "x", "", "", "x", "", "", "", "", "", "x", "",
        ],
        vec![
            "Expand Access", "x", "", "", "", "x", "", "", "", "", "", "x", "",
        ],
        vec![
            "Raise Awareness", "X", "x", "", "", "X", "", "", "", "", "", "X", "",
        ],
        vec![
            "Build Advocacy", "", "x", "", "", "", "x", "", "", "", "", "", "x",
        ],
    ])
}

fn reference_data() -> ReferenceData {
    let differentiators = Grid::from_rows(vec![
        vec!["Product Differentiators"],
        vec!["Once-daily dosing"],
        vec!["Oral formulation"],
        vec!["Pediatric indication"],
        vec!["Low copay"],
    ]);
    let tactics = Grid::from_rows(vec![
        vec!["Strategic Imperative", "HCP", "Patient/Caregiver"],
        vec!["Improve Adherence", "Run HCP webinar", "Send patient reminder"],
        vec!["Raise Awareness", "Detail visit", "Social campaign"],
    ]);

    let mut book = MemoryWorkbook::new()
        .with_sheet("Criteria", criteria_grid())
        .with_sheet("Differentiators", differentiators)
        .with_sheet("Tactics", tactics);
    ReferenceData::from_source(&mut book, &WorkbookConfig::default()).unwrap()
}

fn session<'a>(data: &'a ReferenceData, generator: &'a Scripted) -> Session<'a, &'a Scripted> {
    let elaborator = Elaborator::new(
        generator,
        PromptTemplate::new(None).unwrap(),
        "You are an expert pharmaceutical marketing strategist.",
    );
    Session::new(data, elaborator)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Reference data
// =============================================================================

mod loading_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tables_loaded() {
        let data = reference_data();
        assert_eq!(data.criteria.roles, vec!["HCP", "Patient", "Caregiver"]);
        assert_eq!(data.differentiators.len(), 4);
        assert_eq!(data.tactics.len(), 2);
    }

    #[test]
    fn test_missing_sheet_is_schema_mismatch() {
        let mut book = MemoryWorkbook::new().with_sheet("Criteria", criteria_grid());
        let err = ReferenceData::from_source(&mut book, &WorkbookConfig::default()).unwrap_err();
        assert!(matches!(err, StrategyError::SchemaMismatch(_)));
    }

    #[test]
    fn test_empty_criteria_sheet_is_schema_mismatch() {
        let mut book = MemoryWorkbook::new().with_sheet("Criteria", Grid::default());
        let err = ReferenceData::from_source(&mut book, &WorkbookConfig::default()).unwrap_err();
        assert!(matches!(err, StrategyError::SchemaMismatch(_)));
    }
}

// =============================================================================
// End-to-end flow
// =============================================================================

mod flow_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_offers_matching_imperatives() {
        let data = reference_data();
        let generator = Scripted::new(vec![]);
        let s = session(&data, &generator);
        let mut state = SelectionState::new();
        let offered = s
            .select_criteria(&mut state, Criteria::new("HCP", "Launch", "Adherence"))
            .unwrap();
        assert_eq!(
            offered,
            vec!["Improve Adherence", "Expand Access", "Raise Awareness"]
        );
    }

    #[test]
    fn test_unknown_option_rejected() {
        let data = reference_data();
        let generator = Scripted::new(vec![]);
        let s = session(&data, &generator);
        let mut state = SelectionState::new();
        let err = s
            .select_criteria(&mut state, Criteria::new("Launch", "Launch", "Adherence"))
            .unwrap_err();
        assert!(matches!(err, StrategyError::InvalidSelection(_)));
    }

    #[test]
    fn test_missing_tactic_does_not_abort_batch() {
        let data = reference_data();
        let generator = Scripted::new(vec![ok("first"), ok("second")]);
        let s = session(&data, &generator);
        let mut state = SelectionState::new();
        s.select_criteria(&mut state, Criteria::new("HCP", "Launch", "Adherence"))
            .unwrap();
        state
            .choose_imperatives(strings(&[
                "Improve Adherence",
                "Expand Access",
                "Raise Awareness",
            ]))
            .unwrap();
        state
            .choose_differentiators(
                strings(&["Oral formulation", "Once-daily dosing"]),
                &data.differentiators,
            )
            .unwrap();

        let outcomes = s.recommend_all(&state).unwrap();
        assert_eq!(outcomes.len(), 3);

        let first = outcomes[0].record().unwrap();
        assert_eq!(first.tactic, "Run HCP webinar");
        assert_eq!(
            first.note,
            "Run HCP webinar (Customized with: Oral formulation, Once-daily dosing)"
        );
        assert_eq!(first.description, "first");
        assert_eq!(first.timeframe, "3-6 months");

        assert!(matches!(
            &outcomes[1],
            RecommendationOutcome::MissingTactic { imperative, .. } if imperative == "Expand Access"
        ));

        let third = outcomes[2].record().unwrap();
        assert_eq!(third.tactic, "Detail visit");
        assert_eq!(third.description, "second");
    }

    #[test]
    fn test_generation_failure_is_inline_warning() {
        let data = reference_data();
        let generator = Scripted::new(vec![Ok("Happy to help! Webinars work well.".to_string())]);
        let s = session(&data, &generator);
        let mut state = SelectionState::new();
        s.select_criteria(&mut state, Criteria::new("Patient", "Launch", "Adherence"))
            .unwrap();
        state
            .choose_imperatives(strings(&["Improve Adherence"]))
            .unwrap();
        state
            .choose_differentiators(vec![], &data.differentiators)
            .unwrap();

        let outcomes = s.recommend_all(&state).unwrap();
        let record = outcomes[0].record().unwrap();
        assert_eq!(record.note, "Send patient reminder");
        assert_eq!(
            (
                record.description.as_str(),
                record.cost.as_str(),
                record.timeframe.as_str()
            ),
            ("N/A", "N/A", "N/A")
        );
        assert!(record.warning.is_some());
    }

    #[test]
    fn test_prompt_carries_note_and_differentiators() {
        let data = reference_data();
        let generator = Scripted::new(vec![ok("d")]);
        let s = session(&data, &generator);
        let mut state = SelectionState::new();
        s.select_criteria(&mut state, Criteria::new("HCP", "Launch", "Adherence"))
            .unwrap();
        state
            .choose_imperatives(strings(&["Raise Awareness"]))
            .unwrap();
        state
            .choose_differentiators(strings(&["Low copay"]), &data.differentiators)
            .unwrap();
        let outcomes = s.recommend_all(&state).unwrap();
        assert!(outcomes[0].record().unwrap().warning.is_none());

        let prompts = generator.prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Detail visit (Customized with: Low copay)"));
        assert!(prompts[0].contains("Low copay"));
    }

    #[test]
    fn test_generation_requires_completed_steps() {
        let data = reference_data();
        let generator = Scripted::new(vec![ok("d")]);
        let s = session(&data, &generator);
        let mut state = SelectionState::new();
        s.select_criteria(&mut state, Criteria::new("HCP", "Launch", "Adherence"))
            .unwrap();
        state
            .choose_imperatives(strings(&["Improve Adherence"]))
            .unwrap();

        assert!(matches!(
            s.recommend_all(&state),
            Err(StrategyError::StepOrder(_))
        ));
    }

    #[test]
    fn test_outcomes_serialize_with_status() {
        let data = reference_data();
        let generator = Scripted::new(vec![ok("d")]);
        let s = session(&data, &generator);
        let mut state = SelectionState::new();
        s.select_criteria(&mut state, Criteria::new("HCP", "Launch", "Adherence"))
            .unwrap();
        state
            .choose_imperatives(strings(&["Improve Adherence", "Expand Access"]))
            .unwrap();
        state
            .choose_differentiators(vec![], &data.differentiators)
            .unwrap();

        let json = serde_json::to_value(s.recommend_all(&state).unwrap()).unwrap();
        assert_eq!(json[0]["status"], "generated");
        assert_eq!(json[0]["cost"], "$25,000 - $50,000");
        assert_eq!(json[1]["status"], "missing_tactic");
        assert_eq!(json[1]["imperative"], "Expand Access");
    }
}
