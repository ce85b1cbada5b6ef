#![forbid(unsafe_code)]

//! @acp:module "Stratnav Library"
//! @acp:summary "Guided selection of strategic imperatives with generated briefs"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # Stratnav
//!
//! Pick a role, a product-lifecycle stage, and a customer-journey focus; the
//! eligibility matrix narrows the strategic imperatives; choose up to three
//! imperatives and up to three differentiators; each choice becomes a
//! recommendation with a generated description, cost, and timeframe.
//!
//! ## Features
//!
//! - **Workbook-driven**: criteria, differentiators, and tactics come from a
//!   spreadsheet whose layout lives in config
//! - **Gated selection**: each step validates before the next opens
//! - **Fail-soft generation**: generator trouble yields `N/A` fields and a
//!   warning, never an aborted batch
//!
//! ## Example
//!
//! ```rust,no_run
//! use stratnav::{Config, Criteria, ReferenceData, SelectionState};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default();
//!     let data = ReferenceData::load(&config.workbook)?;
//!
//!     let mut state = SelectionState::new();
//!     let offered = stratnav::flow::select_criteria(
//!         &data,
//!         &mut state,
//!         Criteria::new("HCP", "Launch", "Awareness"),
//!     )?;
//!     println!("{:?}", offered);
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod commands;
pub mod compose;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod flow;
pub mod generate;
pub mod selection;

// Re-exports
pub use catalog::{
    CriteriaCatalog, CriterionCategory, DifferentiatorCatalog, Grid, MemoryWorkbook,
    ReferenceData, TableSource, TacticsTable, Workbook,
};
pub use compose::{compose, Elaboration, Elaborator, RecommendationRecord};
pub use config::{Config, DuplicatePolicy, RoleRoute, RoleRouting};
pub use eligibility::{filter, EligibilityMatrix, MatrixRow};
pub use error::{Result, StrategyError};
pub use flow::{RecommendationOutcome, Session};
pub use generate::{
    CompletionRequest, OpenAiClient, PromptTemplate, RecommendationFields, TextGenerator,
};
pub use selection::{Criteria, SelectionState, Step, SELECTION_LIMIT};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
