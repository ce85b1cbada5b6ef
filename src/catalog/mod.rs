//! @acp:module "Catalog"
//! @acp:summary "Read-once reference data loaded from the workbook"
//! @acp:domain cli
//! @acp:layer io
//!
//! The criteria sheet, the differentiator sheet, and the tactics sheet are
//! read once per session into [`ReferenceData`], which the flow passes to
//! the filter and resolver explicitly.

pub mod criteria;
pub mod differentiators;
pub mod tactics;
pub mod workbook;

pub use criteria::{CriteriaCatalog, CriterionCategory};
pub use differentiators::DifferentiatorCatalog;
pub use tactics::TacticsTable;
pub use workbook::{Grid, MemoryWorkbook, TableSource, Workbook};

use crate::config::WorkbookConfig;
use crate::error::Result;

/// @acp:summary "All reference tables for one session"
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub criteria: CriteriaCatalog,
    pub differentiators: DifferentiatorCatalog,
    pub tactics: TacticsTable,
}

impl ReferenceData {
    /// Open the configured workbook and load every table
    pub fn load(config: &WorkbookConfig) -> Result<Self> {
        let mut workbook = Workbook::open(&config.path)?;
        Self::from_source(&mut workbook, config)
    }

    /// Load every table from an already-open source
    pub fn from_source<S: TableSource>(source: &mut S, config: &WorkbookConfig) -> Result<Self> {
        let criteria_grid = source.grid(&config.criteria.sheet)?;
        let criteria = CriteriaCatalog::from_grid(&criteria_grid, &config.criteria)?;

        let differentiator_grid = source.grid(&config.differentiators.sheet)?;
        let differentiators =
            DifferentiatorCatalog::from_grid(&differentiator_grid, &config.differentiators)?;

        let tactics_grid = source.grid(&config.tactics.sheet)?;
        let tactics = TacticsTable::from_grid(&tactics_grid, &config.tactics)?;

        Ok(Self {
            criteria,
            differentiators,
            tactics,
        })
    }
}
