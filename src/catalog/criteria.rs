//! @acp:module "Criteria Catalog"
//! @acp:summary "Role, lifecycle, and journey options plus the eligibility matrix"
//! @acp:domain cli
//! @acp:layer io

use std::fmt;

use serde::Serialize;

use super::workbook::Grid;
use crate::config::{ColumnSpan, CriteriaLayout};
use crate::eligibility::{EligibilityMatrix, MatrixRow};
use crate::error::{Result, StrategyError};

/// The three fixed criterion categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionCategory {
    Role,
    Lifecycle,
    Journey,
}

impl CriterionCategory {
    pub const ALL: [CriterionCategory; 3] = [
        CriterionCategory::Role,
        CriterionCategory::Lifecycle,
        CriterionCategory::Journey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionCategory::Role => "role",
            CriterionCategory::Lifecycle => "lifecycle",
            CriterionCategory::Journey => "journey",
        }
    }

    /// Prompt text shown when asking for this category
    pub fn prompt(&self) -> &'static str {
        match self {
            CriterionCategory::Role => "Select your role",
            CriterionCategory::Lifecycle => "Select the product lifecycle stage",
            CriterionCategory::Journey => "Select the customer journey focus",
        }
    }
}

impl fmt::Display for CriterionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @acp:summary "Option lists and matrix read from the criteria sheet"
#[derive(Debug, Clone, Serialize)]
pub struct CriteriaCatalog {
    pub roles: Vec<String>,
    pub lifecycles: Vec<String>,
    pub journeys: Vec<String>,
    #[serde(skip)]
    pub matrix: EligibilityMatrix,
}

impl CriteriaCatalog {
    /// Build the catalog, checking the sheet against the layout once
    pub fn from_grid(grid: &Grid, layout: &CriteriaLayout) -> Result<Self> {
        let headers = grid.header(layout.header_row)?;

        let spans = [
            (CriterionCategory::Role, layout.roles),
            (CriterionCategory::Lifecycle, layout.lifecycles),
            (CriterionCategory::Journey, layout.journeys),
        ];
        let required_width = spans.iter().map(|(_, s)| s.end() + 1).max().unwrap_or(0);
        if headers.len() < required_width {
            return Err(StrategyError::SchemaMismatch(format!(
                "criteria sheet has only {} column(s) but at least {} are required",
                headers.len(),
                required_width
            )));
        }

        let imperative_col =
            grid.require_column(layout.header_row, &layout.imperative_column, "criteria")?;

        let [roles, lifecycles, journeys] =
            spans.map(|(category, span)| options_in_span(&headers, span, category));

        for (category, options) in [
            (CriterionCategory::Role, &roles),
            (CriterionCategory::Lifecycle, &lifecycles),
            (CriterionCategory::Journey, &journeys),
        ] {
            if options.is_empty() {
                return Err(StrategyError::SchemaMismatch(format!(
                    "criteria sheet has no {} options in its header row",
                    category
                )));
            }
            check_unambiguous(&headers, options)?;
        }

        let rows = grid
            .body(layout.header_row)
            .map(|(_, row)| {
                let cells: Vec<String> = (0..headers.len())
                    .map(|col| row.get(col).cloned().unwrap_or_default())
                    .collect();
                let name = cells[imperative_col].trim();
                MatrixRow {
                    imperative: (!name.is_empty()).then(|| name.to_string()),
                    cells,
                }
            })
            .collect::<Vec<_>>();

        tracing::info!(
            "Loaded criteria: {} roles, {} lifecycles, {} journeys, {} matrix rows",
            roles.len(),
            lifecycles.len(),
            journeys.len(),
            rows.len()
        );

        let matrix =
            EligibilityMatrix::new(headers, rows, &layout.marker).with_duplicates(layout.duplicates);

        Ok(Self {
            roles,
            lifecycles,
            journeys,
            matrix,
        })
    }

    pub fn options(&self, category: CriterionCategory) -> &[String] {
        match category {
            CriterionCategory::Role => &self.roles,
            CriterionCategory::Lifecycle => &self.lifecycles,
            CriterionCategory::Journey => &self.journeys,
        }
    }

    /// Whether `value` is one of the options offered for `category`
    pub fn contains(&self, category: CriterionCategory, value: &str) -> bool {
        self.options(category).iter().any(|o| o == value)
    }
}

fn options_in_span(headers: &[String], span: ColumnSpan, category: CriterionCategory) -> Vec<String> {
    let mut options = Vec::new();
    for col in span.indices() {
        let label = &headers[col];
        if label.is_empty() {
            tracing::warn!(
                "Skipping blank {} header in column {}",
                category,
                Grid::column_name(col)
            );
            continue;
        }
        if options.contains(label) {
            tracing::warn!("Repeated {} header '{}' ignored", category, label);
            continue;
        }
        options.push(label.clone());
    }
    options
}

/// The filter finds criterion columns by label, so each option label must
/// name exactly one header cell.
fn check_unambiguous(headers: &[String], options: &[String]) -> Result<()> {
    for option in options {
        let positions: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| *h == option)
            .map(|(col, _)| Grid::column_name(col))
            .collect();
        if positions.len() > 1 {
            return Err(StrategyError::SchemaMismatch(format!(
                "criteria header '{}' appears in columns {}; option labels must be unique",
                option,
                positions.join(", ")
            )));
        }
    }
    Ok(())
}
