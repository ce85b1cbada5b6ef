//! @acp:module "Tactic Resolver"
//! @acp:summary "Resolve role-routed tactic text for an imperative"
//! @acp:domain cli
//! @acp:layer logic

use super::workbook::Grid;
use crate::config::{RoleRouting, TacticsLayout};
use crate::error::{Result, StrategyError};

#[derive(Debug, Clone, PartialEq, Eq)]
struct TacticRow {
    imperative: String,
    /// Text per routed column, aligned with `TacticsTable::columns`
    texts: Vec<String>,
}

/// @acp:summary "Tactics keyed by imperative with one text column per route"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TacticsTable {
    routing: RoleRouting,
    columns: Vec<String>,
    rows: Vec<TacticRow>,
}

impl TacticsTable {
    /// Read the tactics sheet; every routed column must be present
    pub fn from_grid(grid: &Grid, layout: &TacticsLayout) -> Result<Self> {
        let key_col = grid.require_column(layout.header_row, &layout.imperative_column, "tactics")?;

        let columns: Vec<String> = layout
            .routing
            .columns()
            .into_iter()
            .map(str::to_string)
            .collect();
        let positions = columns
            .iter()
            .map(|c| grid.require_column(layout.header_row, c, "tactics"))
            .collect::<Result<Vec<_>>>()?;

        let rows: Vec<TacticRow> = grid
            .body(layout.header_row)
            .filter_map(|(row, _)| {
                let imperative = grid.cell(row, key_col).trim();
                if imperative.is_empty() {
                    return None;
                }
                Some(TacticRow {
                    imperative: imperative.to_string(),
                    texts: positions
                        .iter()
                        .map(|&col| grid.cell(row, col).trim().to_string())
                        .collect(),
                })
            })
            .collect();

        tracing::info!("Loaded {} tactic rows", rows.len());
        Ok(Self {
            routing: layout.routing.clone(),
            columns,
            rows,
        })
    }

    pub fn routing(&self) -> &RoleRouting {
        &self.routing
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tactic text for `imperative`, read from the column `role` routes to
    pub fn resolve(&self, imperative: &str, role: &str) -> Result<String> {
        let key = imperative.trim();
        let mut matches = self.rows.iter().filter(|r| r.imperative == key);
        let row = matches
            .next()
            .ok_or_else(|| StrategyError::NotFound(format!("no tactic row for '{}'", key)))?;
        if matches.next().is_some() {
            tracing::debug!("Multiple tactic rows for '{}', using the first", key);
        }

        let column = self.routing.column_for(role);
        let idx = self
            .columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| {
                StrategyError::SchemaMismatch(format!("tactics table has no column '{}'", column))
            })?;

        let text = &row.texts[idx];
        if text.is_empty() {
            return Err(StrategyError::NotFound(format!(
                "tactic for '{}' is blank in column '{}'",
                key, column
            )));
        }
        tracing::debug!("Resolved '{}' for role '{}' from column '{}'", key, role, column);
        Ok(text.clone())
    }
}
