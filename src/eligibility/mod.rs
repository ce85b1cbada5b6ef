//! @acp:module "Eligibility Filter"
//! @acp:summary "Conjunctive marker match over the eligibility matrix"
//! @acp:domain cli
//! @acp:layer logic
//!
//! A row qualifies for a (role, lifecycle, journey) triple when all three
//! corresponding cells, lower-cased, equal the marker. Output follows matrix
//! row order.

use std::collections::HashSet;

use serde::Serialize;

use crate::config::DuplicatePolicy;
use crate::error::{Result, StrategyError};

/// One body row of the matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    /// Imperative name; `None` when the cell is blank
    pub imperative: Option<String>,
    /// Cell text aligned with [`EligibilityMatrix::headers`]
    pub cells: Vec<String>,
}

/// @acp:summary "Read-only imperative-by-criterion table"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityMatrix {
    headers: Vec<String>,
    rows: Vec<MatrixRow>,
    marker: String,
    duplicates: DuplicatePolicy,
}

impl EligibilityMatrix {
    pub fn new(headers: Vec<String>, rows: Vec<MatrixRow>, marker: &str) -> Self {
        Self {
            headers,
            rows,
            marker: marker.to_lowercase(),
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Position of a criterion column by its header label
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn is_marked(&self, row: &MatrixRow, col: usize) -> bool {
        row.cells
            .get(col)
            .map(|cell| cell.to_lowercase() == self.marker)
            .unwrap_or(false)
    }
}

/// Imperatives applicable to a (role, lifecycle, journey) triple
pub fn filter(
    matrix: &EligibilityMatrix,
    role: &str,
    lifecycle: &str,
    journey: &str,
) -> Result<Vec<String>> {
    let missing: Vec<&str> = [role, lifecycle, journey]
        .into_iter()
        .filter(|name| matrix.column(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(StrategyError::SchemaMismatch(format!(
            "eligibility matrix has no column for {}",
            missing
                .iter()
                .map(|m| format!("'{}'", m))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    // Checked above.
    let cols = [role, lifecycle, journey].map(|name| matrix.column(name).unwrap_or(usize::MAX));

    let mut seen: HashSet<&str> = HashSet::new();
    let mut result = Vec::new();
    for row in matrix.rows() {
        let Some(name) = row.imperative.as_deref() else {
            continue;
        };
        if name.trim().is_empty() {
            continue;
        }
        if !cols.iter().all(|&col| matrix.is_marked(row, col)) {
            continue;
        }
        if matrix.duplicates == DuplicatePolicy::FirstOccurrence && !seen.insert(name) {
            tracing::debug!("Dropping repeated imperative '{}'", name);
            continue;
        }
        result.push(name.to_string());
    }

    tracing::debug!(
        "Filter ({}, {}, {}) matched {} imperatives",
        role,
        lifecycle,
        journey,
        result.len()
    );
    Ok(result)
}
