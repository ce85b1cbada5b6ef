//! @acp:module "Differentiator Catalog"
//! @acp:summary "Flat list of selectable product differentiators"
//! @acp:domain cli
//! @acp:layer io

use serde::Serialize;

use super::workbook::Grid;
use crate::config::DifferentiatorLayout;
use crate::error::Result;

/// Differentiator names in sheet order, blanks and repeats removed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DifferentiatorCatalog {
    names: Vec<String>,
}

impl DifferentiatorCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for name in names {
            catalog.push(name.into());
        }
        catalog
    }

    pub fn from_grid(grid: &Grid, layout: &DifferentiatorLayout) -> Result<Self> {
        let col = grid.require_column(layout.header_row, &layout.column, "differentiators")?;
        let catalog = Self::new(grid.body(layout.header_row).map(|(row, _)| grid.cell(row, col)));
        tracing::info!("Loaded {} differentiators", catalog.len());
        Ok(catalog)
    }

    fn push(&mut self, name: String) {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return;
        }
        self.names.push(name.to_string());
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrategyError;

    #[test]
    fn test_blank_and_repeated_names_dropped() {
        let grid = Grid::from_rows(vec![
            vec!["Product Differentiators"],
            vec!["Once-daily dosing"],
            vec![""],
            vec!["Oral formulation"],
            vec!["Once-daily dosing"],
            vec!["  "],
        ]);
        let catalog = DifferentiatorCatalog::from_grid(&grid, &DifferentiatorLayout::default()).unwrap();
        assert_eq!(catalog.names(), ["Once-daily dosing", "Oral formulation"]);
    }

    #[test]
    fn test_missing_column() {
        let grid = Grid::from_rows(vec![vec!["Features"], vec!["Fast"]]);
        let err = DifferentiatorCatalog::from_grid(&grid, &DifferentiatorLayout::default()).unwrap_err();
        assert!(matches!(err, StrategyError::SchemaMismatch(_)));
    }
}
