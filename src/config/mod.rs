//! @acp:module "Configuration"
//! @acp:summary "Workbook layout, role routing, and generator settings"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::StrategyError;

pub mod columns;

pub use columns::{column_index, column_letters, ColumnSpan};

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".stratnav.config.json";

fn default_version() -> String {
    "1.0.0".to_string()
}

/// @acp:summary "Main stratnav configuration structure"
/// @acp:lock normal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Config format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Where the reference tables live inside the workbook
    #[serde(default)]
    pub workbook: WorkbookConfig,

    /// Completion service settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            workbook: WorkbookConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load and validate config from a JSON file"
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load from default location or fall back to defaults"
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Check values serde cannot express as types
    pub fn validate(&self) -> crate::Result<()> {
        let criteria = &self.workbook.criteria;
        if criteria.marker.chars().count() != 1 {
            return Err(StrategyError::Configuration(format!(
                "criteria marker must be a single character, got {:?}",
                criteria.marker
            )));
        }
        if criteria.imperative_column.trim().is_empty() {
            return Err(StrategyError::Configuration(
                "criteria imperative_column must not be empty".to_string(),
            ));
        }
        if self.workbook.differentiators.column.trim().is_empty() {
            return Err(StrategyError::Configuration(
                "differentiators column must not be empty".to_string(),
            ));
        }

        let tactics = &self.workbook.tactics;
        if tactics.imperative_column.trim().is_empty() {
            return Err(StrategyError::Configuration(
                "tactics imperative_column must not be empty".to_string(),
            ));
        }
        tactics.routing.validate()?;

        let generator = &self.generator;
        if !(0.0..=2.0).contains(&generator.temperature) {
            return Err(StrategyError::Configuration(format!(
                "generator temperature must be within 0.0..=2.0, got {}",
                generator.temperature
            )));
        }
        if generator.timeout_secs == 0 {
            return Err(StrategyError::Configuration(
                "generator timeout_secs must be greater than zero".to_string(),
            ));
        }
        if generator.model.trim().is_empty() {
            return Err(StrategyError::Configuration(
                "generator model must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Workbook layout
// =============================================================================

fn default_workbook_path() -> PathBuf {
    PathBuf::from("test.xlsx")
}

/// @acp:summary "Workbook file and the layout of its three tables"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookConfig {
    /// Path to the workbook (.xlsx, .xls, .ods)
    #[serde(default = "default_workbook_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub criteria: CriteriaLayout,

    #[serde(default)]
    pub differentiators: DifferentiatorLayout,

    #[serde(default)]
    pub tactics: TacticsLayout,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            path: default_workbook_path(),
            criteria: CriteriaLayout::default(),
            differentiators: DifferentiatorLayout::default(),
            tactics: TacticsLayout::default(),
        }
    }
}

/// A sheet addressed by zero-based position or by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetRef {
    Index(usize),
    Name(String),
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetRef::Index(i) => write!(f, "sheet #{}", i + 1),
            SheetRef::Name(name) => write!(f, "sheet '{}'", name),
        }
    }
}

fn default_imperative_column() -> String {
    "Strategic Imperative".to_string()
}

fn default_marker() -> String {
    "x".to_string()
}

/// How the eligibility filter treats repeated imperative names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Keep only the first row carrying a given name
    #[default]
    #[serde(rename = "first")]
    FirstOccurrence,
    /// Return every matching row, repeats included
    #[serde(rename = "keep")]
    KeepAll,
}

/// @acp:summary "Criteria sheet: option header spans and the eligibility matrix"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaLayout {
    #[serde(default = "SheetRef::first")]
    pub sheet: SheetRef,

    /// Zero-based row holding the column labels
    #[serde(default)]
    pub header_row: usize,

    /// Header label of the imperative name column
    #[serde(default = "default_imperative_column")]
    pub imperative_column: String,

    /// Header span holding the role options
    #[serde(default = "ColumnSpan::default_roles")]
    pub roles: ColumnSpan,

    /// Header span holding the lifecycle options
    #[serde(default = "ColumnSpan::default_lifecycles")]
    pub lifecycles: ColumnSpan,

    /// Header span holding the journey options
    #[serde(default = "ColumnSpan::default_journeys")]
    pub journeys: ColumnSpan,

    /// Affirmative cell marker, compared case-insensitively
    #[serde(default = "default_marker")]
    pub marker: String,

    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

impl Default for CriteriaLayout {
    fn default() -> Self {
        Self {
            sheet: SheetRef::first(),
            header_row: 0,
            imperative_column: default_imperative_column(),
            roles: ColumnSpan::default_roles(),
            lifecycles: ColumnSpan::default_lifecycles(),
            journeys: ColumnSpan::default_journeys(),
            marker: default_marker(),
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl SheetRef {
    fn first() -> Self {
        SheetRef::Index(0)
    }

    fn second() -> Self {
        SheetRef::Index(1)
    }

    fn third() -> Self {
        SheetRef::Index(2)
    }
}

fn default_differentiator_column() -> String {
    "Product Differentiators".to_string()
}

/// @acp:summary "Differentiator sheet: a single named column"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifferentiatorLayout {
    #[serde(default = "SheetRef::second")]
    pub sheet: SheetRef,

    #[serde(default)]
    pub header_row: usize,

    #[serde(default = "default_differentiator_column")]
    pub column: String,
}

impl Default for DifferentiatorLayout {
    fn default() -> Self {
        Self {
            sheet: SheetRef::second(),
            header_row: 0,
            column: default_differentiator_column(),
        }
    }
}

/// @acp:summary "Tactics sheet: imperative key plus role-routed text columns"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TacticsLayout {
    #[serde(default = "SheetRef::third")]
    pub sheet: SheetRef,

    #[serde(default)]
    pub header_row: usize,

    #[serde(default = "default_imperative_column")]
    pub imperative_column: String,

    #[serde(default)]
    pub routing: RoleRouting,
}

impl Default for TacticsLayout {
    fn default() -> Self {
        Self {
            sheet: SheetRef::third(),
            header_row: 0,
            imperative_column: default_imperative_column(),
            routing: RoleRouting::default(),
        }
    }
}

/// One entry of the role routing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRoute {
    /// Role option names routed to `column`
    pub roles: Vec<String>,
    /// Header label of the tactic column to read
    pub column: String,
}

/// @acp:summary "Explicit role-to-tactic-column mapping"
///
/// Routes are checked in order; the first listing the role wins. Roles not
/// listed anywhere read `default_column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRouting {
    #[serde(default)]
    pub routes: Vec<RoleRoute>,
    pub default_column: String,
}

impl Default for RoleRouting {
    fn default() -> Self {
        Self {
            routes: vec![RoleRoute {
                roles: vec!["HCP".to_string()],
                column: "HCP".to_string(),
            }],
            default_column: "Patient/Caregiver".to_string(),
        }
    }
}

impl RoleRouting {
    /// Tactic column label for a role
    pub fn column_for(&self, role: &str) -> &str {
        let role = role.trim();
        self.routes
            .iter()
            .find(|route| route.roles.iter().any(|r| r.trim().eq_ignore_ascii_case(role)))
            .map(|route| route.column.as_str())
            .unwrap_or(self.default_column.as_str())
    }

    /// Every column the routing can select, default last
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for route in &self.routes {
            if !columns.contains(&route.column.as_str()) {
                columns.push(route.column.as_str());
            }
        }
        if !columns.contains(&self.default_column.as_str()) {
            columns.push(self.default_column.as_str());
        }
        columns
    }

    fn validate(&self) -> crate::Result<()> {
        if self.default_column.trim().is_empty() {
            return Err(StrategyError::Configuration(
                "tactics routing default_column must not be empty".to_string(),
            ));
        }
        for route in &self.routes {
            if route.column.trim().is_empty() {
                return Err(StrategyError::Configuration(
                    "tactics routing column must not be empty".to_string(),
                ));
            }
            if route.roles.is_empty() {
                return Err(StrategyError::Configuration(format!(
                    "tactics route for column '{}' lists no roles",
                    route.column
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Completion service
// =============================================================================

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_system_prompt() -> String {
    "You are an expert pharmaceutical marketing strategist.".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

/// @acp:summary "OpenAI-compatible completion client settings"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// API root; `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// System message sent ahead of every prompt
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Handlebars template for the user prompt (built-in template when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts after a transient failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between attempts, multiplied by the attempt number
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
            prompt_template: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "workbook": { "path": "data.xlsx", "criteria": { "marker": "X" } } }"#,
        )
        .unwrap();
        assert_eq!(config.workbook.path, PathBuf::from("data.xlsx"));
        assert_eq!(config.workbook.criteria.marker, "X");
        assert_eq!(config.workbook.criteria.roles.to_string(), "B:D");
        assert_eq!(config.workbook.tactics.sheet, SheetRef::Index(2));
        assert_eq!(config.generator.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_sheet_ref_accepts_index_or_name() {
        let by_index: SheetRef = serde_json::from_str("1").unwrap();
        let by_name: SheetRef = serde_json::from_str("\"Tactics\"").unwrap();
        assert_eq!(by_index, SheetRef::Index(1));
        assert_eq!(by_name, SheetRef::Name("Tactics".to_string()));
    }

    #[test]
    fn test_multi_char_marker_rejected() {
        let mut config = Config::default();
        config.workbook.criteria.marker = "yes".to_string();
        assert!(matches!(
            config.validate(),
            Err(StrategyError::Configuration(_))
        ));
    }

    #[test]
    fn test_duplicate_policy_names() {
        let keep: DuplicatePolicy = serde_json::from_str("\"keep\"").unwrap();
        assert_eq!(keep, DuplicatePolicy::KeepAll);
        assert_eq!(
            serde_json::to_string(&DuplicatePolicy::FirstOccurrence).unwrap(),
            "\"first\""
        );
    }

    #[test]
    fn test_routing_is_case_insensitive_and_falls_back() {
        let routing = RoleRouting::default();
        assert_eq!(routing.column_for("HCP"), "HCP");
        assert_eq!(routing.column_for(" hcp "), "HCP");
        assert_eq!(routing.column_for("Patient"), "Patient/Caregiver");
        assert_eq!(routing.columns(), vec!["HCP", "Patient/Caregiver"]);
    }

    #[test]
    fn test_routing_with_extra_roles() {
        let routing = RoleRouting {
            routes: vec![
                RoleRoute {
                    roles: vec!["HCP".to_string(), "Pharmacist".to_string()],
                    column: "Clinical".to_string(),
                },
                RoleRoute {
                    roles: vec!["Payer".to_string()],
                    column: "Access".to_string(),
                },
            ],
            default_column: "Consumer".to_string(),
        };
        assert_eq!(routing.column_for("Pharmacist"), "Clinical");
        assert_eq!(routing.column_for("Payer"), "Access");
        assert_eq!(routing.column_for("Caregiver"), "Consumer");
    }

    #[test]
    fn test_load_rejects_bad_temperature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "generator": { "temperature": 3.5 } }"#).unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(StrategyError::Configuration(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.workbook.criteria.journeys = "K:N".parse().unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.workbook.criteria.journeys.to_string(), "K:N");
    }
}
