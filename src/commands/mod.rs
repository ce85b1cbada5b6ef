//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod check;
pub mod imperatives;
pub mod init;
pub mod options;
pub mod output;
pub mod recommend;
pub mod run;

pub use check::execute_check;
pub use imperatives::{execute_imperatives, ImperativesOptions};
pub use init::{execute_init, InitOptions};
pub use options::{execute_options, OptionsOptions};
pub use output::{format_outcome, format_record};
pub use recommend::{execute_recommend, RecommendOptions};
pub use run::execute_run;
