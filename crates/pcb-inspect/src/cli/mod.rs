//! CLI module for the PCB inspection checker
//!
//! Provides command definitions, command execution and output rendering
//! for checking inspection documents, printing their hierarchy and
//! re-emitting them in canonical form.

pub mod commands;
pub mod output;

pub use commands::{InspectCli, InspectCommands};
pub use output::OutputFormat;

use pcb_inspection::TreeConfig;

use crate::error::{CliError, Result};

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution, panel passed
    Success = 0,
    /// Panel reports at least one active defect
    Defective = 1,
    /// Invalid input, arguments or document
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from the panel verdict
    pub fn from_verdict(passed: bool) -> Self {
        if passed {
            ExitCode::Success
        } else {
            ExitCode::Defective
        }
    }

    pub fn from_error(err: &CliError) -> Self {
        if err.is_file_error() {
            ExitCode::FileError
        } else if err.is_user_error() {
            ExitCode::InvalidInput
        } else {
            ExitCode::InternalError
        }
    }
}

/// Resolve the tree configuration: explicit file first, then environment.
fn resolve_config(path: Option<&std::path::Path>) -> Result<TreeConfig> {
    match path {
        Some(path) => Ok(TreeConfig::load(path)?),
        None => {
            let config = TreeConfig::from_env();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: InspectCli) -> Result<ExitCode> {
    let config = resolve_config(cli.config.as_deref())?;
    tracing::debug!(?config, "Resolved tree config");

    match cli.command {
        InspectCommands::Check { file, format } => {
            commands::execute_check(&file, format.unwrap_or_default(), &config)
        }
        InspectCommands::Tree { file, format } => {
            commands::execute_tree(&file, format.unwrap_or_default(), &config)
        }
        InspectCommands::Normalize { file, to, output } => {
            commands::execute_normalize(&file, to, output.as_deref(), &config)
        }
    }
}
