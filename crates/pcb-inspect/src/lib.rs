//! Command-line front end for the `pcb-inspection` tree.
//!
//! Loads a panel document, checks its defect status and renders the
//! result as a colored table, JSON or YAML. Tree semantics live entirely
//! in `pcb-inspection`; this crate only handles arguments, configuration
//! lookup and output.

pub mod cli;
pub mod error;

pub use cli::{ExitCode, InspectCli, InspectCommands, OutputFormat};
pub use error::CliError;

/// Run the CLI application and map any failure to an exit code.
pub fn run_cli(cli: InspectCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}
