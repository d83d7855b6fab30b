//! CLI command definitions for the PCB inspection checker
//!
//! Provides Clap-based command definitions for checking panel
//! documents, listing their hierarchy and normalizing them.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use pcb_inspection::codec::{self, Format};
use pcb_inspection::{DefectReport, TreeConfig};

use super::output::{self, OutputFormat};
use super::ExitCode;
use crate::error::Result;

/// PCB inspection checker
///
/// Check inspection-result documents for defects, print their board
/// hierarchy and re-emit them in canonical form.
#[derive(Parser, Debug)]
#[command(name = "pcb-inspect")]
#[command(about = "PCB inspection checker - Check and inspect inspection-result trees", long_about = None)]
#[command(version)]
pub struct InspectCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Tree configuration file (TOML)
    ///
    /// Without it, limits come from PCB_TREE_* environment variables.
    #[arg(long, global = true, env = "PCB_TREE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: InspectCommands,
}

/// Available inspection commands
#[derive(Subcommand, Debug)]
pub enum InspectCommands {
    /// Report pass/fail and every defect in a panel
    Check {
        /// Panel document (.json, .yaml or .yml)
        #[arg(short, long)]
        file: PathBuf,

        /// Output format for the report
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },

    /// Print the panel hierarchy with per-node status
    Tree {
        /// Panel document (.json, .yaml or .yml)
        #[arg(short, long)]
        file: PathBuf,

        /// Output format for the listing
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },

    /// Re-emit a panel document in canonical form
    ///
    /// Null list entries are dropped and empty sub-board lists are
    /// omitted.
    Normalize {
        /// Panel document to read
        #[arg(short, long)]
        file: PathBuf,

        /// Target document format (defaults to the output or input extension)
        #[arg(long, value_enum)]
        to: Option<DocumentFormat>,

        /// Write here instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Document formats accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl From<DocumentFormat> for Format {
    fn from(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Json => Format::Json,
            DocumentFormat::Yaml => Format::Yaml,
        }
    }
}

/// Execute the check command
pub fn execute_check(file: &Path, format: OutputFormat, config: &TreeConfig) -> Result<ExitCode> {
    let panel = codec::load_panel(file, config)?;
    let report = DefectReport::from_root(&panel);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render_report(&report, format, &mut out)?;

    if !report.passed {
        tracing::info!(
            file = %file.display(),
            active = report.active_findings().count(),
            "Panel failed inspection"
        );
    }
    Ok(ExitCode::from_verdict(report.passed))
}

/// Execute the tree command
pub fn execute_tree(file: &Path, format: OutputFormat, config: &TreeConfig) -> Result<ExitCode> {
    let panel = codec::load_panel(file, config)?;
    let lines = output::tree_lines(&panel);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render_tree(&lines, format, &mut out)?;
    Ok(ExitCode::Success)
}

/// Pick the output document format: explicit flag, then output file
/// extension, then input file extension.
fn target_format(to: Option<DocumentFormat>, input: &Path, output: Option<&Path>) -> Result<Format> {
    if let Some(to) = to {
        return Ok(to.into());
    }
    match output {
        Some(path) => Ok(Format::from_path(path)?),
        None => Ok(Format::from_path(input)?),
    }
}

/// Execute the normalize command
pub fn execute_normalize(
    file: &Path,
    to: Option<DocumentFormat>,
    output: Option<&Path>,
    config: &TreeConfig,
) -> Result<ExitCode> {
    let panel = codec::load_panel(file, config)?;
    let format = target_format(to, file, output)?;
    let text = codec::encode(&panel, format, true)?;

    match output {
        Some(path) => {
            std::fs::write(path, &text).map_err(pcb_inspection::TreeError::from)?;
            tracing::info!(path = %path.display(), %format, "Wrote normalized panel");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{}", text)?;
        }
    }
    Ok(ExitCode::Success)
}
