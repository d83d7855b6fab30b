//! PCB inspection document checker
//!
//! # Usage
//!
//! ```bash
//! # Report pass/fail and every defect in a panel document
//! pcb-inspect check --file panel.json --format table
//!
//! # Print the board hierarchy with per-node status
//! pcb-inspect tree --file panel.yaml
//!
//! # Re-emit a document in canonical form (empty sub-board lists dropped)
//! pcb-inspect normalize --file panel.json --to yaml --output panel.yaml
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - panel passed (or command completed)
//! - 1: Panel has at least one active defect
//! - 3: Invalid input or document
//! - 4: File not found or inaccessible
//! - 10: Internal error

use clap::Parser;
use pcb_inspect::{run_cli, InspectCli};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = InspectCli::parse();

    let level = if cli.quiet {
        tracing::Level::ERROR
    } else {
        match cli.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
