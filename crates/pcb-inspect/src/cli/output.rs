//! Output formatting for the PCB inspection CLI
//!
//! Renders defect reports and tree listings as colored tables, JSON or
//! YAML.

use std::io::Write;

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use pcb_inspection::navigate::walk;
use pcb_inspection::{DefectReport, InspectionObject, NodeKind};

use crate::error::{CliError, Result};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// One row of the hierarchy listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeLine {
    pub path: String,
    pub kind: NodeKind,
    pub label: String,
    pub depth: usize,
    pub defective: bool,
    pub local_defect: bool,
    pub repaired: bool,
}

/// Flatten a tree into pre-order rows.
pub fn tree_lines(root: &dyn InspectionObject) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    walk(root, |path, node| {
        lines.push(TreeLine {
            path: path.to_string(),
            kind: node.kind(),
            label: node.as_node().label(),
            depth: path.len(),
            defective: node.is_defect(),
            local_defect: node.local_defect(),
            repaired: node.is_repaired(),
        });
    });
    lines
}

fn write_structured<T: Serialize>(value: &T, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| CliError::Output(e.to_string()))?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| CliError::Output(e.to_string()))?
        }
        OutputFormat::Table => {
            return Err(CliError::InvalidInput(
                "table output is not structured".to_string(),
            ))
        }
    };
    writeln!(out, "{}", text)?;
    Ok(())
}

/// Render a defect report in the specified format
pub fn render_report(report: &DefectReport, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Table => render_report_table(report, out),
        structured => write_structured(report, structured, out),
    }
}

fn render_report_table(report: &DefectReport, out: &mut dyn Write) -> Result<()> {
    let active = report.active_findings().count();

    writeln!(out)?;
    writeln!(out, "{}", "Inspection Results".cyan().bold())?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out)?;

    if report.passed {
        writeln!(out, "{} {} passed", "+".green(), report.root_kind)?;
    } else {
        writeln!(
            out,
            "{} {} failed with {} active defect(s)",
            "x".red(),
            report.root_kind,
            active
        )?;
    }
    writeln!(out)?;

    writeln!(out, "{}", "Statistics:".cyan().bold())?;
    writeln!(out, "  Boards:     {}", report.counts.boards)?;
    writeln!(out, "  Components: {}", report.counts.components)?;
    writeln!(out, "  Fiducials:  {}", report.counts.fiducials)?;

    if !report.findings.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Findings:".cyan().bold())?;
        writeln!(out, "{}", "-".repeat(60))?;
        for finding in &report.findings {
            match &finding.suppressed_by {
                None => writeln!(
                    out,
                    "{} {} {} {}",
                    "x".red(),
                    "DEFECT".red().bold(),
                    finding.label,
                    finding.path.cyan()
                )?,
                Some(repaired_at) => writeln!(
                    out,
                    "{} {} {} {} (repaired at {})",
                    "r".yellow(),
                    "REPAIRED".yellow().bold(),
                    finding.label,
                    finding.path.cyan(),
                    repaired_at
                )?,
            }
        }
    }

    if !report.boards.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Boards:".cyan().bold())?;
        for board in &report.boards {
            let icon = if board.defective {
                "x".red()
            } else {
                "+".green()
            };
            writeln!(out, "  {} {}", icon, board.path)?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Generated at {}",
        report.generated_at.to_rfc3339().dimmed()
    )?;
    out.flush()?;
    Ok(())
}

/// Render a hierarchy listing in the specified format
pub fn render_tree(lines: &[TreeLine], format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    if format != OutputFormat::Table {
        return write_structured(&lines, format, out);
    }

    for line in lines {
        let icon = if line.repaired {
            "r".yellow()
        } else if line.defective {
            "x".red()
        } else {
            "+".green()
        };
        let name = if line.depth == 0 {
            line.label.clone()
        } else {
            format!("{} {}", line.label, line.path.dimmed())
        };
        writeln!(out, "{}{} {}", "  ".repeat(line.depth), icon, name)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcb_inspection::{Board, Component, Fiducial, Panel};

    fn sample_panel() -> Panel {
        Panel::from_boards(vec![
            Board::new().with_component(Component::designated("R1")),
            Board::new()
                .with_fiducial(Fiducial::new().defective())
                .with_board(
                    Board::new()
                        .with_component(Component::designated("U7").defective())
                        .repaired(),
                ),
        ])
    }

    #[test]
    fn test_tree_lines_follow_structure() {
        let lines = tree_lines(&sample_panel());
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0].kind, NodeKind::Panel);
        assert_eq!(lines[0].depth, 0);
        assert_eq!(lines[2].label, "R1");
        assert_eq!(lines[5].path, "Boards[1]/Boards[0]");
        assert!(lines[5].repaired);
        assert!(!lines[5].defective);
        assert!(lines[6].local_defect);
    }

    #[test]
    fn test_report_table_mentions_active_and_repaired() {
        let report = DefectReport::from_root(&sample_panel());
        let mut buf = Vec::new();
        render_report(&report, OutputFormat::Table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("1 active defect(s)"));
        assert!(text.contains("Boards[1]/Fiducials[0]"));
        assert!(text.contains("U7"));
        assert!(text.contains("repaired at Boards[1]/Boards[0]"));
    }

    #[test]
    fn test_report_json_is_parseable() {
        let report = DefectReport::from_root(&sample_panel());
        let mut buf = Vec::new();
        render_report(&report, OutputFormat::Json, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["passed"], false);
        assert_eq!(value["findings"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_tree_yaml_output() {
        let lines = tree_lines(&sample_panel());
        let mut buf = Vec::new();
        render_tree(&lines, OutputFormat::Yaml, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Boards[1]/Fiducials[0]"));
        assert!(text.contains("kind: fiducial"));
    }
}
