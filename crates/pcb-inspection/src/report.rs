//! Pass/fail report over an inspection tree.
//!
//! Lists every node whose local defect flag is set and whether a repaired
//! node on the way down from the root suppresses it. The report passes
//! exactly when the root's aggregate [`InspectionObject::is_defect`] is
//! false, i.e. when no finding is active.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::navigate::{walk, NodePath};
use crate::object::{InspectionObject, NodeKind};

/// A node carrying a local defect flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectFinding {
    pub path: String,
    pub kind: NodeKind,
    pub label: String,
    /// Path of the nearest repaired node at or above this one, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppressed_by: Option<String>,
}

impl DefectFinding {
    pub fn is_active(&self) -> bool {
        self.suppressed_by.is_none()
    }
}

/// Aggregate verdict for one board (or sub-board).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardVerdict {
    pub path: String,
    pub defective: bool,
    pub repaired: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCounts {
    pub panels: usize,
    pub boards: usize,
    pub components: usize,
    pub fiducials: usize,
}

impl NodeCounts {
    fn record(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::Panel => self.panels += 1,
            NodeKind::Board => self.boards += 1,
            NodeKind::Component => self.components += 1,
            NodeKind::Fiducial => self.fiducials += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.panels + self.boards + self.components + self.fiducials
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefectReport {
    pub passed: bool,
    pub root_kind: NodeKind,
    pub counts: NodeCounts,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<DefectFinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boards: Vec<BoardVerdict>,
    pub generated_at: DateTime<Utc>,
}

impl DefectReport {
    pub fn from_root(root: &dyn InspectionObject) -> Self {
        let mut counts = NodeCounts::default();
        let mut findings = Vec::new();
        let mut boards = Vec::new();
        // Nearest repaired node on the current root-to-node path.
        let mut repaired_stack: Vec<NodePath> = Vec::new();

        walk(root, |path, node| {
            while repaired_stack
                .last()
                .is_some_and(|r| !path.slots().starts_with(r.slots()))
            {
                repaired_stack.pop();
            }
            if node.is_repaired() {
                repaired_stack.push(path.clone());
            }

            counts.record(node.kind());

            if node.local_defect() {
                findings.push(DefectFinding {
                    path: path.to_string(),
                    kind: node.kind(),
                    label: node.as_node().label(),
                    suppressed_by: repaired_stack.last().map(|r| r.to_string()),
                });
            }

            if node.kind() == NodeKind::Board {
                boards.push(BoardVerdict {
                    path: path.to_string(),
                    defective: node.is_defect(),
                    repaired: node.is_repaired(),
                });
            }
        });

        let passed = !root.is_defect();
        tracing::debug!(
            passed,
            nodes = counts.total(),
            findings = findings.len(),
            "Built defect report"
        );

        Self {
            passed,
            root_kind: root.kind(),
            counts,
            findings,
            boards,
            generated_at: Utc::now(),
        }
    }

    pub fn active_findings(&self) -> impl Iterator<Item = &DefectFinding> {
        self.findings.iter().filter(|f| f.is_active())
    }

    pub fn suppressed_findings(&self) -> impl Iterator<Item = &DefectFinding> {
        self.findings.iter().filter(|f| !f.is_active())
    }

    pub fn defective_boards(&self) -> impl Iterator<Item = &BoardVerdict> {
        self.boards.iter().filter(|b| b.defective)
    }
}
