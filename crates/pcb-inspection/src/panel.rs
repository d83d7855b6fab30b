//! Panel: root container of one or more boards.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::geometry::GeometricObject;
use crate::navigate::NodeRef;
use crate::object::{Children, Collection, InspectionObject, NodeKind, Slot};
use crate::serde_ext::non_null_items;

/// Top-level container as produced by the inspection station.
///
/// Unlike a board's sub-board list, the panel's `Boards` field is
/// always externalized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Panel {
    #[serde(rename = "Boards", default, deserialize_with = "non_null_items")]
    pub boards: Vec<Board>,

    #[serde(flatten)]
    pub geometry: GeometricObject,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a panel from its boards and link every parent reference.
    pub fn from_boards(boards: impl IntoIterator<Item = Board>) -> Self {
        let mut panel = Self {
            boards: boards.into_iter().collect(),
            geometry: GeometricObject::new(),
        };
        panel.update_parent_reference(None);
        panel
    }

    pub fn with_board(mut self, board: Board) -> Self {
        self.boards.push(board);
        self
    }

    /// Top-level boards in insertion order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    pub fn board_mut(&mut self, index: usize) -> Option<&mut Board> {
        self.boards.get_mut(index)
    }

    /// Indexes of the top-level boards that currently report a defect.
    pub fn defective_boards(&self) -> Vec<usize> {
        self.boards
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_defect())
            .map(|(i, _)| i)
            .collect()
    }
}

impl InspectionObject for Panel {
    fn base(&self) -> &GeometricObject {
        &self.geometry
    }

    fn base_mut(&mut self) -> &mut GeometricObject {
        &mut self.geometry
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Panel
    }

    fn children(&self) -> Children<'_> {
        Box::new(
            self.boards
                .iter()
                .enumerate()
                .map(|(i, b)| (Slot::new(Collection::Boards, i), b as &dyn InspectionObject)),
        )
    }

    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut dyn InspectionObject)) {
        for board in &mut self.boards {
            f(board as &mut dyn InspectionObject);
        }
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Panel(self)
    }
}
