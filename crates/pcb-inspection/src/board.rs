//! Board: composite inspection object.
//!
//! A board owns its fiducials, components and sub-boards in insertion
//! order. Sub-boards have the same shape, so boards nest to any depth.

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::fiducial::Fiducial;
use crate::geometry::{GeometricObject, Position};
use crate::navigate::NodeRef;
use crate::object::{Children, Collection, InspectionObject, NodeKind, Slot};
use crate::serde_ext::non_null_items;

/// A printed circuit board (or sub-board of a multi-up board).
///
/// `Fiducials` and `Components` are always externalized. `Boards` is
/// omitted when empty and reads back as empty when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    #[serde(rename = "Fiducials", default, deserialize_with = "non_null_items")]
    pub fiducials: Vec<Fiducial>,

    #[serde(rename = "Components", default, deserialize_with = "non_null_items")]
    pub components: Vec<Component>,

    #[serde(
        rename = "Boards",
        default,
        deserialize_with = "non_null_items",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub boards: Vec<Board>,

    #[serde(flatten)]
    pub geometry: GeometricObject,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.geometry.position = Some(position);
        self
    }

    pub fn with_fiducial(mut self, fiducial: Fiducial) -> Self {
        self.fiducials.push(fiducial);
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_board(mut self, board: Board) -> Self {
        self.boards.push(board);
        self
    }

    /// Builder-style local defect flag.
    pub fn defective(mut self) -> Self {
        self.geometry.defect = true;
        self
    }

    /// Builder-style repaired flag.
    pub fn repaired(mut self) -> Self {
        self.geometry.repaired = true;
        self
    }

    /// Find a component by reference designator, searching sub-boards too.
    pub fn component(&self, reference_designator: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.reference_designator.as_deref() == Some(reference_designator))
            .or_else(|| {
                self.boards
                    .iter()
                    .find_map(|b| b.component(reference_designator))
            })
    }
}

impl InspectionObject for Board {
    fn base(&self) -> &GeometricObject {
        &self.geometry
    }

    fn base_mut(&mut self) -> &mut GeometricObject {
        &mut self.geometry
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Board
    }

    fn children(&self) -> Children<'_> {
        let fiducials = self.fiducials.iter().enumerate().map(|(i, f)| {
            (Slot::new(Collection::Fiducials, i), f as &dyn InspectionObject)
        });
        let components = self.components.iter().enumerate().map(|(i, c)| {
            (Slot::new(Collection::Components, i), c as &dyn InspectionObject)
        });
        let boards = self
            .boards
            .iter()
            .enumerate()
            .map(|(i, b)| (Slot::new(Collection::Boards, i), b as &dyn InspectionObject));

        Box::new(fiducials.chain(components).chain(boards))
    }

    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut dyn InspectionObject)) {
        for fiducial in &mut self.fiducials {
            f(fiducial as &mut dyn InspectionObject);
        }
        for component in &mut self.components {
            f(component as &mut dyn InspectionObject);
        }
        for board in &mut self.boards {
            f(board as &mut dyn InspectionObject);
        }
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Board(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defective_component_makes_board_defective() {
        let board = Board::new().with_component(Component::designated("C1").defective());
        assert!(!board.local_defect());
        assert!(board.is_defect());
    }

    #[test]
    fn test_repaired_board_with_local_defect() {
        let board = Board::new().defective().repaired();
        assert!(!board.is_defect());
    }

    #[test]
    fn test_repaired_sub_board_clears_parent() {
        let mut board =
            Board::new().with_board(Board::new().with_fiducial(Fiducial::new().defective()));
        assert!(board.boards[0].is_defect());
        assert!(board.is_defect());

        board.boards[0].set_repaired(true);
        assert!(!board.boards[0].is_defect());
        assert!(!board.is_defect());
    }

    #[test]
    fn test_repair_does_not_mask_sibling_subtrees() {
        let board = Board::new()
            .with_board(
                Board::new()
                    .with_component(Component::new().defective())
                    .repaired(),
            )
            .with_board(Board::new().with_component(Component::new().defective()));
        assert!(!board.boards[0].is_defect());
        assert!(board.boards[1].is_defect());
        assert!(board.is_defect());
    }

    #[test]
    fn test_empty_board_is_clean() {
        assert!(!Board::new().is_defect());
    }

    #[test]
    fn test_update_parent_reference_links_all_collections() {
        let mut board = Board::new()
            .with_fiducial(Fiducial::new())
            .with_component(Component::new())
            .with_board(Board::new().with_component(Component::new()));
        board.update_parent_reference(None);

        assert_eq!(board.parent(), None);
        assert_eq!(board.fiducials[0].parent(), Some(board.id()));
        assert_eq!(board.components[0].parent(), Some(board.id()));
        assert_eq!(board.boards[0].parent(), Some(board.id()));
        assert_eq!(
            board.boards[0].components[0].parent(),
            Some(board.boards[0].id())
        );
    }

    #[test]
    fn test_empty_sub_boards_are_omitted() {
        let board = Board::new().with_component(Component::designated("R1"));
        let json = serde_json::to_value(&board).unwrap();

        assert!(json.get("Boards").is_none());
        assert_eq!(json["Fiducials"], serde_json::json!([]));
        assert_eq!(json["Components"][0]["ReferenceDesignator"], "R1");
    }

    #[test]
    fn test_non_empty_sub_boards_are_emitted() {
        let board = Board::new().with_board(Board::new());
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["Boards"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_missing_and_null_collections_read_as_empty() {
        let board: Board = serde_json::from_str(r#"{"Fiducials": null}"#).unwrap();
        assert!(board.fiducials.is_empty());
        assert!(board.components.is_empty());
        assert!(board.boards.is_empty());
    }

    #[test]
    fn test_null_items_are_dropped_on_read() {
        let board: Board = serde_json::from_str(
            r#"{"Components": [null, {"ReferenceDesignator": "Q1"}, null], "Boards": [null]}"#,
        )
        .unwrap();
        assert_eq!(board.components.len(), 1);
        assert!(board.boards.is_empty());
    }

    #[test]
    fn test_find_component_in_sub_board() {
        let board =
            Board::new().with_board(Board::new().with_component(Component::designated("U9")));
        assert!(board.component("U9").is_some());
        assert!(board.component("U10").is_none());
    }
}
