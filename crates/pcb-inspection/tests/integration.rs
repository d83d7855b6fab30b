//! Integration tests for the inspection tree
//!
//! Covers:
//! - Defect aggregation with the repaired override
//! - Parent-reference propagation and upward lookup
//! - Serialization filtering and document round-trips
//! - Property checks over generated trees

use pcb_inspection::codec::{decode_board, decode_panel, encode};
use pcb_inspection::navigate::{node_count, parent_of, verify_parent_links, walk};
use pcb_inspection::{
    Board, Component, DefectReport, Fiducial, Format, InspectionObject, ObjectId, Panel,
    TreeConfig,
};
use proptest::collection::vec;
use proptest::prelude::*;

/// Independent model: a local defect counts unless a repaired node lies
/// on the path from the queried node down to it.
fn has_unmasked_defect(node: &dyn InspectionObject, masked: bool) -> bool {
    let masked = masked || node.is_repaired();
    (!masked && node.local_defect())
        || node
            .children()
            .any(|(_, child)| has_unmasked_defect(child, masked))
}

fn parent_links(root: &dyn InspectionObject) -> Vec<(ObjectId, Option<ObjectId>)> {
    let mut links = Vec::new();
    walk(root, |_, node| links.push((node.id(), node.parent())));
    links
}

#[test]
fn test_defective_component_fails_board() {
    let board = Board::new().with_component(Component::designated("C1").defective());
    assert!(board.fiducials.is_empty());
    assert!(board.boards.is_empty());
    assert!(board.is_defect());
}

#[test]
fn test_repaired_board_with_local_defect_passes() {
    let mut board = Board::new();
    board.set_defect(true);
    board.set_repaired(true);
    assert!(!board.is_defect());
}

#[test]
fn test_repairing_only_defect_source_clears_board() {
    let mut board = Board::new().with_board(Board::new().defective());
    assert!(board.boards[0].is_defect());
    assert!(board.is_defect());

    board.boards[0].set_repaired(true);
    assert!(!board.boards[0].is_defect());
    assert!(!board.is_defect());
}

#[test]
fn test_parent_own_defect_survives_child_repair() {
    let mut board = Board::new().defective().with_board(Board::new().defective());
    board.boards[0].set_repaired(true);
    assert!(board.is_defect());
}

#[test]
fn test_panel_links_boards_and_fiducials() {
    let mut panel = Panel::new()
        .with_board(Board::new())
        .with_board(Board::new().with_fiducial(Fiducial::new().defective()));
    panel.update_parent_reference(None);

    let b2 = &panel.boards[1];
    assert_eq!(b2.fiducials[0].parent(), Some(b2.id()));
    assert_eq!(b2.parent(), Some(panel.id()));

    let resolved = parent_of(&panel, b2.fiducials[0].id())
        .and_then(|n| n.as_node().as_board())
        .unwrap();
    assert!(std::ptr::eq(resolved, b2));

    assert!(!panel.boards[0].is_defect());
    assert!(b2.is_defect());
    assert!(panel.is_defect());
}

#[test]
fn test_structural_change_requires_repropagation() {
    let mut panel = Panel::from_boards(vec![Board::new()]);
    panel.boards[0].boards.push(Board::new().with_component(Component::new()));

    assert_eq!(panel.boards[0].boards[0].parent(), None);
    assert!(verify_parent_links(&panel).is_err());

    panel.update_parent_reference(None);
    assert_eq!(panel.boards[0].boards[0].parent(), Some(panel.boards[0].id()));
    assert!(verify_parent_links(&panel).is_ok());
}

#[test]
fn test_empty_sub_board_list_roundtrip() {
    let board = Board::new().with_component(Component::designated("R2"));
    let json = encode(&board, Format::Json, false).unwrap();
    assert!(!json.contains("Boards"));

    let back = decode_board(&json, Format::Json, &TreeConfig::default()).unwrap();
    assert!(back.boards.is_empty());
    assert_eq!(back.components.len(), 1);
}

#[test]
fn test_document_with_nulls_and_extra_fields() {
    let doc = r#"{
        "PanelName": "P-0042",
        "Boards": [
            null,
            {
                "Position": {"X": 0, "Y": 0, "Rotation": 90},
                "Fiducials": [null, {"IsDefect": false}],
                "Components": [
                    {"ReferenceDesignator": "U1", "IsDefect": true, "IsRepaired": true},
                    {"ReferenceDesignator": "U2", "Package": "QFN-32"}
                ],
                "Boards": null
            }
        ]
    }"#;
    let panel = decode_panel(doc, Format::Json, &TreeConfig::default()).unwrap();

    assert_eq!(panel.boards.len(), 1);
    assert_eq!(panel.boards[0].fiducials.len(), 1);
    assert!(panel.boards[0].boards.is_empty());
    assert_eq!(
        panel.boards[0].geometry.position.and_then(|p| p.rotation),
        Some(90.0)
    );
    assert!(!panel.is_defect());
    assert!(panel.boards[0].component("U2").is_some());

    let out: serde_json::Value =
        serde_json::from_str(&encode(&panel, Format::Json, true).unwrap()).unwrap();
    assert_eq!(out["PanelName"], "P-0042");
    assert_eq!(out["Boards"][0]["Components"][1]["Package"], "QFN-32");
    assert!(out["Boards"][0].get("Boards").is_none());
}

#[test]
fn test_report_matches_aggregate() {
    let panel = Panel::from_boards(vec![
        Board::new().with_board(
            Board::new()
                .with_component(Component::designated("Q3").defective())
                .repaired(),
        ),
        Board::new().with_fiducial(Fiducial::new()),
    ]);
    let report = DefectReport::from_root(&panel);

    assert!(report.passed);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(
        report.findings[0].suppressed_by.as_deref(),
        Some("Boards[0]/Boards[0]")
    );
    assert_eq!(report.boards.len(), 3);
}

fn arb_fiducial() -> impl Strategy<Value = Fiducial> {
    (any::<bool>(), any::<bool>()).prop_map(|(defect, repaired)| {
        let mut fiducial = Fiducial::new();
        fiducial.set_defect(defect);
        fiducial.set_repaired(repaired);
        fiducial
    })
}

fn arb_component() -> impl Strategy<Value = Component> {
    (any::<bool>(), any::<bool>()).prop_map(|(defect, repaired)| {
        let mut component = Component::new();
        component.set_defect(defect);
        component.set_repaired(repaired);
        component
    })
}

fn arb_board() -> impl Strategy<Value = Board> {
    let leaf = (
        any::<bool>(),
        any::<bool>(),
        vec(arb_fiducial(), 0..3),
        vec(arb_component(), 0..4),
    )
        .prop_map(|(defect, repaired, fiducials, components)| {
            let mut board = Board::new();
            board.set_defect(defect);
            board.set_repaired(repaired);
            board.fiducials = fiducials;
            board.components = components;
            board
        });

    leaf.prop_recursive(3, 32, 3, |inner| {
        (
            any::<bool>(),
            any::<bool>(),
            vec(arb_fiducial(), 0..3),
            vec(arb_component(), 0..4),
            vec(inner, 0..3),
        )
            .prop_map(|(defect, repaired, fiducials, components, boards)| {
                let mut board = Board::new();
                board.set_defect(defect);
                board.set_repaired(repaired);
                board.fiducials = fiducials;
                board.components = components;
                board.boards = boards;
                board
            })
    })
}

proptest! {
    #[test]
    fn prop_aggregate_matches_model(board in arb_board()) {
        prop_assert_eq!(board.is_defect(), has_unmasked_defect(&board, false));
    }

    #[test]
    fn prop_repaired_never_defective(mut board in arb_board()) {
        board.set_repaired(true);
        prop_assert!(!board.is_defect());
    }

    #[test]
    fn prop_unflagged_node_is_or_of_children(mut board in arb_board()) {
        board.set_defect(false);
        board.set_repaired(false);
        let any_child = board.children().any(|(_, c)| c.is_defect());
        prop_assert_eq!(board.is_defect(), any_child);
    }

    #[test]
    fn prop_propagation_matches_structure(board in arb_board()) {
        let mut panel = Panel::from_boards(vec![board]);
        prop_assert!(verify_parent_links(&panel).is_ok());

        let mut checked = 0;
        walk(&panel, |path, node| {
            if let Some(parent_path) = path.parent() {
                let structural = parent_path.resolve(&panel).map(|p| p.id());
                assert_eq!(node.parent(), structural);
                checked += 1;
            }
        });
        prop_assert_eq!(checked + 1, node_count(&panel));

        let first = parent_links(&panel);
        panel.update_parent_reference(None);
        prop_assert_eq!(first, parent_links(&panel));
    }

    #[test]
    fn prop_roundtrip_preserves_verdicts(board in arb_board()) {
        let config = TreeConfig::default();
        for format in [Format::Json, Format::Yaml] {
            let text = encode(&board, format, false).unwrap();
            let back = decode_board(&text, format, &config).unwrap();

            prop_assert_eq!(back.is_defect(), board.is_defect());
            prop_assert_eq!(node_count(&back), node_count(&board));
            prop_assert_eq!(
                DefectReport::from_root(&back).findings,
                DefectReport::from_root(&board).findings
            );
        }
    }

    #[test]
    fn prop_report_passes_iff_clean(board in arb_board()) {
        let report = DefectReport::from_root(&board);
        prop_assert_eq!(report.passed, !board.is_defect());
        prop_assert_eq!(report.passed, report.active_findings().count() == 0);
    }
}
