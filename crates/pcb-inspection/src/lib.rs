//! Hierarchical inspection-result tree for PCB manufacturing data.
//!
//! An inspection station reports its verdict as a tree of inspection
//! objects. The tree is built from decoded documents, linked once, then
//! queried for defect status.
//!
//! # Tree Shape
//!
//! ```text
//! Panel
//!   └─ Board (one or more)
//!       ├─ Fiducials
//!       ├─ Components
//!       └─ Boards (sub-boards, same shape, any depth)
//! ```
//!
//! # Usage
//!
//! 1. Decode a panel with [`codec::load_panel`] / [`codec::decode_panel`]
//!    (or build one with [`Panel::from_boards`]); both link every parent
//!    reference.
//! 2. Query [`InspectionObject::is_defect`] on any node, or build a
//!    [`DefectReport`] for the whole panel.
//! 3. After adding or removing children, call
//!    [`InspectionObject::update_parent_reference`] on the root again.
//!
//! ```rust
//! use pcb_inspection::{Board, Component, InspectionObject, Panel};
//!
//! let panel = Panel::from_boards(vec![
//!     Board::new(),
//!     Board::new().with_component(Component::designated("R4").defective()),
//! ]);
//! assert!(panel.is_defect());
//! assert_eq!(panel.boards[1].components[0].parent(), Some(panel.boards[1].id()));
//! ```

pub mod board;
pub mod codec;
pub mod component;
pub mod config;
pub mod error;
pub mod fiducial;
pub mod geometry;
pub mod id;
pub mod navigate;
pub mod object;
pub mod panel;
pub mod report;
mod serde_ext;

pub use board::Board;
pub use codec::Format;
pub use component::Component;
pub use config::{TreeConfig, MAX_SUPPORTED_DEPTH};
pub use error::{Result, TreeError};
pub use fiducial::Fiducial;
pub use geometry::{GeometricObject, Position};
pub use id::ObjectId;
pub use navigate::{NodePath, NodeRef};
pub use object::{Collection, InspectionObject, NodeKind, Slot};
pub use panel::Panel;
pub use report::{BoardVerdict, DefectFinding, DefectReport};
