//! The inspection-object capability shared by every node variant.
//!
//! Each variant supplies only its base state and how to enumerate its
//! children. Defect aggregation and parent-reference propagation are
//! written once, as provided methods, against that capability.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::GeometricObject;
use crate::id::ObjectId;
use crate::navigate::NodeRef;

/// Variant tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Panel,
    Board,
    Component,
    Fiducial,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Panel => write!(f, "panel"),
            NodeKind::Board => write!(f, "board"),
            NodeKind::Component => write!(f, "component"),
            NodeKind::Fiducial => write!(f, "fiducial"),
        }
    }
}

/// Named child collection of a composite node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Fiducials,
    Components,
    Boards,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Fiducials => write!(f, "Fiducials"),
            Collection::Components => write!(f, "Components"),
            Collection::Boards => write!(f, "Boards"),
        }
    }
}

/// Position of a child inside its parent: collection plus index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub collection: Collection,
    pub index: usize,
}

impl Slot {
    pub fn new(collection: Collection, index: usize) -> Self {
        Self { collection, index }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.collection, self.index)
    }
}

/// Iterator over the direct children of a node, in evaluation order.
pub type Children<'a> = Box<dyn Iterator<Item = (Slot, &'a dyn InspectionObject)> + 'a>;

/// Any node in the inspection tree.
///
/// The tree is acyclic by construction; the recursive operations below
/// do not detect cycles.
pub trait InspectionObject {
    /// Shared base state.
    fn base(&self) -> &GeometricObject;

    fn base_mut(&mut self) -> &mut GeometricObject;

    fn kind(&self) -> NodeKind;

    /// Direct children in evaluation order (fiducials, components,
    /// sub-boards for a board). Leaves yield nothing.
    fn children(&self) -> Children<'_>;

    /// Visit every direct child mutably, in the same order as [`children`].
    ///
    /// [`children`]: InspectionObject::children
    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut dyn InspectionObject));

    /// Typed view of this node.
    fn as_node(&self) -> NodeRef<'_>;

    fn id(&self) -> ObjectId {
        self.base().id
    }

    /// Identity of the structural parent as recorded by the last
    /// propagation pass. `None` for a root or an unlinked node.
    fn parent(&self) -> Option<ObjectId> {
        self.base().parent
    }

    /// The local defect flag, ignoring children and the repaired flag.
    fn local_defect(&self) -> bool {
        self.base().defect
    }

    fn is_repaired(&self) -> bool {
        self.base().repaired
    }

    fn set_defect(&mut self, defect: bool) {
        self.base_mut().defect = defect;
    }

    fn set_repaired(&mut self, repaired: bool) {
        self.base_mut().repaired = repaired;
    }

    /// Aggregate defect status of this node and its subtree.
    ///
    /// A repaired node is never defective. Otherwise the node is
    /// defective when its local flag is set or any child reports a
    /// defect. Evaluated on every call, stopping at the first hit.
    fn is_defect(&self) -> bool {
        if self.is_repaired() {
            return false;
        }
        if self.local_defect() {
            return true;
        }
        self.children().any(|(_, child)| child.is_defect())
    }

    /// Record `parent` as this node's back-reference and relink the whole
    /// subtree below it. Must be re-run after any structural change.
    fn update_parent_reference(&mut self, parent: Option<ObjectId>) {
        self.base_mut().parent = parent;
        let me = Some(self.id());
        self.for_each_child_mut(&mut |child: &mut dyn InspectionObject| {
            child.update_parent_reference(me)
        });
    }

    /// Give this node and every descendant a fresh identity.
    ///
    /// Needed after cloning a subtree into the tree it came from. Parent
    /// links are stale afterwards until propagation runs again.
    fn renew_ids(&mut self) {
        self.base_mut().id = ObjectId::generate();
        self.for_each_child_mut(&mut |child: &mut dyn InspectionObject| child.renew_ids());
    }
}
