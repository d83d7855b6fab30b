//! Tree navigation: typed node views, positional paths, lookup by
//! identity and upward traversal through the parent links.
//!
//! Parent links only hold identities, so resolving one always goes
//! through a root the caller still owns. Upward queries are only as
//! accurate as the last [`InspectionObject::update_parent_reference`]
//! pass; [`verify_parent_links`] reports where they have gone stale.

use std::collections::HashSet;
use std::fmt;

use crate::board::Board;
use crate::component::Component;
use crate::error::{Result, TreeError};
use crate::fiducial::Fiducial;
use crate::id::ObjectId;
use crate::object::{InspectionObject, NodeKind, Slot};
use crate::panel::Panel;

/// Borrowed, typed view of a node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Panel(&'a Panel),
    Board(&'a Board),
    Component(&'a Component),
    Fiducial(&'a Fiducial),
}

impl<'a> NodeRef<'a> {
    pub fn as_object(self) -> &'a dyn InspectionObject {
        match self {
            NodeRef::Panel(p) => p,
            NodeRef::Board(b) => b,
            NodeRef::Component(c) => c,
            NodeRef::Fiducial(f) => f,
        }
    }

    pub fn kind(self) -> NodeKind {
        self.as_object().kind()
    }

    pub fn id(self) -> ObjectId {
        self.as_object().id()
    }

    pub fn as_panel(self) -> Option<&'a Panel> {
        match self {
            NodeRef::Panel(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_board(self) -> Option<&'a Board> {
        match self {
            NodeRef::Board(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_component(self) -> Option<&'a Component> {
        match self {
            NodeRef::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_fiducial(self) -> Option<&'a Fiducial> {
        match self {
            NodeRef::Fiducial(f) => Some(f),
            _ => None,
        }
    }

    /// Short human label: the reference designator for components,
    /// otherwise the node kind.
    pub fn label(self) -> String {
        match self {
            NodeRef::Component(c) => c
                .reference_designator
                .clone()
                .unwrap_or_else(|| NodeKind::Component.to_string()),
            other => other.kind().to_string(),
        }
    }
}

/// Position of a node relative to a root, as a list of child slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<Slot>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.0
    }

    /// Number of steps below the root.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, slot: Slot) -> Self {
        let mut slots = self.0.clone();
        slots.push(slot);
        Self(slots)
    }

    /// Path of the structural parent, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Follow this path down from `root`.
    pub fn resolve<'a>(&self, root: &'a dyn InspectionObject) -> Option<&'a dyn InspectionObject> {
        let mut node = root;
        for slot in &self.0 {
            node = node
                .children()
                .find(|(candidate, _)| candidate == slot)
                .map(|(_, child)| child)?;
        }
        Some(node)
    }
}

impl From<Vec<Slot>> for NodePath {
    fn from(slots: Vec<Slot>) -> Self {
        Self(slots)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", slot)?;
        }
        Ok(())
    }
}

/// Pre-order traversal. `visit` receives each node with its path.
pub fn walk<'a, F>(root: &'a dyn InspectionObject, mut visit: F)
where
    F: FnMut(&NodePath, &'a dyn InspectionObject),
{
    let mut path = NodePath::root();
    walk_from(root, &mut path, &mut visit);
}

fn walk_from<'a, F>(node: &'a dyn InspectionObject, path: &mut NodePath, visit: &mut F)
where
    F: FnMut(&NodePath, &'a dyn InspectionObject),
{
    visit(path, node);
    for (slot, child) in node.children() {
        path.0.push(slot);
        walk_from(child, path, visit);
        path.0.pop();
    }
}

fn locate<'a>(
    node: &'a dyn InspectionObject,
    id: ObjectId,
    path: &mut NodePath,
) -> Option<&'a dyn InspectionObject> {
    if node.id() == id {
        return Some(node);
    }
    for (slot, child) in node.children() {
        path.0.push(slot);
        if let Some(found) = locate(child, id, path) {
            return Some(found);
        }
        path.0.pop();
    }
    None
}

/// Find a node by identity anywhere under `root` (inclusive).
pub fn find(root: &dyn InspectionObject, id: ObjectId) -> Option<&dyn InspectionObject> {
    locate(root, id, &mut NodePath::root())
}

/// Positional path of the node with identity `id`.
pub fn path_to(root: &dyn InspectionObject, id: ObjectId) -> Option<NodePath> {
    let mut path = NodePath::root();
    locate(root, id, &mut path).map(|_| path)
}

/// Resolve the parent back-reference of node `id` within `root`.
pub fn parent_of(root: &dyn InspectionObject, id: ObjectId) -> Option<&dyn InspectionObject> {
    let parent = find(root, id)?.parent()?;
    find(root, parent)
}

/// Nodes above `id`, nearest first, by following parent links.
///
/// Stops at the first link that does not resolve under `root`, or if a
/// stale link would revisit a node.
pub fn ancestors(root: &dyn InspectionObject, id: ObjectId) -> Vec<&dyn InspectionObject> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut next = find(root, id).and_then(|node| node.parent());

    while let Some(parent_id) = next {
        if !seen.insert(parent_id) {
            break;
        }
        match find(root, parent_id) {
            Some(parent) => {
                next = parent.parent();
                chain.push(parent);
            }
            None => break,
        }
    }
    chain
}

/// Number of levels in the tree; a lone node has depth 1.
pub fn depth(root: &dyn InspectionObject) -> usize {
    1 + root
        .children()
        .map(|(_, child)| depth(child))
        .max()
        .unwrap_or(0)
}

pub fn node_count(root: &dyn InspectionObject) -> usize {
    let mut count = 0;
    walk(root, |_, _| count += 1);
    count
}

/// Check that every node below `root` links back to its structural
/// parent. The root's own link is not inspected.
pub fn verify_parent_links(root: &dyn InspectionObject) -> Result<()> {
    let mut path = NodePath::root();
    verify_from(root, &mut path)
}

fn verify_from(node: &dyn InspectionObject, path: &mut NodePath) -> Result<()> {
    for (slot, child) in node.children() {
        path.0.push(slot);
        if child.parent() != Some(node.id()) {
            return Err(TreeError::StaleParent {
                path: path.to_string(),
            });
        }
        verify_from(child, path)?;
        path.0.pop();
    }
    Ok(())
}
