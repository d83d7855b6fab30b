//! Geometric base shared by every inspection object.
//!
//! Holds the local inspection flags, the (non-serialized) identity and
//! parent link, and the placement data. Placement beyond a nominal
//! position is opaque to this crate: every externalized property the
//! model does not name is kept in [`GeometricObject::attributes`] so that
//! a document survives a read/write cycle unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TreeError};
use crate::id::ObjectId;

/// Keys the node types serialize themselves; never stored as attributes.
pub const RESERVED_KEYS: &[&str] = &[
    "IsDefect",
    "IsRepaired",
    "Position",
    "Fiducials",
    "Components",
    "Boards",
    "ReferenceDesignator",
];

/// Nominal placement of an object on its parent, in millimetres/degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, rotation: None }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }
}

/// State common to all nodes: flags, identity, parent link, placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometricObject {
    #[serde(skip, default = "ObjectId::generate")]
    pub(crate) id: ObjectId,

    #[serde(skip)]
    pub(crate) parent: Option<ObjectId>,

    /// Local defect flag as set by inspection logic.
    #[serde(rename = "IsDefect", default)]
    pub defect: bool,

    /// Repaired override for this node and its subtree.
    #[serde(rename = "IsRepaired", default)]
    pub repaired: bool,

    #[serde(rename = "Position", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Opaque properties carried through verbatim.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl GeometricObject {
    pub fn new() -> Self {
        Self {
            id: ObjectId::generate(),
            parent: None,
            defect: false,
            repaired: false,
            position: None,
            attributes: Map::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Look up an opaque attribute by its externalized key.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Store an opaque attribute. Keys the model serializes itself are
    /// rejected, since the written document could not be read back.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return Err(TreeError::ReservedAttribute(key));
        }
        self.attributes.insert(key, value);
        Ok(())
    }
}

impl Default for GeometricObject {
    fn default() -> Self {
        Self::new()
    }
}
