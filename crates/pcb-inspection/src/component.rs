//! Component: a placed part on a board.
//!
//! Part data beyond the reference designator (package, part number,
//! measurement results) stays in the opaque attribute map.

use serde::{Deserialize, Serialize};

use crate::geometry::{GeometricObject, Position};
use crate::navigate::NodeRef;
use crate::object::{Children, InspectionObject, NodeKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Component {
    /// Designator such as `R12` or `U3`.
    #[serde(
        rename = "ReferenceDesignator",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_designator: Option<String>,

    #[serde(flatten)]
    pub geometry: GeometricObject,
}

impl Component {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn designated(reference_designator: impl Into<String>) -> Self {
        Self {
            reference_designator: Some(reference_designator.into()),
            geometry: GeometricObject::new(),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.geometry.position = Some(position);
        self
    }

    /// Builder-style local defect flag.
    pub fn defective(mut self) -> Self {
        self.geometry.defect = true;
        self
    }
}

impl InspectionObject for Component {
    fn base(&self) -> &GeometricObject {
        &self.geometry
    }

    fn base_mut(&mut self) -> &mut GeometricObject {
        &mut self.geometry
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Component
    }

    fn children(&self) -> Children<'_> {
        Box::new(std::iter::empty())
    }

    fn for_each_child_mut(&mut self, _f: &mut dyn FnMut(&mut dyn InspectionObject)) {}

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Component(self)
    }
}
