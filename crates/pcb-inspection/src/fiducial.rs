//! Fiducial: reference mark used for optical alignment.

use serde::{Deserialize, Serialize};

use crate::geometry::{GeometricObject, Position};
use crate::navigate::NodeRef;
use crate::object::{Children, InspectionObject, NodeKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fiducial {
    #[serde(flatten)]
    pub geometry: GeometricObject,
}

impl Fiducial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Position) -> Self {
        let mut fiducial = Self::new();
        fiducial.geometry.position = Some(position);
        fiducial
    }

    /// Builder-style local defect flag.
    pub fn defective(mut self) -> Self {
        self.geometry.defect = true;
        self
    }
}

impl InspectionObject for Fiducial {
    fn base(&self) -> &GeometricObject {
        &self.geometry
    }

    fn base_mut(&mut self) -> &mut GeometricObject {
        &mut self.geometry
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Fiducial
    }

    fn children(&self) -> Children<'_> {
        Box::new(std::iter::empty())
    }

    fn for_each_child_mut(&mut self, _f: &mut dyn FnMut(&mut dyn InspectionObject)) {}

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Fiducial(self)
    }
}
