//! Boundary patches and the block sides they are built from.

use std::fmt;

use itertools::Itertools;

use crate::topology::cell::Corner;
use crate::topology::point::VertexId;

/// Boundary-condition class of a patch.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchType {
    /// Open flow boundary.
    Patch,
    /// No-slip solid.
    Wall,
    /// Symmetry / frictionless solid.
    Slip,
}

impl PatchType {
    pub const fn keyword(self) -> &'static str {
        match self {
            PatchType::Patch => "patch",
            PatchType::Wall => "wall",
            PatchType::Slip => "slip",
        }
    }
}

impl fmt::Display for PatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One of the six quadrilateral sides of a sub-block.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BlockSide {
    /// z = 0.
    Bottom,
    /// z = height.
    Top,
    /// Start angle of the sub-block.
    Start,
    /// End angle of the sub-block.
    End,
    /// Inner radius.
    Inner,
    /// Outer radius.
    Outer,
}

impl BlockSide {
    /// Corners of this side, wound so the right-hand normal points out of
    /// the block.
    pub const fn outward_corners(self) -> [Corner; 4] {
        use Corner::*;
        match self {
            BlockSide::Bottom => [InnerStartBottom, InnerEndBottom, OuterEndBottom, OuterStartBottom],
            BlockSide::Top => [InnerStartTop, OuterStartTop, OuterEndTop, InnerEndTop],
            BlockSide::Start => [InnerStartBottom, OuterStartBottom, OuterStartTop, InnerStartTop],
            BlockSide::End => [InnerEndBottom, InnerEndTop, OuterEndTop, OuterEndBottom],
            BlockSide::Inner => [InnerStartBottom, InnerStartTop, InnerEndTop, InnerEndBottom],
            BlockSide::Outer => [OuterStartBottom, OuterEndBottom, OuterEndTop, OuterStartTop],
        }
    }

    /// The side as a face of sub-block `sub_block`.
    pub fn face(self, sub_block: usize) -> BoundaryFace {
        BoundaryFace(self.outward_corners().map(|c| c.vertex(sub_block)))
    }
}

/// A quadrilateral boundary face as four vertex indices in outward winding.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BoundaryFace(pub [VertexId; 4]);

impl BoundaryFace {
    /// Vertex indices in ascending order; equal for any winding of the same face.
    pub fn sorted(&self) -> [VertexId; 4] {
        let mut key = self.0;
        key.sort_unstable();
        key
    }
}

/// Renders as `(v0 v1 v2 v3)`.
impl fmt::Display for BoundaryFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(" "))
    }
}

/// A named group of boundary faces sharing one boundary-condition type.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryPatch {
    pub name: String,
    pub kind: PatchType,
    pub faces: Vec<BoundaryFace>,
}

impl BoundaryPatch {
    pub fn new(name: impl Into<String>, kind: PatchType) -> Self {
        Self {
            name: name.into(),
            kind,
            faces: Vec::new(),
        }
    }

    /// Iterate over every vertex referenced by this patch.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.faces.iter().flat_map(|face| face.0.iter().copied())
    }
}
