//! Hex blocks, grading and curved edges.
//!
//! # Canonical corner order
//! Every angular sub-block owns eight consecutive vertices starting at
//! [`base_index`]. Local corner `k` lives at `base + k`:
//!
//! | k | radius | angle | level  |
//! |---|--------|-------|--------|
//! | 0 | inner  | start | bottom |
//! | 1 | outer  | start | bottom |
//! | 2 | outer  | end   | bottom |
//! | 3 | inner  | end   | bottom |
//! | 4 | inner  | start | top    |
//! | 5 | outer  | start | top    |
//! | 6 | outer  | end   | top    |
//! | 7 | inner  | end   | top    |
//!
//! With angles increasing counter-clockwise this ordering yields a
//! right-handed hexahedron (positive volume). Reversing a ring or swapping
//! the rings is a defect, not an alternate encoding.

use std::fmt;

use crate::topology::point::VertexId;

/// Number of corner vertices owned by one sub-block.
pub const CORNERS_PER_BLOCK: usize = 8;
/// Number of curved edges emitted per sub-block.
pub const ARCS_PER_BLOCK: usize = 4;

/// First vertex index owned by sub-block `sub_block`.
///
/// Sub-blocks never share vertices, so the base is a pure function of the
/// sub-block number.
#[inline]
pub const fn base_index(sub_block: usize) -> VertexId {
    VertexId::new(CORNERS_PER_BLOCK * sub_block)
}

/// Radial position of a corner.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RadialSide {
    Inner,
    Outer,
}

/// Angular position of a corner within its sub-block.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AngularSide {
    Start,
    End,
}

/// Vertical ring of a corner.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Level {
    Bottom,
    Top,
}

/// The eight corners of a sub-block, in canonical order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(usize)]
pub enum Corner {
    InnerStartBottom = 0,
    OuterStartBottom = 1,
    OuterEndBottom = 2,
    InnerEndBottom = 3,
    InnerStartTop = 4,
    OuterStartTop = 5,
    OuterEndTop = 6,
    InnerEndTop = 7,
}

impl Corner {
    /// All corners in emission order.
    pub const ALL: [Corner; CORNERS_PER_BLOCK] = [
        Corner::InnerStartBottom,
        Corner::OuterStartBottom,
        Corner::OuterEndBottom,
        Corner::InnerEndBottom,
        Corner::InnerStartTop,
        Corner::OuterStartTop,
        Corner::OuterEndTop,
        Corner::InnerEndTop,
    ];

    /// Local corner number (0..8).
    #[inline]
    pub const fn local(self) -> usize {
        self as usize
    }

    /// Global vertex index of this corner in sub-block `sub_block`.
    #[inline]
    pub const fn vertex(self, sub_block: usize) -> VertexId {
        base_index(sub_block).offset(self.local())
    }

    pub const fn radial(self) -> RadialSide {
        match self {
            Corner::InnerStartBottom
            | Corner::InnerEndBottom
            | Corner::InnerStartTop
            | Corner::InnerEndTop => RadialSide::Inner,
            _ => RadialSide::Outer,
        }
    }

    pub const fn angular(self) -> AngularSide {
        match self {
            Corner::InnerStartBottom
            | Corner::OuterStartBottom
            | Corner::InnerStartTop
            | Corner::OuterStartTop => AngularSide::Start,
            _ => AngularSide::End,
        }
    }

    pub const fn level(self) -> Level {
        if self.local() < 4 {
            Level::Bottom
        } else {
            Level::Top
        }
    }
}

/// Arc-edge endpoints per sub-block: inner-bottom, outer-bottom, inner-top,
/// outer-top. Each pair shares radius and level and spans start to end angle.
pub const ARC_CORNERS: [(Corner, Corner); ARCS_PER_BLOCK] = [
    (Corner::InnerStartBottom, Corner::InnerEndBottom),
    (Corner::OuterStartBottom, Corner::OuterEndBottom),
    (Corner::InnerStartTop, Corner::InnerEndTop),
    (Corner::OuterStartTop, Corner::OuterEndTop),
];

/// Cell-size distribution along the three block axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Grading {
    /// Equal cell sizes along every axis.
    Uniform,
    /// End-to-start expansion ratio per axis (radial, circumferential, vertical).
    Simple([f64; 3]),
}

impl Grading {
    /// Builds a grading from expansion ratios, collapsing all-ones to `Uniform`.
    pub fn from_ratios(ratios: [f64; 3]) -> Self {
        if ratios.iter().all(|&r| r == 1.0) {
            Grading::Uniform
        } else {
            Grading::Simple(ratios)
        }
    }

    pub fn ratios(self) -> [f64; 3] {
        match self {
            Grading::Uniform => [1.0, 1.0, 1.0],
            Grading::Simple(r) => r,
        }
    }
}

impl Default for Grading {
    fn default() -> Self {
        Grading::Uniform
    }
}

/// Renders as `simpleGrading (gx gy gz)`.
impl fmt::Display for Grading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [gx, gy, gz] = self.ratios();
        write!(f, "simpleGrading ({gx} {gy} {gz})")
    }
}

/// Per-axis cell counts of a block.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CellCounts {
    pub radial: usize,
    pub circumferential: usize,
    pub vertical: usize,
}

/// A hexahedral block referencing eight vertices in canonical order.
#[derive(Clone, Debug, PartialEq)]
pub struct HexBlock {
    pub vertices: [VertexId; CORNERS_PER_BLOCK],
    pub cells: CellCounts,
    pub grading: Grading,
}

impl HexBlock {
    /// The block owned by sub-block `sub_block`.
    pub fn for_sub_block(sub_block: usize, cells: CellCounts, grading: Grading) -> Self {
        Self {
            vertices: Corner::ALL.map(|corner| corner.vertex(sub_block)),
            cells,
            grading,
        }
    }
}

/// A circular-arc edge between two vertices through one interior point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcEdge {
    pub start: VertexId,
    pub end: VertexId,
    /// Point on the arc at the angular midpoint.
    pub through: crate::topology::point::Vertex,
}
