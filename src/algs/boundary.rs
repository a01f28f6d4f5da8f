//! Boundary classification for the annular bend.
//!
//! Patch membership is a static rule: each patch collects one [`BlockSide`]
//! from either every sub-block, only the first, or only the last. Face vertex
//! indices are re-derived from the sub-block number through
//! [`base_index`](crate::topology::cell::base_index), never from emission
//! order, and every face is wound with its normal pointing out of the fluid.

use static_assertions::const_assert_eq;

use crate::topology::patch::{BlockSide, BoundaryPatch, PatchType};

/// Patch name for the inner-radius side walls.
pub const INNER_SIDE: &str = "innerSide";
/// Patch name for the outer-radius side walls.
pub const OUTER_SIDE: &str = "outerSide";
/// Patch name for the start-angle face of the first sub-block.
pub const INLET: &str = "inlet";
/// Patch name for the end-angle face of the last sub-block.
pub const OUTLET: &str = "outlet";
/// Patch name for the z = height faces.
pub const TOP: &str = "top";
/// Patch name for the z = 0 faces.
pub const BOTTOM: &str = "bottom";

/// Which sub-blocks contribute a face to a patch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BlockSelector {
    Every,
    First,
    Last,
}

impl BlockSelector {
    /// Sub-block numbers selected out of `sub_blocks`.
    pub fn select(self, sub_blocks: usize) -> std::ops::Range<usize> {
        match self {
            _ if sub_blocks == 0 => 0..0,
            BlockSelector::Every => 0..sub_blocks,
            BlockSelector::First => 0..1,
            BlockSelector::Last => sub_blocks - 1..sub_blocks,
        }
    }
}

/// One row of the classification table.
#[derive(Clone, Copy, Debug)]
pub struct PatchRule {
    pub name: &'static str,
    pub kind: PatchType,
    pub side: BlockSide,
    pub blocks: BlockSelector,
}

impl PatchRule {
    /// Number of faces this rule yields for `sub_blocks` sub-blocks.
    pub fn expected_faces(&self, sub_blocks: usize) -> usize {
        self.blocks.select(sub_blocks).len()
    }
}

/// Patch rules in output order.
pub const PATCH_RULES: [PatchRule; 6] = [
    PatchRule {
        name: INNER_SIDE,
        kind: PatchType::Slip,
        side: BlockSide::Inner,
        blocks: BlockSelector::Every,
    },
    PatchRule {
        name: OUTER_SIDE,
        kind: PatchType::Slip,
        side: BlockSide::Outer,
        blocks: BlockSelector::Every,
    },
    PatchRule {
        name: INLET,
        kind: PatchType::Patch,
        side: BlockSide::Start,
        blocks: BlockSelector::First,
    },
    PatchRule {
        name: OUTLET,
        kind: PatchType::Patch,
        side: BlockSide::End,
        blocks: BlockSelector::Last,
    },
    PatchRule {
        name: TOP,
        kind: PatchType::Slip,
        side: BlockSide::Top,
        blocks: BlockSelector::Every,
    },
    PatchRule {
        name: BOTTOM,
        kind: PatchType::Wall,
        side: BlockSide::Bottom,
        blocks: BlockSelector::Every,
    },
];

// Bottom, top, inner, outer, inlet and outlet: every exposed side once.
const_assert_eq!(PATCH_RULES.len(), 6);

/// Apply one rule to `sub_blocks` sub-blocks.
pub fn classify_patch(rule: &PatchRule, sub_blocks: usize) -> BoundaryPatch {
    let mut patch = BoundaryPatch::new(rule.name, rule.kind);
    patch.faces = rule
        .blocks
        .select(sub_blocks)
        .map(|sub_block| rule.side.face(sub_block))
        .collect();
    log::debug!(
        "patch {} ({}): {} face(s)",
        patch.name,
        patch.kind,
        patch.faces.len()
    );
    patch
}

/// Emit the six named boundary patches for `sub_blocks` angular sub-blocks.
pub fn classify_boundary(sub_blocks: usize) -> Vec<BoundaryPatch> {
    PATCH_RULES
        .iter()
        .map(|rule| classify_patch(rule, sub_blocks))
        .collect()
}
