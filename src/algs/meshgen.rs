//! Topology builder for the annular bend.
//!
//! Each angular sub-block contributes eight vertices, one hex block and four
//! arc edges. All indices are derived from [`base_index`], so a sub-block's
//! records depend only on its number and the resolved parameters; adjacent
//! sub-blocks do not share seam vertices.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::mesh_generation::ChannelParams;
use crate::topology::cell::{
    ARC_CORNERS, ARCS_PER_BLOCK, AngularSide, ArcEdge, CORNERS_PER_BLOCK, Corner, HexBlock,
    Level, RadialSide, base_index,
};
use crate::topology::point::Vertex;
use crate::topology::MeshTopology;

/// Records emitted for a single angular sub-block.
#[derive(Clone, Debug, PartialEq)]
pub struct SubBlock {
    pub index: usize,
    /// Corner coordinates in canonical order, stored at `base_index(index)..+8`.
    pub vertices: [Vertex; CORNERS_PER_BLOCK],
    pub block: HexBlock,
    pub edges: [ArcEdge; ARCS_PER_BLOCK],
}

fn radius_of(params: &ChannelParams, side: RadialSide) -> f64 {
    match side {
        RadialSide::Inner => params.inner_radius,
        RadialSide::Outer => params.outer_radius,
    }
}

fn z_of(params: &ChannelParams, level: Level) -> f64 {
    match level {
        Level::Bottom => 0.0,
        Level::Top => params.height,
    }
}

/// Shifted coordinates of `corner` in sub-block `sub_block`.
pub fn corner_position(params: &ChannelParams, sub_block: usize, corner: Corner) -> Vertex {
    let (a0, a1) = params.sub_block_angles(sub_block);
    let angle = match corner.angular() {
        AngularSide::Start => a0,
        AngularSide::End => a1,
    };
    params.place(
        radius_of(params, corner.radial()),
        angle,
        z_of(params, corner.level()),
    )
}

/// Build the vertex, block and edge records of one sub-block.
pub fn emit_sub_block(params: &ChannelParams, index: usize) -> SubBlock {
    let (a0, a1) = params.sub_block_angles(index);
    let mid = 0.5 * (a0 + a1);

    let vertices = Corner::ALL.map(|corner| corner_position(params, index, corner));
    let block = HexBlock::for_sub_block(index, params.cells, params.grading);
    let edges = ARC_CORNERS.map(|(start, end)| ArcEdge {
        start: start.vertex(index),
        end: end.vertex(index),
        through: params.place(
            radius_of(params, start.radial()),
            mid,
            z_of(params, start.level()),
        ),
    });

    log::debug!(
        "sub-block {index}: {a0}°..{a1}°, vertices {}..{}",
        base_index(index),
        base_index(index + 1)
    );
    SubBlock {
        index,
        vertices,
        block,
        edges,
    }
}

#[cfg(not(feature = "rayon"))]
fn emit_all(params: &ChannelParams) -> Vec<SubBlock> {
    (0..params.sub_blocks)
        .map(|i| emit_sub_block(params, i))
        .collect()
}

#[cfg(feature = "rayon")]
fn emit_all(params: &ChannelParams) -> Vec<SubBlock> {
    (0..params.sub_blocks)
        .into_par_iter()
        .map(|i| emit_sub_block(params, i))
        .collect()
}

/// Build vertices, blocks and edges for every sub-block.
///
/// The returned topology has no boundary patches yet; see
/// [`classify_boundary`](crate::algs::boundary::classify_boundary).
pub fn build_topology(params: &ChannelParams) -> MeshTopology {
    let n = params.sub_blocks;
    let mut topology = MeshTopology {
        vertices: Vec::with_capacity(CORNERS_PER_BLOCK * n),
        blocks: Vec::with_capacity(n),
        edges: Vec::with_capacity(ARCS_PER_BLOCK * n),
        patches: Vec::new(),
    };
    for sub in emit_all(params) {
        debug_assert_eq!(topology.vertices.len(), base_index(sub.index).get());
        topology.vertices.extend_from_slice(&sub.vertices);
        topology.blocks.push(sub.block);
        topology.edges.extend_from_slice(&sub.edges);
    }
    topology
}
