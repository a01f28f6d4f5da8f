//! Top-level module for the block-mesh topology.
//!
//! This module provides the indexed mesh graph the generator produces:
//! - [`point`]: vertex indices and coordinates
//! - [`cell`]: hex blocks, grading and arc edges, plus the canonical corner order
//! - [`patch`]: boundary patches and block sides
//! - [`validation`]: structural invariant checks over a finished topology
//!
//! [`MeshTopology`] is the root aggregate. It is regenerated from scratch for
//! every set of parameters and never mutated after the classifier runs.

pub mod cell;
pub mod patch;
pub mod point;
pub mod validation;

pub use cell::{ArcEdge, CellCounts, Corner, Grading, HexBlock, base_index};
pub use patch::{BlockSide, BoundaryFace, BoundaryPatch, PatchType};
pub use point::{Vertex, VertexId};

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;

/// Complete block-mesh description: vertices, blocks, edges and boundary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshTopology {
    /// Vertex list; position in the list is the vertex index.
    pub vertices: Vec<Vertex>,
    pub blocks: Vec<HexBlock>,
    pub edges: Vec<ArcEdge>,
    pub patches: Vec<BoundaryPatch>,
}

impl MeshTopology {
    /// Number of angular sub-blocks.
    pub fn sub_block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Coordinates stored at `id`, if in range.
    pub fn vertex(&self, id: VertexId) -> Option<Vertex> {
        self.vertices.get(id.get()).copied()
    }

    /// Looks up a patch by name.
    pub fn patch(&self, name: &str) -> Option<&BoundaryPatch> {
        self.patches.iter().find(|p| p.name == name)
    }

    /// Coordinates of the eight corners of `block`, in canonical order.
    pub fn block_corners(&self, block: &HexBlock) -> Result<[Vertex; 8], MeshError> {
        let mut out = [Vertex::default(); 8];
        for (slot, id) in out.iter_mut().zip(block.vertices.iter()) {
            *slot = self.vertex(*id).ok_or_else(|| {
                MeshError::invariant(format!(
                    "block references vertex {id} but only {} vertices exist",
                    self.vertices.len()
                ))
            })?;
        }
        Ok(out)
    }
}

impl DebugInvariants for MeshTopology {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "MeshTopology");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        validation::validate_topology(self)
    }
}
