//! Topology validation helpers.
//!
//! These checks guard the Builder/Classifier boundary. They cannot fail for
//! parameters accepted by the resolver unless the generator itself is broken,
//! so every failure is reported as [`MeshError::TopologyInvariant`].

use std::collections::HashSet;

use crate::geometry::quality::{centroid, dot, quad_normal, validate_hex};
use crate::mesh_error::MeshError;
use crate::topology::cell::{ARCS_PER_BLOCK, CORNERS_PER_BLOCK, HexBlock};
use crate::topology::patch::BoundaryFace;
use crate::topology::point::{Vertex, VertexId};
use crate::topology::MeshTopology;

const EPS: f64 = 1e-9;

/// Run every structural check over a finished topology.
pub fn validate_topology(topology: &MeshTopology) -> Result<(), MeshError> {
    validate_counts(topology)?;
    validate_blocks(topology)?;
    validate_edges(topology)?;
    validate_boundary(topology)
}

/// Vertex, block and edge counts must be `8N`, `N` and `4N`.
pub fn validate_counts(topology: &MeshTopology) -> Result<(), MeshError> {
    let n = topology.sub_block_count();
    if n == 0 {
        return Err(MeshError::invariant("topology has no blocks"));
    }
    if topology.vertices.len() != CORNERS_PER_BLOCK * n {
        return Err(MeshError::invariant(format!(
            "expected {} vertices for {n} blocks, found {}",
            CORNERS_PER_BLOCK * n,
            topology.vertices.len()
        )));
    }
    if topology.edges.len() != ARCS_PER_BLOCK * n {
        return Err(MeshError::invariant(format!(
            "expected {} edges for {n} blocks, found {}",
            ARCS_PER_BLOCK * n,
            topology.edges.len()
        )));
    }
    Ok(())
}

/// Each block must reference its own eight vertices and be right-handed.
pub fn validate_blocks(topology: &MeshTopology) -> Result<(), MeshError> {
    for (idx, block) in topology.blocks.iter().enumerate() {
        let expected = HexBlock::for_sub_block(idx, block.cells, block.grading);
        if block.vertices != expected.vertices {
            return Err(MeshError::invariant(format!(
                "block {idx} references {:?}, expected {:?}",
                block.vertices, expected.vertices
            )));
        }
        if block.cells.radial == 0 || block.cells.circumferential == 0 || block.cells.vertical == 0
        {
            return Err(MeshError::invariant(format!(
                "block {idx} has an empty cell count {:?}",
                block.cells
            )));
        }
        let corners = topology.block_corners(block)?;
        validate_hex(&corners).map_err(|e| match e {
            MeshError::TopologyInvariant(msg) => MeshError::invariant(format!("block {idx}: {msg}")),
            other => other,
        })?;
    }
    Ok(())
}

/// Arc endpoints must be in range and the control point must bow the edge.
pub fn validate_edges(topology: &MeshTopology) -> Result<(), MeshError> {
    for (idx, edge) in topology.edges.iter().enumerate() {
        let start = lookup(topology, edge.start, "edge", idx)?;
        let end = lookup(topology, edge.end, "edge", idx)?;
        if edge.start == edge.end {
            return Err(MeshError::invariant(format!(
                "edge {idx} starts and ends at vertex {}",
                edge.start
            )));
        }
        if chord_offset(start, end, edge.through) <= EPS {
            return Err(MeshError::invariant(format!(
                "edge {idx} control point lies on its chord"
            )));
        }
    }
    Ok(())
}

/// Boundary faces must be in range, unique, outward-wound and cover the
/// `4N + 2` exposed sides of the bend.
pub fn validate_boundary(topology: &MeshTopology) -> Result<(), MeshError> {
    let n = topology.sub_block_count();
    let mut seen: HashSet<[VertexId; 4]> = HashSet::new();
    let mut total = 0usize;
    for patch in &topology.patches {
        for (face_idx, face) in patch.faces.iter().enumerate() {
            let corners = face_corners(topology, face, &patch.name, face_idx)?;
            if !seen.insert(face.sorted()) {
                return Err(MeshError::invariant(format!(
                    "patch `{}` face {face} appears more than once in the boundary",
                    patch.name
                )));
            }
            let owner = owning_block(face).ok_or_else(|| {
                MeshError::invariant(format!(
                    "patch `{}` face {face} spans more than one block",
                    patch.name
                ))
            })?;
            let block = topology.blocks.get(owner).ok_or_else(|| {
                MeshError::invariant(format!(
                    "patch `{}` face {face} belongs to missing block {owner}",
                    patch.name
                ))
            })?;
            let block_center = centroid(&topology.block_corners(block)?);
            let outward = centroid(&corners) - block_center;
            if dot(quad_normal(&corners), outward) <= 0.0 {
                return Err(MeshError::invariant(format!(
                    "patch `{}` face {face} is wound inward",
                    patch.name
                )));
            }
            total += 1;
        }
    }
    if total != 4 * n + 2 {
        return Err(MeshError::invariant(format!(
            "boundary has {total} faces, expected {} for {n} blocks",
            4 * n + 2
        )));
    }
    Ok(())
}

fn lookup(
    topology: &MeshTopology,
    id: VertexId,
    what: &str,
    idx: usize,
) -> Result<Vertex, MeshError> {
    topology.vertex(id).ok_or_else(|| {
        MeshError::invariant(format!(
            "{what} {idx} references vertex {id} outside [0, {})",
            topology.vertices.len()
        ))
    })
}

fn face_corners(
    topology: &MeshTopology,
    face: &BoundaryFace,
    patch: &str,
    face_idx: usize,
) -> Result<[Vertex; 4], MeshError> {
    let mut out = [Vertex::default(); 4];
    for (slot, id) in out.iter_mut().zip(face.0.iter()) {
        *slot = lookup(topology, *id, &format!("patch `{patch}` face"), face_idx)?;
    }
    Ok(out)
}

fn owning_block(face: &BoundaryFace) -> Option<usize> {
    let block = face.0[0].get() / CORNERS_PER_BLOCK;
    face.0
        .iter()
        .all(|v| v.get() / CORNERS_PER_BLOCK == block)
        .then_some(block)
}

fn chord_offset(a: Vertex, b: Vertex, p: Vertex) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let len2 = dot(ab, ab);
    if len2 <= EPS {
        return a.distance(p);
    }
    let t = dot(ap, ab) / len2;
    let foot = Vertex::new(a.x + t * ab.x, a.y + t * ab.y, a.z + t * ab.z);
    foot.distance(p)
}
