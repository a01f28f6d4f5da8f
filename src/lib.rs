#![cfg_attr(docsrs, feature(doc_cfg))]
//! # bend-mesh
//!
//! bend-mesh generates OpenFOAM `blockMeshDict` files for a curved annular
//! channel: a ring sector of rectangular cross-section, split into angular
//! hexahedral sub-blocks with arc edges and six named boundary patches. It
//! also reads the solver artifacts produced by runs on that channel
//! (residual logs, force coefficients, sectional lift tables).
//!
//! ## Pipeline
//! 1. [`mesh_generation::resolve`] turns a [`ChannelConfig`] into validated
//!    [`ChannelParams`] (radii, cell counts, re-centering shift).
//! 2. [`algs::build_topology`] emits vertices, hex blocks and arc edges per
//!    sub-block.
//! 3. [`algs::classify_boundary`] attaches the inlet, outlet, side, top and
//!    bottom patches.
//! 4. [`io::block_mesh_dict::BlockMeshDictWriter`] renders the dictionary.
//!
//! [`mesh_generation::generate`] runs steps 1-3 and validates the result;
//! [`mesh_generation::write_block_mesh_dict`] also writes the file.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! bend-mesh = "0.3"
//! # Optional features:
//! # features = ["rayon", "check-invariants"]
//! ```
//!
//! ```
//! use bend_mesh::prelude::*;
//!
//! let topology = generate(&ChannelConfig::default())?;
//! assert_eq!(topology.sub_block_count(), 2);
//! let text = BlockMeshDictWriter::default().render(&topology)?;
//! assert!(text.contains("mergePatchPairs();"));
//! # Ok::<(), bend_mesh::mesh_error::MeshError>(())
//! ```
//!
//! ## Determinism
//! Output depends only on the configuration: identical inputs produce
//! byte-identical dictionaries, with or without the `rayon` feature.

pub mod algs;
pub mod debug_invariants;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod mesh_generation;
pub mod post;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use mesh_generation::{ChannelConfig, ChannelParams};

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::{build_topology, classify_boundary};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::io::TopologyWriter;
    pub use crate::io::block_mesh_dict::BlockMeshDictWriter;
    pub use crate::io::table::Table;
    pub use crate::mesh_error::{MeshError, MeshResult};
    pub use crate::mesh_generation::{
        ChannelConfig, ChannelParams, generate, resolve, write_block_mesh_dict,
    };
    pub use crate::topology::{
        BlockSide, BoundaryPatch, MeshTopology, PatchType, Vertex, VertexId,
    };
}
