//! Re-export public algorithms.

pub mod boundary;
pub mod meshgen;

pub use boundary::{PATCH_RULES, classify_boundary};
pub use meshgen::{build_topology, emit_sub_block};
