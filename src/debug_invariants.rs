//! Structural self-checks for generated topologies.
//!
//! Release builds run the same checks through [`DebugInvariants::validate_invariants`]
//! and surface failures as errors; debug builds (or the `check-invariants`
//! feature) additionally panic at the point of construction.

use crate::mesh_error::MeshError;

/// Types whose structure can be checked after construction.
pub trait DebugInvariants {
    /// Panic on a violated invariant when invariant checking is compiled in.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first violation.
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

/// Run a fallible check and panic with `[invariants] <context>: <error>` when
/// invariant checking is compiled in; expands to nothing otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($check:expr, $($context:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(err) = $check {
            panic!(concat!("[invariants] ", $($context)*, ": {}"), err);
        }
    };
}
