//! `VertexId` and `Vertex`: indexed corner points of the block topology
//!
//! The downstream meshing tool identifies vertices purely by their position
//! in the `vertices` list. `VertexId` wraps that dense, zero-based index so it
//! cannot be confused with cell counts or sub-block numbers, and `Vertex`
//! holds the immutable coordinates stored at that index.

use std::fmt;
use std::ops::{Add, Sub};

/// Dense zero-based vertex index, assigned in emission order.
///
/// Index identity, not coordinate equality, is what blocks, edges and
/// boundary faces refer to.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct VertexId(usize);

impl VertexId {
    /// Wraps a raw list position.
    #[inline]
    pub const fn new(raw: usize) -> Self {
        VertexId(raw)
    }

    /// Returns the raw list position.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Offset from a sub-block base index by a local corner number.
    #[inline]
    pub const fn offset(self, local: usize) -> Self {
        VertexId(self.0 + local)
    }
}

/// Custom `Debug` implementation to display as `VertexId(raw_value)`.
impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexId").field(&self.0).finish()
    }
}

/// Prints only the raw integer, as the dictionary format expects.
impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable point in 3-D space.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Vertex) -> f64 {
        let d = self - other;
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }
}

impl Add for Vertex {
    type Output = Vertex;

    fn add(self, rhs: Vertex) -> Vertex {
        Vertex::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vertex {
    type Output = Vertex;

    fn sub(self, rhs: Vertex) -> Vertex {
        Vertex::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from(xyz: [f64; 3]) -> Self {
        Vertex::new(xyz[0], xyz[1], xyz[2])
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_from_base() {
        let base = VertexId::new(16);
        assert_eq!(base.offset(7).get(), 23);
    }

    #[test]
    fn display_is_raw_index() {
        assert_eq!(VertexId::new(42).to_string(), "42");
        assert_eq!(format!("{:?}", VertexId::new(3)), "VertexId(3)");
    }

    #[test]
    fn vertex_arithmetic() {
        let a = Vertex::new(1.0, 2.0, 3.0);
        let b = Vertex::new(0.5, 0.5, 0.5);
        assert_eq!(a - b, Vertex::new(0.5, 1.5, 2.5));
        assert_eq!((a + b).to_array(), [1.5, 2.5, 3.5]);
        assert!((Vertex::new(3.0, 4.0, 0.0).distance(Vertex::default()) - 5.0).abs() < 1e-12);
    }
}
