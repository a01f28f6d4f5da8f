//! Handedness and orientation checks on block corner coordinates.
//!
//! # Vertex ordering
//! - **Hexahedron**: `[v0, .., v7]` with bottom face `[0, 1, 2, 3]` and top
//!   face `[4, 5, 6, 7]`; positive signed volume means right-handed.
//! - **Quadrilateral face**: `[v0, v1, v2, v3]`; the normal follows the
//!   right-hand rule.
//!
//! Curved block edges are ignored: the sign of the straight-edge hexahedron
//! decides handedness, which holds as long as each sub-block spans less than
//! a half-turn.
//!
//! # Examples
//! ```rust
//! use bend_mesh::geometry::quality::{hex_signed_volume, validate_hex};
//! use bend_mesh::topology::Vertex;
//!
//! let unit = [
//!     [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0],
//! ]
//! .map(Vertex::from);
//! assert!((hex_signed_volume(&unit) - 1.0).abs() < 1e-12);
//! validate_hex(&unit)?;
//! # Ok::<(), bend_mesh::mesh_error::MeshError>(())
//! ```

use crate::mesh_error::MeshError;
use crate::topology::point::Vertex;

const EPS: f64 = 1e-12;

/// Signed volume of a hexahedron split into five tetrahedra.
pub fn hex_signed_volume(vertices: &[Vertex; 8]) -> f64 {
    let v = vertices.map(Vertex::to_array);
    signed_volume(v[0], v[1], v[3], v[4])
        + signed_volume(v[1], v[2], v[3], v[6])
        + signed_volume(v[1], v[3], v[4], v[6])
        + signed_volume(v[1], v[4], v[5], v[6])
        + signed_volume(v[3], v[4], v[6], v[7])
}

/// Reject inverted or degenerate hexahedra, returning the volume otherwise.
pub fn validate_hex(vertices: &[Vertex; 8]) -> Result<f64, MeshError> {
    let volume = hex_signed_volume(vertices);
    if !volume.is_finite() || volume.abs() <= EPS {
        return Err(MeshError::invariant(format!(
            "degenerate block: signed volume = {volume}"
        )));
    }
    if volume < 0.0 {
        return Err(MeshError::invariant(format!(
            "left-handed block: signed volume = {volume}"
        )));
    }
    Ok(volume)
}

/// Area-weighted normal of a (possibly non-planar) quad, by Newell's method.
pub fn quad_normal(corners: &[Vertex; 4]) -> Vertex {
    let mut n = [0.0f64; 3];
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        n[0] += (a.y - b.y) * (a.z + b.z);
        n[1] += (a.z - b.z) * (a.x + b.x);
        n[2] += (a.x - b.x) * (a.y + b.y);
    }
    Vertex::from(n.map(|c| 0.5 * c))
}

/// Arithmetic mean of a set of points.
pub fn centroid(points: &[Vertex]) -> Vertex {
    if points.is_empty() {
        return Vertex::default();
    }
    let sum = points.iter().fold(Vertex::default(), |acc, &p| acc + p);
    let n = points.len() as f64;
    Vertex::new(sum.x / n, sum.y / n, sum.z / n)
}

/// Dot product of two points treated as vectors.
pub fn dot(a: Vertex, b: Vertex) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

fn signed_volume(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    let ab = sub(b, a);
    let ac = sub(c, a);
    let ad = sub(d, a);
    dot3(ab, cross(ac, ad)) / 6.0
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> [Vertex; 8] {
        [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ]
        .map(Vertex::from)
    }

    #[test]
    fn unit_cube_has_unit_volume() {
        assert!((hex_signed_volume(&unit_cube()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn swapped_rings_are_left_handed() {
        let cube = unit_cube();
        let mut swapped = cube;
        swapped[..4].copy_from_slice(&cube[4..]);
        swapped[4..].copy_from_slice(&cube[..4]);
        assert!(hex_signed_volume(&swapped) < 0.0);
        assert!(matches!(
            validate_hex(&swapped),
            Err(MeshError::TopologyInvariant(_))
        ));
    }

    #[test]
    fn flattened_hex_is_degenerate() {
        let mut flat = unit_cube();
        for v in &mut flat[4..] {
            v.z = 0.0;
        }
        let err = validate_hex(&flat).unwrap_err();
        assert!(err.to_string().contains("degenerate"));
    }

    #[test]
    fn quad_normal_follows_right_hand_rule() {
        let quad = [
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]
        .map(Vertex::from);
        let n = quad_normal(&quad);
        assert!((n.z - 2.0).abs() < 1e-12);
        assert!(n.x.abs() < 1e-12 && n.y.abs() < 1e-12);
    }

    #[test]
    fn centroid_of_cube() {
        let c = centroid(&unit_cube());
        assert_eq!(c, Vertex::new(0.5, 0.5, 0.5));
    }
}
