//! Parameter resolution and the end-to-end generation pipeline.
//!
//! The pipeline runs strictly in one direction:
//! [`ChannelConfig`] → [`resolve`] → [`build_topology`](crate::algs::meshgen::build_topology)
//! → [`classify_boundary`](crate::algs::boundary::classify_boundary) → serializer.
//! No stage reads back from a later one.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algs::boundary::classify_boundary;
use crate::algs::meshgen::build_topology;
use crate::debug_invariants::DebugInvariants;
use crate::io::block_mesh_dict::BlockMeshDictWriter;
use crate::io::{TopologyWriter, write_atomic};
use crate::mesh_error::{MeshError, MeshResult};
use crate::topology::cell::{CellCounts, Grading};
use crate::topology::point::Vertex;
use crate::topology::MeshTopology;

/// Relative tolerance for `N` equal sub-blocks reproducing the span.
const DIVISIBILITY_TOL: f64 = 1e-9;

/// Generator parameters as supplied by the user.
///
/// Lengths share one unit (the feature size sets the scale); angles are in
/// degrees, measured counter-clockwise from the +x axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelConfig {
    /// Reference length of the feature object placed in the bend.
    pub feature_size: f64,
    /// Target cell edge length.
    pub cell_size: f64,
    /// Centre-line radius of the bend.
    pub bend_radius: f64,
    /// Lateral clearance on each side of the centre line, in feature sizes.
    pub clearance_multiple: f64,
    /// Total angular span of the channel.
    pub span_deg: f64,
    /// Channel height.
    pub height: f64,
    /// Number of equal angular sub-blocks.
    pub sub_blocks: usize,
    /// Circumferential cells per sub-block.
    pub circumferential_cells: usize,
    /// Angular position of the feature object; this point is moved to the origin.
    pub feature_angle_deg: f64,
    /// Expansion ratios (radial, circumferential, vertical).
    pub grading: [f64; 3],
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            feature_size: 3.0,
            cell_size: 0.8,
            bend_radius: 10.0,
            clearance_multiple: 3.0,
            span_deg: 180.0,
            height: 8.0,
            sub_blocks: 2,
            circumferential_cells: 18,
            feature_angle_deg: 90.0,
            grading: [1.0, 1.0, 1.0],
        }
    }
}

impl ChannelConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json_str(text: &str) -> MeshResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| MeshError::configuration(format!("invalid JSON configuration: {e}")))
    }

    /// Read a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> MeshResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            MeshError::configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Lateral clearance on each side of the centre line.
    pub fn clearance(&self) -> f64 {
        self.clearance_multiple * self.feature_size
    }
}

/// Resolved, validated generator parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelParams {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub height: f64,
    pub span_deg: f64,
    pub sub_blocks: usize,
    pub cells: CellCounts,
    pub grading: Grading,
    pub feature_angle_deg: f64,
    /// Rigid-body shift applied to every emitted point; `z` is always 0.
    pub shift: Vertex,
}

impl ChannelParams {
    /// Radius midway between the inner and outer walls.
    pub fn mid_radius(&self) -> f64 {
        0.5 * (self.inner_radius + self.outer_radius)
    }

    /// Angular width of one sub-block in degrees.
    pub fn sub_block_span_deg(&self) -> f64 {
        self.span_deg / self.sub_blocks as f64
    }

    /// Start and end angle (degrees) of sub-block `sub_block`.
    pub fn sub_block_angles(&self, sub_block: usize) -> (f64, f64) {
        let step = self.sub_block_span_deg();
        (step * sub_block as f64, step * (sub_block + 1) as f64)
    }

    /// Shifted position of the point at radius `r`, angle `theta_deg`, height `z`.
    pub fn place(&self, r: f64, theta_deg: f64, z: f64) -> Vertex {
        polar_point(r, theta_deg, z, self.shift)
    }
}

/// Point at `(r, theta_deg, z)` translated by `shift`.
pub fn polar_point(r: f64, theta_deg: f64, z: f64, shift: Vertex) -> Vertex {
    let theta = theta_deg.to_radians();
    Vertex::new(
        r * theta.cos() + shift.x,
        r * theta.sin() + shift.y,
        z + shift.z,
    )
}

/// Shift that moves the point at (`radius`, `angle_deg`) to the origin.
pub fn recentering_shift(radius: f64, angle_deg: f64) -> Vertex {
    let at = polar_point(radius, angle_deg, 0.0, Vertex::default());
    Vertex::new(-at.x, -at.y, 0.0)
}

fn require_finite(name: &str, value: f64) -> MeshResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MeshError::configuration(format!("{name} must be finite, got {value}")))
    }
}

fn cell_count(name: &str, extent: f64, cell_size: f64) -> MeshResult<usize> {
    let count = (extent / cell_size).round();
    if count < 1.0 {
        return Err(MeshError::configuration(format!(
            "{name} cell count resolves to {count} (extent {extent}, cell size {cell_size})"
        )));
    }
    Ok(count as usize)
}

/// Validate a configuration and derive the secondary quantities.
pub fn resolve(config: &ChannelConfig) -> MeshResult<ChannelParams> {
    for (name, value) in [
        ("feature_size", config.feature_size),
        ("cell_size", config.cell_size),
        ("bend_radius", config.bend_radius),
        ("clearance_multiple", config.clearance_multiple),
        ("span_deg", config.span_deg),
        ("height", config.height),
        ("feature_angle_deg", config.feature_angle_deg),
    ] {
        require_finite(name, value)?;
    }
    if config.cell_size <= 0.0 {
        return Err(MeshError::configuration(format!(
            "cell_size must be positive, got {}",
            config.cell_size
        )));
    }
    if config.height <= 0.0 {
        return Err(MeshError::configuration(format!(
            "height must be positive, got {}",
            config.height
        )));
    }

    let clearance = config.clearance();
    let inner_radius = config.bend_radius - clearance;
    let outer_radius = config.bend_radius + clearance;
    if outer_radius <= inner_radius {
        return Err(MeshError::configuration(format!(
            "outer radius {outer_radius} must exceed inner radius {inner_radius}"
        )));
    }
    if inner_radius <= 0.0 {
        return Err(MeshError::configuration(format!(
            "clearance {clearance} is too large for bend radius {}: inner radius {inner_radius}",
            config.bend_radius
        )));
    }

    if config.span_deg <= 0.0 || config.span_deg > 360.0 {
        return Err(MeshError::configuration(format!(
            "span_deg must lie in (0, 360], got {}",
            config.span_deg
        )));
    }
    if config.sub_blocks == 0 {
        return Err(MeshError::configuration("sub_blocks must be at least 1"));
    }
    let step = config.span_deg / config.sub_blocks as f64;
    if (step * config.sub_blocks as f64 - config.span_deg).abs()
        > DIVISIBILITY_TOL * config.span_deg
    {
        return Err(MeshError::configuration(format!(
            "span {}° is not evenly divisible into {} sub-blocks",
            config.span_deg, config.sub_blocks
        )));
    }
    if step >= 180.0 {
        return Err(MeshError::configuration(format!(
            "each sub-block spans {step}°; it must be less than 180° for a valid arc block"
        )));
    }

    if config.circumferential_cells == 0 {
        return Err(MeshError::configuration(
            "circumferential_cells must be at least 1",
        ));
    }
    let cells = CellCounts {
        radial: cell_count("radial", outer_radius - inner_radius, config.cell_size)?,
        circumferential: config.circumferential_cells,
        vertical: cell_count("vertical", config.height, config.cell_size)?,
    };

    if let Some(bad) = config.grading.iter().find(|g| !g.is_finite() || **g <= 0.0) {
        return Err(MeshError::configuration(format!(
            "grading ratios must be positive, got {bad}"
        )));
    }

    let mid_radius = 0.5 * (inner_radius + outer_radius);
    let params = ChannelParams {
        inner_radius,
        outer_radius,
        height: config.height,
        span_deg: config.span_deg,
        sub_blocks: config.sub_blocks,
        cells,
        grading: Grading::from_ratios(config.grading),
        feature_angle_deg: config.feature_angle_deg,
        shift: recentering_shift(mid_radius, config.feature_angle_deg),
    };
    log::info!(
        "resolved bend: r = [{:.6}, {:.6}], height {:.6}, {} x {:.6}° sub-blocks, cells {:?}",
        params.inner_radius,
        params.outer_radius,
        params.height,
        params.sub_blocks,
        params.sub_block_span_deg(),
        params.cells
    );
    Ok(params)
}

/// Build and classify a topology from resolved parameters.
///
/// The finished topology is validated; a failure here is a generator defect.
pub fn generate_from_params(params: &ChannelParams) -> MeshResult<MeshTopology> {
    let mut topology = build_topology(params);
    topology.patches = classify_boundary(params.sub_blocks);
    let checked = topology.validate_invariants();
    crate::debug_invariants!(&checked, "generated MeshTopology");
    checked?;
    Ok(topology)
}

/// Resolve `config` and generate the full topology.
pub fn generate(config: &ChannelConfig) -> MeshResult<MeshTopology> {
    let params = resolve(config)?;
    generate_from_params(&params)
}

/// Generate and write a `blockMeshDict` to `path`, replacing any existing file.
///
/// Nothing is written when resolution or validation fails.
pub fn write_block_mesh_dict<P: AsRef<Path>>(
    config: &ChannelConfig,
    path: P,
) -> MeshResult<MeshTopology> {
    let topology = generate(config)?;
    let text = BlockMeshDictWriter::default().render(&topology)?;
    write_atomic(path.as_ref(), text.as_bytes())?;
    log::info!(
        "wrote {} ({} vertices, {} blocks, {} edges, {} patches)",
        path.as_ref().display(),
        topology.vertices.len(),
        topology.blocks.len(),
        topology.edges.len(),
        topology.patches.len()
    );
    Ok(topology)
}
