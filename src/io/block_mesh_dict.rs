//! OpenFOAM `blockMeshDict` writer.
//!
//! # Output layout
//! - Banner and `FoamFile` header, then `scale`.
//! - `vertices`: one `(x y z)` literal per line, fixed-point.
//! - `blocks`: `hex (i0 .. i7) (nr nt nz) simpleGrading (gx gy gz)`.
//! - `edges`: `arc i0 i1 (x y z)`.
//! - `boundary`: `name { type <patch|wall|slip>; faces ( (v0 v1 v2 v3) ... ); }`.
//! - `mergePatchPairs();` and a closing rule line.
//!
//! The writer performs no validation; it walks the four lists in order.

use std::fmt::Write;

use itertools::Itertools;

use crate::io::TopologyWriter;
use crate::mesh_error::MeshError;
use crate::topology::point::Vertex;
use crate::topology::{ArcEdge, BoundaryPatch, HexBlock, MeshTopology};

const BANNER: &str = r"/*--------------------------------*- C++ -*----------------------------------*\
| =========                |                                                 |
| \      /  F ield         | OpenFOAM: The Open Source CFD Toolbox           |
|  \    /   O peration     | Version:  v2012                                 |
|   \  /    A nd           | Website:  www.openfoam.com                      |
|    \/     M anipulation  |                                                 |
\*---------------------------------------------------------------------------*/";

const RULE: &str =
    "// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * //";

const INDENT: &str = "    ";

/// Serializer for the block-structured mesh dictionary.
#[derive(Clone, Debug)]
pub struct BlockMeshDictWriter {
    /// Decimal places for every coordinate.
    precision: usize,
    /// Value of the `scale` entry.
    scale: f64,
}

impl Default for BlockMeshDictWriter {
    fn default() -> Self {
        Self {
            precision: 6,
            scale: 1.0,
        }
    }
}

impl BlockMeshDictWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set coordinate precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the global `scale` factor applied by the meshing tool.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    fn point(&self, v: Vertex) -> String {
        format!(
            "({:.p$} {:.p$} {:.p$})",
            v.x,
            v.y,
            v.z,
            p = self.precision
        )
    }

    fn write_header<W: Write>(&self, out: &mut W) -> Result<(), MeshError> {
        writeln!(out, "{BANNER}")?;
        writeln!(out)?;
        writeln!(out, "FoamFile")?;
        writeln!(out, "{{")?;
        writeln!(out, "    version     2.0;")?;
        writeln!(out, "    format      ascii;")?;
        writeln!(out, "    class       dictionary;")?;
        writeln!(out, "    object      blockMeshDict;")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(out)?;
        if self.scale.fract() == 0.0 {
            writeln!(out, "scale {:.1};", self.scale)?;
        } else {
            writeln!(out, "scale {};", self.scale)?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn write_vertices<W: Write>(&self, out: &mut W, vertices: &[Vertex]) -> Result<(), MeshError> {
        writeln!(out, "vertices")?;
        writeln!(out, "(")?;
        for v in vertices {
            writeln!(out, "{INDENT}{}", self.point(*v))?;
        }
        writeln!(out, ");")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_blocks<W: Write>(&self, out: &mut W, blocks: &[HexBlock]) -> Result<(), MeshError> {
        writeln!(out, "blocks")?;
        writeln!(out, "(")?;
        for block in blocks {
            writeln!(
                out,
                "{INDENT}hex ({}) ({} {} {}) {}",
                block.vertices.iter().join(" "),
                block.cells.radial,
                block.cells.circumferential,
                block.cells.vertical,
                block.grading
            )?;
        }
        writeln!(out, ");")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_edges<W: Write>(&self, out: &mut W, edges: &[ArcEdge]) -> Result<(), MeshError> {
        writeln!(out, "edges")?;
        writeln!(out, "(")?;
        for edge in edges {
            writeln!(
                out,
                "{INDENT}arc {} {} {}",
                edge.start,
                edge.end,
                self.point(edge.through)
            )?;
        }
        writeln!(out, ");")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_patch<W: Write>(&self, out: &mut W, patch: &BoundaryPatch) -> Result<(), MeshError> {
        writeln!(out, "{INDENT}{}", patch.name)?;
        writeln!(out, "{INDENT}{{")?;
        writeln!(out, "{INDENT}{INDENT}type {};", patch.kind)?;
        writeln!(out, "{INDENT}{INDENT}faces")?;
        writeln!(out, "{INDENT}{INDENT}(")?;
        for face in &patch.faces {
            writeln!(out, "{INDENT}{INDENT}{INDENT}{face}")?;
        }
        writeln!(out, "{INDENT}{INDENT});")?;
        writeln!(out, "{INDENT}}}")?;
        Ok(())
    }

    fn write_boundary<W: Write>(
        &self,
        out: &mut W,
        patches: &[BoundaryPatch],
    ) -> Result<(), MeshError> {
        writeln!(out, "boundary")?;
        writeln!(out, "(")?;
        for (idx, patch) in patches.iter().enumerate() {
            if idx > 0 {
                writeln!(out)?;
            }
            self.write_patch(out, patch)?;
        }
        writeln!(out, ");")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_footer<W: Write>(&self, out: &mut W) -> Result<(), MeshError> {
        writeln!(out, "mergePatchPairs();")?;
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(out)?;
        Ok(())
    }
}

impl TopologyWriter for BlockMeshDictWriter {
    fn write<W: Write>(&self, out: &mut W, topology: &MeshTopology) -> Result<(), MeshError> {
        self.write_header(out)?;
        self.write_vertices(out, &topology.vertices)?;
        self.write_blocks(out, &topology.blocks)?;
        self.write_edges(out, &topology.edges)?;
        self.write_boundary(out, &topology.patches)?;
        self.write_footer(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{BlockSide, CellCounts, Grading, PatchType, VertexId};

    fn one_block() -> MeshTopology {
        let cube = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ];
        let cells = CellCounts {
            radial: 3,
            circumferential: 4,
            vertical: 5,
        };
        let mut wall = BoundaryPatch::new("bottom", PatchType::Wall);
        wall.faces.push(BlockSide::Bottom.face(0));
        MeshTopology {
            vertices: cube.map(Vertex::from).to_vec(),
            blocks: vec![HexBlock::for_sub_block(0, cells, Grading::Uniform)],
            edges: vec![ArcEdge {
                start: VertexId::new(0),
                end: VertexId::new(3),
                through: Vertex::new(-0.25, 0.5, 0.0),
            }],
            patches: vec![wall],
        }
    }

    #[test]
    fn sections_appear_in_order() {
        let text = BlockMeshDictWriter::default().render(&one_block()).unwrap();
        let pos = |needle: &str| text.find(needle).unwrap_or_else(|| panic!("{needle}"));
        assert!(pos("FoamFile") < pos("vertices"));
        assert!(pos("vertices") < pos("blocks"));
        assert!(pos("blocks") < pos("edges"));
        assert!(pos("edges") < pos("boundary"));
        assert!(pos("boundary") < pos("mergePatchPairs();"));
        assert!(text.ends_with(&format!("{RULE}\n\n")));
    }

    #[test]
    fn records_use_fixed_point_and_keywords() {
        let text = BlockMeshDictWriter::default().render(&one_block()).unwrap();
        assert!(text.contains("\n    (1.000000 1.000000 0.000000)\n"));
        assert!(text.contains("\n    hex (0 1 2 3 4 5 6 7) (3 4 5) simpleGrading (1 1 1)\n"));
        assert!(text.contains("\n    arc 0 3 (-0.250000 0.500000 0.000000)\n"));
        assert!(text.contains(
            "    bottom\n    {\n        type wall;\n        faces\n        (\n            (0 3 2 1)\n        );\n    }\n"
        ));
        assert!(text.contains("scale 1.0;"));
    }

    #[test]
    fn precision_is_configurable() {
        let text = BlockMeshDictWriter::new()
            .with_precision(2)
            .with_scale(0.001)
            .render(&one_block())
            .unwrap();
        assert!(text.contains("\n    (1.00 0.00 1.00)\n"));
        assert!(text.contains("scale 0.001;"));
    }
}
