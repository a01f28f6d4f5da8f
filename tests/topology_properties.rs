use proptest::prelude::*;

use bend_mesh::algs::meshgen::emit_sub_block;
use bend_mesh::geometry::quality::hex_signed_volume;
use bend_mesh::io::TopologyWriter;
use bend_mesh::io::block_mesh_dict::BlockMeshDictWriter;
use bend_mesh::mesh_generation::{ChannelConfig, generate, polar_point, resolve};
use bend_mesh::topology::validation::validate_topology;

/// Valid configurations: sub-blocks under a half-turn each,
/// clearance below the bend radius, and cells no larger than the channel.
fn valid_config() -> impl Strategy<Value = ChannelConfig> {
    (1usize..=8)
        .prop_flat_map(|n| (Just(n), 1usize..=(360 / n).min(179)))
        .prop_flat_map(|(n, step)| {
            (
                Just(n),
                Just(step),
                0.5f64..3.0,
                0.5f64..1.5,
                5.0f64..50.0,
                1.0f64..10.0,
                0.05f64..0.5,
                1usize..30,
                0.0f64..360.0,
            )
        })
        .prop_map(
            |(n, step, feature, multiple, radius, height, cell, circ, angle)| ChannelConfig {
                feature_size: feature,
                cell_size: cell,
                bend_radius: radius,
                clearance_multiple: multiple,
                span_deg: (n * step) as f64,
                height,
                sub_blocks: n,
                circumferential_cells: circ,
                feature_angle_deg: angle,
                grading: [1.0, 1.0, 1.0],
            },
        )
}

proptest! {
    #[test]
    fn record_counts_scale_with_sub_blocks(config in valid_config()) {
        let topology = generate(&config).unwrap();
        let n = config.sub_blocks;
        prop_assert_eq!(topology.vertices.len(), 8 * n);
        prop_assert_eq!(topology.blocks.len(), n);
        prop_assert_eq!(topology.edges.len(), 4 * n);
        prop_assert_eq!(topology.patches.len(), 6);
        prop_assert!(validate_topology(&topology).is_ok());
    }

    #[test]
    fn every_block_is_right_handed(config in valid_config()) {
        let topology = generate(&config).unwrap();
        for (i, block) in topology.blocks.iter().enumerate() {
            let corners = topology.block_corners(block).unwrap();
            let volume = hex_signed_volume(&corners);
            prop_assert!(volume > 0.0, "block {} volume {}", i, volume);
        }
    }

    #[test]
    fn patch_indices_are_in_range(config in valid_config()) {
        let topology = generate(&config).unwrap();
        let count = topology.vertices.len();
        for patch in &topology.patches {
            for id in patch.vertex_ids() {
                prop_assert!(id.get() < count, "{} -> {}", patch.name, id);
            }
        }
    }

    #[test]
    fn arc_points_sit_at_angular_midpoint(config in valid_config()) {
        let params = resolve(&config).unwrap();
        for i in 0..params.sub_blocks {
            let (a0, a1) = params.sub_block_angles(i);
            let mid = 0.5 * (a0 + a1);
            let sub = emit_sub_block(&params, i);
            let radii = [params.inner_radius, params.outer_radius];
            let levels = [0.0, params.height];
            let expected = [
                polar_point(radii[0], mid, levels[0], params.shift),
                polar_point(radii[1], mid, levels[0], params.shift),
                polar_point(radii[0], mid, levels[1], params.shift),
                polar_point(radii[1], mid, levels[1], params.shift),
            ];
            for (edge, want) in sub.edges.iter().zip(expected) {
                prop_assert!(edge.through.distance(want) < 1e-9);
            }
        }
    }

    #[test]
    fn feature_point_lands_on_origin(config in valid_config()) {
        let params = resolve(&config).unwrap();
        let p = params.place(params.mid_radius(), config.feature_angle_deg, 0.0);
        prop_assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6, "{:?}", p);
        prop_assert_eq!(params.shift.z, 0.0);
    }

    #[test]
    fn output_is_deterministic(config in valid_config()) {
        let writer = BlockMeshDictWriter::default();
        let a = writer.render(&generate(&config).unwrap()).unwrap();
        let b = writer.render(&generate(&config).unwrap()).unwrap();
        prop_assert_eq!(a, b);
    }
}
