//! Procedural stand-in for the suitcase asset.
//!
//! Used whenever the real asset cannot be loaded or nothing in it could be
//! classified. The stand-in exposes all four roles, so callers never have to
//! tell it apart from a fully classified asset.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Rotation3, Vector3};

use crate::{
    config::Configuration,
    data_structures::{
        binding::{BoundNode, Resolution, RoleBinding, RoleBindings},
        geometry::Geometry,
        material::MaterialSlot,
        role::{PartRole, PerRole},
        scene_graph::{AssetNode, Mesh, NodeId, SceneGraph},
        transform::Transform,
    },
    synthesis::synthesize,
};

pub const FALLBACK_ROOT_NAME: &str = "suitcase-fallback";

const CYLINDER_SEGMENTS: u32 = 16;

/// Wheel positions: front left, front right, back left, back right.
const WHEEL_POSITIONS: [[f32; 3]; 4] = [
    [-0.4, -0.3, 0.6],
    [0.4, -0.3, 0.6],
    [-0.4, -0.3, -0.6],
    [0.4, -0.3, -0.6],
];

/// Build the procedural suitcase and its fully resolved bindings.
///
/// Materials use each role's default finish and the colors in `config`.
pub fn build_fallback(config: &Configuration) -> (SceneGraph, RoleBindings) {
    let mut graph = SceneGraph::new();
    let root = graph.add_root(AssetNode::group(FALLBACK_ROOT_NAME));
    let mut nodes: PerRole<Vec<NodeId>> = PerRole::default();

    let body = AssetNode::mesh(
        "fallback-body",
        Mesh::new(Geometry::cuboid(1.0, 0.5, 1.5), MaterialSlot::Role(PartRole::Body)),
    );
    nodes.body.push(graph.add_child(root, body));

    // Horizontal bar above the body.
    let handle = AssetNode::mesh(
        "fallback-handle",
        Mesh::new(
            Geometry::cylinder(0.05, 1.0, CYLINDER_SEGMENTS),
            MaterialSlot::Role(PartRole::Handle),
        ),
    )
    .with_transform(
        Transform::from(Vector3::new(0.0, 0.3, 0.0))
            .with_rotation(cgmath::Quaternion::from_angle_z(cgmath::Rad(FRAC_PI_2))),
    );
    nodes.handle.push(graph.add_child(root, handle));

    for (index, [x, y, z]) in WHEEL_POSITIONS.into_iter().enumerate() {
        let wheel = AssetNode::mesh(
            format!("fallback-wheel-{}", index),
            Mesh::new(
                Geometry::cylinder(0.1, 0.05, CYLINDER_SEGMENTS),
                MaterialSlot::Role(PartRole::Wheel),
            ),
        )
        .with_transform(
            Transform::from(Vector3::new(x, y, z))
                .with_rotation(cgmath::Quaternion::from_angle_x(cgmath::Rad(FRAC_PI_2))),
        );
        nodes.wheel.push(graph.add_child(root, wheel));
    }

    // Thin strip on the front face.
    let zipper = AssetNode::mesh(
        "fallback-zipper",
        Mesh::new(
            Geometry::cuboid(1.02, 0.02, 0.02),
            MaterialSlot::Role(PartRole::Zipper),
        ),
    )
    .with_transform(Transform::from(Vector3::new(0.0, 0.15, 0.75)));
    nodes.zipper.push(graph.add_child(root, zipper));

    let bindings = PerRole::from_fn(|role| {
        let bound = nodes
            .get(role)
            .iter()
            .map(|id| BoundNode {
                id: *id,
                base_scale: Vector3::new(1.0, 1.0, 1.0),
            })
            .collect();
        let material = synthesize(role, None, config.color(role));
        RoleBinding::new(role, bound, material, Resolution::Procedural)
    });

    log::info!("Built procedural suitcase with {} nodes", graph.len());
    (graph, RoleBindings::new(bindings))
}
