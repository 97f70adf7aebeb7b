//! Material synthesis for role bindings.
//!
//! Each role gets its own material, built once per load cycle. When the
//! role's nodes carry source materials, the richest one (most texture maps,
//! earliest in traversal order on ties) is copied with finish and maps intact
//! and only the color replaced. Without a source the role's default finish is
//! used. Source materials in the graph's library are never modified.

use crate::{
    classify::Classification,
    config::Configuration,
    data_structures::{
        binding::{BoundNode, RoleBinding, RoleBindings},
        color::Color,
        material::{MaterialSlot, MaterialSpec},
        role::{PartRole, PerRole},
        scene_graph::{NodeId, SceneGraph},
    },
};

/// Default `(roughness, metalness)` of a role without a source material.
pub const fn default_finish(role: PartRole) -> (f32, f32) {
    match role {
        PartRole::Body => (0.7, 0.2),
        PartRole::Handle => (0.5, 0.3),
        PartRole::Zipper => (0.4, 0.6),
        PartRole::Wheel => (0.8, 0.4),
    }
}

fn material_name(role: PartRole) -> String {
    format!("{}-material", role)
}

/// Build the material of `role` from `source`, or from the role defaults.
pub fn synthesize(role: PartRole, source: Option<&MaterialSpec>, color: Color) -> MaterialSpec {
    match source {
        Some(source) => {
            let mut material = source.clone();
            material.name = material_name(role);
            material.color = color;
            material
        }
        None => {
            let (roughness, metalness) = default_finish(role);
            MaterialSpec::new(material_name(role), color, roughness, metalness)
        }
    }
}

/// The source material with the most texture maps among `nodes`' meshes.
pub fn richest_source<'g>(graph: &'g SceneGraph, nodes: &[NodeId]) -> Option<&'g MaterialSpec> {
    let mut best: Option<&MaterialSpec> = None;
    let slots = nodes
        .iter()
        .filter_map(|id| graph.node(*id))
        .filter_map(|node| node.as_mesh())
        .flat_map(|mesh| mesh.materials.iter());
    for slot in slots {
        let MaterialSlot::Source(index) = slot else {
            continue;
        };
        let Some(candidate) = graph.materials.get(*index) else {
            log::warn!("Mesh references material {} which the asset does not define.", index);
            continue;
        };
        if best.is_none_or(|best| candidate.maps.count() > best.maps.count()) {
            best = Some(candidate);
        }
    }
    best
}

/// Create one binding per role and point the bound meshes at the role materials.
///
/// Colors are read from `config` as it is at call time.
pub fn bind_roles(
    graph: &mut SceneGraph,
    classification: &Classification,
    config: &Configuration,
) -> RoleBindings {
    let bindings = PerRole::from_fn(|role| {
        let assignment = classification.get(role);
        let material = synthesize(
            role,
            richest_source(graph, &assignment.nodes),
            config.color(role),
        );
        let nodes = assignment
            .nodes
            .iter()
            .filter_map(|id| {
                graph.node(*id).map(|node| BoundNode {
                    id: *id,
                    base_scale: node.get_local_transform().scale,
                })
            })
            .collect();
        if !assignment.is_resolved() {
            log::info!("No node plays the {} role, keeping a material for it anyway.", role);
        }
        RoleBinding::new(role, nodes, material, assignment.resolution)
    });

    for (role, binding) in bindings.iter() {
        for id in binding.node_ids() {
            if let Some(mesh) = graph.node_mut(id).and_then(|node| node.as_mesh_mut()) {
                mesh.materials
                    .iter_mut()
                    .for_each(|slot| *slot = MaterialSlot::Role(role));
            }
        }
    }

    RoleBindings::new(bindings)
}

/// Replace the color of one role's material in place.
///
/// Finish and texture maps stay untouched; the role is flagged for re-upload.
pub fn update_color(bindings: &mut RoleBindings, role: PartRole, color: Color) {
    let binding = bindings.get_mut(role);
    if binding.material.color == color {
        return;
    }
    binding.material.color = color;
    binding.mark_for_upload();
}
