use suitcase_configurator::{
    Color, PartRole,
    classify::RoleClassifier,
    config::Configuration,
    data_structures::{
        binding::Resolution,
        material::{MaterialSlot, MaterialSpec},
        scene_graph::{AssetNode, SceneGraph},
    },
    synthesis::{bind_roles, default_finish, richest_source, synthesize, update_color},
};

use crate::common::test_utils::{
    box_node, cube228_scene, node_named, source_material, unnamed_scene,
};

mod common;

#[test]
fn should_keep_maps_and_finish_of_the_source_material() {
    let source = source_material("Leather", 3);
    let red = Color::rgb(0xff, 0, 0);

    let material = synthesize(PartRole::Body, Some(&source), red);

    assert_eq!(material.color, red);
    assert!(material.same_finish(&source));
    let (copied, original) = (material.maps.diffuse.as_ref(), source.maps.diffuse.as_ref());
    assert!(copied.zip(original).is_some_and(|(a, b)| a.same_texture(b)));
    // The source keeps its own color.
    assert_eq!(source.color, Color::rgb(0x80, 0x40, 0x20));
}

#[test]
fn should_use_role_defaults_without_a_source() {
    for role in PartRole::ALL {
        let material = synthesize(role, None, Color::WHITE);
        let (roughness, metalness) = default_finish(role);
        assert_eq!(material.roughness(), roughness, "{}", role);
        assert_eq!(material.metalness(), metalness, "{}", role);
        assert!(material.maps.is_empty());
    }
    assert_eq!(default_finish(PartRole::Body), (0.7, 0.2));
    assert_eq!(default_finish(PartRole::Wheel), (0.8, 0.4));
}

#[test]
fn should_pick_the_material_with_most_maps() {
    let mut graph = cube228_scene();
    let body = node_named(&graph, "Cube228");
    let handle = node_named(&graph, "Cube228_1");
    let zipper = node_named(&graph, "Cube228_2");
    // Zipper (no maps) first, body (three maps) last.
    if let Some(mesh) = graph.node_mut(handle).and_then(|node| node.as_mesh_mut()) {
        mesh.materials.push(MaterialSlot::Source(3));
    }

    let richest = richest_source(&graph, &[zipper, handle, body]).map(|m| m.name.clone());
    assert_eq!(richest.as_deref(), Some("Leather"));

    // Plastic (1 map) then Rubber (2 maps) on the handle.
    let richest = richest_source(&graph, &[zipper, handle]).map(|m| m.name.clone());
    assert_eq!(richest.as_deref(), Some("Rubber"));
}

#[test]
fn should_keep_the_first_material_on_equal_map_counts() {
    let mut graph = cube228_scene();
    graph.materials[2] = source_material("Chrome", 3);
    let body = node_named(&graph, "Cube228");
    let zipper = node_named(&graph, "Cube228_2");

    let richest = richest_source(&graph, &[zipper, body]).map(|m| m.name.clone());
    assert_eq!(richest.as_deref(), Some("Chrome"));
}

#[test]
fn should_give_each_role_its_own_material() {
    let mut graph = cube228_scene();
    let original_library: Vec<MaterialSpec> = graph.materials.clone();
    let classification = RoleClassifier::default().classify(&graph);

    let bindings = bind_roles(&mut graph, &classification, &Configuration::default());

    for binding in bindings.iter() {
        assert_eq!(binding.material.name, format!("{}-material", binding.role));
        assert_eq!(binding.material.color, Configuration::default().color(binding.role));
        assert!(binding.needs_upload());
        for id in binding.node_ids() {
            let slots = graph
                .node(id)
                .and_then(|node| node.as_mesh())
                .map(|mesh| mesh.materials.clone());
            assert_eq!(slots, Some(vec![MaterialSlot::Role(binding.role)]));
        }
    }
    // The library of the source graph is untouched.
    assert_eq!(graph.materials, original_library);
    // The body inherited the leather maps.
    assert!(bindings.get(PartRole::Body).material.same_finish(&original_library[0]));
}

#[test]
fn should_only_change_the_updated_role() {
    let mut graph = cube228_scene();
    let classification = RoleClassifier::default().classify(&graph);
    let mut bindings = bind_roles(&mut graph, &classification, &Configuration::default());
    bindings.take_pending_uploads();
    let green = Color::rgb(0, 0xff, 0);

    for updated in PartRole::ALL {
        let before = bindings.clone();

        update_color(&mut bindings, updated, green);

        let binding = bindings.get(updated);
        assert_eq!(binding.material.color, green, "{}", updated);
        assert!(binding.material.same_finish(&before.get(updated).material), "{}", updated);
        assert_eq!(binding.nodes, before.get(updated).nodes, "{}", updated);
        for role in PartRole::ALL.into_iter().filter(|role| *role != updated) {
            assert_eq!(bindings.get(role), before.get(role), "{} changed {}", updated, role);
        }
        assert_eq!(bindings.take_pending_uploads(), vec![updated]);
    }
}

#[test]
fn should_not_flag_an_upload_for_an_unchanged_color() {
    let mut graph = unnamed_scene();
    let classification = RoleClassifier::default().classify(&graph);
    let mut bindings = bind_roles(&mut graph, &classification, &Configuration::default());
    assert_eq!(bindings.take_pending_uploads(), PartRole::ALL.to_vec());

    update_color(&mut bindings, PartRole::Body, Configuration::default().color(PartRole::Body));

    assert!(bindings.take_pending_uploads().is_empty());
}

#[test]
fn should_create_materials_for_unresolved_roles() {
    let mut graph = SceneGraph::new();
    let root = graph.add_root(AssetNode::group("Partial"));
    graph.add_child(
        root,
        box_node("Suitcase_Body", [1.0, 1.0, 0.5], [0.0, 0.0, 0.0], MaterialSlot::Unassigned),
    );
    graph.add_child(
        root,
        box_node("Handle", [0.5, 0.05, 0.05], [0.0, 0.6, 0.0], MaterialSlot::Unassigned),
    );
    let classification = RoleClassifier::default().classify(&graph);

    let bindings = bind_roles(&mut graph, &classification, &Configuration::default());

    assert_eq!(bindings.resolved_count(), 2);
    let zipper = bindings.get(PartRole::Zipper);
    assert_eq!(zipper.resolution, Resolution::Unresolved);
    assert!(zipper.nodes.is_empty());
    assert_eq!(zipper.material.color, Configuration::default().color(PartRole::Zipper));
    assert_eq!(
        (zipper.material.roughness(), zipper.material.metalness()),
        default_finish(PartRole::Zipper)
    );
}
