use suitcase_configurator::{
    AssetError, Color, PartRole, WheelStyle,
    config::{ConfigChange, Configuration},
    data_structures::{
        material::{MaterialSlot, MaterialSpec},
        scene_graph::SceneGraph,
    },
    fallback::FALLBACK_ROOT_NAME,
    selector::{AssetSource, BindingSelector, DISPLAY_ROOT_NAME, SelectorState},
};

use crate::common::test_utils::{cube228_scene, mystery_scene, node_named};

mod common;

fn unavailable() -> AssetError {
    AssetError::Unavailable {
        path: "models/suitcase.glb".to_string(),
        reason: "404 Not Found".to_string(),
    }
}

#[test]
fn should_expose_nothing_before_the_first_cycle() {
    let mut selector = BindingSelector::default();
    assert_eq!(selector.state(), SelectorState::Unloaded);
    assert!(selector.current_graph().is_none());

    selector.begin_load();
    assert_eq!(selector.state(), SelectorState::Resolving);
    assert!(selector.current_graph().is_none());
}

#[test]
fn should_bind_the_classified_asset() {
    let mut selector = BindingSelector::default();
    let ticket = selector.begin_load();

    assert!(selector.complete_load(ticket, Ok(cube228_scene()), &Configuration::default()));

    assert_eq!(selector.state(), SelectorState::Ready);
    assert_eq!(selector.source(), Some(AssetSource::Asset));
    assert!(selector.advisory().is_none());
    let asset = selector.current_graph().expect("graph is ready");
    assert_eq!(asset.bindings.resolved_count(), 4);
    let root = asset.graph.roots()[0];
    let root = asset.graph.node(root).map(|node| (node.name.clone(), node.get_local_transform().scale));
    assert_eq!(
        root,
        Some((DISPLAY_ROOT_NAME.to_string(), cgmath::Vector3::new(1.5, 1.5, 1.5)))
    );
    assert!(asset.graph.find_by_name(FALLBACK_ROOT_NAME).is_empty());
}

#[test]
fn should_fall_back_when_the_asset_is_unavailable() {
    let mut selector = BindingSelector::default();
    let ticket = selector.begin_load();

    selector.complete_load(ticket, Err(unavailable()), &Configuration::default());

    assert_eq!(selector.state(), SelectorState::Ready);
    assert_eq!(selector.source(), Some(AssetSource::Fallback));
    let advisory = selector.advisory().cloned();
    assert_eq!(advisory.map(|a| a.title), Some("3D Model Not Found".to_string()));
    let asset = selector.current_graph().expect("graph is ready");
    assert!(!asset.graph.find_by_name(FALLBACK_ROOT_NAME).is_empty());
    assert_eq!(asset.bindings.resolved_count(), 4);
}

#[test]
fn should_fall_back_when_nothing_classifies() {
    let mut selector = BindingSelector::default();
    let ticket = selector.begin_load();

    selector.complete_load(ticket, Ok(mystery_scene()), &Configuration::default());

    assert_eq!(selector.source(), Some(AssetSource::Fallback));
    // Nothing went wrong with the asset itself.
    assert!(selector.advisory().is_none());
    let asset = selector.current_graph().expect("graph is ready");
    assert!(asset.graph.find_by_name("mystery").is_empty());
    assert_eq!(asset.bindings.resolved_count(), 4);
}

#[test]
fn should_fall_back_for_an_empty_graph() {
    let mut selector = BindingSelector::default();
    let ticket = selector.begin_load();

    selector.complete_load(ticket, Ok(SceneGraph::new()), &Configuration::default());

    assert_eq!(selector.source(), Some(AssetSource::Fallback));
}

#[test]
fn should_discard_results_of_stale_tickets() {
    let mut selector = BindingSelector::default();
    let first = selector.begin_load();
    let second = selector.begin_load();

    assert!(selector.complete_load(second, Err(unavailable()), &Configuration::default()));
    assert!(!selector.complete_load(first, Ok(cube228_scene()), &Configuration::default()));

    assert_eq!(selector.source(), Some(AssetSource::Fallback));
    assert!(!selector.is_current(first));
}

#[test]
fn should_discard_a_stale_result_while_a_newer_load_is_pending() {
    let mut selector = BindingSelector::default();
    let first = selector.begin_load();
    let _pending = selector.begin_load();

    assert!(!selector.complete_load(first, Ok(cube228_scene()), &Configuration::default()));

    assert_eq!(selector.state(), SelectorState::Resolving);
    assert!(selector.current_graph().is_none());
}

#[test]
fn should_use_the_configuration_current_at_completion() {
    let mut selector = BindingSelector::default();
    let ticket = selector.begin_load();
    let mut config = Configuration::default();
    // Changes arriving while the asset resolves have nothing to apply to yet.
    for hex in ["#111111", "#222222", "#333333"] {
        let color = Color::from_hex(hex).unwrap();
        *config.colors.get_mut(PartRole::Body) = color;
        selector.on_config_change(ConfigChange::Color(PartRole::Body, color));
    }
    config.wheel_style = WheelStyle::Rugged;

    selector.complete_load(ticket, Ok(cube228_scene()), &config);

    let asset = selector.current_graph().expect("graph is ready");
    assert_eq!(
        asset.bindings.get(PartRole::Body).material.color,
        Color::rgb(0x33, 0x33, 0x33)
    );
    let wheel = node_named(&asset.graph, "Cube228_3");
    let scale = asset.graph.node(wheel).map(|node| node.get_local_transform().scale);
    assert_eq!(scale, Some(cgmath::Vector3::new(1.15, 1.15, 1.25)));
}

#[test]
fn should_apply_changes_without_reclassifying() {
    let mut selector = BindingSelector::default();
    let ticket = selector.begin_load();
    selector.complete_load(ticket, Ok(cube228_scene()), &Configuration::default());
    let before = selector.current_graph().expect("graph is ready");
    selector.take_pending_uploads();

    selector.on_config_change(ConfigChange::Color(PartRole::Wheel, Color::WHITE));

    assert_eq!(selector.take_pending_uploads(), vec![PartRole::Wheel]);
    let after = selector.current_graph().expect("graph is ready");
    assert_eq!(after.graph, before.graph);
    assert_eq!(after.bindings.get(PartRole::Wheel).material.color, Color::WHITE);

    selector.on_config_change(ConfigChange::WheelStyle(WheelStyle::Sporty));

    let styled = selector.current_graph().expect("graph is ready");
    assert_eq!(styled.bindings, after.bindings);
    assert!(selector.take_pending_uploads().is_empty());
    assert_eq!(selector.state(), SelectorState::Ready);
    let wheel = node_named(&styled.graph, "Cube228_3");
    let scale = styled.graph.node(wheel).map(|node| node.get_local_transform().scale);
    assert_eq!(scale, Some(cgmath::Vector3::new(1.0, 1.0, 0.85)));
    let body = node_named(&styled.graph, "Cube228");
    assert_eq!(
        styled.graph.node(body).map(|node| node.get_local_transform()),
        after.graph.node(body).map(|node| node.get_local_transform())
    );
}

#[test]
fn should_hand_out_independent_copies() {
    let mut selector = BindingSelector::default();
    let ticket = selector.begin_load();
    selector.complete_load(ticket, Ok(cube228_scene()), &Configuration::default());

    let mut copy = selector.current_graph().expect("graph is ready");
    copy.bindings.get_mut(PartRole::Body).material.color = Color::WHITE;
    copy.graph.materials.clear();

    let fresh = selector.current_graph().expect("graph is ready");
    assert_ne!(fresh.bindings.get(PartRole::Body).material.color, Color::WHITE);
    assert!(!fresh.graph.materials.is_empty());
}

#[test]
fn should_resolve_role_slots_to_role_materials() {
    let mut selector = BindingSelector::default();
    let ticket = selector.begin_load();
    selector.complete_load(ticket, Ok(cube228_scene()), &Configuration::default());
    let asset = selector.current_graph().expect("graph is ready");

    let handle = node_named(&asset.graph, "Cube228_1");
    let slot = asset
        .graph
        .node(handle)
        .and_then(|node| node.as_mesh())
        .and_then(|mesh| mesh.materials.first().copied());
    let material = slot.map(|slot| asset.material(&slot).name.clone());

    assert_eq!(material.as_deref(), Some("handle-material"));
    assert_eq!(asset.material(&MaterialSlot::Unassigned), &MaterialSpec::neutral());
    assert_eq!(asset.material(&MaterialSlot::Source(99)), &MaterialSpec::neutral());
}
