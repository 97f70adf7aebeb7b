use std::sync::Arc;

use suitcase_configurator::{data_structures::scene_graph::SceneGraph, resources::cache::AssetCache};

use crate::common::test_utils::{cube228_scene, mystery_scene, unnamed_scene};

mod common;

#[test]
fn should_evict_the_least_recently_used_entry() {
    let mut cache = AssetCache::new(2);
    cache.insert("a.glb", cube228_scene());
    cache.insert("b.glb", unnamed_scene());
    // Touch `a` so `b` becomes the oldest.
    assert!(cache.get("a.glb").is_some());

    cache.insert("c.glb", mystery_scene());

    assert_eq!(cache.len(), 2);
    assert!(cache.contains("a.glb"));
    assert!(!cache.contains("b.glb"));
    assert!(cache.contains("c.glb"));
}

#[test]
fn should_replace_an_entry_for_the_same_path() {
    let mut cache = AssetCache::new(2);
    cache.insert("a.glb", cube228_scene());
    cache.insert("a.glb", mystery_scene());

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("a.glb").as_deref(), Some(&mystery_scene()));
}

#[test]
fn should_share_one_decoded_copy() {
    let mut cache = AssetCache::default();
    let inserted = cache.insert("a.glb", cube228_scene());
    let cached = cache.get("a.glb").unwrap();

    assert!(Arc::ptr_eq(&inserted, &cached));
}

#[test]
fn should_not_keep_anything_with_zero_capacity() {
    let mut cache = AssetCache::new(0);
    let graph = cache.insert("a.glb", SceneGraph::new());

    assert!(graph.is_empty());
    assert!(cache.is_empty());
    assert!(cache.get("a.glb").is_none());
}

#[test]
fn should_invalidate_and_clear() {
    let mut cache = AssetCache::new(3);
    cache.insert("a.glb", cube228_scene());
    cache.insert("b.glb", unnamed_scene());

    assert!(cache.invalidate("a.glb"));
    assert!(!cache.invalidate("a.glb"));
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.capacity(), 3);
}
