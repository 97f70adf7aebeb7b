//! Cache of decoded assets.
//!
//! Keeps up to `capacity` decoded scene graphs keyed by path and evicts the
//! least recently used one when full. Cached graphs are shared read-only;
//! callers always receive their own clone. Failed loads are never cached.

use std::sync::Arc;

use crate::data_structures::scene_graph::SceneGraph;

#[derive(Debug, Clone)]
pub struct AssetCache {
    capacity: usize,
    // Least recently used first.
    entries: Vec<(String, Arc<SceneGraph>)>,
}

impl AssetCache {
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == path)
    }

    /// Look up `path` and mark it as most recently used.
    pub fn get(&mut self, path: &str) -> Option<Arc<SceneGraph>> {
        let index = self.entries.iter().position(|(key, _)| key == path)?;
        let entry = self.entries.remove(index);
        let graph = entry.1.clone();
        self.entries.push(entry);
        Some(graph)
    }

    pub fn insert(&mut self, path: &str, graph: SceneGraph) -> Arc<SceneGraph> {
        let graph = Arc::new(graph);
        if self.capacity == 0 {
            return graph;
        }
        self.invalidate(path);
        if self.entries.len() >= self.capacity {
            let (evicted, _) = self.entries.remove(0);
            log::debug!("Evicting {} from the asset cache", evicted);
        }
        self.entries.push((path.to_string(), graph.clone()));
        graph
    }

    /// Returns whether an entry was removed.
    pub fn invalidate(&mut self, path: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(key, _)| key != path);
        before != self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new(4)
    }
}
