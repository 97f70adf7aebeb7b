//! Asset provider seam.
//!
//! The binding pipeline never touches files or the network itself. It asks an
//! [`AssetProvider`] for a decoded scene graph and gets either the graph or an
//! [`AssetError`] back. Tests swap in their own providers.

use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    data_structures::scene_graph::SceneGraph,
    error::AssetError,
    resources::{cache::AssetCache, decode_gltf, load_binary},
};

pub trait AssetProvider {
    /// Load and decode the asset at `path`.
    ///
    /// Every call hands out a graph the caller owns and may mutate freely.
    fn request_asset(
        &mut self,
        path: &str,
    ) -> impl Future<Output = Result<SceneGraph, AssetError>>;

    /// Forget anything remembered about `path`. The next request goes back to
    /// the source.
    fn invalidate(&mut self, path: &str) {
        let _ = path;
    }
}

/// Loads glTF / glb assets from `./assets` (natively) or the page origin (web).
///
/// Clones share one cache, so a request can run on its own handle while the
/// original stays available.
#[derive(Clone, Debug, Default)]
pub struct GltfAssetProvider {
    cache: Arc<Mutex<AssetCache>>,
}

impl GltfAssetProvider {
    pub fn new(cache: AssetCache) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn cache(&self) -> MutexGuard<'_, AssetCache> {
        // The cache holds no invariant a panicking holder could break.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AssetProvider for GltfAssetProvider {
    async fn request_asset(&mut self, path: &str) -> Result<SceneGraph, AssetError> {
        let cached = self.cache().get(path);
        if let Some(graph) = cached {
            log::debug!("Serving {} from the asset cache", path);
            return Ok((*graph).clone());
        }

        let start = instant::Instant::now();
        let bytes = load_binary(path)
            .await
            .map_err(|e| AssetError::Unavailable {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        let graph = decode_gltf(path, &bytes)
            .await
            .map_err(|e| AssetError::Decode {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        if graph.renderables().is_empty() {
            return Err(AssetError::EmptyScene {
                path: path.to_string(),
            });
        }
        log::info!("Loaded {} in {:?}", path, start.elapsed());

        let shared = self.cache().insert(path, graph);
        Ok((*shared).clone())
    }

    fn invalidate(&mut self, path: &str) {
        if self.cache().invalidate(path) {
            log::debug!("Dropped {} from the asset cache", path);
        }
    }
}
