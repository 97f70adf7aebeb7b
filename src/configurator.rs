//! Entry point tying the configuration store, the asset provider and the
//! binding selector together.
//!
//! A load cycle is split in three steps so the configuration stays writable
//! while an asset resolves: [`Configurator::begin_load`] hands out a
//! [`PendingLoad`] that owns its own provider handle,
//! [`PendingLoad::resolve`] runs the request and
//! [`Configurator::finish_load`] commits the result if no newer cycle has
//! started. [`Configurator::load`] does all three in one go.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use suitcase_configurator::{configurator::Configurator, settings::EngineSettings};
//!
//! let mut configurator = Configurator::new(EngineSettings::default());
//! configurator.load().await;
//! configurator.store_mut().set_body_color("#ff0000")?;
//! configurator.sync();
//! let asset = configurator.current_graph();
//! # Ok(())
//! # }
//! ```

use futures::channel::mpsc::UnboundedReceiver;

use crate::{
    config::{ConfigChange, ConfigField, ConfigStore},
    data_structures::scene_graph::SceneGraph,
    error::AssetError,
    resources::{
        cache::AssetCache,
        provider::{AssetProvider, GltfAssetProvider},
    },
    selector::{Advisory, BindingSelector, LoadTicket, RoleBoundAsset, SelectorState},
    settings::EngineSettings,
};

pub struct Configurator<P: AssetProvider = GltfAssetProvider> {
    asset_path: String,
    store: ConfigStore,
    selector: BindingSelector,
    provider: P,
    changes: UnboundedReceiver<ConfigChange>,
}

impl Configurator<GltfAssetProvider> {
    /// Configurator loading glTF assets through a cache sized by `settings`.
    pub fn new(settings: EngineSettings) -> Self {
        let provider = GltfAssetProvider::new(AssetCache::new(settings.cache_capacity));
        Self::with_provider(settings, provider)
    }
}

impl<P: AssetProvider> Configurator<P> {
    pub fn with_provider(settings: EngineSettings, provider: P) -> Self {
        let mut store = ConfigStore::new();
        let changes = store.subscribe(&ConfigField::ALL);
        Self {
            selector: BindingSelector::from_settings(&settings),
            asset_path: settings.asset_path,
            store,
            provider,
            changes,
        }
    }

    pub fn asset_path(&self) -> &str {
        &self.asset_path
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Write access to the configuration. Call [`Configurator::sync`]
    /// afterwards to bring the composed graph up to date.
    pub fn store_mut(&mut self) -> &mut ConfigStore {
        &mut self.store
    }

    pub fn selector(&self) -> &BindingSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut BindingSelector {
        &mut self.selector
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn state(&self) -> SelectorState {
        self.selector.state()
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.selector.advisory()
    }

    /// Forward queued configuration changes to the selector.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(change) = self.changes.try_recv() {
            self.selector.on_config_change(change);
            applied += 1;
        }
        applied
    }

    fn discard_pending_changes(&mut self) {
        while self.changes.try_recv().is_ok() {}
    }

    /// Commit the result of a [`PendingLoad`]. Returns whether it was
    /// committed; results of superseded cycles are dropped.
    ///
    /// A failed request is not an error: the selector switches to the
    /// procedural suitcase and raises an advisory.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<SceneGraph, AssetError>,
    ) -> bool {
        let committed = self
            .selector
            .complete_load(ticket, result, self.store.current());
        if committed {
            // The new graph already reflects every queued change.
            self.discard_pending_changes();
        }
        committed
    }

    pub fn current_graph(&self) -> Option<RoleBoundAsset> {
        self.selector.current_graph()
    }
}

impl<P: AssetProvider + Clone> Configurator<P> {
    /// Start a load cycle. Any cycle still in flight becomes stale.
    pub fn begin_load(&mut self) -> PendingLoad<P> {
        PendingLoad {
            ticket: self.selector.begin_load(),
            path: self.asset_path.clone(),
            provider: self.provider.clone(),
        }
    }

    /// Run one load cycle. Returns whether its result was committed.
    pub async fn load(&mut self) -> bool {
        let pending = self.begin_load();
        let (ticket, result) = pending.resolve().await;
        self.finish_load(ticket, result)
    }

    /// Drop the cached copy of the asset and load it again.
    pub async fn reload(&mut self) -> bool {
        self.provider.invalidate(&self.asset_path);
        self.load().await
    }
}

/// An asset request detached from its [`Configurator`].
#[derive(Debug)]
pub struct PendingLoad<P> {
    ticket: LoadTicket,
    path: String,
    provider: P,
}

impl<P: AssetProvider> PendingLoad<P> {
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request the asset. Hand the pair to [`Configurator::finish_load`].
    pub async fn resolve(mut self) -> (LoadTicket, Result<SceneGraph, AssetError>) {
        let result = self.provider.request_asset(&self.path).await;
        (self.ticket, result)
    }
}
