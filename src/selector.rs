//! Binding selector.
//!
//! Turns the outcome of an asset request into one coherent role-bound graph:
//! the classified asset when at least one role resolves, the procedural
//! suitcase otherwise. Never a mix of both.
//!
//! ```text
//! Unloaded -> Resolving -> Classified     -> Ready
//!                       \> FallbackActive /
//! ```
//!
//! Once `Ready`, configuration changes only touch role materials and wheel
//! scale. Classification is not run again until the next load.

use std::sync::LazyLock;

use cgmath::Vector3;

use crate::{
    classify::RoleClassifier,
    config::{ConfigChange, Configuration},
    data_structures::{
        binding::RoleBindings,
        material::{MaterialSlot, MaterialSpec},
        role::PartRole,
        scene_graph::SceneGraph,
        transform::Transform,
    },
    error::AssetError,
    fallback::build_fallback,
    settings::EngineSettings,
    style::apply_wheel_style,
    synthesis::{bind_roles, update_color},
};

/// Name of the group that carries the display scale.
pub const DISPLAY_ROOT_NAME: &str = "suitcase";

static NEUTRAL_MATERIAL: LazyLock<MaterialSpec> = LazyLock::new(MaterialSpec::neutral);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorState {
    Unloaded,
    Resolving,
    Classified,
    FallbackActive,
    Ready,
}

/// Identifies one load request. Only the newest ticket may complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Where the composed graph came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetSource {
    Asset,
    Fallback,
}

/// Notice for the UI layer when the real asset could not be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Advisory {
    pub title: String,
    pub message: String,
}

impl Advisory {
    pub fn asset_unavailable(error: &AssetError) -> Self {
        Self {
            title: "3D Model Not Found".to_string(),
            message: format!(
                "The suitcase model could not be loaded ({}). A simplified model is shown instead and can still be configured.",
                error
            ),
        }
    }
}

/// A scene graph together with the bindings of its four roles.
#[derive(Clone, Debug, PartialEq)]
pub struct RoleBoundAsset {
    pub graph: SceneGraph,
    pub bindings: RoleBindings,
    pub source: AssetSource,
}

impl RoleBoundAsset {
    /// Material a mesh slot resolves to. Slots without a usable material get
    /// the neutral one.
    pub fn material(&self, slot: &MaterialSlot) -> &MaterialSpec {
        match slot {
            MaterialSlot::Role(role) => &self.bindings.get(*role).material,
            MaterialSlot::Source(index) => self
                .graph
                .materials
                .get(*index)
                .unwrap_or(&NEUTRAL_MATERIAL),
            MaterialSlot::Unassigned => &NEUTRAL_MATERIAL,
        }
    }

    pub fn take_pending_uploads(&mut self) -> Vec<PartRole> {
        self.bindings.take_pending_uploads()
    }
}

#[derive(Debug)]
pub struct BindingSelector {
    classifier: RoleClassifier,
    display_scale: f32,
    state: SelectorState,
    issued: u64,
    asset: Option<RoleBoundAsset>,
    advisory: Option<Advisory>,
}

impl BindingSelector {
    pub fn new(classifier: RoleClassifier, display_scale: f32) -> Self {
        Self {
            classifier,
            display_scale,
            state: SelectorState::Unloaded,
            issued: 0,
            asset: None,
            advisory: None,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(
            RoleClassifier::new(settings.classifier.clone()),
            settings.display_scale,
        )
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }

    pub fn source(&self) -> Option<AssetSource> {
        self.asset.as_ref().map(|asset| asset.source)
    }

    /// Start a load cycle. Any earlier ticket becomes stale.
    ///
    /// The previously composed graph stays available until the new cycle
    /// completes.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.state = SelectorState::Resolving;
        log::info!("Load cycle {} started", self.issued);
        LoadTicket(self.issued)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Finish the load cycle of `ticket` with the provider's result.
    ///
    /// `config` must be the configuration as it is now, not as it was when
    /// the load began. Returns `false` if the ticket is stale, in which case
    /// nothing changes.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<SceneGraph, AssetError>,
        config: &Configuration,
    ) -> bool {
        if !self.is_current(ticket) {
            log::warn!(
                "Discarding result of load cycle {}, cycle {} is newer",
                ticket.0,
                self.issued
            );
            return false;
        }

        self.advisory = None;
        let (mut graph, bindings, source) = match result {
            Ok(mut graph) => {
                let classification = self.classifier.classify(&graph);
                if classification.resolved_count() == 0 {
                    log::warn!("No part of the asset could be classified, using the procedural suitcase");
                    self.activate_fallback(config)
                } else {
                    self.state = SelectorState::Classified;
                    log::info!(
                        "Classified {} of {} roles",
                        classification.resolved_count(),
                        PartRole::ALL.len()
                    );
                    let bindings = bind_roles(&mut graph, &classification, config);
                    (graph, bindings, AssetSource::Asset)
                }
            }
            Err(e) => {
                log::warn!("{}, using the procedural suitcase", e);
                self.advisory = Some(Advisory::asset_unavailable(&e));
                self.activate_fallback(config)
            }
        };

        let scale = self.display_scale;
        graph.wrap_roots(
            DISPLAY_ROOT_NAME,
            Transform::new().with_scale(Vector3::new(scale, scale, scale)),
        );
        apply_wheel_style(&mut graph, bindings.get(PartRole::Wheel), config.wheel_style);

        self.asset = Some(RoleBoundAsset {
            graph,
            bindings,
            source,
        });
        self.state = SelectorState::Ready;
        log::info!("Load cycle {} ready", ticket.0);
        true
    }

    fn activate_fallback(
        &mut self,
        config: &Configuration,
    ) -> (SceneGraph, RoleBindings, AssetSource) {
        self.state = SelectorState::FallbackActive;
        let (graph, bindings) = build_fallback(config);
        (graph, bindings, AssetSource::Fallback)
    }

    /// Apply one configuration change to the composed graph.
    ///
    /// Before the first cycle completes there is nothing to update; the
    /// change is picked up when the cycle reads the configuration.
    pub fn on_config_change(&mut self, change: ConfigChange) {
        let Some(asset) = self.asset.as_mut() else {
            log::debug!("No graph yet, {:?} is applied on load", change);
            return;
        };
        match change {
            ConfigChange::Color(role, color) => update_color(&mut asset.bindings, role, color),
            ConfigChange::WheelStyle(style) => {
                apply_wheel_style(&mut asset.graph, asset.bindings.get(PartRole::Wheel), style)
            }
        }
    }

    /// Independent copy of the composed graph, `None` until the first cycle
    /// is ready.
    pub fn current_graph(&self) -> Option<RoleBoundAsset> {
        self.asset.clone()
    }

    /// Roles whose material changed since the last call.
    pub fn take_pending_uploads(&mut self) -> Vec<PartRole> {
        self.asset
            .as_mut()
            .map(RoleBoundAsset::take_pending_uploads)
            .unwrap_or_default()
    }
}

impl Default for BindingSelector {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}
