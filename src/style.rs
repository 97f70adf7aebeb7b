//! Wheel styles and the scale they put on the wheel role.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    data_structures::{binding::RoleBinding, scene_graph::SceneGraph},
    error::ConfigError,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelStyle {
    /// Classic smooth wheels.
    #[default]
    Standard,
    /// Slimmer wheels.
    Sporty,
    /// Thicker all-terrain wheels.
    Rugged,
}

/// Scale applied on top of a wheel node's original scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelStyleProfile {
    pub scale: cgmath::Vector3<f32>,
}

impl WheelStyle {
    pub const ALL: [WheelStyle; 3] = [WheelStyle::Standard, WheelStyle::Sporty, WheelStyle::Rugged];

    pub const fn id(self) -> &'static str {
        match self {
            WheelStyle::Standard => "standard",
            WheelStyle::Sporty => "sporty",
            WheelStyle::Rugged => "rugged",
        }
    }

    /// Resolves unknown identifiers to [`WheelStyle::Standard`].
    pub fn from_id_or_default(id: &str) -> Self {
        id.parse().unwrap_or_else(|e| {
            log::warn!("{}, using the standard wheel profile", e);
            WheelStyle::Standard
        })
    }

    pub fn profile(self) -> WheelStyleProfile {
        let scale = match self {
            WheelStyle::Standard => cgmath::Vector3::new(1.0, 1.0, 1.0),
            WheelStyle::Sporty => cgmath::Vector3::new(1.0, 1.0, 0.85),
            WheelStyle::Rugged => cgmath::Vector3::new(1.15, 1.15, 1.25),
        };
        WheelStyleProfile { scale }
    }
}

impl FromStr for WheelStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WheelStyle::ALL
            .into_iter()
            .find(|style| style.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownWheelStyle(s.to_string()))
    }
}

impl fmt::Display for WheelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Sets every wheel node's scale to `base_scale * profile`.
///
/// The scale is set, not accumulated, so applying a style twice is the same
/// as applying it once. Nodes without geometry in the graph are skipped.
pub fn apply_wheel_style(graph: &mut SceneGraph, wheel: &RoleBinding, style: WheelStyle) {
    let profile = style.profile();
    for bound in &wheel.nodes {
        let Some(node) = graph.node(bound.id) else {
            log::warn!("Wheel node {:?} is not part of the current graph.", bound.id);
            continue;
        };
        let mut local = *node.get_local_transform();
        local.scale = cgmath::Vector3::new(
            bound.base_scale.x * profile.scale.x,
            bound.base_scale.y * profile.scale.y,
            bound.base_scale.z * profile.scale.z,
        );
        graph.set_local_transform(bound.id, local);
    }
    log::debug!(
        "Applied {} wheel style to {} node(s)",
        style,
        wheel.nodes.len()
    );
}
