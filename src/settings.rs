//! Engine settings: where the asset lives, how much to cache and how to
//! classify nodes.
//!
//! All settings have defaults, so an empty or partial TOML file is valid.
//!
//! ```toml
//! asset_path = "models/suitcase.glb"
//! cache_capacity = 4
//!
//! [classifier.aliases]
//! body = ["Cube228", "Suitcase_Body"]
//!
//! [classifier.thresholds]
//! high_fraction = 0.8
//! ```
//!
//! A role table that is present replaces the defaults for that table; roles
//! missing from it get an empty list.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{data_structures::role::PerRole, error::ConfigError};

/// Size / position cut-offs of the geometric classification pass.
///
/// Positions and sizes are measured relative to the bounds of the whole
/// scene, so the same numbers work for assets authored at any scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometricThresholds {
    /// A node whose center lies above this fraction of the scene height is "high".
    pub high_fraction: f32,
    /// A node whose center lies below this fraction of the scene height is "low".
    pub low_fraction: f32,
    /// Horizontal extent must exceed vertical extent by this factor for a handle.
    pub handle_dominance: f32,
    /// Every axis below this fraction of the largest scene extent counts as small.
    pub small_fraction: f32,
}

impl Default for GeometricThresholds {
    fn default() -> Self {
        Self {
            high_fraction: 0.75,
            low_fraction: 0.2,
            handle_dominance: 1.5,
            small_fraction: 0.1,
        }
    }
}

/// Naming tables and thresholds used by the role classifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Exact node / mesh names per role.
    pub aliases: PerRole<Vec<String>>,
    /// Lower-case substrings per role.
    pub keywords: PerRole<Vec<String>>,
    pub thresholds: GeometricThresholds,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            aliases: PerRole {
                body: strings(&["Cube228", "Body", "Suitcase_Body", "suitcase_body", "Shell"]),
                handle: strings(&["Cube228_1", "Handle", "Suitcase_Handle", "suitcase_handle"]),
                zipper: strings(&["Cube228_2", "Zipper", "Suitcase_Zipper", "suitcase_zipper"]),
                wheel: strings(&["Cube228_3", "Wheel", "Wheels", "Suitcase_Wheels", "suitcase_wheels"]),
            },
            keywords: PerRole {
                body: strings(&["body", "shell", "panel", "hull"]),
                handle: strings(&["handle", "grip", "trolley", "telescop"]),
                zipper: strings(&["zipper", "zip", "slider"]),
                wheel: strings(&["wheel", "caster", "castor", "roller", "tyre", "tire"]),
            },
            thresholds: GeometricThresholds::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Asset path handed to the asset provider.
    pub asset_path: String,
    /// Number of decoded assets the cache keeps.
    pub cache_capacity: usize,
    /// Uniform scale of the composed root.
    pub display_scale: f32,
    pub classifier: ClassifierSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            asset_path: "models/suitcase.glb".to_string(),
            cache_capacity: 4,
            display_scale: 1.5,
            classifier: ClassifierSettings::default(),
        }
    }
}

impl EngineSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Settings(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Settings(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }
}
