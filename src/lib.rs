//! suitcase-configurator
//!
//! Core of a 3D suitcase configurator. Takes an arbitrary decoded scene graph,
//! finds the four configurable parts in it (body, handle, zipper, wheels),
//! gives each part its own material driven by user-chosen colors, applies
//! the selected wheel style and hands a single coherent graph to the renderer.
//! When the asset cannot be loaded, or nothing in it can be recognised, a
//! procedural suitcase with the same four parts takes its place.
//!
//! High-level modules
//! - `classify`: rule table assigning scene nodes to part roles
//! - `config`: configuration values, validated store and change notifications
//! - `configurator`: façade driving load cycles and configuration sync
//! - `data_structures`: scene graph, materials, bindings, colors and geometry
//! - `fallback`: the procedural suitcase
//! - `resources`: glTF loading, asset cache and the asset provider seam
//! - `selector`: the load-cycle state machine exposing the composed graph
//! - `settings`: engine and classifier settings, loadable from TOML
//! - `style`: wheel style profiles
//! - `synthesis`: per-role material synthesis and color updates
//!

pub mod classify;
pub mod config;
pub mod configurator;
pub mod data_structures;
pub mod error;
pub mod fallback;
pub mod logging;
pub mod resources;
pub mod selector;
pub mod settings;
pub mod style;
pub mod synthesis;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use configurator::Configurator;
pub use data_structures::{color::Color, role::PartRole};
pub use error::{AssetError, ConfigError};
pub use style::WheelStyle;
