//! Data structures shared by every stage of the binding pipeline.
//!
//! - `binding` ties roles to nodes and their live materials
//! - `bounds` holds axis-aligned bounding boxes derived from geometry
//! - `color` is the 8-bit sRGB color exchanged with the configuration store
//! - `geometry` contains triangle data and the procedural box / cylinder builders
//! - `material` describes surface appearance and how meshes reference it
//! - `role` names the four semantic parts
//! - `scene_graph` is the arena-backed node tree
//! - `texture` holds references to the source asset's texture maps
//! - `transform` is the per-node translation / rotation / scale

pub mod binding;
pub mod bounds;
pub mod color;
pub mod geometry;
pub mod material;
pub mod role;
pub mod scene_graph;
pub mod texture;
pub mod transform;
