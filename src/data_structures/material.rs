//! Material descriptions and the slots meshes use to reference them.

use crate::data_structures::{color::Color, role::PartRole, texture::TextureMaps};

/// Surface appearance of a mesh: base color, PBR finish and texture maps.
///
/// After a material has been built for a role only [`color`](Self::color)
/// changes; finish and maps stay as they were inherited.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialSpec {
    pub name: String,
    pub color: Color,
    roughness: f32,
    metalness: f32,
    pub maps: TextureMaps,
}

impl MaterialSpec {
    pub fn new(name: impl Into<String>, color: Color, roughness: f32, metalness: f32) -> Self {
        Self {
            name: name.into(),
            color,
            roughness: roughness.clamp(0.0, 1.0),
            metalness: metalness.clamp(0.0, 1.0),
            maps: TextureMaps::default(),
        }
    }

    /// Mid-gray, half rough, non-metallic, untextured.
    pub fn neutral() -> Self {
        Self::new("neutral", Color::MID_GRAY, 0.5, 0.0)
    }

    pub fn with_maps(mut self, maps: TextureMaps) -> Self {
        self.maps = maps;
        self
    }

    pub fn roughness(&self) -> f32 {
        self.roughness
    }

    pub fn metalness(&self) -> f32 {
        self.metalness
    }

    /// Whether finish and maps match, ignoring name and color.
    pub fn same_finish(&self, other: &MaterialSpec) -> bool {
        self.roughness == other.roughness
            && self.metalness == other.metalness
            && self.maps == other.maps
    }
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self::neutral()
    }
}

/// What a mesh draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialSlot {
    /// Index into the scene graph's material library.
    Source(usize),
    /// The live material of a role binding.
    Role(PartRole),
    /// No material assigned by the asset.
    Unassigned,
}
