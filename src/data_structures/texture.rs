//! Texture references carried by materials.
//!
//! Materials never own pixel data. A [`TextureRef`] points at an image of the
//! decoded asset; copying a material copies the reference, so derived
//! materials keep showing the same maps as their source.

use std::sync::Arc;

/// Where the referenced image lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextureSource {
    /// Image stored inside one of the asset's buffers.
    BufferView {
        buffer: usize,
        offset: usize,
        length: usize,
        mime_type: String,
    },
    /// Image stored next to the asset (or a data URI).
    Uri {
        uri: String,
        mime_type: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureInfo {
    /// Index of the image inside the decoded asset.
    pub image: usize,
    pub name: Option<String>,
    pub source: TextureSource,
    /// UV set the map samples from.
    pub tex_coord: u32,
}

/// Shared, immutable reference to a texture of the source asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureRef(Arc<TextureInfo>);

impl TextureRef {
    pub fn new(info: TextureInfo) -> Self {
        Self(Arc::new(info))
    }

    pub fn info(&self) -> &TextureInfo {
        &self.0
    }

    /// Two references point at the very same texture record.
    pub fn same_texture(&self, other: &TextureRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// The texture slots a material can inherit from its source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextureMaps {
    pub diffuse: Option<TextureRef>,
    pub normal: Option<TextureRef>,
    pub bump: Option<TextureRef>,
    pub roughness: Option<TextureRef>,
    pub metalness: Option<TextureRef>,
    pub environment: Option<TextureRef>,
}

impl TextureMaps {
    /// Number of populated slots, used to pick the richest source material.
    pub fn count(&self) -> usize {
        [
            &self.diffuse,
            &self.normal,
            &self.bump,
            &self.roughness,
            &self.metalness,
            &self.environment,
        ]
        .iter()
        .filter(|slot| slot.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
