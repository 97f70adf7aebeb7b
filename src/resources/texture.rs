use crate::data_structures::texture::{TextureInfo, TextureMaps, TextureRef, TextureSource};

/// Reference to the image behind a glTF texture, without decoding it.
pub fn texture_ref(texture: gltf::Texture, tex_coord: u32) -> TextureRef {
    let image = texture.source();
    let source = match image.source() {
        gltf::image::Source::View { view, mime_type } => TextureSource::BufferView {
            buffer: view.buffer().index(),
            offset: view.offset(),
            length: view.length(),
            mime_type: mime_type.to_string(),
        },
        gltf::image::Source::Uri { uri, mime_type } => TextureSource::Uri {
            uri: uri.to_string(),
            mime_type: mime_type.map(str::to_string),
        },
    };
    TextureRef::new(TextureInfo {
        image: image.index(),
        name: texture.name().or(image.name()).map(str::to_string),
        source,
        tex_coord,
    })
}

/// Maps of a glTF material.
///
/// glTF packs roughness and metalness into one texture, so both slots point
/// at the same reference. There is no bump or environment map in core glTF.
pub fn texture_maps(material: &gltf::Material) -> TextureMaps {
    let pbr = material.pbr_metallic_roughness();
    let diffuse = pbr
        .base_color_texture()
        .map(|info| texture_ref(info.texture(), info.tex_coord()));
    let normal = material
        .normal_texture()
        .map(|normal| texture_ref(normal.texture(), normal.tex_coord()));
    let metallic_roughness = pbr
        .metallic_roughness_texture()
        .map(|info| texture_ref(info.texture(), info.tex_coord()));

    TextureMaps {
        diffuse,
        normal,
        bump: None,
        roughness: metallic_roughness.clone(),
        metalness: metallic_roughness,
        environment: None,
    }
}
