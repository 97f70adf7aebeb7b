use std::collections::HashMap;

use cgmath::Vector3;

use crate::data_structures::{
    color::Color,
    geometry::Geometry,
    material::{MaterialSlot, MaterialSpec},
    scene_graph::{AssetNode, Mesh, NodeId, SceneGraph},
    transform::Transform,
};

/**
 * This module contains all logic for loading assets from external files and
 * turning them into scene graphs.
 */
pub mod cache;
pub mod provider;
pub mod texture;

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window available"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| anyhow::anyhow!("page origin is not readable"))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        let response = reqwest::get(url).await?.error_for_status()?;
        response.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        // Absolute paths replace the assets directory when joined.
        let path = std::path::Path::new("./").join("assets").join(file_name);
        tokio::fs::read(&path)
            .await
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?
    };

    Ok(data)
}

/// Path of `uri` relative to the directory of `file_name`.
fn sibling_path(file_name: &str, uri: &str) -> String {
    match file_name.rsplit_once('/') {
        Some((dir, _)) => format!("{}/{}", dir, uri),
        None => uri.to_string(),
    }
}

/// Hands out `name`, `name_1`, `name_2`, ... for repeated names.
#[derive(Default)]
struct UniqueNames {
    seen: HashMap<String, usize>,
}

impl UniqueNames {
    fn next(&mut self, name: &str) -> String {
        let count = self.seen.entry(name.to_string()).or_insert(0);
        let unique = if *count == 0 {
            name.to_string()
        } else {
            format!("{}_{}", name, count)
        };
        *count += 1;
        unique
    }
}

pub async fn load_model_gltf(file_name: &str) -> anyhow::Result<SceneGraph> {
    let gltf_bytes = load_binary(file_name).await?;
    decode_gltf(file_name, &gltf_bytes).await
}

/// Decode a `.gltf` / `.glb` document into a scene graph.
///
/// External buffers are loaded relative to `file_name`. Images are not
/// decoded; materials keep references to them.
pub async fn decode_gltf(file_name: &str, bytes: &[u8]) -> anyhow::Result<SceneGraph> {
    let gltf = gltf::Gltf::from_slice(bytes)?;

    // Load buffers
    let mut buffer_data: Vec<Vec<u8>> = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => match gltf.blob.as_deref() {
                Some(blob) => buffer_data.push(blob.into()),
                None => anyhow::bail!("{} references a binary chunk it does not contain", file_name),
            },
            gltf::buffer::Source::Uri(uri) => {
                let bin = load_binary(&sibling_path(file_name, uri)).await?;
                buffer_data.push(bin);
            }
        }
    }

    let mut graph = SceneGraph::new();

    // Load materials
    for material in gltf.materials() {
        let pbr = material.pbr_metallic_roughness();
        let [r, g, b, _] = pbr.base_color_factor();
        let name = match material.name() {
            Some(name) => name.to_string(),
            None => format!("material_{}", graph.materials.len()),
        };
        let spec = MaterialSpec::new(
            name,
            Color::from_linear([r, g, b]),
            pbr.roughness_factor(),
            pbr.metallic_factor(),
        )
        .with_maps(texture::texture_maps(&material));
        graph.add_material(spec);
    }

    let scene = gltf.default_scene().or_else(|| gltf.scenes().next());
    let mut names = UniqueNames::default();
    if let Some(scene) = scene {
        for node in scene.nodes() {
            to_scene_node(&mut graph, None, node, &buffer_data, &mut names);
        }
    }
    log::info!(
        "Decoded {}: {} nodes, {} materials",
        file_name,
        graph.len(),
        graph.materials.len()
    );

    Ok(graph)
}

fn to_scene_node(
    graph: &mut SceneGraph,
    parent: Option<NodeId>,
    node: gltf::scene::Node,
    buf: &[Vec<u8>],
    names: &mut UniqueNames,
) {
    let (translation, rotation, scale) = node.transform().decomposed();
    let local = Transform::new()
        .with_position(translation.into())
        .with_rotation(cgmath::Quaternion::new(
            rotation[3],
            rotation[0],
            rotation[1],
            rotation[2],
        ))
        .with_scale(Vector3::from(scale));

    let mesh_name = node.mesh().and_then(|mesh| mesh.name().map(str::to_string));
    let node_name = node
        .name()
        .map(str::to_string)
        .or_else(|| mesh_name.clone())
        .unwrap_or_default();

    let mut primitives: Vec<Mesh> = node
        .mesh()
        .map(|mesh| {
            mesh.primitives()
                .map(|primitive| to_mesh(&primitive, buf))
                .collect()
        })
        .unwrap_or_default();

    let scene_node = if primitives.len() == 1 {
        let mut mesh = primitives.remove(0);
        mesh.name = mesh_name.clone();
        AssetNode::mesh(node_name, mesh)
    } else {
        AssetNode::group(node_name)
    }
    .with_transform(local);

    let id = match parent {
        Some(parent) => graph.add_child(parent, scene_node),
        None => graph.add_root(scene_node),
    };

    // Multi-material meshes become one child per primitive: name, name_1, ...
    let base_name = mesh_name.unwrap_or_else(|| format!("mesh_{}", id.0));
    for mut mesh in primitives {
        let child_name = names.next(&base_name);
        mesh.name = Some(child_name.clone());
        graph.add_child(id, AssetNode::mesh(child_name, mesh));
    }

    for child in node.children() {
        to_scene_node(graph, Some(id), child, buf, names);
    }
}

fn to_mesh(primitive: &gltf::Primitive, buf: &[Vec<u8>]) -> Mesh {
    let reader = primitive.reader(|buffer| buf.get(buffer.index()).map(Vec::as_slice));

    let mut geometry = Geometry::default();
    if let Some(positions) = reader.read_positions() {
        geometry.positions = positions.collect();
    }
    if let Some(normals) = reader.read_normals() {
        geometry.normals = normals.collect();
    }
    if let Some(indices) = reader.read_indices() {
        geometry.indices = indices.into_u32().collect();
    }
    if geometry.is_empty() {
        log::warn!("Primitive {} has no positions.", primitive.index());
    }

    let material = primitive
        .material()
        .index()
        .map_or(MaterialSlot::Unassigned, MaterialSlot::Source);
    Mesh {
        name: None,
        geometry,
        materials: vec![material],
    }
}
