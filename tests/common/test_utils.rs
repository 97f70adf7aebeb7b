#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cgmath::Vector3;
use suitcase_configurator::{
    data_structures::{
        geometry::Geometry,
        material::{MaterialSlot, MaterialSpec},
        scene_graph::{AssetNode, Mesh, NodeId, SceneGraph},
        texture::{TextureInfo, TextureMaps, TextureRef, TextureSource},
        transform::Transform,
    },
    error::AssetError,
    resources::provider::AssetProvider,
    Color,
};

pub(crate) fn texture(name: &str, image: usize) -> TextureRef {
    TextureRef::new(TextureInfo {
        image,
        name: Some(name.to_string()),
        source: TextureSource::Uri {
            uri: format!("{}.png", name),
            mime_type: Some("image/png".to_string()),
        },
        tex_coord: 0,
    })
}

/// Source material with `map_count` of the diffuse / normal / roughness maps.
pub(crate) fn source_material(name: &str, map_count: usize) -> MaterialSpec {
    let mut maps = TextureMaps::default();
    if map_count > 0 {
        maps.diffuse = Some(texture(&format!("{}_diffuse", name), 0));
    }
    if map_count > 1 {
        maps.normal = Some(texture(&format!("{}_normal", name), 1));
    }
    if map_count > 2 {
        maps.roughness = Some(texture(&format!("{}_roughness", name), 2));
    }
    MaterialSpec::new(name, Color::rgb(0x80, 0x40, 0x20), 0.33, 0.66).with_maps(maps)
}

/// Box mesh node centered at `position`.
pub(crate) fn box_node(
    name: &str,
    size: [f32; 3],
    position: [f32; 3],
    material: MaterialSlot,
) -> AssetNode {
    AssetNode::mesh(
        name,
        Mesh::new(Geometry::cuboid(size[0], size[1], size[2]), material),
    )
    .with_transform(Transform::from(Vector3::from(position)))
}

/// The production asset layout: one mesh split into `Cube228`,
/// `Cube228_1` .. `Cube228_3` under a single group.
pub(crate) fn cube228_scene() -> SceneGraph {
    let mut graph = SceneGraph::new();
    let body_material = graph.add_material(source_material("Leather", 3));
    let plastic = graph.add_material(source_material("Plastic", 1));
    let metal = graph.add_material(source_material("Metal", 0));
    let rubber = graph.add_material(source_material("Rubber", 2));

    let root = graph.add_root(AssetNode::group("Sketchfab_model"));
    let parts = [
        ("Cube228", [1.0, 1.4, 0.5], [0.0, 0.0, 0.0], body_material),
        ("Cube228_1", [0.5, 0.05, 0.05], [0.0, 0.9, 0.0], plastic),
        ("Cube228_2", [0.9, 0.02, 0.02], [0.0, 0.2, 0.26], metal),
        ("Cube228_3", [0.1, 0.1, 0.1], [0.4, -0.8, 0.0], rubber),
    ];
    for (name, size, position, material) in parts {
        graph.add_child(
            root,
            box_node(name, size, position, MaterialSlot::Source(material)),
        );
    }
    graph
}

/// Meshes with meaningless names laid out like a suitcase.
pub(crate) fn unnamed_scene() -> SceneGraph {
    let mut graph = SceneGraph::new();
    let root = graph.add_root(AssetNode::group("Scene"));
    let parts = [
        ("node_0", [1.0, 1.0, 0.5], [0.0, 0.0, 0.0]),
        ("node_1", [0.6, 0.05, 0.05], [0.0, 0.65, 0.0]),
        ("node_2", [0.1, 0.1, 0.1], [0.4, -0.6, 0.0]),
        ("node_3", [0.05, 0.05, 0.05], [0.0, 0.1, 0.3]),
    ];
    for (name, size, position) in parts {
        graph.add_child(root, box_node(name, size, position, MaterialSlot::Unassigned));
    }
    graph
}

/// A single flat quad nothing can be made of.
pub(crate) fn mystery_scene() -> SceneGraph {
    let mut graph = SceneGraph::new();
    let quad = Geometry {
        positions: vec![
            [-0.5, 0.0, -0.5],
            [0.5, 0.0, -0.5],
            [0.5, 0.0, 0.5],
            [-0.5, 0.0, 0.5],
        ],
        normals: vec![[0.0, 1.0, 0.0]; 4],
        indices: vec![0, 1, 2, 2, 3, 0],
    };
    graph.add_root(AssetNode::mesh(
        "mystery",
        Mesh::new(quad, MaterialSlot::Unassigned),
    ));
    graph
}

pub(crate) fn node_named(graph: &SceneGraph, name: &str) -> NodeId {
    graph
        .find_by_name(name)
        .first()
        .copied()
        .unwrap_or_else(|| panic!("no node named {}", name))
}

#[derive(Default)]
struct ServedAssets {
    graph: Option<SceneGraph>,
    requests: usize,
    invalidated: Vec<String>,
}

/// Provider serving a fixed graph, or failing when it has none. Clones share
/// their state.
#[derive(Clone, Default)]
pub(crate) struct StaticProvider {
    state: Arc<Mutex<ServedAssets>>,
}

impl StaticProvider {
    pub(crate) fn serving(graph: SceneGraph) -> Self {
        let provider = Self::default();
        provider.set_graph(Some(graph));
        provider
    }

    pub(crate) fn failing() -> Self {
        Self::default()
    }

    pub(crate) fn set_graph(&self, graph: Option<SceneGraph>) {
        self.state.lock().unwrap().graph = graph;
    }

    pub(crate) fn requests(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    pub(crate) fn invalidated(&self) -> Vec<String> {
        self.state.lock().unwrap().invalidated.clone()
    }
}

impl AssetProvider for StaticProvider {
    async fn request_asset(&mut self, path: &str) -> Result<SceneGraph, AssetError> {
        let mut state = self.state.lock().unwrap();
        state.requests += 1;
        match &state.graph {
            Some(graph) => Ok(graph.clone()),
            None => Err(AssetError::Unavailable {
                path: path.to_string(),
                reason: "404 Not Found".to_string(),
            }),
        }
    }

    fn invalidate(&mut self, path: &str) {
        self.state.lock().unwrap().invalidated.push(path.to_string());
    }
}
