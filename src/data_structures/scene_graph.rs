//! Scene graph: a tree of named nodes, some of which carry renderable meshes.
//!
//! Nodes live in an arena owned by [`SceneGraph`] and are addressed by
//! [`NodeId`]. A node is either a grouping node or a mesh ([`NodeKind`]), so
//! "is this renderable" is a match rather than a runtime type check.
//! Traversal is a stable depth-first pre-order over roots and children in
//! insertion order, which makes everything built on top of it deterministic.

use crate::data_structures::{
    bounds::Aabb,
    geometry::Geometry,
    material::{MaterialSlot, MaterialSpec},
    transform::Transform,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Renderable payload of a mesh node.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    /// Name of the source mesh, which can differ from the node name.
    pub name: Option<String>,
    pub geometry: Geometry,
    pub materials: Vec<MaterialSlot>,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: MaterialSlot) -> Self {
        Self {
            name: None,
            geometry,
            materials: vec![material],
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(Mesh),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssetNode {
    /// Possibly empty, not necessarily unique.
    pub name: String,
    pub kind: NodeKind,
    local: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl AssetNode {
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    pub fn mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self::with_kind(name, NodeKind::Mesh(mesh))
    }

    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            local: Transform::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, local: Transform) -> Self {
        self.local = local;
        self
    }

    pub fn get_local_transform(&self) -> &Transform {
        &self.local
    }

    pub fn get_children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            NodeKind::Group => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut Mesh> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            NodeKind::Group => None,
        }
    }

    pub fn is_renderable(&self) -> bool {
        self.as_mesh().is_some()
    }

    /// Node name and source mesh name, for matching against naming tables.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let mesh_name = self.as_mesh().and_then(|mesh| mesh.name.as_deref());
        std::iter::once(self.name.as_str())
            .chain(mesh_name)
            .filter(|name| !name.is_empty())
    }
}

/// An owned scene graph plus the material library its meshes refer to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneGraph {
    nodes: Vec<AssetNode>,
    roots: Vec<NodeId>,
    pub materials: Vec<MaterialSpec>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn add_root(&mut self, node: AssetNode) -> NodeId {
        let id = self.insert(node, None);
        self.roots.push(id);
        id
    }

    /// Appends `node` as the last child of `parent`.
    ///
    /// An unknown parent makes the node a root instead.
    pub fn add_child(&mut self, parent: NodeId, node: AssetNode) -> NodeId {
        if parent.0 >= self.nodes.len() {
            log::warn!(
                "Parent {:?} does not exist in a graph of {} nodes, adding {:?} as root.",
                parent,
                self.nodes.len(),
                node.name
            );
            return self.add_root(node);
        }
        let id = self.insert(node, Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    fn insert(&mut self, mut node: AssetNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        node.children.clear();
        self.nodes.push(node);
        id
    }

    pub fn add_material(&mut self, material: MaterialSpec) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn node(&self, id: NodeId) -> Option<&AssetNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut AssetNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn set_local_transform(&mut self, id: NodeId, local: Transform) {
        match self.nodes.get_mut(id.0) {
            Some(node) => node.local = local,
            None => log::warn!("You tried to transform {:?}, which is not part of this graph.", id),
        }
    }

    /// Depth-first pre-order over all nodes reachable from the roots.
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Mesh nodes in depth-first order.
    pub fn renderables(&self) -> Vec<NodeId> {
        self.depth_first()
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(AssetNode::is_renderable))
            .collect()
    }

    /// All nodes below `id` (excluding `id`) in depth-first order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = self
            .node(id)
            .map(|node| node.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    pub fn find_by_name(&self, name: &str) -> Vec<NodeId> {
        self.depth_first()
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(|node| node.name == name))
            .collect()
    }

    /// Product of local matrices from the root down to `id`.
    pub fn world_matrix(&self, id: NodeId) -> cgmath::Matrix4<f32> {
        let mut chain = Vec::new();
        let mut current = self.node(id);
        while let Some(node) = current {
            chain.push(node.local.to_matrix());
            current = node.parent.and_then(|parent| self.node(parent));
        }
        chain
            .into_iter()
            .rev()
            .fold(Transform::default().to_matrix(), |world, local| world * local)
    }

    /// World-space bounds of the node's own geometry, recomputed on every call.
    pub fn world_bounds(&self, id: NodeId) -> Option<Aabb> {
        let mesh = self.node(id)?.as_mesh()?;
        let local_bounds = mesh.geometry.local_bounds()?;
        Some(local_bounds.transform(&self.world_matrix(id)))
    }

    /// World-space bounds of every mesh in the graph.
    pub fn bounds(&self) -> Option<Aabb> {
        self.renderables()
            .into_iter()
            .filter_map(|id| self.world_bounds(id))
            .reduce(|merged, bounds| merged.merge(&bounds))
    }

    /// Puts every current root under a new group root and returns its id.
    pub fn wrap_roots(&mut self, name: impl Into<String>, local: Transform) -> NodeId {
        let old_roots = std::mem::take(&mut self.roots);
        let wrapper = self.add_root(AssetNode::group(name).with_transform(local));
        for root in &old_roots {
            self.nodes[root.0].parent = Some(wrapper);
        }
        self.nodes[wrapper.0].children = old_roots;
        wrapper
    }
}
