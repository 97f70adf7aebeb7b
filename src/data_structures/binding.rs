//! Role bindings: which nodes play a role, and the live material drawing them.

use crate::data_structures::{
    material::MaterialSpec,
    role::{PartRole, PerRole},
    scene_graph::NodeId,
};

/// How a role came to be bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Exact match against the alias table.
    Alias,
    /// Keyword found in a lower-cased node name.
    Keyword,
    /// Picked by size / position.
    Geometric,
    /// Built by the fallback synthesizer.
    Procedural,
    /// No node plays this role; only the material exists.
    Unresolved,
}

/// A node playing a role, with the scale it had when it was bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundNode {
    pub id: NodeId,
    pub base_scale: cgmath::Vector3<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoleBinding {
    pub role: PartRole,
    pub nodes: Vec<BoundNode>,
    pub material: MaterialSpec,
    pub resolution: Resolution,
    needs_upload: bool,
}

impl RoleBinding {
    pub fn new(
        role: PartRole,
        nodes: Vec<BoundNode>,
        material: MaterialSpec,
        resolution: Resolution,
    ) -> Self {
        Self {
            role,
            nodes,
            material,
            resolution,
            needs_upload: true,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution != Resolution::Unresolved
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.nodes.iter().map(|bound| bound.id)
    }

    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    pub(crate) fn mark_for_upload(&mut self) {
        self.needs_upload = true;
    }

    pub(crate) fn clear_upload(&mut self) {
        self.needs_upload = false;
    }
}

/// Exactly one binding per role.
#[derive(Clone, Debug, PartialEq)]
pub struct RoleBindings(PerRole<RoleBinding>);

impl RoleBindings {
    pub fn new(bindings: PerRole<RoleBinding>) -> Self {
        Self(bindings)
    }

    pub fn get(&self, role: PartRole) -> &RoleBinding {
        self.0.get(role)
    }

    pub fn get_mut(&mut self, role: PartRole) -> &mut RoleBinding {
        self.0.get_mut(role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleBinding> {
        self.0.iter().map(|(_, binding)| binding)
    }

    pub fn resolved_count(&self) -> usize {
        self.iter().filter(|binding| binding.is_resolved()).count()
    }

    /// Roles whose material changed since the render layer last took them.
    pub fn take_pending_uploads(&mut self) -> Vec<PartRole> {
        PartRole::ALL
            .into_iter()
            .filter(|role| {
                let binding = self.0.get_mut(*role);
                let pending = binding.needs_upload();
                binding.clear_upload();
                pending
            })
            .collect()
    }
}
