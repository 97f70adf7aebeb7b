//! Role classification.
//!
//! Assigns mesh nodes of an arbitrary scene graph to the four roles with an
//! ordered rule table. Per node the first matching rule wins:
//!
//! 1. exact alias (node name or source mesh name),
//! 2. lower-cased keyword substring,
//! 3. geometric heuristics, for nodes still unassigned after 1 and 2.
//!
//! A group matched by rule 1 or 2 hands its role down to descendant meshes
//! that do not match a name rule themselves. Each geometric rule binds at most
//! one node and only fires for a role that has no nodes yet. The traversal is
//! the graph's stable depth-first order, so the outcome is a pure function of
//! the graph and the settings.

use log::debug;

use crate::{
    data_structures::{
        binding::Resolution,
        bounds::Aabb,
        role::{PartRole, PerRole},
        scene_graph::{AssetNode, NodeId, SceneGraph},
    },
    settings::{ClassifierSettings, GeometricThresholds},
};

/// Keyword matches are tried from the most specific part to the least.
const KEYWORD_PRIORITY: [PartRole; 4] = [
    PartRole::Wheel,
    PartRole::Zipper,
    PartRole::Handle,
    PartRole::Body,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GeometricRule {
    LargestVolume,
    HighAndWide,
    Low,
    Small,
}

const GEOMETRIC_RULES: [(PartRole, GeometricRule); 4] = [
    (PartRole::Body, GeometricRule::LargestVolume),
    (PartRole::Handle, GeometricRule::HighAndWide),
    (PartRole::Wheel, GeometricRule::Low),
    (PartRole::Zipper, GeometricRule::Small),
];

/// Nodes found for one role.
#[derive(Clone, Debug, PartialEq)]
pub struct RoleAssignment {
    pub nodes: Vec<NodeId>,
    pub resolution: Resolution,
}

impl Default for RoleAssignment {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            resolution: Resolution::Unresolved,
        }
    }
}

impl RoleAssignment {
    fn push(&mut self, id: NodeId, resolution: Resolution) {
        if self.nodes.is_empty() || rank(resolution) < rank(self.resolution) {
            self.resolution = resolution;
        }
        self.nodes.push(id);
    }

    pub fn is_resolved(&self) -> bool {
        !self.nodes.is_empty()
    }
}

fn rank(resolution: Resolution) -> u8 {
    match resolution {
        Resolution::Alias => 0,
        Resolution::Keyword => 1,
        Resolution::Geometric => 2,
        Resolution::Procedural => 3,
        Resolution::Unresolved => 4,
    }
}

/// Outcome of a classification run: one assignment per role.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    assignments: PerRole<RoleAssignment>,
}

impl Classification {
    pub fn get(&self, role: PartRole) -> &RoleAssignment {
        self.assignments.get(role)
    }

    pub fn resolved_count(&self) -> usize {
        PartRole::ALL
            .into_iter()
            .filter(|role| self.get(*role).is_resolved())
            .count()
    }

    pub fn role_of(&self, id: NodeId) -> Option<PartRole> {
        PartRole::ALL
            .into_iter()
            .find(|role| self.get(*role).nodes.contains(&id))
    }
}

#[derive(Clone, Debug)]
pub struct RoleClassifier {
    settings: ClassifierSettings,
}

impl RoleClassifier {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Classify every mesh node of `graph`. Never fails; an empty or
    /// unrecognisable graph yields four unresolved roles.
    pub fn classify(&self, graph: &SceneGraph) -> Classification {
        let mut classification = Classification::default();
        let mut unassigned = Vec::new();

        // Passes 1 and 2, with roles inherited from matched groups.
        let mut stack: Vec<(NodeId, Option<(PartRole, Resolution)>)> =
            graph.roots().iter().rev().map(|id| (*id, None)).collect();
        while let Some((id, inherited)) = stack.pop() {
            let Some(node) = graph.node(id) else {
                continue;
            };
            let own = self.match_name(node);
            let effective = own.or(inherited);
            if node.is_renderable() {
                match effective {
                    Some((role, resolution)) => {
                        debug!("{:?} {:?} -> {} ({:?})", id, node.name, role, resolution);
                        classification
                            .assignments
                            .get_mut(role)
                            .push(id, resolution);
                    }
                    None => unassigned.push(id),
                }
            }
            stack.extend(
                node.get_children()
                    .iter()
                    .rev()
                    .map(|child| (*child, effective)),
            );
        }

        self.classify_geometry(graph, &mut classification, unassigned);
        classification
    }

    fn match_name(&self, node: &AssetNode) -> Option<(PartRole, Resolution)> {
        self.match_alias(node)
            .map(|role| (role, Resolution::Alias))
            .or_else(|| self.match_keyword(node).map(|role| (role, Resolution::Keyword)))
    }

    /// The node's own name is tried against every role before its mesh name.
    fn match_alias(&self, node: &AssetNode) -> Option<PartRole> {
        node.names().find_map(|name| {
            PartRole::ALL.into_iter().find(|role| {
                self.settings
                    .aliases
                    .get(*role)
                    .iter()
                    .any(|alias| alias == name)
            })
        })
    }

    fn match_keyword(&self, node: &AssetNode) -> Option<PartRole> {
        node.names().map(str::to_lowercase).find_map(|name| {
            KEYWORD_PRIORITY.into_iter().find(|role| {
                self.settings
                    .keywords
                    .get(*role)
                    .iter()
                    .filter(|keyword| !keyword.is_empty())
                    .any(|keyword| name.contains(&keyword.to_lowercase()))
            })
        })
    }

    fn classify_geometry(
        &self,
        graph: &SceneGraph,
        classification: &mut Classification,
        unassigned: Vec<NodeId>,
    ) {
        let Some(scene) = graph.bounds() else {
            return;
        };
        let mut candidates: Vec<(NodeId, Aabb)> = unassigned
            .into_iter()
            .filter_map(|id| graph.world_bounds(id).map(|bounds| (id, bounds)))
            .collect();

        for (role, rule) in GEOMETRIC_RULES {
            if classification.get(role).is_resolved() {
                continue;
            }
            let picked = select(rule, &candidates, &scene, &self.settings.thresholds);
            if let Some(index) = picked {
                let (id, _) = candidates.remove(index);
                debug!("{:?} -> {} (geometric {:?})", id, role, rule);
                classification
                    .assignments
                    .get_mut(role)
                    .push(id, Resolution::Geometric);
            }
        }
    }
}

impl Default for RoleClassifier {
    fn default() -> Self {
        Self::new(ClassifierSettings::default())
    }
}

/// Index of the candidate `rule` picks, if any.
fn select(
    rule: GeometricRule,
    candidates: &[(NodeId, Aabb)],
    scene: &Aabb,
    thresholds: &GeometricThresholds,
) -> Option<usize> {
    let height_fraction = |bounds: &Aabb| {
        let scene_height = scene.max[1] - scene.min[1];
        if scene_height <= f32::EPSILON {
            0.5
        } else {
            (bounds.center()[1] - scene.min[1]) / scene_height
        }
    };

    match rule {
        GeometricRule::LargestVolume => {
            let mut best: Option<(usize, f32)> = None;
            for (index, (_, bounds)) in candidates.iter().enumerate() {
                let volume = bounds.volume();
                // Strictly greater keeps the earliest node on ties.
                if volume > 0.0 && best.is_none_or(|(_, best_volume)| volume > best_volume) {
                    best = Some((index, volume));
                }
            }
            best.map(|(index, _)| index)
        }
        GeometricRule::HighAndWide => candidates.iter().position(|(_, bounds)| {
            let [x, y, z] = bounds.extent();
            height_fraction(bounds) > thresholds.high_fraction
                && x.max(z) > y * thresholds.handle_dominance
        }),
        GeometricRule::Low => candidates
            .iter()
            .position(|(_, bounds)| height_fraction(bounds) < thresholds.low_fraction),
        GeometricRule::Small => {
            let limit = scene.max_extent() * thresholds.small_fraction;
            candidates
                .iter()
                .position(|(_, bounds)| bounds.extent().iter().all(|axis| *axis < limit))
        }
    }
}
