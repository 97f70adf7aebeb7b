//! CPU-side triangle geometry.
//!
//! Geometry is immutable once built: decoded from an asset or generated
//! procedurally. Node transforms never touch vertex data.

use std::f32::consts::TAU;

use crate::data_structures::bounds::Aabb;

/// Indexed triangle list with per-vertex normals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Bounds in the geometry's own space, `None` without vertices.
    pub fn local_bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        if self.indices.is_empty() {
            self.positions.len() / 3
        } else {
            self.indices.len() / 3
        }
    }

    /// Box centered at the origin with one quad per face.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            // Front face (z+)
            ([0.0, 0.0, 1.0], [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]]),
            // Back face (z-)
            ([0.0, 0.0, -1.0], [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]]),
            // Top face (y+)
            ([0.0, 1.0, 0.0], [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]]),
            // Bottom face (y-)
            ([0.0, -1.0, 0.0], [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]]),
            // Right face (x+)
            ([1.0, 0.0, 0.0], [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]]),
            // Left face (x-)
            ([-1.0, 0.0, 0.0], [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]]),
        ];

        let mut geometry = Geometry::default();
        for (normal, quad) in faces {
            let base = geometry.positions.len() as u32;
            geometry.positions.extend(quad);
            geometry.normals.extend([normal; 4]);
            geometry
                .indices
                .extend([base, base + 1, base + 2, base + 2, base + 3, base]);
        }
        geometry
    }

    /// Capped cylinder along the y axis, centered at the origin.
    ///
    /// `segments` is clamped to at least 3.
    pub fn cylinder(radius: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let half = height * 0.5;
        let mut geometry = Geometry::default();

        // Side: one ring at the bottom, one at the top, radial normals.
        for ring_y in [-half, half] {
            for i in 0..=segments {
                let angle = i as f32 / segments as f32 * TAU;
                let (sin, cos) = angle.sin_cos();
                geometry.positions.push([radius * sin, ring_y, radius * cos]);
                geometry.normals.push([sin, 0.0, cos]);
            }
        }
        let ring = segments + 1;
        for i in 0..segments {
            let (a, b) = (i, i + 1);
            let (c, d) = (i + ring, i + 1 + ring);
            geometry.indices.extend([a, b, d, d, c, a]);
        }

        // Caps: a center vertex fanned out to its own ring.
        for (cap_y, normal_y) in [(half, 1.0), (-half, -1.0)] {
            let center = geometry.positions.len() as u32;
            geometry.positions.push([0.0, cap_y, 0.0]);
            geometry.normals.push([0.0, normal_y, 0.0]);
            for i in 0..=segments {
                let angle = i as f32 / segments as f32 * TAU;
                let (sin, cos) = angle.sin_cos();
                geometry.positions.push([radius * sin, cap_y, radius * cos]);
                geometry.normals.push([0.0, normal_y, 0.0]);
            }
            for i in 0..segments {
                let (a, b) = (center + 1 + i, center + 2 + i);
                if normal_y > 0.0 {
                    geometry.indices.extend([center, a, b]);
                } else {
                    geometry.indices.extend([center, b, a]);
                }
            }
        }
        geometry
    }
}
