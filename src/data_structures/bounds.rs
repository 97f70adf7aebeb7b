//! Axis-aligned bounding boxes.
//!
//! Bounds are never stored on scene nodes; they are derived from geometry and
//! the current world matrix whenever they are needed, so a changed transform
//! is always reflected.

use cgmath::Transform;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Aabb {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Returns `None` for an empty point set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [f32; 3]>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let mut bounds = Self::new(first, first);
        points.for_each(|p| bounds.grow_point(*p));
        Some(bounds)
    }

    fn grow_point(&mut self, point: [f32; 3]) {
        self.min = [
            self.min[0].min(point[0]),
            self.min[1].min(point[1]),
            self.min[2].min(point[2]),
        ];
        self.max = [
            self.max[0].max(point[0]),
            self.max[1].max(point[1]),
            self.max[2].max(point[2]),
        ];
    }

    pub fn merge(&self, other: &Aabb) -> Aabb {
        let mut merged = *self;
        merged.grow_point(other.min);
        merged.grow_point(other.max);
        merged
    }

    pub fn corners(&self) -> [[f32; 3]; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            [lo[0], lo[1], lo[2]],
            [hi[0], lo[1], lo[2]],
            [lo[0], hi[1], lo[2]],
            [hi[0], hi[1], lo[2]],
            [lo[0], lo[1], hi[2]],
            [hi[0], lo[1], hi[2]],
            [lo[0], hi[1], hi[2]],
            [hi[0], hi[1], hi[2]],
        ]
    }

    /// Bounds of the eight transformed corners.
    pub fn transform(&self, matrix: &cgmath::Matrix4<f32>) -> Aabb {
        let corners = self.corners().map(|c| {
            let p: [f32; 3] = matrix
                .transform_point(cgmath::Point3::new(c[0], c[1], c[2]))
                .into();
            p
        });
        let mut bounds = Self::new(corners[0], corners[0]);
        corners[1..].iter().for_each(|c| bounds.grow_point(*c));
        bounds
    }

    pub fn extent(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    pub fn volume(&self) -> f32 {
        let [x, y, z] = self.extent();
        x * y * z
    }

    pub fn max_extent(&self) -> f32 {
        let [x, y, z] = self.extent();
        x.max(y).max(z)
    }
}
