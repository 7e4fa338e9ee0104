//! Object transform pipeline
//!
//! Pose -> world matrix -> world-space vertices -> axis-aligned bounds.
//! The world matrix is composed as `T(offset) * Rx * Ry * Rz * S(scale)`, so
//! a local vertex is scaled first, rotated about Z, Y and X in that order and
//! translated last.

use crate::object::{Pose, SceneObject};
use cuboid_core::{Matrix4, Vector3};

/// Object-to-world matrix for a pose
pub fn world_matrix(pose: &Pose) -> Matrix4 {
    Matrix4::translation_vector(pose.offset)
        .multiply(&Matrix4::rotation_x(pose.rotation.x))
        .multiply(&Matrix4::rotation_y(pose.rotation.y))
        .multiply(&Matrix4::rotation_z(pose.rotation.z))
        .multiply(&Matrix4::scaling_vector(pose.scale))
}

/// Clip-space matrix for a pose under the given view-projection
pub fn render_matrix(view_projection: &Matrix4, pose: &Pose) -> Matrix4 {
    view_projection.multiply(&world_matrix(pose))
}

/// Every local vertex of the object's mesh moved into world space.
///
/// This always recomputes; [`SceneObject::world_vertices`] is the cached
/// entry point.
pub fn vertices_to_world_vertices(object: &SceneObject) -> Vec<Vector3> {
    let matrix = world_matrix(object.pose());
    object
        .mesh()
        .positions()
        .map(|v| matrix.transform_point(v))
        .collect()
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vector3,
    pub max: Vector3,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty slice
    pub fn from_points(points: &[Vector3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest.iter().fold((*first, *first), |(min, max), p| {
            (min.min_components(p), max.max_components(p))
        });
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// World bounds of an object; a vertex-less object collapses to its offset
    pub fn of_object(object: &SceneObject) -> Self {
        Self::from_points(object.world_vertices()).unwrap_or(Self {
            min: object.pose().offset,
            max: object.pose().offset,
        })
    }
}

pub fn object_min_position(object: &SceneObject) -> Vector3 {
    Bounds::of_object(object).min
}

pub fn object_max_position(object: &SceneObject) -> Vector3 {
    Bounds::of_object(object).max
}

/// Midpoint of the object's world bounds
pub fn object_center_position(object: &SceneObject) -> Vector3 {
    Bounds::of_object(object).center()
}
