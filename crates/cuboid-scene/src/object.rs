//! Scene objects: geometry, pose, flags and the attached world-vertex cache

use crate::transform;
use cuboid_core::{Color, CuboidError, ObjectId, Result, Vector3};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;

/// Local-space triangle geometry.
///
/// Vertices are a flat `x, y, z` list and indices a flat list of
/// counter-clockwise triangles. Both invariants are checked on construction,
/// so every index of a `Mesh` is in range.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<f32>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<f32>, indices: Vec<u32>) -> Result<Self> {
        if vertices.len() % 3 != 0 {
            return Err(CuboidError::InvalidGeometry(format!(
                "vertex list length {} is not a multiple of 3",
                vertices.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(CuboidError::InvalidGeometry(format!(
                "index list length {} is not a multiple of 3",
                indices.len()
            )));
        }
        let vertex_count = vertices.len() / 3;
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(CuboidError::InvalidGeometry(format!(
                "index {} out of range for {} vertices",
                bad, vertex_count
            )));
        }
        Ok(Self { vertices, indices })
    }

    /// Unit cube centered on the origin, 8 vertices and 12 triangles
    #[rustfmt::skip]
    pub fn cube() -> Self {
        Self {
            vertices: vec![
                0.5, -0.5, 0.5,
                0.5, -0.5, -0.5,
                -0.5, -0.5, -0.5,
                -0.5, -0.5, 0.5,
                0.5, 0.5, 0.5,
                0.5, 0.5, -0.5,
                -0.5, 0.5, -0.5,
                -0.5, 0.5, 0.5,
            ],
            indices: vec![
                0, 1, 5,  0, 5, 4, // back
                0, 7, 3,  0, 4, 7, // right
                0, 3, 2,  0, 2, 1, // bottom
                4, 6, 7,  4, 5, 6, // top
                3, 7, 6,  3, 6, 2, // front
                2, 5, 1,  2, 6, 5, // left
            ],
        }
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Local-space vertex positions
    pub fn positions(&self) -> impl Iterator<Item = Vector3> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|v| Vector3::new(v[0], v[1], v[2]))
    }

    /// Triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::cube()
    }
}

/// Placement of an object in the world
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub offset: Vector3,
    pub scale: Vector3,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vector3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            offset: Vector3::ZERO,
            scale: Vector3::ONE,
            rotation: Vector3::ZERO,
        }
    }
}

impl Pose {
    pub fn new(offset: Vector3, scale: Vector3, rotation: Vector3) -> Self {
        Self {
            offset,
            scale,
            rotation,
        }
    }
}

/// Per-object behavior switches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectFlags {
    pub ignore_raycast: bool,
    pub ignore_lighting: bool,
    pub dont_save: bool,
    pub dont_cast_shadow: bool,
    pub hidden_from_explorer: bool,
}

/// Point light carried by an object, emitted from the object's center
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointLightDef {
    pub radius: f32,
    pub color: Color,
    pub brightness: f32,
}

/// An object in the scene.
///
/// Pose and mesh are only reachable through setters so that every change
/// clears the cached world-space vertices.
#[derive(Clone, Debug)]
pub struct SceneObject {
    id: ObjectId,
    pub name: String,
    pub internal_name: Option<String>,
    pub color: Color,
    pub texture_id: Option<u32>,
    pub flags: ObjectFlags,
    pub light: Option<PointLightDef>,
    mesh: Mesh,
    pose: Pose,
    world_vertices: OnceCell<Vec<Vector3>>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, mesh: Mesh, pose: Pose) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            internal_name: None,
            color: Color::WHITE,
            texture_id: None,
            flags: ObjectFlags::default(),
            light: None,
            mesh,
            pose,
            world_vertices: OnceCell::new(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_light(mut self, light: PointLightDef) -> Self {
        self.light = Some(light);
        self
    }

    pub fn with_internal_name(mut self, name: impl Into<String>) -> Self {
        self.internal_name = Some(name.into());
        self
    }

    pub fn with_texture(mut self, texture_id: u32) -> Self {
        self.texture_id = Some(texture_id);
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Copy of this object under a fresh id
    pub fn duplicate(&self) -> Self {
        Self {
            id: ObjectId::new(),
            ..self.clone()
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
        self.invalidate();
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.invalidate();
    }

    pub fn set_offset(&mut self, offset: Vector3) {
        self.set_pose(Pose { offset, ..self.pose });
    }

    pub fn set_scale(&mut self, scale: Vector3) {
        self.set_pose(Pose { scale, ..self.pose });
    }

    pub fn set_rotation(&mut self, rotation: Vector3) {
        self.set_pose(Pose { rotation, ..self.pose });
    }

    /// World-space vertices, computed on first use after a pose or mesh change
    pub fn world_vertices(&self) -> &[Vector3] {
        self.world_vertices.get_or_init(|| {
            tracing::debug!(object = %self.id, name = %self.name, "rebuilding world vertices");
            transform::vertices_to_world_vertices(self)
        })
    }

    pub fn has_cached_world_vertices(&self) -> bool {
        self.world_vertices.get().is_some()
    }

    fn invalidate(&mut self) {
        self.world_vertices.take();
    }
}
