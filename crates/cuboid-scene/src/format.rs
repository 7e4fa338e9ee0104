//! Scene file format definitions

use crate::object::{Mesh, ObjectFlags, PointLightDef, Pose, SceneObject};
use cuboid_core::{Color, Result, Vector3};
use serde::{Deserialize, Serialize};

/// Root structure of a scene TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub scene: SceneMetadata,
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
}

/// Scene metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_color() -> [f32; 4] {
    Color::WHITE.to_array()
}

/// Definition of one object in a scene file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_name: Option<String>,
    #[serde(default)]
    pub offset: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    /// Euler angles in radians
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_color")]
    pub color: [f32; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_id: Option<u32>,
    #[serde(default)]
    pub flags: ObjectFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<LightDef>,
    /// Explicit triangle geometry; the unit cube when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometryDef>,
}

/// Point light attached to an object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightDef {
    pub radius: f32,
    #[serde(default = "default_color")]
    pub color: [f32; 4],
    #[serde(default = "default_brightness")]
    pub brightness: f32,
}

fn default_brightness() -> f32 {
    1.0
}

/// Flat vertex and triangle index lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryDef {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl SceneFile {
    /// Create an empty scene file
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: SceneMetadata {
                name: name.into(),
                version: default_version(),
                description: None,
            },
            objects: Vec::new(),
        }
    }
}

impl ObjectDef {
    /// Capture an object's persistent state
    pub fn from_object(object: &SceneObject) -> Self {
        let pose = object.pose();
        let mesh = object.mesh();
        Self {
            name: object.name.clone(),
            internal_name: object.internal_name.clone(),
            offset: pose.offset.to_array(),
            scale: pose.scale.to_array(),
            rotation: pose.rotation.to_array(),
            color: object.color.to_array(),
            texture_id: object.texture_id,
            flags: object.flags,
            light: object.light.map(|light| LightDef {
                radius: light.radius,
                color: light.color.to_array(),
                brightness: light.brightness,
            }),
            geometry: (*mesh != Mesh::cube()).then(|| GeometryDef {
                vertices: mesh.vertices().to_vec(),
                indices: mesh.indices().to_vec(),
            }),
        }
    }

    /// Build a scene object, validating any explicit geometry
    pub fn to_object(&self) -> Result<SceneObject> {
        let mesh = match &self.geometry {
            Some(geometry) => Mesh::new(geometry.vertices.clone(), geometry.indices.clone())?,
            None => Mesh::cube(),
        };
        let pose = Pose::new(
            Vector3::from_array(self.offset),
            Vector3::from_array(self.scale),
            Vector3::from_array(self.rotation),
        );

        let mut object = SceneObject::new(self.name.clone(), mesh, pose)
            .with_color(Color::from_array(self.color))
            .with_flags(self.flags);
        object.internal_name = self.internal_name.clone();
        object.texture_id = self.texture_id;
        object.light = self.light.as_ref().map(|light| PointLightDef {
            radius: light.radius,
            color: Color::from_array(light.color),
            brightness: light.brightness,
        });
        Ok(object)
    }
}
