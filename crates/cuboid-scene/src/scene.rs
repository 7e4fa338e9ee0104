//! The editable object list

use crate::object::{Mesh, ObjectFlags, Pose, SceneObject};
use crate::raycast::{self, HitResult, Ray, RaycastFilter};
use crate::transform::object_center_position;
use cuboid_core::{Color, CuboidError, ObjectId, Result, Vector3};

/// Options for [`Scene::new_cube`]; unset fields come from the cube template
#[derive(Clone, Debug, Default)]
pub struct CubeOptions {
    pub name: Option<String>,
    pub offset: Option<Vector3>,
    pub scale: Option<Vector3>,
    pub rotation: Option<Vector3>,
    pub color: Option<Color>,
    pub flags: ObjectFlags,
}

impl CubeOptions {
    pub const TEMPLATE_NAME: &'static str = "Cube";
    pub const TEMPLATE_OFFSET: Vector3 = Vector3::new(0.0, 0.0, -250.0);
    pub const TEMPLATE_SCALE: Vector3 = Vector3::new(75.0, 75.0, 75.0);

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Non-persistent helper that rays pass through and lighting ignores
    pub fn marker(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            flags: ObjectFlags {
                dont_save: true,
                ignore_raycast: true,
                ignore_lighting: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn build(self) -> SceneObject {
        let pose = Pose::new(
            self.offset.unwrap_or(Self::TEMPLATE_OFFSET),
            self.scale.unwrap_or(Self::TEMPLATE_SCALE),
            self.rotation.unwrap_or(Vector3::ZERO),
        );
        SceneObject::new(
            self.name.unwrap_or_else(|| Self::TEMPLATE_NAME.to_string()),
            Mesh::cube(),
            pose,
        )
        .with_color(self.color.unwrap_or(Color::WHITE))
        .with_flags(self.flags)
    }
}

/// A point light resolved to world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPointLight {
    pub position: Vector3,
    pub radius: f32,
    pub color: Color,
    pub brightness: f32,
}

/// Ordered collection of scene objects
#[derive(Debug, Default)]
pub struct Scene {
    pub name: String,
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id();
        tracing::debug!(object = %id, name = %object.name, "added object");
        self.objects.push(object);
        id
    }

    pub fn new_cube(&mut self, options: CubeOptions) -> ObjectId {
        self.add(options.build())
    }

    /// Copy an object under a fresh id and append it
    pub fn duplicate(&mut self, id: ObjectId) -> Result<ObjectId> {
        let copy = self.get(id).ok_or(CuboidError::ObjectNotFound(id))?.duplicate();
        Ok(self.add(copy))
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        Some(self.objects.remove(index))
    }

    /// Remove every listed object; returns how many were removed
    pub fn delete_objects(&mut self, ids: &[ObjectId]) -> usize {
        self.retain_counted(|o| !ids.contains(&o.id()))
    }

    pub fn delete_by_name(&mut self, name: &str) -> usize {
        self.retain_counted(|o| o.name != name)
    }

    pub fn delete_by_internal_name(&mut self, name: &str) -> usize {
        self.retain_counted(|o| o.internal_name.as_deref() != Some(name))
    }

    fn retain_counted(&mut self, keep: impl Fn(&SceneObject) -> bool) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| keep(o));
        let removed = before - self.objects.len();
        if removed > 0 {
            tracing::debug!(removed, "deleted objects");
        }
        removed
    }

    pub fn objects_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SceneObject> {
        self.objects.iter().filter(move |o| o.name == name)
    }

    pub fn objects_by_internal_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a SceneObject> {
        self.objects
            .iter()
            .filter(move |o| o.internal_name.as_deref() == Some(name))
    }

    pub fn first_by_name_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// Objects that belong in a saved scene
    pub fn persistent_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| !o.flags.dont_save)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Nearest hit along `direction` from `origin` within `max_distance`
    pub fn raycast(
        &self,
        origin: Vector3,
        direction: Vector3,
        max_distance: f32,
        filter: &RaycastFilter,
    ) -> Option<HitResult> {
        raycast::raycast(&self.objects, &Ray::new(origin, direction, max_distance), filter)
    }

    /// World-space point lights, in object order
    pub fn point_lights(&self) -> Vec<WorldPointLight> {
        self.objects
            .iter()
            .filter_map(|object| {
                object.light.map(|light| WorldPointLight {
                    position: object_center_position(object),
                    radius: light.radius,
                    color: light.color,
                    brightness: light.brightness,
                })
            })
            .collect()
    }
}
