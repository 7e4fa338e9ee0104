//! Ray picking against scene geometry
//!
//! Every candidate triangle is tested against its plane first and then with
//! three edge-side tests. All hits are collected and the nearest one wins,
//! so the result only depends on scene state, never on traversal luck.

use crate::camera::{screen_to_camera_direction, CameraState};
use crate::object::SceneObject;
use crate::settings::WorldSettings;
use crate::transform::Bounds;
use cuboid_core::{ObjectId, Vector3};

/// Rays closer than this to parallel with a triangle's plane never hit it
const PARALLEL_EPSILON: f32 = 1e-4;

/// A ray with a maximum reach
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    /// Expected to be unit length
    pub direction: Vector3,
    pub max_distance: f32,
}

impl Ray {
    pub fn new(origin: Vector3, direction: Vector3, max_distance: f32) -> Self {
        Self {
            origin,
            direction,
            max_distance,
        }
    }

    /// Pointer ray from the camera through a viewport pixel
    pub fn from_screen(
        screen: [f32; 2],
        settings: &WorldSettings,
        camera: &CameraState,
        max_distance: f32,
    ) -> Self {
        Self {
            origin: camera.offset,
            direction: screen_to_camera_direction(screen, settings, camera),
            max_distance,
        }
    }

    pub fn at(&self, distance: f32) -> Vector3 {
        self.origin + self.direction * distance
    }
}

/// Restricts which objects a ray may hit
#[derive(Clone, Copy, Debug, Default)]
pub struct RaycastFilter<'a> {
    /// When present, only these objects are tested
    pub whitelist: Option<&'a [ObjectId]>,
    /// Never tested, even if directly in the ray's path
    pub blacklist: Option<&'a [ObjectId]>,
}

impl<'a> RaycastFilter<'a> {
    pub fn only(whitelist: &'a [ObjectId]) -> Self {
        Self {
            whitelist: Some(whitelist),
            blacklist: None,
        }
    }

    pub fn excluding(blacklist: &'a [ObjectId]) -> Self {
        Self {
            whitelist: None,
            blacklist: Some(blacklist),
        }
    }

    pub fn allows(&self, object: &SceneObject) -> bool {
        if object.flags.ignore_raycast {
            return false;
        }
        if let Some(whitelist) = self.whitelist {
            if !whitelist.contains(&object.id()) {
                return false;
            }
        }
        if let Some(blacklist) = self.blacklist {
            if blacklist.contains(&object.id()) {
                return false;
            }
        }
        true
    }
}

/// Nearest intersection of a ray with the scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitResult {
    pub position: Vector3,
    /// Unit normal of the hit triangle, by its winding
    pub normal: Vector3,
    pub distance: f32,
    pub object: ObjectId,
}

/// Cast `ray` against `objects` and return the nearest hit, if any
pub fn raycast(objects: &[SceneObject], ray: &Ray, filter: &RaycastFilter) -> Option<HitResult> {
    let mut hits = Vec::new();

    for object in objects.iter().filter(|o| filter.allows(o)) {
        let vertices = object.world_vertices();

        if out_of_reach(object, ray) {
            continue;
        }

        for [a, b, c] in object.mesh().triangles() {
            if let Some((position, normal)) =
                intersect_triangle(ray, vertices[a], vertices[b], vertices[c])
            {
                hits.push(HitResult {
                    position,
                    normal,
                    distance: (position - ray.origin).magnitude(),
                    object: object.id(),
                });
            }
        }
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    let nearest = hits.into_iter().next();

    tracing::trace!(
        origin = ?ray.origin,
        direction = ?ray.direction,
        hit = ?nearest.map(|h| h.object),
        "raycast"
    );
    nearest
}

/// Coarse rejection: both bounds corners further than twice the reach,
/// padded by the object's summed scale
fn out_of_reach(object: &SceneObject, ray: &Ray) -> bool {
    let bounds = Bounds::of_object(object);
    let limit = ray.max_distance * 2.0 + object.pose().scale.component_sum();
    (ray.origin - bounds.min).magnitude() > limit && (ray.origin - bounds.max).magnitude() > limit
}

/// Hit point and unit normal where the ray crosses triangle `abc`
fn intersect_triangle(ray: &Ray, a: Vector3, b: Vector3, c: Vector3) -> Option<(Vector3, Vector3)> {
    let normal = (b - a).cross(&(c - a)).unit();
    let facing = normal.dot(&ray.direction);
    if facing.abs() < PARALLEL_EPSILON {
        return None;
    }

    let distance = normal.dot(&(a - ray.origin)) / facing;
    if distance < 0.0 {
        return None;
    }

    let hit = ray.at(distance);
    if (hit - ray.origin).magnitude() > ray.max_distance {
        return None;
    }

    let inside = [(a, b), (b, c), (c, a)]
        .iter()
        .all(|&(from, to)| (to - from).cross(&(hit - from)).unit().dot(&normal) > 0.0);

    inside.then_some((hit, normal))
}
