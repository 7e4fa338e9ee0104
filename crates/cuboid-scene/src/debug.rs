//! Debug markers
//!
//! Named helper cubes for visualising rays, vectors and boxes in the scene.
//! Calling a draw function again with the same name moves the existing
//! marker instead of adding another. Markers are never saved, never hit by
//! rays and ignore lighting.

use crate::object::{Mesh, Pose, SceneObject};
use crate::scene::{CubeOptions, Scene};
use cuboid_core::{Color, Matrix4, ObjectId, Vector3};

const DEFAULT_THICKNESS: f32 = 2.5;

/// Stretch a marker from `origin` along `direction` for `distance` units
pub fn draw_ray(
    scene: &mut Scene,
    name: &str,
    origin: Vector3,
    direction: Vector3,
    distance: f32,
    color: Option<Color>,
    thickness: Option<f32>,
) -> ObjectId {
    let end = direction * distance + origin;
    let rotation = Matrix4::look_at(origin, end, Vector3::UP).to_euler_angles();
    let thickness = thickness.unwrap_or(DEFAULT_THICKNESS);

    upsert_marker(scene, name, color, |marker| {
        marker.set_pose(Pose::new(
            (end - origin) * 0.5 + origin,
            Vector3::new(thickness, thickness, distance),
            rotation,
        ));
    })
}

/// Marker spanning `origin` to `origin + vector`; `origin` defaults to zero
pub fn draw_vector(
    scene: &mut Scene,
    name: &str,
    vector: Vector3,
    origin: Option<Vector3>,
    color: Option<Color>,
    thickness: Option<f32>,
) -> ObjectId {
    draw_ray(
        scene,
        name,
        origin.unwrap_or(Vector3::ZERO),
        vector.unit(),
        vector.magnitude(),
        color,
        thickness,
    )
}

pub fn draw_cube(
    scene: &mut Scene,
    name: &str,
    position: Vector3,
    scale: Vector3,
    rotation: Option<Vector3>,
    color: Option<Color>,
) -> ObjectId {
    upsert_marker(scene, name, color, |marker| {
        marker.set_pose(Pose::new(
            position,
            scale,
            rotation.unwrap_or(Vector3::ZERO),
        ));
    })
}

/// Marker with arbitrary geometry at unit scale
pub fn draw_object(scene: &mut Scene, name: &str, mesh: Mesh, color: Option<Color>) -> ObjectId {
    upsert_marker(scene, name, color, |marker| {
        marker.set_pose(Pose::default());
        marker.set_mesh(mesh);
    })
}

fn upsert_marker(
    scene: &mut Scene,
    name: &str,
    color: Option<Color>,
    update: impl FnOnce(&mut SceneObject),
) -> ObjectId {
    if let Some(marker) = scene.first_by_name_mut(name) {
        update(marker);
        return marker.id();
    }

    let mut marker = CubeOptions {
        color,
        scale: Some(Vector3::new(DEFAULT_THICKNESS, DEFAULT_THICKNESS, DEFAULT_THICKNESS)),
        ..CubeOptions::marker(name)
    }
    .build();
    update(&mut marker);
    scene.add(marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Bounds;

    fn assert_vec_near(a: Vector3, b: Vector3) {
        assert!((a - b).magnitude() < 1e-3, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_draw_ray_spans_origin_to_end() {
        let mut scene = Scene::new("debug");
        let id = draw_ray(
            &mut scene,
            "ray",
            Vector3::ZERO,
            Vector3::new(1.0, 0.0, 0.0),
            10.0,
            None,
            Some(1.0),
        );
        let bounds = Bounds::of_object(scene.get(id).unwrap());
        assert_vec_near(bounds.min, Vector3::new(0.0, -0.5, -0.5));
        assert_vec_near(bounds.max, Vector3::new(10.0, 0.5, 0.5));
    }

    #[test]
    fn test_redraw_moves_existing_marker() {
        let mut scene = Scene::new("debug");
        let first = draw_cube(&mut scene, "box", Vector3::ZERO, Vector3::ONE, None, None);
        let second = draw_cube(
            &mut scene,
            "box",
            Vector3::new(5.0, 0.0, 0.0),
            Vector3::ONE,
            None,
            Some(Color::BLACK),
        );
        assert_eq!(first, second);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(first).unwrap().pose().offset, Vector3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_markers_are_not_saved_or_hit() {
        let mut scene = Scene::new("debug");
        let id = draw_vector(
            &mut scene,
            "axis",
            Vector3::new(0.0, 25.0, 0.0),
            None,
            Some(Color::new(0.0, 1.0, 0.0, 1.0)),
            None,
        );
        let marker = scene.get(id).unwrap();
        assert!(marker.flags.dont_save && marker.flags.ignore_raycast && marker.flags.ignore_lighting);
        assert_eq!(marker.color, Color::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(scene.persistent_objects().count(), 0);
    }

    #[test]
    fn test_draw_vector_length_and_midpoint() {
        let mut scene = Scene::new("debug");
        let origin = Vector3::new(1.0, 1.0, 1.0);
        let id = draw_vector(
            &mut scene,
            "v",
            Vector3::new(0.0, 0.0, 8.0),
            Some(origin),
            None,
            None,
        );
        let marker = scene.get(id).unwrap();
        assert_eq!(marker.pose().scale.z, 8.0);
        assert_vec_near(marker.pose().offset, Vector3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn test_draw_object_replaces_mesh() {
        let mut scene = Scene::new("debug");
        let mesh = Mesh::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], vec![0, 1, 2])
            .unwrap();
        let id = draw_object(&mut scene, "tri", mesh, None);
        let marker = scene.get(id).unwrap();
        assert_eq!(marker.mesh().triangle_count(), 1);
        assert_eq!(marker.pose().scale, Vector3::ONE);
    }
}
