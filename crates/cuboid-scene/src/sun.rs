//! The sun backdrop object

use crate::camera::CameraState;
use crate::object::{Mesh, ObjectFlags, Pose, SceneObject};
use crate::settings::WorldSettings;
use cuboid_core::{Color, Matrix4, Vector3};

const SUN_SCALE: Vector3 = Vector3::new(2000.0, 2000.0, 25.0);
const SUN_COLOR: Color = Color::new(0.9, 0.9, 0.9, 1.0);
const SUN_TEXTURE: u32 = 6;
/// Keeps the sun just inside the far plane
const FAR_PLANE_INSET: f32 = 50.0;

/// A flat slab facing along the light direction, parked near the far plane
/// on the side the light comes from. Rebuilt every frame; never saved.
pub fn sun_object(settings: &WorldSettings, camera: &CameraState) -> SceneObject {
    let rotation =
        Matrix4::look_at(Vector3::ZERO, settings.light_direction, Vector3::UP).to_euler_angles();
    if settings.light_direction.cross(&Vector3::UP).magnitude() < 1e-6 {
        tracing::warn!(
            light = ?settings.light_direction,
            "light direction is parallel to up, sun orientation is undefined"
        );
    }

    let offset = rotation.look_vector() * (settings.far_plane - FAR_PLANE_INSET) + camera.offset;

    SceneObject::new("Sun", Mesh::cube(), Pose::new(offset, SUN_SCALE, rotation))
        .with_color(SUN_COLOR)
        .with_texture(SUN_TEXTURE)
        .with_flags(ObjectFlags {
            dont_save: true,
            ignore_lighting: true,
            dont_cast_shadow: true,
            ignore_raycast: true,
            hidden_from_explorer: false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_sits_opposite_the_light() {
        let settings = WorldSettings::default();
        let sun = sun_object(&settings, &CameraState::default());
        let offset = sun.pose().offset;
        assert!((offset - Vector3::new(-7450.0, 0.0, 0.0)).magnitude() < 1e-2);
        assert_eq!(sun.pose().scale, SUN_SCALE);
        assert_eq!(sun.texture_id, Some(6));
        assert!(sun.flags.dont_save && sun.flags.ignore_raycast);
    }

    #[test]
    fn test_sun_follows_camera() {
        let settings = WorldSettings::default();
        let camera = CameraState::new(Vector3::new(10.0, 20.0, 30.0), Vector3::new(0.5, 0.1, 0.0));
        let sun = sun_object(&settings, &camera);
        let expected = Vector3::new(-7450.0 + 10.0, 20.0, 30.0);
        assert!((sun.pose().offset - expected).magnitude() < 1e-2);
    }

    #[test]
    fn test_sun_slab_faces_light() {
        let settings = WorldSettings::default();
        let sun = sun_object(&settings, &CameraState::default());
        // The thin local Z axis ends up along the light direction
        let size = crate::transform::Bounds::of_object(&sun).size();
        assert!((size.x - 25.0).abs() < 1e-2);
        assert!((size.y - 2000.0).abs() < 1e-2);
    }
}
