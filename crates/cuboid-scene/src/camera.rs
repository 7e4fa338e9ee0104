//! Camera state and the matrices derived from it

use crate::settings::WorldSettings;
use cuboid_core::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// Camera position and Euler rotation for the current frame.
///
/// Owned by whatever drives the camera; the spatial code only reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraState {
    pub offset: Vector3,
    /// Radians; applied Y, then X, then Z
    pub rotation: Vector3,
}

impl CameraState {
    pub fn new(offset: Vector3, rotation: Vector3) -> Self {
        Self { offset, rotation }
    }

    /// Rotation only, composed `Ry * Rx * Rz`
    pub fn rotation_matrix(&self) -> Matrix4 {
        Matrix4::rotation_y(self.rotation.y)
            .multiply(&Matrix4::rotation_x(self.rotation.x))
            .multiply(&Matrix4::rotation_z(self.rotation.z))
    }

    /// Camera-to-world matrix
    pub fn world_matrix(&self) -> Matrix4 {
        Matrix4::translation_vector(self.offset).multiply(&self.rotation_matrix())
    }

    /// Direction the camera faces according to its pitch and yaw
    pub fn look_vector(&self) -> Vector3 {
        self.rotation.look_vector()
    }
}

/// World-to-camera matrix
pub fn camera_view_matrix(camera: &CameraState) -> Matrix4 {
    camera.world_matrix().inverse()
}

pub fn view_projection_matrix(settings: &WorldSettings, camera: &CameraState) -> Matrix4 {
    settings
        .projection_matrix()
        .multiply(&camera_view_matrix(camera))
}

/// World-space direction of the pointer ray through a pixel.
///
/// The pixel is remapped to `-0.5..0.5` around the viewport center with x
/// mirrored, scaled to the view pyramid at unit depth and rotated by the
/// camera. The result is negated so that it points away from the camera.
pub fn screen_to_camera_direction(
    screen: [f32; 2],
    settings: &WorldSettings,
    camera: &CameraState,
) -> Vector3 {
    let width = settings.width as f32;
    let height = settings.height as f32;
    let aspect = width / height;

    let relative = Vector3::new(
        (width - screen[0]) / width - 0.5,
        screen[1] / height - 0.5,
        1.0,
    );

    let world_height = 2.0 * (0.5 * settings.fov.to_radians()).tan();
    let mut units = relative * world_height;
    units.x *= aspect;
    units.z = 1.0;

    -camera.rotation_matrix().transform_point(units).unit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec_near(a: Vector3, b: Vector3) {
        assert!((a - b).magnitude() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let camera = CameraState::new(Vector3::new(10.0, -5.0, 3.0), Vector3::new(0.2, 1.1, -0.4));
        let view = camera_view_matrix(&camera);
        assert_vec_near(view.transform_point(camera.offset), Vector3::ZERO);
    }

    #[test]
    fn test_view_matrix_of_translated_camera() {
        let camera = CameraState::new(Vector3::new(0.0, 0.0, 100.0), Vector3::ZERO);
        let p = camera_view_matrix(&camera).transform_point(Vector3::ZERO);
        assert_vec_near(p, Vector3::new(0.0, 0.0, -100.0));
    }

    #[test]
    fn test_rotation_order_is_yxz() {
        let camera = CameraState::new(Vector3::ZERO, Vector3::new(FRAC_PI_2, FRAC_PI_2, 0.0));
        // Rx first: +Y -> +Z, then Ry: +Z -> +X
        let p = camera
            .rotation_matrix()
            .transform_point(Vector3::new(0.0, 1.0, 0.0));
        assert_vec_near(p, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_screen_center_looks_down_negative_z() {
        let settings = WorldSettings::default();
        let camera = CameraState::default();
        let dir = screen_to_camera_direction([250.0, 250.0], &settings, &camera);
        assert_vec_near(dir, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_screen_corner_direction() {
        let settings = WorldSettings::default();
        let camera = CameraState::default();
        // Top-left pixel, 90 degree fov: unit depth spans -1..1
        let dir = screen_to_camera_direction([0.0, 0.0], &settings, &camera);
        assert_vec_near(dir, -Vector3::new(1.0, -1.0, 1.0).unit());
    }

    #[test]
    fn test_screen_direction_follows_camera_yaw() {
        let settings = WorldSettings::default();
        let camera = CameraState::new(Vector3::ZERO, Vector3::new(0.0, FRAC_PI_2, 0.0));
        let dir = screen_to_camera_direction([250.0, 250.0], &settings, &camera);
        assert_vec_near(dir, Vector3::new(-1.0, 0.0, 0.0));
        assert_vec_near(dir, camera.look_vector());
    }

    #[test]
    fn test_view_projection_puts_forward_point_in_clip_range() {
        let settings = WorldSettings::default();
        let camera = CameraState::default();
        let ndc = view_projection_matrix(&settings, &camera)
            .project_point(Vector3::new(0.0, 0.0, -100.0));
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
