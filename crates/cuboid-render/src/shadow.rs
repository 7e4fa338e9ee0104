//! Cascaded shadow map fitting
//!
//! The camera's view depth is cut into cascades at the configured split
//! distances. For each cascade the sub-frustum is unprojected into world
//! space, seen from the directional light, and wrapped in an orthographic
//! box. The box's near side is pushed back by the z multiplier so that
//! casters between the light and the frustum still land in the map.

use cuboid_core::{Matrix4, Vector3};
use cuboid_scene::{camera_view_matrix, CameraState, WorldSettings};
use serde::Serialize;

/// World-space corners of the frustum described by `projection * view`.
///
/// Corner `i` comes from NDC `x = ±1, y = ±1, z ∈ {0, 1}` with
/// `i = x * 4 + y * 2 + z` (each bit set meaning the positive side), so
/// corner 0 is near bottom-left and corner 7 is far top-right.
pub fn frustum_corners_world_space(projection: &Matrix4, view: Option<&Matrix4>) -> [Vector3; 8] {
    let inverse = match view {
        Some(view) => projection.multiply(view).inverse(),
        None => projection.inverse(),
    };

    let mut corners = [Vector3::ZERO; 8];
    for x in 0..2 {
        for y in 0..2 {
            for z in 0..2 {
                let ndc = Vector3::new(2.0 * x as f32 - 1.0, 2.0 * y as f32 - 1.0, z as f32);
                corners[x * 4 + y * 2 + z] = inverse.project_point(ndc);
            }
        }
    }
    corners
}

/// `(near, far)` view distances of every cascade, nearest first
pub fn cascade_planes(settings: &WorldSettings) -> Vec<(f32, f32)> {
    let mut bounds = Vec::with_capacity(settings.cascade_count() + 1);
    bounds.push(settings.near_plane);
    bounds.extend_from_slice(&settings.shadow.cascade_splits);
    bounds.push(settings.far_plane);
    bounds.windows(2).map(|pair| (pair[0], pair[1])).collect()
}

/// View matrix of the directional light, placed at the world origin
pub fn light_view_matrix(settings: &WorldSettings) -> Matrix4 {
    let toward = (-settings.light_direction).unit();
    if toward.cross(&Vector3::UP).magnitude() < 1e-6 {
        tracing::warn!(
            light = ?settings.light_direction,
            "light direction is zero or parallel to up, shadow basis is degenerate"
        );
    }
    Matrix4::look_at(Vector3::ZERO, toward, Vector3::UP)
}

/// One fitted cascade
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CascadeFit {
    pub near: f32,
    pub far: f32,
    /// Light-space box after z extension and squaring
    pub min: Vector3,
    pub max: Vector3,
    /// Side length the box was widened to when squaring
    pub size: f32,
    /// World to light clip space
    pub light_matrix: Matrix4,
}

/// Fit the light box for the camera frustum between `near` and `far`
pub fn fit_cascade(settings: &WorldSettings, camera: &CameraState, near: f32, far: f32) -> CascadeFit {
    let projection = settings.projection_for_range(near, far);
    let corners = frustum_corners_world_space(&projection, Some(&camera_view_matrix(camera)));
    let view = light_view_matrix(settings);

    let first = view.transform_point(corners[0]);
    let (mut min, mut max) = corners[1..].iter().fold((first, first), |(min, max), corner| {
        let p = view.transform_point(*corner);
        (min.min_components(&p), max.max_components(&p))
    });

    let z_multiplier = settings.shadow.z_multiplier;
    min.z = if min.z < 0.0 {
        min.z * z_multiplier
    } else {
        min.z / z_multiplier
    };

    let size = if settings.shadow.constant_size {
        let far_face_diagonal = (corners[7] - corners[1]).magnitude();
        let forward_diagonal = (corners[7] - corners[0]).magnitude();
        far_face_diagonal.max(forward_diagonal)
    } else {
        (max.x - min.x).max(max.y - min.y)
    };

    if settings.shadow.square {
        let grow_y = size - (max.y - min.y);
        if grow_y > 0.0 {
            max.y += grow_y / 2.0;
            min.y -= grow_y / 2.0;
        }
        let grow_x = size - (max.x - min.x);
        if grow_x > 0.0 {
            max.x += grow_x / 2.0;
            min.x -= grow_x / 2.0;
        }
    }

    let ortho = Matrix4::orthographic(min.x, max.x, min.y, max.y, -min.z, -max.z);
    tracing::debug!(near, far, ?min, ?max, size, "fitted shadow cascade");

    CascadeFit {
        near,
        far,
        min,
        max,
        size,
        light_matrix: ortho.multiply(&view),
    }
}

/// Light matrix for the camera frustum between `near` and `far`
pub fn directional_light_matrix(
    settings: &WorldSettings,
    camera: &CameraState,
    near: f32,
    far: f32,
) -> Matrix4 {
    fit_cascade(settings, camera, near, far).light_matrix
}

pub fn fit_cascades(settings: &WorldSettings, camera: &CameraState) -> Vec<CascadeFit> {
    cascade_planes(settings)
        .into_iter()
        .map(|(near, far)| fit_cascade(settings, camera, near, far))
        .collect()
}

/// One light matrix per cascade; always `cascade_splits.len() + 1` long
pub fn directional_light_matrices(settings: &WorldSettings, camera: &CameraState) -> Vec<Matrix4> {
    fit_cascades(settings, camera)
        .into_iter()
        .map(|fit| fit.light_matrix)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(a: Vector3, b: Vector3, eps: f32) {
        assert!((a - b).magnitude() < eps, "{:?} != {:?}", a, b);
    }

    fn settings_with_light(light: Vector3) -> WorldSettings {
        WorldSettings {
            light_direction: light,
            ..WorldSettings::default()
        }
    }

    #[test]
    fn test_frustum_corners_without_view() {
        let projection = Matrix4::perspective(90.0, 500.0, 500.0, 1.0, 100.0);
        let corners = frustum_corners_world_space(&projection, None);

        assert_vec_near(corners[0], Vector3::new(-1.0, -1.0, -1.0), 1e-3);
        assert_vec_near(corners[1], Vector3::new(-100.0, -100.0, -100.0), 1e-1);
        assert_vec_near(corners[6], Vector3::new(1.0, 1.0, -1.0), 1e-3);
        assert_vec_near(corners[7], Vector3::new(100.0, 100.0, -100.0), 1e-1);
    }

    #[test]
    fn test_frustum_corners_follow_camera() {
        let projection = Matrix4::perspective(90.0, 500.0, 500.0, 1.0, 100.0);
        let camera = CameraState::new(Vector3::new(10.0, 0.0, 0.0), Vector3::ZERO);
        let corners = frustum_corners_world_space(&projection, Some(&camera_view_matrix(&camera)));
        assert_vec_near(corners[0], Vector3::new(9.0, -1.0, -1.0), 1e-3);
        assert_vec_near(corners[7], Vector3::new(110.0, 100.0, -100.0), 1e-1);
    }

    #[test]
    fn test_cascade_planes() {
        let planes = cascade_planes(&WorldSettings::default());
        assert_eq!(
            planes,
            vec![
                (1.0, 750.0),
                (750.0, 1000.0),
                (1000.0, 1500.0),
                (1500.0, 5000.0),
                (5000.0, 7500.0),
            ]
        );

        let mut settings = WorldSettings::default();
        settings.shadow.cascade_splits = vec![300.0];
        assert_eq!(cascade_planes(&settings), vec![(1.0, 300.0), (300.0, 7500.0)]);

        settings.shadow.cascade_splits.clear();
        assert_eq!(cascade_planes(&settings), vec![(1.0, 7500.0)]);
    }

    #[test]
    fn test_cascade_count_matches_splits() {
        let camera = CameraState::default();
        let mut settings = WorldSettings::default();
        assert_eq!(directional_light_matrices(&settings, &camera).len(), 5);

        settings.shadow.cascade_splits.clear();
        assert_eq!(directional_light_matrices(&settings, &camera).len(), 1);
    }

    #[test]
    fn test_negative_near_z_is_multiplied() {
        let settings = WorldSettings::default();
        let fit = fit_cascade(&settings, &CameraState::default(), 1.0, 750.0);

        // Light along +X: light-space z is world x, spanning -750..750
        assert!((fit.min.z - -3750.0).abs() < 1.0, "min z {}", fit.min.z);
        assert!((fit.max.z - 750.0).abs() < 1.0, "max z {}", fit.max.z);
    }

    #[test]
    fn test_positive_near_z_is_divided() {
        // Light along +Z: light-space z is -world z, spanning 1..750
        let settings = settings_with_light(Vector3::new(0.0, 0.0, 1.0));
        let fit = fit_cascade(&settings, &CameraState::default(), 1.0, 750.0);
        assert!((fit.min.z - 0.2).abs() < 1e-2, "min z {}", fit.min.z);
        assert!((fit.max.z - 750.0).abs() < 1.0, "max z {}", fit.max.z);
    }

    #[test]
    fn test_constant_size_squares_the_box() {
        let settings = WorldSettings::default();
        let fit = fit_cascade(&settings, &CameraState::default(), 1.0, 750.0);

        let far_face_diagonal = 1500.0 * std::f32::consts::SQRT_2;
        assert!((fit.size - far_face_diagonal).abs() < 1.0);
        assert!(((fit.max.x - fit.min.x) - fit.size).abs() < 1e-2 * fit.size);
        assert!(((fit.max.y - fit.min.y) - fit.size).abs() < 1e-2 * fit.size);
        // Widening stays centered on the original extents
        assert!(((fit.max.y + fit.min.y) / 2.0).abs() < 1.0);
    }

    #[test]
    fn test_without_square_keeps_tight_extents() {
        let mut settings = WorldSettings::default();
        settings.shadow.square = false;
        let fit = fit_cascade(&settings, &CameraState::default(), 1.0, 750.0);
        assert!(((fit.max.x - fit.min.x) - 749.0).abs() < 1.0);
        assert!(((fit.max.y - fit.min.y) - 1500.0).abs() < 1.0);
    }

    #[test]
    fn test_cascade_contains_its_frustum() {
        let settings = settings_with_light(Vector3::new(0.4, -1.0, 0.3));
        let camera = CameraState::new(Vector3::new(50.0, 20.0, -30.0), Vector3::new(0.2, 0.7, 0.0));

        for fit in fit_cascades(&settings, &camera) {
            let projection = settings.projection_for_range(fit.near, fit.far);
            let corners =
                frustum_corners_world_space(&projection, Some(&camera_view_matrix(&camera)));
            for corner in corners {
                let p = fit.light_matrix.transform_point(corner);
                let eps = 1e-3;
                assert!(p.x >= -1.0 - eps && p.x <= 1.0 + eps, "x {} in {:?}", p.x, fit);
                assert!(p.y >= -1.0 - eps && p.y <= 1.0 + eps, "y {} in {:?}", p.y, fit);
                assert!(p.z >= -eps && p.z <= 1.0 + eps, "z {} in {:?}", p.z, fit);
            }
        }
    }

    #[test]
    fn test_vertical_light_stays_finite() {
        let settings = settings_with_light(Vector3::new(0.0, -1.0, 0.0));
        for matrix in directional_light_matrices(&settings, &CameraState::default()) {
            assert!(matrix.as_array().iter().all(|v| v.is_finite()));
        }
    }
}
