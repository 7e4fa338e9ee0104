//! CLI command implementations

pub mod frame;
pub mod pick;
pub mod raycast;
pub mod scene;
pub mod shadows;

use anyhow::{Context, Result};
use cuboid_core::Vector3;
use cuboid_scene::{CameraState, HitResult, Scene, WorldSettings};
use serde::Serialize;

/// Settings from `path`, or the built-in defaults
pub fn load_settings(path: Option<&str>) -> Result<WorldSettings> {
    match path {
        Some(path) => WorldSettings::load(path)
            .with_context(|| format!("Failed to load world settings from {}", path)),
        None => Ok(WorldSettings::default()),
    }
}

pub fn camera_state(offset: Option<[f32; 3]>, rotation: Option<[f32; 3]>) -> CameraState {
    CameraState::new(
        offset.map(Vector3::from_array).unwrap_or(Vector3::ZERO),
        rotation.map(Vector3::from_array).unwrap_or(Vector3::ZERO),
    )
}

/// A hit as printed by `raycast` and `pick`
#[derive(Serialize)]
pub struct HitReport {
    pub object: String,
    pub id: u64,
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub distance: f32,
}

impl HitReport {
    pub fn new(scene: &Scene, hit: &HitResult) -> Self {
        let object = scene
            .get(hit.object)
            .map(|o| o.name.clone())
            .unwrap_or_default();
        Self {
            object,
            id: hit.object.raw(),
            position: hit.position.to_array(),
            normal: hit.normal.to_array(),
            distance: hit.distance,
        }
    }
}

pub fn print_hit(report: Option<HitReport>, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report {
        Some(hit) => {
            println!("Hit: {} (id {})", hit.object, hit.id);
            println!(
                "  position: ({:.3}, {:.3}, {:.3})",
                hit.position[0], hit.position[1], hit.position[2]
            );
            println!(
                "  normal:   ({:.3}, {:.3}, {:.3})",
                hit.normal[0], hit.normal[1], hit.normal[2]
            );
            println!("  distance: {:.3}", hit.distance);
        }
        None => println!("No hit"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuboid_scene::{CubeOptions, RaycastFilter};

    #[test]
    fn test_default_settings_without_path() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.width, 500);
    }

    #[test]
    fn test_missing_settings_file_is_an_error() {
        let err = load_settings(Some("/nonexistent/world.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/world.toml"));
    }

    #[test]
    fn test_camera_state_defaults_to_origin() {
        let camera = camera_state(None, Some([0.0, 1.0, 0.0]));
        assert_eq!(camera.offset, Vector3::ZERO);
        assert_eq!(camera.rotation, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_hit_report_names_the_object() {
        let mut scene = Scene::new("cli");
        scene.new_cube(CubeOptions {
            offset: Some(Vector3::ZERO),
            scale: Some(Vector3::ONE),
            ..CubeOptions::named("Target")
        });
        let hit = scene
            .raycast(
                Vector3::new(0.2, 0.3, 10.0),
                Vector3::new(0.0, 0.0, -1.0),
                100.0,
                &RaycastFilter::default(),
            )
            .unwrap();
        let report = HitReport::new(&scene, &hit);
        assert_eq!(report.object, "Target");
        assert!((report.distance - 9.5).abs() < 1e-4);
    }
}
