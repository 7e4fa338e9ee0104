//! Scene loading from TOML files

use crate::format::SceneFile;
use crate::scene::Scene;
use cuboid_core::Result;
use std::fs;
use std::path::Path;

/// Load a scene from a TOML file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let scene = load_scene_string(&content)?;
    tracing::info!(path = %path.display(), objects = scene.len(), "loaded scene");
    Ok(scene)
}

/// Load a scene from a TOML string
pub fn load_scene_string(content: &str) -> Result<Scene> {
    let scene_file: SceneFile = toml::from_str(content)?;
    let mut scene = Scene::new(scene_file.scene.name);

    for def in &scene_file.objects {
        scene.add(def.to_object()?);
    }

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuboid_core::{CuboidError, Vector3};

    #[test]
    fn test_load_scene_string() {
        let scene = load_scene_string(
            r#"
[scene]
name = "Test Scene"

[[objects]]
name = "Floor"
offset = [0.0, -100.0, -250.0]
scale = [1000.0, 10.0, 1000.0]
color = [0.4, 0.4, 0.4, 1.0]

[[objects]]
name = "Lamp"
offset = [0.0, 50.0, -250.0]
texture_id = 2

[objects.light]
radius = 500.0
brightness = 3.0

[objects.flags]
ignore_lighting = true
"#,
        )
        .unwrap();

        assert_eq!(scene.name, "Test Scene");
        assert_eq!(scene.len(), 2);

        let floor = scene.objects_by_name("Floor").next().unwrap();
        assert_eq!(floor.pose().scale, Vector3::new(1000.0, 10.0, 1000.0));

        let lamp = scene.objects_by_name("Lamp").next().unwrap();
        assert_eq!(lamp.texture_id, Some(2));
        assert!(lamp.flags.ignore_lighting);
        assert!(!lamp.flags.dont_save);
        assert_eq!(lamp.light.unwrap().radius, 500.0);
        assert_eq!(scene.point_lights().len(), 1);
    }

    #[test]
    fn test_load_rejects_bad_geometry() {
        let err = load_scene_string(
            r#"
[scene]
name = "Broken"

[[objects]]
name = "Shard"

[objects.geometry]
vertices = [0.0, 0.0, 0.0, 1.0, 0.0]
indices = [0, 0, 0]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CuboidError::InvalidGeometry(_)));
    }

    #[test]
    fn test_load_missing_metadata() {
        let err = load_scene_string("[[objects]]\nname = \"Box\"").unwrap_err();
        assert!(matches!(err, CuboidError::TomlParseError(_)));
    }
}
