//! Scene saving to TOML files

use crate::format::{ObjectDef, SceneFile};
use crate::scene::Scene;
use cuboid_core::Result;
use std::fs;
use std::path::Path;

/// Save the persistent objects of a scene to a TOML file
pub fn save_scene<P: AsRef<Path>>(path: P, scene: &Scene) -> Result<()> {
    let content = save_scene_string(scene)?;
    fs::write(path, content)?;
    Ok(())
}

/// Save the persistent objects of a scene to a TOML string
pub fn save_scene_string(scene: &Scene) -> Result<String> {
    let content = toml::to_string_pretty(&scene_to_scene_file(scene))?;
    Ok(content)
}

/// Convert a scene to its file form, dropping `dont_save` objects
pub fn scene_to_scene_file(scene: &Scene) -> SceneFile {
    let mut file = SceneFile::new(scene.name.clone());
    file.objects = scene.persistent_objects().map(ObjectDef::from_object).collect();
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_scene_string;
    use crate::object::{Mesh, PointLightDef, Pose, SceneObject};
    use crate::scene::CubeOptions;
    use cuboid_core::{Color, Vector3};

    #[test]
    fn test_save_scene_string() {
        let mut scene = Scene::new("Test Scene");
        scene.new_cube(CubeOptions::named("cube1"));
        scene.new_cube(CubeOptions::marker("marker"));

        let toml_str = save_scene_string(&scene).unwrap();

        assert!(toml_str.contains("Test Scene"));
        assert!(toml_str.contains("cube1"));
        assert!(!toml_str.contains("marker"));
    }

    #[test]
    fn test_roundtrip() {
        let mut scene = Scene::new("Roundtrip Test");
        scene.new_cube(CubeOptions {
            name: Some("Box".into()),
            offset: Some(Vector3::new(1.0, 2.0, 3.0)),
            rotation: Some(Vector3::new(0.5, 0.0, -0.25)),
            color: Some(Color::new(0.2, 0.4, 0.6, 1.0)),
            ..Default::default()
        });
        let wedge = Mesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        )
        .unwrap();
        scene.add(
            SceneObject::new("Wedge", wedge.clone(), Pose::default())
                .with_internal_name("wedge-1")
                .with_light(PointLightDef {
                    radius: 100.0,
                    color: Color::WHITE,
                    brightness: 0.5,
                }),
        );

        let saved = save_scene_string(&scene).unwrap();
        let loaded = load_scene_string(&saved).unwrap();

        assert_eq!(loaded.name, "Roundtrip Test");
        assert_eq!(loaded.len(), 2);

        let original_box = scene.objects_by_name("Box").next().unwrap();
        let loaded_box = loaded.objects_by_name("Box").next().unwrap();
        assert_eq!(loaded_box.pose(), original_box.pose());
        assert_eq!(loaded_box.color, original_box.color);

        let loaded_wedge = loaded.objects_by_internal_name("wedge-1").next().unwrap();
        assert_eq!(*loaded_wedge.mesh(), wedge);
        assert_eq!(loaded_wedge.light.unwrap().brightness, 0.5);
    }
}
