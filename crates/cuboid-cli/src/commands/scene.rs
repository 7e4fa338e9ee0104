//! Scene management commands

use anyhow::{Context, Result};
use clap::Subcommand;
use cuboid_core::Vector3;
use cuboid_scene::{load_scene, save_scene, Bounds, CubeOptions, Scene};
use std::fs;
use std::path::Path;

#[derive(Subcommand)]
pub enum SceneCommands {
    /// Create a new scene file
    Create {
        /// Path to scene file
        path: String,

        /// Scene name (defaults to filename)
        #[arg(long)]
        name: Option<String>,

        /// Start the scene with a template cube
        #[arg(long)]
        cube: bool,
    },

    /// Show scene information
    Info {
        /// Path to scene file
        path: String,
    },

    /// Add a cube to a scene file
    AddCube {
        /// Path to scene file
        path: String,

        /// Object name
        #[arg(long)]
        name: Option<String>,

        /// Position (comma-separated x,y,z)
        #[arg(long, value_parser = crate::parse_vec3, allow_hyphen_values = true)]
        offset: Option<[f32; 3]>,

        /// Scale (comma-separated x,y,z)
        #[arg(long, value_parser = crate::parse_vec3, allow_hyphen_values = true)]
        scale: Option<[f32; 3]>,

        /// Euler rotation in radians (comma-separated x,y,z)
        #[arg(long, value_parser = crate::parse_vec3, allow_hyphen_values = true)]
        rotation: Option<[f32; 3]>,
    },

    /// Delete every object with the given name
    Delete {
        /// Path to scene file
        path: String,

        /// Object name
        #[arg(long)]
        name: String,
    },
}

pub fn run(cmd: SceneCommands) -> Result<()> {
    match cmd {
        SceneCommands::Create { path, name, cube } => create(&path, name.as_deref(), cube),
        SceneCommands::Info { path } => info(&path),
        SceneCommands::AddCube {
            path,
            name,
            offset,
            scale,
            rotation,
        } => add_cube(
            &path,
            CubeOptions {
                name,
                offset: offset.map(Vector3::from_array),
                scale: scale.map(Vector3::from_array),
                rotation: rotation.map(Vector3::from_array),
                ..Default::default()
            },
        ),
        SceneCommands::Delete { path, name } => delete(&path, &name),
    }
}

fn scene_path(path: &str) -> String {
    if path.ends_with(".toml") {
        path.to_string()
    } else if path.ends_with(".scene") {
        format!("{}.toml", path)
    } else {
        format!("{}.scene.toml", path)
    }
}

fn create(path: &str, name: Option<&str>, cube: bool) -> Result<()> {
    let path = scene_path(path);

    if Path::new(&path).exists() {
        anyhow::bail!("Scene file already exists: {}", path);
    }

    // Derive name from path if not provided
    let scene_name = name.map(String::from).unwrap_or_else(|| {
        Path::new(&path)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.trim_end_matches(".scene"))
            .unwrap_or("Untitled")
            .to_string()
    });

    let mut scene = Scene::new(scene_name);
    if cube {
        scene.new_cube(CubeOptions::default());
    }

    if let Some(parent) = Path::new(&path).parent() {
        fs::create_dir_all(parent)?;
    }
    save_scene(&path, &scene).context("Failed to write scene file")?;

    println!("Created scene: {}", path);

    Ok(())
}

fn info(path: &str) -> Result<()> {
    let scene = load_scene(path).context("Failed to load scene file")?;

    println!("Scene: {}", scene.name);
    println!("Objects: {}", scene.len());

    if !scene.is_empty() {
        println!();
        println!("Object list:");
        for object in scene.iter() {
            let bounds = Bounds::of_object(object);
            println!(
                "  {} [{} tris] min ({:.2}, {:.2}, {:.2}) max ({:.2}, {:.2}, {:.2})",
                object.name,
                object.mesh().triangle_count(),
                bounds.min.x,
                bounds.min.y,
                bounds.min.z,
                bounds.max.x,
                bounds.max.y,
                bounds.max.z,
            );
        }
    }

    let lights = scene.point_lights();
    if !lights.is_empty() {
        println!();
        println!("Point lights:");
        for light in lights {
            println!(
                "  at ({:.2}, {:.2}, {:.2}) radius {} brightness {}",
                light.position.x, light.position.y, light.position.z, light.radius, light.brightness
            );
        }
    }

    Ok(())
}

fn add_cube(path: &str, options: CubeOptions) -> Result<()> {
    let mut scene = load_scene(path).context("Failed to load scene file")?;
    let id = scene.new_cube(options);
    save_scene(path, &scene).context("Failed to write scene file")?;

    if let Some(object) = scene.get(id) {
        println!("Added cube: {}", object.name);
    }
    Ok(())
}

fn delete(path: &str, name: &str) -> Result<()> {
    let mut scene = load_scene(path).context("Failed to load scene file")?;
    let removed = scene.delete_by_name(name);
    if removed == 0 {
        anyhow::bail!("No object named '{}' in {}", name, path);
    }
    save_scene(path, &scene).context("Failed to write scene file")?;

    println!("Deleted {} object(s) named {}", removed, name);
    Ok(())
}
