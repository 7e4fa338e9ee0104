//! Cuboid CLI - Command-line driver for the Cuboid world editor core

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{frame, pick, raycast, scene, shadows};

#[derive(Parser)]
#[command(name = "cuboid")]
#[command(about = "Spatial queries over Cuboid world scenes", long_about = None)]
#[command(version)]
struct Cli {
    /// World settings TOML file (defaults to the built-in settings)
    #[arg(long, global = true)]
    settings: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scene operations
    #[command(subcommand)]
    Scene(scene::SceneCommands),

    /// Cast a ray into a scene and report the nearest hit
    Raycast {
        /// Path to scene file
        scene: String,

        /// Ray origin (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        origin: [f32; 3],

        /// Ray direction (comma-separated x,y,z), normalized before casting
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        direction: [f32; 3],

        /// Maximum hit distance
        #[arg(long, default_value = "100000")]
        distance: f32,

        /// Ignore objects with this name (repeatable)
        #[arg(long)]
        ignore: Vec<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Cast the pointer ray through a viewport pixel
    Pick {
        /// Path to scene file
        scene: String,

        /// Pixel position (comma-separated x,y)
        #[arg(long, value_parser = parse_vec2)]
        screen: [f32; 2],

        /// Camera position (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        camera_offset: Option<[f32; 3]>,

        /// Camera Euler rotation in radians (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        camera_rotation: Option<[f32; 3]>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Fit the shadow cascades for a camera pose
    Shadows {
        /// Camera position (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        camera_offset: Option<[f32; 3]>,

        /// Camera Euler rotation in radians (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        camera_rotation: Option<[f32; 3]>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Pack the per-frame GPU data for a scene and summarize it
    Frame {
        /// Path to scene file
        scene: String,

        /// Camera position (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        camera_offset: Option<[f32; 3]>,

        /// Camera Euler rotation in radians (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        camera_rotation: Option<[f32; 3]>,

        /// Include the sun backdrop object
        #[arg(long)]
        sun: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },
}

fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    let z: f32 = parts[2].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, y, z])
}

fn parse_vec2(s: &str) -> Result<[f32; 2], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected 2 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    Ok([x, y])
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let settings_path = cli.settings.as_deref();

    match cli.command {
        Commands::Scene(cmd) => scene::run(cmd),
        Commands::Raycast {
            scene,
            origin,
            direction,
            distance,
            ignore,
            format,
        } => raycast::run(raycast::RaycastArgs {
            scene,
            origin,
            direction,
            distance,
            ignore,
            format,
        }),
        Commands::Pick {
            scene,
            screen,
            camera_offset,
            camera_rotation,
            format,
        } => pick::run(
            pick::PickArgs {
                scene,
                screen,
                camera: commands::camera_state(camera_offset, camera_rotation),
                format,
            },
            &commands::load_settings(settings_path)?,
        ),
        Commands::Shadows {
            camera_offset,
            camera_rotation,
            format,
        } => shadows::run(
            &commands::load_settings(settings_path)?,
            &commands::camera_state(camera_offset, camera_rotation),
            &format,
        ),
        Commands::Frame {
            scene,
            camera_offset,
            camera_rotation,
            sun,
            format,
        } => frame::run(
            frame::FrameArgs {
                scene,
                camera: commands::camera_state(camera_offset, camera_rotation),
                sun,
                format,
            },
            &commands::load_settings(settings_path)?,
        ),
    }
}
