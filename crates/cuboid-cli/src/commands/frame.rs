//! Frame packing summary

use anyhow::{Context, Result};
use cuboid_render::FrameData;
use cuboid_scene::{load_scene, sun_object, CameraState, WorldSettings};
use serde::Serialize;

pub struct FrameArgs {
    pub scene: String,
    pub camera: CameraState,
    pub sun: bool,
    pub format: String,
}

#[derive(Serialize)]
struct FrameSummary {
    objects: usize,
    shadow_casters: usize,
    vertex_floats: usize,
    indices: usize,
    point_lights: usize,
    cascades: usize,
    object_bytes: usize,
    point_light_bytes: usize,
    light_matrix_bytes: usize,
}

impl FrameSummary {
    fn new(frame: &FrameData) -> Self {
        Self {
            objects: frame.objects.len(),
            shadow_casters: frame.ranges.iter().filter(|r| r.casts_shadow).count(),
            vertex_floats: frame.vertices.len(),
            indices: frame.indices.len(),
            point_lights: frame.point_lights.len(),
            cascades: frame.light_matrices.len(),
            object_bytes: frame.object_bytes().len(),
            point_light_bytes: frame.point_light_bytes().len(),
            light_matrix_bytes: frame.light_matrix_bytes().len(),
        }
    }
}

pub fn run(args: FrameArgs, settings: &WorldSettings) -> Result<()> {
    let mut scene = load_scene(&args.scene).context("Failed to load scene file")?;
    if args.sun {
        scene.add(sun_object(settings, &args.camera));
    }

    let frame = FrameData::build(&scene, settings, &args.camera);
    let summary = FrameSummary::new(&frame);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Scene: {}", scene.name);
    println!("Objects: {} ({} cast shadows)", summary.objects, summary.shadow_casters);
    println!("Vertices: {} floats, {} indices", summary.vertex_floats, summary.indices);
    println!("Point lights: {} (including placeholder)", summary.point_lights);
    println!("Cascades: {}", summary.cascades);
    println!(
        "Upload: {} object bytes, {} light bytes, {} cascade bytes",
        summary.object_bytes, summary.point_light_bytes, summary.light_matrix_bytes
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuboid_scene::{CubeOptions, Scene};

    #[test]
    fn test_summary_counts() {
        let mut scene = Scene::new("frame");
        scene.new_cube(CubeOptions::default());
        let settings = WorldSettings::default();
        let camera = CameraState::default();
        scene.add(sun_object(&settings, &camera));

        let summary = FrameSummary::new(&FrameData::build(&scene, &settings, &camera));
        assert_eq!(summary.objects, 2);
        assert_eq!(summary.point_lights, 1);
        assert_eq!(summary.cascades, 5);
        assert_eq!(summary.object_bytes, 320);
        assert_eq!(summary.light_matrix_bytes, 320);
    }
}
