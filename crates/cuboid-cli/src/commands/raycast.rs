//! Ray query against a scene file

use super::{print_hit, HitReport};
use anyhow::{Context, Result};
use cuboid_core::{ObjectId, Vector3};
use cuboid_scene::{load_scene, RaycastFilter};

pub struct RaycastArgs {
    pub scene: String,
    pub origin: [f32; 3],
    pub direction: [f32; 3],
    pub distance: f32,
    pub ignore: Vec<String>,
    pub format: String,
}

pub fn run(args: RaycastArgs) -> Result<()> {
    let direction = Vector3::from_array(args.direction);
    if direction.magnitude() == 0.0 {
        anyhow::bail!("Ray direction must be non-zero");
    }

    let scene = load_scene(&args.scene).context("Failed to load scene file")?;

    let blacklist: Vec<ObjectId> = args
        .ignore
        .iter()
        .flat_map(|name| scene.objects_by_name(name).map(|o| o.id()))
        .collect();

    let hit = scene.raycast(
        Vector3::from_array(args.origin),
        direction.unit(),
        args.distance,
        &RaycastFilter::excluding(&blacklist),
    );
    tracing::info!(scene = %scene.name, hit = hit.is_some(), "raycast complete");

    print_hit(hit.map(|hit| HitReport::new(&scene, &hit)), &args.format)
}
