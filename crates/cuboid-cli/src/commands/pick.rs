//! Screen-space picking

use super::{print_hit, HitReport};
use anyhow::{Context, Result};
use cuboid_scene::{load_scene, raycast, CameraState, Ray, RaycastFilter, WorldSettings};

/// Far enough to reach anything inside the far plane
const PICK_DISTANCE: f32 = 100_000.0;

pub struct PickArgs {
    pub scene: String,
    pub screen: [f32; 2],
    pub camera: CameraState,
    pub format: String,
}

pub fn run(args: PickArgs, settings: &WorldSettings) -> Result<()> {
    let [x, y] = args.screen;
    if x < 0.0 || y < 0.0 || x > settings.width as f32 || y > settings.height as f32 {
        anyhow::bail!(
            "Screen position ({}, {}) is outside the {}x{} viewport",
            x,
            y,
            settings.width,
            settings.height
        );
    }

    let scene = load_scene(&args.scene).context("Failed to load scene file")?;
    let ray = Ray::from_screen(args.screen, settings, &args.camera, PICK_DISTANCE);
    tracing::debug!(?ray, "pointer ray");

    let hit = raycast(scene.objects(), &ray, &RaycastFilter::default());
    print_hit(hit.map(|hit| HitReport::new(&scene, &hit)), &args.format)
}
