//! Shadow cascade report

use anyhow::Result;
use cuboid_render::fit_cascades;
use cuboid_scene::{CameraState, WorldSettings};

pub fn run(settings: &WorldSettings, camera: &CameraState, format: &str) -> Result<()> {
    let fits = fit_cascades(settings, camera);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&fits)?);
        return Ok(());
    }

    let light = settings.light_direction;
    println!(
        "Light direction: ({:.3}, {:.3}, {:.3})",
        light.x, light.y, light.z
    );
    println!("Cascades: {}", fits.len());
    println!();
    println!(
        "{:>3}  {:>9} {:>9}  {:>10}  {:>10} {:>10}  {:>10} {:>10}  {:>10} {:>10}",
        "#", "near", "far", "size", "min x", "max x", "min y", "max y", "min z", "max z"
    );
    for (i, fit) in fits.iter().enumerate() {
        println!(
            "{:>3}  {:>9.1} {:>9.1}  {:>10.1}  {:>10.1} {:>10.1}  {:>10.1} {:>10.1}  {:>10.1} {:>10.1}",
            i, fit.near, fit.far, fit.size, fit.min.x, fit.max.x, fit.min.y, fit.max.y, fit.min.z, fit.max.z
        );
    }

    Ok(())
}
