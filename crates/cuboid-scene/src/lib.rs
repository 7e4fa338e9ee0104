//! Cuboid Scene - Scene objects and the spatial queries over them
//!
//! This crate owns everything that turns object poses into world-space data:
//! - `SceneObject`, `Mesh`, `Pose` - geometry plus placement, with a
//!   world-vertex cache attached to each object
//! - `transform` - world matrices, world vertices and bounds
//! - `CameraState`, `WorldSettings` - the per-frame view inputs
//! - `raycast` - nearest ray/triangle hit across the scene
//! - `Scene` - the editable object list
//! - TOML scene files

mod camera;
pub mod debug;
mod format;
mod loader;
mod object;
pub mod raycast;
mod saver;
mod scene;
mod settings;
mod sun;
pub mod transform;

pub use camera::{
    camera_view_matrix, screen_to_camera_direction, view_projection_matrix, CameraState,
};
pub use format::{GeometryDef, LightDef, ObjectDef, SceneFile, SceneMetadata};
pub use loader::{load_scene, load_scene_string};
pub use object::{Mesh, ObjectFlags, PointLightDef, Pose, SceneObject};
pub use raycast::{raycast, HitResult, Ray, RaycastFilter};
pub use saver::{save_scene, save_scene_string, scene_to_scene_file};
pub use scene::{CubeOptions, Scene, WorldPointLight};
pub use settings::{ShadowSettings, WorldSettings};
pub use sun::sun_object;
pub use transform::{
    object_center_position, object_max_position, object_min_position, render_matrix,
    vertices_to_world_vertices, world_matrix, Bounds,
};
