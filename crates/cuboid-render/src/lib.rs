//! Cuboid Render - GPU-facing data for the Cuboid world editor
//!
//! The GPU backend itself lives outside this workspace. This crate computes
//! what it consumes each frame:
//! - `shadow` - cascaded shadow map light matrices fitted to the camera frustum
//! - `frame` - object, light and cascade uniforms packed as `Pod` structs

pub mod frame;
pub mod shadow;

pub use frame::{FrameData, FrameGlobals, MeshRange, ObjectUniforms, PointLightUniform};
pub use shadow::{
    cascade_planes, directional_light_matrices, directional_light_matrix, fit_cascade,
    fit_cascades, frustum_corners_world_space, light_view_matrix, CascadeFit,
};
