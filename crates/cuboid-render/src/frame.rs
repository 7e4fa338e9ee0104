//! Per-frame GPU hand-off
//!
//! Everything the renderer uploads for one frame, built in a single pass
//! after the camera and every object pose are final for the frame.

use crate::shadow::directional_light_matrices;
use bytemuck::{Pod, Zeroable};
use cuboid_scene::{
    camera_view_matrix, render_matrix, view_projection_matrix, world_matrix, CameraState, Scene,
    WorldPointLight, WorldSettings,
};

/// Per-object uniform block
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Object to clip space
    pub render_matrix: [[f32; 4]; 4],
    /// Object to world space, for lighting and shadow lookups
    pub world_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub index: u32,
    pub ignore_lighting: u32,
    pub texture_id: u32,
    pub _padding: u32,
}

/// Point light as laid out in the shader's storage buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
    pub brightness: f32,
    pub _padding: [f32; 3],
}

impl From<WorldPointLight> for PointLightUniform {
    fn from(light: WorldPointLight) -> Self {
        Self {
            position: light.position.to_array(),
            radius: light.radius,
            color: light.color.to_array(),
            brightness: light.brightness,
            _padding: [0.0; 3],
        }
    }
}

/// Frame-wide values shared by every draw
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameGlobals {
    pub camera_view: [[f32; 4]; 4],
    pub far_plane: f32,
    pub shadows_enabled: u32,
    pub cascade_count: u32,
    pub point_light_count: u32,
}

/// Where one object's geometry sits in the packed buffers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshRange {
    /// First float of the object's vertices in `FrameData::vertices`
    pub vertex_start: usize,
    pub vertex_len: usize,
    pub index_start: usize,
    pub index_len: usize,
    pub casts_shadow: bool,
}

/// Everything uploaded for one frame
#[derive(Clone, Debug)]
pub struct FrameData {
    pub globals: FrameGlobals,
    pub objects: Vec<ObjectUniforms>,
    pub ranges: Vec<MeshRange>,
    /// Local-space vertices of every object, back to back
    pub vertices: Vec<f32>,
    /// Triangle indices, local to each object's own vertex range
    pub indices: Vec<u32>,
    /// Slot 0 is always an all-zero placeholder
    pub point_lights: Vec<PointLightUniform>,
    /// One per shadow cascade, nearest first
    pub light_matrices: Vec<[[f32; 4]; 4]>,
    /// Split distances for picking a cascade in the shader
    pub cascade_splits: Vec<f32>,
}

impl FrameData {
    pub fn build(scene: &Scene, settings: &WorldSettings, camera: &CameraState) -> Self {
        let view_projection = view_projection_matrix(settings, camera);

        let mut objects = Vec::with_capacity(scene.len());
        let mut ranges = Vec::with_capacity(scene.len());
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for (index, object) in scene.iter().enumerate() {
            let pose = object.pose();
            objects.push(ObjectUniforms {
                render_matrix: render_matrix(&view_projection, pose).to_cols_array_2d(),
                world_matrix: world_matrix(pose).to_cols_array_2d(),
                color: object.color.to_array(),
                index: index as u32,
                ignore_lighting: object.flags.ignore_lighting as u32,
                texture_id: object.texture_id.unwrap_or(0).min(settings.num_textures),
                _padding: 0,
            });

            let mesh = object.mesh();
            ranges.push(MeshRange {
                vertex_start: vertices.len(),
                vertex_len: mesh.vertices().len(),
                index_start: indices.len(),
                index_len: mesh.indices().len(),
                casts_shadow: !object.flags.dont_cast_shadow,
            });
            vertices.extend_from_slice(mesh.vertices());
            indices.extend_from_slice(mesh.indices());
        }

        let mut point_lights = vec![PointLightUniform::zeroed()];
        point_lights.extend(scene.point_lights().into_iter().map(PointLightUniform::from));

        let light_matrices: Vec<_> = directional_light_matrices(settings, camera)
            .iter()
            .map(|m| m.to_cols_array_2d())
            .collect();

        let globals = FrameGlobals {
            camera_view: camera_view_matrix(camera).to_cols_array_2d(),
            far_plane: settings.far_plane,
            shadows_enabled: settings.shadows_enabled as u32,
            cascade_count: light_matrices.len() as u32,
            point_light_count: point_lights.len() as u32,
        };

        tracing::debug!(
            objects = objects.len(),
            point_lights = point_lights.len(),
            cascades = light_matrices.len(),
            "built frame data"
        );

        Self {
            globals,
            objects,
            ranges,
            vertices,
            indices,
            point_lights,
            light_matrices,
            cascade_splits: settings.shadow.cascade_splits.clone(),
        }
    }

    pub fn object_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.objects)
    }

    pub fn point_light_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.point_lights)
    }

    pub fn light_matrix_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.light_matrices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuboid_core::{Color, Vector3};
    use cuboid_scene::{CubeOptions, ObjectFlags, PointLightDef};

    fn scene_with_lamp() -> Scene {
        let mut scene = Scene::new("frame");
        scene.new_cube(CubeOptions::named("plain"));
        let lamp = CubeOptions {
            name: Some("lamp".into()),
            offset: Some(Vector3::new(0.0, 10.0, 0.0)),
            ..Default::default()
        }
        .build()
        .with_texture(42)
        .with_flags(ObjectFlags {
            ignore_lighting: true,
            dont_cast_shadow: true,
            ..Default::default()
        })
        .with_light(PointLightDef {
            radius: 200.0,
            color: Color::WHITE,
            brightness: 1.5,
        });
        scene.add(lamp);
        scene
    }

    #[test]
    fn test_uniform_layouts() {
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 160);
        assert_eq!(std::mem::size_of::<PointLightUniform>(), 48);
        assert_eq!(std::mem::size_of::<FrameGlobals>(), 80);
    }

    #[test]
    fn test_frame_objects() {
        let scene = scene_with_lamp();
        let frame = FrameData::build(&scene, &WorldSettings::default(), &CameraState::default());

        assert_eq!(frame.objects.len(), 2);
        assert_eq!(frame.objects[1].index, 1);
        assert_eq!(frame.objects[1].ignore_lighting, 1);
        assert_eq!(frame.objects[0].ignore_lighting, 0);
        // Clamped to the texture count
        assert_eq!(frame.objects[1].texture_id, 6);
        assert_eq!(frame.objects[0].texture_id, 0);
        assert_eq!(frame.object_bytes().len(), 2 * 160);
    }

    #[test]
    fn test_frame_point_lights_start_with_placeholder() {
        let scene = scene_with_lamp();
        let frame = FrameData::build(&scene, &WorldSettings::default(), &CameraState::default());

        assert_eq!(frame.point_lights.len(), 2);
        assert_eq!(frame.point_lights[0], PointLightUniform::default());
        assert_eq!(frame.point_lights[1].radius, 200.0);
        assert!((frame.point_lights[1].position[1] - 10.0).abs() < 1e-4);
        assert_eq!(frame.globals.point_light_count, 2);
    }

    #[test]
    fn test_frame_mesh_ranges() {
        let scene = scene_with_lamp();
        let frame = FrameData::build(&scene, &WorldSettings::default(), &CameraState::default());

        assert_eq!(frame.ranges[0].vertex_start, 0);
        assert_eq!(frame.ranges[1].vertex_start, 24);
        assert_eq!(frame.ranges[1].index_start, 36);
        assert!(frame.ranges[0].casts_shadow);
        assert!(!frame.ranges[1].casts_shadow);
        assert_eq!(frame.vertices.len(), 48);
        assert_eq!(frame.indices.len(), 72);
    }

    #[test]
    fn test_frame_cascades() {
        let scene = Scene::new("empty");
        let settings = WorldSettings::default();
        let frame = FrameData::build(&scene, &settings, &CameraState::default());

        assert_eq!(frame.light_matrices.len(), settings.cascade_count());
        assert_eq!(frame.globals.cascade_count, 5);
        assert_eq!(frame.light_matrix_bytes().len(), 5 * 64);
        assert_eq!(frame.point_lights.len(), 1);
        assert!(frame.objects.is_empty());
    }

    #[test]
    fn test_render_matrix_is_view_projection_times_world() {
        let mut scene = Scene::new("frame");
        scene.new_cube(CubeOptions::default());
        let frame = FrameData::build(&scene, &WorldSettings::default(), &CameraState::default());

        let expected = view_projection_matrix(&WorldSettings::default(), &CameraState::default())
            .multiply(&world_matrix(scene.objects()[0].pose()))
            .to_cols_array_2d();
        assert_eq!(frame.objects[0].render_matrix, expected);
    }
}
