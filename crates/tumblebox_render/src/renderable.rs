//! Renderable scene - bridges the scene graph to GPU buffers
//!
//! Meshes are uploaded once per name. Every drawn entity gets its own small
//! uniform buffer, kept per node in a `SecondaryMap` and refreshed each frame.

use std::collections::HashMap;

use slotmap::SecondaryMap;
use tumblebox_math::mat4;
use tumblebox_scene::{Colour, LightKind, Material, NodeKey, SceneGraph};
use wgpu::util::DeviceExt;

use crate::context::RenderContext;
use crate::mesh::{aabb_lines, MeshData};
use crate::pipeline::types::{LIGHT_DIRECTIONAL, LIGHT_POINT, LIGHT_SPOT};
use crate::pipeline::{
    GpuLight, LineVertex, ObjectUniforms, ScenePipeline, SceneUniforms, MAX_LIGHTS,
};

/// Colour of bounding box wireframes
const BOUNDS_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// A mesh resident on the GPU
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Uniforms for one drawn entity
struct ObjectBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws a scene graph
pub struct SceneRenderer {
    pipeline: ScenePipeline,
    meshes: HashMap<String, GpuMesh>,
    objects: SecondaryMap<NodeKey, Vec<ObjectBinding>>,
}

impl SceneRenderer {
    pub fn new(context: &RenderContext) -> Self {
        let mut pipeline = ScenePipeline::new(&context.device, context.config.format);
        pipeline.ensure_depth_texture(&context.device, context.config.width, context.config.height);
        Self {
            pipeline,
            meshes: HashMap::new(),
            objects: SecondaryMap::new(),
        }
    }

    /// Recreate size-dependent resources
    pub fn resize(&mut self, context: &RenderContext) {
        self.pipeline
            .ensure_depth_texture(&context.device, context.config.width, context.config.height);
    }

    /// Number of meshes uploaded so far
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    fn ensure_mesh(&mut self, device: &wgpu::Device, graph: &SceneGraph, name: &str) -> bool {
        if self.meshes.contains_key(name) {
            return true;
        }
        let Some(shape) = graph.meshes().get(name) else {
            log::warn!("Mesh '{}' is not registered; skipping", name);
            return false;
        };
        let data = MeshData::from_shape(shape);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(name),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(name),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        log::info!(
            "Uploaded mesh '{}': {} vertices, {} indices",
            name,
            data.vertex_count(),
            data.index_count()
        );
        self.meshes.insert(
            name.to_string(),
            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: data.index_count() as u32,
            },
        );
        true
    }

    /// Refresh per-entity uniforms and return the draw list
    fn prepare_objects(
        &mut self,
        context: &RenderContext,
        graph: &SceneGraph,
    ) -> Vec<(NodeKey, usize, String)> {
        // Forget nodes that were removed from the graph
        self.objects.retain(|key, _| graph.contains(key));

        let mut draws = Vec::new();
        for (key, node) in graph.renderables() {
            let Some(world) = graph.world_transform(key) else {
                continue;
            };
            let model = mat4::from_trs(world.position, world.orientation, world.scale);

            for (index, entity) in node.entities().enumerate() {
                if !self.ensure_mesh(&context.device, graph, entity.mesh_name()) {
                    continue;
                }
                let bindings = match self.objects.entry(key) {
                    Some(entry) => entry.or_default(),
                    None => continue,
                };
                while bindings.len() <= index {
                    let (buffer, bind_group) = self.pipeline.create_object_binding(&context.device);
                    bindings.push(ObjectBinding { buffer, bind_group });
                }

                let material = graph.materials().get_or_default(entity.material_name());
                let uniforms = object_uniforms(model, material);
                context
                    .queue
                    .write_buffer(&bindings[index].buffer, 0, bytemuck::bytes_of(&uniforms));
                draws.push((key, index, entity.mesh_name().to_string()));
            }
        }
        draws
    }

    /// Render one frame of `graph` as seen from the camera on `camera_node`
    pub fn render(
        &mut self,
        context: &RenderContext,
        graph: &SceneGraph,
        camera_node: NodeKey,
    ) -> Result<(), wgpu::SurfaceError> {
        let Some(uniforms) = scene_uniforms(graph, camera_node) else {
            log::warn!("Camera node {:?} has no camera; nothing to draw", camera_node);
            return Ok(());
        };
        self.pipeline.update_scene_uniforms(&context.queue, &uniforms);

        let draws = self.prepare_objects(context, graph);
        let lines = bounding_box_lines(graph);
        let line_buffer = (!lines.is_empty()).then(|| {
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Bounding Box Lines"),
                    contents: bytemuck::cast_slice(&lines),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let output = context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let Some(depth_view) = self.pipeline.depth_view() else {
                log::error!("Depth texture missing; skipping frame");
                return Ok(());
            };
            let bg = graph.background;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg.r as f64,
                            g: bg.g as f64,
                            b: bg.b as f64,
                            a: bg.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(self.pipeline.mesh_pipeline());
            render_pass.set_bind_group(0, self.pipeline.scene_bind_group(), &[]);
            for (key, index, mesh_name) in &draws {
                let (Some(mesh), Some(binding)) = (
                    self.meshes.get(mesh_name),
                    self.objects.get(*key).and_then(|b| b.get(*index)),
                ) else {
                    continue;
                };
                render_pass.set_bind_group(1, &binding.bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }

            if let Some(line_buffer) = &line_buffer {
                render_pass.set_pipeline(self.pipeline.line_pipeline());
                render_pass.set_bind_group(0, self.pipeline.scene_bind_group(), &[]);
                render_pass.set_vertex_buffer(0, line_buffer.slice(..));
                render_pass.draw(0..lines.len() as u32, 0..1);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Per-frame uniforms: camera matrices, ambient light and up to
/// [`MAX_LIGHTS`] lights
///
/// Returns `None` if the node does not exist or carries no camera.
pub fn scene_uniforms(graph: &SceneGraph, camera_node: NodeKey) -> Option<SceneUniforms> {
    let camera = graph.node(camera_node)?.camera()?;
    let pose = graph.world_transform(camera_node)?;

    let view = mat4::view_from_pose(pose.position, pose.orientation);
    let proj = camera.projection_matrix();

    let mut uniforms = SceneUniforms {
        view_proj: mat4::mul(&proj, &view),
        camera_position: [pose.position.x, pose.position.y, pose.position.z, 1.0],
        ambient: graph.ambient_light.to_array(),
        ..Default::default()
    };

    let lights = collect_lights(graph);
    if lights.len() > MAX_LIGHTS {
        log::debug!("{} lights in scene, using the first {}", lights.len(), MAX_LIGHTS);
    }
    let count = lights.len().min(MAX_LIGHTS);
    uniforms.lights[..count].copy_from_slice(&lights[..count]);
    uniforms.light_count[0] = count as u32;
    Some(uniforms)
}

/// Every light in the graph in its world-space position and direction
pub fn collect_lights(graph: &SceneGraph) -> Vec<GpuLight> {
    graph
        .lights()
        .filter_map(|(key, light)| {
            let pose = graph.world_transform(key)?;
            let dir = pose.orientation.rotate(tumblebox_math::Vec3::NEG_Z).normalized();
            let p = pose.position;
            let (kind, cos_inner, cos_outer, w) = match light.kind {
                LightKind::Point => (LIGHT_POINT, 0.0, 0.0, 1.0),
                LightKind::Directional => (LIGHT_DIRECTIONAL, 0.0, 0.0, 0.0),
                LightKind::Spotlight { inner, outer } => {
                    (LIGHT_SPOT, (inner * 0.5).cos(), (outer * 0.5).cos(), 1.0)
                }
            };
            Some(GpuLight {
                position: [p.x, p.y, p.z, w],
                direction: [dir.x, dir.y, dir.z, 0.0],
                diffuse: light.diffuse.to_array(),
                specular: light.specular.to_array(),
                spot: [cos_inner, cos_outer, kind, 0.0],
            })
        })
        .collect()
}

/// Object uniforms for an entity with the given model matrix and material
pub fn object_uniforms(model: mat4::Mat4, material: &Material) -> ObjectUniforms {
    let checker = match material.checker {
        Some(Colour { r, g, b, .. }) => [r, g, b, 1.0],
        None => [0.0; 4],
    };
    ObjectUniforms {
        model,
        diffuse: material.diffuse.to_array(),
        specular: material.specular.to_array(),
        checker,
    }
}

/// Wireframe boxes for every node that asks for one
pub fn bounding_box_lines(graph: &SceneGraph) -> Vec<LineVertex> {
    graph
        .iter()
        .filter(|(_, node)| node.show_bounding_box)
        .flat_map(|(_, node)| aabb_lines(&node.world_aabb(), BOUNDS_COLOR))
        .collect()
}
