use super::helpers;
use crate::constants::{DEPTH_FORMAT, SCENE_COLOR_FORMAT};
use crate::core::{
    hex_to_linear, ModelData, BACKDROP_BOTTOM_COLOR, BACKDROP_HALF_SIZE, BACKDROP_TOP_COLOR,
    BACKDROP_Z, DIR_LIGHT_COLOR, DIR_LIGHT_INTENSITY, DIR_LIGHT_POSITION, SPOT_ANGLE, SPOT_DECAY,
    SPOT_DISTANCE, SPOT_INTENSITY, SPOT_PENUMBRA, SPOT_TARGET,
};
use glam::{Mat4, Vec3, Vec4};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    dir_light: [f32; 4],
    dir_light_color: [f32; 4],
    spot_position: [f32; 4],
    spot_color: [f32; 4],
    spot_direction: [f32; 4],
    spot_params: [f32; 4],
    backdrop_bottom: [f32; 4],
    backdrop_top: [f32; 4],
    backdrop_params: [f32; 4],
}

impl SceneUniforms {
    pub(crate) fn new(view_proj: Mat4, spot_position: Vec3, spot_color: Vec3) -> Self {
        let spot_dir = (SPOT_TARGET - spot_position).try_normalize().unwrap_or(Vec3::NEG_Y);
        let inner_angle = SPOT_ANGLE * (1.0 - SPOT_PENUMBRA);
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            dir_light: DIR_LIGHT_POSITION.normalize().extend(DIR_LIGHT_INTENSITY).to_array(),
            dir_light_color: hex_to_linear(DIR_LIGHT_COLOR).extend(1.0).to_array(),
            spot_position: spot_position.extend(SPOT_INTENSITY).to_array(),
            spot_color: spot_color.extend(SPOT_DISTANCE).to_array(),
            spot_direction: spot_dir.extend(SPOT_ANGLE.cos()).to_array(),
            spot_params: [inner_angle.cos(), SPOT_DECAY, 0.0, 0.0],
            backdrop_bottom: hex_to_linear(BACKDROP_BOTTOM_COLOR).extend(1.0).to_array(),
            backdrop_top: hex_to_linear(BACKDROP_TOP_COLOR).extend(1.0).to_array(),
            backdrop_params: [BACKDROP_Z, BACKDROP_HALF_SIZE, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
    base_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

const MODEL_VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// One uploaded primitive, drawn with its node's world matrix.
struct DrawItem {
    node: usize,
    base_color: Vec4,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub(crate) struct SceneResources {
    draw_bgl: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    backdrop_pipeline: wgpu::RenderPipeline,
    model_pipeline: wgpu::RenderPipeline,
    draws: Vec<DrawItem>,
}

impl SceneResources {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let uniform_buffer = helpers::uniform_buffer::<SceneUniforms>(device, "scene_uniforms");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let backdrop_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("backdrop_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let model_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("model_pl"),
            bind_group_layouts: &[&scene_bgl, &draw_bgl],
            push_constant_ranges: &[],
        });
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ModelVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MODEL_VERTEX_ATTRS,
        };
        let backdrop_pipeline = scene_pipeline(device, &backdrop_pl, &shader, "backdrop", &[]);
        let model_pipeline = scene_pipeline(device, &model_pl, &shader, "model", &[vertex_layout]);

        Self {
            draw_bgl,
            uniform_buffer,
            bind_group,
            backdrop_pipeline,
            model_pipeline,
            draws: Vec::new(),
        }
    }

    pub(crate) fn has_model(&self) -> bool {
        !self.draws.is_empty()
    }

    /// Upload every triangle primitive of `model`, replacing any previous one.
    pub(crate) fn upload_model(&mut self, device: &wgpu::Device, model: &ModelData) {
        self.draws.clear();
        for (node_index, node) in model.nodes.iter().enumerate() {
            let Some(prims) = node.mesh.and_then(|m| model.meshes.get(m)) else {
                continue;
            };
            for prim in prims {
                if prim.indices.is_empty() {
                    continue;
                }
                let vertices: Vec<ModelVertex> = prim
                    .positions
                    .iter()
                    .zip(prim.normals.iter().chain(std::iter::repeat(&[0.0, 1.0, 0.0])))
                    .map(|(p, n)| ModelVertex {
                        position: *p,
                        normal: *n,
                    })
                    .collect();
                let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("model_vertices"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("model_indices"),
                    contents: bytemuck::cast_slice(&prim.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                let uniforms = helpers::uniform_buffer::<DrawUniforms>(device, "draw_uniforms");
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("draw_bg"),
                    layout: &self.draw_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniforms.as_entire_binding(),
                    }],
                });
                self.draws.push(DrawItem {
                    node: node_index,
                    base_color: Vec4::from_array(prim.base_color),
                    vertices: vertex_buf,
                    indices: index_buf,
                    index_count: prim.indices.len() as u32,
                    uniforms,
                    bind_group,
                });
            }
        }
        log::info!("[gpu] uploaded {} model draw(s)", self.draws.len());
    }

    pub(crate) fn write_uniforms(
        &self,
        queue: &wgpu::Queue,
        scene: &SceneUniforms,
        placement: Mat4,
        node_matrices: &[Mat4],
    ) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(scene));
        for draw in &self.draws {
            let local = node_matrices.get(draw.node).copied().unwrap_or(Mat4::IDENTITY);
            let model = placement * local;
            let u = DrawUniforms {
                model: model.to_cols_array_2d(),
                normal: model.inverse().transpose().to_cols_array_2d(),
                base_color: draw.base_color.to_array(),
            };
            queue.write_buffer(&draw.uniforms, 0, bytemuck::bytes_of(&u));
        }
    }

    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        draw_model: bool,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_pipeline(&self.backdrop_pipeline);
        rpass.draw(0..6, 0..1);
        if draw_model {
            rpass.set_pipeline(&self.model_pipeline);
            for draw in &self.draws {
                rpass.set_bind_group(1, &draw.bind_group, &[]);
                rpass.set_vertex_buffer(0, draw.vertices.slice(..));
                rpass.set_index_buffer(draw.indices.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..draw.index_count, 0, 0..1);
            }
        }
    }
}

fn scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    name: &str,
    buffers: &[wgpu::VertexBufferLayout<'_>],
) -> wgpu::RenderPipeline {
    let vs = format!("vs_{name}");
    let fs = format!("fs_{name}");
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(name),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs.as_str()),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs.as_str()),
            targets: &[Some(wgpu::ColorTargetState {
                format: SCENE_COLOR_FORMAT,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
