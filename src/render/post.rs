use super::helpers;
use crate::core::{
    GlitchParams, GLITCH_DISPLACEMENT_SIZE, SCANLINE_DENSITY, SCANLINE_INTENSITY, SCANLINE_SPEED,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlitchUniforms {
    seed: f32,
    amount: f32,
    angle: f32,
    seed_x: f32,
    seed_y: f32,
    distortion_x: f32,
    distortion_y: f32,
    col_s: f32,
    bypass: f32,
    _pad: [f32; 3],
}

impl From<&GlitchParams> for GlitchUniforms {
    fn from(p: &GlitchParams) -> Self {
        Self {
            seed: p.seed,
            amount: p.amount,
            angle: p.angle,
            seed_x: p.seed_x,
            seed_y: p.seed_y,
            distortion_x: p.distortion_x,
            distortion_y: p.distortion_y,
            col_s: p.col_s,
            bypass: if p.bypass { 1.0 } else { 0.0 },
            _pad: [0.0; 3],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ScanlineUniforms {
    time: f32,
    intensity: f32,
    density: f32,
    speed: f32,
}

impl ScanlineUniforms {
    pub(crate) fn at(time: f32) -> Self {
        Self {
            time,
            intensity: SCANLINE_INTENSITY,
            density: SCANLINE_DENSITY,
            speed: SCANLINE_SPEED,
        }
    }
}

/// Glitch and scanline passes. Bind groups reference the offscreen targets
/// and are rebuilt whenever those are recreated.
pub(crate) struct PostResources {
    glitch_bgl: wgpu::BindGroupLayout,
    scan_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    pub(crate) glitch_uniforms: wgpu::Buffer,
    pub(crate) scan_uniforms: wgpu::Buffer,
    _displacement: wgpu::Texture,
    displacement_view: wgpu::TextureView,
    pub(crate) glitch_pipeline: wgpu::RenderPipeline,
    pub(crate) scan_pipeline: wgpu::RenderPipeline,
    pub(crate) glitch_bg: wgpu::BindGroup,
    pub(crate) scan_bg: wgpu::BindGroup,
}

impl PostResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene_view: &wgpu::TextureView,
        glitch_view: &wgpu::TextureView,
        glitch_format: wgpu::TextureFormat,
        swap_format: wgpu::TextureFormat,
        displacement: &[u8],
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("post_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let glitch_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glitch_bgl"),
            entries: &[
                helpers::texture_entry(0),
                helpers::sampler_entry(1),
                helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
                helpers::texture_entry(3),
            ],
        });
        let scan_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scanline_bgl"),
            entries: &[
                helpers::texture_entry(0),
                helpers::sampler_entry(1),
                helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
            ],
        });

        let glitch_uniforms = helpers::uniform_buffer::<GlitchUniforms>(device, "glitch_uniforms");
        let scan_uniforms =
            helpers::uniform_buffer::<ScanlineUniforms>(device, "scanline_uniforms");

        let size = GLITCH_DISPLACEMENT_SIZE;
        let (displacement_tex, displacement_view) = helpers::create_color_texture(
            device,
            "glitch_displacement",
            size,
            size,
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &displacement_tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            displacement,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * size),
                rows_per_image: Some(size),
            },
            wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
        );

        let glitch_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glitch_pl"),
            bind_group_layouts: &[&glitch_bgl],
            push_constant_ranges: &[],
        });
        let scan_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scanline_pl"),
            bind_group_layouts: &[&scan_bgl],
            push_constant_ranges: &[],
        });
        let glitch_pipeline =
            helpers::make_post_pipeline(device, &glitch_pl, &shader, "fs_glitch", glitch_format);
        let scan_pipeline =
            helpers::make_post_pipeline(device, &scan_pl, &shader, "fs_scanlines", swap_format);

        let glitch_bg = glitch_bind_group(
            device,
            &glitch_bgl,
            scene_view,
            &sampler,
            &glitch_uniforms,
            &displacement_view,
        );
        let scan_bg = scan_bind_group(device, &scan_bgl, glitch_view, &sampler, &scan_uniforms);

        Self {
            glitch_bgl,
            scan_bgl,
            sampler,
            glitch_uniforms,
            scan_uniforms,
            _displacement: displacement_tex,
            displacement_view,
            glitch_pipeline,
            scan_pipeline,
            glitch_bg,
            scan_bg,
        }
    }

    pub(crate) fn rebuild_bind_groups(
        &mut self,
        device: &wgpu::Device,
        scene_view: &wgpu::TextureView,
        glitch_view: &wgpu::TextureView,
    ) {
        self.glitch_bg = glitch_bind_group(
            device,
            &self.glitch_bgl,
            scene_view,
            &self.sampler,
            &self.glitch_uniforms,
            &self.displacement_view,
        );
        self.scan_bg = scan_bind_group(
            device,
            &self.scan_bgl,
            glitch_view,
            &self.sampler,
            &self.scan_uniforms,
        );
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, glitch: &GlitchParams, time: f32) {
        queue.write_buffer(
            &self.glitch_uniforms,
            0,
            bytemuck::bytes_of(&GlitchUniforms::from(glitch)),
        );
        queue.write_buffer(
            &self.scan_uniforms,
            0,
            bytemuck::bytes_of(&ScanlineUniforms::at(time)),
        );
    }
}

fn glitch_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    src: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    uniforms: &wgpu::Buffer,
    displacement: &wgpu::TextureView,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("glitch_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(src),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(displacement),
            },
        ],
    })
}

fn scan_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    src: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    uniforms: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scanline_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(src),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniforms.as_entire_binding(),
            },
        ],
    })
}
