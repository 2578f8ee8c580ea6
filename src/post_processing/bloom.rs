//! Bloom: glow around bright areas followed by Reinhard tone mapping.

use crate::config::BloomSettings;
use crate::viewport::{ResizeObserver, ResizeSubscription, Viewport};
use bytemuck::{Pod, Zeroable};
use kiss3d::context::Context;
use kiss3d::post_processing::{PostProcessingContext, PostProcessingEffect};
use kiss3d::resource::RenderTarget;
use std::cell::Cell;
use std::rc::Rc;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct QuadVertex {
    position: [f32; 2],
}

/// Uniform block read by `bloom.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BloomUniforms {
    /// Size of one pixel in texture coordinates.
    pub texel_size: [f32; 2],
    /// Luminance above which pixels glow.
    pub threshold: f32,
    /// Glow intensity.
    pub strength: f32,
    /// Glow spread.
    pub radius: f32,
    /// Linear exposure applied before tone mapping.
    pub exposure: f32,
    _padding: [f32; 2],
}

impl BloomUniforms {
    /// Packs `settings` for a surface of size `viewport`.
    pub fn new(settings: &BloomSettings, viewport: Viewport) -> Self {
        BloomUniforms {
            texel_size: viewport.texel_size(),
            threshold: settings.threshold,
            strength: settings.strength,
            radius: settings.radius,
            exposure: settings.tone_mapping_exposure(),
            _padding: [0.0; 2],
        }
    }
}

/// Full-screen bloom effect.
///
/// The texel size used to spread the glow follows the viewport registered through
/// [`Bloom::track_viewport`].
pub struct Bloom {
    settings: BloomSettings,
    viewport: Rc<Cell<Viewport>>,
    pipeline: wgpu::RenderPipeline,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
}

impl Bloom {
    /// Creates the effect's GPU resources.
    pub fn new(settings: BloomSettings) -> Bloom {
        let ctxt = Context::get();

        let texture_bind_group_layout =
            ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("bloom_texture_bind_group_layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let uniform_bind_group_layout =
            ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("bloom_uniform_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let pipeline_layout = ctxt.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("bloom_pipeline_layout"),
            bind_group_layouts: &[&texture_bind_group_layout, &uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = ctxt.create_shader_module(Some("bloom_shader"), include_str!("bloom.wgsl"));

        let vertex_buffer_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        };

        let pipeline = ctxt.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("bloom_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_buffer_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctxt.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let corners = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];
        let vertices = corners.map(|position| QuadVertex { position });
        let vertex_buffer = ctxt.create_buffer_init(
            Some("bloom_vertex_buffer"),
            bytemuck::cast_slice(&vertices),
            wgpu::BufferUsages::VERTEX,
        );

        let uniform_buffer = ctxt.create_buffer_simple(
            Some("bloom_uniform_buffer"),
            std::mem::size_of::<BloomUniforms>() as u64,
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let uniform_bind_group = ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bloom_uniform_bind_group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Bloom {
            settings,
            viewport: Rc::new(Cell::new(Viewport::default())),
            pipeline,
            texture_bind_group_layout,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
        }
    }

    /// The current settings.
    pub fn settings(&self) -> &BloomSettings {
        &self.settings
    }

    /// Replaces the settings; they are uploaded with the next draw.
    pub fn set_settings(&mut self, settings: BloomSettings) {
        self.settings = settings;
    }

    /// Keeps the glow spread in sync with the size reported by `observer`.
    #[must_use = "dropping the subscription stops tracking the viewport"]
    pub fn track_viewport(&self, observer: &ResizeObserver) -> ResizeSubscription {
        let viewport = self.viewport.clone();
        observer.subscribe(move |v| viewport.set(v))
    }

    /// The uniforms the next draw uploads.
    pub fn uniforms(&self) -> BloomUniforms {
        BloomUniforms::new(&self.settings, self.viewport.get())
    }
}

impl PostProcessingEffect for Bloom {
    fn update(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32) {}

    fn draw(&mut self, target: &RenderTarget, context: &mut PostProcessingContext) {
        let ctxt = Context::get();

        let (color_view, sampler) = match target {
            RenderTarget::Offscreen(o) => (&o.color_view, &o.sampler),
            RenderTarget::Screen => return,
        };

        ctxt.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.uniforms()),
        );

        let texture_bind_group = ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bloom_texture_bind_group"),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        let mut render_pass = context
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("bloom_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: context.output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &texture_bind_group, &[]);
        render_pass.set_bind_group(1, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..4, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_match_the_shader_layout() {
        assert_eq!(std::mem::size_of::<BloomUniforms>(), 32);
    }

    #[test]
    fn uniforms_follow_settings_and_viewport() {
        let uniforms = BloomUniforms::new(&BloomSettings::default(), Viewport::new(800, 400));
        assert_eq!(uniforms.texel_size, [1.0 / 800.0, 1.0 / 400.0]);
        assert_eq!(uniforms.strength, 3.0);
        assert_eq!(uniforms.radius, 1.2);
        assert_eq!(uniforms.threshold, 0.0);
        assert!((uniforms.exposure - 10.4976).abs() < 1.0e-3);
    }
}
