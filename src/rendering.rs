//! Display system: uploads the CPU surfaces as textures and stretches them
//! into their viewports with nearest-neighbor sampling.

use std::sync::Arc;

use winit::window::Window;

use crate::compositor::{Layout, Rect};
use crate::error::DisplayError;
use crate::surface::Surface;

/// The three displayed surfaces, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Field,
    Graph,
    Screen,
}

impl LayerKind {
    const ALL: [LayerKind; 3] = [LayerKind::Field, LayerKind::Graph, LayerKind::Screen];

    fn index(self) -> usize {
        match self {
            LayerKind::Field => 0,
            LayerKind::Graph => 1,
            LayerKind::Screen => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            LayerKind::Field => "Field Layer",
            LayerKind::Graph => "Graph Layer",
            LayerKind::Screen => "Screen Layer",
        }
    }

    fn rect(self, layout: &Layout) -> Rect {
        match self {
            LayerKind::Field => layout.field,
            LayerKind::Graph => layout.graph,
            LayerKind::Screen => layout.screen,
        }
    }
}

/// GPU texture holding one surface, recreated only when its size changes
struct Layer {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

/// Rendering system managing wgpu device, pipeline and layer textures
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    opaque_pipeline: wgpu::RenderPipeline,
    overlay_pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    layers: [Option<Layer>; 3],
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(window: Arc<Window>) -> Result<Self, DisplayError> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance.create_surface(window)?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(DisplayError::NoAdapter)?;

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("blit.wgsl").into()),
        });

        // Field buffer is upscaled by the display: nearest keeps pixels crisp
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Layer Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Layer Bind Group Layout"),
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let opaque_pipeline =
            create_blit_pipeline(&device, &pipeline_layout, &shader, config.format, None);
        let overlay_pipeline = create_blit_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            opaque_pipeline,
            overlay_pipeline,
            bind_group_layout,
            sampler,
            layers: [None, None, None],
        })
    }

    /// Reconfigure the swapchain after a window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload a surface's pixels into its layer texture
    pub fn upload(&mut self, kind: LayerKind, surface: &Surface) {
        let size = (surface.width(), surface.height());
        if size.0 == 0 || size.1 == 0 {
            self.layers[kind.index()] = None;
            return;
        }

        let needs_texture = self.layers[kind.index()]
            .as_ref()
            .map_or(true, |layer| layer.size != size);
        if needs_texture {
            self.layers[kind.index()] = Some(self.create_layer(kind, size));
        }

        if let Some(layer) = &self.layers[kind.index()] {
            self.queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &layer.texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                surface.as_bytes(),
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(size.0 * 4),
                    rows_per_image: Some(size.1),
                },
                wgpu::Extent3d {
                    width: size.0,
                    height: size.1,
                    depth_or_array_layers: 1,
                },
            );
        }
    }

    /// Draw all uploaded layers into their layout rectangles and present
    pub fn render(&self, layout: &Layout) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for kind in LayerKind::ALL {
                let Some(layer) = &self.layers[kind.index()] else {
                    continue;
                };
                let Some(rect) = self.clip_to_target(kind.rect(layout)) else {
                    continue;
                };

                let pipeline = match kind {
                    LayerKind::Graph => &self.overlay_pipeline,
                    LayerKind::Field | LayerKind::Screen => &self.opaque_pipeline,
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &layer.bind_group, &[]);
                render_pass.set_viewport(
                    rect.x as f32,
                    rect.y as f32,
                    rect.width as f32,
                    rect.height as f32,
                    0.0,
                    1.0,
                );
                render_pass.draw(0..3, 0..1); // Fullscreen triangle
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Reconfigure with the current size (after a lost/outdated surface)
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Viewports must stay inside the render target
    fn clip_to_target(&self, rect: Rect) -> Option<Rect> {
        let right = (rect.x + rect.width).min(self.config.width);
        let bottom = (rect.y + rect.height).min(self.config.height);
        let clipped = Rect {
            x: rect.x,
            y: rect.y,
            width: right.saturating_sub(rect.x),
            height: bottom.saturating_sub(rect.y),
        };
        (!clipped.is_empty()).then_some(clipped)
    }

    fn create_layer(&self, kind: LayerKind, size: (u32, u32)) -> Layer {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(kind.label()),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(kind.label()),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        log::debug!("{} texture {}x{}", kind.label(), size.0, size.1);

        Layer {
            texture,
            bind_group,
            size,
        }
    }
}

fn create_blit_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(if blend.is_some() {
            "Overlay Blit Pipeline"
        } else {
            "Opaque Blit Pipeline"
        }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
