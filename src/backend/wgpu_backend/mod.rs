//! wgpu renderer
//!
//! Uploads the capture once and draws it with a single fullscreen triangle.
//! All camera and lamp math happens in the fragment shader from the uniform
//! block built out of each [`FrameSnapshot`].

use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::backend::traits::{MagnifierUniforms, Renderer};
use crate::capture::Screenshot;
use crate::error::{MagnifierError, Result};
use crate::frame::FrameSnapshot;

/// wgpu implementation of [`Renderer`]
pub struct WgpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    image_size: (u32, u32),
}

impl WgpuRenderer {
    /// Create the renderer for `window`, blocking on adapter and device
    /// requests.
    pub fn new(window: Arc<winit::window::Window>, screenshot: &Screenshot, vsync: bool) -> Result<Self> {
        pollster::block_on(Self::new_async(window, screenshot, vsync))
    }

    pub async fn new_async(
        window: Arc<winit::window::Window>,
        screenshot: &Screenshot,
        vsync: bool,
    ) -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());

        let size = window.inner_size();
        let surface = instance
            .create_surface(window)
            .map_err(|e| MagnifierError::SurfaceCreation(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(MagnifierError::NoAdapter)?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using adapter: {} ({:?} backend)",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Magnifier Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await
            .map_err(|e| MagnifierError::DeviceCreation(e.to_string()))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| MagnifierError::SurfaceCreation("surface reports no formats".into()))?;

        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        log::info!(
            "Surface configured: {}x{} {:?}, vsync={}",
            surface_config.width,
            surface_config.height,
            surface_format,
            vsync
        );

        // Captured bytes are already display-encoded; keep them that way.
        let texture_format = if surface_format.is_srgb() {
            wgpu::TextureFormat::Bgra8UnormSrgb
        } else {
            wgpu::TextureFormat::Bgra8Unorm
        };
        let image_size = (screenshot.width(), screenshot.height());
        let texture_view = Self::upload_screenshot(&device, &queue, screenshot, texture_format);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Desktop Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniforms =
            MagnifierUniforms::new(&FrameSnapshot::default(), image_size.0, image_size.1);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Magnifier Uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Magnifier Bind Group Layout"),
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
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Magnifier Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Magnifier Shader"),
            source: wgpu::ShaderSource::Wgsl(MAGNIFIER_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Magnifier Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Magnifier Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            pipeline,
            bind_group,
            uniform_buffer,
            image_size,
        })
    }

    /// Copy the capture into a sampled texture. This is the only write the
    /// capture ever sees on the GPU side.
    fn upload_screenshot(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        screenshot: &Screenshot,
        format: wgpu::TextureFormat,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: screenshot.width(),
            height: screenshot.height(),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Desktop Capture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            screenshot.pixels(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(screenshot.width() * 4),
                rows_per_image: Some(screenshot.height()),
            },
            size,
        );

        log::info!(
            "Uploaded {}x{} capture as {:?}",
            screenshot.width(),
            screenshot.height(),
            format
        );

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }
}

impl Renderer for WgpuRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if self.surface_config.width == width && self.surface_config.height == height {
            return;
        }

        let max_size = self.device.limits().max_texture_dimension_2d;
        self.surface_config.width = width.min(max_size);
        self.surface_config.height = height.min(max_size);
        self.reconfigure();
    }

    fn render(&mut self, snapshot: &FrameSnapshot) -> Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring swapchain texture, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(MagnifierError::Render(e.to_string())),
        };

        let uniforms = MagnifierUniforms::new(snapshot, self.image_size.0, self.image_size.1);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Magnifier Pass"),
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
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

pub const MAGNIFIER_SHADER: &str = r#"
struct MagnifierParams {
    camera: vec2<f32>,
    image_size: vec2<f32>,
    lamp_position: vec2<f32>,
    scale: f32,
    lamp_radius: f32,
    lamp_shadow: f32,
    time: f32,
    _padding: vec2<f32>,
}

@group(0) @binding(0) var desktop_texture: texture_2d<f32>;
@group(0) @binding(1) var desktop_sampler: sampler;
@group(0) @binding(2) var<uniform> params: MagnifierParams;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var output: VertexOutput;
    let x = f32((vertex_index << 1u) & 2u);
    let y = f32(vertex_index & 2u);
    output.position = vec4<f32>(x * 2.0 - 1.0, y * 2.0 - 1.0, 0.0, 1.0);
    return output;
}

// Slowly shifting backdrop for the area outside the capture
fn background(screen: vec2<f32>) -> vec3<f32> {
    let wave = 0.5 + 0.5 * sin(params.time * 0.5 + (screen.x + screen.y) * 0.002);
    return mix(vec3<f32>(0.05, 0.05, 0.08), vec3<f32>(0.12, 0.10, 0.16), wave);
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let screen = input.position.xy;

    // screen -> image pixels, same mapping as CameraState::screen_to_world
    let world = (screen - params.camera) / params.scale;
    let uv = world / params.image_size;

    let sampled = textureSampleLevel(desktop_texture, desktop_sampler, uv, 0.0).rgb;
    let inside = all(uv >= vec2<f32>(0.0)) && all(uv <= vec2<f32>(1.0));
    var color = select(background(screen), sampled, inside);

    if (distance(screen, params.lamp_position) > params.lamp_radius) {
        color = color * (1.0 - params.lamp_shadow);
    }

    return vec4<f32>(color, 1.0);
}
"#;
