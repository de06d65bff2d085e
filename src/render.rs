use crate::constants::{MAX_FRAME_LATENCY, RING_SLOTS, TUBE_LAYER_SLOTS};
use glam::Mat4;
use tunnel_core::{Camera, FrameSubmission, RenderError, Renderer};
use web_sys as web;

mod helpers;

static TUNNEL_WGSL: &str = include_str!("../shaders/tunnel.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct DrawUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    tint: [f32; 4],
}

/// GPU-side buffers for one mesh. Buffers only ever grow; the index buffer
/// is uploaded once because tube and ring topology never change.
struct DrawSlot {
    label: &'static str,
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
    indices: wgpu::Buffer,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_capacity: usize,
    index_capacity: usize,
    index_count: u32,
    indices_uploaded: bool,
    visible: bool,
}

impl DrawSlot {
    fn new(device: &wgpu::Device, bgl: &wgpu::BindGroupLayout, label: &'static str) -> Self {
        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<DrawUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        Self {
            label,
            positions: helpers::create_vertex_buffer(device, label, 0),
            colors: helpers::create_vertex_buffer(device, label, 0),
            indices: helpers::create_index_buffer(device, label, 0),
            uniforms,
            bind_group,
            vertex_capacity: 0,
            index_capacity: 0,
            index_count: 0,
            indices_uploaded: false,
            visible: false,
        }
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, vertices: usize, indices: usize) {
        if vertices > self.vertex_capacity {
            self.positions = helpers::create_vertex_buffer(device, self.label, vertices);
            self.colors = helpers::create_vertex_buffer(device, self.label, vertices);
            self.vertex_capacity = vertices;
        }
        if indices > self.index_capacity {
            self.indices = helpers::create_index_buffer(device, self.label, indices);
            self.index_capacity = indices;
            self.indices_uploaded = false;
        }
    }

    fn upload(
        &mut self,
        queue: &wgpu::Queue,
        positions: &[[f32; 3]],
        colors: &[[f32; 3]],
        indices: &[u32],
        uniforms: &DrawUniforms,
    ) {
        queue.write_buffer(&self.positions, 0, bytemuck::cast_slice(positions));
        queue.write_buffer(&self.colors, 0, bytemuck::cast_slice(colors));
        if !self.indices_uploaded || self.index_count as usize != indices.len() {
            queue.write_buffer(&self.indices, 0, bytemuck::cast_slice(indices));
            self.index_count = indices.len() as u32;
            self.indices_uploaded = true;
        }
        queue.write_buffer(&self.uniforms, 0, bytemuck::bytes_of(uniforms));
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    layers: Vec<DrawSlot>,
    rings: Vec<DrawSlot>,
    // Rings are flat-colored; their tint does the work.
    white: Vec<[f32; 3]>,
    camera: Option<Camera>,
    clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        // Vertex colors are linear, so prefer an sRGB swapchain.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: MAX_FRAME_LATENCY,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tunnel_shader"),
            source: wgpu::ShaderSource::Wgsl(TUNNEL_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tunnel_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tunnel_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_tunnel_pipeline(&device, &pl, &shader, format);

        let layer_labels = ["outer_layer", "inner_layer"];
        let ring_labels = ["ring_0", "ring_1", "ring_2", "ring_3"];
        let layers = layer_labels
            .iter()
            .take(TUBE_LAYER_SLOTS)
            .map(|&l| DrawSlot::new(&device, &bgl, l))
            .collect();
        let rings = ring_labels
            .iter()
            .take(RING_SLOTS)
            .map(|&l| DrawSlot::new(&device, &bgl, l))
            .collect();
        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            layers,
            rings,
            white: Vec::new(),
            camera: None,
            clear_color: wgpu::Color::BLACK,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn view_proj(&self) -> [[f32; 4]; 4] {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        self.camera
            .as_ref()
            .map(|c| c.view_projection(aspect))
            .unwrap_or(Mat4::IDENTITY)
            .to_cols_array_2d()
    }

    /// Present one frame of nothing but the clear color.
    pub fn present_clear(&mut self) {
        for slot in self.layers.iter_mut().chain(self.rings.iter_mut()) {
            slot.visible = false;
        }
        if let Err(e) = self.draw() {
            log::warn!("[gpu] final clear skipped: {e}");
        }
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(RenderError::SurfaceLost);
            }
            Err(e) => return Err(RenderError::Backend(format!("{:?}", e))),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tunnel_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            // Outer first, then inner, then rings: back to front along the view.
            for slot in self
                .layers
                .iter()
                .chain(self.rings.iter())
                .filter(|s| s.visible && s.index_count > 0)
            {
                rpass.set_bind_group(0, &slot.bind_group, &[]);
                rpass.set_vertex_buffer(0, slot.positions.slice(..));
                rpass.set_vertex_buffer(1, slot.colors.slice(..));
                rpass.set_index_buffer(slot.indices.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..slot.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl Renderer for GpuState {
    fn set_camera(&mut self, camera: &Camera) {
        self.camera = Some(camera.clone());
    }

    fn set_clear_color(&mut self, rgba: [f32; 4]) {
        self.clear_color = wgpu::Color {
            r: rgba[0] as f64,
            g: rgba[1] as f64,
            b: rgba[2] as f64,
            a: rgba[3] as f64,
        };
    }

    fn submit(&mut self, frame: &FrameSubmission<'_>) -> Result<(), RenderError> {
        let view_proj = self.view_proj();
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        for (slot, layer) in self.layers.iter_mut().zip(frame.layers.iter()) {
            slot.visible = layer.opacity > 0.0;
            if !slot.visible {
                continue;
            }
            slot.ensure_capacity(&self.device, layer.positions.len(), layer.indices.len());
            slot.upload(
                &self.queue,
                layer.positions,
                layer.colors,
                layer.indices,
                &DrawUniforms {
                    view_proj,
                    model: identity,
                    tint: [1.0, 1.0, 1.0, layer.opacity],
                },
            );
        }
        for (i, slot) in self.rings.iter_mut().enumerate() {
            let Some(ring) = frame.rings.get(i).filter(|r| r.opacity > 0.0) else {
                slot.visible = false;
                continue;
            };
            if self.white.len() < ring.positions.len() {
                self.white.resize(ring.positions.len(), [1.0; 3]);
            }
            slot.ensure_capacity(&self.device, ring.positions.len(), ring.indices.len());
            slot.upload(
                &self.queue,
                ring.positions,
                &self.white[..ring.positions.len()],
                ring.indices,
                &DrawUniforms {
                    view_proj,
                    model: ring.transform.to_cols_array_2d(),
                    tint: [ring.color[0], ring.color[1], ring.color[2], ring.opacity],
                },
            );
            slot.visible = true;
        }
        if frame.rings.len() > self.rings.len() {
            log::trace!(
                "[gpu] {} ring accents exceed {} slots",
                frame.rings.len(),
                self.rings.len()
            );
        }
        self.draw()
    }
}
