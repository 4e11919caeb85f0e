//! SDF-based WebGPU render pipeline
//!
//! Ray-marches the whole 3D scene in the fragment shader using signed
//! distance fields. The scene is tiny (a ground slab, the river, one sphere and
//! a handful of boxes) so a single fullscreen triangle is enough.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::consts::*;
use crate::sim::{GameState, Mover};

/// Maximum number of movers (obstacles + platforms) the shader knows about
const MAX_MOVERS: usize = 16;

/// Mover kinds (must match shader)
const KIND_OBSTACLE: f32 = 0.0;
const KIND_PLATFORM: f32 = 1.0;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2], // offset 0
    time: f32,            // offset 8
    game_over: u32,       // offset 12
    player: [f32; 4],     // offset 16 - xyz + radius
    mover_count: u32,     // offset 32
    _pad: [u32; 3],       // pad to 48 bytes
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct MoverData {
    center: [f32; 4],       // xyz + unused
    half_extents: [f32; 4], // xyz + kind
}

const EMPTY_MOVER: MoverData = MoverData {
    center: [0.0; 4],
    half_extents: [0.0; 4],
};

impl MoverData {
    fn new(mover: &Mover, size: glam::Vec3, kind: f32) -> Self {
        let half = size * 0.5;
        Self {
            center: [mover.pos.x, mover.pos.y, mover.pos.z, 0.0],
            half_extents: [half.x, half.y, half.z, kind],
        }
    }
}

// ============================================================================
// SCENE RENDER STATE
// ============================================================================

pub struct SceneRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    // Uniform buffers
    globals_buffer: wgpu::Buffer,
    movers_buffer: wgpu::Buffer,

    bind_group: wgpu::BindGroup,

    pub size: (u32, u32),
    start_time: f64,
    warned_overflow: bool,
}

impl SceneRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("scene-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene_shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals {
                resolution: [width as f32, height as f32],
                time: 0.0,
                game_over: 0,
                player: [PLAYER_START.x, PLAYER_START.y, PLAYER_START.z, PLAYER_RADIUS],
                mover_count: 0,
                _pad: [0; 3],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Uniform rather than storage: webgl2 limits allow no fragment storage buffers
        let movers_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("movers"),
            size: (std::mem::size_of::<MoverData>() * MAX_MOVERS) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: movers_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            movers_buffer,
            bind_group,
            size: (width, height),
            start_time: 0.0,
            warned_overflow: false,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn set_start_time(&mut self, time: f64) {
        self.start_time = time;
    }

    /// Pack obstacles then platforms into the fixed-size mover array
    fn pack_movers(&mut self, state: &GameState) -> (Vec<MoverData>, u32) {
        let mut movers = vec![EMPTY_MOVER; MAX_MOVERS];
        let packed = state
            .obstacles
            .iter()
            .map(|m| MoverData::new(m, OBSTACLE_SIZE, KIND_OBSTACLE))
            .chain(
                state
                    .platforms
                    .iter()
                    .map(|m| MoverData::new(m, PLATFORM_SIZE, KIND_PLATFORM)),
            );

        let mut count = 0;
        for (slot, data) in movers.iter_mut().zip(packed) {
            *slot = data;
            count += 1;
        }

        let total = state.obstacles.len() + state.platforms.len();
        if total > MAX_MOVERS && !self.warned_overflow {
            log::warn!("{} movers in layout, only {} are drawn", total, MAX_MOVERS);
            self.warned_overflow = true;
        }

        (movers, count)
    }

    /// Update GPU buffers from game state and render
    pub fn render(&mut self, state: &GameState, time: f64) -> Result<(), wgpu::SurfaceError> {
        // time is ms from requestAnimationFrame
        let elapsed = ((time - self.start_time) / 1000.0) as f32;

        let (movers, mover_count) = self.pack_movers(state);
        let player = state.player.pos;

        let globals = Globals {
            resolution: [self.size.0 as f32, self.size.1 as f32],
            time: elapsed,
            game_over: u32::from(state.is_game_over()),
            player: [player.x, player.y, player.z, PLAYER_RADIUS],
            mover_count,
            _pad: [0; 3],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        self.queue
            .write_buffer(&self.movers_buffer, 0, bytemuck::cast_slice(&movers));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_struct_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<Globals>(), 48);
        assert_eq!(std::mem::size_of::<MoverData>(), 32);
        assert_eq!(std::mem::size_of::<MoverData>() * MAX_MOVERS % 16, 0);
    }

    #[test]
    fn test_mover_data_half_extents() {
        let mover = Mover {
            id: 1,
            pos: glam::Vec3::new(1.0, 0.25, -2.0),
            speed: 1.0,
        };
        let data = MoverData::new(&mover, PLATFORM_SIZE, KIND_PLATFORM);
        assert_eq!(data.center, [1.0, 0.25, -2.0, 0.0]);
        assert_eq!(data.half_extents, [1.0, 0.25, 0.25, 1.0]);
    }
}
