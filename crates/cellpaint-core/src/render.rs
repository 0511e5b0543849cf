//! wgpu renderer for the grid scene, shared by the web and native frontends.
//!
//! The frontends own the surface/device; this only builds the pipeline and
//! per-layer instance buffers and records one render pass. Instance buffers
//! are uploaded in full once, afterwards only the instances a mesh reports as
//! dirty are rewritten.

use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::scene::{Instance, InstanceUpload, InstancedMesh, Scene};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceRaw {
    offset: [f32; 3],
    visible: f32,
    size: [f32; 2],
    _pad: [f32; 2],
    color: [f32; 4],
}

impl From<&Instance> for InstanceRaw {
    fn from(inst: &Instance) -> Self {
        Self {
            offset: inst.offset.to_array(),
            visible: if inst.visible { 1.0 } else { 0.0 },
            size: inst.size.to_array(),
            _pad: [0.0; 2],
            color: inst.color.to_array(),
        }
    }
}

const INSTANCE_STRIDE: u64 = std::mem::size_of::<InstanceRaw>() as u64;

struct LayerBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    layers: Vec<LayerBuffer>,
}

impl GridRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::GRID_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid_uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Unit quad as two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("grid_bgl"),
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("grid_bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grid_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: per-cell instance data
            wgpu::VertexBufferLayout {
                array_stride: INSTANCE_STRIDE,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 32,
                        shader_location: 4,
                    },
                ],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grid_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            quad_vb,
            layers: Vec::new(),
        }
    }

    /// Upload camera uniforms and whatever instance data changed.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera: &Camera,
        scene: &mut Scene,
    ) {
        let ambient = scene.ambient();
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: camera.view_proj().to_cols_array_2d(),
                ambient: [ambient.x, ambient.y, ambient.z, 1.0],
            }),
        );

        for (i, mesh) in scene.drawables_mut().iter_mut().enumerate() {
            if self.layers.len() <= i || self.layers[i].capacity < mesh.len() {
                let layer = create_layer_buffer(device, mesh);
                if i < self.layers.len() {
                    self.layers[i] = layer;
                } else {
                    self.layers.push(layer);
                }
                // fresh buffer: everything has to go up
                mesh.take_upload();
                upload_all(queue, &self.layers[i], mesh);
                continue;
            }
            match mesh.take_upload() {
                InstanceUpload::Nothing => {}
                InstanceUpload::Full => upload_all(queue, &self.layers[i], mesh),
                InstanceUpload::Partial(indices) => {
                    upload_runs(queue, &self.layers[i], mesh, &indices)
                }
            }
        }
    }

    /// Record the draw calls; base layer first so overlays stay on top.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        for layer in &self.layers {
            if layer.count == 0 {
                continue;
            }
            rpass.set_vertex_buffer(1, layer.buffer.slice(..));
            rpass.draw(0..6, 0..layer.count);
        }
    }

    /// Prepare and draw the scene into `target`, clearing to the scene background.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        camera: &Camera,
        scene: &mut Scene,
    ) {
        self.prepare(device, queue, camera, scene);
        let bg = scene.background;
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("grid_encoder"),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("grid_rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(bg.x),
                            g: f64::from(bg.y),
                            b: f64::from(bg.z),
                            a: f64::from(bg.w),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.draw(&mut rpass);
        }
        queue.submit(Some(encoder.finish()));
    }
}

fn create_layer_buffer(device: &wgpu::Device, mesh: &InstancedMesh) -> LayerBuffer {
    let capacity = mesh.len().max(1);
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(mesh.layer().name()),
        size: INSTANCE_STRIDE * capacity as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    log::info!("[render] {} layer buffer for {} instances", mesh.layer().name(), mesh.len());
    LayerBuffer {
        buffer,
        capacity,
        count: mesh.len() as u32,
    }
}

fn upload_all(queue: &wgpu::Queue, layer: &LayerBuffer, mesh: &InstancedMesh) {
    let raw: Vec<InstanceRaw> = mesh.instances().iter().map(InstanceRaw::from).collect();
    queue.write_buffer(&layer.buffer, 0, bytemuck::cast_slice(&raw));
}

/// Write each run of consecutive dirty indices with a single copy.
fn upload_runs(queue: &wgpu::Queue, layer: &LayerBuffer, mesh: &InstancedMesh, indices: &[usize]) {
    let instances = mesh.instances();
    let mut start = 0;
    while start < indices.len() {
        let mut end = start + 1;
        while end < indices.len() && indices[end] == indices[end - 1] + 1 {
            end += 1;
        }
        let first = indices[start];
        let last = indices[end - 1];
        if last < instances.len() {
            let raw: Vec<InstanceRaw> =
                instances[first..=last].iter().map(InstanceRaw::from).collect();
            queue.write_buffer(
                &layer.buffer,
                first as u64 * INSTANCE_STRIDE,
                bytemuck::cast_slice(&raw),
            );
        }
        start = end;
    }
}
