//! Scene pass: foliage points, background stars and the three instanced
//! ornament meshes.

use super::helpers::{self, DEPTH_FORMAT, HDR_FORMAT};
use glam::{Mat4, Vec3};
use tree_core::mesh::{cuboid, uv_sphere, MeshData, MeshVertex, QUAD_CORNERS};
use tree_core::{
    Camera, FrameBuffers, MeshInstance, OrnamentKind, PointInstance, BAUBLE_SEGMENTS,
    GIFT_BOX_SIZE, KEY_LIGHT_POSITION, PHOTO_CARD_SIZE,
};
use wgpu::util::DeviceExt;

/// Must match `Globals` in foliage.wgsl and ornament.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
    camera_eye: [f32; 4],
    light_dir: [f32; 4],
    time: f32,
    foliage_progress: f32,
    ornament_progress: f32,
    _pad: f32,
}

impl SceneUniforms {
    pub(crate) fn new(camera: &Camera, model: Mat4, buffers: &FrameBuffers) -> Self {
        let (right, up) = camera.billboard_axes();
        let light = Vec3::from(KEY_LIGHT_POSITION).normalize_or_zero();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            camera_eye: camera.eye.extend(1.0).to_array(),
            light_dir: light.extend(0.0).to_array(),
            time: buffers.foliage_uniforms.time,
            foliage_progress: buffers.foliage_uniforms.progress,
            ornament_progress: buffers.ornament_uniforms.progress,
            _pad: 0.0,
        }
    }
}

struct MeshBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        Self {
            vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: mesh.index_count(),
        }
    }
}

struct OrnamentBatch {
    kind: OrnamentKind,
    mesh: MeshBuffers,
    instances: wgpu::Buffer,
    count: u32,
}

pub(crate) struct SceneResources {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    // same layout, identity model
    star_uniform_buffer: wgpu::Buffer,
    star_bind_group: wgpu::BindGroup,
    foliage_pipeline: wgpu::RenderPipeline,
    quad: wgpu::Buffer,
    foliage_instances: wgpu::Buffer,
    foliage_count: u32,
    star_instances: wgpu::Buffer,
    star_count: u32,
    ornament_pipeline: wgpu::RenderPipeline,
    batches: Vec<OrnamentBatch>,
}

const POINT_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32, 3 => Float32x4];
const MESH_VERTEX_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
const MESH_INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x3,
    8 => Float32
];

fn instance_buffer<T>(device: &wgpu::Device, label: &str, count: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        // zero-sized buffers are rejected by some backends
        size: (std::mem::size_of::<T>() * count.max(1)) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(crate) fn create_scene_resources(device: &wgpu::Device, buffers: &FrameBuffers) -> SceneResources {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[helpers::uniform_layout_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let uniforms_with_group = |label: &str| {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        (buffer, group)
    };
    let (uniform_buffer, bind_group) = uniforms_with_group("scene_uniforms");
    let (star_uniform_buffer, star_bind_group) = uniforms_with_group("star_uniforms");
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    let foliage_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("foliage_shader"),
        source: wgpu::ShaderSource::Wgsl(tree_core::FOLIAGE_WGSL.into()),
    });
    let additive = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    };
    let foliage_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("foliage_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &foliage_shader,
            entry_point: Some("vs_points"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<PointInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &POINT_ATTRS,
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        // points test against ornaments but never occlude each other
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &foliage_shader,
            entry_point: Some("fs_points"),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(wgpu::BlendState {
                    color: additive,
                    alpha: additive,
                }),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let ornament_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("ornament_shader"),
        source: wgpu::ShaderSource::Wgsl(tree_core::ORNAMENT_WGSL.into()),
    });
    let ornament_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("ornament_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &ornament_shader,
            entry_point: Some("vs_mesh"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &MESH_VERTEX_ATTRS,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &MESH_INSTANCE_ATTRS,
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: Some(wgpu::Face::Back),
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
            module: &ornament_shader,
            entry_point: Some("fs_mesh"),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("point_quad"),
        contents: bytemuck::cast_slice(&QUAD_CORNERS),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let [cw, ch, cd] = PHOTO_CARD_SIZE;
    let batches = OrnamentKind::ALL
        .into_iter()
        .map(|kind| {
            let (mesh, count) = match kind {
                OrnamentKind::Bauble => (
                    uv_sphere(1.0, BAUBLE_SEGMENTS, BAUBLE_SEGMENTS),
                    buffers.baubles.len(),
                ),
                OrnamentKind::GiftBox => (
                    cuboid(GIFT_BOX_SIZE, GIFT_BOX_SIZE, GIFT_BOX_SIZE),
                    buffers.gift_boxes.len(),
                ),
                OrnamentKind::PhotoCard => (cuboid(cw, ch, cd), buffers.photo_cards.len()),
            };
            OrnamentBatch {
                kind,
                mesh: MeshBuffers::upload(device, kind.as_str(), &mesh),
                instances: instance_buffer::<MeshInstance>(device, kind.as_str(), count),
                count: count as u32,
            }
        })
        .collect();

    log::info!(
        "[gpu] scene resources: {} foliage points, {} stars, {} ornament batches",
        buffers.foliage.len(),
        buffers.stars.len(),
        OrnamentKind::ALL.len()
    );

    SceneResources {
        uniform_buffer,
        bind_group,
        star_uniform_buffer,
        star_bind_group,
        foliage_pipeline,
        quad,
        foliage_instances: instance_buffer::<PointInstance>(device, "foliage_instances", buffers.foliage.len()),
        foliage_count: buffers.foliage.len() as u32,
        star_instances: instance_buffer::<PointInstance>(device, "star_instances", buffers.stars.len()),
        star_count: buffers.stars.len() as u32,
        ornament_pipeline,
        batches,
    }
}

fn instances_for(buffers: &FrameBuffers, kind: OrnamentKind) -> &[MeshInstance] {
    match kind {
        OrnamentKind::Bauble => &buffers.baubles,
        OrnamentKind::GiftBox => &buffers.gift_boxes,
        OrnamentKind::PhotoCard => &buffers.photo_cards,
    }
}

impl SceneResources {
    pub(crate) fn upload(
        &self,
        queue: &wgpu::Queue,
        uniforms: &SceneUniforms,
        star_uniforms: &SceneUniforms,
        buffers: &FrameBuffers,
    ) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        queue.write_buffer(&self.star_uniform_buffer, 0, bytemuck::bytes_of(star_uniforms));
        if !buffers.foliage.is_empty() {
            queue.write_buffer(&self.foliage_instances, 0, bytemuck::cast_slice(&buffers.foliage));
        }
        if !buffers.stars.is_empty() {
            queue.write_buffer(&self.star_instances, 0, bytemuck::cast_slice(&buffers.stars));
        }
        for batch in &self.batches {
            let data = instances_for(buffers, batch.kind);
            if !data.is_empty() {
                queue.write_buffer(&batch.instances, 0, bytemuck::cast_slice(data));
            }
        }
    }

    /// Opaque ornaments first so their depth hides the points behind them.
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);

        pass.set_pipeline(&self.ornament_pipeline);
        for batch in self.batches.iter().filter(|b| b.count > 0) {
            pass.set_vertex_buffer(0, batch.mesh.vertices.slice(..));
            pass.set_vertex_buffer(1, batch.instances.slice(..));
            pass.set_index_buffer(batch.mesh.indices.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..batch.mesh.index_count, 0, 0..batch.count);
        }

        pass.set_pipeline(&self.foliage_pipeline);
        pass.set_vertex_buffer(0, self.quad.slice(..));
        if self.foliage_count > 0 {
            pass.set_vertex_buffer(1, self.foliage_instances.slice(..));
            pass.draw(0..QUAD_CORNERS.len() as u32, 0..self.foliage_count);
        }
        if self.star_count > 0 {
            pass.set_bind_group(0, &self.star_bind_group, &[]);
            pass.set_vertex_buffer(1, self.star_instances.slice(..));
            pass.draw(0..QUAD_CORNERS.len() as u32, 0..self.star_count);
        }
    }
}
