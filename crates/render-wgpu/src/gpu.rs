use crate::scene_assets::SceneAssets;
use crate::shaders;
use arbor_assets::{MeshData, TextureData, Vertex, primitives};
use arbor_scene::{DrawItem, FrameView, MeshKind, TextureSlot};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use std::collections::BTreeMap;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct DirLightUniform {
    direction: [f32; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct SpotLightUniform {
    position: [f32; 4],
    direction: [f32; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
    attenuation: [f32; 4],
    cone: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    view_position: [f32; 4],
    dir_light: DirLightUniform,
    spot_light: SpotLightUniform,
}

impl FrameUniforms {
    fn from_frame(frame: &FrameView) -> Self {
        let sun = &frame.dir_light;
        let spot = &frame.spot_light;
        Self {
            view: frame.view.to_cols_array_2d(),
            projection: frame.projection.to_cols_array_2d(),
            view_position: frame.view_position.extend(frame.shininess).to_array(),
            dir_light: DirLightUniform {
                direction: sun.direction.extend(0.0).to_array(),
                ambient: sun.ambient.extend(0.0).to_array(),
                diffuse: sun.diffuse.extend(0.0).to_array(),
                specular: sun.specular.extend(0.0).to_array(),
            },
            spot_light: SpotLightUniform {
                position: spot.position.extend(1.0).to_array(),
                direction: spot.direction.extend(0.0).to_array(),
                ambient: spot.ambient.extend(0.0).to_array(),
                diffuse: spot.diffuse.extend(0.0).to_array(),
                specular: spot.specular.extend(0.0).to_array(),
                attenuation: [spot.constant, spot.linear, spot.quadratic, 0.0],
                cone: [
                    spot.cut_off,
                    spot.outer_cut_off,
                    if frame.flashlight_on { 1.0 } else { 0.0 },
                    0.0,
                ],
            },
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
}

impl ObjectUniforms {
    fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertex_buffer")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_index_buffer")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// One resolved entry of the draw list: indices into the renderer's tables.
#[derive(Debug, Clone, Copy)]
struct DrawCall {
    mesh: usize,
    texture: usize,
    object: usize,
}

/// wgpu-based room renderer.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    meshes: Vec<GpuMesh>,
    textures: Vec<wgpu::BindGroup>,
    objects: Vec<wgpu::BindGroup>,
    draws: Vec<DrawCall>,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        assets: &SceneAssets,
        items: &[DrawItem],
    ) -> Self {
        // Frame uniforms
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniform_buffer"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bind_group_layout"),
            entries: &[uniform_entry(
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bind_group_layout"),
            entries: &[uniform_entry(wgpu::ShaderStages::VERTEX)],
        });
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
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

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&frame_layout, &object_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // quads are seen from both sides
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("repeat_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let mut textures = Vec::new();
        let mut upload_texture = |label: &str, data: &TextureData| -> usize {
            textures.push(texture_bind_group(
                device,
                queue,
                &texture_layout,
                &sampler,
                label,
                data,
            ));
            textures.len() - 1
        };

        let white = upload_texture("white_texture", &TextureData::solid([255; 4]));
        let mut slot_textures: BTreeMap<TextureSlot, usize> = BTreeMap::new();
        for (slot, data) in &assets.textures {
            let index = upload_texture(slot.relative_path(), data);
            slot_textures.insert(*slot, index);
        }

        // Built-in quads, then one entry per model mesh
        let mut meshes = Vec::new();
        let mut kind_meshes: BTreeMap<MeshKind, usize> = BTreeMap::new();
        for (kind, data) in [
            (MeshKind::Floor, primitives::floor_plane()),
            (MeshKind::Sky, primitives::sky_plane()),
            (MeshKind::Wall, primitives::wall_quad()),
            (MeshKind::Note, primitives::note_quad()),
        ] {
            meshes.push(GpuMesh::upload(device, &format!("{kind:?}"), &data));
            kind_meshes.insert(kind, meshes.len() - 1);
        }

        let mut model_parts = Vec::new();
        for part in assets.tree.meshes.iter().filter(|p| !p.mesh.is_empty()) {
            meshes.push(GpuMesh::upload(device, &part.name, &part.mesh));
            let texture = match &part.diffuse {
                Some(data) => upload_texture(&part.name, data),
                None => white,
            };
            model_parts.push((meshes.len() - 1, texture));
        }

        let mut objects = Vec::new();
        let mut draws = Vec::new();
        for item in items {
            let object_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(item.name),
                contents: bytemuck::bytes_of(&ObjectUniforms::new(item.transform.matrix())),
                usage: wgpu::BufferUsages::UNIFORM,
            });
            objects.push(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(item.name),
                layout: &object_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object_buffer.as_entire_binding(),
                }],
            }));
            let object = objects.len() - 1;

            if item.mesh == MeshKind::Tree {
                for &(mesh, texture) in &model_parts {
                    draws.push(DrawCall {
                        mesh,
                        texture,
                        object,
                    });
                }
                continue;
            }

            let Some(&mesh) = kind_meshes.get(&item.mesh) else {
                tracing::warn!(name = item.name, "no mesh for draw item, skipping");
                continue;
            };
            let texture = item
                .texture
                .and_then(|slot| slot_textures.get(&slot).copied())
                .unwrap_or(white);
            draws.push(DrawCall {
                mesh,
                texture,
                object,
            });
        }

        tracing::debug!(
            meshes = meshes.len(),
            textures = textures.len(),
            draws = draws.len(),
            "renderer resources created"
        );

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            meshes,
            textures,
            objects,
            draws,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    /// Render one frame of the room.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &FrameView,
    ) {
        queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::from_frame(frame)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b, a] = frame.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for call in &self.draws {
                let mesh = &self.meshes[call.mesh];
                pass.set_bind_group(1, &self.objects[call.object], &[]);
                pass.set_bind_group(2, &self.textures[call.texture], &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

fn uniform_entry(visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Upload an sRGB texture and bind it with the shared sampler.
fn texture_bind_group(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    data: &TextureData,
) -> wgpu::BindGroup {
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: data.width.max(1),
                height: data.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &data.rgba,
    );
    let view = texture.create_view(&Default::default());

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
