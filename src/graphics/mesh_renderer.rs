use std::{borrow::Cow, mem::size_of};

use zerocopy::{AsBytes, FromBytes};

use super::{util::GpuVec3, Camera, Material, Mesh, Renderer};
use crate::math::{uv, Vec3};

#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes)]
struct Instance {
    model_col0: GpuVec3,
    model_col1: GpuVec3,
    model_col2: GpuVec3,
    model_col3: GpuVec3,
}

/// A point light with Phong intensity terms.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(2.0, 5.0, 2.0),
            ambient: [0.2; 3],
            diffuse: [1.0; 3],
            specular: [0.8; 3],
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes)]
struct LightUniforms {
    position: [f32; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 4],
}

impl From<PointLight> for LightUniforms {
    fn from(light: PointLight) -> Self {
        let to_vec4 = |c: [f32; 3]| [c[0], c[1], c[2], 1.0];
        Self {
            position: [light.position.x, light.position.y, light.position.z, 1.0],
            ambient: to_vec4(light.ambient),
            diffuse: to_vec4(light.diffuse),
            specular: to_vec4(light.specular),
        }
    }
}

/// How triangles are rasterized: as solid surfaces or as outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Filled,
    Wireframe,
}

/// A mesh paired with a world transform and a material,
/// to be drawn with [`MeshRenderer::draw`].
pub struct MeshInstance<'a> {
    pub model: uv::Mat4,
    pub material: &'a Material,
}

impl<'a> MeshInstance<'a> {
    /// An instance translated to `position` without rotation or scaling.
    pub fn at(position: Vec3, material: &'a Material) -> Self {
        Self {
            model: uv::Mat4::from_translation(position),
            material,
        }
    }
}

/// Renders [`Mesh`]es with Phong shading from a single point light.
pub struct MeshRenderer {
    filled_pipeline: wgpu::RenderPipeline,
    wireframe_pipeline: wgpu::RenderPipeline,
    light_buf: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    /// Rasterization mode used by subsequent draws.
    pub polygon_mode: PolygonMode,
}

impl MeshRenderer {
    pub fn new(renderer: &Renderer) -> Self {
        let device = Renderer::device();

        /// Filled and wireframe rendering need separate pipelines;
        /// this enum helps create them concisely
        enum PipelineVariant {
            Filled,
            Wireframe,
        }

        // shaders

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("shaders/phong.wgsl"))),
        });

        // light bind group

        let light_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("light"),
            size: size_of::<LightUniforms>() as _,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Renderer::queue().write_buffer(
            &light_buf,
            0,
            LightUniforms::from(PointLight::default()).as_bytes(),
        );

        let light_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("light"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(size_of::<LightUniforms>() as _),
                    },
                    count: None,
                }],
            });
        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("light"),
            layout: &light_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buf.as_entire_binding(),
            }],
        });

        // vertex and instance layouts

        let vertex_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: size_of::<super::mesh::Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    // position
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    },
                    // normal
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 4 * 3,
                        shader_location: 1,
                    },
                ],
            },
            wgpu::VertexBufferLayout {
                array_stride: size_of::<Instance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    // model matrix column 0
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 2,
                    },
                    // model matrix column 1
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 4 * 3,
                        shader_location: 3,
                    },
                    // model matrix column 2
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 4 * 3 * 2,
                        shader_location: 4,
                    },
                    // model matrix column 3
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 4 * 3 * 3,
                        shader_location: 5,
                    },
                ],
            },
        ];

        //
        // pipeline
        //

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh"),
            bind_group_layouts: &[
                Camera::bind_group_layout(),
                &light_bind_group_layout,
                Material::bind_group_layout(),
            ],
            push_constant_ranges: &[],
        });
        let pipeline = |variant: PipelineVariant| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("mesh"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: "vs_main",
                    buffers: &vertex_buffers,
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: "fs_main",
                    targets: &[Some(renderer.swapchain_format().into())],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: match variant {
                        PipelineVariant::Filled => wgpu::PolygonMode::Fill,
                        PipelineVariant::Wireframe => wgpu::PolygonMode::Line,
                    },
                    ..Default::default()
                },
                depth_stencil: Some(renderer.default_depth_stencil_state()),
                multisample: renderer.multisample_state(),
                multiview: None,
            })
        };

        Self {
            filled_pipeline: pipeline(PipelineVariant::Filled),
            wireframe_pipeline: pipeline(PipelineVariant::Wireframe),
            light_buf,
            light_bind_group,
            polygon_mode: PolygonMode::Filled,
        }
    }

    /// Replace the light used by subsequent draws.
    pub fn set_light(&self, light: PointLight) {
        Renderer::queue().write_buffer(&self.light_buf, 0, LightUniforms::from(light).as_bytes());
    }

    /// Draw every instance of a mesh in one instanced draw call per material.
    pub fn draw<'pass>(
        &'pass self,
        pass: &mut wgpu::RenderPass<'pass>,
        camera: &'pass Camera,
        mesh: &'pass mut Mesh,
        instances: &[MeshInstance<'pass>],
    ) {
        if instances.is_empty() {
            return;
        }

        // upload instance data before recording the pass commands

        let gpu_instances: Vec<Instance> = instances
            .iter()
            .map(|inst| Instance {
                model_col0: inst.model.cols[0].xyz().into(),
                model_col1: inst.model.cols[1].xyz().into(),
                model_col2: inst.model.cols[2].xyz().into(),
                model_col3: inst.model.cols[3].xyz().into(),
            })
            .collect();
        mesh.gpu_data.instance_buf.write(&gpu_instances);
        mesh.gpu_data.instance_count = gpu_instances.len() as u32;

        //
        // render
        //

        let mesh: &'pass Mesh = mesh;

        pass.set_pipeline(match self.polygon_mode {
            PolygonMode::Filled => &self.filled_pipeline,
            PolygonMode::Wireframe => &self.wireframe_pipeline,
        });
        pass.set_bind_group(0, &camera.bind_group, &[]);
        pass.set_bind_group(1, &self.light_bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.gpu_data.vertex_buf.slice(..));
        pass.set_vertex_buffer(1, mesh.gpu_data.instance_buf.slice());
        pass.set_index_buffer(mesh.gpu_data.index_buf.slice(..), wgpu::IndexFormat::Uint16);

        // each instance can have its own material,
        // so draw instance ranges of one with the material bound in between
        for (i, inst) in instances.iter().enumerate() {
            let i = i as u32;
            pass.set_bind_group(2, &inst.material.bind_group, &[]);
            pass.draw_indexed(0..mesh.gpu_data.idx_count, 0, i..i + 1);
        }
    }
}
