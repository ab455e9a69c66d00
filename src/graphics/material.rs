use std::{mem::size_of, sync::OnceLock};

use wgpu::util::DeviceExt;
use zerocopy::{AsBytes, FromBytes};

static LAYOUT: OnceLock<wgpu::BindGroupLayout> = OnceLock::new();

/// Reflectance colors and shininess exponent for Phong shading.
///
/// Upload with [`Material::new`] to use in rendering.
/// The associated constants are classic presets.
#[derive(Debug, Clone, Copy)]
pub struct MaterialParams {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl MaterialParams {
    pub const GOLD: Self = Self {
        ambient: [0.274725, 0.1995, 0.0745],
        diffuse: [0.75164, 0.60648, 0.22648],
        specular: [0.628281, 0.555802, 0.3666065],
        shininess: 51.2,
    };

    pub const BRASS: Self = Self {
        ambient: [0.329412, 0.223529, 0.027451],
        diffuse: [0.780392, 0.568627, 0.113725],
        specular: [0.992157, 0.941176, 0.807843],
        shininess: 27.8974,
    };

    pub const PEWTER: Self = Self {
        ambient: [0.10588, 0.058824, 0.113725],
        diffuse: [0.427451, 0.470588, 0.541176],
        specular: [0.3333, 0.3333, 0.521569],
        shininess: 9.84615,
    };
}

/// A material determines the color and lighting properties of a mesh,
/// stored in a uniform buffer on the GPU.
pub struct Material {
    pub(crate) bind_group: wgpu::BindGroup,
    // buffer stored to avoid dropping it
    _uniform_buf: wgpu::Buffer,
}

impl Material {
    pub fn new(params: MaterialParams) -> Self {
        let device = super::Renderer::device();

        let to_vec4 = |c: [f32; 3]| [c[0], c[1], c[2], 1.0];
        let uniform_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("material"),
            contents: MaterialUniforms {
                ambient: to_vec4(params.ambient),
                diffuse: to_vec4(params.diffuse),
                specular: params.specular,
                shininess: params.shininess,
            }
            .as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material"),
            layout: Self::bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });

        Self {
            bind_group,
            _uniform_buf: uniform_buf,
        }
    }

    /// Bind group layout shared by all materials.
    pub(crate) fn bind_group_layout<'a>() -> &'a wgpu::BindGroupLayout {
        LAYOUT.get_or_init(|| {
            let device = super::Renderer::device();
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("material"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            size_of::<MaterialUniforms>() as u64
                        ),
                    },
                    count: None,
                }],
            })
        })
    }
}

// shininess is packed into the last vector's w component
// to match WGSL struct alignment
#[repr(C)]
#[derive(Clone, Copy, Debug, AsBytes, FromBytes)]
struct MaterialUniforms {
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular: [f32; 3],
    shininess: f32,
}
