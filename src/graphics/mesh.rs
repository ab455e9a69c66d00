use itertools::Itertools;
use zerocopy::{AsBytes, FromBytes};

use super::util::{self, GpuVec3};
use crate::math::Vec3;

//
// types
//

/// CPU-side data of a triangle mesh for rendering.
/// Not to be used directly, instead should be converted
/// into a GPU-side [`Mesh`] with [`upload`][Self::upload].
#[derive(Debug, Clone, Default)]
pub struct MeshParams<'a> {
    /// GPU debug label, shown in e.g. Renderdoc.
    pub label: Option<&'a str>,
    /// Actual vertex data of the mesh.
    pub data: MeshData,
}

/// CPU-side vertices and indices of a mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl<'a> MeshParams<'a> {
    pub fn upload(self) -> Mesh {
        use wgpu::util::DeviceExt;
        let device = super::Renderer::device();
        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: self.label,
            contents: self.data.vertices.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: self.label,
            contents: self.data.indices.as_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_buf =
            util::DynamicBuffer::new(Some("mesh instances"), wgpu::BufferUsages::VERTEX);

        Mesh {
            gpu_data: GpuMeshData {
                vertex_buf,
                index_buf,
                idx_count: self.data.indices.len() as u32,
                instance_buf,
                instance_count: 0,
            },
        }
    }
}

/// Triangle mesh uploaded to the GPU and ready to be rendered.
///
/// Vertex data only exists on the GPU at this point and is immutable.
pub struct Mesh {
    pub(crate) gpu_data: GpuMeshData,
}

pub(crate) struct GpuMeshData {
    pub vertex_buf: wgpu::Buffer,
    pub index_buf: wgpu::Buffer,
    pub idx_count: u32,
    // instance buffer containing model matrices, allowing the same mesh
    // to be rendered multiple times in different places
    pub instance_buf: util::DynamicBuffer,
    pub instance_count: u32,
}

/// Position and normal of a vertex in a mesh.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, AsBytes, FromBytes)]
pub struct Vertex {
    pub position: GpuVec3,
    pub normal: GpuVec3,
}

//
// constructors
//

impl MeshData {
    /// A sphere made of `rings` latitude bands and `segments` longitude bands.
    pub fn uv_sphere(radius: f32, rings: usize, segments: usize) -> Self {
        use std::f32::consts::PI;
        // from the bottom pole up, matching the winding of `lathe`
        let profile: Vec<[f32; 2]> = (0..=rings)
            .map(|ring| {
                let lat = PI * ring as f32 / rings as f32;
                [radius * lat.sin(), -radius * lat.cos()]
            })
            .collect();
        Self::lathe(&profile, segments)
    }

    /// A stylised teapot body (with lid and knob) as a solid of revolution.
    pub fn teapot(segments: usize) -> Self {
        // profile curve from the bottom center up, as (radius, height) pairs
        const PROFILE: [[f32; 2]; 14] = [
            [0.0, -1.4],
            [0.7, -1.35],
            [1.1, -1.0],
            [1.3, -0.4],
            [1.25, 0.2],
            [1.0, 0.7],
            [0.8, 0.85],
            [0.55, 0.95],
            [0.45, 1.05],
            [0.2, 1.15],
            [0.18, 1.3],
            [0.28, 1.38],
            [0.15, 1.5],
            [0.0, 1.55],
        ];
        Self::lathe(&PROFILE, segments)
    }

    /// Revolve a profile curve of (radius, height) pairs around the y axis.
    ///
    /// Normals are smooth, computed from the profile's tangent direction.
    pub fn lathe(profile: &[[f32; 2]], segments: usize) -> Self {
        use std::f32::consts::TAU;
        assert!(profile.len() >= 2 && segments >= 3);

        // per-point outward normals in the (radius, height) plane,
        // from central differences along the profile
        let point_normal = |i: usize| {
            let prev = profile[i.saturating_sub(1)];
            let next = profile[(i + 1).min(profile.len() - 1)];
            let tangent = [next[0] - prev[0], next[1] - prev[1]];
            let len = (tangent[0] * tangent[0] + tangent[1] * tangent[1]).sqrt();
            [tangent[1] / len, -tangent[0] / len]
        };
        let profile_normals: Vec<[f32; 2]> = (0..profile.len()).map(point_normal).collect();

        let mut vertices = Vec::with_capacity(profile.len() * segments);
        for (point, normal) in profile.iter().zip_eq(&profile_normals) {
            for seg in 0..segments {
                let angle = TAU * seg as f32 / segments as f32;
                let (sin, cos) = angle.sin_cos();
                vertices.push(Vertex {
                    position: Vec3::new(point[0] * sin, point[1], point[0] * cos).into(),
                    normal: Vec3::new(normal[0] * sin, normal[1], normal[0] * cos)
                        .normalized()
                        .into(),
                });
            }
        }

        let mut indices = Vec::with_capacity((profile.len() - 1) * segments * 6);
        let vert_idx = |row: usize, seg: usize| (row * segments + seg % segments) as u16;
        for row in 0..profile.len() - 1 {
            for seg in 0..segments {
                indices.extend_from_slice(&[
                    vert_idx(row, seg),
                    vert_idx(row, seg + 1),
                    vert_idx(row + 1, seg + 1),
                    vert_idx(row, seg),
                    vert_idx(row + 1, seg + 1),
                    vert_idx(row + 1, seg),
                ]);
            }
        }

        MeshData { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec3(v: GpuVec3) -> Vec3 {
        let [x, y, z] = v.into_array();
        Vec3::new(x, y, z)
    }

    fn check_mesh(data: &MeshData) {
        assert_eq!(data.indices.len() % 3, 0);
        for &idx in &data.indices {
            assert!((idx as usize) < data.vertices.len());
        }
        for vert in &data.vertices {
            assert!((vec3(vert.normal).mag() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn teapot_is_well_formed() {
        let teapot = MeshData::teapot(32);
        check_mesh(&teapot);
        // everything stays within the widest profile radius
        for vert in &teapot.vertices {
            let pos = vec3(vert.position);
            assert!((pos.x * pos.x + pos.z * pos.z).sqrt() <= 1.3 + 1e-4);
        }
    }

    #[test]
    fn sphere_normals_point_away_from_center() {
        let sphere = MeshData::uv_sphere(2.0, 12, 24);
        check_mesh(&sphere);
        for vert in &sphere.vertices {
            let pos = vec3(vert.position);
            if pos.mag() > 1e-3 {
                assert!(pos.normalized().dot(vec3(vert.normal)) > 0.99);
            }
        }
    }
}
