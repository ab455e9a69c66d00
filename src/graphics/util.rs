//! Utilities for communicating with the GPU.

use crate::math::uv;
use zerocopy::{AsBytes, FromBytes};

/// A vec3 in a form that can be sent to a shader.
#[derive(Clone, Copy, Debug, Default, AsBytes, FromBytes)]
#[repr(transparent)]
pub struct GpuVec3([f32; 3]);

impl From<uv::Vec3> for GpuVec3 {
    fn from(v: uv::Vec3) -> Self {
        GpuVec3([v.x, v.y, v.z])
    }
}

impl GpuVec3 {
    pub fn into_array(self) -> [f32; 3] {
        self.0
    }
}

/// A vec4 in a form that can be sent to a shader.
#[derive(Clone, Copy, Debug, Default, AsBytes, FromBytes)]
#[repr(transparent)]
pub struct GpuVec4([f32; 4]);

impl From<uv::Vec4> for GpuVec4 {
    fn from(v: uv::Vec4) -> Self {
        GpuVec4([v.x, v.y, v.z, v.w])
    }
}

impl From<[f32; 4]> for GpuVec4 {
    fn from(v: [f32; 4]) -> Self {
        GpuVec4(v)
    }
}

/// A mat4 in a form that can be sent to a shader (column-major).
#[derive(Clone, Copy, Debug, Default, AsBytes, FromBytes)]
#[repr(transparent)]
pub struct GpuMat4([[f32; 4]; 4]);

impl From<uv::Mat4> for GpuMat4 {
    fn from(mat: uv::Mat4) -> Self {
        let col = |c: uv::Vec4| [c.x, c.y, c.z, c.w];
        GpuMat4([
            col(mat.cols[0]),
            col(mat.cols[1]),
            col(mat.cols[2]),
            col(mat.cols[3]),
        ])
    }
}

/// A GPU buffer that is reallocated with a larger size if it gets full.
pub struct DynamicBuffer {
    buf: wgpu::Buffer,
    len: usize,
    capacity_bytes: usize,
    label: Option<&'static str>,
    usage: wgpu::BufferUsages,
}

impl DynamicBuffer {
    pub fn new(label: Option<&'static str>, usage: wgpu::BufferUsages) -> Self {
        let device = crate::Renderer::device();
        // start with a small nonzero size so the buffer can always be bound
        let capacity_bytes = 16;
        let buf = device.create_buffer(&wgpu::BufferDescriptor {
            label,
            size: capacity_bytes as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buf,
            len: 0,
            capacity_bytes,
            label,
            usage,
        }
    }

    /// Upload a slice into the buffer, growing it first if needed.
    pub fn write<T: AsBytes>(&mut self, data: &[T]) {
        let device = crate::Renderer::device();
        let queue = crate::Renderer::queue();

        let data_bytes = data.as_bytes();
        if data_bytes.len() > self.capacity_bytes {
            self.capacity_bytes = data_bytes.len().next_power_of_two();
            self.buf = device.create_buffer(&wgpu::BufferDescriptor {
                label: self.label,
                size: self.capacity_bytes as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        queue.write_buffer(&self.buf, 0, data_bytes);
        self.len = data.len();
    }

    /// Slice of the buffer covering the data written last.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buf.slice(..)
    }

    /// Number of elements written by the latest [`write`][Self::write].
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
