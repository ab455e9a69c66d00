use std::sync::OnceLock;

use zerocopy::{AsBytes, FromBytes};

use super::util::{GpuMat4, GpuVec3};
use crate::{
    input::InputCache,
    math::{self as m, Vec3},
};

static LAYOUT: OnceLock<wgpu::BindGroupLayout> = OnceLock::new();

#[repr(C)]
#[derive(Clone, Copy, Debug, AsBytes, FromBytes)]
struct CameraUniforms {
    view_proj: GpuMat4,
    eye: GpuVec3,
    _pad: f32,
}

/// A perspective camera determining the view drawn when rendering,
/// with its uniform buffer and bind group.
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: m::Angle,
    pub z_near: f32,
    pub z_far: f32,
    uniform_buf: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

impl Camera {
    /// A static camera at `eye` looking at `target`.
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let device = super::Renderer::device();
        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera"),
            layout: Self::bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });
        Self {
            eye,
            target,
            up: Vec3::unit_y(),
            fov: m::Angle::Deg(45.0),
            z_near: 0.05,
            z_far: 350.0,
            uniform_buf,
            bind_group,
        }
    }

    /// Bind group layout shared by every camera.
    pub(crate) fn bind_group_layout<'a>() -> &'a wgpu::BindGroupLayout {
        LAYOUT.get_or_init(|| {
            let device = super::Renderer::device();
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("camera"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<CameraUniforms>() as u64,
                        ),
                    },
                    count: None,
                }],
            })
        })
    }

    pub fn view_matrix(&self) -> m::Mat4 {
        m::look_at(self.eye, self.target, self.up)
    }

    pub fn view_proj_matrix(&self, viewport_size: (u32, u32)) -> m::Mat4 {
        let aspect = viewport_size.0 as f32 / viewport_size.1 as f32;
        m::perspective(self.fov, aspect, self.z_near, self.z_far) * self.view_matrix()
    }

    /// Upload the current camera state to the GPU.
    /// Call once per frame before drawing.
    pub fn upload(&self, viewport_size: (u32, u32)) {
        let uniforms = CameraUniforms {
            view_proj: self.view_proj_matrix(viewport_size).into(),
            eye: self.eye.into(),
            _pad: 0.0,
        };
        super::Renderer::queue().write_buffer(&self.uniform_buf, 0, uniforms.as_bytes());
    }
}

/// Moves a [`Camera`] around its focus point with the mouse:
/// left drag orbits, right drag pans, scrolling dollies in and out.
pub struct OrbitCameraController {
    pub orbit_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    yaw: f32,
    pitch: f32,
    distance: f32,
    focus: Vec3,
}

impl OrbitCameraController {
    /// A controller whose initial state matches the given camera.
    pub fn new(camera: &Camera) -> Self {
        let offset = camera.eye - camera.target;
        let distance = offset.mag();
        Self {
            orbit_speed: 0.01,
            pan_speed: 0.0025,
            zoom_speed: 0.01,
            min_distance: 2.0,
            max_distance: 100.0,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
            focus: camera.target,
        }
    }

    /// Apply mouse movement from the last tick to the camera.
    pub fn update(&mut self, camera: &mut Camera, input: &InputCache) {
        let delta = input.cursor_delta();

        if input.is_mouse_button_pressed(winit::event::MouseButton::Left, None) {
            self.yaw -= delta.x as f32 * self.orbit_speed;
            self.pitch = (self.pitch + delta.y as f32 * self.orbit_speed)
                .clamp(-1.5, 1.5);
        } else if input.is_mouse_button_pressed(winit::event::MouseButton::Right, None) {
            // pan in the camera plane, scaled so the focus tracks the cursor
            let view_dir = (camera.target - camera.eye).normalized();
            let right = view_dir.cross(camera.up).normalized();
            let up = right.cross(view_dir);
            let scale = self.distance * self.pan_speed;
            self.focus +=
                right * (-delta.x as f32 * scale) + up * (delta.y as f32 * scale);
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            self.distance = (self.distance * (1.0 - scroll * self.zoom_speed))
                .clamp(self.min_distance, self.max_distance);
        }

        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let offset = Vec3::new(cp * sy, sp, cp * cy) * self.distance;
        camera.target = self.focus;
        camera.eye = self.focus + offset;
    }
}
