//! Types, aliases and helper operations for doing math with `ultraviolet`.
use std::f32::consts::PI;
pub use ultraviolet as uv;

pub type Vec3 = uv::Vec3;
pub type Vec4 = uv::Vec4;
pub type Mat4 = uv::Mat4;

/// An angle in either degrees or radians.
#[derive(Clone, Copy, Debug, serde::Deserialize, serde::Serialize)]
pub enum Angle {
    Rad(f32),
    Deg(f32),
}
impl Angle {
    /// Get the angle as degrees.
    #[inline]
    pub fn deg(&self) -> f32 {
        match self {
            Angle::Rad(rad) => rad * 180.0 / PI,
            Angle::Deg(deg) => *deg,
        }
    }

    /// Get the angle as radians.
    #[inline]
    pub fn rad(&self) -> f32 {
        match self {
            Angle::Rad(rad) => *rad,
            Angle::Deg(deg) => deg * PI / 180.0,
        }
    }
}
impl Default for Angle {
    fn default() -> Self {
        Angle::Rad(0.0)
    }
}

/// Right-handed view matrix looking from `eye` towards `target`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let fwd = (target - eye).normalized();
    let side = fwd.cross(up).normalized();
    let up = side.cross(fwd);
    Mat4::new(
        Vec4::new(side.x, up.x, -fwd.x, 0.0),
        Vec4::new(side.y, up.y, -fwd.y, 0.0),
        Vec4::new(side.z, up.z, -fwd.z, 0.0),
        Vec4::new(-side.dot(eye), -up.dot(eye), fwd.dot(eye), 1.0),
    )
}

/// Right-handed perspective projection with wgpu's 0..1 clip-space depth.
pub fn perspective(fov: Angle, aspect: f32, near: f32, far: f32) -> Mat4 {
    let focal = 1.0 / (fov.rad() / 2.0).tan();
    Mat4::new(
        Vec4::new(focal / aspect, 0.0, 0.0, 0.0),
        Vec4::new(0.0, focal, 0.0, 0.0),
        Vec4::new(0.0, 0.0, far / (near - far), -1.0),
        Vec4::new(0.0, 0.0, near * far / (near - far), 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn look_at_maps_eye_to_origin() {
        let view = look_at(
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::zero(),
            Vec3::unit_y(),
        );
        let eye_in_view = view * Vec4::new(0.0, 0.0, 20.0, 1.0);
        assert!(eye_in_view.xyz().mag() < EPS);
    }

    #[test]
    fn look_at_points_down_negative_z() {
        let view = look_at(
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::zero(),
            Vec3::unit_y(),
        );
        let target_in_view = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((target_in_view.x).abs() < EPS);
        assert!((target_in_view.y).abs() < EPS);
        assert!((target_in_view.z + 20.0).abs() < EPS);
    }

    #[test]
    fn perspective_maps_depth_range_to_zero_one() {
        let near = 0.05;
        let far = 350.0;
        let proj = perspective(Angle::Deg(45.0), 16.0 / 9.0, near, far);

        let on_near = proj * Vec4::new(0.0, 0.0, -near, 1.0);
        assert!((on_near.z / on_near.w).abs() < EPS);

        let on_far = proj * Vec4::new(0.0, 0.0, -far, 1.0);
        assert!((on_far.z / on_far.w - 1.0).abs() < EPS);
    }
}
