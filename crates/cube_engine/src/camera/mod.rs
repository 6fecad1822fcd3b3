//! Viewing camera and pointer input
//!
//! The renderer itself lives in the engine behind the scene adapter; the core
//! keeps just enough camera math to turn a pointer position into a world-space
//! ray for picking, and to orbit and zoom the view.

mod mouse;

pub use mouse::MouseState;

use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Point3, Vec3, Vec4};
use crate::physics::Ray;

/// Closest and farthest orbit distances allowed by [`OrbitCamera::zoom`]
const ZOOM_LIMITS: (f32, f32) = (1.0, 200.0);

/// Perspective camera orbiting a target point
///
/// Right-handed, Y-up. NDC follows the OpenGL convention: x and y in
/// `[-1, 1]` with +y at the top of the screen, z in `[-1, 1]` near to far.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at
    pub target: Vec3,
    /// Up vector (typically +Y)
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// Orbit speed around the target's Y axis (radians per second)
    pub auto_rotate_speed: f32,
}

impl OrbitCamera {
    /// Create a perspective camera looking at the origin
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
            auto_rotate_speed: 0.0,
        }
    }

    /// Create the camera a scene config describes
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::perspective(config.position, config.fov_degrees, aspect, 0.1, 1000.0);
        camera.target = config.target;
        camera.auto_rotate_speed = config.auto_rotate_speed;
        camera
    }

    /// Update camera aspect ratio for viewport changes
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(self.position), &Point3::from(self.target), &self.up)
    }

    /// Camera-to-clip transform
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Combined world-to-clip transform
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Distance from the camera to its target
    pub fn distance(&self) -> f32 {
        (self.position - self.target).magnitude()
    }

    /// Rotate around the target's vertical axis by `auto_rotate_speed * dt`
    pub fn orbit(&mut self, dt: f32) {
        let angle = self.auto_rotate_speed * dt;
        if angle == 0.0 {
            return;
        }
        let (sin, cos) = angle.sin_cos();
        let offset = self.position - self.target;
        let rotated = Vec3::new(
            offset.x * cos + offset.z * sin,
            offset.y,
            -offset.x * sin + offset.z * cos,
        );
        self.position = self.target + rotated;
    }

    /// Scale the orbit distance by `factor`, clamped to the zoom limits
    pub fn zoom(&mut self, factor: f32) {
        let offset = self.position - self.target;
        let distance = offset.magnitude();
        if distance <= f32::EPSILON || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let new_distance = (distance * factor).clamp(ZOOM_LIMITS.0, ZOOM_LIMITS.1);
        self.position = self.target + offset * (new_distance / distance);
    }

    /// Ray from the camera through an NDC point
    ///
    /// Falls back to the view direction if the view-projection matrix is
    /// singular.
    pub fn screen_to_world_ray(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let Some(inverse) = self.view_projection_matrix().try_inverse() else {
            log::warn!("Singular view-projection matrix; using view direction for pick ray");
            return Ray::new(self.position, self.target - self.position);
        };

        let unproject = |z: f32| {
            let h = inverse * Vec4::new(ndc_x, ndc_y, z, 1.0);
            Vec3::new(h.x / h.w, h.y / h.w, h.z / h.w)
        };
        let near = unproject(-1.0);
        let far = unproject(1.0);

        Ray::new(self.position, far - near)
    }

    /// Project a world point to NDC; `None` when it is behind the camera
    pub fn project_to_ndc(&self, point: &Vec3) -> Option<(f32, f32)> {
        let clip = self.view_projection_matrix() * Vec4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some((clip.x / clip.w, clip.y / clip.w))
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = OrbitCamera::default();
        let ray = camera.screen_to_world_ray(0.0, 0.0);
        let expected = (camera.target - camera.position).normalize();
        assert_relative_eq!(ray.direction, expected, epsilon = 1e-4);
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn test_projection_inverts_unprojection() {
        let camera = OrbitCamera::default();
        let point = Vec3::new(3.0, -1.0, 2.0);
        let (x, y) = camera.project_to_ndc(&point).expect("in front");
        let ray = camera.screen_to_world_ray(x, y);
        let to_point = (point - camera.position).normalize();
        assert_relative_eq!(ray.direction, to_point, epsilon = 1e-3);
    }

    #[test]
    fn test_point_behind_camera_not_projected() {
        let camera = OrbitCamera::default();
        let behind = camera.position + (camera.position - camera.target);
        assert!(camera.project_to_ndc(&behind).is_none());
    }

    #[test]
    fn test_orbit_keeps_distance_and_height() {
        let mut camera = OrbitCamera::default();
        let distance = camera.distance();
        let height = camera.position.y;
        for _ in 0..100 {
            camera.orbit(0.1);
        }
        assert_relative_eq!(camera.distance(), distance, epsilon = 1e-3);
        assert_relative_eq!(camera.position.y, height, epsilon = 1e-4);
        assert!((camera.position.x).abs() > 1.0);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = OrbitCamera::default();
        camera.zoom(0.0001);
        assert_relative_eq!(camera.distance(), 1.0, epsilon = 1e-4);
        camera.zoom(1e6);
        assert_relative_eq!(camera.distance(), 200.0, epsilon = 1e-2);
    }
}
