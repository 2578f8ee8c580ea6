use crate::config::{CameraSettings, OrbitSettings};
use crate::frame::Controls;
use crate::viewport::{ResizeObserver, ResizeSubscription, Viewport};
use glamx::{Mat4, Pose3, Vec2, Vec3};
use kiss3d::camera::Camera3d;
use kiss3d::event::{Action, MouseButton, WindowEvent};
use kiss3d::window::Canvas;
use std::cell::Cell;
use std::f32::consts::{PI, TAU};
use std::rc::Rc;

const POLAR_EPSILON: f32 = 1.0e-4;

/// Orbit camera controls.
///
/// The eye stays on a sphere around a target point and always looks at it. The sphere is
/// parametrized by its radius, the azimuth `theta` around `+Y` and the polar angle `phi`
/// measured from `+Y`.
///
/// # Default Controls
/// - **Left mouse + drag**: orbit
/// - **Right mouse + drag**: pan the target
/// - **Mouse wheel**: zoom
///
/// Rotation damping and auto-rotation are integrated by [`Controls::update`], once per
/// frame, from the frame delta.
#[derive(Debug)]
pub struct OrbitControls {
    settings: OrbitSettings,
    fov: f32,
    znear: f32,
    zfar: f32,

    target: Vec3,
    radius: f32,
    theta: f32,
    phi: f32,
    rotate_delta: Vec2,

    last_cursor_pos: Vec2,
    viewport: Rc<Cell<Viewport>>,

    proj: Mat4,
    view: Mat4,
    proj_view: Mat4,
    inverse_proj_view: Mat4,
}

impl OrbitControls {
    /// Creates controls placed and shaped by `camera`, behaving according to `settings`.
    pub fn new(camera: &CameraSettings, settings: OrbitSettings) -> Self {
        let mut res = OrbitControls {
            settings,
            fov: camera.fov_degrees.to_radians(),
            znear: camera.znear,
            zfar: camera.zfar,
            target: camera.target,
            radius: 1.0,
            theta: 0.0,
            phi: PI / 2.0,
            rotate_delta: Vec2::ZERO,
            last_cursor_pos: Vec2::ZERO,
            viewport: Rc::new(Cell::new(Viewport::default())),
            proj: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            proj_view: Mat4::IDENTITY,
            inverse_proj_view: Mat4::IDENTITY,
        };

        res.look_at(camera.eye, camera.target);
        res
    }

    /// Moves the eye to `eye` and the target to `at`, within the configured limits.
    pub fn look_at(&mut self, eye: Vec3, at: Vec3) {
        let offset = eye - at;
        let radius = offset.length();

        self.target = at;
        self.radius = radius;
        if radius > 0.0 {
            self.theta = offset.x.atan2(offset.z);
            self.phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        }

        self.update_restrictions();
        self.update_projviews();
    }

    /// The behavior settings.
    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    /// The behavior settings, for tweaking at runtime.
    pub fn settings_mut(&mut self) -> &mut OrbitSettings {
        &mut self.settings
    }

    /// The point orbited around.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Distance between the eye and the target.
    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Angle around the up axis, in radians.
    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    /// Angle from the up axis, in radians.
    pub fn polar_angle(&self) -> f32 {
        self.phi
    }

    /// Width over height of the viewport the projection is built for.
    pub fn aspect(&self) -> f32 {
        self.viewport.get().aspect()
    }

    /// Keeps the projection aspect ratio in sync with `observer`.
    #[must_use = "dropping the subscription stops tracking the viewport"]
    pub fn track_viewport(&mut self, observer: &ResizeObserver) -> ResizeSubscription {
        let viewport = self.viewport.clone();
        let subscription = observer.subscribe(move |v| viewport.set(v));
        self.update_projviews();
        subscription
    }

    /// Queues a rotation, in radians; applied at once or glided in with damping.
    pub fn rotate(&mut self, delta_theta: f32, delta_phi: f32) {
        self.rotate_delta += Vec2::new(delta_theta, delta_phi);
        if !self.settings.enable_damping {
            self.apply_rotation(1.0);
        }
    }

    /// Zooms in for positive `amount` and out for negative ones.
    pub fn zoom(&mut self, amount: f32) {
        if amount == 0.0 {
            return;
        }

        let scale = (1.0 - self.settings.zoom_speed).powf(amount.abs());
        if amount > 0.0 {
            self.radius *= scale;
        } else {
            self.radius /= scale;
        }

        self.update_restrictions();
        self.update_projviews();
    }

    /// Moves the target by a cursor displacement, in pixels.
    pub fn pan(&mut self, dpos: Vec2) {
        let height = self.viewport.get().height.max(1) as f32;
        let pixels_to_world = 2.0 * self.radius * (self.fov / 2.0).tan() / height;

        let forward = (self.target - self.eye_position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();

        self.target += (right * -dpos.x + up * dpos.y) * pixels_to_world * self.settings.pan_speed;
        self.update_projviews();
    }

    /// Integrates auto-rotation and damping over `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if self.settings.auto_rotate {
            // One turn per minute at speed 1, as with 60 updates per second.
            self.theta -= TAU / 60.0 * self.settings.auto_rotate_speed * dt;
        }

        if self.settings.enable_damping {
            let retention = (1.0 - self.settings.damping_factor).powf(dt * 60.0);
            self.apply_rotation(1.0 - retention);
        } else {
            self.apply_rotation(1.0);
        }

        self.update_restrictions();
        self.update_projviews();
    }

    fn apply_rotation(&mut self, fraction: f32) {
        let applied = self.rotate_delta * fraction;
        self.theta += applied.x;
        self.phi += applied.y;
        self.rotate_delta -= applied;

        self.update_restrictions();
        self.update_projviews();
    }

    fn eye_position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();

        self.target + Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.radius
    }

    fn update_restrictions(&mut self) {
        let min_phi = self.settings.min_polar_angle.max(POLAR_EPSILON);
        let max_phi = self.settings.max_polar_angle.min(PI - POLAR_EPSILON).max(min_phi);
        self.phi = self.phi.clamp(min_phi, max_phi);

        let max_distance = self.settings.max_distance.max(self.settings.min_distance);
        self.radius = self.radius.clamp(self.settings.min_distance, max_distance);

        self.theta = self.theta.rem_euclid(TAU);
    }

    fn update_projviews(&mut self) {
        self.view = self.view_transform().to_mat4();
        self.proj = Mat4::perspective_rh_gl(self.fov, self.aspect(), self.znear, self.zfar);
        self.proj_view = self.proj * self.view;
        self.inverse_proj_view = self.proj_view.inverse();
    }
}

impl Controls for OrbitControls {
    fn update(&mut self, delta: f32) {
        self.advance(delta);
    }
}

impl Camera3d for OrbitControls {
    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn view_transform(&self) -> Pose3 {
        Pose3::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vec2::new(x as f32, y as f32);
                let dpos = curr_pos - self.last_cursor_pos;

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    let height = self.viewport.get().height.max(1) as f32;
                    let per_pixel = TAU / height * self.settings.rotate_speed;
                    self.rotate(-dpos.x * per_pixel, -dpos.y * per_pixel);
                }

                if canvas.get_mouse_button(MouseButton::Button2) == Action::Press {
                    self.pan(dpos);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => self.zoom(off as f32),
            WindowEvent::FramebufferSize(w, h) => {
                self.viewport.set(Viewport::new(w, h));
                self.update_projviews();
            }
            _ => {}
        }
    }

    fn eye(&self) -> Vec3 {
        self.eye_position()
    }

    fn transformation(&self) -> Mat4 {
        self.proj_view
    }

    fn inverse_transformation(&self) -> Mat4 {
        self.inverse_proj_view
    }

    #[inline]
    fn view_transform_pair(&self, _pass: usize) -> (Pose3, Mat4) {
        (self.view_transform(), self.proj)
    }

    fn update(&mut self, _canvas: &Canvas) {}
}
