use std::cell::Cell;

use orrery_geom::{Euler, Mat4, Vec3, wrap_degrees};

/// Roll rate while a roll key is held, degrees per second.
const ROLL_RATE: f64 = 40.0;
/// Distance per second for each unit of `speed`.
const MOVE_SCALE: f64 = 10.0;
/// Distance per second for each unit of `speed` when bouncing off a body.
const BOUNCE_SCALE: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Vertical field of view, radians.
    pub fov_y: f64,
    pub aspect: f64,
    pub znear: f64,
    pub zfar: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 45f64.to_radians(),
            aspect: 1.0,
            znear: 1.0,
            zfar: 3_000_000.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect, self.znear, self.zfar)
    }
}

/// Free-flying viewer. Angles are degrees.
///
/// The view matrix is cached and rebuilt on the next read after any pose change.
#[derive(Clone, Debug)]
pub struct Camera {
    position: Vec3,
    orientation: Euler,
    speed: f64,
    roll_left: bool,
    roll_right: bool,
    projection: Projection,
    view: Cell<Mat4>,
    view_dirty: Cell<bool>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Euler::ZERO)
    }
}

impl Camera {
    pub fn new(position: Vec3, orientation: Euler) -> Self {
        Self {
            position,
            orientation,
            speed: 0.0,
            roll_left: false,
            roll_right: false,
            projection: Projection::default(),
            view: Cell::new(Mat4::IDENTITY),
            view_dirty: Cell::new(true),
        }
    }

    #[inline]
    fn invalidate(&mut self) {
        self.view_dirty.set(true);
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn orientation(&self) -> Euler {
        self.orientation
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_pose(&mut self, position: Vec3, orientation: Euler) {
        self.position = position;
        self.orientation = orientation;
        self.invalidate();
    }

    /// Unit vector the camera looks along. Roll does not affect it.
    pub fn direction(&self) -> Vec3 {
        let pitch = self.orientation.pitch.to_radians();
        let yaw = (self.orientation.yaw - 90.0).to_radians();
        let m = pitch.cos();
        Vec3::new(yaw.cos() * m, -pitch.sin(), yaw.sin() * m)
    }

    pub fn move_by(&mut self, distance: f64) {
        self.position += self.direction() * distance;
        self.invalidate();
    }

    /// Mouse look in degrees. Past a pole horizontal input is mirrored so
    /// dragging right still turns the view right.
    pub fn mouse_move(&mut self, dx: f64, dy: f64) {
        let dx = if self.orientation.pitch.abs() > 90.0 { -dx } else { dx };
        self.orientation.yaw = wrap_degrees(self.orientation.yaw + dx);
        let pitch = self.orientation.pitch - dy;
        self.orientation.pitch = if (-180.0..=180.0).contains(&pitch) {
            pitch
        } else {
            (pitch + 180.0).rem_euclid(360.0) - 180.0
        };
        self.invalidate();
    }

    pub fn adjust_speed(&mut self, delta: f64) {
        self.speed += delta;
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn set_roll_left(&mut self, on: bool) {
        self.roll_left = on;
    }

    pub fn set_roll_right(&mut self, on: bool) {
        self.roll_right = on;
    }

    pub fn reset_roll(&mut self) {
        self.orientation.roll = 0.0;
        self.invalidate();
    }

    pub fn set_aspect(&mut self, aspect: f64) {
        if aspect.is_finite() && aspect > 0.0 {
            self.projection.aspect = aspect;
        }
    }

    /// Per-frame motion: held roll keys, then forward flight when `moving`.
    pub fn update(&mut self, dt: f64, moving: bool) {
        if self.roll_left {
            self.orientation.roll -= ROLL_RATE * dt;
            self.invalidate();
        }
        if self.roll_right {
            self.orientation.roll += ROLL_RATE * dt;
            self.invalidate();
        }
        if moving {
            self.move_by(self.speed * MOVE_SCALE * dt);
        }
    }

    /// Collision response: reverse and back off one step.
    pub fn bounce(&mut self, dt: f64) {
        self.speed = -self.speed;
        self.move_by(self.speed * BOUNCE_SCALE * dt);
        log::debug!(target: "collision", "bounced, speed now {:.1}", self.speed);
    }

    #[inline]
    pub fn distance_to(&self, point: Vec3) -> f64 {
        self.position.distance(point)
    }

    pub fn view_matrix(&self) -> Mat4 {
        if self.view_dirty.get() {
            self.view.set(Mat4::view(self.position, self.orientation));
            self.view_dirty.set(false);
        }
        self.view.get()
    }

    /// The cached view matrix is current.
    #[inline]
    pub fn view_is_cached(&self) -> bool {
        !self.view_dirty.get()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// World-space forward axis of the view, including roll.
    pub fn view_forward(&self) -> Vec3 {
        -self.view_matrix().row3(2)
    }

    /// World-space up axis of the view, including roll.
    pub fn view_up(&self) -> Vec3 {
        self.view_matrix().row3(1)
    }
}
