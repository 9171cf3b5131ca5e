//! Frame driver tying the clock, the body tree, the camera and the render orderer together.
#![forbid(unsafe_code)]

use orrery_geom::Vec3;
use orrery_scene::{BodyId, DrawItem, LoadedWorld, Scene, UpdateStats, WorldClock};
use orrery_view::{Camera, RenderOrderer};

/// What one [`Simulation::step`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Ticks the clock advanced this frame.
    pub ticks: u64,
    /// Present when the ticks triggered a scene update.
    pub update: Option<UpdateStats>,
    /// Body the camera ran into, if the update pass found one.
    pub collision: Option<BodyId>,
}

pub struct Simulation {
    scene: Scene,
    clock: WorldClock,
    camera: Camera,
    orderer: RenderOrderer,
    drawables: Vec<DrawItem>,
    // scene generation the draw list was built from
    drawables_generation: Option<u64>,
    running: bool,
}

impl Simulation {
    pub fn new(world: LoadedWorld) -> Self {
        let LoadedWorld {
            scene,
            camera_start,
            tick_length,
            ..
        } = world;
        let mut sim = Self {
            scene,
            clock: WorldClock::new(tick_length),
            camera: Camera::new(camera_start.position, camera_start.orientation),
            orderer: RenderOrderer::new(),
            drawables: Vec::new(),
            drawables_generation: None,
            running: true,
        };
        sim.scene.update(&sim.clock);
        sim
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn clock(&self) -> &WorldClock {
        &self.clock
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Input-side access for look, speed and roll controls.
    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        log::info!(target: "clock", "{}", if self.running { "resumed" } else { "paused" });
        self.running
    }

    pub fn faster(&mut self) -> bool {
        self.clock.faster()
    }

    pub fn slower(&mut self) -> bool {
        self.clock.slower()
    }

    /// One frame: camera motion, clock, and on new ticks the tree update and collision pass.
    pub fn step(&mut self, dt: f64, moving: bool) -> StepReport {
        self.camera.update(dt, moving);
        let mut report = StepReport::default();
        if self.running {
            report.ticks = self.clock.advance(dt);
        }
        if report.ticks > 0 {
            report.update = Some(self.scene.update(&self.clock));
            report.collision = self.scene.collision(self.camera.position());
            if let Some(id) = report.collision {
                log::debug!(target: "collision", "camera inside '{}'", self.scene[id].name);
                self.camera.bounce(dt);
            }
        }
        self.scene.follow_camera(self.camera.position());
        report
    }

    /// Fires an asteroid from the camera along its view direction.
    pub fn launch_asteroid(&mut self) -> u64 {
        let cam = &self.camera;
        self.scene
            .launch_asteroid(cam.position(), cam.direction(), cam.speed())
    }

    /// The draw list in painter's order for the current camera.
    pub fn ordered_drawables(&mut self) -> &[DrawItem] {
        let generation = self.scene.generation();
        if self.drawables_generation != Some(generation) {
            self.scene.draw_items(&mut self.drawables);
            self.drawables_generation = Some(generation);
            self.orderer.invalidate();
        }
        let scene = &self.scene;
        let eye: Vec3 = self.camera.position();
        self.orderer.reorder(&mut self.drawables, &self.camera, |item| {
            scene
                .sort_key(*item)
                .map(Into::into)
                .unwrap_or((false, eye))
        });
        &self.drawables
    }

    /// Swaps in a freshly loaded world. Camera pose, time rate and tick carry over.
    pub fn reload(&mut self, world: LoadedWorld) {
        self.scene = world.scene;
        self.drawables_generation = None;
        self.scene.update(&self.clock);
        self.scene.follow_camera(self.camera.position());
        log::info!(
            target: "scene",
            "reloaded world at tick {} ({} bodies)",
            self.clock.tick(),
            self.scene.len()
        );
    }
}
