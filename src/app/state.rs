use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use orrery_render_raylib::{DrawOptions, SceneRenderer, apply_clip_planes};
use orrery_runtime::{Simulation, StepReport};
use orrery_scene::{DrawItem, LoadedWorld};
use raylib::prelude::*;

pub struct AppOptions {
    pub world_path: PathBuf,
    pub assets_root: PathBuf,
    pub watch_world: bool,
    pub paused: bool,
}

/// HUD text toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudState {
    pub info: bool,
    pub precise: bool,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            info: true,
            precise: false,
        }
    }
}

pub struct App {
    pub sim: Simulation,
    pub renderer: SceneRenderer,
    pub draw: DrawOptions,
    pub hud: HudState,
    /// Forward flight on; right click toggles it.
    pub moving: bool,
    /// Mouse captured for look and keys; a click captures, E releases.
    pub captured: bool,
    pub world_path: PathBuf,
    pub(crate) world_event_rx: Receiver<()>,
    pub(crate) last_report: StepReport,
    // draw list copied out of the simulation each frame
    pub(crate) items: Vec<DrawItem>,
}

impl App {
    pub fn new(rl: &mut RaylibHandle, thread: &RaylibThread, world: LoadedWorld, options: AppOptions) -> Self {
        let mut sim = Simulation::new(world);
        if options.paused {
            sim.set_running(false);
        }
        let aspect = rl.get_screen_width() as f64 / rl.get_screen_height().max(1) as f64;
        sim.camera_mut().set_aspect(aspect);
        apply_clip_planes(sim.camera().projection());

        let mut renderer = SceneRenderer::new(&options.assets_root);
        renderer.prepare(rl, thread, sim.scene());

        let world_event_rx = Self::spawn_world_watcher(&options.world_path, options.watch_world);
        log::info!(
            "orrery ready: {} bodies, {} belts, tick length {} s",
            sim.scene().len(),
            sim.scene().belts().len(),
            sim.clock().tick_length()
        );

        Self {
            sim,
            renderer,
            draw: DrawOptions::default(),
            hud: HudState::default(),
            moving: true,
            captured: false,
            world_path: options.world_path,
            world_event_rx,
            last_report: StepReport::default(),
            items: Vec::new(),
        }
    }
}
