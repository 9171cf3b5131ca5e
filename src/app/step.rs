use raylib::prelude::*;

use super::App;

impl App {
    pub fn step(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, dt: f32) {
        self.process_world_events(rl, thread);
        if rl.is_window_resized() {
            let aspect = rl.get_screen_width() as f64 / rl.get_screen_height().max(1) as f64;
            self.sim.camera_mut().set_aspect(aspect);
        }
        self.handle_input(rl);

        let report = self.sim.step(dt as f64, self.moving && self.captured);
        if let Some(stats) = report.update {
            log::trace!(
                target: "scene",
                "tick {} (+{}): {} recomputed, {} skipped",
                self.sim.clock().tick(),
                report.ticks,
                stats.recomputed,
                stats.skipped
            );
        }
        self.last_report = report;
    }
}
