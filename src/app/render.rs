use orrery_render_raylib::to_camera3d;
use raylib::prelude::*;

use super::App;
use super::hud::{draw_crosshair, draw_text_lines, info_lines};

impl App {
    pub fn render(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        self.items.clear();
        self.items.extend_from_slice(self.sim.ordered_drawables());

        let fps = rl.get_fps();
        let width = rl.get_screen_width();
        let height = rl.get_screen_height();
        let camera3d = to_camera3d(self.sim.camera());

        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::BLACK);
        {
            let mut d3 = d.begin_mode3D(camera3d);
            self.renderer
                .draw(&mut d3, self.sim.camera(), self.sim.scene(), &self.items, &self.draw);
        }

        if self.hud.info {
            let mut lines = info_lines(
                fps,
                self.sim.camera(),
                self.sim.clock(),
                self.sim.running(),
                self.hud.precise,
            );
            if self.hud.precise {
                if let Some(id) = self.last_report.collision {
                    lines.push(format!("Bounced off {}", self.sim.scene()[id].name));
                }
            }
            if !self.captured {
                lines.push("Click to capture the mouse, E to release".to_string());
            }
            draw_text_lines(&mut d, &lines);
            draw_crosshair(&mut d, width, height);
        }
    }
}
