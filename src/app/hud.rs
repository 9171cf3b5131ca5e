use orrery_scene::{WorldClock, describe_rate};
use orrery_view::Camera;
use raylib::prelude::*;

const FONT_SIZE: i32 = 16;
const LINE_HEIGHT: i32 = 20;
const CROSSHAIR_RADIUS: f32 = 10.0;

/// Info overlay text. Precise mode adds orientation and the tick counter.
pub(crate) fn info_lines(fps: u32, camera: &Camera, clock: &WorldClock, running: bool, precise: bool) -> Vec<String> {
    let p = camera.position();
    let mut lines = vec![format!(
        "{} FPS @ (x={:.2}, y={:.2}, z={:.2}) @ {}, {}/s{}",
        fps,
        p.x,
        p.y,
        p.z,
        camera.speed(),
        describe_rate(clock.tick_length()),
        if running { "" } else { " (paused)" }
    )];
    if precise {
        let o = camera.orientation();
        lines.push(format!(
            "Direction(pitch={:.2}, yaw={:.2}, roll={:.2})",
            o.pitch, o.yaw, o.roll
        ));
        lines.push(format!("Tick: {}", clock.tick()));
    }
    lines
}

pub(crate) fn draw_text_lines(d: &mut RaylibDrawHandle, lines: &[String]) {
    for (i, line) in lines.iter().enumerate() {
        let y = 10 + i as i32 * LINE_HEIGHT;
        d.draw_text(line, 11, y + 1, FONT_SIZE, Color::BLACK);
        d.draw_text(line, 10, y, FONT_SIZE, Color::WHITE);
    }
}

pub(crate) fn draw_crosshair(d: &mut RaylibDrawHandle, width: i32, height: i32) {
    d.draw_circle_lines(width / 2, height / 2, CROSSHAIR_RADIUS, Color::GREEN);
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_geom::{Euler, Vec3};

    #[test]
    fn summary_line_matches_layout() {
        let mut cam = Camera::new(Vec3::new(1.0, -2.5, 30000.0), Euler::ZERO);
        cam.set_speed(10.0);
        let clock = WorldClock::new(4320.0);
        let lines = info_lines(60, &cam, &clock, true, false);
        assert_eq!(lines, ["60 FPS @ (x=1.00, y=-2.50, z=30000.00) @ 10, 1.2 hours/s"]);
    }

    #[test]
    fn precise_mode_adds_direction_and_tick() {
        let cam = Camera::new(Vec3::ZERO, Euler::new(5.0, 90.0, -12.5));
        let mut clock = WorldClock::new(10.0);
        clock.advance(1.0);
        let lines = info_lines(30, &cam, &clock, false, true);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("10.0 seconds/s (paused)"));
        assert_eq!(lines[1], "Direction(pitch=5.00, yaw=90.00, roll=-12.50)");
        assert_eq!(lines[2], "Tick: 10");
    }
}
