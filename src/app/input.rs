use raylib::prelude::*;

use super::App;

/// Degrees of look per pixel of mouse travel.
pub(crate) const MOUSE_SENSITIVITY: f64 = 0.3;

/// Speed steps per key press.
const SPEED_KEYS: [(KeyboardKey, f64); 10] = [
    (KeyboardKey::KEY_KP_ADD, 1.0),
    (KeyboardKey::KEY_EQUAL, 1.0),
    (KeyboardKey::KEY_KP_SUBTRACT, -1.0),
    (KeyboardKey::KEY_MINUS, -1.0),
    (KeyboardKey::KEY_KP_MULTIPLY, 10.0),
    (KeyboardKey::KEY_KP_DIVIDE, -10.0),
    (KeyboardKey::KEY_PAGE_UP, 100.0),
    (KeyboardKey::KEY_PAGE_DOWN, -100.0),
    (KeyboardKey::KEY_HOME, 1000.0),
    (KeyboardKey::KEY_END, -1000.0),
];

/// Screen-space mouse delta to camera look. Screen y grows downward, so moving up looks up.
pub(crate) fn look_delta(dx: f32, dy: f32) -> (f64, f64) {
    (dx as f64 * MOUSE_SENSITIVITY, -(dy as f64) * MOUSE_SENSITIVITY)
}

/// Wheel notches to a speed change; horizontal scrolling is the coarse control.
pub(crate) fn scroll_speed_delta(x: f32, y: f32) -> f64 {
    y as f64 * 50.0 + x as f64 * 500.0
}

impl App {
    fn set_captured(&mut self, rl: &mut RaylibHandle, captured: bool) {
        self.captured = captured;
        if captured {
            rl.disable_cursor();
        } else {
            rl.enable_cursor();
            let cam = self.sim.camera_mut();
            cam.set_roll_left(false);
            cam.set_roll_right(false);
        }
        log::debug!("mouse {}", if captured { "captured" } else { "released" });
    }

    /// Keys and mouse only drive the viewer while the cursor is captured.
    pub(crate) fn handle_input(&mut self, rl: &mut RaylibHandle) {
        if rl.is_key_pressed(KeyboardKey::KEY_F) {
            rl.toggle_fullscreen();
        }
        if !self.captured {
            if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
                || rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_RIGHT)
            {
                self.set_captured(rl, true);
            }
            return;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_E) {
            self.set_captured(rl, false);
            return;
        }

        let md = rl.get_mouse_delta();
        let (dx, dy) = look_delta(md.x, md.y);
        if dx != 0.0 || dy != 0.0 {
            self.sim.camera_mut().mouse_move(dx, dy);
        }
        let wheel = rl.get_mouse_wheel_move_v();
        let scroll = scroll_speed_delta(wheel.x, wheel.y);
        if scroll != 0.0 {
            self.sim.camera_mut().adjust_speed(scroll);
        }
        for (key, step) in SPEED_KEYS {
            if rl.is_key_pressed(key) {
                self.sim.camera_mut().adjust_speed(step);
            }
        }

        let cam = self.sim.camera_mut();
        cam.set_roll_right(rl.is_key_down(KeyboardKey::KEY_A));
        cam.set_roll_left(rl.is_key_down(KeyboardKey::KEY_S));
        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            cam.reset_roll();
        }

        if rl.is_key_pressed(KeyboardKey::KEY_I) {
            self.hud.info = !self.hud.info;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_P) {
            self.hud.precise = !self.hud.precise;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_O) {
            self.draw.orbits = !self.draw.orbits;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_C) {
            self.draw.clouds = !self.draw.clouds;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_X) {
            self.draw.atmosphere = !self.draw.atmosphere;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_D) {
            self.draw.wireframe = !self.draw.wireframe;
        }

        if rl.is_key_pressed(KeyboardKey::KEY_ENTER) || rl.is_key_pressed(KeyboardKey::KEY_KP_ENTER) {
            self.sim.toggle_running();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_INSERT) {
            self.sim.faster();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_DELETE) {
            self.sim.slower();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE)
            || rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
        {
            self.sim.launch_asteroid();
        }
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_RIGHT) {
            self.moving = !self.moving;
        }
    }
}
