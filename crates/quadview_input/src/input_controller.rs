//! Viewer input controller
//!
//! Controls:
//! - Left drag (started in the user viewport): rotate the user view
//! - Right click (in the user viewport): cycle projection
//! - Mouse wheel: segment count up/down
//! - `=` / `+` / numpad plus: zoom in, `-` / numpad minus: zoom out
//! - 1/2/3: wireframe/solid/combined
//! - Z/X/C/V: perspective/isometric/dimetric/trimetric

use quadview_core::{InputSnapshot, ProjectionMode, RenderMode};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Accumulates raw window events into an [`InputSnapshot`].
///
/// The frame loop drains the pending snapshot once per frame with
/// [`InputController::take_snapshot`].
pub struct InputController {
    // Frame size in pixels; the user viewport is its bottom-right quadrant
    frame_width: f64,
    frame_height: f64,

    // Mouse state
    cursor: Option<(f64, f64)>,
    dragging: bool,

    pending: InputSnapshot,

    // Configuration
    pub rotate_sensitivity: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    pub fn new() -> Self {
        Self {
            frame_width: 1000.0,
            frame_height: 800.0,

            cursor: None,
            dragging: false,

            pending: InputSnapshot::default(),

            rotate_sensitivity: 0.01,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
        }
    }

    /// Update the frame size used for the user-viewport hit test
    pub fn set_frame_size(&mut self, width: u32, height: u32) {
        self.frame_width = width as f64;
        self.frame_height = height as f64;
    }

    /// Whether a point lies strictly inside the bottom-right (user) quadrant
    pub fn in_user_view(&self, x: f64, y: f64) -> bool {
        x > self.frame_width / 2.0 && y > self.frame_height / 2.0
    }

    /// Process keyboard input
    ///
    /// Returns true when the key is bound to a viewer control.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        if state != ElementState::Pressed {
            return false;
        }

        match key {
            KeyCode::Equal | KeyCode::NumpadAdd => {
                self.pending.zoom_factor *= self.zoom_in_factor;
                true
            }
            KeyCode::Minus | KeyCode::NumpadSubtract => {
                self.pending.zoom_factor *= self.zoom_out_factor;
                true
            }
            KeyCode::Digit1 => self.select_render_mode(RenderMode::Wireframe),
            KeyCode::Digit2 => self.select_render_mode(RenderMode::Solid),
            KeyCode::Digit3 => self.select_render_mode(RenderMode::Combined),
            KeyCode::KeyZ => self.select_projection(ProjectionMode::Perspective),
            KeyCode::KeyX => self.select_projection(ProjectionMode::Isometric),
            KeyCode::KeyC => self.select_projection(ProjectionMode::Dimetric),
            KeyCode::KeyV => self.select_projection(ProjectionMode::Trimetric),
            _ => false,
        }
    }

    fn select_render_mode(&mut self, mode: RenderMode) -> bool {
        self.pending.render_mode = Some(mode);
        true
    }

    fn select_projection(&mut self, projection: ProjectionMode) -> bool {
        // An explicit selection overrides cycles requested earlier in the same frame
        self.pending.projection = Some(projection);
        self.pending.projection_cycles = 0;
        true
    }

    /// Process mouse button input at the last known cursor position
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        let over_user_view = self
            .cursor
            .is_some_and(|(x, y)| self.in_user_view(x, y));

        match button {
            MouseButton::Left => {
                if !pressed {
                    if self.dragging {
                        log::debug!("Rotate drag ended");
                    }
                    self.dragging = false;
                } else if over_user_view {
                    log::debug!("Rotate drag started");
                    self.dragging = true;
                }
            }
            MouseButton::Right => {
                if pressed && over_user_view {
                    self.pending.projection_cycles += 1;
                    log::debug!("Projection cycle requested ({} pending)", self.pending.projection_cycles);
                }
            }
            _ => {}
        }
    }

    /// Process cursor movement in frame pixel coordinates
    ///
    /// While a drag is active, horizontal motion turns the view about Y and vertical
    /// motion about X.
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        if let (true, Some((last_x, last_y))) = (self.dragging, self.cursor) {
            self.pending.rotate_y += (x - last_x) as f32 * self.rotate_sensitivity;
            self.pending.rotate_x += (y - last_y) as f32 * self.rotate_sensitivity;
        }
        self.cursor = Some((x, y));
    }

    /// Cursor left the window: forget its position so the next motion does not jump
    pub fn process_cursor_left(&mut self) {
        self.cursor = None;
    }

    /// Process a mouse wheel step: one segment per event, direction by sign
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let dy = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(pos) => pos.y,
        };
        if dy > 0.0 {
            self.pending.segment_delta += 1;
        } else if dy < 0.0 {
            self.pending.segment_delta -= 1;
        }
    }

    /// Ask the frame loop to stop after the current frame
    pub fn request_quit(&mut self) {
        self.pending.quit = true;
    }

    /// Drain everything accumulated since the previous call
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        std::mem::take(&mut self.pending)
    }

    /// Drop pending input and any active drag
    pub fn reset(&mut self) {
        self.pending = InputSnapshot::default();
        self.dragging = false;
    }

    /// Builder: set drag rotation sensitivity (radians per pixel)
    pub fn with_rotate_sensitivity(mut self, sensitivity: f32) -> Self {
        self.rotate_sensitivity = sensitivity;
        self
    }

    /// Builder: set zoom multipliers for the zoom in/out keys
    pub fn with_zoom_factors(mut self, zoom_in: f32, zoom_out: f32) -> Self {
        self.zoom_in_factor = zoom_in;
        self.zoom_out_factor = zoom_out;
        self
    }

    /// Builder: set the initial frame size
    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.set_frame_size(width, height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    fn controller() -> InputController {
        InputController::new().with_frame_size(1000, 800)
    }

    fn press(c: &mut InputController, button: MouseButton) {
        c.process_mouse_button(button, ElementState::Pressed);
    }

    fn release(c: &mut InputController, button: MouseButton) {
        c.process_mouse_button(button, ElementState::Released);
    }

    #[test]
    fn test_user_view_hit_test_is_strict() {
        let c = controller();
        assert!(c.in_user_view(501.0, 401.0));
        assert!(!c.in_user_view(500.0, 401.0));
        assert!(!c.in_user_view(700.0, 400.0));
        assert!(!c.in_user_view(100.0, 700.0));
    }

    #[test]
    fn test_drag_rotates() {
        let mut c = controller();
        c.process_cursor_moved(600.0, 500.0);
        press(&mut c, MouseButton::Left);
        assert!(c.dragging);
        c.process_cursor_moved(610.0, 480.0);

        let snap = c.take_snapshot();
        assert!((snap.rotate_y - 0.1).abs() < 1e-6);
        assert!((snap.rotate_x + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_drag_continues_outside_user_view() {
        let mut c = controller();
        c.process_cursor_moved(600.0, 500.0);
        press(&mut c, MouseButton::Left);
        c.process_cursor_moved(100.0, 500.0);
        assert!((c.take_snapshot().rotate_y + 5.0).abs() < 1e-5);

        release(&mut c, MouseButton::Left);
        c.process_cursor_moved(200.0, 500.0);
        assert_eq!(c.take_snapshot().rotate_y, 0.0);
    }

    #[test]
    fn test_drag_must_start_in_user_view() {
        let mut c = controller();
        c.process_cursor_moved(100.0, 100.0);
        press(&mut c, MouseButton::Left);
        assert!(!c.dragging);
        c.process_cursor_moved(150.0, 150.0);
        assert!(c.take_snapshot().is_empty());
    }

    #[test]
    fn test_right_click_cycles_projection_only_in_user_view() {
        let mut c = controller();
        c.process_cursor_moved(100.0, 100.0);
        press(&mut c, MouseButton::Right);
        assert_eq!(c.take_snapshot().projection_cycles, 0);

        c.process_cursor_moved(900.0, 700.0);
        press(&mut c, MouseButton::Right);
        release(&mut c, MouseButton::Right);
        press(&mut c, MouseButton::Right);
        assert_eq!(c.take_snapshot().projection_cycles, 2);
    }

    #[test]
    fn test_scroll_changes_segments() {
        let mut c = controller();
        c.process_scroll(MouseScrollDelta::LineDelta(0.0, 3.0));
        c.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        c.process_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.0)));
        assert_eq!(c.take_snapshot().segment_delta, 1);
    }

    #[test]
    fn test_zoom_keys_multiply() {
        let mut c = controller();
        assert!(c.process_keyboard(KeyCode::Equal, ElementState::Pressed));
        assert!(c.process_keyboard(KeyCode::NumpadAdd, ElementState::Pressed));
        assert!(c.process_keyboard(KeyCode::Minus, ElementState::Pressed));
        let snap = c.take_snapshot();
        assert!((snap.zoom_factor - 1.1 * 1.1 * 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_mode_keys() {
        let mut c = controller();
        c.process_keyboard(KeyCode::Digit1, ElementState::Pressed);
        c.process_keyboard(KeyCode::KeyC, ElementState::Pressed);
        let snap = c.take_snapshot();
        assert_eq!(snap.render_mode, Some(RenderMode::Wireframe));
        assert_eq!(snap.projection, Some(ProjectionMode::Dimetric));
    }

    #[test]
    fn test_key_release_ignored() {
        let mut c = controller();
        assert!(!c.process_keyboard(KeyCode::Digit2, ElementState::Released));
        assert!(c.take_snapshot().is_empty());
    }

    #[test]
    fn test_unbound_keys_not_handled() {
        let mut c = controller();
        assert!(!c.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
        assert!(!c.process_keyboard(KeyCode::Escape, ElementState::Pressed));
    }

    #[test]
    fn test_take_snapshot_drains() {
        let mut c = controller();
        c.process_keyboard(KeyCode::Digit3, ElementState::Pressed);
        c.request_quit();
        let first = c.take_snapshot();
        assert!(first.quit);
        assert!(c.take_snapshot().is_empty());
    }

    #[test]
    fn test_builders() {
        let c = InputController::new()
            .with_rotate_sensitivity(0.02)
            .with_zoom_factors(1.5, 0.5);
        assert_eq!(c.rotate_sensitivity, 0.02);
        assert_eq!(c.zoom_in_factor, 1.5);
        assert_eq!(c.zoom_out_factor, 0.5);
    }
}
