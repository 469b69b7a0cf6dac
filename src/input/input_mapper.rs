//! Input mapping from raw events to window-level actions
//!
//! View controls (drag, wheel, zoom, mode keys) are NOT mapped here - they go
//! directly to the InputController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions that act on the application rather than the rendered view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Quit (Escape)
    Exit,
    /// Toggle borderless fullscreen (F key)
    ToggleFullscreen,
    /// Restore orientation, zoom and segments to their configured values (R key)
    ResetView,
}

/// Maps raw keyboard events to [`InputAction`]s
pub struct InputMapper;

impl InputMapper {
    /// Returns `Some(action)` for application keys, `None` for everything else
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyR => Some(InputAction::ResetView),
            _ => None,
        }
    }
}
