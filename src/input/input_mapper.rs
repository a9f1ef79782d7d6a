//! Input mapping from raw events to semantic actions
//!
//! Every key press is logged. Escape ends the application; everything else,
//! including mouse motion, is logged and otherwise ignored.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for mapped keys, `None` for everything else
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        log::debug!("Got key event: {:?}", key);

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None,
        }
    }

    /// Mouse motion has no effect beyond the log line
    pub fn map_mouse_motion(delta: (f64, f64)) -> Option<InputAction> {
        log::debug!("Got mouse motion: ({:.1}, {:.1})", delta.0, delta.1);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_other_keys_not_mapped() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::Space, KeyCode::Enter] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Released);
        assert_eq!(action, None);
    }

    #[test]
    fn test_mouse_motion_does_nothing() {
        assert_eq!(InputMapper::map_mouse_motion((12.0, -3.5)), None);
    }
}
