//! Window input for the void.
//!
//! [`Input`] turns raw winit events into the two things the void cares
//! about: keys pressed this frame and the pointer position in NDC. Mouse
//! movement and touch both drive the same [`CursorState`].
//!
//! ```ignore
//! input.handle_event(&event);
//! if let Some(formation) = input.pressed_formation() {
//!     store.set(&SceneOverrides { formation: Some(formation), ..Default::default() });
//! }
//! let particles = void.tick_realtime(input.cursor());
//! input.begin_frame();
//! ```

use std::collections::HashSet;

use winit::event::{ElementState, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::cursor::CursorState;
use crate::formation::Formation;

/// Keys the void responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Key1, Key2, Key3, Key4, Key5, Key6, Key7,
    C, P, R,
    Space, Escape,
    Other(u32),
}

impl KeyCode {
    /// Formation bound to a number key, `1` through `7`.
    pub fn formation(self) -> Option<Formation> {
        let index = match self {
            KeyCode::Key1 => 0,
            KeyCode::Key2 => 1,
            KeyCode::Key3 => 2,
            KeyCode::Key4 => 3,
            KeyCode::Key5 => 4,
            KeyCode::Key6 => 5,
            KeyCode::Key7 => 6,
            _ => return None,
        };
        Formation::from_index(index)
    }
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::Digit1 | WinitKeyCode::Numpad1 => KeyCode::Key1,
            WinitKeyCode::Digit2 | WinitKeyCode::Numpad2 => KeyCode::Key2,
            WinitKeyCode::Digit3 | WinitKeyCode::Numpad3 => KeyCode::Key3,
            WinitKeyCode::Digit4 | WinitKeyCode::Numpad4 => KeyCode::Key4,
            WinitKeyCode::Digit5 | WinitKeyCode::Numpad5 => KeyCode::Key5,
            WinitKeyCode::Digit6 | WinitKeyCode::Numpad6 => KeyCode::Key6,
            WinitKeyCode::Digit7 | WinitKeyCode::Numpad7 => KeyCode::Key7,
            WinitKeyCode::KeyC => KeyCode::C,
            WinitKeyCode::KeyP => KeyCode::P,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Keyboard and pointer state.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    cursor: CursorState,
    window_size: (u32, u32),
}

impl Input {
    /// Create empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` went down this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Whether `key` is currently held.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Formation whose number key went down this frame, if any.
    ///
    /// When several were pressed at once the highest-numbered wins.
    pub fn pressed_formation(&self) -> Option<Formation> {
        self.keys_pressed.iter().filter_map(|k| k.formation()).max_by_key(|f| f.index())
    }

    /// Pointer position in NDC.
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Clear per-frame state. Call after the frame has consumed input.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Update window size for NDC conversion.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Record a key going down. Repeats while held are ignored.
    pub fn press(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    /// Record a key going up.
    pub fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    /// Record a pointer position in window pixels.
    pub fn move_pointer(&mut self, x: f32, y: f32) {
        let (w, h) = self.window_size;
        self.cursor.set_from_pixels(x, y, w as f32, h as f32);
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press(code.into()),
                        ElementState::Released => self.release(code.into()),
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.move_pointer(position.x as f32, position.y as f32);
            }

            WindowEvent::Touch(touch) if matches!(touch.phase, TouchPhase::Started | TouchPhase::Moved) => {
                self.move_pointer(touch.location.x as f32, touch.location.y as f32);
            }

            WindowEvent::Resized(size) => self.set_window_size(size.width, size.height),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_key_state() {
        let mut input = Input::new();
        assert!(!input.key_pressed(KeyCode::Space));

        input.press(KeyCode::Space);
        assert!(input.key_held(KeyCode::Space));
        assert!(input.key_pressed(KeyCode::Space));

        // Held keys do not re-fire
        input.begin_frame();
        input.press(KeyCode::Space);
        assert!(input.key_held(KeyCode::Space));
        assert!(!input.key_pressed(KeyCode::Space));

        input.release(KeyCode::Space);
        input.press(KeyCode::Space);
        assert!(input.key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_number_keys_map_to_formations() {
        assert_eq!(KeyCode::Key1.formation(), Some(Formation::Default));
        assert_eq!(KeyCode::Key4.formation(), Some(Formation::Orbit));
        assert_eq!(KeyCode::Key7.formation(), Some(Formation::Converge));
        assert_eq!(KeyCode::C.formation(), None);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit5), KeyCode::Key5);

        let mut input = Input::new();
        input.press(KeyCode::Key2);
        input.press(KeyCode::Key6);
        assert_eq!(input.pressed_formation(), Some(Formation::Pulse));
    }

    #[test]
    fn test_pointer_to_ndc() {
        let mut input = Input::new();
        input.move_pointer(100.0, 100.0);
        assert_eq!(input.cursor().ndc, Vec2::ZERO);

        input.set_window_size(800, 600);
        input.move_pointer(400.0, 300.0);
        assert_eq!(input.cursor().ndc, Vec2::ZERO);

        input.move_pointer(800.0, 0.0);
        assert_eq!(input.cursor().ndc, Vec2::new(1.0, 1.0));
    }
}
