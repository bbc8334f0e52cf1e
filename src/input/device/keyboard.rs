// Keyboard adapter fed from winit key events

use super::{ButtonSet, DeviceAdapter, KeyboardAdapter};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Name used in bindings for a physical key, e.g. `"Space"` or `"ArrowDown"`
pub fn key_code_name(code: KeyCode) -> String {
    format!("{:?}", code)
}

/// Keyboard state keyed by key code name
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    keys: ButtonSet<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only physical keys with a known code can be bound
        if let PhysicalKey::Code(code) = event.physical_key {
            self.process_key(code, event.state, event.repeat);
        }
    }

    /// Process a raw key transition, ignoring key repeats
    pub fn process_key(&mut self, code: KeyCode, state: ElementState, repeat: bool) {
        match state {
            ElementState::Pressed if !repeat => self.press(key_code_name(code)),
            ElementState::Pressed => {}
            ElementState::Released => self.release(key_code_name(code)),
        }
    }

    /// Queue a key press by name
    pub fn press(&mut self, code: impl Into<String>) {
        self.keys.press(code.into());
    }

    /// Queue a key release by name
    pub fn release(&mut self, code: impl Into<String>) {
        self.keys.release(code.into());
    }

    /// Names of keys currently held
    pub fn held_keys(&self) -> Vec<&str> {
        self.keys.held().map(String::as_str).collect()
    }

    /// Forget every key, including queued events
    pub fn reset(&mut self) {
        self.keys.reset();
    }
}

impl DeviceAdapter for KeyboardState {
    fn refresh(&mut self) {
        self.keys.apply();
    }
}

impl KeyboardAdapter for KeyboardState {
    fn is_key_down(&self, code: &str) -> bool {
        self.keys.is_down(code)
    }
}
