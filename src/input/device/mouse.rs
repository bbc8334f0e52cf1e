// Mouse adapter fed from winit button and cursor events

use super::{ButtonSet, DeviceAdapter, PointerAdapter};
use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton};

/// Button index used in bindings (0 left, 1 middle, 2 right, 3 back, 4 forward)
pub fn button_index(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(index) => u32::from(index),
    }
}

/// Mouse button and cursor state
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    buttons: ButtonSet<u32>,

    /// Cursor position applied on the last refresh
    position: Vec2,

    /// Latest cursor position not yet applied
    pending_position: Option<Vec2>,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let index = button_index(button);
        match state {
            ElementState::Pressed => self.press(index),
            ElementState::Released => self.release(index),
        }
    }

    /// Process a cursor move event from winit
    pub fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.move_to(Vec2::new(position.x as f32, position.y as f32));
    }

    pub fn press(&mut self, button: u32) {
        self.buttons.press(button);
    }

    pub fn release(&mut self, button: u32) {
        self.buttons.release(button);
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.pending_position = Some(position);
    }

    /// Cursor position in physical pixels
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn reset(&mut self) {
        self.buttons.reset();
        self.pending_position = None;
    }
}

impl DeviceAdapter for MouseState {
    fn refresh(&mut self) {
        self.buttons.apply();
        if let Some(position) = self.pending_position.take() {
            self.position = position;
        }
    }
}

impl PointerAdapter for MouseState {
    fn is_button_down(&self, button: u32) -> bool {
        self.buttons.is_down(&button)
    }
}
