// Gamepad adapter: connection tracking and buttons per pad

use super::{ButtonSet, DeviceAdapter, GamepadAdapter};
use std::collections::BTreeMap;

/// Raw gamepad event as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamepadEvent {
    Connected(usize),
    Disconnected(usize),
    ButtonPressed { gamepad: usize, button: u32 },
    ButtonReleased { gamepad: usize, button: u32 },
}

/// Button state for every connected gamepad
#[derive(Debug, Clone, Default)]
pub struct GamepadState {
    pads: BTreeMap<usize, ButtonSet<u32>>,
    pending: Vec<GamepadEvent>,
}

impl GamepadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event to apply on the next refresh
    pub fn process_event(&mut self, event: GamepadEvent) {
        self.pending.push(event);
    }

    pub fn connect(&mut self, gamepad: usize) {
        self.process_event(GamepadEvent::Connected(gamepad));
    }

    pub fn disconnect(&mut self, gamepad: usize) {
        self.process_event(GamepadEvent::Disconnected(gamepad));
    }

    pub fn press(&mut self, gamepad: usize, button: u32) {
        self.process_event(GamepadEvent::ButtonPressed { gamepad, button });
    }

    pub fn release(&mut self, gamepad: usize, button: u32) {
        self.process_event(GamepadEvent::ButtonReleased { gamepad, button });
    }

    pub fn is_connected(&self, gamepad: usize) -> bool {
        self.pads.contains_key(&gamepad)
    }
}

impl DeviceAdapter for GamepadState {
    fn refresh(&mut self) {
        for event in self.pending.drain(..) {
            match event {
                GamepadEvent::Connected(gamepad) => {
                    self.pads.entry(gamepad).or_default();
                }
                GamepadEvent::Disconnected(gamepad) => {
                    self.pads.remove(&gamepad);
                }
                // Button events from a pad that is not connected are dropped
                GamepadEvent::ButtonPressed { gamepad, button } => {
                    if let Some(buttons) = self.pads.get_mut(&gamepad) {
                        buttons.press(button);
                    }
                }
                GamepadEvent::ButtonReleased { gamepad, button } => {
                    if let Some(buttons) = self.pads.get_mut(&gamepad) {
                        buttons.release(button);
                    }
                }
            }
        }

        for buttons in self.pads.values_mut() {
            buttons.apply();
        }
    }
}

impl GamepadAdapter for GamepadState {
    fn is_button_down(&self, gamepad: usize, button: u32) -> bool {
        self.pads
            .get(&gamepad)
            .is_some_and(|buttons| buttons.is_down(&button))
    }

    fn connected_indices(&self) -> Vec<usize> {
        self.pads.keys().copied().collect()
    }
}
