// Device adapters
//
// The input mapper only reads device state through these traits. The
// reference adapters queue raw events as they arrive (usually from winit) and
// apply them on `refresh`, so every `resolve` call sees one consistent snapshot.

mod gamepad;
mod keyboard;
mod mouse;
mod touch;

pub use gamepad::{GamepadEvent, GamepadState};
pub use keyboard::{key_code_name, KeyboardState};
pub use mouse::{button_index, MouseState};
pub use touch::TouchState;

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

/// Common surface of every device adapter
pub trait DeviceAdapter {
    /// Sync queryable state with the events received since the last call
    /// Call this once per tick before resolving actions
    fn refresh(&mut self);
}

/// Keyboard queries by key code name
pub trait KeyboardAdapter: DeviceAdapter {
    fn is_key_down(&self, code: &str) -> bool;
}

/// Mouse/pointer queries by button index
pub trait PointerAdapter: DeviceAdapter {
    fn is_button_down(&self, button: u32) -> bool;
}

/// Gamepad queries by pad index and button index
pub trait GamepadAdapter: DeviceAdapter {
    fn is_button_down(&self, gamepad: usize, button: u32) -> bool;

    /// Indices of connected gamepads, lowest first
    fn connected_indices(&self) -> Vec<usize>;
}

/// Coarse touch presence
pub trait TouchAdapter: DeviceAdapter {
    fn is_touching(&self) -> bool;
}

/// Pressed/released bookkeeping shared by the button-style adapters
///
/// A press that is released again before the next `apply` still reads as
/// down for the tick that follows, so quick taps are not lost.
#[derive(Debug, Clone)]
pub(crate) struct ButtonSet<T> {
    down: HashSet<T>,
    tapped: HashSet<T>,
    pending: Vec<(T, bool)>,
}

impl<T: Eq + Hash + Clone> ButtonSet<T> {
    pub(crate) fn new() -> Self {
        Self {
            down: HashSet::new(),
            tapped: HashSet::new(),
            pending: Vec::new(),
        }
    }

    pub(crate) fn press(&mut self, button: T) {
        self.pending.push((button, true));
    }

    pub(crate) fn release(&mut self, button: T) {
        self.pending.push((button, false));
    }

    /// Apply queued events in arrival order
    pub(crate) fn apply(&mut self) {
        self.tapped.clear();
        for (button, pressed) in self.pending.drain(..) {
            if pressed {
                if self.down.insert(button.clone()) {
                    self.tapped.insert(button);
                }
            } else {
                self.down.remove(&button);
            }
        }
    }

    pub(crate) fn is_down<Q>(&self, button: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.down.contains(button) || self.tapped.contains(button)
    }

    /// Buttons held after the last `apply`
    pub(crate) fn held(&self) -> impl Iterator<Item = &T> {
        self.down.iter()
    }

    pub(crate) fn reset(&mut self) {
        self.down.clear();
        self.tapped.clear();
        self.pending.clear();
    }
}

impl<T: Eq + Hash + Clone> Default for ButtonSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
