// Touch adapter fed from winit touch events

use super::{DeviceAdapter, TouchAdapter};
use glam::Vec2;
use std::collections::HashMap;
use winit::event::{Touch, TouchPhase};

/// Active touch points by finger id
#[derive(Debug, Clone, Default)]
pub struct TouchState {
    /// Touch points applied on the last refresh
    points: HashMap<u64, Vec2>,

    /// A touch started and ended between the last two refreshes
    tapped: bool,

    pending: Vec<(u64, TouchPhase, Vec2)>,
}

impl TouchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a touch event from winit
    pub fn process_touch_event(&mut self, touch: &Touch) {
        let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
        self.touch(touch.id, touch.phase, position);
    }

    /// Queue a raw touch transition
    pub fn touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        self.pending.push((id, phase, position));
    }

    /// Position of one active touch point
    pub fn point(&self, id: u64) -> Option<Vec2> {
        self.points.get(&id).copied()
    }

    /// Number of active touch points
    pub fn touch_count(&self) -> usize {
        self.points.len()
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.tapped = false;
        self.pending.clear();
    }
}

impl DeviceAdapter for TouchState {
    fn refresh(&mut self) {
        self.tapped = false;
        for (id, phase, position) in self.pending.drain(..) {
            match phase {
                TouchPhase::Started | TouchPhase::Moved => {
                    self.points.insert(id, position);
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    if self.points.remove(&id).is_some() && phase == TouchPhase::Ended {
                        self.tapped = true;
                    }
                }
            }
        }
    }
}

impl TouchAdapter for TouchState {
    fn is_touching(&self) -> bool {
        !self.points.is_empty() || self.tapped
    }
}
