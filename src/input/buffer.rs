// Action buffer: bounded, timestamped log of recently resolved actions

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default number of buffered actions to keep
pub const DEFAULT_CAPACITY: usize = 10;

/// Default age after which a buffered action counts as stale
pub const DEFAULT_MAX_AGE: Duration = Duration::from_millis(100);

/// Buffer sizing and staleness settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    pub capacity: usize,
    pub max_age: Duration,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

/// A single buffered action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedAction {
    pub action: String,
    pub timestamp: Instant,
}

impl BufferedAction {
    /// Time elapsed since this action was recorded
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.timestamp)
    }
}

/// Recently resolved actions, oldest first
///
/// Only the capacity bounds what is kept. Entries older than `max_age` stay
/// in the buffer and are still returned by [`ActionBuffer::recent`] without a
/// window; `max_age` is the default window for [`ActionBuffer::has`] and
/// [`ActionBuffer::consume`], and for the explicit [`ActionBuffer::prune`].
#[derive(Debug, Clone)]
pub struct ActionBuffer {
    buffer: VecDeque<BufferedAction>,
    capacity: usize,
    max_age: Duration,
}

impl ActionBuffer {
    /// Create a buffer with the default capacity and max age
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            buffer: VecDeque::with_capacity(config.capacity),
            capacity: config.capacity,
            max_age: config.max_age,
        }
    }

    /// Record an action now
    pub fn push(&mut self, action: impl Into<String>) {
        self.push_at(action, Instant::now());
    }

    /// Record an action at `now`, evicting the oldest entries past capacity
    pub fn push_at(&mut self, action: impl Into<String>, now: Instant) {
        self.buffer.push_back(BufferedAction {
            action: action.into(),
            timestamp: now,
        });
        self.evict_overflow();
    }

    /// Buffered action ids in insertion order
    ///
    /// Without a window every entry is returned regardless of age. With a
    /// window only entries whose age is at most `window` are returned.
    pub fn recent(&self, window: Option<Duration>) -> Vec<String> {
        self.recent_at(window, Instant::now())
    }

    pub fn recent_at(&self, window: Option<Duration>, now: Instant) -> Vec<String> {
        self.buffer
            .iter()
            .filter(|entry| window.map_or(true, |window| entry.age(now) <= window))
            .map(|entry| entry.action.clone())
            .collect()
    }

    /// Check if an action was buffered within `max_age`
    pub fn has(&self, action: &str) -> bool {
        self.has_at(action, Instant::now())
    }

    pub fn has_at(&self, action: &str, now: Instant) -> bool {
        self.buffer
            .iter()
            .any(|entry| entry.action == action && entry.age(now) <= self.max_age)
    }

    /// Consume the newest fresh entry of an action
    /// Returns true if the action was found and consumed
    pub fn consume(&mut self, action: &str) -> bool {
        self.consume_at(action, Instant::now())
    }

    pub fn consume_at(&mut self, action: &str, now: Instant) -> bool {
        let max_age = self.max_age;
        if let Some(pos) = self
            .buffer
            .iter()
            .rposition(|entry| entry.action == action && entry.age(now) <= max_age)
        {
            self.buffer.remove(pos);
            true
        } else {
            false
        }
    }

    /// Drop every entry older than `max_age`
    pub fn prune(&mut self) {
        self.prune_at(Instant::now());
    }

    pub fn prune_at(&mut self, now: Instant) {
        let max_age = self.max_age;
        self.buffer.retain(|entry| entry.age(now) <= max_age);
    }

    /// Clear all buffered actions
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Change the capacity, evicting the oldest entries if over it
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.evict_overflow();
    }

    pub fn set_max_age(&mut self, max_age: Duration) {
        self.max_age = max_age;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Iterate over buffered entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &BufferedAction> {
        self.buffer.iter()
    }

    /// Get the number of buffered actions
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn evict_overflow(&mut self) {
        while self.buffer.len() > self.capacity {
            self.buffer.pop_front();
        }
    }
}

impl Default for ActionBuffer {
    fn default() -> Self {
        Self::new()
    }
}
