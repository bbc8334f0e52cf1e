//! Input abstraction layer for games and interactive applications.
//!
//! Keyboard, mouse, gamepad and touch state is resolved into semantic action
//! ids through a context-scoped mapping table. Active inputs also feed a
//! sequence matcher that detects multi-step combos, and every resolved action
//! lands in a bounded, timestamped buffer for timing-sensitive mechanics.
//!
//! The host application owns the loop and calls
//! [`InputMapper::refresh`](input::InputMapper::refresh) followed by
//! [`InputMapper::resolve`](input::InputMapper::resolve) once per tick.

pub mod input;

pub use input::{
    ActionBuffer, Binding, BindingRecord, ConfigurationError, DeviceInput, DeviceType,
    InputMapper, MappingTable, SequenceDefinition, SequenceMatcher, ValidationError,
};
