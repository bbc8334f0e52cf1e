// Input mapping system
//
// This module turns raw device state (keyboard, mouse, gamepad, touch) into a
// per-tick list of semantic action ids, driven by a context-scoped mapping table.
//
// ## Architecture
//
// - `action`: Bindings, device inputs and their serializable records
// - `config`: Mapping table of bindings grouped by context
// - `combo`: Sequence matcher for multi-step input combos
// - `buffer`: Bounded, timestamped log of recently resolved actions
// - `device`: Device adapter traits and reference adapters
// - `manager`: Input mapper coordinating everything once per tick
//
// ## Usage Example
//
// ```rust,ignore
// use rusted_input::input::{
//     BindingRecord, GamepadState, InputMapper, KeyboardState, MappingTable, MouseState,
//     TouchState,
// };
//
// let mut mapping = MappingTable::new();
// mapping.load(vec![BindingRecord::new("game", "jump", "keyboard", "Space")])?;
//
// let mut mapper = InputMapper::builder()
//     .keyboard(KeyboardState::new())
//     .mouse(MouseState::new())
//     .gamepad(GamepadState::new())
//     .touch(TouchState::new())
//     .mapping(mapping)
//     .build()?;
// mapper.set_context("game");
//
// // Once per frame
// mapper.refresh();
// for action in mapper.resolve() {
//     // React to "jump", combo ids, ...
// }
// ```

pub mod action;
pub mod buffer;
pub mod combo;
pub mod config;
pub mod device;
pub mod manager;

// Re-export commonly used types
pub use action::{Binding, BindingRecord, DeviceInput, DeviceType, InputCode, InputRecord};
pub use buffer::{ActionBuffer, BufferConfig, BufferedAction};
pub use combo::{SequenceDefinition, SequenceMatcher, SequenceRecord};
pub use config::{MappingTable, DEFAULT_CONTEXT};
pub use device::{
    DeviceAdapter, GamepadAdapter, GamepadState, KeyboardAdapter, KeyboardState, MouseState,
    PointerAdapter, TouchAdapter, TouchState,
};
pub use manager::{InputMapper, InputMapperBuilder};

/// Malformed binding or sequence definition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Binding context must not be empty")]
    EmptyContext,

    #[error("Binding action must not be empty")]
    EmptyAction,

    #[error("Unknown device type: {0}")]
    UnknownDevice(String),

    #[error("Invalid code for {device}: '{code}'")]
    InvalidCode { device: DeviceType, code: String },

    #[error("Modifier key names must not be empty")]
    EmptyModifier,

    #[error("Sequence id must not be empty")]
    EmptySequenceId,

    #[error("Sequence '{0}' has no steps")]
    EmptySequence(String),

    #[error("Sequence '{0}' needs a time window greater than zero")]
    InvalidWindow(String),

    #[error("Invalid entry at index {index}: {source}")]
    InvalidEntry {
        index: usize,
        source: Box<ValidationError>,
    },
}

/// Input mapper constructed without all of its collaborators
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Missing {0} adapter")]
    MissingAdapter(DeviceType),

    #[error("Missing mapping table")]
    MissingMapping,
}
