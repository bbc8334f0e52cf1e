// Input mapper - Main coordination system for all input

use super::action::{Binding, BindingRecord, DeviceInput};
use super::buffer::{ActionBuffer, BufferConfig};
use super::combo::{SequenceDefinition, SequenceMatcher, SequenceRecord};
use super::config::{MappingTable, DEFAULT_CONTEXT};
use super::device::{
    GamepadAdapter, GamepadState, KeyboardAdapter, KeyboardState, MouseState,
    PointerAdapter, TouchAdapter, TouchState,
};
use super::{ConfigurationError, DeviceType, ValidationError};
use log::{debug, trace};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Resolves device state into actions once per tick
///
/// Owns the mapping table, one adapter per device class, the sequence matcher
/// and the action buffer. Not meant to be shared between threads or called
/// reentrantly.
pub struct InputMapper<K = KeyboardState, M = MouseState, G = GamepadState, T = TouchState> {
    /// Bindings for every context
    mapping: MappingTable,

    keyboard: K,
    mouse: M,
    gamepad: G,
    touch: T,

    /// Combo detection fed by bindings on the tick they become active
    matcher: SequenceMatcher,

    /// Inputs of the bindings that were active on the previous tick
    previously_active: HashSet<DeviceInput>,

    /// Recently resolved actions and completed combos
    buffer: ActionBuffer,

    /// Context whose bindings are resolved
    context: String,
}

impl InputMapper {
    /// Start building an input mapper
    pub fn builder() -> InputMapperBuilder {
        InputMapperBuilder::new()
    }
}

impl<K, M, G, T> InputMapper<K, M, G, T>
where
    K: KeyboardAdapter,
    M: PointerAdapter,
    G: GamepadAdapter,
    T: TouchAdapter,
{
    /// Switch the active context
    /// Unknown contexts are allowed and simply have no bindings
    pub fn set_context(&mut self, context: impl Into<String>) {
        let context = context.into();
        if context != self.context {
            debug!("Input context '{}' -> '{}'", self.context, context);
        }
        self.context = context;
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Refresh every device adapter
    /// Call this once per tick, before `resolve`
    pub fn refresh(&mut self) {
        self.keyboard.refresh();
        self.mouse.refresh();
        self.gamepad.refresh();
        self.touch.refresh();
    }

    /// Resolve the actions triggered this tick
    pub fn resolve(&mut self) -> Vec<String> {
        self.resolve_at(Instant::now())
    }

    /// Resolve the actions triggered this tick, observed at `now`
    ///
    /// Actions come in binding order and fire on every tick a binding is
    /// active. An input is fed to the sequence matcher once, on the tick it
    /// becomes active; the ids of sequences it completed follow its action.
    /// Duplicates are kept.
    pub fn resolve_at(&mut self, now: Instant) -> Vec<String> {
        let mut actions = Vec::new();
        let mut active_inputs = HashSet::new();

        for binding in self.mapping.bindings_for(&self.context) {
            if !self.is_active(binding) {
                continue;
            }

            actions.push(binding.action().to_string());
            self.buffer.push_at(binding.action(), now);

            // Held inputs and repeats within one tick are not new events
            let input = binding.input();
            if !active_inputs.insert(input.clone()) || self.previously_active.contains(input) {
                continue;
            }

            for id in self.matcher.observe_at(input, now) {
                self.buffer.push_at(id.as_str(), now);
                actions.push(id);
            }
        }

        self.previously_active = active_inputs;

        if !actions.is_empty() {
            trace!("Resolved {:?} in context '{}'", actions, self.context);
        }
        actions
    }

    /// Check a binding against the current device state
    fn is_active(&self, binding: &Binding) -> bool {
        let device_active = match binding.input() {
            DeviceInput::Keyboard { code } => self.keyboard.is_key_down(code),
            DeviceInput::Mouse { button } => self.mouse.is_button_down(*button),
            DeviceInput::Gamepad { button } => self
                .gamepad
                .connected_indices()
                .first()
                .is_some_and(|&gamepad| self.gamepad.is_button_down(gamepad, *button)),
            // Any touch satisfies every touch binding
            DeviceInput::Touch { .. } => self.touch.is_touching(),
        };

        device_active
            && binding
                .modifiers()
                .iter()
                .all(|modifier| self.keyboard.is_key_down(modifier))
    }
}

impl<K, M, G, T> InputMapper<K, M, G, T> {
    /// Recently resolved action ids, oldest first
    /// Without a window every buffered entry is returned regardless of age
    pub fn recent_actions(&self, window: Option<Duration>) -> Vec<String> {
        self.buffer.recent(window)
    }

    pub fn recent_actions_at(&self, window: Option<Duration>, now: Instant) -> Vec<String> {
        self.buffer.recent_at(window, now)
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    pub fn set_buffer_capacity(&mut self, capacity: usize) {
        self.buffer.set_capacity(capacity);
    }

    pub fn set_buffer_max_age(&mut self, max_age: Duration) {
        self.buffer.set_max_age(max_age);
    }

    pub fn buffer(&self) -> &ActionBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ActionBuffer {
        &mut self.buffer
    }

    /// Register a combo sequence
    pub fn add_sequence(&mut self, definition: SequenceDefinition) {
        self.matcher.add(definition);
    }

    pub fn add_sequence_record(&mut self, record: SequenceRecord) -> Result<(), ValidationError> {
        self.matcher.add_record(record)
    }

    /// Remove a combo sequence
    /// Returns true if it was registered
    pub fn remove_sequence(&mut self, id: &str) -> bool {
        self.matcher.remove(id)
    }

    pub fn matcher(&self) -> &SequenceMatcher {
        &self.matcher
    }

    /// Replace every binding, rejecting the whole batch on any invalid record
    pub fn load_bindings<I>(&mut self, records: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = BindingRecord>,
    {
        self.mapping.load(records)
    }

    pub fn add_binding(&mut self, record: BindingRecord) -> Result<(), ValidationError> {
        self.mapping.add(record)
    }

    /// Remove every binding for `action` in `context`
    pub fn remove_binding(&mut self, action: &str, context: &str) -> usize {
        self.mapping.remove(action, context)
    }

    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }

    pub fn mapping_mut(&mut self) -> &mut MappingTable {
        &mut self.mapping
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }

    pub fn mouse(&self) -> &M {
        &self.mouse
    }

    pub fn mouse_mut(&mut self) -> &mut M {
        &mut self.mouse
    }

    pub fn gamepad(&self) -> &G {
        &self.gamepad
    }

    pub fn gamepad_mut(&mut self) -> &mut G {
        &mut self.gamepad
    }

    pub fn touch(&self) -> &T {
        &self.touch
    }

    pub fn touch_mut(&mut self) -> &mut T {
        &mut self.touch
    }
}

/// Builder for [`InputMapper`]
///
/// Every adapter and the mapping table are required; `build` reports the
/// first one missing.
pub struct InputMapperBuilder<
    K = KeyboardState,
    M = MouseState,
    G = GamepadState,
    T = TouchState,
> {
    keyboard: Option<K>,
    mouse: Option<M>,
    gamepad: Option<G>,
    touch: Option<T>,
    mapping: Option<MappingTable>,
    buffer: BufferConfig,
    sequences: Vec<SequenceDefinition>,
    context: String,
}

impl InputMapperBuilder {
    pub fn new() -> Self {
        Self {
            keyboard: None,
            mouse: None,
            gamepad: None,
            touch: None,
            mapping: None,
            buffer: BufferConfig::default(),
            sequences: Vec::new(),
            context: DEFAULT_CONTEXT.to_string(),
        }
    }
}

impl Default for InputMapperBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, M, G, T> InputMapperBuilder<K, M, G, T> {
    pub fn keyboard<K2: KeyboardAdapter>(self, keyboard: K2) -> InputMapperBuilder<K2, M, G, T> {
        InputMapperBuilder {
            keyboard: Some(keyboard),
            mouse: self.mouse,
            gamepad: self.gamepad,
            touch: self.touch,
            mapping: self.mapping,
            buffer: self.buffer,
            sequences: self.sequences,
            context: self.context,
        }
    }

    pub fn mouse<M2: PointerAdapter>(self, mouse: M2) -> InputMapperBuilder<K, M2, G, T> {
        InputMapperBuilder {
            keyboard: self.keyboard,
            mouse: Some(mouse),
            gamepad: self.gamepad,
            touch: self.touch,
            mapping: self.mapping,
            buffer: self.buffer,
            sequences: self.sequences,
            context: self.context,
        }
    }

    pub fn gamepad<G2: GamepadAdapter>(self, gamepad: G2) -> InputMapperBuilder<K, M, G2, T> {
        InputMapperBuilder {
            keyboard: self.keyboard,
            mouse: self.mouse,
            gamepad: Some(gamepad),
            touch: self.touch,
            mapping: self.mapping,
            buffer: self.buffer,
            sequences: self.sequences,
            context: self.context,
        }
    }

    pub fn touch<T2: TouchAdapter>(self, touch: T2) -> InputMapperBuilder<K, M, G, T2> {
        InputMapperBuilder {
            keyboard: self.keyboard,
            mouse: self.mouse,
            gamepad: self.gamepad,
            touch: Some(touch),
            mapping: self.mapping,
            buffer: self.buffer,
            sequences: self.sequences,
            context: self.context,
        }
    }

    pub fn mapping(mut self, mapping: MappingTable) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn buffer_config(mut self, config: BufferConfig) -> Self {
        self.buffer = config;
        self
    }

    pub fn sequence(mut self, definition: SequenceDefinition) -> Self {
        self.sequences.push(definition);
        self
    }

    /// Context to start in instead of [`DEFAULT_CONTEXT`]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

impl<K, M, G, T> InputMapperBuilder<K, M, G, T>
where
    K: KeyboardAdapter,
    M: PointerAdapter,
    G: GamepadAdapter,
    T: TouchAdapter,
{
    pub fn build(self) -> Result<InputMapper<K, M, G, T>, ConfigurationError> {
        let keyboard = self
            .keyboard
            .ok_or(ConfigurationError::MissingAdapter(DeviceType::Keyboard))?;
        let mouse = self
            .mouse
            .ok_or(ConfigurationError::MissingAdapter(DeviceType::Mouse))?;
        let gamepad = self
            .gamepad
            .ok_or(ConfigurationError::MissingAdapter(DeviceType::Gamepad))?;
        let touch = self
            .touch
            .ok_or(ConfigurationError::MissingAdapter(DeviceType::Touch))?;
        let mapping = self.mapping.ok_or(ConfigurationError::MissingMapping)?;

        let mut matcher = SequenceMatcher::new();
        for definition in self.sequences {
            matcher.add(definition);
        }

        debug!(
            "Input mapper ready: {} bindings, {} sequences, context '{}'",
            mapping.len(),
            matcher.len(),
            self.context
        );

        Ok(InputMapper {
            mapping,
            keyboard,
            mouse,
            gamepad,
            touch,
            matcher,
            previously_active: HashSet::new(),
            buffer: ActionBuffer::with_config(self.buffer),
            context: self.context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn key(context: &str, action: &str, code: &str) -> BindingRecord {
        BindingRecord::new(context, action, "keyboard", code)
    }

    fn mapper_with(records: Vec<BindingRecord>) -> InputMapper {
        init_logger();
        let mut mapping = MappingTable::new();
        mapping.load(records).unwrap();

        InputMapper::builder()
            .keyboard(KeyboardState::new())
            .mouse(MouseState::new())
            .gamepad(GamepadState::new())
            .touch(TouchState::new())
            .mapping(mapping)
            .build()
            .unwrap()
    }

    fn hadouken() -> SequenceDefinition {
        SequenceDefinition::new(
            "hadouken",
            vec![
                DeviceInput::key("ArrowDown"),
                DeviceInput::key("ArrowRight"),
                DeviceInput::key("KeyP"),
            ],
            ms(500),
        )
        .unwrap()
    }

    #[test]
    fn test_mapper_creation() {
        let mapper = mapper_with(vec![]);
        assert_eq!(mapper.context(), DEFAULT_CONTEXT);
        assert!(mapper.recent_actions(None).is_empty());
    }

    #[test]
    fn test_build_requires_every_adapter() {
        let missing_keyboard = InputMapperBuilder::new()
            .mouse(MouseState::new())
            .gamepad(GamepadState::new())
            .touch(TouchState::new())
            .mapping(MappingTable::new())
            .build();
        assert!(matches!(
            missing_keyboard,
            Err(ConfigurationError::MissingAdapter(DeviceType::Keyboard))
        ));

        let missing_touch = InputMapper::builder()
            .keyboard(KeyboardState::new())
            .mouse(MouseState::new())
            .gamepad(GamepadState::new())
            .mapping(MappingTable::new())
            .build();
        assert!(matches!(
            missing_touch,
            Err(ConfigurationError::MissingAdapter(DeviceType::Touch))
        ));
    }

    #[test]
    fn test_build_requires_mapping() {
        let result = InputMapper::builder()
            .keyboard(KeyboardState::new())
            .mouse(MouseState::new())
            .gamepad(GamepadState::new())
            .touch(TouchState::new())
            .build();
        assert!(matches!(result, Err(ConfigurationError::MissingMapping)));
    }

    #[test]
    fn test_key_binding_resolves_action() {
        let mut mapper = mapper_with(vec![key("game", "jump", "Space")]);
        mapper.set_context("game");

        mapper.keyboard_mut().press("Space");
        mapper.refresh();
        assert_eq!(mapper.resolve(), vec!["jump"]);
    }

    #[test]
    fn test_inactive_binding_yields_nothing() {
        let mut mapper = mapper_with(vec![key("game", "jump", "Space")]);
        mapper.set_context("game");
        mapper.refresh();
        assert!(mapper.resolve().is_empty());
    }

    #[test]
    fn test_context_scopes_bindings() {
        let mut mapper = mapper_with(vec![
            key("game", "jump", "Space"),
            key("menu", "select", "Space"),
        ]);
        mapper.keyboard_mut().press("Space");
        mapper.refresh();

        mapper.set_context("game");
        assert_eq!(mapper.resolve(), vec!["jump"]);

        mapper.set_context("menu");
        assert_eq!(mapper.resolve(), vec!["select"]);

        mapper.set_context("credits");
        assert!(mapper.resolve().is_empty());
    }

    #[test]
    fn test_actions_follow_binding_order_with_duplicates() {
        let mut mapper = mapper_with(vec![
            key("game", "duck", "KeyS"),
            key("game", "jump", "Space"),
            key("game", "jump", "KeyW"),
        ]);
        mapper.set_context("game");
        mapper.keyboard_mut().press("Space");
        mapper.keyboard_mut().press("KeyW");
        mapper.keyboard_mut().press("KeyS");
        mapper.refresh();

        assert_eq!(mapper.resolve(), vec!["duck", "jump", "jump"]);
    }

    #[test]
    fn test_mouse_and_gamepad_bindings() {
        let mut mapper = mapper_with(vec![
            BindingRecord::new("game", "fire", "mouse", 0),
            BindingRecord::new("game", "jump", "gamepad", 0),
        ]);
        mapper.set_context("game");

        mapper.mouse_mut().press(0);
        mapper.gamepad_mut().connect(1);
        mapper.gamepad_mut().connect(3);
        mapper.gamepad_mut().press(1, 0);
        mapper.refresh();

        assert_eq!(mapper.resolve(), vec!["fire", "jump"]);
    }

    #[test]
    fn test_gamepad_uses_first_connected_pad() {
        let mut mapper = mapper_with(vec![BindingRecord::new("game", "jump", "gamepad", 0)]);
        mapper.set_context("game");

        // Only the second pad presses the button
        mapper.gamepad_mut().connect(0);
        mapper.gamepad_mut().connect(1);
        mapper.gamepad_mut().press(1, 0);
        mapper.refresh();
        assert!(mapper.resolve().is_empty());

        mapper.gamepad_mut().disconnect(0);
        mapper.refresh();
        assert_eq!(mapper.resolve(), vec!["jump"]);
    }

    #[test]
    fn test_gamepad_binding_inactive_without_pads() {
        let mut mapper = mapper_with(vec![BindingRecord::new("game", "jump", "gamepad", 0)]);
        mapper.set_context("game");
        mapper.refresh();
        assert!(mapper.resolve().is_empty());
    }

    #[test]
    fn test_any_touch_fires_every_touch_binding() {
        let mut mapper = mapper_with(vec![
            BindingRecord::new("game", "tap", "touch", 0),
            BindingRecord::new("game", "swipe", "touch", "left-half"),
        ]);
        mapper.set_context("game");

        mapper
            .touch_mut()
            .touch(9, winit::event::TouchPhase::Started, glam::Vec2::ZERO);
        mapper.refresh();
        assert_eq!(mapper.resolve(), vec!["tap", "swipe"]);
    }

    #[test]
    fn test_modifiers_must_be_held() {
        let mut sprint = key("game", "sprint", "KeyW");
        sprint.modifiers = vec!["ShiftLeft".to_string()];
        let mut mapper = mapper_with(vec![sprint]);
        mapper.set_context("game");

        mapper.keyboard_mut().press("KeyW");
        mapper.refresh();
        assert!(mapper.resolve().is_empty());

        mapper.keyboard_mut().press("ShiftLeft");
        mapper.refresh();
        assert_eq!(mapper.resolve(), vec!["sprint"]);
    }

    #[test]
    fn test_resolved_actions_are_buffered() {
        let mut mapper = mapper_with(vec![key("game", "jump", "Space")]);
        mapper.set_context("game");
        let start = Instant::now();

        mapper.keyboard_mut().press("Space");
        mapper.refresh();
        mapper.resolve_at(start);
        mapper.resolve_at(start + ms(200));

        let later = start + ms(250);
        assert_eq!(mapper.recent_actions_at(None, later), vec!["jump", "jump"]);
        assert_eq!(mapper.recent_actions_at(Some(ms(100)), later), vec!["jump"]);

        mapper.clear_buffer();
        assert!(mapper.recent_actions_at(None, later).is_empty());
    }

    #[test]
    fn test_buffer_pass_throughs() {
        let mut mapper = mapper_with(vec![key("game", "jump", "Space")]);
        mapper.set_context("game");
        mapper.keyboard_mut().press("Space");
        mapper.refresh();

        let start = Instant::now();
        for tick in 0..5 {
            mapper.resolve_at(start + ms(tick * 16));
        }
        mapper.set_buffer_capacity(2);
        assert_eq!(mapper.buffer().len(), 2);

        mapper.set_buffer_max_age(ms(1_000));
        assert!(mapper.buffer().has_at("jump", start + ms(900)));
    }

    #[test]
    fn test_combo_through_resolve() -> anyhow::Result<()> {
        init_logger();
        let mut mapping = MappingTable::new();
        mapping.load(vec![
            key("game", "crouch", "ArrowDown"),
            key("game", "forward", "ArrowRight"),
            key("game", "punch", "KeyP"),
        ])?;
        let mut mapper = InputMapper::builder()
            .keyboard(KeyboardState::new())
            .mouse(MouseState::new())
            .gamepad(GamepadState::new())
            .touch(TouchState::new())
            .mapping(mapping)
            .sequence(hadouken())
            .context("game")
            .build()?;
        let start = Instant::now();

        mapper.keyboard_mut().press("ArrowDown");
        mapper.refresh();
        assert_eq!(mapper.resolve_at(start), vec!["crouch"]);

        mapper.keyboard_mut().release("ArrowDown");
        mapper.keyboard_mut().press("ArrowRight");
        mapper.refresh();
        assert_eq!(mapper.resolve_at(start + ms(100)), vec!["forward"]);

        mapper.keyboard_mut().release("ArrowRight");
        mapper.keyboard_mut().press("KeyP");
        mapper.refresh();
        assert_eq!(mapper.resolve_at(start + ms(200)), vec!["punch", "hadouken"]);

        assert_eq!(
            mapper.recent_actions_at(None, start + ms(200)),
            vec!["crouch", "forward", "punch", "hadouken"]
        );
        Ok(())
    }

    #[test]
    fn test_combo_with_held_keys() {
        let mut mapper = mapper_with(vec![
            key("game", "crouch", "ArrowDown"),
            key("game", "forward", "ArrowRight"),
            key("game", "punch", "KeyP"),
        ]);
        mapper.set_context("game");
        mapper.add_sequence(hadouken());
        let start = Instant::now();
        let mut tick = 0;
        let mut actions = Vec::new();

        for (release, press, held_ticks) in [
            (None, "ArrowDown", 6),
            (Some("ArrowDown"), "ArrowRight", 6),
            (Some("ArrowRight"), "KeyP", 3),
        ] {
            if let Some(code) = release {
                mapper.keyboard_mut().release(code);
            }
            mapper.keyboard_mut().press(press);
            for _ in 0..held_ticks {
                mapper.refresh();
                actions.extend(mapper.resolve_at(start + ms(tick * 16)));
                tick += 1;
            }
        }

        // Held actions still fire every tick; the combo completes once
        assert_eq!(actions.iter().filter(|a| *a == "crouch").count(), 6);
        assert_eq!(actions.iter().filter(|a| *a == "forward").count(), 6);
        assert_eq!(actions.iter().filter(|a| *a == "hadouken").count(), 1);
        let punch = actions.iter().position(|a| a == "punch").unwrap();
        assert_eq!(actions[punch + 1], "hadouken");
    }

    #[test]
    fn test_repeated_press_feeds_combo_again() {
        let dash = SequenceDefinition::new(
            "dash",
            vec![DeviceInput::key("KeyD"), DeviceInput::key("KeyD")],
            ms(300),
        )
        .unwrap();
        let mut mapper = mapper_with(vec![key("game", "right", "KeyD")]);
        mapper.set_context("game");
        mapper.add_sequence(dash);
        let start = Instant::now();

        mapper.keyboard_mut().press("KeyD");
        mapper.refresh();
        assert_eq!(mapper.resolve_at(start), vec!["right"]);
        mapper.refresh();
        assert_eq!(mapper.resolve_at(start + ms(16)), vec!["right"]);

        mapper.keyboard_mut().release("KeyD");
        mapper.refresh();
        assert!(mapper.resolve_at(start + ms(32)).is_empty());

        mapper.keyboard_mut().press("KeyD");
        mapper.refresh();
        assert_eq!(mapper.resolve_at(start + ms(48)), vec!["right", "dash"]);
    }

    #[test]
    fn test_combo_too_slow_through_resolve() {
        let mut mapper = mapper_with(vec![
            key("game", "crouch", "ArrowDown"),
            key("game", "forward", "ArrowRight"),
            key("game", "punch", "KeyP"),
        ]);
        mapper.set_context("game");
        mapper.add_sequence(hadouken());
        let start = Instant::now();

        for (offset, (release, press)) in [
            (None, "ArrowDown"),
            (Some("ArrowDown"), "ArrowRight"),
            (Some("ArrowRight"), "KeyP"),
        ]
        .into_iter()
        .enumerate()
        {
            if let Some(code) = release {
                mapper.keyboard_mut().release(code);
            }
            mapper.keyboard_mut().press(press);
            mapper.refresh();
            let actions = mapper.resolve_at(start + ms(offset as u64 * 300));
            assert!(!actions.contains(&"hadouken".to_string()));
        }
    }

    #[test]
    fn test_sequence_pass_throughs() -> anyhow::Result<()> {
        let mut mapper = mapper_with(vec![]);
        mapper.add_sequence_record(serde_json::from_str(
            r#"{"id": "dash", "steps": [{"device": "keyboard", "code": "KeyD"}, {"device": "keyboard", "code": "KeyD"}], "max_window_ms": 200}"#,
        )?)?;
        assert!(mapper.matcher().contains("dash"));

        assert!(mapper.remove_sequence("dash"));
        assert!(!mapper.matcher().contains("dash"));
        Ok(())
    }

    #[test]
    fn test_binding_pass_throughs() -> anyhow::Result<()> {
        let mut mapper = mapper_with(vec![key("game", "jump", "Space")]);
        mapper.add_binding(key("game", "duck", "KeyS"))?;
        assert_eq!(mapper.mapping().bindings_for("game").len(), 2);

        assert!(mapper
            .load_bindings(vec![key("game", "jump", "Space"), key("", "broken", "KeyB")])
            .is_err());
        assert_eq!(mapper.mapping().bindings_for("game").len(), 2);

        assert_eq!(mapper.remove_binding("jump", "game"), 1);
        mapper.load_bindings(vec![key("menu", "back", "Escape")])?;
        assert!(mapper.mapping().bindings_for("game").is_empty());
        Ok(())
    }
}
