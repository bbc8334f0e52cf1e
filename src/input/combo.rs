// Sequence matcher for multi-step input combos
//
// Every registered sequence runs its own greedy state machine, idle or
// matching k steps. A wrong input aborts the attempt and the sequence has to
// be started again from its first step on a later event. A completed or
// expired attempt is consumed exactly once.

use super::action::{DeviceInput, InputRecord};
use super::ValidationError;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// An ordered list of inputs that must be observed within a time window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceDefinition {
    id: String,
    steps: Vec<DeviceInput>,
    max_window: Duration,
}

impl SequenceDefinition {
    /// Create a sequence, rejecting an empty id, no steps or a zero window
    pub fn new(
        id: impl Into<String>,
        steps: Vec<DeviceInput>,
        max_window: Duration,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptySequenceId);
        }
        if steps.is_empty() {
            return Err(ValidationError::EmptySequence(id));
        }
        if max_window.is_zero() {
            return Err(ValidationError::InvalidWindow(id));
        }

        Ok(Self {
            id,
            steps,
            max_window,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn steps(&self) -> &[DeviceInput] {
        &self.steps
    }

    /// Total time allowed from the first to the last step
    pub fn max_window(&self) -> Duration {
        self.max_window
    }
}

/// Serializable form of a [`SequenceDefinition`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub id: String,
    pub steps: Vec<InputRecord>,
    pub max_window_ms: i64,
}

impl TryFrom<SequenceRecord> for SequenceDefinition {
    type Error = ValidationError;

    fn try_from(record: SequenceRecord) -> Result<Self, Self::Error> {
        let steps = record
            .steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| {
                DeviceInput::try_from(step).map_err(|source| ValidationError::InvalidEntry {
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let max_window = u64::try_from(record.max_window_ms)
            .map(Duration::from_millis)
            .unwrap_or(Duration::ZERO);
        SequenceDefinition::new(record.id, steps, max_window)
    }
}

/// In-progress attempt for one sequence
#[derive(Debug, Clone, Copy)]
struct ActiveMatch {
    /// Number of steps matched so far
    matched: usize,

    /// Time of the first matched step
    started_at: Instant,
}

impl ActiveMatch {
    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }
}

/// Tracks registered sequences and at most one active attempt per sequence
#[derive(Debug, Default)]
pub struct SequenceMatcher {
    /// Definitions in evaluation order
    definitions: Vec<SequenceDefinition>,

    /// Active attempts keyed by definition id
    active: HashMap<String, ActiveMatch>,
}

impl SequenceMatcher {
    /// Create an empty matcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sequence
    ///
    /// A definition with an existing id replaces it in place and drops its
    /// active attempt. Past input is not replayed.
    pub fn add(&mut self, definition: SequenceDefinition) {
        self.active.remove(definition.id());
        debug!(
            "Registered sequence '{}' ({} steps, {:?} window)",
            definition.id(),
            definition.steps().len(),
            definition.max_window()
        );

        match self
            .definitions
            .iter_mut()
            .find(|existing| existing.id() == definition.id())
        {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
    }

    /// Register a sequence from its serializable record
    pub fn add_record(&mut self, record: SequenceRecord) -> Result<(), ValidationError> {
        self.add(SequenceDefinition::try_from(record)?);
        Ok(())
    }

    /// Remove a sequence and its active attempt
    /// Returns true if the sequence was registered
    pub fn remove(&mut self, id: &str) -> bool {
        self.active.remove(id);
        let before = self.definitions.len();
        self.definitions.retain(|definition| definition.id() != id);
        before != self.definitions.len()
    }

    /// Feed one just-triggered input observed now
    pub fn observe(&mut self, event: &DeviceInput) -> Vec<String> {
        self.observe_at(event, Instant::now())
    }

    /// Feed one just-triggered input observed at `now`
    ///
    /// Returns the ids of sequences completed by this event, in registration
    /// order. Attempts older than their window are swept afterwards even if
    /// this event was unrelated to them.
    pub fn observe_at(&mut self, event: &DeviceInput, now: Instant) -> Vec<String> {
        let mut completed = Vec::new();

        for definition in &self.definitions {
            let id = definition.id();
            let steps = definition.steps();

            match self.active.get_mut(id) {
                None => {
                    if steps[0] != *event {
                        continue;
                    }
                    if steps.len() == 1 {
                        debug!("Sequence '{}' completed", id);
                        completed.push(id.to_string());
                        continue;
                    }
                    trace!("Sequence '{}' started by {}", id, event);
                    self.active.insert(
                        id.to_string(),
                        ActiveMatch {
                            matched: 1,
                            started_at: now,
                        },
                    );
                }
                Some(attempt) => {
                    if steps[attempt.matched] != *event {
                        trace!(
                            "Sequence '{}' aborted at step {} by {}",
                            id,
                            attempt.matched,
                            event
                        );
                        self.active.remove(id);
                        continue;
                    }

                    attempt.matched += 1;
                    if attempt.matched < steps.len() {
                        continue;
                    }

                    let elapsed = attempt.elapsed(now);
                    self.active.remove(id);
                    if elapsed <= definition.max_window() {
                        debug!("Sequence '{}' completed in {:?}", id, elapsed);
                        completed.push(id.to_string());
                    } else {
                        trace!(
                            "Sequence '{}' matched but took {:?} (window {:?})",
                            id,
                            elapsed,
                            definition.max_window()
                        );
                    }
                }
            }
        }

        self.sweep_expired(now);
        completed
    }

    /// Drop active attempts whose window has passed
    pub fn sweep_expired(&mut self, now: Instant) {
        let definitions = &self.definitions;
        self.active.retain(|id, attempt| {
            let alive = definitions
                .iter()
                .find(|definition| definition.id() == id)
                .is_some_and(|definition| attempt.elapsed(now) <= definition.max_window());
            if !alive {
                trace!("Sequence '{}' expired", id);
            }
            alive
        });
    }

    /// Get a registered definition by id
    pub fn definition(&self, id: &str) -> Option<&SequenceDefinition> {
        self.definitions.iter().find(|definition| definition.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definition(id).is_some()
    }

    /// Check if a sequence has an attempt in progress
    pub fn is_matching(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    /// Number of steps matched by the active attempt, if any
    pub fn progress(&self, id: &str) -> Option<usize> {
        self.active.get(id).map(|attempt| attempt.matched)
    }

    /// Number of attempts in progress
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Iterate over definitions in evaluation order
    pub fn definitions(&self) -> impl Iterator<Item = &SequenceDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Drop every attempt in progress, keeping the definitions
    pub fn reset(&mut self) {
        self.active.clear();
    }

    /// Remove every definition and attempt
    pub fn clear(&mut self) {
        self.definitions.clear();
        self.active.clear();
    }
}
