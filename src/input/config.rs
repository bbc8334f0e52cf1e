// Mapping table: bindings grouped by context

use super::action::{Binding, BindingRecord};
use super::ValidationError;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Context the input mapper starts in
pub const DEFAULT_CONTEXT: &str = "default";

/// Maps context names to their ordered list of bindings
///
/// Binding order inside a context is insertion order, and it is the order in
/// which actions fire. Duplicate bindings are allowed and simply both fire.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    /// Bindings per context, in insertion order
    contexts: HashMap<String, Vec<Binding>>,
}

impl MappingTable {
    /// Create an empty mapping table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from already validated bindings
    pub fn from_bindings(bindings: Vec<Binding>) -> Self {
        let mut table = Self::new();
        for binding in bindings {
            table.add_binding(binding);
        }
        table
    }

    /// Replace the whole table with `records`
    ///
    /// Either every record is valid and the table is replaced, or the first
    /// invalid record is reported and the table is left untouched.
    pub fn load<I>(&mut self, records: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = BindingRecord>,
    {
        let mut contexts: HashMap<String, Vec<Binding>> = HashMap::new();
        let mut count = 0;

        for (index, record) in records.into_iter().enumerate() {
            let binding = Binding::try_from(record).map_err(|source| {
                warn!("Rejected mapping load: entry {} is invalid ({})", index, source);
                ValidationError::InvalidEntry {
                    index,
                    source: Box::new(source),
                }
            })?;
            contexts
                .entry(binding.context().to_string())
                .or_default()
                .push(binding);
            count += 1;
        }

        info!(
            "Loaded {} bindings across {} contexts",
            count,
            contexts.len()
        );
        self.contexts = contexts;
        Ok(())
    }

    /// Validate `record` and append it to its context
    pub fn add(&mut self, record: BindingRecord) -> Result<(), ValidationError> {
        let binding = Binding::try_from(record).map_err(|err| {
            warn!("Rejected binding: {}", err);
            err
        })?;
        self.add_binding(binding);
        Ok(())
    }

    /// Append a validated binding to its context
    pub fn add_binding(&mut self, binding: Binding) {
        debug!(
            "Bound {} to '{}' in context '{}'",
            binding.input(),
            binding.action(),
            binding.context()
        );
        self.contexts
            .entry(binding.context().to_string())
            .or_default()
            .push(binding);
    }

    /// Remove every binding for `action` in `context`
    ///
    /// Returns the number of bindings removed; zero is not an error.
    pub fn remove(&mut self, action: &str, context: &str) -> usize {
        let Some(bindings) = self.contexts.get_mut(context) else {
            return 0;
        };

        let before = bindings.len();
        bindings.retain(|binding| binding.action() != action);
        let removed = before - bindings.len();

        if bindings.is_empty() {
            self.contexts.remove(context);
        }
        if removed > 0 {
            debug!(
                "Removed {} bindings for '{}' in context '{}'",
                removed, action, context
            );
        }
        removed
    }

    /// Get the bindings for a context, empty if the context is unknown
    pub fn bindings_for(&self, context: &str) -> &[Binding] {
        self.contexts
            .get(context)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Get the bindings for one action within a context
    pub fn bindings_for_action<'a>(
        &'a self,
        action: &'a str,
        context: &str,
    ) -> impl Iterator<Item = &'a Binding> + 'a {
        self.bindings_for(context)
            .iter()
            .filter(move |binding| binding.action() == action)
    }

    /// Check whether an equivalent binding is already present
    pub fn contains(&self, binding: &Binding) -> bool {
        self.bindings_for(binding.context())
            .iter()
            .any(|existing| existing.same_target(binding))
    }

    /// Names of all contexts that have at least one binding
    /// Context order is unspecified
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }

    /// Serializable form of every binding, grouped by context
    ///
    /// Bindings keep their order within a context; the order of the
    /// contexts themselves is unspecified.
    pub fn records(&self) -> Vec<BindingRecord> {
        self.contexts
            .values()
            .flatten()
            .map(BindingRecord::from)
            .collect()
    }

    /// Total number of bindings across all contexts
    pub fn len(&self) -> usize {
        self.contexts.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Clear all bindings
    pub fn clear(&mut self) {
        self.contexts.clear();
    }
}
