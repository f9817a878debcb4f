//! Command registry: the catalogue of invocable commands.

use crate::command::CommandDefinition;
use crate::error::RegistryError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Mapping from command name to definition.
///
/// Built once at startup, read-only afterwards; lookups take `&self` and
/// never mutate, so concurrent dispatches share the registry without locking.
pub struct CommandRegistry {
    commands: HashMap<String, Arc<CommandDefinition>>,
    /// Registration order, drives the help surface grouping.
    order: Vec<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a command. Fails on duplicate names and on definitions that
    /// violate the platform naming constraints or declare `min > max`; the
    /// caller treats either as a fatal startup error.
    pub fn register(&mut self, definition: CommandDefinition) -> Result<(), RegistryError> {
        validate_name(&definition.name)?;

        for spec in &definition.options {
            if let (Some(min), Some(max)) = (spec.min, spec.max) {
                if min > max {
                    return Err(RegistryError::InvalidDefinition(format!(
                        "option '{}' of command '{}' declares min {} > max {}",
                        spec.name, definition.name, min, max
                    )));
                }
            }
        }

        if self.commands.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateCommand(definition.name.clone()));
        }

        debug!(command = %definition.name, category = %definition.category, "registered command");
        self.order.push(definition.name.clone());
        self.commands
            .insert(definition.name.clone(), Arc::new(definition));
        Ok(())
    }

    /// O(1), side-effect-free lookup.
    pub fn lookup(&self, name: &str) -> Option<Arc<CommandDefinition>> {
        self.commands.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands grouped by category for help/documentation surfaces.
    ///
    /// Categories appear in first-seen registration order; commands keep
    /// registration order within their category. Restartable: each call
    /// yields a fresh iteration.
    pub fn by_category(&self) -> impl Iterator<Item = (&str, Vec<&CommandDefinition>)> {
        let mut groups: Vec<(&str, Vec<&CommandDefinition>)> = Vec::new();
        for name in &self.order {
            let definition = self.commands[name].as_ref();
            match groups.iter_mut().find(|(c, _)| *c == definition.category) {
                Some((_, list)) => list.push(definition),
                None => groups.push((definition.category.as_str(), vec![definition])),
            }
        }
        groups.into_iter()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Platform naming constraints: lowercase, `[a-z0-9_-]`, 1..=32 chars.
fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() || name.len() > 32 {
        return Err(RegistryError::InvalidDefinition(format!(
            "command name '{}' must be 1-32 characters",
            name
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(RegistryError::InvalidDefinition(format!(
            "command name '{}' contains characters outside [a-z0-9_-]",
            name
        )));
    }
    Ok(())
}
