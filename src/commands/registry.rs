//! Command registry for centralized access.

use tracing::warn;

use super::types::Command;
use crate::error::RegistryError;

/// Ordered collection of commands owned by one library instance.
///
/// Names are unique: registering a name twice replaces the earlier entry
/// in place, so lookup and help enumeration always see the same command.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command, replacing any existing command with the same name.
    ///
    /// The replaced command keeps its original position in help output.
    /// Returns the command that was replaced, if any. Names that can never
    /// match a single token (empty or containing whitespace) are skipped.
    pub fn insert(&mut self, command: Command) -> Option<Command> {
        if !is_valid_name(&command.name) {
            warn!(command = ?command.name, "skipping command with unmatchable name");
            return None;
        }
        match self.position(&command.name) {
            Some(index) => {
                warn!(command = %command.name, "replacing previously registered command");
                Some(std::mem::replace(&mut self.commands[index], command))
            }
            None => {
                self.commands.push(command);
                None
            }
        }
    }

    /// Add a command, failing if the name is taken or unusable as a subcommand.
    pub fn try_insert(&mut self, command: Command) -> Result<(), RegistryError> {
        if !is_valid_name(&command.name) {
            return Err(RegistryError::InvalidName(command.name));
        }
        if self.position(&command.name).is_some() {
            return Err(RegistryError::DuplicateCommand(command.name));
        }
        self.commands.push(command);
        Ok(())
    }

    /// Look up a command by exact name.
    pub fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// All commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.commands.iter().position(|c| c.name == name)
    }
}

/// A subcommand name must be one non-empty whitespace-free token.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}
