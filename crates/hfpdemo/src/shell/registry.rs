//! Fixed-capacity command table

use super::parser::Parameter;
use crate::error::{RegistryError, ShellError};
use crate::session::Session;
use crate::stack::BluetoothStack;

/// Signature every command handler has
pub type CommandFn<S> = fn(&mut Session<S>, &[Parameter]) -> Result<(), ShellError>;

pub struct CommandEntry<S: BluetoothStack> {
    pub name: &'static str,
    pub handler: CommandFn<S>,
}

/// Ordered command table
///
/// Lookup returns the first entry whose name is a prefix of the uppercased
/// input, so entries sharing a prefix must be registered longest first.
pub struct CommandRegistry<S: BluetoothStack> {
    entries: Vec<CommandEntry<S>>,
    capacity: usize,
}

impl<S: BluetoothStack> CommandRegistry<S> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a command; names must be upper case
    pub fn register(&mut self, name: &'static str, handler: CommandFn<S>) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.entries.len() >= self.capacity {
            return Err(RegistryError::Full(self.capacity));
        }
        self.entries.push(CommandEntry { name, handler });
        Ok(())
    }

    pub fn find(&self, command: &str) -> Option<CommandFn<S>> {
        let command = command.to_ascii_uppercase();
        self.entries
            .iter()
            .find(|entry| command.starts_with(entry.name))
            .map(|entry| entry.handler)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::RecordingStack;

    fn first(_: &mut Session<RecordingStack>, _: &[Parameter]) -> Result<(), ShellError> {
        Ok(())
    }

    fn second(_: &mut Session<RecordingStack>, _: &[Parameter]) -> Result<(), ShellError> {
        Err(ShellError::FunctionError)
    }

    #[test]
    fn test_register_until_full() {
        let mut registry = CommandRegistry::<RecordingStack>::new(2);
        assert!(registry.register("A", first).is_ok());
        assert!(registry.register("B", first).is_ok());
        assert_eq!(registry.register("C", first), Err(RegistryError::Full(2)));
        assert_eq!(registry.len(), 2);
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_rejects_empty_name() {
        let mut registry = CommandRegistry::<RecordingStack>::new(2);
        assert_eq!(registry.register("", first), Err(RegistryError::EmptyName));
    }

    #[test]
    fn test_lookup_is_case_insensitive_prefix() {
        let mut registry = CommandRegistry::<RecordingStack>::new(4);
        registry.register("CLOSEHFSERVER", first).unwrap();
        registry.register("CLOSE", second).unwrap();

        assert!(registry.find("closehfserver").is_some());
        assert!(registry.find("Close").is_some());
        assert!(registry.find("CLOS").is_none());
        assert!(registry.find("OPEN").is_none());

        let found = registry.find("closehfserver").unwrap();
        assert!(found as usize == first as CommandFn<RecordingStack> as usize);
        let found = registry.find("close").unwrap();
        assert!(found as usize == second as CommandFn<RecordingStack> as usize);
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["CLOSEHFSERVER", "CLOSE"]
        );
    }
}
