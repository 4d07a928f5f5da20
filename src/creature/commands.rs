use crate::errors::{GeckoError, Result};

/// Named zero-argument operations, invoked by name from tooling.
pub struct CommandRegistry<T> {
    commands: Vec<(&'static str, fn(&mut T))>,
}

impl<T> Default for CommandRegistry<T> {
    fn default() -> Self {
        Self { commands: Vec::new() }
    }
}

impl<T> std::fmt::Debug for CommandRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl<T> CommandRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `command` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &'static str, command: fn(&mut T)) {
        match self.commands.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = command,
            None => self.commands.push((name, command)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|(name, _)| *name)
    }

    /// Looks up a command. The returned pointer does not borrow the registry,
    /// so it can run against the registry's owner.
    pub fn get(&self, name: &str) -> Result<fn(&mut T)> {
        self.commands
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, command)| command)
            .ok_or_else(|| GeckoError::UnknownCommand(name.to_string()))
    }

    pub fn invoke(&self, name: &str, target: &mut T) -> Result<()> {
        self.get(name)?(target);
        Ok(())
    }
}
