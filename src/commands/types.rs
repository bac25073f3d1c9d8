//! Command system types.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::session::Session;

/// Result returned by a command handler.
pub type HandlerResult = Result<(), BoxError>;

/// Handler invoked when a command matches and all required options are present.
pub type CommandHandler =
    Arc<dyn Fn(&mut dyn Session, &ExecutionContext) -> HandlerResult + Send + Sync>;

/// A flag accepted by a command. Values are always kept as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub name: String,
    pub description: Option<String>,
    pub required: bool,
}

impl CommandOption {
    /// An optional flag with no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            required: false,
        }
    }

    /// A flag that must be supplied with a non-empty value.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(name)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Everything needed to register a command, minus its name.
#[derive(Clone)]
pub struct CommandSpec {
    pub handler: CommandHandler,
    pub options: Vec<CommandOption>,
    pub description: Option<String>,
}

impl CommandSpec {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&mut dyn Session, &ExecutionContext) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            options: Vec::new(),
            description: None,
        }
    }

    /// Declare an option. Redeclaring a name replaces the earlier
    /// declaration in place, keeping option names unique.
    pub fn option(mut self, option: CommandOption) -> Self {
        match self.options.iter_mut().find(|o| o.name == option.name) {
            Some(existing) => *existing = option,
            None => self.options.push(option),
        }
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A registered command. Immutable once created.
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub options: Vec<CommandOption>,
    pub handler: CommandHandler,
}

impl Command {
    pub fn new(name: impl Into<String>, spec: CommandSpec) -> Self {
        Self {
            name: name.into(),
            description: spec.description,
            options: spec.options,
            handler: spec.handler,
        }
    }

    /// Names of every declared option, in declaration order.
    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }

    /// Required options that are absent from `values` or present but empty,
    /// in declaration order.
    pub fn missing_required<'a>(&'a self, values: &OptionValues) -> Vec<&'a CommandOption> {
        self.options
            .iter()
            .filter(|o| o.required && !values.is_present(&o.name))
            .collect()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Parsed `--name value` pairs.
///
/// Holds every flag the parser produced, including flags the matched command
/// never declared. Extra keys pass through untouched; only declared required
/// options are ever validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValues(BTreeMap<String, String>);

impl OptionValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value. A repeated key overwrites the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// True when the option was supplied with a non-empty value.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for OptionValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Per-invocation data handed to a command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub command_name: String,
    /// Leftover positional tokens, in order.
    pub args: Vec<String>,
    pub options: OptionValues,
}
