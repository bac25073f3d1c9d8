//! Sub-command dispatch for chat messages.
//!
//! A [`CommandLibrary`] owns the commands registered under one trigger. Each
//! inbound message of the form `<trigger> <subcommand> [flags...]` runs
//! through [`CommandLibrary::dispatch`]:
//!
//! 1. authorize the sender; rejected users get no reply
//! 2. split the text on whitespace and look up the subcommand
//! 3. unknown or missing subcommand: reply with the help listing
//! 4. parse flags, declaring every option of the command as a string
//! 5. any required option absent or empty: reply with a syntax error
//! 6. otherwise call the handler with an [`ExecutionContext`]

use tracing::{debug, info, warn};

use crate::auth::{AllowAll, AllowList, Authorizer};
use crate::commands::{
    format_help, format_missing_options, Command, CommandRegistry, CommandSpec, ExecutionContext,
};
use crate::config::LibraryConfig;
use crate::error::{DispatchError, RegistryError};
use crate::flags::{FlagParser, MinimistParser};
use crate::session::Session;

/// Construction-time settings for a library.
#[derive(Default)]
pub struct LibrarySettings {
    /// Token that addresses the library. Defaults to the library name.
    pub alias: Option<String>,
    /// Defaults to [`AllowAll`].
    pub authorizer: Option<Box<dyn Authorizer>>,
}

impl LibrarySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizer = Some(Box::new(authorizer));
        self
    }
}

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The sender was rejected; nothing was sent.
    Unauthorized,
    /// The subcommand was absent or unknown; the help listing was sent.
    Help,
    /// Required options were missing; a syntax error was sent.
    MissingOptions { command: String, missing: Vec<String> },
    /// The handler ran to completion.
    Invoked { command: String },
}

/// A set of subcommands living under one chat trigger.
pub struct CommandLibrary {
    name: String,
    alias: String,
    registry: CommandRegistry,
    authorizer: Box<dyn Authorizer>,
    parser: Box<dyn FlagParser>,
}

impl CommandLibrary {
    /// Library with default settings: alias = name, everyone authorized.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_settings(name, LibrarySettings::default())
    }

    pub fn with_settings(name: impl Into<String>, settings: LibrarySettings) -> Self {
        let name = name.into();
        Self {
            alias: settings.alias.unwrap_or_else(|| name.clone()),
            name,
            registry: CommandRegistry::new(),
            authorizer: settings.authorizer.unwrap_or_else(|| Box::new(AllowAll)),
            parser: Box::new(MinimistParser),
        }
    }

    /// Build a library from on-disk settings.
    pub fn from_config(config: &LibraryConfig) -> Self {
        let mut settings = LibrarySettings::new();
        settings.alias = config.alias.clone();
        if let Some(allowed) = &config.allowed_users {
            settings = settings.authorizer(AllowList::new(allowed.iter().cloned()));
        }
        Self::with_settings(config.trigger.clone(), settings)
    }

    /// Swap the flag parser.
    pub fn with_parser(mut self, parser: impl FlagParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Register a command. A command with the same name is replaced; a name
    /// that is not a single token is skipped with a warning.
    pub fn command(&mut self, name: impl Into<String>, spec: CommandSpec) -> &mut Self {
        self.registry.insert(Command::new(name, spec));
        self
    }

    /// Register a command, failing if the name is already taken.
    pub fn try_command(
        &mut self,
        name: impl Into<String>,
        spec: CommandSpec,
    ) -> Result<&mut Self, RegistryError> {
        self.registry.try_insert(Command::new(name, spec))?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Whether a message is addressed to this library.
    pub fn matches(&self, text: &str) -> bool {
        text.split_whitespace()
            .next()
            .is_some_and(|token| token.eq_ignore_ascii_case(&self.alias))
    }

    /// Help listing as addressed from `bot_name`.
    pub fn help_text(&self, bot_name: &str) -> String {
        format_help(&self.registry, bot_name, &self.alias)
    }

    /// Run one turn.
    ///
    /// Handler failures are returned as [`DispatchError::Handler`] and never
    /// turned into a reply; the host decides how to report them.
    pub async fn dispatch(
        &self,
        session: &mut dyn Session,
    ) -> Result<DispatchOutcome, DispatchError> {
        let user = session.user().clone();
        if !self.authorizer.is_authorized(&user).await {
            warn!(library = %self.name, user = %user, "unauthorized command attempt");
            session.end_turn();
            return Ok(DispatchOutcome::Unauthorized);
        }

        let mut tokens = session.text().split_whitespace().skip(1);
        let subcommand = tokens.next().map(str::to_string);
        let rest: Vec<String> = tokens.map(str::to_string).collect();

        let Some(command) = subcommand
            .as_deref()
            .and_then(|name| self.registry.find(name))
        else {
            debug!(library = %self.name, subcommand = ?subcommand, "no matching command, sending help");
            let help = self.help_text(&session.bot().name);
            session.end_turn_with(&help);
            return Ok(DispatchOutcome::Help);
        };

        let parsed = self.parser.parse(&rest, &command.option_names());
        debug!(
            command = %command.name,
            options = parsed.named.len(),
            args = parsed.positional.len(),
            "parsed arguments"
        );

        let missing = command.missing_required(&parsed.named);
        if !missing.is_empty() {
            debug!(command = %command.name, missing = missing.len(), "required options missing");
            session.end_turn_with(&format_missing_options(command, &missing));
            return Ok(DispatchOutcome::MissingOptions {
                command: command.name.clone(),
                missing: missing.iter().map(|o| o.name.clone()).collect(),
            });
        }

        let context = ExecutionContext {
            command_name: command.name.clone(),
            args: parsed.positional,
            options: parsed.named,
        };

        info!(library = %self.name, command = %command.name, user = %user, "invoking command");
        (command.handler)(session, &context).map_err(|source| DispatchError::Handler {
            command: command.name.clone(),
            source,
        })?;

        Ok(DispatchOutcome::Invoked {
            command: command.name.clone(),
        })
    }
}
