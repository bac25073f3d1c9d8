//! Help text and syntax error rendering.
//!
//! Replies are markdown, one block per line, separated by blank lines so
//! chat clients render each entry on its own row.

use super::registry::CommandRegistry;
use super::types::{Command, CommandOption};

/// Help listing: a header naming the bot and alias, then one entry per
/// registered command in registration order.
pub fn format_help(registry: &CommandRegistry, bot_name: &str, alias: &str) -> String {
    let title = format!("**@{} {}** [subcommand]\n\n", bot_name, alias);

    registry.iter().fold(title, |mut text, command| {
        let description = command.description.as_deref().unwrap_or("");
        text.push_str(&format!("> __{}__ - {}\n\n", command.name, description));
        text
    })
}

/// Syntax error listing the missing required options in the order given.
pub fn format_missing_options(command: &Command, missing: &[&CommandOption]) -> String {
    let title = format!("**Syntax error for command `{}`**\n\n", command.name);

    missing.iter().fold(title, |mut text, option| {
        text.push_str(&format!("- Missing required option: {}\n", option.name));
        text
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandSpec;

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.insert(Command::new(
            "deploy",
            CommandSpec::new(|_, _| Ok(())).description("Ship a build"),
        ));
        registry.insert(Command::new("status", CommandSpec::new(|_, _| Ok(()))));
        registry
    }

    #[test]
    fn help_lists_every_command() {
        let help = format_help(&registry(), "opsbot", "ops");

        assert_eq!(
            help,
            "**@opsbot ops** [subcommand]\n\n\
             > __deploy__ - Ship a build\n\n\
             > __status__ - \n\n"
        );
    }

    #[test]
    fn help_with_no_commands_is_just_the_header() {
        let help = format_help(&CommandRegistry::new(), "opsbot", "ops");
        assert_eq!(help, "**@opsbot ops** [subcommand]\n\n");
    }

    #[test]
    fn syntax_error_lists_each_missing_option() {
        let command = Command::new(
            "deploy",
            CommandSpec::new(|_, _| Ok(()))
                .option(CommandOption::required("env"))
                .option(CommandOption::required("tag")),
        );
        let missing: Vec<_> = command.options.iter().collect();

        let text = format_missing_options(&command, &missing);
        assert_eq!(
            text,
            "**Syntax error for command `deploy`**\n\n\
             - Missing required option: env\n\
             - Missing required option: tag\n"
        );
    }
}
