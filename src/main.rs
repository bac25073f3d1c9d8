use botcmd::commands::{CommandOption, CommandSpec};
use botcmd::config::{self, LibraryConfig};
use botcmd::console::{print_colored, ConsoleSession};
use botcmd::error::ConfigError;
use botcmd::library::CommandLibrary;
use botcmd::session::Identity;
use clap::Parser;
use crossterm::style::Color;
use reedline::{DefaultPrompt, Reedline, Signal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Drive a command library from the terminal, one line per chat message.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Library settings file (defaults to <config dir>/botcmd.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Library name; overrides the config file
    #[arg(long)]
    trigger: Option<String>,

    /// Token addressing the library; overrides the config file
    #[arg(long)]
    alias: Option<String>,

    /// Identity the messages are sent as
    #[arg(long, env = "BOTCMD_USER", default_value = "user1")]
    user: String,

    /// Display name of the bot
    #[arg(long, default_value = "botcmd")]
    bot_name: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = resolve_config(&args);

    let mut library = CommandLibrary::from_config(&config);
    register_sample_commands(&mut library);

    print_colored(
        &mut io::stdout(),
        &format!(
            "Library '{}' ready. Address it with '{} <subcommand>'. Ctrl-D to quit.\n",
            library.name(),
            library.alias()
        ),
        Color::DarkMagenta,
    );

    let user = Identity::new(args.user.clone(), args.user);
    let bot = Identity::new(args.bot_name.clone(), args.bot_name);

    let mut rl = Reedline::create();
    let prompt = DefaultPrompt::default();

    loop {
        let line = match rl.read_line(&prompt) {
            Ok(Signal::Success(input)) => input.trim().to_string(),
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) | Err(_) => break,
        };

        if line.is_empty() {
            continue;
        }

        if !library.matches(&line) {
            print_colored(
                &mut io::stdout(),
                &format!("Not addressed to '{}'. Ignoring.\n", library.alias()),
                Color::DarkYellow,
            );
            continue;
        }

        let mut session = ConsoleSession::new(line, user.clone(), bot.clone());
        if let Err(err) = library.dispatch(&mut session).await {
            print_colored(&mut io::stdout(), &format!("Error: {err}\n"), Color::Red);
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Config file values, with command-line flags taking precedence.
fn resolve_config(args: &Args) -> LibraryConfig {
    let path = args.config.clone().or_else(config::default_config_path);

    let mut config = match path.as_deref().map(config::load_config) {
        Some(Ok(cfg)) => cfg,
        Some(Err(ConfigError::NotFound(_))) if args.config.is_none() => LibraryConfig::new("botcmd"),
        Some(Err(e)) => {
            print_colored(
                &mut io::stdout(),
                &format!("Warning: {e}\nFalling back to defaults.\n"),
                Color::DarkYellow,
            );
            LibraryConfig::new("botcmd")
        }
        None => LibraryConfig::new("botcmd"),
    };

    if let Some(trigger) = &args.trigger {
        config.trigger = trigger.clone();
    }
    if let Some(alias) = &args.alias {
        config.alias = Some(alias.clone());
    }
    config
}

fn register_sample_commands(library: &mut CommandLibrary) {
    library
        .command(
            "echo",
            CommandSpec::new(|session, context| {
                let text = context.args.join(" ");
                match context.options.get("prefix") {
                    Some(prefix) => session.end_turn_with(&format!("{prefix}{text}")),
                    None => session.end_turn_with(&text),
                }
                Ok(())
            })
            .description("Repeat the given words")
            .option(CommandOption::new("prefix").with_description("Text to put in front")),
        )
        .command(
            "greet",
            CommandSpec::new(|session, context| {
                let name = context.options.get("name").unwrap_or_default();
                let from = session.user().name.clone();
                session.end_turn_with(&format!("Hello {name}, from {from}!"));
                Ok(())
            })
            .description("Greet someone by name")
            .option(CommandOption::required("name").with_description("Who to greet")),
        )
        .command(
            "whoami",
            CommandSpec::new(|session, _| {
                let reply = format!("You are {}", session.user());
                session.end_turn_with(&reply);
                Ok(())
            })
            .description("Show the identity commands run as"),
        );
}
