use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use hedgebook::adapter::inbound::cli::command::{Cli, ColorChoice, Commands, ConfigCommand};
use hedgebook::adapter::inbound::cli::output::{self, OutputConfig};
use hedgebook::adapter::inbound::cli::{config, solve};
use hedgebook::error::Result;
use hedgebook::infrastructure::config::settings::Config;
use tracing::debug;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    match cli.color {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }

    init_logging(&cli);
    debug!(command = ?cli.command, "hedgebook starting");

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Solve(args) => solve::execute(&args),
        Commands::Config(ConfigCommand::Init(args)) => {
            config::execute_init(&args.path, args.force)
        }
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => {
            config::execute_validate(&args.config)
        }
    }
}

/// Initialize tracing from the config file the command points at, falling
/// back to defaults when it is missing or invalid. `-v` raises the level.
fn init_logging(cli: &Cli) {
    let path: Option<&Path> = match &cli.command {
        Commands::Solve(args) => Some(&args.config),
        Commands::Config(ConfigCommand::Show(args) | ConfigCommand::Validate(args)) => {
            Some(&args.config)
        }
        Commands::Config(ConfigCommand::Init(_)) => None,
    };
    let mut logging = path
        .and_then(|path| Config::load_or_default(path).ok())
        .map(|config| config.logging)
        .unwrap_or_default();

    match cli.verbose {
        0 if cli.quiet => logging.level = "error".into(),
        0 => {}
        1 => logging.level = "debug".into(),
        _ => logging.level = "trace".into(),
    }
    logging.init();
}
