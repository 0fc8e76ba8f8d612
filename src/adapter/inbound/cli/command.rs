//! Command-line interface definitions.
//!
//! Defines the CLI structure for the hedgebook application using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Hedge stake equalization calculator
#[derive(Parser, Debug)]
#[command(name = "hedgebook")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the hedgebook CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Balance the stakes of a scenario file and print the results
    Solve(SolveArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `hedgebook config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `solve` subcommand.
#[derive(Parser, Debug)]
pub struct SolveArgs {
    /// Scenario file (TOML) describing the houses.
    pub scenario: PathBuf,

    /// Path to the configuration file (optional; defaults apply if missing).
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Override the active house count (2-5).
    #[arg(long)]
    pub houses: Option<usize>,

    /// Override the rounding step (0.01, 0.10, 0.50, 1.00).
    #[arg(long)]
    pub rounding: Option<String>,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "hedgebook");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_parse_solve_command() {
        let cli = Cli::try_parse_from(["hedgebook", "solve", "bets.toml"]).unwrap();
        let Commands::Solve(args) = cli.command else {
            panic!("expected solve command");
        };
        assert_eq!(args.scenario, PathBuf::from("bets.toml"));
        assert!(args.houses.is_none());
        assert!(args.rounding.is_none());
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_solve_overrides() {
        let cli = Cli::try_parse_from([
            "hedgebook",
            "--json",
            "solve",
            "bets.toml",
            "--houses",
            "3",
            "--rounding",
            "0.50",
        ])
        .unwrap();
        assert!(cli.json);
        let Commands::Solve(args) = cli.command else {
            panic!("expected solve command");
        };
        assert_eq!(args.houses, Some(3));
        assert_eq!(args.rounding.as_deref(), Some("0.50"));
    }

    #[test]
    fn test_solve_requires_scenario() {
        assert!(Cli::try_parse_from(["hedgebook", "solve"]).is_err());
    }

    #[test]
    fn test_parse_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["hedgebook", "-vv", "-q", "config", "show"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Config(ConfigCommand::Show(_))));
    }

    #[test]
    fn test_parse_color_never() {
        let cli = Cli::try_parse_from(["hedgebook", "--color", "never", "config", "show"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
    }

    #[test]
    fn test_config_init_force() {
        let cli =
            Cli::try_parse_from(["hedgebook", "config", "init", "out.toml", "--force"]).unwrap();
        let Commands::Config(ConfigCommand::Init(args)) = cli.command else {
            panic!("expected config init");
        };
        assert!(args.force);
        assert_eq!(args.path, PathBuf::from("out.toml"));
    }
}
