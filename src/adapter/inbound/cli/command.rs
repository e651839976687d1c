//! Command-line interface definitions.
//!
//! Defines the CLI structure for the waterfill application using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::infrastructure::config::solver::SolverBackend;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "waterfill.toml";

/// Water-filling power allocation solver
#[derive(Parser, Debug)]
#[command(name = "waterfill")]
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

/// Top-level subcommands for the waterfill CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a water-filling power allocation
    Solve(SolveArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `waterfill config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
}

/// Subcommands for `waterfill check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value = DEFAULT_CONFIG)]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `solve` subcommand.
#[derive(Parser, Debug)]
pub struct SolveArgs {
    /// Comma-separated channel floors (alpha), e.g. 0.8,1.0,1.2
    #[arg(
        short,
        long,
        value_delimiter = ',',
        required = true,
        allow_hyphen_values = true
    )]
    pub floors: Vec<f64>,

    /// Total power budget
    #[arg(short, long, default_value = "1.0", allow_hyphen_values = true)]
    pub power: f64,

    /// Expected channel count; must match the number of floors
    #[arg(short = 'n', long)]
    pub channels: Option<usize>,

    /// Override the configured solver backend
    #[arg(short, long)]
    pub solver: Option<SolverBackend>,

    /// Add a side constraint forcing the total allocation to this value
    #[arg(long = "sum-equals", value_name = "VALUE")]
    pub sum_equals: Vec<f64>,

    /// Skip the step plot
    #[arg(long)]
    pub no_plot: bool,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verifies() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "waterfill");
    }

    #[test]
    fn test_color_choice_default_is_auto() {
        assert!(matches!(ColorChoice::default(), ColorChoice::Auto));
    }

    #[test]
    fn test_parse_solve_defaults() {
        let cli = Cli::try_parse_from(["waterfill", "solve", "--floors", "0.8,1.0,1.2"]).unwrap();
        let Commands::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.floors, vec![0.8, 1.0, 1.2]);
        assert_eq!(args.power, 1.0);
        assert!(args.solver.is_none());
        assert!(args.sum_equals.is_empty());
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG));
    }

    #[test]
    fn test_parse_solve_overrides() {
        let cli = Cli::try_parse_from([
            "waterfill",
            "--json",
            "solve",
            "-f",
            "1,2",
            "-p",
            "3",
            "-n",
            "2",
            "--solver",
            "water-level",
            "--sum-equals",
            "1",
            "--sum-equals",
            "2",
        ])
        .unwrap();
        assert!(cli.json);
        let Commands::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.power, 3.0);
        assert_eq!(args.channels, Some(2));
        assert_eq!(args.solver, Some(SolverBackend::WaterLevel));
        assert_eq!(args.sum_equals, vec![1.0, 2.0]);
    }

    #[test]
    fn test_solve_requires_floors() {
        assert!(Cli::try_parse_from(["waterfill", "solve"]).is_err());
    }

    #[test]
    fn test_parse_verbose_double() {
        let cli = Cli::try_parse_from(["waterfill", "-vv", "check", "config"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_color_never() {
        let cli = Cli::try_parse_from(["waterfill", "--color", "never", "config", "show"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
    }
}
