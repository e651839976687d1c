use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use waterfill::adapter::inbound::cli::command::{
    CheckCommand, Cli, ColorChoice, Commands, ConfigCommand,
};
use waterfill::adapter::inbound::cli::config as config_cmd;
use waterfill::adapter::inbound::cli::output::{self, OutputConfig};
use waterfill::adapter::inbound::cli::{check, diagnostic, solve};
use waterfill::error::{Error, Result};
use waterfill::infrastructure::config::settings::Config;

/// Exit code for a solve that ran but did not reach optimality.
const EXIT_NOT_OPTIMAL: u8 = 2;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose, color));

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_NOT_OPTIMAL),
        Err(err) => {
            report(&cli, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Solve(args) => {
            let mut config = Config::load_or_default(&args.config)?;
            if let Some(level) = &args.log_level {
                config.logging.level = level.clone();
            } else if cli.verbose > 1 {
                config.logging.level = "trace".into();
            } else if cli.verbose == 1 {
                config.logging.level = "debug".into();
            }
            if args.json_logs {
                config.logging.format = "json".into();
            }
            config.init_logging();
            solve::execute(&config, args)
        }
        Commands::Config(ConfigCommand::Init(args)) => {
            config_cmd::execute_init(&args.path, args.force).map(|()| true)
        }
        Commands::Config(ConfigCommand::Show(arg)) => {
            config_cmd::execute_show(&arg.config).map(|()| true)
        }
        Commands::Check(CheckCommand::Config(arg)) => {
            check::execute_config(&arg.config).map(|()| true)
        }
    }
}

fn config_path(cli: &Cli) -> Option<&Path> {
    match &cli.command {
        Commands::Solve(args) => Some(&args.config),
        Commands::Config(ConfigCommand::Show(arg)) | Commands::Check(CheckCommand::Config(arg)) => {
            Some(&arg.config)
        }
        Commands::Config(ConfigCommand::Init(_)) => None,
    }
}

fn report(cli: &Cli, err: &Error) {
    if !cli.json {
        if let Some(path) = config_path(cli) {
            if let Ok(content) = std::fs::read_to_string(path) {
                let name = path.display().to_string();
                if let Some(diag) = diagnostic::from_config_error(err, &name, &content) {
                    eprintln!("{:?}", miette::Report::new(diag));
                    return;
                }
            }
        }
    }
    output::error(&err.to_string());
}
