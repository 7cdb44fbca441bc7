//! Ranting dashboard CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use ranting_cli::cli::{Cli, LogFormatArg, LogLevelArg};
use ranting_cli::commands::{error_notice, open_database, run};
use ranting_cli::logging::{LogConfig, LogFormat, init_logging};
use ranting_cli::summary::notice_line;
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = open_database(&cli.data_dir)
        .and_then(|mut db| run(cli.command, &mut db, &mut io::stdout().lock()));
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

/// Print the user-facing notice for known errors, the full chain otherwise.
fn report_error(error: &anyhow::Error) {
    tracing::debug!(error = ?error, "command failed");
    match error_notice(error) {
        Some(notice) => eprintln!("{}", notice_line(&notice)),
        None => eprintln!("error: {error:#}"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level(cli.verbosity.tracing_level_filter());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config = config.with_level(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        });
    }
    config = config
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
        .with_timestamps(cli.log_file.is_some())
        .with_log_file(cli.log_file.clone());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
