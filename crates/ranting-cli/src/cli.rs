//! CLI argument definitions for the ranting dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ranting_model::{ArchiveCategory, Month, ProgramCategory, ProgramStatus};

#[derive(Parser)]
#[command(
    name = "ranting",
    version,
    about = "Ranting NU dashboard - programs, members, archive and reports",
    long_about = "Manage the records of a Ranting NU branch from the terminal.\n\n\
                  Data is kept in a local directory and can be shared by several \
                  processes; changes written by one are picked up by the others."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the dashboard data.
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = ".ranting",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Track work programs and their status.
    #[command(subcommand)]
    Program(ProgramCommand),

    /// Manage member profiles.
    #[command(subcommand)]
    Kader(KaderCommand),

    /// Store and retrieve documents.
    #[command(subcommand)]
    Archive(ArchiveCommand),

    /// Monthly activity reports and the yearly summary.
    #[command(subcommand)]
    Report(ReportCommand),

    /// Annual work plans.
    #[command(subcommand)]
    Renja(RenjaCommand),

    /// Monthly impact figures.
    #[command(subcommand)]
    Impact(ImpactCommand),

    /// Social media poster templates.
    #[command(subcommand)]
    Content(ContentCommand),
}

#[derive(Subcommand)]
pub enum ProgramCommand {
    /// List programs, optionally filtered.
    List {
        #[arg(long)]
        category: Option<ProgramCategory>,
        #[arg(long)]
        status: Option<ProgramStatus>,
    },
    /// Add a program.
    Add(ProgramAddArgs),
    /// Move one or more programs to a new status.
    Status {
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
        #[arg(long = "to")]
        to: ProgramStatus,
    },
    /// Delete a program.
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Export programs to CSV.
    Export {
        #[arg(long)]
        status: Option<ProgramStatus>,
        /// Directory receiving the CSV file.
        #[arg(long = "out", value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Args)]
pub struct ProgramAddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "Administrasi")]
    pub category: ProgramCategory,
    #[arg(long, default_value = "Not Started")]
    pub status: ProgramStatus,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Person in charge.
    #[arg(long, default_value = "")]
    pub pic: String,
    #[arg(long, default_value = "")]
    pub deadline: String,
}

#[derive(Subcommand)]
pub enum KaderCommand {
    /// List members matching the filters.
    List(KaderFilterArgs),
    /// Add a member.
    Add(KaderFields),
    /// Change fields of an existing member.
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: KaderEditArgs,
    },
    /// Delete a member.
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Export the filtered member list to CSV.
    Export {
        #[command(flatten)]
        filter: KaderFilterArgs,
        #[arg(long = "out", value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Args, Default)]
pub struct KaderFilterArgs {
    /// Matched against the member name.
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = "")]
    pub position: String,
    #[arg(long, default_value = "")]
    pub interests: String,
    #[arg(long, default_value = "")]
    pub expertise: String,
}

#[derive(Args)]
pub struct KaderFields {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub position: String,
    #[arg(long, default_value = "")]
    pub expertise: String,
    #[arg(long, default_value = "")]
    pub interests: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub availability: String,
}

#[derive(Args)]
pub struct KaderEditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub expertise: Option<String>,
    #[arg(long)]
    pub interests: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub availability: Option<String>,
}

#[derive(Subcommand)]
pub enum ArchiveCommand {
    /// List stored files, newest first.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<ArchiveCategory>,
    },
    /// Store a file.
    Upload {
        #[arg(value_name = "PATH")]
        path: PathBuf,
        #[arg(long)]
        category: ArchiveCategory,
    },
    /// Write a stored file back to disk.
    Download {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(long = "out", value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },
    /// Delete a stored file.
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// Save the report for a month, replacing any earlier one.
    Save(ReportSaveArgs),
    /// List saved reports, newest first.
    List,
    /// Print the yearly report.
    Year {
        #[arg(value_name = "YEAR")]
        year: i32,
    },
    /// Delete a report.
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args)]
pub struct ReportSaveArgs {
    /// Month name, e.g. "Januari".
    #[arg(long)]
    pub month: Month,
    #[arg(long)]
    pub year: i32,
    #[arg(long = "activity")]
    pub activity_name: String,
    #[arg(long, default_value_t = 0)]
    pub attendees: u32,
    /// Number of members involved.
    #[arg(long = "kader", default_value_t = 0)]
    pub involved_kader: u32,
    #[arg(long, default_value = "")]
    pub notes: String,
    /// Photo to attach (up to three).
    #[arg(long = "photo", value_name = "PATH")]
    pub photos: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum RenjaCommand {
    /// Build a plan from program templates, in the order given.
    Generate {
        #[arg(value_name = "KEY", required = true)]
        keys: Vec<String>,
        /// Plan year (default: the current year).
        #[arg(long)]
        year: Option<i32>,
        /// Save the generated plan.
        #[arg(long)]
        save: bool,
    },
    /// List saved plans.
    List,
    /// List the available program templates.
    Templates,
}

#[derive(Subcommand)]
pub enum ImpactCommand {
    /// Save the figures for a month, replacing any earlier entry.
    Save(ImpactSaveArgs),
    /// Print every month and the totals.
    Summary,
}

#[derive(Args)]
pub struct ImpactSaveArgs {
    #[arg(long)]
    pub month: Month,
    #[arg(long)]
    pub year: i32,
    #[arg(long, default_value_t = 0)]
    pub activities: u32,
    #[arg(long, default_value_t = 0)]
    pub attendees: u32,
    #[arg(long = "active-kader", default_value_t = 0)]
    pub active_kader: u32,
    /// Social fund in rupiah.
    #[arg(long = "social-fund", default_value_t = 0)]
    pub social_fund: u64,
    /// Program progress in percent (0-100).
    #[arg(long = "progress", default_value_t = 0)]
    pub program_progress: u32,
}

#[derive(Subcommand)]
pub enum ContentCommand {
    /// List poster templates.
    List,
    /// Preview a template filled with values.
    Show {
        #[arg(value_name = "ID")]
        id: String,
        /// Field value as LABEL=VALUE.
        #[arg(long = "set", value_name = "LABEL=VALUE", value_parser = parse_field)]
        values: Vec<(String, String)>,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(label, value)| (label.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected LABEL=VALUE, got `{raw}`"))
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn status_takes_several_ids() {
        let cli = Cli::try_parse_from([
            "ranting", "program", "status", "prog-1", "prog-2", "--to", "completed",
        ])
        .unwrap();
        let Command::Program(ProgramCommand::Status { ids, to }) = cli.command else {
            panic!("expected program status");
        };
        assert_eq!(ids, vec!["prog-1", "prog-2"]);
        assert_eq!(to, ProgramStatus::Completed);
    }

    #[test]
    fn month_names_parse() {
        let cli = Cli::try_parse_from([
            "ranting", "--data-dir", "/tmp/x", "impact", "save", "--month", "maret", "--year",
            "2024",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/x"));
        let Command::Impact(ImpactCommand::Save(args)) = cli.command else {
            panic!("expected impact save");
        };
        assert_eq!(args.month, Month::March);
    }

    #[test]
    fn unknown_month_is_rejected() {
        assert!(
            Cli::try_parse_from([
                "ranting", "report", "save", "--month", "Smarch", "--year", "2024", "--activity",
                "x",
            ])
            .is_err()
        );
    }

    #[test]
    fn field_values_split_on_first_equals() {
        assert_eq!(
            parse_field("Quote=a=b").unwrap(),
            ("Quote".to_string(), "a=b".to_string())
        );
        assert!(parse_field("Quote").is_err());
    }
}
