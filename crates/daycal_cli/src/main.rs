//! `daycal` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and dispatch to `cmd::*` handlers.
//! - Report failures on stderr with a non-zero exit code.

mod cmd;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "daycal", version, about = "Calendar tasks and copy-friendly notes")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Defaults to the configured view for today.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides config)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Owner id (overrides config)
    #[arg(long, global = true)]
    pub owner: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the 6x7 month grid containing DATE
    Month(ViewArgs),

    /// Show the Monday-first week containing DATE
    Week(ViewArgs),

    /// Show one day
    Day(ViewArgs),

    /// Show a run of consecutive days
    Agenda(AgendaArgs),

    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommand),
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(value_parser = cmd::parse_date)]
    pub date: Option<NaiveDate>,

    /// Move this many periods forward (negative moves back)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub offset: i32,
}

#[derive(Debug, Args)]
pub struct AgendaArgs {
    /// First day (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = cmd::parse_date)]
    pub start: Option<NaiveDate>,

    /// Number of days, defaults to the configured agenda length
    #[arg(long)]
    pub days: Option<usize>,

    /// Move this many windows forward (negative moves back)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub offset: i32,
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// Create a category
    Add {
        name: String,
        /// `#rrggbb`; the first free palette color when omitted
        #[arg(long)]
        color: Option<String>,
    },
    /// List categories with task counters
    List,
    /// Delete a category without tasks
    Rm { id: Uuid },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Create a task
    Add {
        title: String,
        #[arg(long, value_parser = cmd::parse_date)]
        date: NaiveDate,
        #[arg(long)]
        category: Uuid,
        #[arg(long)]
        description: Option<String>,
        /// Overrides the category color
        #[arg(long)]
        color: Option<String>,
    },
    /// List tasks, optionally within an inclusive date range
    List {
        #[arg(long, value_parser = cmd::parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = cmd::parse_date)]
        to: Option<NaiveDate>,
    },
    /// Toggle completion
    Done { id: Uuid },
    /// Delete a task
    Rm { id: Uuid },
}

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// Create a note; the body may contain [copy:value] or [copy:label|value]
    Add { title: String, body: String },
    /// Replace title and body of a note
    Edit {
        id: Uuid,
        title: String,
        body: String,
    },
    /// List notes, pinned first
    List {
        /// Case- and accent-insensitive filter
        #[arg(long)]
        query: Option<String>,
    },
    /// Toggle the pinned flag
    Pin { id: Uuid },
    /// Delete a note
    Rm { id: Uuid },
    /// Print one note with its copy buttons
    Show { id: Uuid },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> cmd::CliResult<()> {
    let ctx = cmd::Context::open(&cli.global)?;
    match cli.command {
        None => cmd::calendar::run_default(&ctx),
        Some(Commands::Month(args)) => cmd::calendar::run_month(&ctx, &args),
        Some(Commands::Week(args)) => cmd::calendar::run_week(&ctx, &args),
        Some(Commands::Day(args)) => cmd::calendar::run_day(&ctx, &args),
        Some(Commands::Agenda(args)) => cmd::calendar::run_agenda(&ctx, &args),
        Some(Commands::Category(command)) => cmd::category::run(&ctx, command),
        Some(Commands::Task(command)) => cmd::task::run(&ctx, command),
        Some(Commands::Note(command)) => cmd::note::run(&ctx, command),
    }
}
