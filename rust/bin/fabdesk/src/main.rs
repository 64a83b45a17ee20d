//! `fabdesk`: command-line front end for the fabrication back office.
//!
//! Lists, edits, imports and exports the registry's records and prints the
//! dashboard summaries. State lives in a local redb file
//! (default: ~/.fabdesk/fabdesk.redb).

mod commands;
mod config;
mod output;

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fabdesk_core::{ServiceConfig, ServiceError};
use fabdesk_registry::{Kind, ScheduleEvent};

use commands::report::Report;
use config::ClientConfig;
use output::Format;

/// Fabrication back-office CLI.
#[derive(Parser, Debug)]
#[command(name = "fabdesk", about = "Fabrication back-office records")]
struct Cli {
    /// Path to client config file (default: ~/.fabdesk/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Output format (default from config, else table).
    #[arg(long = "output", short = 'o', global = true, value_enum)]
    output: Option<Format>,

    /// Directory holding fabdesk.redb.
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    /// Database file, overrides --data-dir.
    #[arg(long = "db", global = true)]
    db: Option<PathBuf>,

    /// Keep everything in memory for this run.
    #[arg(long = "memory", global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List records, optionally searched and filtered.
    List {
        /// Collection (e.g. customers, material-prices, schedule-tasks).
        kind: Kind,
        /// Case-insensitive search term.
        term: Option<String>,
        /// `status=x`, `field=value` or `date=YYYY-MM-DD..YYYY-MM-DD`.
        #[arg(long = "filter")]
        filters: Vec<String>,
        /// Also match the names of referenced records.
        #[arg(long)]
        related: bool,
    },

    /// Show one record.
    Get { kind: Kind, id: u64 },

    /// Create a record.
    Create {
        kind: Kind,
        /// JSON object of fields.
        #[arg(long = "json")]
        json_body: Option<String>,
        /// Read the JSON object from a file.
        #[arg(short = 'f', long = "file")]
        file: Option<PathBuf>,
        /// `key=value`, applied after --json.
        #[arg(long = "set")]
        sets: Vec<String>,
    },

    /// Change fields of a record.
    Update {
        kind: Kind,
        id: u64,
        #[arg(long = "json")]
        json_body: Option<String>,
        #[arg(long = "set")]
        sets: Vec<String>,
    },

    /// Delete a record.
    Delete {
        kind: Kind,
        id: u64,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Export a collection as CSV.
    Export {
        kind: Kind,
        /// Output file (default: stdout).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import CSV rows as new records.
    Import { kind: Kind, file: PathBuf },

    /// Print a dashboard summary.
    Report {
        #[arg(value_enum)]
        which: Report,
    },

    /// Project schedule.
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Storage location and record counts.
    Status,

    /// Client configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ScheduleAction {
    /// Task bars, of one project or all.
    Show {
        #[arg(long)]
        project: Option<u64>,
    },
    /// Move a task to new dates.
    Move {
        id: u64,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    /// Set a task's progress (0-100).
    Progress { id: u64, progress: u8 },
    /// Remove a task.
    Delete { id: u64 },
    /// Apply a chart event given as JSON.
    Apply {
        #[arg(long = "json")]
        json_body: String,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective settings.
    Show,
    /// Store settings in the config file.
    Set {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        db: Option<PathBuf>,
        #[arg(long, value_enum)]
        output: Option<Format>,
    },
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    eprint!("{} [y/N]: ", prompt);
    let mut s = String::new();
    std::io::stdin().read_line(&mut s)?;
    Ok(s.trim().eq_ignore_ascii_case("y"))
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for JSON and CSV.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_errors = cli.output == Some(Format::Json);

    match run(cli) {
        Err(e) if json_errors => match e.downcast_ref::<ServiceError>() {
            Some(se) => {
                println!("{}", se.to_json());
                std::process::exit(if se.is_user_error() { 1 } else { 2 });
            }
            None => Err(e),
        },
        other => other,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let client_config = ClientConfig::load(&config_path)?;
    let format = Format::resolve(cli.output, client_config.output.as_deref())?;
    let service_config = client_config.service_config(&ServiceConfig {
        data_dir: cli.data_dir.clone(),
        db_path: cli.db.clone(),
        in_memory: cli.memory,
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Commands that do not touch the database.
    match &cli.command {
        Commands::Version => {
            writeln!(out, "fabdesk v{}", env!("CARGO_PKG_VERSION"))?;
            return Ok(());
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    writeln!(out, "Config:    {}", config_path.display())?;
                    writeln!(out, "Database:  {}", service_config.resolve_db_path().display())?;
                    writeln!(out, "Output:    {:?}", format)?;
                }
                ConfigAction::Set { data_dir, db, output } => {
                    let mut updated = client_config.clone();
                    if let Some(d) = data_dir {
                        updated.data_dir = Some(d.clone());
                    }
                    if let Some(d) = db {
                        updated.db_path = Some(d.clone());
                    }
                    if let Some(o) = output {
                        updated.output = Some(format!("{:?}", o).to_lowercase());
                    }
                    updated.save(&config_path)?;
                    writeln!(out, "Saved {}", config_path.display())?;
                }
            }
            return Ok(());
        }
        _ => {}
    }

    let kv = commands::open_kv(&service_config)?;
    let mut reg = commands::open_registry(kv.clone())?;

    match cli.command {
        Commands::List {
            kind,
            term,
            filters,
            related,
        } => {
            let query = commands::records::query(term.as_deref(), &filters)?;
            commands::records::list(&mut out, &reg, kind, &query, related, format)?;
        }

        Commands::Get { kind, id } => {
            commands::records::get(&mut out, &reg, kind, id, format)?;
        }

        Commands::Create {
            kind,
            json_body,
            file,
            sets,
        } => {
            let body = match file {
                Some(path) => Some(std::fs::read_to_string(&path)?),
                None => json_body,
            };
            let fields = commands::records::fields(body.as_deref(), &sets)?;
            commands::records::create(&mut out, &mut reg, kind, &fields, format)?;
        }

        Commands::Update {
            kind,
            id,
            json_body,
            sets,
        } => {
            let fields = commands::records::fields(json_body.as_deref(), &sets)?;
            commands::records::update(&mut out, &mut reg, kind, id, &fields, format)?;
        }

        Commands::Delete { kind, id, yes } => {
            if !yes && !confirm(&format!("Delete {} {}?", kind.label(), id))? {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
            commands::records::delete(&mut out, &mut reg, kind, id)?;
        }

        Commands::Export { kind, out: dest } => {
            commands::records::export(&mut out, &reg, kind, dest.as_deref())?;
        }

        Commands::Import { kind, file } => {
            commands::records::import(&mut out, &mut reg, kind, &file, format)?;
        }

        Commands::Report { which } => {
            commands::report::show(&mut out, &reg, which, format)?;
        }

        Commands::Schedule { action } => {
            let event = match action {
                ScheduleAction::Show { project } => {
                    commands::schedule::show(&mut out, &reg, project, format)?;
                    return Ok(());
                }
                ScheduleAction::Move { id, start, end } => ScheduleEvent::DateChanged { id, start, end },
                ScheduleAction::Progress { id, progress } => ScheduleEvent::ProgressChanged { id, progress },
                ScheduleAction::Delete { id } => ScheduleEvent::Deleted { id },
                ScheduleAction::Apply { json_body } => commands::schedule::parse_event(&json_body)?,
            };
            commands::schedule::apply(&mut out, &mut reg, &event, format)?;
        }

        Commands::Status => {
            commands::status(&mut out, &service_config, kv.as_ref())?;
        }

        Commands::Version | Commands::Config { .. } => {}
    }

    if reg.is_divergent() {
        anyhow::bail!("Changes were applied but could not be saved; see the log above.");
    }
    Ok(())
}
