//! `lifecoach` command-line front end.
//!
//! One subcommand per user action of the planner, wheel of life and habit
//! tracker; all state lives in the core document store.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lifecoach", version, about = "Weekly planner, wheel of life and habit tracker")]
struct Cli {
    /// Config file (TOML). Defaults to the platform config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Act as this user instead of the configured one.
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Productivity planner: activities and the weekly schedule.
    Planner {
        #[command(subcommand)]
        action: commands::PlannerAction,
    },
    /// Wheel of Life assessments.
    Wheel {
        #[command(subcommand)]
        action: commands::WheelAction,
    },
    /// Habit tracker.
    Habit {
        #[command(subcommand)]
        action: commands::HabitAction,
    },
    /// Print the effective configuration.
    Config,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Planner { .. } => "planner",
            Self::Wheel { .. } => "wheel",
            Self::Habit { .. } => "habit",
            Self::Config => "config",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Config::default_path);
    let config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_user(cli.user.clone());

    if let Err(err) = lifecoach_core::init_logging(
        &config.log_level,
        &config.log_dir.to_string_lossy(),
    ) {
        eprintln!("warning: file logging disabled: {err}");
    }

    if let Commands::Config = cli.command {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }
    let conn = lifecoach_core::db::open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let store = lifecoach_core::SqliteDocumentStore::new(&conn);

    let command = cli.command.name();
    info!("event=cli_command module=cli status=start command={command}");
    let result = match cli.command {
        Commands::Planner { action } => commands::run_planner(store, &config.user_id, action),
        Commands::Wheel { action } => commands::run_wheel(store, &config.user_id, action),
        Commands::Habit { action } => commands::run_habit(store, &config.user_id, action),
        Commands::Config => Ok(()),
    };
    match &result {
        Ok(()) => info!("event=cli_command module=cli status=ok command={command}"),
        Err(err) => error!("event=cli_command module=cli status=error command={command} error={err}"),
    }
    result
}
