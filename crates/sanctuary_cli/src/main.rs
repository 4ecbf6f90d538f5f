//! sanctuary CLI entry point

use anyhow::Result;
use clap::Parser;
use std::path::Path;

mod args;
mod commands;
mod config;

use args::{Cli, Commands};
use commands::Session;
use config::AppConfig;

fn main() -> Result<()> {
    let Cli {
        config,
        log_level,
        as_user,
        command,
    } = Cli::parse();

    let open_session = || -> Result<Session> {
        let app = AppConfig::load(config.as_deref())?;
        init_logging(&app, log_level.as_deref())?;
        Session::open(&app, as_user.as_deref())
    };

    match command {
        Commands::Slug(args) => commands::slug::execute(args),
        Commands::Config(args) => commands::config::execute(args, config.as_deref()),
        Commands::Animal(args) => commands::animal::execute(args, &open_session()?),
        Commands::Article(args) => commands::article::execute(args, &open_session()?),
        Commands::Page(args) => commands::page::execute(args, &open_session()?),
        Commands::Herd(args) => commands::herd::execute(args, &open_session()?),
        Commands::Event(args) => commands::event::execute(args, &open_session()?),
        Commands::User(args) => commands::user::execute(args, &open_session()?),
    }
}

/// Starts file logging when `[logging] dir` is configured.
fn init_logging(app: &AppConfig, cli_level: Option<&str>) -> Result<()> {
    let Some(dir) = app.logging.dir.as_deref() else {
        return Ok(());
    };
    let level = cli_level
        .or(app.logging.level.as_deref())
        .unwrap_or(sanctuary_core::default_log_level());
    sanctuary_core::init_logging(level, absolute(dir)?.as_path())?;
    Ok(())
}

fn absolute(dir: &Path) -> Result<std::path::PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(dir))
}
