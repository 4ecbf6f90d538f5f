//! Command implementations

pub mod animal;
pub mod article;
pub mod config;
pub mod event;
pub mod herd;
pub mod page;
pub mod slug;
pub mod user;

use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;
use sanctuary_core::repo::user_repo::SqliteUserRepository;
use sanctuary_core::service::user_service::UserService;
use sanctuary_core::AuthContext;
use serde::Serialize;
use std::fs;

use crate::config::AppConfig;

/// Open store plus the caller identity every mutation runs under.
pub struct Session {
    pub conn: Connection,
    pub ctx: AuthContext,
}

impl Session {
    /// Opens the configured database and resolves `--as` into a principal.
    ///
    /// Without `--as` the session is anonymous and every mutation fails
    /// with the authentication error.
    pub fn open(app: &AppConfig, as_user: Option<&str>) -> Result<Self> {
        let db_path = &app.storage.db_path;
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let conn = sanctuary_core::open_db(db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
        let ctx = match as_user {
            Some(email) => {
                UserService::new(SqliteUserRepository::try_new(&conn)?).resolve_principal(email)?
            }
            None => AuthContext::anonymous(),
        };
        info!(
            "event=session_open module=cli status=ok authenticated={}",
            ctx.principal().is_some()
        );

        Ok(Self { conn, ctx })
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Maps a `--field` / `--clear-field` pair onto a nullable patch slot.
pub fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}
