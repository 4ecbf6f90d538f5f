//! Herd repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Deleting a herd does not touch `animals.herd_uuid`; animal reads resolve
//!   the dangling reference to no herd.

use crate::model::herd::{Herd, HerdId, HerdPatch, NewHerd};
use crate::repo::{
    begin_immediate, ensure_connection_ready, now_epoch_ms, parse_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const HERD_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    description,
    created_at,
    updated_at
FROM herds";

pub trait HerdRepository {
    fn create_herd(&self, draft: &NewHerd) -> RepoResult<HerdId>;
    fn update_herd(&self, id: HerdId, patch: &HerdPatch) -> RepoResult<()>;
    fn delete_herd(&self, id: HerdId) -> RepoResult<()>;
    fn get_herd(&self, id: HerdId) -> RepoResult<Option<Herd>>;
    /// Lists every herd ordered by name.
    fn list_herds(&self) -> RepoResult<Vec<Herd>>;
}

pub struct SqliteHerdRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHerdRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "herds",
            &["uuid", "name", "description", "created_at", "updated_at"],
        )?;
        Ok(Self { conn })
    }
}

impl HerdRepository for SqliteHerdRepository<'_> {
    fn create_herd(&self, draft: &NewHerd) -> RepoResult<HerdId> {
        draft.validate()?;

        let id = Uuid::new_v4();
        let now = now_epoch_ms();
        self.conn.execute(
            "INSERT INTO herds (uuid, name, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4);",
            params![
                id.to_string(),
                draft.name.as_str(),
                draft.description.as_deref(),
                now,
            ],
        )?;

        Ok(id)
    }

    fn update_herd(&self, id: HerdId, patch: &HerdPatch) -> RepoResult<()> {
        let tx = begin_immediate(self.conn)?;
        let mut herd = load_herd(&tx, id)?.ok_or(RepoError::NotFound { entity: "herd", id })?;

        patch.apply_to(&mut herd);
        herd.validate()?;
        herd.updated_at = now_epoch_ms();

        tx.execute(
            "UPDATE herds
             SET name = ?2, description = ?3, updated_at = ?4
             WHERE uuid = ?1;",
            params![
                id.to_string(),
                herd.name.as_str(),
                herd.description.as_deref(),
                herd.updated_at,
            ],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn delete_herd(&self, id: HerdId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM herds WHERE uuid = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn get_herd(&self, id: HerdId) -> RepoResult<Option<Herd>> {
        load_herd(self.conn, id)
    }

    fn list_herds(&self) -> RepoResult<Vec<Herd>> {
        let mut stmt = self.conn.prepare(&format!(
            "{HERD_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut herds = Vec::new();
        while let Some(row) = rows.next()? {
            herds.push(parse_herd_row(row)?);
        }
        Ok(herds)
    }
}

fn load_herd(conn: &Connection, id: HerdId) -> RepoResult<Option<Herd>> {
    let mut stmt = conn.prepare(&format!("{HERD_SELECT_SQL} WHERE uuid = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_herd_row(row)?));
    }
    Ok(None)
}

fn parse_herd_row(row: &Row<'_>) -> RepoResult<Herd> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Herd {
        id: parse_uuid(&uuid_text, "herds.uuid")?,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
