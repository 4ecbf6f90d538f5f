//! Calendar event repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Range queries use inclusive overlap: an event is returned when
//!   `starts_at <= window.end` and `COALESCE(ends_at, starts_at) >= window.start`.
//! - Results are ordered by `starts_at ASC, uuid ASC`.

use crate::model::event::{Event, EventId, EventPatch, NewEvent, TimeWindow};
use crate::repo::{
    begin_immediate, ensure_connection_ready, now_epoch_ms, parse_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const EVENT_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    description,
    location,
    starts_at,
    ends_at,
    created_at,
    updated_at
FROM events";

pub trait EventRepository {
    fn create_event(&self, draft: &NewEvent) -> RepoResult<EventId>;
    fn update_event(&self, id: EventId, patch: &EventPatch) -> RepoResult<()>;
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    /// Lists events overlapping the inclusive window.
    fn list_events_in_range(&self, window: &TimeWindow) -> RepoResult<Vec<Event>>;
}

pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "events",
            &[
                "uuid",
                "title",
                "description",
                "location",
                "starts_at",
                "ends_at",
                "created_at",
                "updated_at",
            ],
        )?;
        Ok(Self { conn })
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, draft: &NewEvent) -> RepoResult<EventId> {
        draft.validate()?;

        let id = Uuid::new_v4();
        let now = now_epoch_ms();
        self.conn.execute(
            "INSERT INTO events (
                uuid,
                title,
                description,
                location,
                starts_at,
                ends_at,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7);",
            params![
                id.to_string(),
                draft.title.as_str(),
                draft.description.as_deref(),
                draft.location.as_deref(),
                draft.starts_at,
                draft.ends_at,
                now,
            ],
        )?;

        Ok(id)
    }

    fn update_event(&self, id: EventId, patch: &EventPatch) -> RepoResult<()> {
        let tx = begin_immediate(self.conn)?;
        let mut event = load_event(&tx, id)?.ok_or(RepoError::NotFound {
            entity: "event",
            id,
        })?;

        patch.apply_to(&mut event);
        event.validate()?;
        event.updated_at = now_epoch_ms();

        tx.execute(
            "UPDATE events
             SET
                title = ?2,
                description = ?3,
                location = ?4,
                starts_at = ?5,
                ends_at = ?6,
                updated_at = ?7
             WHERE uuid = ?1;",
            params![
                id.to_string(),
                event.title.as_str(),
                event.description.as_deref(),
                event.location.as_deref(),
                event.starts_at,
                event.ends_at,
                event.updated_at,
            ],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM events WHERE uuid = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        load_event(self.conn, id)
    }

    fn list_events_in_range(&self, window: &TimeWindow) -> RepoResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL}
             WHERE starts_at <= ?2
               AND COALESCE(ends_at, starts_at) >= ?1
             ORDER BY starts_at ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query(params![window.start, window.end])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }
}

fn load_event(conn: &Connection, id: EventId) -> RepoResult<Option<Event>> {
    let mut stmt = conn.prepare(&format!("{EVENT_SELECT_SQL} WHERE uuid = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_event_row(row)?));
    }
    Ok(None)
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let uuid_text: String = row.get("uuid")?;
    let event = Event {
        id: parse_uuid(&uuid_text, "events.uuid")?,
        title: row.get("title")?,
        description: row.get("description")?,
        location: row.get("location")?,
        starts_at: row.get("starts_at")?,
        ends_at: row.get("ends_at")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    event.validate()?;
    Ok(event)
}
