//! User account repository contracts and SQLite implementation.
//!
//! # Invariants
//! - E-mail uniqueness is enforced by `idx_users_email`; violations surface as
//!   `RepoError::DuplicateEmail`.

use crate::model::principal::Role;
use crate::model::user::{normalize_email, NewUser, User, UserId};
use crate::repo::{
    begin_immediate, ensure_connection_ready, is_unique_violation, now_epoch_ms, parse_uuid,
    RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const USER_SELECT_SQL: &str = "SELECT
    uuid,
    email,
    display_name,
    role,
    created_at,
    updated_at
FROM users";

pub trait UserRepository {
    fn create_user(&self, draft: &NewUser) -> RepoResult<UserId>;
    /// Inserts `draft` only when the table is empty. Returns `None` otherwise.
    fn create_first_user(&self, draft: &NewUser) -> RepoResult<Option<UserId>>;
    fn set_role(&self, id: UserId, role: Role) -> RepoResult<()>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    fn list_users(&self) -> RepoResult<Vec<User>>;
}

pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "users",
            &[
                "uuid",
                "email",
                "display_name",
                "role",
                "created_at",
                "updated_at",
            ],
        )?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, draft: &NewUser) -> RepoResult<UserId> {
        draft.validate()?;
        insert_user(self.conn, draft)
    }

    fn create_first_user(&self, draft: &NewUser) -> RepoResult<Option<UserId>> {
        draft.validate()?;

        let tx = begin_immediate(self.conn)?;
        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(None);
        }
        let id = insert_user(&tx, draft)?;
        tx.commit()?;

        Ok(Some(id))
    }

    fn set_role(&self, id: UserId, role: Role) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users SET role = ?2, updated_at = ?3 WHERE uuid = ?1;",
            params![id.to_string(), role.as_str(), now_epoch_ms()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }
        Ok(())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE uuid = ?1;"),
                [id.to_string()],
                |row| Ok(parse_user_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE email = ?1;"),
                [normalize_email(email)],
                |row| Ok(parse_user_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY email ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }
}

fn insert_user(conn: &Connection, draft: &NewUser) -> RepoResult<UserId> {
    let id = Uuid::new_v4();
    let now = now_epoch_ms();
    let email = normalize_email(&draft.email);
    conn.execute(
        "INSERT INTO users (uuid, email, display_name, role, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5);",
        params![
            id.to_string(),
            email.as_str(),
            draft.display_name.as_str(),
            draft.role.as_str(),
            now,
        ],
    )
    .map_err(|err| {
        if is_unique_violation(&err) {
            RepoError::DuplicateEmail(email.clone())
        } else {
            err.into()
        }
    })?;
    Ok(id)
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let uuid_text: String = row.get("uuid")?;
    let role_text: String = row.get("role")?;
    let role = Role::parse(&role_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid role `{role_text}` in users.role"))
    })?;

    Ok(User {
        id: parse_uuid(&uuid_text, "users.uuid")?,
        email: row.get("email")?,
        display_name: row.get("display_name")?,
        role,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
