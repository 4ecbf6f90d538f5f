//! Slug index lookups shared by animal, article, and page repositories.
//!
//! # Invariants
//! - Callers run these helpers inside the same immediate transaction as the
//!   write they guard.
//! - A record never conflicts with itself.

use crate::model::slug::SlugKind;
use crate::repo::{is_unique_violation, parse_uuid, RepoError, RepoResult};
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

/// Returns the id of the record currently holding `slug`, if any.
pub fn find_slug_owner(conn: &Connection, kind: SlugKind, slug: &str) -> RepoResult<Option<Uuid>> {
    let owner: Option<String> = conn
        .query_row(
            &format!("SELECT uuid FROM {} WHERE slug = ?1;", kind.table()),
            [slug],
            |row| row.get(0),
        )
        .optional()?;

    owner
        .map(|text| parse_uuid(&text, "slug owner uuid"))
        .transpose()
}

/// Fails with `DuplicateSlug` when `slug` belongs to a record other than
/// `claimant`.
pub fn ensure_slug_available(
    conn: &Connection,
    kind: SlugKind,
    slug: &str,
    claimant: Option<Uuid>,
) -> RepoResult<()> {
    match find_slug_owner(conn, kind, slug)? {
        Some(owner) if Some(owner) != claimant => Err(RepoError::DuplicateSlug {
            kind,
            slug: slug.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Maps a write failure on a sluggable table, folding `UNIQUE(slug)`
/// violations into `DuplicateSlug`.
pub(crate) fn map_slug_write_error(err: rusqlite::Error, kind: SlugKind, slug: &str) -> RepoError {
    if is_unique_violation(&err) {
        return RepoError::DuplicateSlug {
            kind,
            slug: slug.to_string(),
        };
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::{ensure_slug_available, map_slug_write_error};
    use crate::db::open_db_in_memory;
    use crate::model::slug::SlugKind;
    use crate::repo::RepoError;
    use rusqlite::Connection;
    use uuid::Uuid;

    fn insert_page(conn: &Connection, id: Uuid, slug: &str) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO pages (uuid, title, slug, created_at, updated_at)
             VALUES (?1, 'About Us', ?2, 1, 1);",
            rusqlite::params![id.to_string(), slug],
        )
    }

    #[test]
    fn unique_index_violation_maps_to_duplicate_slug() {
        let conn = open_db_in_memory().unwrap();
        insert_page(&conn, Uuid::new_v4(), "about-us").unwrap();

        let err = insert_page(&conn, Uuid::new_v4(), "about-us").unwrap_err();
        match map_slug_write_error(err, SlugKind::Page, "about-us") {
            RepoError::DuplicateSlug { kind, slug } => {
                assert_eq!(kind, SlugKind::Page);
                assert_eq!(slug, "about-us");
            }
            other => panic!("expected DuplicateSlug, got {other:?}"),
        }
    }

    #[test]
    fn other_write_failures_stay_storage_errors() {
        let conn = open_db_in_memory().unwrap();
        let err = conn
            .execute(
                "INSERT INTO pages (uuid, title, slug, created_at, updated_at)
                 VALUES ('p1', NULL, 'about-us', 1, 1);",
                [],
            )
            .unwrap_err();
        assert!(matches!(
            map_slug_write_error(err, SlugKind::Page, "about-us"),
            RepoError::Db(_)
        ));
    }

    #[test]
    fn record_never_conflicts_with_itself() {
        let conn = open_db_in_memory().unwrap();
        let id = Uuid::new_v4();
        insert_page(&conn, id, "about-us").unwrap();

        assert!(ensure_slug_available(&conn, SlugKind::Page, "about-us", Some(id)).is_ok());
        assert!(matches!(
            ensure_slug_available(&conn, SlugKind::Page, "about-us", None),
            Err(RepoError::DuplicateSlug { .. })
        ));
    }
}
