//! Static page repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `slug` follows `title` and is unique across live pages.

use crate::model::page::{NewPage, Page, PageId, PagePatch};
use crate::model::slug::{reconcile_slug, slugify, SlugKind};
use crate::repo::slug_index::{ensure_slug_available, map_slug_write_error};
use crate::repo::{
    begin_immediate, bool_to_int, ensure_connection_ready, now_epoch_ms, parse_flag, parse_uuid,
    push_pagination, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const PAGE_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    slug,
    body,
    meta_description,
    is_published,
    created_at,
    updated_at
FROM pages";

const PAGE_COLUMNS: &[&str] = &[
    "uuid",
    "title",
    "slug",
    "body",
    "meta_description",
    "is_published",
    "created_at",
    "updated_at",
];

#[derive(Debug, Clone, Default)]
pub struct PageListQuery {
    pub published_only: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for static pages.
pub trait PageRepository {
    fn create_page(&self, draft: &NewPage) -> RepoResult<PageId>;
    fn update_page(&self, id: PageId, patch: &PagePatch) -> RepoResult<()>;
    fn delete_page(&self, id: PageId) -> RepoResult<()>;
    fn get_page(&self, id: PageId) -> RepoResult<Option<Page>>;
    fn get_page_by_slug(&self, slug: &str) -> RepoResult<Option<Page>>;
    fn list_pages(&self, query: &PageListQuery) -> RepoResult<Vec<Page>>;
}

pub struct SqlitePageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePageRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "pages", PAGE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl PageRepository for SqlitePageRepository<'_> {
    fn create_page(&self, draft: &NewPage) -> RepoResult<PageId> {
        draft.validate()?;

        let id = Uuid::new_v4();
        let slug = slugify(&draft.title);
        let now = now_epoch_ms();

        let tx = begin_immediate(self.conn)?;
        ensure_slug_available(&tx, SlugKind::Page, &slug, None)?;
        tx.execute(
            "INSERT INTO pages (
                uuid,
                title,
                slug,
                body,
                meta_description,
                is_published,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7);",
            params![
                id.to_string(),
                draft.title.as_str(),
                slug.as_str(),
                draft.body.as_str(),
                draft.meta_description.as_deref(),
                bool_to_int(draft.is_published),
                now,
            ],
        )
        .map_err(|err| map_slug_write_error(err, SlugKind::Page, &slug))?;
        tx.commit()?;

        Ok(id)
    }

    fn update_page(&self, id: PageId, patch: &PagePatch) -> RepoResult<()> {
        let tx = begin_immediate(self.conn)?;
        let mut page = select_one(&tx, "uuid = ?1", &id.to_string())?
            .ok_or(RepoError::NotFound { entity: "page", id })?;

        let new_slug = patch
            .title
            .as_deref()
            .and_then(|title| reconcile_slug(&page.slug, title));
        patch.apply_to(&mut page);
        page.validate()?;

        if let Some(slug) = new_slug {
            ensure_slug_available(&tx, SlugKind::Page, &slug, Some(id))?;
            page.slug = slug;
        }
        page.updated_at = now_epoch_ms();

        tx.execute(
            "UPDATE pages
             SET
                title = ?2,
                slug = ?3,
                body = ?4,
                meta_description = ?5,
                is_published = ?6,
                updated_at = ?7
             WHERE uuid = ?1;",
            params![
                id.to_string(),
                page.title.as_str(),
                page.slug.as_str(),
                page.body.as_str(),
                page.meta_description.as_deref(),
                bool_to_int(page.is_published),
                page.updated_at,
            ],
        )
        .map_err(|err| map_slug_write_error(err, SlugKind::Page, &page.slug))?;
        tx.commit()?;

        Ok(())
    }

    fn delete_page(&self, id: PageId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM pages WHERE uuid = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn get_page(&self, id: PageId) -> RepoResult<Option<Page>> {
        select_one(self.conn, "uuid = ?1", &id.to_string())
    }

    fn get_page_by_slug(&self, slug: &str) -> RepoResult<Option<Page>> {
        select_one(self.conn, "slug = ?1", slug)
    }

    fn list_pages(&self, query: &PageListQuery) -> RepoResult<Vec<Page>> {
        let mut sql = format!("{PAGE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if query.published_only {
            sql.push_str(" AND is_published = 1");
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC");
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut pages = Vec::new();
        while let Some(row) = rows.next()? {
            pages.push(parse_page_row(row)?);
        }

        Ok(pages)
    }
}

fn select_one(conn: &Connection, predicate: &str, key: &str) -> RepoResult<Option<Page>> {
    let mut stmt = conn.prepare(&format!("{PAGE_SELECT_SQL} WHERE {predicate};"))?;
    let mut rows = stmt.query([key])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_page_row(row)?));
    }
    Ok(None)
}

fn parse_page_row(row: &Row<'_>) -> RepoResult<Page> {
    let uuid_text: String = row.get("uuid")?;
    let page = Page {
        id: parse_uuid(&uuid_text, "pages.uuid")?,
        title: row.get("title")?,
        slug: row.get("slug")?,
        body: row.get("body")?,
        meta_description: row.get("meta_description")?,
        is_published: parse_flag(row.get("is_published")?, "pages.is_published")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    page.validate()?;
    Ok(page)
}
