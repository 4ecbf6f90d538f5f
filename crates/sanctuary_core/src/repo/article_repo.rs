//! Article repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `slug` follows `title`; uniqueness is checked inside the write
//!   transaction and backed by `idx_articles_slug`.
//! - Publishing stamps `published_at` once; later edits keep it.

use crate::model::article::{Article, ArticleId, ArticlePatch, ArticleStatus, NewArticle};
use crate::model::slug::{reconcile_slug, slugify, SlugKind};
use crate::repo::slug_index::{ensure_slug_available, map_slug_write_error};
use crate::repo::{
    begin_immediate, ensure_connection_ready, now_epoch_ms, parse_uuid, push_pagination,
    RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const ARTICLE_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    slug,
    author,
    excerpt,
    body,
    status,
    published_at,
    created_at,
    updated_at
FROM articles";

const ARTICLE_COLUMNS: &[&str] = &[
    "uuid",
    "title",
    "slug",
    "author",
    "excerpt",
    "body",
    "status",
    "published_at",
    "created_at",
    "updated_at",
];

/// Query options for listing articles.
#[derive(Debug, Clone, Default)]
pub struct ArticleListQuery {
    pub status: Option<ArticleStatus>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for news articles.
pub trait ArticleRepository {
    fn create_article(&self, draft: &NewArticle) -> RepoResult<ArticleId>;
    fn update_article(&self, id: ArticleId, patch: &ArticlePatch) -> RepoResult<()>;
    fn delete_article(&self, id: ArticleId) -> RepoResult<()>;
    fn get_article(&self, id: ArticleId) -> RepoResult<Option<Article>>;
    fn get_article_by_slug(&self, slug: &str) -> RepoResult<Option<Article>>;
    fn list_articles(&self, query: &ArticleListQuery) -> RepoResult<Vec<Article>>;
}

/// SQLite-backed article repository.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "articles", ARTICLE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn create_article(&self, draft: &NewArticle) -> RepoResult<ArticleId> {
        draft.validate()?;

        let id = Uuid::new_v4();
        let slug = slugify(&draft.title);
        let now = now_epoch_ms();
        let published_at = (draft.status == ArticleStatus::Published).then_some(now);

        let tx = begin_immediate(self.conn)?;
        ensure_slug_available(&tx, SlugKind::Article, &slug, None)?;
        tx.execute(
            "INSERT INTO articles (
                uuid,
                title,
                slug,
                author,
                excerpt,
                body,
                status,
                published_at,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9);",
            params![
                id.to_string(),
                draft.title.as_str(),
                slug.as_str(),
                draft.author.as_str(),
                draft.excerpt.as_deref(),
                draft.body.as_str(),
                draft.status.as_str(),
                published_at,
                now,
            ],
        )
        .map_err(|err| map_slug_write_error(err, SlugKind::Article, &slug))?;
        tx.commit()?;

        Ok(id)
    }

    fn update_article(&self, id: ArticleId, patch: &ArticlePatch) -> RepoResult<()> {
        let tx = begin_immediate(self.conn)?;
        let mut article = select_one(&tx, "uuid = ?1", &id.to_string())?.ok_or(
            RepoError::NotFound {
                entity: "article",
                id,
            },
        )?;

        let new_slug = patch
            .title
            .as_deref()
            .and_then(|title| reconcile_slug(&article.slug, title));
        patch.apply_to(&mut article);
        article.validate()?;

        if let Some(slug) = new_slug {
            ensure_slug_available(&tx, SlugKind::Article, &slug, Some(id))?;
            article.slug = slug;
        }
        article.updated_at = now_epoch_ms();
        article.stamp_publication(article.updated_at);

        tx.execute(
            "UPDATE articles
             SET
                title = ?2,
                slug = ?3,
                author = ?4,
                excerpt = ?5,
                body = ?6,
                status = ?7,
                published_at = ?8,
                updated_at = ?9
             WHERE uuid = ?1;",
            params![
                id.to_string(),
                article.title.as_str(),
                article.slug.as_str(),
                article.author.as_str(),
                article.excerpt.as_deref(),
                article.body.as_str(),
                article.status.as_str(),
                article.published_at,
                article.updated_at,
            ],
        )
        .map_err(|err| map_slug_write_error(err, SlugKind::Article, &article.slug))?;
        tx.commit()?;

        Ok(())
    }

    fn delete_article(&self, id: ArticleId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM articles WHERE uuid = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn get_article(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        select_one(self.conn, "uuid = ?1", &id.to_string())
    }

    fn get_article_by_slug(&self, slug: &str) -> RepoResult<Option<Article>> {
        select_one(self.conn, "slug = ?1", slug)
    }

    fn list_articles(&self, query: &ArticleListQuery) -> RepoResult<Vec<Article>> {
        let mut sql = format!("{ARTICLE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC");
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut articles = Vec::new();
        while let Some(row) = rows.next()? {
            articles.push(parse_article_row(row)?);
        }

        Ok(articles)
    }
}

fn select_one(conn: &Connection, predicate: &str, key: &str) -> RepoResult<Option<Article>> {
    let mut stmt = conn.prepare(&format!("{ARTICLE_SELECT_SQL} WHERE {predicate};"))?;
    let mut rows = stmt.query([key])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_article_row(row)?));
    }
    Ok(None)
}

fn parse_article_row(row: &Row<'_>) -> RepoResult<Article> {
    let uuid_text: String = row.get("uuid")?;
    let status_text: String = row.get("status")?;
    let status = ArticleStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid article status `{status_text}` in articles.status"
        ))
    })?;

    let article = Article {
        id: parse_uuid(&uuid_text, "articles.uuid")?,
        title: row.get("title")?,
        slug: row.get("slug")?,
        author: row.get("author")?,
        excerpt: row.get("excerpt")?,
        body: row.get("body")?,
        status,
        published_at: row.get("published_at")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    article.validate()?;
    Ok(article)
}
