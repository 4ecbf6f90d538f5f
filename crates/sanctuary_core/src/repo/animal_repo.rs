//! Animal repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist animal profiles with a unique, name-derived slug.
//! - Resolve the herd name at read time with a `LEFT JOIN`.
//!
//! # Invariants
//! - Create and update run slug lookup and write in one immediate transaction.
//! - Update only re-checks the slug when the derived slug actually changes.
//! - Delete is a hard delete and tolerates missing ids.

use crate::model::animal::{Animal, AnimalId, AnimalPatch, NewAnimal};
use crate::model::herd::HerdId;
use crate::model::slug::{reconcile_slug, slugify, SlugKind};
use crate::repo::slug_index::{ensure_slug_available, map_slug_write_error};
use crate::repo::{
    begin_immediate, bool_to_int, ensure_connection_ready, now_epoch_ms, parse_flag,
    parse_optional_uuid, parse_uuid, push_pagination, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const ANIMAL_SELECT_SQL: &str = "SELECT
    a.uuid AS uuid,
    a.name AS name,
    a.slug AS slug,
    a.species AS species,
    a.breed AS breed,
    a.herd_uuid AS herd_uuid,
    h.name AS herd_name,
    a.bio AS bio,
    a.image_url AS image_url,
    a.is_featured AS is_featured,
    a.created_at AS created_at,
    a.updated_at AS updated_at
FROM animals a
LEFT JOIN herds h ON h.uuid = a.herd_uuid";

const ANIMAL_COLUMNS: &[&str] = &[
    "uuid",
    "name",
    "slug",
    "species",
    "breed",
    "herd_uuid",
    "bio",
    "image_url",
    "is_featured",
    "created_at",
    "updated_at",
];

/// Query options for listing animals.
#[derive(Debug, Clone, Default)]
pub struct AnimalListQuery {
    pub herd_id: Option<HerdId>,
    pub featured_only: bool,
    /// Defaults to 20, clamps to 100.
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for animal profiles.
pub trait AnimalRepository {
    /// Inserts a new animal under `slugify(draft.name)`.
    fn create_animal(&self, draft: &NewAnimal) -> RepoResult<AnimalId>;
    /// Applies a partial update, re-deriving the slug on rename.
    fn update_animal(&self, id: AnimalId, patch: &AnimalPatch) -> RepoResult<()>;
    /// Removes one animal outright.
    fn delete_animal(&self, id: AnimalId) -> RepoResult<()>;
    fn get_animal(&self, id: AnimalId) -> RepoResult<Option<Animal>>;
    fn get_animal_by_slug(&self, slug: &str) -> RepoResult<Option<Animal>>;
    fn list_animals(&self, query: &AnimalListQuery) -> RepoResult<Vec<Animal>>;
}

/// SQLite-backed animal repository.
pub struct SqliteAnimalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnimalRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "animals", ANIMAL_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl AnimalRepository for SqliteAnimalRepository<'_> {
    fn create_animal(&self, draft: &NewAnimal) -> RepoResult<AnimalId> {
        draft.validate()?;

        let id = Uuid::new_v4();
        let slug = slugify(&draft.name);
        let now = now_epoch_ms();

        let tx = begin_immediate(self.conn)?;
        ensure_slug_available(&tx, SlugKind::Animal, &slug, None)?;
        tx.execute(
            "INSERT INTO animals (
                uuid,
                name,
                slug,
                species,
                breed,
                herd_uuid,
                bio,
                image_url,
                is_featured,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10);",
            params![
                id.to_string(),
                draft.name.as_str(),
                slug.as_str(),
                draft.species.as_str(),
                draft.breed.as_deref(),
                draft.herd_id.map(|herd| herd.to_string()),
                draft.bio.as_str(),
                draft.image_url.as_deref(),
                bool_to_int(draft.is_featured),
                now,
            ],
        )
        .map_err(|err| map_slug_write_error(err, SlugKind::Animal, &slug))?;
        tx.commit()?;

        Ok(id)
    }

    fn update_animal(&self, id: AnimalId, patch: &AnimalPatch) -> RepoResult<()> {
        let tx = begin_immediate(self.conn)?;
        let mut animal =
            select_one(&tx, "a.uuid = ?1", &id.to_string())?.ok_or(RepoError::NotFound {
                entity: "animal",
                id,
            })?;

        let new_slug = patch
            .name
            .as_deref()
            .and_then(|name| reconcile_slug(&animal.slug, name));
        patch.apply_to(&mut animal);
        animal.validate()?;

        if let Some(slug) = new_slug {
            ensure_slug_available(&tx, SlugKind::Animal, &slug, Some(id))?;
            animal.slug = slug;
        }
        animal.updated_at = now_epoch_ms();

        tx.execute(
            "UPDATE animals
             SET
                name = ?2,
                slug = ?3,
                species = ?4,
                breed = ?5,
                herd_uuid = ?6,
                bio = ?7,
                image_url = ?8,
                is_featured = ?9,
                updated_at = ?10
             WHERE uuid = ?1;",
            params![
                id.to_string(),
                animal.name.as_str(),
                animal.slug.as_str(),
                animal.species.as_str(),
                animal.breed.as_deref(),
                animal.herd_id.map(|herd| herd.to_string()),
                animal.bio.as_str(),
                animal.image_url.as_deref(),
                bool_to_int(animal.is_featured),
                animal.updated_at,
            ],
        )
        .map_err(|err| map_slug_write_error(err, SlugKind::Animal, &animal.slug))?;
        tx.commit()?;

        Ok(())
    }

    fn delete_animal(&self, id: AnimalId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM animals WHERE uuid = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn get_animal(&self, id: AnimalId) -> RepoResult<Option<Animal>> {
        select_one(self.conn, "a.uuid = ?1", &id.to_string())
    }

    fn get_animal_by_slug(&self, slug: &str) -> RepoResult<Option<Animal>> {
        select_one(self.conn, "a.slug = ?1", slug)
    }

    fn list_animals(&self, query: &AnimalListQuery) -> RepoResult<Vec<Animal>> {
        let mut sql = format!("{ANIMAL_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(herd_id) = query.herd_id {
            sql.push_str(" AND a.herd_uuid = ?");
            bind_values.push(Value::Text(herd_id.to_string()));
        }
        if query.featured_only {
            sql.push_str(" AND a.is_featured = 1");
        }

        sql.push_str(" ORDER BY a.updated_at DESC, a.uuid ASC");
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut animals = Vec::new();
        while let Some(row) = rows.next()? {
            animals.push(parse_animal_row(row)?);
        }

        Ok(animals)
    }
}

fn select_one(conn: &Connection, predicate: &str, key: &str) -> RepoResult<Option<Animal>> {
    let mut stmt = conn.prepare(&format!("{ANIMAL_SELECT_SQL} WHERE {predicate};"))?;
    let mut rows = stmt.query([key])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_animal_row(row)?));
    }
    Ok(None)
}

fn parse_animal_row(row: &Row<'_>) -> RepoResult<Animal> {
    let uuid_text: String = row.get("uuid")?;
    let animal = Animal {
        id: parse_uuid(&uuid_text, "animals.uuid")?,
        name: row.get("name")?,
        slug: row.get("slug")?,
        species: row.get("species")?,
        breed: row.get("breed")?,
        herd_id: parse_optional_uuid(row.get("herd_uuid")?, "animals.herd_uuid")?,
        herd_name: row.get("herd_name")?,
        bio: row.get("bio")?,
        image_url: row.get("image_url")?,
        is_featured: parse_flag(row.get("is_featured")?, "animals.is_featured")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    animal.validate()?;
    Ok(animal)
}
