use rusqlite::Connection;
use sanctuary_core::db::open_db_in_memory;
use sanctuary_core::model::animal::{AnimalPatch, NewAnimal};
use sanctuary_core::model::herd::NewHerd;
use sanctuary_core::repo::animal_repo::{
    AnimalListQuery, AnimalRepository, SqliteAnimalRepository,
};
use sanctuary_core::repo::herd_repo::{HerdRepository, SqliteHerdRepository};
use sanctuary_core::service::animal_service::AnimalService;
use sanctuary_core::{AuthContext, Principal, Role, ServiceError, SlugKind};
use uuid::Uuid;

fn editor() -> AuthContext {
    AuthContext::authenticated(Principal {
        user_id: Uuid::new_v4(),
        email: "keeper@example.org".to_string(),
        role: Role::Editor,
    })
}

fn service(conn: &Connection) -> AnimalService<SqliteAnimalRepository<'_>> {
    AnimalService::new(SqliteAnimalRepository::try_new(conn).unwrap())
}

fn animal_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM animals;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_derives_slug_from_name() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let id = service
        .create_animal(&editor(), &NewAnimal::new("Midnight Storm!!", "horse"))
        .unwrap();

    let loaded = service.get_animal_by_slug("midnight-storm").unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Midnight Storm!!");
    assert_eq!(loaded.slug, "midnight-storm");
}

#[test]
fn duplicate_name_is_rejected_and_nothing_is_written() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = editor();

    service
        .create_animal(&ctx, &NewAnimal::new("Bella", "donkey"))
        .unwrap();
    let err = service
        .create_animal(&ctx, &NewAnimal::new("  BELLA ", "goat"))
        .unwrap_err();

    assert!(matches!(
        &err,
        ServiceError::DuplicateSlug { kind: SlugKind::Animal, slug } if slug == "bella"
    ));
    assert_eq!(err.code(), "duplicate_slug");
    assert_eq!(animal_count(&conn), 1);
    let stored = service.get_animal_by_slug("bella").unwrap().unwrap();
    assert_eq!(stored.species, "donkey");
}

#[test]
fn rename_to_same_slug_is_not_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = editor();

    let id = service
        .create_animal(&ctx, &NewAnimal::new("Old Tom", "horse"))
        .unwrap();
    let patch = AnimalPatch {
        name: Some("old   tom".to_string()),
        ..AnimalPatch::default()
    };
    service.update_animal(&ctx, id, &patch).unwrap();

    let loaded = service.get_animal(id).unwrap().unwrap();
    assert_eq!(loaded.name, "old   tom");
    assert_eq!(loaded.slug, "old-tom");
}

#[test]
fn rename_moves_slug_and_frees_the_old_one() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = editor();

    let id = service
        .create_animal(&ctx, &NewAnimal::new("Pepper", "goat"))
        .unwrap();
    let patch = AnimalPatch {
        name: Some("Salt & Pepper".to_string()),
        ..AnimalPatch::default()
    };
    service.update_animal(&ctx, id, &patch).unwrap();

    assert!(service.get_animal_by_slug("pepper").unwrap().is_none());
    let renamed = service.get_animal_by_slug("salt-pepper").unwrap().unwrap();
    assert_eq!(renamed.id, id);

    service
        .create_animal(&ctx, &NewAnimal::new("Pepper", "goat"))
        .unwrap();
}

#[test]
fn rename_onto_taken_slug_rejects_the_whole_patch() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = editor();

    service
        .create_animal(&ctx, &NewAnimal::new("Juniper", "donkey"))
        .unwrap();
    let id = service
        .create_animal(&ctx, &NewAnimal::new("Clover", "donkey"))
        .unwrap();

    let patch = AnimalPatch {
        name: Some("Juniper".to_string()),
        bio: Some("Loves carrots.".to_string()),
        is_featured: Some(true),
        ..AnimalPatch::default()
    };
    let err = service.update_animal(&ctx, id, &patch).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateSlug { .. }));
    assert!(err.to_string().contains("another animal already uses this name"));

    let unchanged = service.get_animal(id).unwrap().unwrap();
    assert_eq!(unchanged.name, "Clover");
    assert_eq!(unchanged.slug, "clover");
    assert_eq!(unchanged.bio, "");
    assert!(!unchanged.is_featured);
}

#[test]
fn update_without_name_skips_slug_check() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = editor();

    let id = service
        .create_animal(&ctx, &NewAnimal::new("Hazel", "pig").with_breed("Kunekune"))
        .unwrap();
    let patch = AnimalPatch {
        bio: Some("Rescued in 2019.".to_string()),
        breed: Some(None),
        ..AnimalPatch::default()
    };
    service.update_animal(&ctx, id, &patch).unwrap();

    let loaded = service.get_animal(id).unwrap().unwrap();
    assert_eq!(loaded.slug, "hazel");
    assert_eq!(loaded.bio, "Rescued in 2019.");
    assert_eq!(loaded.breed, None);
    assert!(loaded.updated_at >= loaded.created_at);
}

#[test]
fn update_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let missing = Uuid::new_v4();
    let err = service
        .update_animal(&editor(), missing, &AnimalPatch::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound { entity: "animal", id } if id == missing
    ));
}

#[test]
fn delete_frees_slug_for_reuse() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = editor();

    let id = service
        .create_animal(&ctx, &NewAnimal::new("Biscuit", "sheep"))
        .unwrap();
    service.delete_animal(&ctx, id).unwrap();
    assert!(service.get_animal_by_slug("biscuit").unwrap().is_none());

    let recreated = service
        .create_animal(&ctx, &NewAnimal::new("Biscuit", "sheep"))
        .unwrap();
    assert_ne!(recreated, id);
}

#[test]
fn delete_unknown_id_is_not_an_error() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service.delete_animal(&editor(), Uuid::new_v4()).unwrap();
}

#[test]
fn names_without_ascii_alphanumerics_share_the_empty_slug() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = editor();

    service
        .create_animal(&ctx, &NewAnimal::new("!!!", "cat"))
        .unwrap();
    let err = service
        .create_animal(&ctx, &NewAnimal::new("🐴", "horse"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::DuplicateSlug { slug, .. } if slug.is_empty()
    ));
    assert!(service.get_animal_by_slug("").unwrap().is_some());
}

#[test]
fn slugs_stay_unique_across_mixed_operations() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let ctx = editor();

    let names = ["Luna", "Luna!", "Sir Galahad", "sir-galahad", "Mabel", "Otis"];
    let mut ids = Vec::new();
    for name in names {
        if let Ok(id) = service.create_animal(&ctx, &NewAnimal::new(name, "horse")) {
            ids.push(id);
        }
    }
    assert_eq!(ids.len(), 4);

    for (index, id) in ids.iter().enumerate() {
        let patch = AnimalPatch {
            name: Some(names[(index + 2) % names.len()].to_string()),
            ..AnimalPatch::default()
        };
        let _ = service.update_animal(&ctx, *id, &patch);
    }

    let duplicates: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM (SELECT slug FROM animals GROUP BY slug HAVING COUNT(*) > 1);",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(duplicates, 0);
}

#[test]
fn anonymous_mutations_are_rejected_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let anonymous = AuthContext::anonymous();

    let err = service
        .create_animal(&anonymous, &NewAnimal::new("Ghost", "horse"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::AuthenticationRequired));
    assert_eq!(animal_count(&conn), 0);

    let id = service
        .create_animal(&editor(), &NewAnimal::new("Ghost", "horse"))
        .unwrap();
    assert!(matches!(
        service.update_animal(&anonymous, id, &AnimalPatch::default()),
        Err(ServiceError::AuthenticationRequired)
    ));
    assert!(matches!(
        service.delete_animal(&anonymous, id),
        Err(ServiceError::AuthenticationRequired)
    ));
    assert!(service.get_animal_by_slug("ghost").unwrap().is_some());
}

#[test]
fn blank_name_fails_validation() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .create_animal(&editor(), &NewAnimal::new("   ", "horse"))
        .unwrap_err();
    assert_eq!(err.code(), "validation_failed");
}

#[test]
fn herd_name_is_resolved_at_read_time() {
    let conn = open_db_in_memory().unwrap();
    let herds = SqliteHerdRepository::try_new(&conn).unwrap();
    let animals = SqliteAnimalRepository::try_new(&conn).unwrap();

    let herd_id = herds.create_herd(&NewHerd::new("North Pasture")).unwrap();
    let id = animals
        .create_animal(&NewAnimal::new("Daisy", "cow").in_herd(herd_id))
        .unwrap();
    let loaded = animals.get_animal(id).unwrap().unwrap();
    assert_eq!(loaded.herd_name.as_deref(), Some("North Pasture"));

    herds.delete_herd(herd_id).unwrap();
    let orphaned = animals.get_animal(id).unwrap().unwrap();
    assert_eq!(orphaned.herd_id, Some(herd_id));
    assert_eq!(orphaned.herd_name, None);

    let dangling = animals
        .create_animal(&NewAnimal::new("Rosie", "cow").in_herd(Uuid::new_v4()))
        .unwrap();
    assert_eq!(animals.get_animal(dangling).unwrap().unwrap().herd_name, None);
}

#[test]
fn list_filters_by_herd_and_featured_flag() {
    let conn = open_db_in_memory().unwrap();
    let herds = SqliteHerdRepository::try_new(&conn).unwrap();
    let animals = SqliteAnimalRepository::try_new(&conn).unwrap();

    let herd_id = herds.create_herd(&NewHerd::new("Minis")).unwrap();
    animals
        .create_animal(&NewAnimal::new("Peanut", "mini horse").in_herd(herd_id))
        .unwrap();
    animals
        .create_animal(
            &NewAnimal::new("Pickles", "mini horse")
                .in_herd(herd_id)
                .featured(true),
        )
        .unwrap();
    animals
        .create_animal(&NewAnimal::new("Hank", "mule").featured(true))
        .unwrap();

    let in_herd = animals
        .list_animals(&AnimalListQuery {
            herd_id: Some(herd_id),
            ..AnimalListQuery::default()
        })
        .unwrap();
    assert_eq!(in_herd.len(), 2);

    let featured = animals
        .list_animals(&AnimalListQuery {
            featured_only: true,
            ..AnimalListQuery::default()
        })
        .unwrap();
    let mut featured_slugs: Vec<_> = featured.into_iter().map(|a| a.slug).collect();
    featured_slugs.sort();
    assert_eq!(featured_slugs, vec!["hank", "pickles"]);

    let limited = animals
        .list_animals(&AnimalListQuery {
            limit: Some(1),
            ..AnimalListQuery::default()
        })
        .unwrap();
    assert_eq!(limited.len(), 1);
}
