use sanctuary_core::model::animal::{Animal, NewAnimal};
use sanctuary_core::model::article::{ArticleStatus, NewArticle};
use sanctuary_core::{Role, SlugKind};
use uuid::Uuid;

#[test]
fn animal_serializes_with_snake_case_fields() {
    let animal = Animal {
        id: Uuid::new_v4(),
        name: "Midnight Storm!!".to_string(),
        slug: "midnight-storm".to_string(),
        species: "horse".to_string(),
        breed: None,
        herd_id: None,
        herd_name: None,
        bio: String::new(),
        image_url: Some("https://example.org/storm.jpg".to_string()),
        is_featured: true,
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_000_000,
    };

    let json = serde_json::to_value(&animal).unwrap();
    assert_eq!(json["slug"], "midnight-storm");
    assert_eq!(json["is_featured"], true);
    assert!(json["herd_name"].is_null());

    let decoded: Animal = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, animal);
}

#[test]
fn enums_use_lowercase_wire_names() {
    assert_eq!(
        serde_json::to_value(ArticleStatus::Published).unwrap(),
        "published"
    );
    assert_eq!(serde_json::to_value(Role::Editor).unwrap(), "editor");
    assert_eq!(serde_json::to_value(SlugKind::Page).unwrap(), "page");
}

#[test]
fn unknown_article_status_is_rejected() {
    let value = serde_json::json!({
        "title": "Hay Drive",
        "author": "Staff",
        "excerpt": null,
        "body": "",
        "status": "archived"
    });
    assert!(serde_json::from_value::<NewArticle>(value).is_err());
}

#[test]
fn drafts_deserialize_from_form_payloads() {
    let value = serde_json::json!({
        "name": "Juniper",
        "species": "donkey",
        "breed": null,
        "herd_id": null,
        "bio": "Gentle.",
        "image_url": null,
        "is_featured": false
    });
    let draft: NewAnimal = serde_json::from_value(value).unwrap();
    assert_eq!(draft, NewAnimal::new("Juniper", "donkey").with_bio("Gentle."));
    assert!(draft.validate().is_ok());
}
