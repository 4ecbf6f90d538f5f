//! Animal command - animal profile management

use anyhow::{anyhow, Result};
use sanctuary_core::model::animal::{AnimalPatch, NewAnimal};
use sanctuary_core::repo::animal_repo::{AnimalListQuery, SqliteAnimalRepository};
use sanctuary_core::service::animal_service::AnimalService;

use super::{clearable, print_json, Session};
use crate::args::{AnimalArgs, AnimalCommands};

pub fn execute(args: AnimalArgs, session: &Session) -> Result<()> {
    let service = AnimalService::new(SqliteAnimalRepository::try_new(&session.conn)?);
    let ctx = &session.ctx;

    match args.command {
        AnimalCommands::Create {
            name,
            species,
            breed,
            herd,
            bio,
            image_url,
            featured,
        } => {
            let mut draft = NewAnimal::new(name, species).with_bio(bio).featured(featured);
            draft.breed = breed;
            draft.herd_id = herd;
            draft.image_url = image_url;

            let id = service.create_animal(ctx, &draft)?;
            print_json(&service.get_animal(id)?)
        }
        AnimalCommands::Update {
            id,
            name,
            species,
            breed,
            clear_breed,
            herd,
            clear_herd,
            bio,
            image_url,
            clear_image_url,
            featured,
        } => {
            let patch = AnimalPatch {
                name,
                species,
                breed: clearable(breed, clear_breed),
                herd_id: clearable(herd, clear_herd),
                bio,
                image_url: clearable(image_url, clear_image_url),
                is_featured: featured,
            };
            service.update_animal(ctx, id, &patch)?;
            print_json(&service.get_animal(id)?)
        }
        AnimalCommands::Delete { id } => {
            service.delete_animal(ctx, id)?;
            println!("Deleted animal {id}");
            Ok(())
        }
        AnimalCommands::Get { slug } => {
            let animal = service
                .get_animal_by_slug(&slug)?
                .ok_or_else(|| anyhow!("No animal found with slug `{slug}`"))?;
            print_json(&animal)
        }
        AnimalCommands::List {
            herd,
            featured,
            page,
        } => {
            let query = AnimalListQuery {
                herd_id: herd,
                featured_only: featured,
                limit: page.limit,
                offset: page.offset,
            };
            print_json(&service.list_animals(&query)?)
        }
    }
}
