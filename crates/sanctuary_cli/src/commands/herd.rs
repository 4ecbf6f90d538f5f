//! Herd command - herd management

use anyhow::Result;
use sanctuary_core::model::herd::{HerdPatch, NewHerd};
use sanctuary_core::repo::herd_repo::SqliteHerdRepository;
use sanctuary_core::service::herd_service::HerdService;

use super::{print_json, Session};
use crate::args::{HerdArgs, HerdCommands};

pub fn execute(args: HerdArgs, session: &Session) -> Result<()> {
    let service = HerdService::new(SqliteHerdRepository::try_new(&session.conn)?);
    let ctx = &session.ctx;

    match args.command {
        HerdCommands::Create { name, description } => {
            let mut draft = NewHerd::new(name);
            draft.description = description;
            let id = service.create_herd(ctx, &draft)?;
            print_json(&service.get_herd(id)?)
        }
        HerdCommands::Update {
            id,
            name,
            description,
        } => {
            let patch = HerdPatch {
                name,
                description: description.map(Some),
            };
            service.update_herd(ctx, id, &patch)?;
            print_json(&service.get_herd(id)?)
        }
        HerdCommands::Delete { id } => {
            service.delete_herd(ctx, id)?;
            println!("Deleted herd {id}");
            Ok(())
        }
        HerdCommands::List => print_json(&service.list_herds()?),
    }
}
