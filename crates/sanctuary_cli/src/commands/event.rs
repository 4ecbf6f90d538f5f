//! Event command - calendar management

use anyhow::Result;
use sanctuary_core::model::event::NewEvent;
use sanctuary_core::repo::event_repo::SqliteEventRepository;
use sanctuary_core::service::event_service::EventService;

use super::{print_json, Session};
use crate::args::{EventArgs, EventCommands};

pub fn execute(args: EventArgs, session: &Session) -> Result<()> {
    let service = EventService::new(SqliteEventRepository::try_new(&session.conn)?);
    let ctx = &session.ctx;

    match args.command {
        EventCommands::Create {
            title,
            starts_at,
            ends_at,
            location,
            description,
        } => {
            let mut draft = NewEvent::new(title, starts_at);
            draft.ends_at = ends_at;
            draft.location = location;
            draft.description = description;

            let id = service.create_event(ctx, &draft)?;
            print_json(&service.get_event(id)?)
        }
        EventCommands::Delete { id } => {
            service.delete_event(ctx, id)?;
            println!("Deleted event {id}");
            Ok(())
        }
        EventCommands::Range { start, end } => {
            print_json(&service.list_events_in_range(start, end)?)
        }
    }
}
