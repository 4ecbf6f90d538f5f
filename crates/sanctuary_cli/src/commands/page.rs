//! Page command - static page management

use anyhow::{anyhow, Result};
use sanctuary_core::model::page::{NewPage, PagePatch};
use sanctuary_core::repo::page_repo::{PageListQuery, SqlitePageRepository};
use sanctuary_core::service::page_service::PageService;

use super::{clearable, print_json, Session};
use crate::args::{PageArgs, PageCommands};

pub fn execute(args: PageArgs, session: &Session) -> Result<()> {
    let service = PageService::new(SqlitePageRepository::try_new(&session.conn)?);
    let ctx = &session.ctx;

    match args.command {
        PageCommands::Create {
            title,
            body,
            meta_description,
            published,
        } => {
            let mut draft = NewPage::new(title).with_body(body).published(published);
            draft.meta_description = meta_description;

            let id = service.create_page(ctx, &draft)?;
            print_json(&service.get_page(id)?)
        }
        PageCommands::Update {
            id,
            title,
            body,
            meta_description,
            clear_meta_description,
            published,
        } => {
            let patch = PagePatch {
                title,
                body,
                meta_description: clearable(meta_description, clear_meta_description),
                is_published: published,
            };
            service.update_page(ctx, id, &patch)?;
            print_json(&service.get_page(id)?)
        }
        PageCommands::Delete { id } => {
            service.delete_page(ctx, id)?;
            println!("Deleted page {id}");
            Ok(())
        }
        PageCommands::Get { slug } => {
            let page = service
                .get_page_by_slug(&slug)?
                .ok_or_else(|| anyhow!("No page found with slug `{slug}`"))?;
            print_json(&page)
        }
        PageCommands::List {
            published_only,
            page,
        } => {
            let query = PageListQuery {
                published_only,
                limit: page.limit,
                offset: page.offset,
            };
            print_json(&service.list_pages(&query)?)
        }
    }
}
