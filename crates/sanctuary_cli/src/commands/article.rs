//! Article command - news article management

use anyhow::{anyhow, Result};
use sanctuary_core::model::article::{ArticlePatch, NewArticle};
use sanctuary_core::repo::article_repo::{ArticleListQuery, SqliteArticleRepository};
use sanctuary_core::service::article_service::ArticleService;

use super::{clearable, print_json, Session};
use crate::args::{ArticleArgs, ArticleCommands};

pub fn execute(args: ArticleArgs, session: &Session) -> Result<()> {
    let service = ArticleService::new(SqliteArticleRepository::try_new(&session.conn)?);
    let ctx = &session.ctx;

    match args.command {
        ArticleCommands::Create {
            title,
            author,
            excerpt,
            body,
            published,
        } => {
            let mut draft = NewArticle::new(title, author).with_body(body);
            draft.excerpt = excerpt;
            if published {
                draft = draft.published();
            }

            let id = service.create_article(ctx, &draft)?;
            print_json(&service.get_article(id)?)
        }
        ArticleCommands::Update {
            id,
            title,
            author,
            excerpt,
            clear_excerpt,
            body,
            status,
        } => {
            let patch = ArticlePatch {
                title,
                author,
                excerpt: clearable(excerpt, clear_excerpt),
                body,
                status,
            };
            service.update_article(ctx, id, &patch)?;
            print_json(&service.get_article(id)?)
        }
        ArticleCommands::Delete { id } => {
            service.delete_article(ctx, id)?;
            println!("Deleted article {id}");
            Ok(())
        }
        ArticleCommands::Get { slug } => {
            let article = service
                .get_article_by_slug(&slug)?
                .ok_or_else(|| anyhow!("No article found with slug `{slug}`"))?;
            print_json(&article)
        }
        ArticleCommands::List { status, page } => {
            let query = ArticleListQuery {
                status,
                limit: page.limit,
                offset: page.offset,
            };
            print_json(&service.list_articles(&query)?)
        }
    }
}
