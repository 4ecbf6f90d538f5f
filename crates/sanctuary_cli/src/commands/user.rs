//! User command - administrator account management

use anyhow::Result;
use sanctuary_core::model::user::NewUser;
use sanctuary_core::repo::user_repo::SqliteUserRepository;
use sanctuary_core::service::require_role;
use sanctuary_core::service::user_service::UserService;
use sanctuary_core::{Role, ServiceError};

use super::{print_json, Session};
use crate::args::{UserArgs, UserCommands};

pub fn execute(args: UserArgs, session: &Session) -> Result<()> {
    let service = UserService::new(SqliteUserRepository::try_new(&session.conn)?);
    let ctx = &session.ctx;

    match args.command {
        UserCommands::Bootstrap { email, name } => {
            let id = service.bootstrap_admin(&email, &name)?;
            print_json(&service.get_user(id)?)
        }
        UserCommands::Add { email, name, role } => {
            let id = service.create_user(ctx, &NewUser::new(email, name, role))?;
            print_json(&service.get_user(id)?)
        }
        UserCommands::SetRole { email, role } => {
            require_role(ctx, Role::Admin)?;
            let user = service
                .find_user_by_email(&email)?
                .ok_or_else(|| ServiceError::UnknownUser(email.clone()))?;
            service.set_user_role(ctx, user.id, role)?;
            print_json(&service.get_user(user.id)?)
        }
        UserCommands::List => print_json(&service.list_users()?),
    }
}
