//! Slug command - preview slug derivation

use anyhow::Result;
use sanctuary_core::slugify;

use crate::args::{SlugArgs, SlugCommands};

pub fn execute(args: SlugArgs) -> Result<()> {
    match args.command {
        SlugCommands::Preview { name } => {
            println!("{}", slugify(&name));
            Ok(())
        }
    }
}
