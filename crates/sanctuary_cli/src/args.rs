//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use sanctuary_core::model::article::ArticleStatus;
use sanctuary_core::Role;
use std::path::PathBuf;
use uuid::Uuid;

/// sanctuary: manage animals, news, pages and events for the sanctuary site
#[derive(Parser, Debug)]
#[command(name = "sanctuary")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Act as the account registered under this e-mail
    #[arg(long = "as", value_name = "EMAIL", global = true, env = "SANCTUARY_AS")]
    pub as_user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Slug helpers
    Slug(SlugArgs),

    /// Manage animal profiles
    Animal(AnimalArgs),

    /// Manage news articles
    Article(ArticleArgs),

    /// Manage static pages
    Page(PageArgs),

    /// Manage herds
    Herd(HerdArgs),

    /// Manage calendar events
    Event(EventArgs),

    /// Manage administrator accounts
    User(UserArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct SlugArgs {
    #[command(subcommand)]
    pub command: SlugCommands,
}

#[derive(Subcommand, Debug)]
pub enum SlugCommands {
    /// Print the slug a name would receive
    Preview {
        /// Display name to slugify
        name: String,
    },
}

#[derive(Args, Debug)]
pub struct AnimalArgs {
    #[command(subcommand)]
    pub command: AnimalCommands,
}

#[derive(Subcommand, Debug)]
pub enum AnimalCommands {
    /// Create an animal profile
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        species: String,
        #[arg(long)]
        breed: Option<String>,
        /// Herd id
        #[arg(long)]
        herd: Option<Uuid>,
        #[arg(long, default_value = "")]
        bio: String,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        featured: bool,
    },

    /// Update fields of an animal profile
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long, conflicts_with = "clear_breed")]
        breed: Option<String>,
        #[arg(long)]
        clear_breed: bool,
        #[arg(long, conflicts_with = "clear_herd")]
        herd: Option<Uuid>,
        #[arg(long)]
        clear_herd: bool,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long, conflicts_with = "clear_image_url")]
        image_url: Option<String>,
        #[arg(long)]
        clear_image_url: bool,
        #[arg(long)]
        featured: Option<bool>,
    },

    /// Delete an animal profile
    Delete { id: Uuid },

    /// Show the animal with the given slug
    Get { slug: String },

    /// List animals, most recently edited first
    List {
        /// Only animals in this herd
        #[arg(long)]
        herd: Option<Uuid>,
        #[arg(long)]
        featured: bool,
        #[command(flatten)]
        page: PaginationArgs,
    },
}

#[derive(Args, Debug)]
pub struct ArticleArgs {
    #[command(subcommand)]
    pub command: ArticleCommands,
}

#[derive(Subcommand, Debug)]
pub enum ArticleCommands {
    /// Create a news article (draft unless --published)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long, default_value = "")]
        body: String,
        #[arg(long)]
        published: bool,
    },

    /// Update fields of an article
    Update {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long, conflicts_with = "clear_excerpt")]
        excerpt: Option<String>,
        #[arg(long)]
        clear_excerpt: bool,
        #[arg(long)]
        body: Option<String>,
        /// draft or published
        #[arg(long, value_parser = parse_article_status)]
        status: Option<ArticleStatus>,
    },

    /// Delete an article
    Delete { id: Uuid },

    /// Show the article with the given slug
    Get { slug: String },

    /// List articles, most recently edited first
    List {
        /// draft or published
        #[arg(long, value_parser = parse_article_status)]
        status: Option<ArticleStatus>,
        #[command(flatten)]
        page: PaginationArgs,
    },
}

#[derive(Args, Debug)]
pub struct PageArgs {
    #[command(subcommand)]
    pub command: PageCommands,
}

#[derive(Subcommand, Debug)]
pub enum PageCommands {
    /// Create a static page
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        body: String,
        #[arg(long)]
        meta_description: Option<String>,
        #[arg(long)]
        published: bool,
    },

    /// Update fields of a page
    Update {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long, conflicts_with = "clear_meta_description")]
        meta_description: Option<String>,
        #[arg(long)]
        clear_meta_description: bool,
        #[arg(long)]
        published: Option<bool>,
    },

    /// Delete a page
    Delete { id: Uuid },

    /// Show the page with the given slug
    Get { slug: String },

    /// List pages, most recently edited first
    List {
        #[arg(long)]
        published_only: bool,
        #[command(flatten)]
        page: PaginationArgs,
    },
}

#[derive(Args, Debug)]
pub struct HerdArgs {
    #[command(subcommand)]
    pub command: HerdCommands,
}

#[derive(Subcommand, Debug)]
pub enum HerdCommands {
    /// Create a herd
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Rename or describe a herd
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a herd; member animals keep a dangling reference
    Delete { id: Uuid },

    /// List herds by name
    List,
}

#[derive(Args, Debug)]
pub struct EventArgs {
    #[command(subcommand)]
    pub command: EventCommands,
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// Create a calendar event
    Create {
        #[arg(long)]
        title: String,
        /// Start, epoch milliseconds
        #[arg(long)]
        starts_at: i64,
        /// End, epoch milliseconds
        #[arg(long)]
        ends_at: Option<i64>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a calendar event
    Delete { id: Uuid },

    /// List events overlapping an inclusive window
    Range {
        /// Window start, epoch milliseconds
        #[arg(long)]
        start: i64,
        /// Window end, epoch milliseconds
        #[arg(long)]
        end: i64,
    },
}

#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create the first administrator account
    Bootstrap {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },

    /// Add an account (admin only)
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        /// admin or editor
        #[arg(long, default_value = "editor", value_parser = parse_role)]
        role: Role,
    },

    /// Change the role of an account (admin only)
    SetRole {
        /// E-mail of the account to change
        email: String,
        /// admin or editor
        #[arg(value_parser = parse_role)]
        role: Role,
    },

    /// List accounts
    List,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./sanctuary.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PaginationArgs {
    /// Page size (default 20, max 100)
    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value).ok_or_else(|| format!("unknown role `{value}`; expected admin|editor"))
}

fn parse_article_status(value: &str) -> Result<ArticleStatus, String> {
    ArticleStatus::parse(value)
        .ok_or_else(|| format!("unknown status `{value}`; expected draft|published"))
}
