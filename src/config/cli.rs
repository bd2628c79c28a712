use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use majex_api_types::AssetCategory;

/// Command-line arguments for the `majex` binary.
#[derive(Debug, Parser)]
#[command(name = "majex", version, about = "MAJEX site client and admin tool")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "MAJEX_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Deployment whose default API address is used (local|production).
    #[arg(long = "environment", value_name = "NAME", global = true)]
    pub environment: Option<String>,

    /// Override the backend API address.
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Override the address relative image paths are resolved against.
    #[arg(long = "asset-base-url", value_name = "URL", global = true)]
    pub asset_base_url: Option<String>,

    /// Override where the admin session is persisted.
    #[arg(
        long = "session-file",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub session_file: Option<PathBuf>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Sign in to the admin area and persist the session.
    Login(LoginArgs),
    /// Sign out and forget the persisted session.
    Logout,
    /// Show the signed-in admin, re-validating the stored token.
    Whoami,
    /// Site images.
    #[command(subcommand)]
    Assets(AssetsCommand),
    /// Events on the public agenda.
    #[command(subcommand)]
    Events(EventsCommand),
    /// Contact-form messages.
    #[command(subcommand)]
    Contacts(ContactsCommand),
    /// Dashboard headline figures.
    Dashboard,
}

#[derive(Debug, Args, Clone)]
pub struct LoginArgs {
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    #[arg(long, env = "MAJEX_PASSWORD", hide_env_values = true, value_name = "PASSWORD")]
    pub password: String,
}

#[derive(Debug, Subcommand, Clone)]
pub enum AssetsCommand {
    /// Print the public catalog grouped by category.
    Catalog,
    /// Resolve a key to the image URL the site would display.
    Url {
        key: String,
    },
    /// List every asset, including inactive ones.
    List,
    /// Create an asset.
    Create(AssetCreateArgs),
    /// Update an asset; unspecified fields keep their current value.
    Update(AssetUpdateArgs),
    /// Delete an asset.
    Delete {
        id: u64,
    },
    /// Flip an asset between active and inactive.
    Toggle {
        id: u64,
    },
    /// Set sort orders, given as ID=ORDER pairs.
    Reorder {
        #[arg(value_name = "ID=ORDER", required = true, value_parser = parse_reorder_item)]
        items: Vec<(u64, i32)>,
    },
}

#[derive(Debug, Args, Clone)]
pub struct AssetCreateArgs {
    #[arg(long)]
    pub key: String,

    #[arg(long, value_parser = parse_category)]
    pub category: AssetCategory,

    #[arg(long)]
    pub label: String,

    #[arg(long = "alt-text")]
    pub alt_text: Option<String>,

    #[arg(long = "sort-order", default_value_t = 0, allow_negative_numbers = true)]
    pub sort_order: i32,

    /// Create the asset hidden from the public site.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub inactive: bool,

    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct AssetUpdateArgs {
    pub id: u64,

    #[arg(long, value_parser = parse_category)]
    pub category: Option<AssetCategory>,

    #[arg(long)]
    pub label: Option<String>,

    #[arg(long = "alt-text")]
    pub alt_text: Option<String>,

    #[arg(long = "sort-order", allow_negative_numbers = true)]
    pub sort_order: Option<i32>,

    #[arg(long, value_parser = BoolishValueParser::new())]
    pub active: Option<bool>,

    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum EventsCommand {
    /// List all events.
    List,
    /// Published events still to come, soonest first.
    Upcoming {
        /// Only events of this type.
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
    },
    Get {
        id: u64,
    },
    /// Create an event from a JSON document.
    Create(EventWriteArgs),
    /// Replace an event from a JSON document.
    Update {
        id: u64,
        #[command(flatten)]
        write: EventWriteArgs,
    },
    Delete {
        id: u64,
    },
    Publish {
        id: u64,
    },
    Cancel {
        id: u64,
    },
}

#[derive(Debug, Args, Clone)]
pub struct EventWriteArgs {
    /// JSON file holding the event fields.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Image to upload alongside the event.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ContactsCommand {
    /// Submit the public contact form.
    Send(ContactSendArgs),
    List,
    Get {
        id: u64,
    },
    /// Mark a message as read.
    Read {
        id: u64,
    },
    /// Mark a message as replied.
    Replied {
        id: u64,
    },
    Delete {
        id: u64,
    },
    Stats,
}

#[derive(Debug, Args, Clone)]
pub struct ContactSendArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub message: String,
}

fn parse_category(value: &str) -> Result<AssetCategory, String> {
    value.parse().map_err(|err| format!("{err}"))
}

fn parse_reorder_item(value: &str) -> Result<(u64, i32), String> {
    let (id, order) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ID=ORDER, got `{value}`"))?;
    let id = id
        .trim()
        .parse()
        .map_err(|err| format!("invalid id `{id}`: {err}"))?;
    let order = order
        .trim()
        .parse()
        .map_err(|err| format!("invalid sort order `{order}`: {err}"))?;
    Ok((id, order))
}
