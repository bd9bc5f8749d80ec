//! `mailcompose` - compose-page services from the command line
//!
//! Expands recipient fragments against the contact database, manages
//! contacts and inventory properties, and runs the compose helpers.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailcompose_core::compose::{
    ComposeFormat, PassphraseDialog, PassphraseKind, SpellCheckerConfig, convert_compose_text,
};
use mailcompose_core::{
    AddressExpander, AddressList, ComposeConfig, ContactRepository, ExpansionResult,
    InventoryRepository, NotificationQueue, NotificationSink, ParseOptions, TracingSink,
    inventory_prefs,
};

#[derive(Parser)]
#[command(name = "mailcompose")]
#[command(about = "Compose-page address expansion and helpers")]
struct Cli {
    /// Configuration file
    #[arg(long, env = "MAILCOMPOSE_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Expand the last address of a recipient list
    Expand {
        /// Recipient field text, e.g. "alice@example.com, bo"
        input: String,
    },

    /// Manage the contact directory
    Contacts {
        #[command(subcommand)]
        command: ContactsCommand,
    },

    /// Manage inventory properties
    Properties {
        #[command(subcommand)]
        command: PropertiesCommand,
    },

    /// Print the inventory preference schema
    Prefs,

    /// Convert compose text read from stdin
    Convert {
        /// Target format: text or html
        #[arg(long)]
        to: ComposeFormat,
    },

    /// Print passphrase dialog parameters
    Passphrase {
        /// Dialog type: pgp, pgp_symm or smime
        kind: String,
        /// Compose cache id (pgp_symm only)
        #[arg(long)]
        cache_id: Option<String>,
    },

    /// Print spellchecker widget configuration
    Spellcheck,
}

#[derive(Subcommand)]
enum ContactsCommand {
    /// Record a contact use
    Add {
        /// Email address
        email: String,
        /// Display name
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Record every complete address of a recipient list
    Import {
        /// Recipient field text, e.g. "Alice <alice@example.com>, bob@example.com"
        recipients: String,
    },
    /// Search contacts
    Search {
        /// Search text
        query: String,
    },
    /// List contacts, most used first
    List {
        /// Maximum number of contacts
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Delete a contact
    Delete {
        /// Email address
        email: String,
    },
}

#[derive(Subcommand)]
enum PropertiesCommand {
    /// Add a property
    Add {
        /// Property name
        name: String,
        /// Position in lists (lower first)
        #[arg(long, default_value_t = 0)]
        weight: i64,
    },
    /// List properties
    List,
    /// Delete a property
    Delete {
        /// Property id
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailcompose=info,mailcompose_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().or_else(default_config_path);
    let config = match &config_path {
        Some(path) => ComposeConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ComposeConfig::default(),
    };
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Expand { input } => expand(&config, &input, cli.json).await,
        Command::Contacts { command } => contacts(&config, command).await,
        Command::Properties { command } => properties(&config, command).await,
        Command::Prefs => {
            let repo = open_inventory(&config).await?;
            let schema = inventory_prefs(&repo).await?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
        Command::Convert { to } => {
            let mut data = String::new();
            std::io::stdin()
                .read_to_string(&mut data)
                .context("reading stdin")?;
            print!("{}", convert_compose_text(&data, to)?);
            Ok(())
        }
        Command::Passphrase { kind, cache_id } => {
            let kind = PassphraseKind::from_request(&kind, cache_id.as_deref())?;
            println!("{}", PassphraseDialog::new(&kind).to_json()?);
            Ok(())
        }
        Command::Spellcheck => {
            let spellchecker = SpellCheckerConfig::new(config.view, config.menu_view);
            println!("{}", serde_json::to_string_pretty(&spellchecker)?);
            Ok(())
        }
    }
}

async fn expand(config: &ComposeConfig, input: &str, json: bool) -> Result<()> {
    let repo = open_contacts(config).await?;
    let notifications = NotificationQueue::new();
    let expander = AddressExpander::new(&repo, &notifications);

    let result = expander.expand(input).await?;
    for notification in notifications.drain() {
        TracingSink.push(&notification.message, notification.severity);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result {
        ExpansionResult::Resolved(value) | ExpansionResult::Unresolved(value) => {
            println!("{value}");
        }
        ExpansionResult::Ambiguous {
            prefix,
            fragment,
            candidates,
        } => {
            println!("{prefix}");
            println!("Matches for \"{fragment}\":");
            for (i, candidate) in candidates.iter().enumerate() {
                println!("  {}. {candidate}", i + 1);
            }
        }
    }
    Ok(())
}

async fn contacts(config: &ComposeConfig, command: ContactsCommand) -> Result<()> {
    let repo = open_contacts(config).await?;
    match command {
        ContactsCommand::Add { email, name } => {
            repo.record(&email, &name).await?;
            info!(%email, "contact recorded");
        }
        ContactsCommand::Import { recipients } => {
            let list = AddressList::parse(&recipients, &ParseOptions::default())?;
            let recorded = repo.record_list(&list).await?;
            info!(recorded, "recipients recorded");
        }
        ContactsCommand::Search { query } => {
            for contact in repo.search(&query, config.search_limit).await? {
                println!("{}", contact.display());
            }
        }
        ContactsCommand::List { limit } => {
            for contact in repo.list(limit).await? {
                println!("{:>4}  {}", contact.use_count, contact.display());
            }
        }
        ContactsCommand::Delete { email } => {
            repo.delete(&email).await?;
            info!(%email, "contact deleted");
        }
    }
    Ok(())
}

async fn properties(config: &ComposeConfig, command: PropertiesCommand) -> Result<()> {
    let repo = open_inventory(config).await?;
    match command {
        PropertiesCommand::Add { name, weight } => {
            let id = repo.add(&name, weight).await?;
            println!("{id}");
        }
        PropertiesCommand::List => {
            for property in repo.list().await? {
                println!("{:>4}  {}", property.id, property.name);
            }
        }
        PropertiesCommand::Delete { id } => {
            repo.delete(id).await?;
            info!(id, "property deleted");
        }
    }
    Ok(())
}

async fn open_contacts(config: &ComposeConfig) -> Result<ContactRepository> {
    let path = database_path(config.contacts_db.as_deref(), "contacts.db")?;
    let repo = ContactRepository::new(&path.to_string_lossy())
        .await
        .with_context(|| format!("opening contacts database {}", path.display()))?;
    Ok(repo.with_search_limit(config.search_limit))
}

async fn open_inventory(config: &ComposeConfig) -> Result<InventoryRepository> {
    let path = database_path(config.inventory_db.as_deref(), "inventory.db")?;
    InventoryRepository::new(&path.to_string_lossy())
        .await
        .with_context(|| format!("opening inventory database {}", path.display()))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mailcompose").join("config.json"))
}

/// Resolves a database file, defaulting to the user data directory.
fn database_path(configured: Option<&Path>, file_name: &str) -> Result<PathBuf> {
    let path = match configured {
        Some(path) => path.to_path_buf(),
        None => dirs::data_dir()
            .context("no data directory for this platform")?
            .join("mailcompose")
            .join(file_name),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    Ok(path)
}
