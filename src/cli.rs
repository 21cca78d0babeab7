//! CLI struct definitions for the Charbinder command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "charbinder",
    version = env!("CARGO_PKG_VERSION"),
    about = "Charbinder keeps a durable roster of tabletop characters on local disk and hands single sheets between machines over a direct connection. 🎲"
)]
pub(crate) struct Cli {
    /// Store directory (defaults to $CHARBINDER_HOME, else ~/.charbinder/data).
    #[clap(long, global = true)]
    pub dir: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug)]
pub(crate) struct CreateCli {
    /// Character name (1-40 letters, unique within the store).
    #[clap(long)]
    pub name: String,
    /// Race, e.g. 'elf' or 'half-orc'.
    #[clap(long)]
    pub race: String,
    /// Class, e.g. 'druid' or 'paladin'.
    #[clap(long)]
    pub class: String,
    /// Gender option: woman, man, or ambiguous.
    #[clap(long)]
    pub gender: String,
    /// Age in years.
    #[clap(long)]
    pub age: String,
    #[clap(long)]
    pub strength: u8,
    #[clap(long)]
    pub dexterity: u8,
    #[clap(long)]
    pub constitution: u8,
    #[clap(long)]
    pub intelligence: u8,
    #[clap(long)]
    pub wisdom: u8,
    #[clap(long)]
    pub charisma: u8,
}

#[derive(clap::Args, Debug)]
pub(crate) struct SetCli {
    /// Character to update.
    pub name: String,
    /// Level in 1-20.
    #[clap(long)]
    pub level: Option<u8>,
    /// Gold pieces.
    #[clap(long)]
    pub gold: Option<String>,
    /// Alignment, e.g. 'chaotic neutral'.
    #[clap(long)]
    pub alignment: Option<String>,
    /// Backstory text (up to 4000 letters).
    #[clap(long)]
    pub backstory: Option<String>,
    /// Ability score to update, paired with --value.
    #[clap(long)]
    pub ability: Option<String>,
    /// New value for --ability.
    #[clap(long, requires = "ability")]
    pub value: Option<u8>,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ItemCli {
    #[clap(subcommand)]
    pub command: ListEditCommand,
}

#[derive(clap::Args, Debug)]
pub(crate) struct NoteCli {
    #[clap(subcommand)]
    pub command: ListEditCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ListEditCommand {
    /// Append an entry.
    Add {
        /// Character to update.
        name: String,
        /// Entry text (up to 200 letters).
        text: String,
    },
    /// Remove an entry by its row number (as shown by `show`).
    Remove {
        /// Character to update.
        name: String,
        /// 1-based row number.
        row: usize,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct CapabilitiesCli {
    /// Output format: 'json' or 'text'.
    #[clap(long, default_value = "text")]
    pub format: String,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// List all characters in the store
    List,
    /// Show one character's full sheet
    Show {
        name: String,
    },
    /// Create a new character
    Create(CreateCli),
    /// Update a character's fields
    Set(SetCli),
    /// Add or remove inventory items
    Item(ItemCli),
    /// Add or remove session goals/notes
    Note(NoteCli),
    /// Delete a character permanently
    Delete {
        name: String,
        /// Required confirmation; deletion is permanent.
        #[clap(long)]
        yes: bool,
    },
    /// Stream one character to a receiving instance
    Send {
        name: String,
        /// The receiving machine's address (port is fixed by convention).
        host: String,
    },
    /// Wait for one character from a sending instance
    Receive,
    /// Describe the subsystems and their storage
    Capabilities(CapabilitiesCli),
    /// Print the version
    Version,
}
