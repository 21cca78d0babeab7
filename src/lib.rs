//! Charbinder: a local-first character-sheet keeper for tabletop parties.
//!
//! All state is one SQLite-backed roster per store directory, plus a JSONL
//! audit trail of every store operation. Sharing a character with another
//! machine is a one-shot, point-to-point handoff: the sheet is packed into a
//! single archive blob and streamed over a direct TCP connection, no server
//! in between.
//!
//! # Architecture
//!
//! - [`core`]: store handle, database plumbing, the operation broker, the
//!   record schema, and rendering helpers.
//! - [`plugins`]: the three subsystems: `roster` (durable CRUD), `codec`
//!   (single-record archive packing), `transfer` (sender/receiver roles).
//!
//! Every store operation opens its own connection and closes it before
//! returning, so no handle outlives the operation that needed it. Scratch
//! directories created while packing or unpacking are temp dirs removed on
//! every exit path.
//!
//! # Example
//!
//! ```bash
//! charbinder create --name Elowen --race elf --class druid --gender woman \
//!     --age 120 --strength 10 --dexterity 14 --constitution 12 \
//!     --intelligence 13 --wisdom 15 --charisma 8
//! charbinder set Elowen --level 3 --alignment "true neutral"
//! charbinder send Elowen 192.168.1.17     # on the other machine: charbinder receive
//! ```

pub mod core;
pub mod plugins;

mod cli;

use crate::cli::{CapabilitiesCli, Cli, Command, CreateCli, ListEditCommand, SetCli};
use crate::core::error::CharbinderError;
use crate::core::output;
use crate::core::record::{
    validate_entry, validate_name, validate_score, Ability, AbilityScores, Alignment,
    CharClass, CharacterRecord, Gender, Race,
};
use crate::core::store::{self, Store};
use crate::plugins::{codec, roster, transfer};

use clap::Parser;
use colored::Colorize;

pub fn run() -> Result<(), CharbinderError> {
    let cli = Cli::parse();

    if let Command::Version = cli.command {
        println!("v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    if let Command::Capabilities(args) = &cli.command {
        return print_capabilities(args);
    }

    let root = match &cli.dir {
        Some(dir) => dir.clone(),
        None => store::default_root()?,
    };
    let store = Store::open(&root)?;

    match cli.command {
        Command::List => {
            let names = roster::list_characters(&store)?;
            if names.is_empty() {
                println!("No characters have been created yet");
            } else {
                for (i, name) in names.iter().enumerate() {
                    println!("{}) {}", i + 1, name);
                }
            }
        }
        Command::Show { name } => {
            let record = roster::get_character(&store, &name)?;
            print!("{}", output::render_sheet(&record));
        }
        Command::Create(args) => {
            let record = build_record(&store, args)?;
            roster::create_character(&store, &record)?;
            println!(
                "{} {} is now an established character",
                "✓".bright_green().bold(),
                record.name.bright_white().bold()
            );
        }
        Command::Set(args) => {
            let name = args.name.clone();
            let record = apply_edits(&store, args)?;
            roster::put_character(&store, &record)?;
            println!("{} Saved changes to {}", "✓".bright_green().bold(), name);
        }
        Command::Item(item) => edit_list(&store, item.command, ListKind::Inventory)?,
        Command::Note(note) => edit_list(&store, note.command, ListKind::Notes)?,
        Command::Delete { name, yes } => {
            if !yes {
                println!(
                    "{} Deleting {} is permanent. Re-run with {} to confirm.",
                    "▸".bright_yellow(),
                    name,
                    "--yes".bright_cyan().bold()
                );
                return Ok(());
            }
            roster::delete_character(&store, &name)?;
            println!("{} Goodbye, {}!", "✓".bright_green().bold(), name);
        }
        Command::Send { name, host } => {
            let report = transfer::send_character(&store, &name, &host)?;
            println!(
                "{} Sent {} ({} bytes) to {}",
                "✓".bright_green().bold(),
                report.name.bright_white().bold(),
                report.bytes,
                host
            );
        }
        Command::Receive => {
            for addr in transfer::local_addresses() {
                println!(
                    "{} This machine is reachable at {} (port {})",
                    "▸".bright_yellow(),
                    addr,
                    transfer::TRANSFER_PORT
                );
            }
            println!("Waiting for a sender to connect...");
            let report = transfer::receive_character(&store)?;
            println!(
                "{} Received {} ({} bytes) and added them to the roster",
                "✓".bright_green().bold(),
                report.name.bright_white().bold(),
                report.bytes
            );
        }
        Command::Capabilities(_) | Command::Version => unreachable!("handled above"),
    }

    Ok(())
}

/// Build a new record from creation flags. The name collision is rejected
/// before the record is built, so the caller can pick a new name first.
fn build_record(store: &Store, args: CreateCli) -> Result<CharacterRecord, CharbinderError> {
    validate_name(&args.name)?;
    if roster::character_exists(store, &args.name)? {
        return Err(CharbinderError::DuplicateName(args.name));
    }

    let race: Race = args.race.parse()?;
    let class: CharClass = args.class.parse()?;
    let gender: Gender = args.gender.parse()?;
    let scores = AbilityScores::new(
        args.strength,
        args.dexterity,
        args.constitution,
        args.intelligence,
        args.wisdom,
        args.charisma,
    );

    let record = CharacterRecord::new(args.name, race, class, gender, args.age, scores);
    record.validate()?;
    Ok(record)
}

fn apply_edits(store: &Store, args: SetCli) -> Result<CharacterRecord, CharbinderError> {
    let mut record = roster::get_character(store, &args.name)?;
    let mut touched = false;

    if let Some(level) = args.level {
        record.level = Some(level);
        touched = true;
    }
    if let Some(gold) = args.gold {
        record.gold = gold;
        touched = true;
    }
    if let Some(alignment) = args.alignment {
        record.alignment = Some(alignment.parse::<Alignment>()?);
        touched = true;
    }
    if let Some(backstory) = args.backstory {
        record.backstory = Some(backstory);
        touched = true;
    }
    if let Some(ability) = args.ability {
        let ability: Ability = ability.parse()?;
        let value = args.value.ok_or_else(|| {
            CharbinderError::ValidationError("--ability requires --value".to_string())
        })?;
        validate_score(value)?;
        record.scores.set(ability, value);
        touched = true;
    }

    if !touched {
        return Err(CharbinderError::ValidationError(
            "nothing to update; pass at least one of --level, --gold, --alignment, --backstory, --ability".to_string(),
        ));
    }
    record.validate()?;
    Ok(record)
}

enum ListKind {
    Inventory,
    Notes,
}

fn edit_list(
    store: &Store,
    command: ListEditCommand,
    kind: ListKind,
) -> Result<(), CharbinderError> {
    let what = match kind {
        ListKind::Inventory => "inventory item",
        ListKind::Notes => "session note",
    };

    match command {
        ListEditCommand::Add { name, text } => {
            validate_entry(&text, what)?;
            let mut record = roster::get_character(store, &name)?;
            match kind {
                ListKind::Inventory => record.inventory.push(text),
                ListKind::Notes => record.session_notes.push(text),
            }
            roster::put_character(store, &record)?;
            println!("{} Added {} to {}", "✓".bright_green().bold(), what, name);
        }
        ListEditCommand::Remove { name, row } => {
            let mut record = roster::get_character(store, &name)?;
            let entries = match kind {
                ListKind::Inventory => &mut record.inventory,
                ListKind::Notes => &mut record.session_notes,
            };
            if row == 0 || row > entries.len() {
                return Err(CharbinderError::ValidationError(format!(
                    "'{}' is not a row number; {} has {} {}s",
                    row,
                    name,
                    entries.len(),
                    what
                )));
            }
            let removed = entries.remove(row - 1);
            roster::put_character(store, &record)?;
            println!(
                "{} Removed {} '{}' from {}",
                "✓".bright_green().bold(),
                what,
                output::compact_line(&removed, 60),
                name
            );
        }
    }
    Ok(())
}

fn print_capabilities(args: &CapabilitiesCli) -> Result<(), CharbinderError> {
    let schemas = vec![roster::schema(), codec::schema(), transfer::schema()];
    if args.format == "json" {
        let doc = serde_json::to_string_pretty(&schemas)
            .map_err(|e| CharbinderError::ValidationError(e.to_string()))?;
        println!("{}", doc);
    } else {
        for schema in &schemas {
            println!(
                "{} {} - {}",
                "▸".bright_cyan(),
                schema["name"].as_str().unwrap_or("?").bright_white().bold(),
                schema["description"].as_str().unwrap_or("")
            );
        }
    }
    Ok(())
}
