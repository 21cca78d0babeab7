//! Output rendering helpers for CLI surfaces.
//!
//! Keeps command result output bounded and readable while preserving signal.

use crate::core::record::{Ability, CharacterRecord};

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Render a numbered list of items (inventory, session notes).
pub fn numbered_list(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  {}) {}", i + 1, compact_line(item, 120)))
        .collect::<Vec<_>>()
        .join("\n")
}

const UNSET_LEVEL: &str = "Not yet set (some campaigns start at higher levels)";
const UNSET_ALIGNMENT: &str =
    "Not yet set (your character's true nature may emerge as their adventures unfold)";
const UNSET_BACKSTORY: &str =
    "Not yet set (give your character a backstory, it will help bring them to life!)";

/// Render the full character sheet the way the management view shows it.
pub fn render_sheet(record: &CharacterRecord) -> String {
    let mut out = String::new();

    out.push_str("Character Information\n");
    out.push_str("---------------------\n");
    out.push_str(&format!("+ Name: {}\n", record.name));
    out.push_str(&format!("+ Race: {}\n", record.race));
    out.push_str(&format!("+ Class: {}\n", record.class));
    out.push_str(&format!("+ Gender: {}\n", record.gender));
    out.push_str(&format!("+ Age: {}\n", record.age));
    out.push_str(&format!(
        "+ Alignment: {}\n",
        record
            .alignment
            .map(|a| a.to_string())
            .unwrap_or_else(|| UNSET_ALIGNMENT.to_string())
    ));
    out.push_str(&format!(
        "+ Backstory: {}\n",
        record
            .backstory
            .as_deref()
            .map(|b| compact_line(b, 200))
            .unwrap_or_else(|| UNSET_BACKSTORY.to_string())
    ));

    out.push_str("\nCharacter Stats\n");
    out.push_str("---------------\n");
    out.push_str(&format!(
        "* Level: {}\n",
        record
            .level
            .map(|l| l.to_string())
            .unwrap_or_else(|| UNSET_LEVEL.to_string())
    ));
    out.push_str("* Ability scores:\n");
    for ability in Ability::all() {
        out.push_str(&format!(
            "    {}: {}\n",
            ability,
            record.scores.get(ability)
        ));
    }
    out.push_str(&format!("* Gold: {}gp\n", record.gold));

    out.push_str("\n* Inventory:\n");
    if record.inventory.is_empty() {
        out.push_str("  (empty)\n");
    } else {
        out.push_str(&numbered_list(&record.inventory));
        out.push('\n');
    }

    out.push_str("\n* Session goals/notes:\n");
    if record.session_notes.is_empty() {
        out.push_str("  (none)\n");
    } else {
        out.push_str(&numbered_list(&record.session_notes));
        out.push('\n');
    }

    out
}
