//! Character record schema and field validation.
//!
//! One record is one player character. The schema is fixed: enumerated
//! race/class/gender/alignment, six always-present ability scores, and a
//! handful of free-text fields with hard length bounds. Fields the player
//! has not filled in yet are `Option`s; the display layer renders them with
//! placeholder text. Validation is explicit: every bound lives in a
//! `validate_*` function returning a reason the CLI can show verbatim.

use crate::core::error::CharbinderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound on a character's age in years.
pub const MAX_AGE: u64 = 100_000_000;
/// Upper bound on gold pieces.
pub const MAX_GOLD: u64 = 10_000_000_000_000_000_000;
/// Upper bound on a single ability score.
pub const MAX_SCORE: u8 = 40;
/// Character levels run 1..=20.
pub const MAX_LEVEL: u8 = 20;
/// Name length bound in characters.
pub const MAX_NAME_LEN: usize = 40;
/// Backstory length bound in characters.
pub const MAX_BACKSTORY_LEN: usize = 4000;
/// Inventory item / session note length bound in characters.
pub const MAX_ENTRY_LEN: usize = 200;

/// Lowercase and strip separators so "Half-Elf", "half elf", and "halfelf"
/// all parse to the same variant.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn parse_variant<T: Copy>(
    input: &str,
    variants: &'static [T],
    label: fn(&T) -> &'static str,
    noun: &str,
) -> Result<T, CharbinderError> {
    let wanted = normalize(input);
    for v in variants {
        if normalize(label(v)) == wanted {
            return Ok(*v);
        }
    }
    Err(CharbinderError::ValidationError(format!(
        "'{}' is not a known {}",
        input.trim(),
        noun
    )))
}

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

pub const ABILITIES: [Ability; 6] = [
    Ability::Strength,
    Ability::Dexterity,
    Ability::Constitution,
    Ability::Intelligence,
    Ability::Wisdom,
    Ability::Charisma,
];

impl Ability {
    pub fn all() -> [Ability; 6] {
        ABILITIES
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ability {
    type Err = CharbinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &ABILITIES, Ability::as_str, "ability score")
    }
}

/// Ability scores container. All six are always present; the type makes the
/// six-entry invariant structural rather than checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub fn new(str: u8, dex: u8, con: u8, int: u8, wis: u8, cha: u8) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, value: u8) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }
}

/// Playable races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Race {
    Dragonborn,
    Dwarf,
    Elf,
    Gnome,
    HalfElf,
    Halfling,
    HalfOrc,
    Human,
    Tiefling,
}

pub const RACES: [Race; 9] = [
    Race::Dragonborn,
    Race::Dwarf,
    Race::Elf,
    Race::Gnome,
    Race::HalfElf,
    Race::Halfling,
    Race::HalfOrc,
    Race::Human,
    Race::Tiefling,
];

impl Race {
    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Dragonborn => "Dragonborn",
            Race::Dwarf => "Dwarf",
            Race::Elf => "Elf",
            Race::Gnome => "Gnome",
            Race::HalfElf => "Half-Elf",
            Race::Halfling => "Halfling",
            Race::HalfOrc => "Half-Orc",
            Race::Human => "Human",
            Race::Tiefling => "Tiefling",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Race {
    type Err = CharbinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &RACES, Race::as_str, "race")
    }
}

/// Character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

pub const CLASSES: [CharClass; 12] = [
    CharClass::Barbarian,
    CharClass::Bard,
    CharClass::Cleric,
    CharClass::Druid,
    CharClass::Fighter,
    CharClass::Monk,
    CharClass::Paladin,
    CharClass::Ranger,
    CharClass::Rogue,
    CharClass::Sorcerer,
    CharClass::Warlock,
    CharClass::Wizard,
];

impl CharClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharClass::Barbarian => "Barbarian",
            CharClass::Bard => "Bard",
            CharClass::Cleric => "Cleric",
            CharClass::Druid => "Druid",
            CharClass::Fighter => "Fighter",
            CharClass::Monk => "Monk",
            CharClass::Paladin => "Paladin",
            CharClass::Ranger => "Ranger",
            CharClass::Rogue => "Rogue",
            CharClass::Sorcerer => "Sorcerer",
            CharClass::Warlock => "Warlock",
            CharClass::Wizard => "Wizard",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CharClass {
    type Err = CharbinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &CLASSES, CharClass::as_str, "class")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Woman,
    Man,
    Ambiguous,
}

pub const GENDERS: [Gender; 3] = [Gender::Woman, Gender::Man, Gender::Ambiguous];

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Woman => "Woman",
            Gender::Man => "Man",
            Gender::Ambiguous => "Ambiguous",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CharbinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &GENDERS, Gender::as_str, "gender option")
    }
}

/// The nine alignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    LawfulGood,
    NeutralGood,
    ChaoticGood,
    LawfulNeutral,
    TrueNeutral,
    ChaoticNeutral,
    LawfulEvil,
    NeutralEvil,
    ChaoticEvil,
}

pub const ALIGNMENTS: [Alignment; 9] = [
    Alignment::LawfulGood,
    Alignment::NeutralGood,
    Alignment::ChaoticGood,
    Alignment::LawfulNeutral,
    Alignment::TrueNeutral,
    Alignment::ChaoticNeutral,
    Alignment::LawfulEvil,
    Alignment::NeutralEvil,
    Alignment::ChaoticEvil,
];

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::LawfulGood => "Lawful Good",
            Alignment::NeutralGood => "Neutral Good",
            Alignment::ChaoticGood => "Chaotic Good",
            Alignment::LawfulNeutral => "Lawful Neutral",
            Alignment::TrueNeutral => "True Neutral",
            Alignment::ChaoticNeutral => "Chaotic Neutral",
            Alignment::LawfulEvil => "Lawful Evil",
            Alignment::NeutralEvil => "Neutral Evil",
            Alignment::ChaoticEvil => "Chaotic Evil",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = CharbinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &ALIGNMENTS, Alignment::as_str, "alignment")
    }
}

/// One character's full persisted data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub race: Race,
    pub class: CharClass,
    pub gender: Gender,
    /// Age in years, kept as entered text.
    pub age: String,
    pub scores: AbilityScores,
    /// `None` until the campaign assigns one.
    pub level: Option<u8>,
    /// Gold pieces, kept as entered text.
    pub gold: String,
    pub alignment: Option<Alignment>,
    pub backstory: Option<String>,
    pub inventory: Vec<String>,
    pub session_notes: Vec<String>,
}

impl CharacterRecord {
    /// A freshly created character: the creation-time fields are set, the
    /// management-time fields carry their defaults.
    pub fn new(
        name: String,
        race: Race,
        class: CharClass,
        gender: Gender,
        age: String,
        scores: AbilityScores,
    ) -> Self {
        Self {
            name,
            race,
            class,
            gender,
            age,
            scores,
            level: None,
            gold: "0".to_string(),
            alignment: None,
            backstory: None,
            inventory: Vec::new(),
            session_notes: Vec::new(),
        }
    }

    /// Check every field bound. A record must pass before it is persisted.
    pub fn validate(&self) -> Result<(), CharbinderError> {
        validate_name(&self.name)?;
        validate_age(&self.age)?;
        validate_gold(&self.gold)?;
        for ability in Ability::all() {
            validate_score(self.scores.get(ability))?;
        }
        if let Some(level) = self.level {
            validate_level(level)?;
        }
        if let Some(backstory) = &self.backstory {
            validate_backstory(backstory)?;
        }
        for item in &self.inventory {
            validate_entry(item, "inventory item")?;
        }
        for note in &self.session_notes {
            validate_entry(note, "session note")?;
        }
        Ok(())
    }
}

pub fn validate_name(name: &str) -> Result<(), CharbinderError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CharbinderError::ValidationError(
            "you must give your character a name".to_string(),
        ));
    }
    if trimmed != name {
        return Err(CharbinderError::ValidationError(
            "name must not start or end with whitespace".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CharbinderError::ValidationError(format!(
            "name must be at most {} letters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

pub fn validate_age(age: &str) -> Result<(), CharbinderError> {
    match age.trim().parse::<u64>() {
        Ok(years) if years < MAX_AGE => Ok(()),
        Ok(_) => Err(CharbinderError::ValidationError(format!(
            "'{}' is an invalid age",
            age
        ))),
        Err(_) => Err(CharbinderError::ValidationError(format!(
            "age must be a number of years like '5' or '374', not '{}'",
            age
        ))),
    }
}

pub fn validate_gold(gold: &str) -> Result<(), CharbinderError> {
    match gold.trim().parse::<u64>() {
        Ok(pieces) if pieces < MAX_GOLD => Ok(()),
        Ok(_) => Err(CharbinderError::ValidationError(format!(
            "gold cannot exceed {}",
            MAX_GOLD
        ))),
        Err(_) => Err(CharbinderError::ValidationError(format!(
            "gold must be a number like '10' or '150', not '{}'",
            gold
        ))),
    }
}

pub fn validate_level(level: u8) -> Result<(), CharbinderError> {
    if (1..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(CharbinderError::ValidationError(format!(
            "character levels only range from 1 to {}",
            MAX_LEVEL
        )))
    }
}

pub fn validate_score(value: u8) -> Result<(), CharbinderError> {
    if value <= MAX_SCORE {
        Ok(())
    } else {
        Err(CharbinderError::ValidationError(format!(
            "ability scores cannot exceed {}",
            MAX_SCORE
        )))
    }
}

pub fn validate_backstory(backstory: &str) -> Result<(), CharbinderError> {
    if backstory.is_empty() {
        return Err(CharbinderError::ValidationError(
            "backstory can't be empty".to_string(),
        ));
    }
    if backstory.chars().count() > MAX_BACKSTORY_LEN {
        return Err(CharbinderError::ValidationError(format!(
            "try cutting the backstory down to {} letters or fewer",
            MAX_BACKSTORY_LEN
        )));
    }
    Ok(())
}

pub fn validate_entry(entry: &str, what: &str) -> Result<(), CharbinderError> {
    if entry.is_empty() {
        return Err(CharbinderError::ValidationError(format!(
            "{} can't be empty",
            what
        )));
    }
    if entry.chars().count() > MAX_ENTRY_LEN {
        return Err(CharbinderError::ValidationError(format!(
            "{} must be {} letters or fewer",
            what, MAX_ENTRY_LEN
        )));
    }
    Ok(())
}
