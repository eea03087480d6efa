use crate::provider::{MoveRecord, PokemonRecord};
use schema::{BaseStats, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCondition {
    Paralysis,
    Burn,
    Poison,
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatusCondition::Paralysis => "paralysis",
            StatusCondition::Burn => "burn",
            StatusCondition::Poison => "poison",
        };
        write!(f, "{}", display_name)
    }
}

/// A move as the battle engine sees it. Only moves with nonzero power can be
/// used in a simulated battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSnapshot {
    pub name: String,
    pub move_type: PokemonType,
    pub power: Option<u16>,
    pub accuracy: Option<u8>,
    pub pp: Option<u8>,
}

impl MoveSnapshot {
    pub fn is_damaging(&self) -> bool {
        self.power.unwrap_or(0) > 0
    }
}

impl From<&MoveRecord> for MoveSnapshot {
    fn from(record: &MoveRecord) -> Self {
        Self {
            name: title_case(&record.name),
            move_type: record.move_type,
            power: record.power,
            accuracy: record.accuracy,
            pp: record.pp,
        }
    }
}

/// Per-battle copy of a Pokemon's combat-relevant state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSnapshot {
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub moves: Vec<MoveSnapshot>,
    current_hp: u16,
    status: Option<StatusCondition>,
}

impl PokemonSnapshot {
    /// Creates a snapshot at full HP with no status.
    pub fn new(
        name: impl Into<String>,
        types: Vec<PokemonType>,
        base_stats: BaseStats,
        moves: Vec<MoveSnapshot>,
    ) -> Self {
        let max_hp = base_stats.hp.max(1);
        Self {
            name: name.into(),
            types,
            base_stats,
            moves,
            current_hp: max_hp,
            status: None,
        }
    }

    pub fn from_record(record: &PokemonRecord, moves: Vec<MoveSnapshot>) -> Self {
        Self::new(
            capitalize(&record.name),
            record.types.clone(),
            record.base_stats,
            moves,
        )
    }

    pub fn max_hp(&self) -> u16 {
        self.base_stats.hp.max(1)
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn status(&self) -> Option<StatusCondition> {
        self.status
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    /// Sets HP directly, clamped to [0, max HP].
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp());
        if self.current_hp == 0 {
            self.status = None;
        }
    }

    /// Subtracts damage, flooring HP at 0. Returns the HP actually lost.
    /// A Pokemon that faints loses its status.
    pub fn take_damage(&mut self, damage: u16) -> u16 {
        let dealt = damage.min(self.current_hp);
        self.set_hp(self.current_hp - dealt);
        dealt
    }

    /// Applies a status unless one is already active or the Pokemon has fainted.
    /// Returns true if the status was applied.
    pub fn try_apply_status(&mut self, status: StatusCondition) -> bool {
        if self.status.is_some() || self.is_fainted() {
            return false;
        }
        self.status = Some(status);
        true
    }

    /// The move the resolver always picks: the first one with nonzero power.
    pub fn first_damaging_move(&self) -> Option<&MoveSnapshot> {
        self.moves.iter().find(|m| m.is_damaging())
    }

    /// Compares remaining HP fractions without floating point.
    /// `Greater` means `self` has proportionally more HP left.
    pub fn compare_hp_fraction(&self, other: &PokemonSnapshot) -> std::cmp::Ordering {
        let mine = u32::from(self.current_hp) * u32::from(other.max_hp());
        let theirs = u32::from(other.current_hp) * u32::from(self.max_hp());
        mine.cmp(&theirs)
    }
}

impl fmt::Display for PokemonSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types = self
            .types
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join("/");
        write!(
            f,
            "{} ({}) HP: {}/{}",
            self.name,
            types,
            self.current_hp,
            self.max_hp()
        )?;
        if let Some(status) = self.status {
            write!(f, " [{}]", status)?;
        }
        Ok(())
    }
}

/// `pikachu` -> `Pikachu`
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `thunder-shock` -> `Thunder Shock`
pub fn title_case(name: &str) -> String {
    name.split(['-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| capitalize(&word.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}
