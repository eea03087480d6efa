//! Status conditions: which moves inflict them, what they do at the start and
//! end of a turn, and who is immune.

use crate::battle::state::TurnRng;
use crate::pokemon::{PokemonSnapshot, StatusCondition};
use schema::PokemonType;

/// Chance, in percent, that a paralyzed Pokemon loses its turn.
pub const PARALYSIS_SKIP_CHANCE: u8 = 25;

/// Damage multiplier applied to everything a burned Pokemon deals.
pub const BURN_DAMAGE_MODIFIER: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfliction {
    pub status: StatusCondition,
    /// Percent chance per successful hit
    pub chance: u8,
}

/// Which move types can inflict which status, and which defending types can
/// never take a given status. The resolver only consults this table, so new
/// entries need no change to the battle flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEffectTable {
    entries: Vec<(PokemonType, StatusInfliction)>,
    immunities: Vec<(StatusCondition, PokemonType)>,
}

impl Default for StatusEffectTable {
    fn default() -> Self {
        Self::empty()
            .with_entry(PokemonType::Electric, StatusCondition::Paralysis, 10)
            .with_entry(PokemonType::Fire, StatusCondition::Burn, 10)
            .with_entry(PokemonType::Poison, StatusCondition::Poison, 30)
            .with_immunity(StatusCondition::Paralysis, PokemonType::Electric)
            .with_immunity(StatusCondition::Burn, PokemonType::Fire)
            .with_immunity(StatusCondition::Poison, PokemonType::Poison)
            .with_immunity(StatusCondition::Poison, PokemonType::Steel)
    }
}

impl StatusEffectTable {
    /// No inflictions and no immunities.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            immunities: Vec::new(),
        }
    }

    /// Adds or replaces the entry for `move_type`.
    pub fn with_entry(mut self, move_type: PokemonType, status: StatusCondition, chance: u8) -> Self {
        let infliction = StatusInfliction {
            status,
            chance: chance.min(100),
        };
        match self.entries.iter_mut().find(|(t, _)| *t == move_type) {
            Some(entry) => entry.1 = infliction,
            None => self.entries.push((move_type, infliction)),
        }
        self
    }

    pub fn infliction_for(&self, move_type: PokemonType) -> Option<StatusInfliction> {
        self.entries
            .iter()
            .find(|(t, _)| *t == move_type)
            .map(|(_, infliction)| *infliction)
    }

    /// Marks `defending_type` as unable to take `status`.
    pub fn with_immunity(mut self, status: StatusCondition, defending_type: PokemonType) -> Self {
        if !self.immunities.contains(&(status, defending_type)) {
            self.immunities.push((status, defending_type));
        }
        self
    }

    /// True when any of the Pokemon's types is listed as immune to `status`.
    pub fn is_immune(&self, pokemon: &PokemonSnapshot, status: StatusCondition) -> bool {
        self.immunities
            .iter()
            .any(|(s, t)| *s == status && pokemon.has_type(*t))
    }
}

/// Start-of-turn check. Returns the status that stops the Pokemon from acting,
/// if any. Only paralysis can do so, and only on a losing roll.
pub fn check_action_prevention(
    pokemon: &PokemonSnapshot,
    rng: &mut TurnRng,
) -> Option<StatusCondition> {
    match pokemon.status() {
        Some(StatusCondition::Paralysis)
            if rng.roll_under(PARALYSIS_SKIP_CHANCE, "Immobilized by Paralysis Check") =>
        {
            Some(StatusCondition::Paralysis)
        }
        _ => None,
    }
}

pub fn attack_modifier(status: Option<StatusCondition>) -> f64 {
    match status {
        Some(StatusCondition::Burn) => BURN_DAMAGE_MODIFIER,
        _ => 1.0,
    }
}

/// End-of-turn HP loss: 1/8 of max HP (at least 1) for burn and poison.
pub fn residual_damage(pokemon: &PokemonSnapshot) -> Option<u16> {
    match pokemon.status() {
        Some(StatusCondition::Burn) | Some(StatusCondition::Poison) => {
            Some((pokemon.max_hp() / 8).max(1))
        }
        _ => None,
    }
}
