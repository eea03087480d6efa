//! Type matchup analysis that needs no battle: single matchups and the full
//! defensive profile of a type combination.

use std::fmt;
use std::str::FromStr;

use schema::PokemonType;

use crate::errors::{BattleEngineError, BattleResult};

/// Parses a user-supplied type name, case-insensitively.
pub fn parse_type(name: &str) -> BattleResult<PokemonType> {
    PokemonType::from_str(name.trim())
        .map_err(|_| BattleEngineError::InvalidType(name.trim().to_string()))
}

/// One attacking type against one defending type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeMatchup {
    pub attacking: PokemonType,
    pub defending: PokemonType,
    pub multiplier: f32,
}

impl TypeMatchup {
    pub fn description(&self) -> &'static str {
        match self.multiplier {
            m if m == 0.0 => "No effect (0x damage)",
            m if m < 1.0 => "Not very effective (0.5x damage)",
            m if m > 1.0 => "Super effective (2x damage)",
            _ => "Normal effectiveness (1x damage)",
        }
    }
}

impl fmt::Display for TypeMatchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vs {}: {}",
            self.attacking,
            self.defending,
            self.description()
        )
    }
}

pub fn type_effectiveness(attacking: &str, defending: &str) -> BattleResult<TypeMatchup> {
    let attacking = parse_type(attacking)?;
    let defending = parse_type(defending)?;
    Ok(TypeMatchup {
        attacking,
        defending,
        multiplier: PokemonType::type_effectiveness(attacking, defending),
    })
}

/// How every attacking type fares against a defender, bucketed by outcome.
/// Neutral matchups are left out.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeProfile {
    pub name: String,
    pub types: Vec<PokemonType>,
    pub weaknesses: Vec<(PokemonType, f32)>,
    pub resistances: Vec<(PokemonType, f32)>,
    pub immunities: Vec<PokemonType>,
}

impl TypeProfile {
    pub fn for_types(name: impl Into<String>, types: &[PokemonType]) -> Self {
        let mut profile = TypeProfile {
            name: name.into(),
            types: types.to_vec(),
            weaknesses: Vec::new(),
            resistances: Vec::new(),
            immunities: Vec::new(),
        };

        for attacking in PokemonType::all() {
            let multiplier = PokemonType::combined_effectiveness(attacking, types);
            if multiplier == 0.0 {
                profile.immunities.push(attacking);
            } else if multiplier > 1.0 {
                profile.weaknesses.push((attacking, multiplier));
            } else if multiplier < 1.0 {
                profile.resistances.push((attacking, multiplier));
            }
        }
        profile
    }

    pub fn report(&self) -> String {
        let mut report = format!("--- Type Analysis for {} ---\n", self.name);
        report += &format!("Types: {}\n\n", join(self.types.iter().map(|t| t.to_string())));

        if self.weaknesses.is_empty() {
            report += "Weaknesses: None\n\n";
        } else {
            let listed = join(
                self.weaknesses
                    .iter()
                    .map(|(t, m)| format!("{} ({})", t, multiplier_label(*m))),
            );
            report += &format!("Weaknesses (takes extra damage):\n  {}\n\n", listed);
        }

        if self.resistances.is_empty() {
            report += "Resistances: None\n\n";
        } else {
            let listed = join(
                self.resistances
                    .iter()
                    .map(|(t, m)| format!("{} ({})", t, multiplier_label(*m))),
            );
            report += &format!("Resistances (takes reduced damage):\n  {}\n\n", listed);
        }

        if self.immunities.is_empty() {
            report += "Immunities: None\n";
        } else {
            let listed = join(self.immunities.iter().map(|t| t.to_string()));
            report += &format!("Immunities (no damage):\n  {}\n", listed);
        }

        report
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

/// `4.0` -> `4x`, `0.25` -> `0.25x`
fn multiplier_label(multiplier: f32) -> String {
    format!("{}x", multiplier)
}
