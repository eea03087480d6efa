use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn total(&self) -> u32 {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
        .iter()
        .map(|&s| u32::from(s))
        .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatType {
    /// Maps the upstream stat identifier (e.g. `special-attack`) to a stat.
    pub fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "hp" => Some(StatType::Hp),
            "attack" => Some(StatType::Attack),
            "defense" => Some(StatType::Defense),
            "special-attack" => Some(StatType::SpecialAttack),
            "special-defense" => Some(StatType::SpecialDefense),
            "speed" => Some(StatType::Speed),
            _ => None,
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatType::Hp => "HP",
            StatType::Attack => "Attack",
            StatType::Defense => "Defense",
            StatType::SpecialAttack => "Special Attack",
            StatType::SpecialDefense => "Special Defense",
            StatType::Speed => "Speed",
        };
        write!(f, "{}", display_name)
    }
}
