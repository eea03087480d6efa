use crate::pokemon::{PokemonSnapshot, StatusCondition};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Copy)]
pub enum GameState {
    InProgress,
    Player1Win,
    Player2Win,
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::InProgress)
    }

    /// Index of the winning combatant, if any.
    pub fn winner(&self) -> Option<usize> {
        match self {
            GameState::Player1Win => Some(0),
            GameState::Player2Win => Some(1),
            GameState::InProgress | GameState::Draw => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Battle Start
    BattleStarted,
    TurnOrderDecided {
        first: usize,
        speed_tie: bool,
    },

    // Turn Management
    TurnStarted {
        turn_number: u32,
    },

    // Pokemon Actions
    MoveUsed {
        player_index: usize,
        move_name: String,
    },
    MoveMissed {
        attacker: usize,
    },
    ActionPrevented {
        player_index: usize,
        status: StatusCondition,
    },
    AttackTypeEffectiveness {
        multiplier: f32,
    },
    DamageDealt {
        target: usize,
        damage: u16,
        remaining_hp: u16,
    },
    PokemonFainted {
        player_index: usize,
    },

    // Pokemon Status Conditions
    PokemonStatusApplied {
        target: usize,
        status: StatusCondition,
    },
    PokemonStatusDamage {
        target: usize,
        status: StatusCondition,
        damage: u16,
        remaining_hp: u16,
    },

    // Battle End
    RoundCapReached {
        rounds: u32,
    },
    BattleEnded {
        winner: Option<usize>,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        let name = |index: usize| battle_state.combatants[index].name.as_str();
        match self {
            BattleEvent::BattleStarted => Some(format!(
                "A battle is about to begin between {} and {}!",
                name(0),
                name(1)
            )),
            BattleEvent::TurnOrderDecided { first, speed_tie } => {
                if *speed_tie {
                    Some(format!(
                        "{} and {} are equally fast. {} will attack first.",
                        name(0),
                        name(1),
                        name(*first)
                    ))
                } else {
                    Some(format!("{} is faster and will attack first.", name(*first)))
                }
            }
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::MoveUsed {
                player_index,
                move_name,
            } => Some(format!("{} used {}!", name(*player_index), move_name)),
            BattleEvent::MoveMissed { attacker } => {
                Some(format!("{}'s attack missed!", name(*attacker)))
            }
            BattleEvent::ActionPrevented {
                player_index,
                status,
            } => match status {
                StatusCondition::Paralysis => Some(format!(
                    "{} is paralyzed and can't move!",
                    name(*player_index)
                )),
                _ => None,
            },
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 && m > 0.0 => Some("It's not very effective...".to_string()),
                m if m == 0.0 => Some("It had no effect!".to_string()),
                _ => None, // Normal effectiveness, no message
            },
            BattleEvent::DamageDealt {
                target,
                damage,
                remaining_hp,
            } => Some(format!(
                "{} took {} damage and has {} HP remaining.",
                name(*target),
                damage,
                remaining_hp
            )),
            BattleEvent::PokemonFainted { player_index } => {
                Some(format!("{} fainted!", name(*player_index)))
            }
            BattleEvent::PokemonStatusApplied { target, status } => Some(format!(
                "{} {}",
                name(*target),
                Self::format_pokemon_status_applied(status)
            )),
            BattleEvent::PokemonStatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} took {} damage from its {}.",
                name(*target),
                damage,
                status
            )),
            BattleEvent::RoundCapReached { rounds } => Some(format!(
                "Neither Pokémon fainted after {} rounds! The battle is decided by remaining HP.",
                rounds
            )),
            BattleEvent::BattleEnded { winner } => match winner {
                Some(index) => Some(format!("--- Battle Over ---\nThe winner is {}!", name(*index))),
                None => Some("--- Battle Over ---\nThe battle ended in a draw!".to_string()),
            },
        }
    }

    fn format_pokemon_status_applied(status: &StatusCondition) -> &'static str {
        match status {
            StatusCondition::Paralysis => "was paralyzed! It may be unable to move!",
            StatusCondition::Burn => "was burned!",
            StatusCondition::Poison => "was poisoned!",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Print all events in debug format with a custom prefix message.
    #[cfg(test)]
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        for event in &self.events {
            println!("  {:?}", event);
        }
    }
}

/// Source of battle randomness. Every roll is a value in 1..=100.
///
/// Tests script exact outcomes with [`TurnRng::new_for_test`]; a scripted
/// sequence repeats from the start once it runs out.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<u8>, index: usize },
    Generated(StdRng),
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Generated(StdRng::from_rng(&mut rand::rng())),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Generated(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        let outcome = match &mut self.source {
            RngSource::Scripted { outcomes, index } => {
                if outcomes.is_empty() {
                    100
                } else {
                    let outcome = outcomes[*index % outcomes.len()];
                    *index += 1;
                    outcome
                }
            }
            RngSource::Generated(rng) => rng.random_range(1..=100),
        };
        tracing::trace!(outcome, reason, "rng consumed");
        outcome
    }

    /// True with probability `percent`/100.
    pub fn roll_under(&mut self, percent: u8, reason: &str) -> bool {
        self.next_outcome(reason) <= percent
    }
}

/// Everything one simulation owns: both combatants, the turn counter, and the
/// event log. Created per call and never shared.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub combatants: [PokemonSnapshot; 2],
    pub turn_number: u32,
    pub game_state: GameState,
    pub events: EventBus,
}

impl BattleState {
    pub fn new(pokemon1: PokemonSnapshot, pokemon2: PokemonSnapshot) -> Self {
        Self {
            combatants: [pokemon1, pokemon2],
            turn_number: 0,
            game_state: GameState::InProgress,
            events: EventBus::new(),
        }
    }

    pub fn push_event(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    /// The formatted battle log, one line per visible event, with a blank
    /// line before each turn and before the result.
    pub fn render_log(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for event in self.events.events() {
            if matches!(
                event,
                BattleEvent::TurnStarted { .. } | BattleEvent::BattleEnded { .. }
            ) {
                lines.push(String::new());
            }
            if let Some(text) = event.format(self) {
                lines.push(text);
            }
        }
        lines.join("\n")
    }
}
