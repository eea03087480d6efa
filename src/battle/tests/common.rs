use crate::battle::state::{BattleEvent, BattleState, TurnRng};
use crate::config::BattleRules;
use crate::pokemon::{MoveSnapshot, PokemonSnapshot, StatusCondition};
use crate::provider::{InMemoryProvider, MoveRecord, PokemonRecord};
use schema::{BaseStats, PokemonType};

/// A builder for creating test Pokemon snapshots with common defaults.
///
/// Defaults: Normal type, 100 HP, 50 in every other stat, and a single
/// 40-power, 100-accuracy Normal move.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu")
///     .with_types(vec![PokemonType::Electric])
///     .with_moves(vec![test_move("Thunder Shock", PokemonType::Electric, 40, Some(100))])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    types: Vec<PokemonType>,
    stats: BaseStats,
    moves: Vec<MoveSnapshot>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            types: vec![PokemonType::Normal],
            stats: BaseStats {
                hp: 100,
                attack: 50,
                defense: 50,
                sp_attack: 50,
                sp_defense: 50,
                speed: 50,
            },
            moves: vec![test_move("Tackle", PokemonType::Normal, 40, Some(100))],
            status: None,
            current_hp: None,
        }
    }

    pub fn with_types(mut self, types: Vec<PokemonType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_stats(mut self, hp: u16, attack: u16, defense: u16, speed: u16) -> Self {
        self.stats.hp = hp;
        self.stats.attack = attack;
        self.stats.defense = defense;
        self.stats.speed = speed;
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.stats.speed = speed;
        self
    }

    pub fn with_moves(mut self, moves: Vec<MoveSnapshot>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> PokemonSnapshot {
        let mut pokemon = PokemonSnapshot::new(self.name, self.types, self.stats, self.moves);
        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }
        if let Some(status) = self.status {
            pokemon.try_apply_status(status);
        }
        pokemon
    }
}

pub fn test_move(
    name: &str,
    move_type: PokemonType,
    power: u16,
    accuracy: Option<u8>,
) -> MoveSnapshot {
    MoveSnapshot {
        name: name.to_string(),
        move_type,
        power: Some(power),
        accuracy,
        pp: Some(10),
    }
}

pub fn status_move(name: &str, move_type: PokemonType) -> MoveSnapshot {
    MoveSnapshot {
        name: name.to_string(),
        move_type,
        power: None,
        accuracy: Some(100),
        pp: Some(20),
    }
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(p1_pokemon: PokemonSnapshot, p2_pokemon: PokemonSnapshot) -> BattleState {
    BattleState::new(p1_pokemon, p2_pokemon)
}

/// Creates a `TurnRng` whose every roll is 50: moves with accuracy >= 50 hit,
/// paralysis never skips, and default status chances never trigger.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50])
}

/// Rules with the default round cap and status table.
pub fn test_rules() -> BattleRules {
    BattleRules::default()
}

/// Index of the first combatant that used a move.
pub fn first_attacker(state: &BattleState) -> Option<usize> {
    state.events.events().iter().find_map(|e| match e {
        BattleEvent::MoveUsed { player_index, .. } => Some(*player_index),
        _ => None,
    })
}

pub fn count_events(state: &BattleState, predicate: impl Fn(&BattleEvent) -> bool) -> usize {
    state.events.events().iter().filter(|e| predicate(e)).count()
}

pub fn pokemon_record(
    name: &str,
    types: Vec<PokemonType>,
    hp: u16,
    attack: u16,
    defense: u16,
    speed: u16,
    moves: &[&str],
) -> PokemonRecord {
    PokemonRecord {
        id: 1,
        name: name.to_string(),
        species: name.to_string(),
        types,
        height: 7,
        weight: 69,
        base_stats: BaseStats {
            hp,
            attack,
            defense,
            sp_attack: 65,
            sp_defense: 65,
            speed,
        },
        abilities: vec!["overgrow".to_string(), "chlorophyll".to_string()],
        moves: moves.iter().map(|m| m.to_string()).collect(),
    }
}

pub fn move_record(
    name: &str,
    move_type: PokemonType,
    power: Option<u16>,
    accuracy: Option<u8>,
) -> MoveRecord {
    MoveRecord {
        name: name.to_string(),
        move_type,
        power,
        accuracy,
        pp: Some(25),
        short_effect: Some("Inflicts regular damage.".to_string()),
    }
}

/// A small offline dex: a few starters plus edge cases.
pub fn sample_provider() -> InMemoryProvider {
    InMemoryProvider::new()
        .with_pokemon(pokemon_record(
            "charmander",
            vec![PokemonType::Fire],
            39,
            52,
            43,
            65,
            &["scratch", "ember", "growl"],
        ))
        .with_pokemon(pokemon_record(
            "bulbasaur",
            vec![PokemonType::Grass, PokemonType::Poison],
            45,
            49,
            49,
            45,
            &["growl", "vine-whip", "tackle"],
        ))
        .with_pokemon(pokemon_record(
            "charizard",
            vec![PokemonType::Fire, PokemonType::Flying],
            78,
            84,
            78,
            100,
            &["mega-punch", "fire-punch", "growl"],
        ))
        .with_pokemon(pokemon_record(
            "magikarp",
            vec![PokemonType::Water],
            20,
            10,
            55,
            80,
            &["splash"],
        ))
        .with_pokemon(pokemon_record(
            "ditto",
            vec![PokemonType::Normal],
            48,
            48,
            48,
            48,
            &["missingno-move", "tackle"],
        ))
        .with_move(move_record("scratch", PokemonType::Normal, Some(40), Some(100)))
        .with_move(move_record("ember", PokemonType::Fire, Some(40), Some(100)))
        .with_move(move_record("growl", PokemonType::Normal, None, Some(100)))
        .with_move(move_record("vine-whip", PokemonType::Grass, Some(45), Some(100)))
        .with_move(move_record("tackle", PokemonType::Normal, Some(40), Some(100)))
        .with_move(move_record("mega-punch", PokemonType::Normal, Some(80), Some(85)))
        .with_move(move_record("fire-punch", PokemonType::Fire, Some(75), Some(100)))
        .with_move(move_record("splash", PokemonType::Normal, None, None))
        .with_evolution_chain(&["charmander", "charmeleon", "charizard"])
        .with_evolution_chain(&["bulbasaur", "ivysaur", "venusaur"])
}
