//! Text-producing operations behind the MCP tools and the CLI.
//!
//! Every function here is stateless: it takes a provider and returns the
//! finished text, or an error whose `Display` is the message shown to the user.

use tracing::{info, warn};

use crate::analysis::{self, TypeProfile};
use crate::battle::engine::simulate_battle;
use crate::battle::state::TurnRng;
use crate::config::{BattleRules, ReportLimits};
use crate::errors::{BattleEngineError, BattleResult};
use crate::pokemon::{capitalize, title_case};
use crate::provider::{DataProvider, MoveRecord, PokemonRecord};

/// Full data report for one Pokemon: stats, abilities, evolution family and
/// a selection of its moves.
pub async fn get_pokemon_data_report(
    provider: &dyn DataProvider,
    pokemon_name: &str,
    limits: ReportLimits,
) -> BattleResult<String> {
    let record = provider.pokemon(pokemon_name).await?;

    let evolution_info = match provider.evolution_chain(&record.species).await {
        Ok(chain) => format_evolution_chain(&chain),
        Err(err) => {
            warn!(pokemon = %record.name, error = %err, "evolution chain unavailable");
            "Unknown".to_string()
        }
    };

    let mut detailed_moves = Vec::new();
    for move_name in record.moves.iter().take(limits.detailed_moves) {
        match provider.move_details(move_name).await {
            Ok(details) => detailed_moves.push(format_move_line(&details)),
            Err(err) => warn!(move_name = %move_name, error = %err, "move left out of report"),
        }
    }

    let additional_moves: Vec<String> = record
        .moves
        .iter()
        .skip(limits.detailed_moves)
        .take(limits.additional_moves)
        .map(|m| title_case(m))
        .collect();

    let mut report = format_pokemon_header(&record, &evolution_info);
    for line in &detailed_moves {
        report += &format!("  • {}\n", line);
    }
    if !additional_moves.is_empty() {
        report += &format!("\nAdditional Moves: {}...", additional_moves.join(", "));
    }
    Ok(report)
}

fn format_pokemon_header(record: &PokemonRecord, evolution_info: &str) -> String {
    let stats = &record.base_stats;
    let types = record
        .types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let abilities = record
        .abilities
        .iter()
        .map(|a| title_case(a))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "--- Pokémon Report: {name} ---\n\
         ID: {id}\n\
         Types: {types}\n\
         Height: {height:.1} m\n\
         Weight: {weight:.1} kg\n\n\
         Base Stats:\n\
         \x20 - HP: {hp}\n\
         \x20 - Attack: {attack}\n\
         \x20 - Defense: {defense}\n\
         \x20 - Special Attack: {sp_attack}\n\
         \x20 - Special Defense: {sp_defense}\n\
         \x20 - Speed: {speed}\n\
         \x20 - Total: {total}\n\n\
         Abilities: {abilities}\n\n\
         Evolution Chain: {evolution_info}\n\n\
         Notable Moves (with details):\n",
        name = capitalize(&record.name),
        id = record.id,
        height = f64::from(record.height) / 10.0,
        weight = f64::from(record.weight) / 10.0,
        hp = stats.hp,
        attack = stats.attack,
        defense = stats.defense,
        sp_attack = stats.sp_attack,
        sp_defense = stats.sp_defense,
        speed = stats.speed,
        total = stats.total(),
    )
}

/// `Ember (Fire) - Power: 40, Accuracy: 100, PP: 25 - <effect>`
fn format_move_line(details: &MoveRecord) -> String {
    fn or_na<T: ToString>(value: Option<T>) -> String {
        value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
    }

    format!(
        "{} ({}) - Power: {}, Accuracy: {}, PP: {} - {}",
        title_case(&details.name),
        details.move_type,
        or_na(details.power),
        or_na(details.accuracy),
        or_na(details.pp),
        details
            .short_effect
            .as_deref()
            .unwrap_or("No effect description")
    )
}

fn format_evolution_chain(chain: &[String]) -> String {
    if chain.len() <= 1 {
        "Does not evolve".to_string()
    } else {
        chain
            .iter()
            .map(|species| capitalize(species))
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

/// Simulates a battle and returns its full log. Without a seed the battle
/// draws from fresh entropy.
pub async fn simulate_battle_report(
    provider: &dyn DataProvider,
    pokemon1_name: &str,
    pokemon2_name: &str,
    rules: &BattleRules,
    seed: Option<u64>,
) -> BattleResult<String> {
    let rng = seed.map_or_else(TurnRng::new_random, TurnRng::from_seed);
    let battle_state = simulate_battle(provider, pokemon1_name, pokemon2_name, rules, rng).await?;

    info!(
        pokemon1 = pokemon1_name,
        pokemon2 = pokemon2_name,
        turns = battle_state.turn_number,
        result = ?battle_state.game_state,
        "battle simulated"
    );
    Ok(battle_state.render_log())
}

pub fn type_effectiveness_report(attacking_type: &str, defending_type: &str) -> BattleResult<String> {
    analysis::type_effectiveness(attacking_type, defending_type).map(|m| m.to_string())
}

pub async fn weaknesses_report(provider: &dyn DataProvider, pokemon_name: &str) -> BattleResult<String> {
    let record = provider.pokemon(pokemon_name).await?;
    Ok(TypeProfile::for_types(capitalize(&record.name), &record.types).report())
}

/// The text an operation failure is shown as.
pub fn error_text(err: &BattleEngineError) -> String {
    format!("Error: {}", err)
}
