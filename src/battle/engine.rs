use std::cmp::Ordering;

use schema::PokemonType;
use tracing::{debug, warn};

use crate::battle::calculators::{calculate_damage, move_hits};
use crate::battle::state::{BattleEvent, BattleState, GameState, TurnRng};
use crate::battle::status;
use crate::config::BattleRules;
use crate::errors::{BattleEngineError, BattleResult, DataProviderError};
use crate::pokemon::{MoveSnapshot, PokemonSnapshot};
use crate::provider::DataProvider;

/// Fetches both combatants and fights the battle to a result.
///
/// Nothing is returned on failure: a lookup error or a combatant without
/// damaging moves aborts before the first turn.
pub async fn simulate_battle(
    provider: &dyn DataProvider,
    pokemon1_name: &str,
    pokemon2_name: &str,
    rules: &BattleRules,
    mut rng: TurnRng,
) -> BattleResult<BattleState> {
    let pokemon1 = build_combatant(provider, pokemon1_name, rules).await?;
    let pokemon2 = build_combatant(provider, pokemon2_name, rules).await?;

    let mut battle_state = BattleState::new(pokemon1, pokemon2);
    run_battle(&mut battle_state, rules, &mut rng)?;
    Ok(battle_state)
}

/// Builds a fresh snapshot from provider data.
///
/// Move details are looked up in move-list order until `max_battle_moves`
/// damaging moves are known or `move_scan_limit` entries have been tried.
/// Moves the provider cannot resolve are skipped; transport failures abort.
pub async fn build_combatant(
    provider: &dyn DataProvider,
    name: &str,
    rules: &BattleRules,
) -> BattleResult<PokemonSnapshot> {
    let record = provider.pokemon(name).await?;

    let mut moves = Vec::new();
    let mut damaging = 0;
    for move_name in record.moves.iter().take(rules.move_scan_limit) {
        match provider.move_details(move_name).await {
            Ok(details) => {
                let snapshot = MoveSnapshot::from(&details);
                if snapshot.is_damaging() {
                    damaging += 1;
                }
                moves.push(snapshot);
                if damaging >= rules.max_battle_moves {
                    break;
                }
            }
            Err(
                err @ (DataProviderError::NotFound { .. } | DataProviderError::Malformed { .. }),
            ) => {
                warn!(pokemon = %record.name, move_name = %move_name, error = %err, "skipping move");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(PokemonSnapshot::from_record(&record, moves))
}

/// Runs a battle on an already-built state until someone faints or the round
/// cap is reached.
pub fn run_battle(
    battle_state: &mut BattleState,
    rules: &BattleRules,
    rng: &mut TurnRng,
) -> BattleResult<()> {
    for pokemon in &battle_state.combatants {
        if pokemon.first_damaging_move().is_none() {
            return Err(BattleEngineError::DegenerateBattleInput(pokemon.name.clone()));
        }
    }

    battle_state.push_event(BattleEvent::BattleStarted);
    let [first, _] = determine_action_order(battle_state);
    battle_state.push_event(BattleEvent::TurnOrderDecided {
        first,
        speed_tie: is_speed_tie(battle_state),
    });

    for round in 1..=rules.round_cap {
        battle_state.turn_number = round;
        resolve_round(battle_state, rules, rng);
        if battle_state.game_state.is_over() {
            break;
        }
    }

    if !battle_state.game_state.is_over() {
        decide_by_remaining_hp(battle_state, rules.round_cap);
    }

    debug!(
        turns = battle_state.turn_number,
        result = ?battle_state.game_state,
        "battle finished"
    );
    Ok(())
}

/// Faster combatant first; on equal speed the first-named combatant leads.
pub fn determine_action_order(battle_state: &BattleState) -> [usize; 2] {
    let speed = |i: usize| battle_state.combatants[i].base_stats.speed;
    if speed(1) > speed(0) {
        [1, 0]
    } else {
        [0, 1]
    }
}

fn is_speed_tie(battle_state: &BattleState) -> bool {
    battle_state.combatants[0].base_stats.speed == battle_state.combatants[1].base_stats.speed
}

fn resolve_round(battle_state: &mut BattleState, rules: &BattleRules, rng: &mut TurnRng) {
    battle_state.push_event(BattleEvent::TurnStarted {
        turn_number: battle_state.turn_number,
    });

    for attacker_index in determine_action_order(battle_state) {
        if battle_state.combatants[attacker_index].is_fainted() {
            continue;
        }
        execute_action(battle_state, attacker_index, rules, rng);
        if battle_state.game_state.is_over() {
            return;
        }
    }
}

/// One combatant's full turn: status check, attack, residual damage.
fn execute_action(
    battle_state: &mut BattleState,
    attacker_index: usize,
    rules: &BattleRules,
    rng: &mut TurnRng,
) {
    let defender_index = 1 - attacker_index;

    match status::check_action_prevention(&battle_state.combatants[attacker_index], rng) {
        Some(status) => battle_state.push_event(BattleEvent::ActionPrevented {
            player_index: attacker_index,
            status,
        }),
        None => {
            execute_attack(battle_state, attacker_index, defender_index, rules, rng);
            if battle_state.combatants[defender_index].is_fainted() {
                faint_and_end(battle_state, defender_index);
                return;
            }
        }
    }

    apply_end_of_turn_damage(battle_state, attacker_index);
    if battle_state.combatants[attacker_index].is_fainted() {
        faint_and_end(battle_state, attacker_index);
    }
}

fn execute_attack(
    battle_state: &mut BattleState,
    attacker_index: usize,
    defender_index: usize,
    rules: &BattleRules,
    rng: &mut TurnRng,
) {
    let Some(move_used) = battle_state.combatants[attacker_index]
        .first_damaging_move()
        .cloned()
    else {
        return;
    };

    battle_state.push_event(BattleEvent::MoveUsed {
        player_index: attacker_index,
        move_name: move_used.name.clone(),
    });

    if !move_hits(&move_used, rng) {
        battle_state.push_event(BattleEvent::MoveMissed {
            attacker: attacker_index,
        });
        return;
    }

    let multiplier = PokemonType::combined_effectiveness(
        move_used.move_type,
        &battle_state.combatants[defender_index].types,
    );
    battle_state.push_event(BattleEvent::AttackTypeEffectiveness { multiplier });
    if multiplier == 0.0 {
        return;
    }

    let attacker = &battle_state.combatants[attacker_index];
    let damage = calculate_damage(
        attacker.base_stats.attack,
        battle_state.combatants[defender_index].base_stats.defense,
        move_used.power.unwrap_or(0),
        multiplier,
        attacker.status(),
    );

    let defender = &mut battle_state.combatants[defender_index];
    let dealt = defender.take_damage(damage);
    let remaining_hp = defender.current_hp();
    battle_state.push_event(BattleEvent::DamageDealt {
        target: defender_index,
        damage: dealt,
        remaining_hp,
    });

    if battle_state.combatants[defender_index].is_fainted() {
        return;
    }

    try_inflict_status(battle_state, defender_index, &move_used, rules, rng);
}

/// Secondary status roll. Only made when the defender could actually take the
/// status, so an ineligible target consumes no randomness.
fn try_inflict_status(
    battle_state: &mut BattleState,
    defender_index: usize,
    move_used: &MoveSnapshot,
    rules: &BattleRules,
    rng: &mut TurnRng,
) {
    let Some(infliction) = rules.status_table.infliction_for(move_used.move_type) else {
        return;
    };

    let defender = &battle_state.combatants[defender_index];
    if defender.status().is_some() || rules.status_table.is_immune(defender, infliction.status) {
        return;
    }

    if rng.roll_under(infliction.chance, "Secondary Status Check")
        && battle_state.combatants[defender_index].try_apply_status(infliction.status)
    {
        battle_state.push_event(BattleEvent::PokemonStatusApplied {
            target: defender_index,
            status: infliction.status,
        });
    }
}

fn apply_end_of_turn_damage(battle_state: &mut BattleState, player_index: usize) {
    let pokemon = &mut battle_state.combatants[player_index];
    let (Some(condition), Some(damage)) = (pokemon.status(), status::residual_damage(pokemon))
    else {
        return;
    };

    let dealt = pokemon.take_damage(damage);
    let remaining_hp = pokemon.current_hp();
    battle_state.push_event(BattleEvent::PokemonStatusDamage {
        target: player_index,
        status: condition,
        damage: dealt,
        remaining_hp,
    });
}

fn faint_and_end(battle_state: &mut BattleState, fainted_index: usize) {
    battle_state.push_event(BattleEvent::PokemonFainted {
        player_index: fainted_index,
    });
    let winner = 1 - fainted_index;
    end_battle(battle_state, Some(winner));
}

/// Round-cap policy: the higher remaining HP fraction wins; equal is a draw.
fn decide_by_remaining_hp(battle_state: &mut BattleState, rounds: u32) {
    battle_state.push_event(BattleEvent::RoundCapReached { rounds });
    let [pokemon1, pokemon2] = &battle_state.combatants;
    let winner = match pokemon1.compare_hp_fraction(pokemon2) {
        Ordering::Greater => Some(0),
        Ordering::Less => Some(1),
        Ordering::Equal => None,
    };
    end_battle(battle_state, winner);
}

fn end_battle(battle_state: &mut BattleState, winner: Option<usize>) {
    battle_state.game_state = match winner {
        Some(0) => GameState::Player1Win,
        Some(_) => GameState::Player2Win,
        None => GameState::Draw,
    };
    battle_state.push_event(BattleEvent::BattleEnded { winner });
}
