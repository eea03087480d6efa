#[cfg(test)]
mod tests {
    use crate::battle::engine::run_battle;
    use crate::battle::state::{BattleEvent, TurnRng};
    use crate::battle::tests::common::{
        count_events, create_test_battle, test_rules, TestPokemonBuilder,
    };
    use crate::config::BattleRules;
    use crate::pokemon::StatusCondition;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn one_round() -> BattleRules {
        BattleRules {
            round_cap: 1,
            ..test_rules()
        }
    }

    #[rstest]
    #[case("roll of 1 skips the turn", 1, true)]
    #[case("roll of 25 skips the turn", 25, true)]
    #[case("roll of 26 lets it act", 26, false)]
    #[case("roll of 100 lets it act", 100, false)]
    fn test_paralysis_prevents_action(
        #[case] desc: &str,
        #[case] paralysis_roll: u8,
        #[case] expect_prevented: bool,
    ) {
        let paralyzed = TestPokemonBuilder::new("Alpha")
            .with_speed(90)
            .with_status(StatusCondition::Paralysis)
            .build();
        let opponent = TestPokemonBuilder::new("Beta").build();
        let mut battle_state = create_test_battle(paralyzed, opponent);
        // Paralysis check, then accuracy rolls that always hit.
        let mut rng = TurnRng::new_for_test(vec![paralysis_roll, 50, 50]);

        run_battle(&mut battle_state, &one_round(), &mut rng).unwrap();

        let prevented = battle_state
            .events
            .events()
            .contains(&BattleEvent::ActionPrevented {
                player_index: 0,
                status: StatusCondition::Paralysis,
            });
        assert_eq!(prevented, expect_prevented, "{}", desc);

        let alpha_moved = count_events(&battle_state, |e| {
            matches!(e, BattleEvent::MoveUsed { player_index: 0, .. })
        }) > 0;
        assert_eq!(alpha_moved, !expect_prevented, "{}", desc);

        let beta_untouched = battle_state.combatants[1].current_hp() == 100;
        assert_eq!(beta_untouched, expect_prevented, "{}", desc);
        // The opponent always gets its turn.
        assert!(battle_state.combatants[0].current_hp() < 100, "{}", desc);
    }

    #[test]
    fn test_paralysis_message() {
        let paralyzed = TestPokemonBuilder::new("Alpha")
            .with_speed(90)
            .with_status(StatusCondition::Paralysis)
            .build();
        let opponent = TestPokemonBuilder::new("Beta").build();
        let mut battle_state = create_test_battle(paralyzed, opponent);
        let mut rng = TurnRng::new_for_test(vec![10, 50]);

        run_battle(&mut battle_state, &one_round(), &mut rng).unwrap();

        let log = battle_state.render_log();
        assert!(log.contains("=== Turn 1 ===\nAlpha is paralyzed and can't move!\nBeta used Tackle!"));
    }

    #[test]
    fn test_paralysis_is_checked_every_turn() {
        let rules = BattleRules {
            round_cap: 3,
            ..test_rules()
        };
        let paralyzed = TestPokemonBuilder::new("Alpha")
            .with_speed(90)
            .with_status(StatusCondition::Paralysis)
            .build();
        let opponent = TestPokemonBuilder::new("Beta").build();
        let mut battle_state = create_test_battle(paralyzed, opponent);
        // Per turn: Alpha's paralysis roll, Alpha's accuracy (if it acts), Beta's accuracy.
        let mut rng = TurnRng::new_for_test(vec![20, 50, 90, 50, 50, 5, 50]);

        run_battle(&mut battle_state, &rules, &mut rng).unwrap();

        battle_state
            .events
            .print_debug_with_message("Events for test_paralysis_is_checked_every_turn:");
        assert_eq!(
            count_events(&battle_state, |e| matches!(
                e,
                BattleEvent::ActionPrevented { player_index: 0, .. }
            )),
            2
        );
        assert_eq!(
            count_events(&battle_state, |e| matches!(
                e,
                BattleEvent::MoveUsed { player_index: 0, .. }
            )),
            1
        );
    }

    #[test]
    fn test_healthy_pokemon_consumes_no_prevention_roll() {
        let alpha = TestPokemonBuilder::new("Alpha").with_speed(90).build();
        let beta = TestPokemonBuilder::new("Beta").build();
        let mut battle_state = create_test_battle(alpha, beta);
        // First roll is Alpha's accuracy; a miss proves no roll was spent elsewhere.
        let mut rng = TurnRng::new_for_test(vec![100, 50]);
        let mut alpha_move = battle_state.combatants[0].moves[0].clone();
        alpha_move.accuracy = Some(99);
        battle_state.combatants[0].moves = vec![alpha_move];

        run_battle(&mut battle_state, &one_round(), &mut rng).unwrap();

        let events = battle_state.events.events();
        assert!(events.contains(&BattleEvent::MoveMissed { attacker: 0 }));
        assert!(!events.contains(&BattleEvent::MoveMissed { attacker: 1 }));
    }
}
