use crate::battle::state::TurnRng;
use crate::battle::status;
use crate::pokemon::{MoveSnapshot, StatusCondition};

/// Level term of the simplified formula, `2/5 + 2`.
const LEVEL_FACTOR: f64 = 2.0 / 5.0 + 2.0;

/// Damage for a single move use.
///
/// ```text
/// base = (((2/5 + 2) * power * (attack / defense)) / 50) * multiplier + 2
/// ```
///
/// A burned attacker halves the result before it is floored. Any hit that
/// connects (multiplier > 0) deals at least 1; an immune target takes 0.
pub fn calculate_damage(
    attack: u16,
    defense: u16,
    move_power: u16,
    type_multiplier: f32,
    attacker_status: Option<StatusCondition>,
) -> u16 {
    if type_multiplier <= 0.0 {
        return 0;
    }

    let ratio = f64::from(attack) / f64::from(defense.max(1));
    let base = ((LEVEL_FACTOR * f64::from(move_power) * ratio) / 50.0) * f64::from(type_multiplier)
        + 2.0;
    let modified = base * status::attack_modifier(attacker_status);

    (modified.floor() as u16).max(1)
}

/// Accuracy check. Moves without an accuracy value never miss.
pub fn move_hits(move_used: &MoveSnapshot, rng: &mut TurnRng) -> bool {
    match move_used.accuracy {
        Some(accuracy) => rng.roll_under(accuracy, "Move Accuracy Check"),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::PokemonType;

    #[test]
    fn known_values() {
        // (2.4 * 40 * 1.0 / 50) * 2 + 2 = 5.84
        assert_eq!(calculate_damage(100, 100, 40, 2.0, None), 5);
        // (2.4 * 90 * 2.0 / 50) * 1 + 2 = 10.64
        assert_eq!(calculate_damage(100, 50, 90, 1.0, None), 10);
    }

    #[test]
    fn super_effective_beats_resisted() {
        let vs_grass = calculate_damage(84, 65, 90, 2.0, None);
        let vs_fire = calculate_damage(84, 65, 90, 0.5, None);
        assert!(vs_grass > vs_fire, "{} should exceed {}", vs_grass, vs_fire);
    }

    #[rstest]
    #[case(1, 255, 10, 0.25)]
    #[case(5, 230, 1, 0.5)]
    #[case(1, 1, 1, 0.25)]
    fn connecting_hits_deal_at_least_one(
        #[case] attack: u16,
        #[case] defense: u16,
        #[case] power: u16,
        #[case] multiplier: f32,
    ) {
        assert!(calculate_damage(attack, defense, power, multiplier, None) >= 1);
        assert!(
            calculate_damage(attack, defense, power, multiplier, Some(StatusCondition::Burn)) >= 1
        );
    }

    #[test]
    fn immunity_deals_nothing() {
        assert_eq!(calculate_damage(255, 5, 250, 0.0, None), 0);
        assert_eq!(calculate_damage(255, 5, 250, 0.0, Some(StatusCondition::Burn)), 0);
    }

    #[test]
    fn burn_halves_damage() {
        for attack in [20u16, 55, 84, 130, 190] {
            for defense in [15u16, 40, 65, 110, 230] {
                for power in [20u16, 40, 65, 90, 120, 150] {
                    for multiplier in [0.25f32, 0.5, 1.0, 2.0, 4.0] {
                        let normal = calculate_damage(attack, defense, power, multiplier, None);
                        let burned = calculate_damage(
                            attack,
                            defense,
                            power,
                            multiplier,
                            Some(StatusCondition::Burn),
                        );
                        assert_eq!(burned, (normal / 2).max(1));
                    }
                }
            }
        }
    }

    #[test]
    fn other_statuses_do_not_change_damage() {
        let normal = calculate_damage(84, 65, 90, 1.0, None);
        assert_eq!(calculate_damage(84, 65, 90, 1.0, Some(StatusCondition::Paralysis)), normal);
        assert_eq!(calculate_damage(84, 65, 90, 1.0, Some(StatusCondition::Poison)), normal);
    }

    #[rstest]
    #[case(Some(100), 100, true)]
    #[case(Some(70), 70, true)]
    #[case(Some(70), 71, false)]
    #[case(None, 100, true)]
    fn accuracy_check(#[case] accuracy: Option<u8>, #[case] roll: u8, #[case] expect_hit: bool) {
        let move_used = MoveSnapshot {
            name: "Test Move".to_string(),
            move_type: PokemonType::Normal,
            power: Some(40),
            accuracy,
            pp: Some(35),
        };
        let mut rng = TurnRng::new_for_test(vec![roll]);
        assert_eq!(move_hits(&move_used, &mut rng), expect_hit);
    }
}
