//! Post-battle reward resolution: experience scaling, the gold roll, the gem
//! drop and the death penalty.
//!
//! Invoked exactly once per battle, after the winner is known. Deltas are
//! applied to the character here; rendering the narrative lines is the
//! battle-over handler's job (see [`crate::forest`]).

use rand::Rng;
use tracing::debug;

use crate::character::CharacterState;
use crate::config::RewardConfig;
use crate::creature::Creature;

/// Center-weighted roll in `[0, max]`: the average of three independent
/// uniform draws, rounded. Mid-range amounts dominate, the extremes stay
/// rare. `max <= 0` always yields 0.
pub fn bell_curve_roll(max: i64, rng: &mut impl Rng) -> i64 {
    if max <= 0 {
        return 0;
    }
    let sum = rng.gen_range(0..=max) + rng.gen_range(0..=max) + rng.gen_range(0..=max);
    (sum as f64 / 3.0).round() as i64
}

/// Everything a won battle paid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VictoryRewards {
    /// Total experience granted, floor of 1.
    pub experience: i64,
    /// Signed level-difference component of the experience, reported
    /// separately in the narrative.
    pub bonus_experience: i64,
    /// Gold found on the corpse; 0 is a valid, silently-unreported outcome.
    pub gold: i64,
    pub gem_dropped: bool,
}

/// Resolves a won battle and applies the deltas to the character.
///
/// Draw order is fixed (gold roll, then the gem trial) so seeded generators
/// reproduce outcomes.
pub fn resolve_victory(
    character: &mut dyn CharacterState,
    creature: &Creature,
    config: &RewardConfig,
    rng: &mut impl Rng,
) -> VictoryRewards {
    let (experience, bonus_experience) = creature.experience_reward(
        character.level(),
        config.experience_bonus,
        config.experience_malus,
    );

    let gold = bell_curve_roll(creature.gold_value(), rng);
    let gem_dropped = rng.gen::<f64>() < config.gem_drop_probability;

    character.reward_experience(experience as u64);
    if gold > 0 {
        character.add_gold(gold as u64);
    }
    if gem_dropped {
        character.add_gems(1);
    }

    debug!(
        experience,
        bonus_experience, gold, gem_dropped, "victory rewards applied"
    );

    VictoryRewards {
        experience,
        bonus_experience,
        gold,
        gem_dropped,
    }
}

/// The one-shot multiplicative death penalty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathPenalty {
    /// Resolved fraction of experience lost, in `[0, 1]`.
    pub lost_fraction: f64,
    pub experience_before: u64,
    pub experience_after: u64,
}

/// Resolves a lost battle: the character keeps `(1 - lost_fraction)` of
/// their total experience. No floor beyond the fraction being at most 1;
/// repeated deaths compound.
pub fn resolve_defeat(character: &mut dyn CharacterState, config: &RewardConfig) -> DeathPenalty {
    let lost_fraction = config.lost_experience_upon_death;
    let experience_before = character.experience();
    character.multiply_experience(1.0 - lost_fraction);
    let experience_after = character.experience();

    debug!(
        lost_fraction,
        experience_before, experience_after, "death penalty applied"
    );

    DeathPenalty {
        lost_fraction,
        experience_before,
        experience_after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::config::RewardConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(gem_drop_probability: f64) -> RewardConfig {
        RewardConfig {
            gem_drop_probability,
            ..RewardConfig::default()
        }
    }

    #[test]
    fn bell_curve_roll_respects_bounds_and_prefers_the_middle() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut middle = 0usize;
        let samples = 10_000;

        for _ in 0..samples {
            let roll = bell_curve_roll(100, &mut rng);
            assert!((0..=100).contains(&roll), "roll {} out of bounds", roll);
            if (25..=75).contains(&roll) {
                middle += 1;
            }
        }

        // A uniform draw would land in [25, 75] about half the time; the
        // three-dice average concentrates far more mass there.
        assert!(middle > samples * 7 / 10, "middle fraction {}", middle);
    }

    #[test]
    fn bell_curve_roll_handles_degenerate_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(bell_curve_roll(0, &mut rng), 0);
        assert_eq!(bell_curve_roll(-10, &mut rng), 0);
    }

    #[test]
    fn victory_applies_experience_gold_and_gems() {
        let mut character = Character::new("Aveline", 5);
        let creature = Creature::new("Hooded Cultist", "Sacrificial knife", 5, 11, 9, 55);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        // Guaranteed gem so the assertion is deterministic.
        let rewards = resolve_victory(&mut character, &creature, &config(1.0), &mut rng);

        assert_eq!(rewards.experience, 55);
        assert_eq!(rewards.bonus_experience, 0);
        assert!(rewards.gem_dropped);
        assert!((0..=136).contains(&rewards.gold));

        assert_eq!(character.experience(), 55);
        assert_eq!(character.gems(), 1);
        assert_eq!(character.gold(), rewards.gold as u64);
    }

    #[test]
    fn gem_probability_zero_never_drops() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let creature = Creature::new("Wild Boar", "Tusks", 2, 5, 3, 25);

        for _ in 0..500 {
            let mut character = Character::new("Aveline", 2);
            let rewards = resolve_victory(&mut character, &creature, &config(0.0), &mut rng);
            assert!(!rewards.gem_dropped);
            assert_eq!(character.gems(), 0);
        }
    }

    #[test]
    fn zero_gold_creature_pays_nothing() {
        // The Green Dragon sits on the level 18 gold table entry of 0.
        let mut character = Character::new("Aveline", 18);
        let creature = Creature::new("The Green Dragon", "Flame breath", 18, 38, 36, 250);
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let rewards = resolve_victory(&mut character, &creature, &config(0.0), &mut rng);
        assert_eq!(rewards.gold, 0);
        assert_eq!(character.gold(), 0);
    }

    #[test]
    fn stronger_creature_pays_bonus_experience() {
        let mut character = Character::new("Aveline", 4);
        let creature = Creature::new("Hooded Cultist", "Sacrificial knife", 5, 11, 9, 55);
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        let rewards = resolve_victory(&mut character, &creature, &config(0.0), &mut rng);
        assert_eq!(rewards.bonus_experience, 14); // round(55 * 0.25 * 1)
        assert_eq!(rewards.experience, 69);
        assert_eq!(character.experience(), 69);
    }

    #[test]
    fn defeat_applies_the_resolved_fraction() {
        let mut character = Character::new("Aveline", 5);
        character.reward_experience(1000);

        let penalty = resolve_defeat(&mut character, &RewardConfig::default());
        assert_eq!(penalty.lost_fraction, 0.1);
        assert_eq!(penalty.experience_before, 1000);
        assert_eq!(penalty.experience_after, 900);
        assert_eq!(character.experience(), 900);

        // Compounds multiplicatively on a second death.
        let penalty = resolve_defeat(&mut character, &RewardConfig::default());
        assert_eq!(penalty.experience_after, 810);
    }

    #[test]
    fn full_loss_fraction_wipes_experience() {
        let mut character = Character::new("Aveline", 5);
        character.reward_experience(1234);

        let config = RewardConfig {
            lost_experience_upon_death: 1.0,
            ..RewardConfig::default()
        };
        let penalty = resolve_defeat(&mut character, &config);
        assert_eq!(penalty.experience_after, 0);
    }
}
