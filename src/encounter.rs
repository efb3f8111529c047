//! Encounter selection: difficulty-based level adjustment, the fight-search
//! actions offered in the forest, and the flavor line shown when a creature
//! is found.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::character::CharacterState;
use crate::creature::Creature;

/// Player-chosen difficulty for a fight search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// Adjusts the character level into the level the encounter should target.
///
/// Easy shifts down by one, Hard shifts up by one. Normal applies a small
/// jitter: with probability 0.25 an adjustment roll happens, inside which a
/// 0.125 chance adds a level and an independent 0.25 chance removes one.
/// Both inner draws are always made when the outer one hits, so seeded
/// generators reproduce the sequence. The result is not clamped; a
/// nonpositive level simply matches nothing in the catalog.
pub fn target_level(character_level: i32, difficulty: Difficulty, rng: &mut impl Rng) -> i32 {
    match difficulty {
        Difficulty::Easy => character_level - 1,
        Difficulty::Hard => character_level + 1,
        Difficulty::Normal => {
            let mut level = character_level;
            if rng.gen::<f64>() < 0.25 {
                if rng.gen::<f64>() < 0.125 {
                    level += 1;
                }
                if rng.gen::<f64>() < 0.25 {
                    level -= 1;
                }
            }
            level
        }
    }
}

/// One fight-search option shown in the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchAction {
    pub label: &'static str,
    pub difficulty: Difficulty,
}

/// The fight-search actions available to a character. Dead characters get
/// none; "Go Slumming" only shows up above level 1 (there is nothing below
/// level 1 to slum against).
pub fn search_actions(character: &dyn CharacterState) -> Vec<SearchAction> {
    if !character.is_alive() {
        return Vec::new();
    }

    let mut actions = vec![SearchAction {
        label: "Search for a fight",
        difficulty: Difficulty::Normal,
    }];
    if character.level() > 1 {
        actions.push(SearchAction {
            label: "Go Slumming",
            difficulty: Difficulty::Easy,
        });
    }
    actions.push(SearchAction {
        label: "Go Thrillseeking",
        difficulty: Difficulty::Hard,
    });

    actions
}

/// The flavor line introducing the found creature, one per difficulty.
pub fn encounter_narration(difficulty: Difficulty, creature: &Creature) -> String {
    match difficulty {
        Difficulty::Easy => format!(
            "You head for the section of forest you know to contain foes that you're a bit \
             more comfortable with. You encounter a {} that attacks you with its weapon {}.",
            creature.name, creature.weapon
        ),
        Difficulty::Normal => format!(
            "You are strolling through the forest, trying to find a creature to kill. You \
             encounter a {} that attacks you with its weapon {}.",
            creature.name, creature.weapon
        ),
        Difficulty::Hard => format!(
            "You head for the section of forest which contains creatures of your nightmares, \
             hoping to find one of them injured. You encounter a {} that attacks you with its \
             weapon {}.",
            creature.name, creature.weapon
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn easy_and_hard_shift_by_exactly_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for level in -2..=20 {
            assert_eq!(target_level(level, Difficulty::Easy, &mut rng), level - 1);
            assert_eq!(target_level(level, Difficulty::Hard, &mut rng), level + 1);
        }
    }

    #[test]
    fn normal_jitter_stays_within_one_level_and_hits_all_outcomes() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut seen = [false; 3]; // -1, 0, +1
        let mut unchanged = 0usize;

        for _ in 0..10_000 {
            let level = target_level(10, Difficulty::Normal, &mut rng);
            let delta = level - 10;
            assert!((-1..=1).contains(&delta), "delta {} out of range", delta);
            seen[(delta + 1) as usize] = true;
            if delta == 0 {
                unchanged += 1;
            }
        }

        assert!(seen.iter().all(|&s| s), "not all outcomes reachable");
        // Unchanged is by far the dominant outcome (~93% expected).
        assert!(unchanged > 8_000);
    }

    #[test]
    fn dead_characters_get_no_search_actions() {
        let mut character = Character::new("Aveline", 5);
        character.health = 0;
        assert!(search_actions(&character).is_empty());
    }

    #[test]
    fn level_one_has_no_slumming() {
        let character = Character::new("Aveline", 1);
        let actions = search_actions(&character);
        let labels: Vec<_> = actions.iter().map(|a| a.label).collect();
        assert_eq!(labels, vec!["Search for a fight", "Go Thrillseeking"]);
    }

    #[test]
    fn higher_levels_get_all_three_actions() {
        let character = Character::new("Aveline", 2);
        let actions = search_actions(&character);
        let labels: Vec<_> = actions.iter().map(|a| a.label).collect();
        assert_eq!(
            labels,
            vec!["Search for a fight", "Go Slumming", "Go Thrillseeking"]
        );
        assert_eq!(actions[1].difficulty, Difficulty::Easy);
    }

    #[test]
    fn narration_names_creature_and_weapon() {
        let creature = Creature::new("Wild Boar", "Tusks", 2, 5, 3, 25);
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let line = encounter_narration(difficulty, &creature);
            assert!(line.contains("Wild Boar"), "{}", line);
            assert!(line.contains("Tusks"), "{}", line);
        }
    }
}
