//! The forest flow: searching for a fight and handling the battle-over
//! event, including the fixed ordering of the narrative lines.

use rand::Rng;

use crate::catalog::CreatureCatalog;
use crate::character::CharacterState;
use crate::config::{PropertyStore, RewardConfig};
use crate::creature::Creature;
use crate::encounter::{self, Difficulty, SearchAction};
use crate::rewards;

/// Scene description shown when entering the forest.
pub const FOREST_DESCRIPTION: &str = "The Forest, home to evil creatures and evildoers of all \
sorts.\n\nThe thick foliage of the forest restricts your view to only a few yards in most \
places. The paths would be imperceptible except for your trained eye. You move silently as a \
soft breeze across the thick moss covering the ground, wary to avoid stepping on a twig or any \
of the numerous pieces of bleached bone that populate the forest floor, lest you betray your \
presence to one of the vile beasts that wander the forest.";

/// What the player sees after a step of the flow: a title plus ordered
/// paragraphs. The host renders this into its viewpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// A started encounter: the detached creature to fight plus the opening
/// narrative. The host's combat resolver takes over from here.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub creature: Creature,
    pub narrative: Narrative,
}

/// The forest location. Owns nothing but a reference to the catalog; all
/// character and configuration state stays with the caller.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    catalog: CreatureCatalog,
}

impl Forest {
    pub fn new(catalog: CreatureCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CreatureCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CreatureCatalog {
        &mut self.catalog
    }

    /// The fight-search actions currently available to the character.
    pub fn search_actions(&self, character: &dyn CharacterState) -> Vec<SearchAction> {
        encounter::search_actions(character)
    }

    /// Picks a level-appropriate opponent and opens the fight. Never fails:
    /// an empty candidate set degrades to a doppelganger.
    pub fn search_for_fight(
        &self,
        character: &dyn CharacterState,
        difficulty: Difficulty,
        rng: &mut impl Rng,
    ) -> Encounter {
        let target = encounter::target_level(character.level(), difficulty, rng);
        let creature = self.catalog.encounter(target, character, rng);

        let narrative = Narrative {
            title: "A fight!".to_string(),
            paragraphs: vec![encounter::encounter_narration(difficulty, &creature)],
        };

        Encounter {
            creature,
            narrative,
        }
    }

    /// Handles the battle-over event: resolves rewards or the death penalty
    /// against the configuration chain and renders the narrative.
    ///
    /// Victory lines render in a fixed order: title, gold (if any), gem (if
    /// dropped), bonus/malus experience (if nonzero), total experience.
    pub fn battle_over(
        &self,
        character: &mut dyn CharacterState,
        creature: &Creature,
        character_won: bool,
        config_chain: &[&dyn PropertyStore],
        rng: &mut impl Rng,
    ) -> Narrative {
        let config = RewardConfig::resolve(config_chain);

        if character_won {
            let rewards = rewards::resolve_victory(character, creature, &config, rng);
            let mut paragraphs = vec![format!("You defeated {}.", creature.name)];

            if rewards.gold > 0 {
                paragraphs.push(format!(
                    "You find {} gold on the corpse of your enemy.",
                    rewards.gold
                ));
            }
            if rewards.gem_dropped {
                paragraphs.push("In the remains of your enemy, you find a sparkling gem!".into());
            }
            if rewards.bonus_experience > 0 {
                paragraphs.push(format!(
                    "You gain {} additional experience for winning against a stronger enemy.",
                    rewards.bonus_experience
                ));
            } else if rewards.bonus_experience < 0 {
                paragraphs.push(format!(
                    "You lose {} experience for beating someone weaker than you.",
                    -rewards.bonus_experience
                ));
            }
            paragraphs.push(format!("You gain {} experience.", rewards.experience));

            Narrative {
                title: "You won!".to_string(),
                paragraphs,
            }
        } else {
            let penalty = rewards::resolve_defeat(character, &config);
            let lost = penalty.experience_before - penalty.experience_after;

            Narrative {
                title: "You died!".to_string(),
                paragraphs: vec![
                    format!(
                        "You have been defeated by {}. They stand over your dead body, laughing.",
                        creature.name
                    ),
                    format!("You lose {} experience.", lost),
                ],
            }
        }
    }
}
