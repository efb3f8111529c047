//! The character-store seam.
//!
//! The host engine owns character persistence; this module only defines the
//! calls the forest needs, plus an in-memory implementation used by the flow
//! helpers and the test suite.

use serde::{Deserialize, Serialize};

/// Everything the forest reads or writes on a character.
pub trait CharacterState {
    fn name(&self) -> &str;
    fn level(&self) -> i32;

    fn health(&self) -> u32;
    fn set_health(&mut self, health: u32);
    fn max_health(&self) -> u32;

    fn attack(&self) -> u32;
    fn defense(&self) -> u32;

    fn gold(&self) -> u64;
    fn add_gold(&mut self, amount: u64);
    /// Removes gold if the balance covers it; returns false otherwise.
    fn spend_gold(&mut self, amount: u64) -> bool;

    fn gems(&self) -> u32;
    fn add_gems(&mut self, count: u32);

    fn experience(&self) -> u64;
    fn reward_experience(&mut self, amount: u64);
    /// Scales total accumulated experience, rounding to the nearest point.
    /// Used for the death penalty; repeated deaths compound.
    fn multiply_experience(&mut self, factor: f64);

    fn is_alive(&self) -> bool {
        self.health() > 0
    }

    fn heal(&mut self, amount: u32) {
        let healed = (self.health() + amount).min(self.max_health());
        self.set_health(healed);
    }
}

/// Plain in-memory character, sufficient for the flow helpers and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub level: i32,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub gold: u64,
    pub gems: u32,
    pub experience: u64,
}

impl Character {
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            name: name.into(),
            level,
            health: 10 * level.max(1) as u32,
            max_health: 10 * level.max(1) as u32,
            attack: level.max(1) as u32,
            defense: level.max(1) as u32,
            gold: 0,
            gems: 0,
            experience: 0,
        }
    }
}

impl CharacterState for Character {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> i32 {
        self.level
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn set_health(&mut self, health: u32) {
        self.health = health;
    }

    fn max_health(&self) -> u32 {
        self.max_health
    }

    fn attack(&self) -> u32 {
        self.attack
    }

    fn defense(&self) -> u32 {
        self.defense
    }

    fn gold(&self) -> u64 {
        self.gold
    }

    fn add_gold(&mut self, amount: u64) {
        self.gold += amount;
    }

    fn spend_gold(&mut self, amount: u64) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    fn gems(&self) -> u32 {
        self.gems
    }

    fn add_gems(&mut self, count: u32) {
        self.gems += count;
    }

    fn experience(&self) -> u64 {
        self.experience
    }

    fn reward_experience(&mut self, amount: u64) {
        self.experience += amount;
    }

    fn multiply_experience(&mut self, factor: f64) {
        self.experience = (self.experience as f64 * factor).round() as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heal_is_capped_at_max_health() {
        let mut character = Character::new("Aveline", 3);
        character.health = 5;
        character.heal(7);
        assert_eq!(character.health(), 12);
        character.heal(1000);
        assert_eq!(character.health(), character.max_health());
    }

    #[test]
    fn spend_gold_refuses_overdraft() {
        let mut character = Character::new("Aveline", 3);
        character.add_gold(50);
        assert!(!character.spend_gold(51));
        assert_eq!(character.gold(), 50);
        assert!(character.spend_gold(50));
        assert_eq!(character.gold(), 0);
    }

    #[test]
    fn multiply_experience_rounds() {
        let mut character = Character::new("Aveline", 3);
        character.reward_experience(105);
        character.multiply_experience(0.9);
        assert_eq!(character.experience(), 95); // 94.5 rounds up

        // Compounds on repeated deaths, no floor.
        character.multiply_experience(0.9);
        assert_eq!(character.experience(), 86); // 85.5 rounds up
    }
}
