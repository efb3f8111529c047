//! Creature definitions and the experience reward scaling.
//!
//! Creatures either come out of the catalog (seeded from `res/creatures.csv`)
//! or are synthesized as a doppelganger of the player. Experience and gold
//! fall back to static by-level tables when a creature carries no explicit
//! value.

use serde::{Deserialize, Serialize};

/// Base experience granted per creature level (levels 1-18).
///
/// Levels outside the table yield 0. The level 13 dip (135, below level 12's
/// 141) is carried over verbatim from the original data.
pub const EXPERIENCE_BY_LEVEL: [i64; 18] = [
    14, 24, 34, 45, 55, 66, 77, 89, 101, 114, 127, 141, 135, 172, 189, 207, 223, 249,
];

/// Base gold granted per creature level (levels 1-18).
///
/// The collapse at level 17 (36, down from 563) breaks the curve but matches
/// the original table; it is kept as-is pending product-owner confirmation.
pub const GOLD_BY_LEVEL: [i64; 18] = [
    36, 58, 82, 108, 136, 167, 201, 238, 278, 321, 368, 419, 474, 516, 541, 563, 36, 0,
];

/// Table lookup with absent-key-is-zero semantics. No interpolation beyond
/// the table's domain.
fn table_lookup(table: &[i64; 18], level: i32) -> i64 {
    if (1..=18).contains(&level) {
        table[(level - 1) as usize]
    } else {
        0
    }
}

/// Base experience for a creature level, 0 outside the table.
pub fn experience_for_level(level: i32) -> i64 {
    table_lookup(&EXPERIENCE_BY_LEVEL, level)
}

/// Base gold for a creature level, 0 outside the table.
pub fn gold_for_level(level: i32) -> i64 {
    table_lookup(&GOLD_BY_LEVEL, level)
}

/// Experience earned for a kill, scaled by the level difference between
/// creature and character.
///
/// A stronger creature grants `base * bonus_factor` extra experience per
/// level of difference; a weaker one costs `base * malus_factor` per level.
/// Rounding is half-away-from-zero (`f64::round`). A win always grants at
/// least 1 experience point.
///
/// Returns `(total, bonus)`; the bonus component is signed and reported
/// separately so callers can render gain/loss messages.
pub fn compute_experience(
    creature_level: i32,
    base_experience: i64,
    character_level: i32,
    bonus_factor: f64,
    malus_factor: f64,
) -> (i64, i64) {
    let level_difference = (creature_level - character_level) as i64;

    let bonus = match level_difference {
        d if d < 0 => (base_experience as f64 * malus_factor * d as f64).round() as i64,
        d if d > 0 => (base_experience as f64 * bonus_factor * d as f64).round() as i64,
        _ => 0,
    };

    let total = base_experience + bonus;
    if total <= 0 {
        (1, bonus)
    } else {
        (total, bonus)
    }
}

/// A creature template or a detached per-encounter copy of one.
///
/// Catalog records are never fought directly; encounters clone them so the
/// health pool of the copy is independent of the stored template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub weapon: String,
    pub level: i32,
    pub attack: u32,
    pub defense: u32,
    pub max_health: u32,
    pub health: u32,
    /// Explicit experience override; table fallback when `None`.
    #[serde(default)]
    pub base_experience: Option<i64>,
    /// Explicit gold override; table fallback when `None`.
    #[serde(default)]
    pub base_gold: Option<i64>,
}

impl Creature {
    pub fn new(
        name: impl Into<String>,
        weapon: impl Into<String>,
        level: i32,
        attack: u32,
        defense: u32,
        max_health: u32,
    ) -> Self {
        Self {
            name: name.into(),
            weapon: weapon.into(),
            level,
            attack,
            defense,
            max_health,
            health: max_health,
            base_experience: None,
            base_gold: None,
        }
    }

    pub fn with_rewards(mut self, experience: i64, gold: i64) -> Self {
        self.base_experience = Some(experience);
        self.base_gold = Some(gold);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn reset_health(&mut self) {
        self.health = self.max_health;
    }

    /// Unscaled experience value: the explicit override, or the table entry
    /// for this creature's level.
    pub fn experience_value(&self) -> i64 {
        self.base_experience
            .unwrap_or_else(|| experience_for_level(self.level))
    }

    /// Unscaled gold value: the explicit override, or the table entry.
    pub fn gold_value(&self) -> i64 {
        self.base_gold.unwrap_or_else(|| gold_for_level(self.level))
    }

    /// Level-scaled experience for defeating this creature.
    /// Returns `(total, bonus)` as in [`compute_experience`].
    pub fn experience_reward(
        &self,
        character_level: i32,
        bonus_factor: f64,
        malus_factor: f64,
    ) -> (i64, i64) {
        compute_experience(
            self.level,
            self.experience_value(),
            character_level,
            bonus_factor,
            malus_factor,
        )
    }
}
