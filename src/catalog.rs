//! The creature catalog.
//!
//! Seeded once at module install from the bundled `res/creatures.csv` and
//! cleared at uninstall. Encounter lookups never hand out the stored
//! template itself: the caller always gets a detached copy with its own
//! health pool, or a synthesized doppelganger when no template matches the
//! requested level.

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::character::CharacterState;
use crate::creature::Creature;

/// The tabular resource the catalog is seeded from at install time.
pub const CREATURES_CSV: &str = include_str!("../res/creatures.csv");

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("line {line}: expected 8 columns (name,weapon,level,attack,defense,maxhealth,experience,gold), got {found}")]
    ColumnCount { line: usize, found: usize },
    #[error("line {line}: column `{column}` is not a number: {value}")]
    BadNumber {
        line: usize,
        column: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct CreatureCatalog {
    creatures: Vec<Creature>,
}

impl CreatureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded from the bundled creature table.
    ///
    /// The bundled resource is validated by the test suite, so a parse
    /// failure here means the resource file itself was broken.
    pub fn bundled() -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.seed_from_csv(CREATURES_CSV)?;
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn insert(&mut self, creature: Creature) {
        self.creatures.push(creature);
    }

    /// Uninstall-time truncation.
    pub fn clear(&mut self) {
        self.creatures.clear();
    }

    /// Parses a creature table and appends every row. The first line is a
    /// header and is skipped; blank lines are ignored. Nothing is appended
    /// if any row fails to parse.
    pub fn seed_from_csv(&mut self, data: &str) -> Result<usize, CatalogError> {
        let mut parsed = Vec::new();

        for (index, row) in data.lines().enumerate().skip(1) {
            let row = row.trim();
            if row.is_empty() {
                continue;
            }
            let line = index + 1;

            let fields: Vec<&str> = row.split(',').map(str::trim).collect();
            if fields.len() != 8 {
                return Err(CatalogError::ColumnCount {
                    line,
                    found: fields.len(),
                });
            }

            let creature = Creature::new(
                fields[0],
                fields[1],
                parse_number(fields[2], line, "level")?,
                parse_number(fields[3], line, "attack")?,
                parse_number(fields[4], line, "defense")?,
                parse_number(fields[5], line, "maxhealth")?,
            )
            .with_rewards(
                parse_number(fields[6], line, "experience")?,
                parse_number(fields[7], line, "gold")?,
            );

            parsed.push(creature);
        }

        let count = parsed.len();
        self.creatures.append(&mut parsed);
        info!(count, "creature catalog seeded");
        Ok(count)
    }

    /// All templates at exactly the given level.
    pub fn find_by_level(&self, level: i32) -> Vec<&Creature> {
        self.creatures.iter().filter(|c| c.level == level).collect()
    }

    /// Picks one creature at the target level, uniformly at random, as a
    /// detached copy with a full health pool. When no template matches, a
    /// doppelganger mirroring the character's stats is synthesized instead,
    /// so an encounter is never impossible.
    pub fn encounter(
        &self,
        target_level: i32,
        character: &dyn CharacterState,
        rng: &mut impl Rng,
    ) -> Creature {
        let candidates = self.find_by_level(target_level);
        if candidates.is_empty() {
            return doppelganger(character);
        }

        let mut creature = candidates[rng.gen_range(0..candidates.len())].clone();
        creature.reset_health();
        creature
    }
}

/// Fallback opponent mirroring the character's own stats. Its rewards fall
/// back to the level tables, like any creature without explicit values.
pub fn doppelganger(character: &dyn CharacterState) -> Creature {
    Creature::new(
        format!("{}'s evil doppelganger", character.name()),
        "Evil aura",
        character.level(),
        character.attack(),
        character.defense(),
        character.max_health(),
    )
}

fn parse_number<T: std::str::FromStr>(
    value: &str,
    line: usize,
    column: &'static str,
) -> Result<T, CatalogError> {
    value.parse().map_err(|_| CatalogError::BadNumber {
        line,
        column,
        value: value.to_string(),
    })
}
