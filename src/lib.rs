//! Forest - a forest and healer's hut content module for a browser RPG.
//!
//! The crate covers the module's game logic: picking a level-appropriate
//! opponent for a player-chosen difficulty, computing experience, gold and
//! gem rewards once a battle resolves, the healer's potion pricing, and the
//! admin-tunable reward configuration with its scene-over-module precedence.
//! Persistence, scene-graph wiring and combat simulation stay with the host
//! engine; this crate talks to them through the [`character::CharacterState`]
//! and [`config::PropertyStore`] seams.
//!
//! All randomness flows through injected `rand` generators, so every draw is
//! reproducible under a seeded generator.

pub mod catalog;
pub mod character;
pub mod config;
pub mod creature;
pub mod encounter;
pub mod forest;
pub mod healer;
pub mod rewards;
