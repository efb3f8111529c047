//! The healer's hut: potion pricing and the healing transaction.
//!
//! Pricing scales with level and missing health:
//! `cost = round(ln(level) * (10 + damage))`. At level 1 the logarithm is
//! zero, so complete healing is free.

use thiserror::Error;
use tracing::debug;

use crate::character::CharacterState;

const BASE_COST: f64 = 10.0;

#[derive(Debug, Error, PartialEq)]
pub enum HealError {
    #[error("the dead cannot be healed")]
    Dead,
    #[error("healing costs {cost} gold, more than the character carries")]
    NotEnoughGold { cost: u64 },
}

/// Cost of a complete heal for this character.
pub fn heal_costs(character: &dyn CharacterState) -> u64 {
    let damage = character.max_health().saturating_sub(character.health());
    let log_level = f64::from(character.level().max(1)).ln();
    (log_level * (BASE_COST + f64::from(damage))).round() as u64
}

/// One potion on offer: heal a percentage of the missing health for a
/// proportional share of the full cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealOffer {
    pub percentage: u32,
    pub heal_amount: u32,
    pub cost: u64,
}

/// The potions currently on offer: a complete heal, then bargain potions in
/// 10% steps. Steps whose rounded heal amount duplicates an earlier offer
/// are dropped, and once a step heals nothing the smaller ones are too.
/// A dead or unharmed character gets no offers; health above the maximum is
/// clamped down on the spot.
pub fn heal_offers(character: &mut dyn CharacterState) -> Vec<HealOffer> {
    if !character.is_alive() {
        return Vec::new();
    }
    if character.health() > character.max_health() {
        character.set_health(character.max_health());
        return Vec::new();
    }

    let damage = character.max_health() - character.health();
    if damage == 0 {
        return Vec::new();
    }

    let full_cost = heal_costs(character);
    let mut offers = vec![HealOffer {
        percentage: 100,
        heal_amount: damage,
        cost: full_cost,
    }];
    let mut offered_amounts = vec![damage];

    for step in (1u32..=9).rev() {
        let percentage = step * 10;
        let heal_amount = (f64::from(damage) * f64::from(percentage) / 100.0).round() as u32;

        if heal_amount == 0 {
            break;
        }
        if offered_amounts.contains(&heal_amount) {
            continue;
        }
        offered_amounts.push(heal_amount);

        offers.push(HealOffer {
            percentage,
            heal_amount,
            cost: (full_cost as f64 * f64::from(percentage) / 100.0).round() as u64,
        });
    }

    offers
}

/// Receipt of a completed healing transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealReceipt {
    pub healed: u32,
    pub cost: u64,
}

/// Buys and drinks a potion healing `percentage` of the missing health.
/// Rejected without touching gold or health when the character is dead or
/// cannot afford it.
pub fn apply_healing(
    character: &mut dyn CharacterState,
    percentage: u32,
) -> Result<HealReceipt, HealError> {
    if !character.is_alive() {
        return Err(HealError::Dead);
    }

    let damage = character.max_health().saturating_sub(character.health());
    let heal_amount = (f64::from(damage) * f64::from(percentage) / 100.0).round() as u32;
    let cost = (heal_costs(character) as f64 * f64::from(percentage) / 100.0).round() as u64;

    if !character.spend_gold(cost) {
        return Err(HealError::NotEnoughGold { cost });
    }

    character.heal(heal_amount);
    debug!(heal_amount, cost, "character healed");

    Ok(HealReceipt {
        healed: heal_amount,
        cost,
    })
}
