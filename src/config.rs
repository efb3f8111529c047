//! Reward tuning knobs and their three-level precedence chain.
//!
//! Every setting resolves through the first store in the chain that holds a
//! value: scene override first, then the module store, then the hardcoded
//! default. The `*-config-set` CLI commands of the host call into
//! [`set_setting`]; validation happens before any write, so a rejected set
//! leaves the store untouched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// The four admin-tunable reward settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardSetting {
    /// Extra experience per level of a stronger creature.
    ExperienceBonus,
    /// Experience reduction per level of a weaker creature.
    ExperienceMalus,
    /// Probability that a gem drops after a won battle.
    GemDropProbability,
    /// Fraction of total experience lost upon death.
    LostExperienceUponDeath,
}

impl RewardSetting {
    pub const ALL: [RewardSetting; 4] = [
        RewardSetting::ExperienceBonus,
        RewardSetting::ExperienceMalus,
        RewardSetting::GemDropProbability,
        RewardSetting::LostExperienceUponDeath,
    ];

    /// Property key, as surfaced by the config CLI commands.
    pub fn key(self) -> &'static str {
        match self {
            RewardSetting::ExperienceBonus => "experienceBonus",
            RewardSetting::ExperienceMalus => "experienceMalus",
            RewardSetting::GemDropProbability => "gemDropProbability",
            RewardSetting::LostExperienceUponDeath => "lostExperienceUponDeath",
        }
    }

    /// Hardcoded fallback, used when neither scene nor module store has a
    /// value.
    pub fn default_value(self) -> f64 {
        match self {
            RewardSetting::ExperienceBonus => 0.25,
            RewardSetting::ExperienceMalus => 0.25,
            RewardSetting::GemDropProbability => 0.04,
            RewardSetting::LostExperienceUponDeath => 0.1,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RewardSetting::ExperienceBonus => {
                "Additional experience gained for harsher battles (as fraction, should be > 0)"
            }
            RewardSetting::ExperienceMalus => {
                "Experience reduction for easier battles (fraction, should be > 0, must be < 1)"
            }
            RewardSetting::GemDropProbability => {
                "Probability that a gem drops after a battle (0 <= x <= 1)"
            }
            RewardSetting::LostExperienceUponDeath => {
                "Fraction of experience that gets lost after dying (0 <= x <= 1)"
            }
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }
}

/// A value rejected by validation. Nothing is written in this case.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("experience malus cannot be {value}: a malus of 1 or more would cost the character experience in total")]
    MalusTooLarge { value: f64 },
    #[error("gem drop probability must lie between 0 and 1, got {value}")]
    GemProbabilityOutOfRange { value: f64 },
    #[error("lost experience fraction must lie between 0 and 1, got {value}")]
    LossFractionOutOfRange { value: f64 },
    #[error("unknown setting `{0}`")]
    UnknownSetting(String),
}

/// Key/value property storage, one per scope (scene and module). The host
/// persists these; in-process we keep them in a map.
pub trait PropertyStore {
    fn get_property(&self, key: &str) -> Option<f64>;
    fn set_property(&mut self, key: &str, value: f64);
    fn unset_property(&mut self, key: &str);
}

/// In-memory property store with a JSON snapshot for persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryProperties {
    properties: HashMap<String, f64>,
}

impl MemoryProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}

impl PropertyStore for MemoryProperties {
    fn get_property(&self, key: &str) -> Option<f64> {
        self.properties.get(key).copied()
    }

    fn set_property(&mut self, key: &str, value: f64) {
        self.properties.insert(key.to_string(), value);
    }

    fn unset_property(&mut self, key: &str) {
        self.properties.remove(key);
    }
}

/// Resolves one setting through an ordered fallback chain, most specific
/// store first. Falls through to the hardcoded default.
pub fn resolve_setting(setting: RewardSetting, chain: &[&dyn PropertyStore]) -> f64 {
    chain
        .iter()
        .find_map(|store| store.get_property(setting.key()))
        .unwrap_or_else(|| setting.default_value())
}

/// All four settings resolved against one chain, as the reward resolver
/// consumes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardConfig {
    pub experience_bonus: f64,
    pub experience_malus: f64,
    pub gem_drop_probability: f64,
    pub lost_experience_upon_death: f64,
}

impl RewardConfig {
    pub fn resolve(chain: &[&dyn PropertyStore]) -> Self {
        Self {
            experience_bonus: resolve_setting(RewardSetting::ExperienceBonus, chain),
            experience_malus: resolve_setting(RewardSetting::ExperienceMalus, chain),
            gem_drop_probability: resolve_setting(RewardSetting::GemDropProbability, chain),
            lost_experience_upon_death: resolve_setting(
                RewardSetting::LostExperienceUponDeath,
                chain,
            ),
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self::resolve(&[])
    }
}

/// Outcome of an accepted write: the stored value plus an advisory warning
/// for values that are legal but probably not what the admin wanted.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingUpdate {
    pub setting: RewardSetting,
    pub value: f64,
    pub warning: Option<&'static str>,
}

/// Checks a value against the setting's allowed range without writing it.
/// `Ok(Some(_))` carries an advisory warning for an accepted value.
pub fn validate_setting(
    setting: RewardSetting,
    value: f64,
) -> Result<Option<&'static str>, ConfigError> {
    match setting {
        RewardSetting::ExperienceBonus => {
            if value < 0.0 {
                Ok(Some(
                    "A negative bonus factor will lead to less experience earned.",
                ))
            } else {
                Ok(None)
            }
        }
        RewardSetting::ExperienceMalus => {
            if value >= 1.0 {
                Err(ConfigError::MalusTooLarge { value })
            } else if value < 0.0 {
                Ok(Some(
                    "A negative malus factor will lead to more experience earned.",
                ))
            } else {
                Ok(None)
            }
        }
        RewardSetting::GemDropProbability => {
            if !(0.0..=1.0).contains(&value) {
                Err(ConfigError::GemProbabilityOutOfRange { value })
            } else {
                Ok(None)
            }
        }
        RewardSetting::LostExperienceUponDeath => {
            if !(0.0..=1.0).contains(&value) {
                Err(ConfigError::LossFractionOutOfRange { value })
            } else {
                Ok(None)
            }
        }
    }
}

/// Validated write into one store. All-or-nothing: a validation failure
/// returns before anything is stored.
pub fn set_setting(
    store: &mut dyn PropertyStore,
    setting: RewardSetting,
    value: f64,
) -> Result<SettingUpdate, ConfigError> {
    let warning = validate_setting(setting, value)?;
    store.set_property(setting.key(), value);

    if let Some(message) = warning {
        warn!(key = setting.key(), value, "{message}");
    }
    info!(key = setting.key(), value, "setting updated");

    Ok(SettingUpdate {
        setting,
        value,
        warning,
    })
}

/// Resets a module-scope setting back to its hardcoded default.
pub fn reset_setting(store: &mut dyn PropertyStore, setting: RewardSetting) -> SettingUpdate {
    let value = setting.default_value();
    store.set_property(setting.key(), value);
    info!(key = setting.key(), value, "setting reset to default");
    SettingUpdate {
        setting,
        value,
        warning: None,
    }
}

/// Clears a scene-scope override so resolution falls back to the module
/// value (or the hardcoded default).
pub fn clear_override(store: &mut dyn PropertyStore, setting: RewardSetting) {
    store.unset_property(setting.key());
    info!(key = setting.key(), "scene override cleared");
}

/// One row of `*-config-list` output.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingListing {
    pub key: &'static str,
    pub value: f64,
    pub description: &'static str,
}

/// Lists all settings with their effective values under the given chain.
pub fn list_settings(chain: &[&dyn PropertyStore]) -> Vec<SettingListing> {
    RewardSetting::ALL
        .iter()
        .map(|&setting| SettingListing {
            key: setting.key(),
            value: resolve_setting(setting, chain),
            description: setting.description(),
        })
        .collect()
}
