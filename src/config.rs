// Engine configuration loaded from TOML.

use crate::dialogue::{DEFAULT_DELAY_MS, DEFAULT_START};
use crate::error::ConfigError;
use crate::pricing::{IndustryPricing, PricingTable};
use serde::Deserialize;
use std::path::Path;

/// Largest accepted minimum order for shared leads.
pub const MAX_SHARED_MINIMUM: u32 = 100_000;

/// Settings shared by every conversation an engine serves.
///
/// ```toml
/// default_delay_ms = 1200
/// start_node = "welcome"
/// strict_validation = true
///
/// [[pricing]]
/// name = "Zonnepanelen"
/// exclusive = { tier_30 = 4000, tier_50 = 3750, tier_75 = 3500 }
/// shared = { price = 1200, minimum = 250 }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay for nodes that do not set their own.
    pub default_delay_ms: u64,
    pub start_node: String,
    /// Refuse to build graphs with dangling transitions.
    pub strict_validation: bool,
    /// Entries replace or extend the built-in price table.
    pub pricing: Vec<IndustryPricing>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_delay_ms: DEFAULT_DELAY_MS,
            start_node: DEFAULT_START.to_string(),
            strict_validation: true,
            pricing: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The built-in price table with this configuration's overrides applied.
    pub fn pricing_table(&self) -> PricingTable {
        let mut table = PricingTable::default();
        for pricing in &self.pricing {
            table.insert(pricing.clone());
        }
        table
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.start_node.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "start_node".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.default_delay_ms > 60_000 {
            return Err(ConfigError::ValidationError {
                field: "default_delay_ms".to_string(),
                message: format!("{} ms is longer than a minute", self.default_delay_ms),
            });
        }
        for pricing in &self.pricing {
            let tiers = &pricing.exclusive;
            if !(tiers.tier_30 >= tiers.tier_50 && tiers.tier_50 >= tiers.tier_75) {
                return Err(ConfigError::ValidationError {
                    field: format!("pricing.{}.exclusive", pricing.name),
                    message: "tier prices must not increase with volume".to_string(),
                });
            }
            if !(1..=MAX_SHARED_MINIMUM).contains(&pricing.shared.minimum) {
                return Err(ConfigError::ValidationError {
                    field: format!("pricing.{}.shared.minimum", pricing.name),
                    message: format!("must be between 1 and {}", MAX_SHARED_MINIMUM),
                });
            }
        }
        Ok(())
    }
}
