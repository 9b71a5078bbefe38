//! Bridge configuration.
//!
//! # Example
//!
//! ```
//! use horizon_semantics::SemanticsConfig;
//!
//! let config = SemanticsConfig::from_toml_str(r#"
//!     locale = "en-GB"
//!     dynamic_action_base = 0x40000000
//! "#)?;
//!
//! assert_eq!(config.locale().to_string(), "en-GB");
//! let registry = config.build_registry()?;
//! assert_eq!(registry.base().get(), 0x4000_0000);
//! # Ok::<(), horizon_semantics::Error>(())
//! ```

use serde::Deserialize;

use horizon_semantics_core::{ActionId, ActionRegistry};

use crate::error::Result;
use crate::locale::Locale;

/// Runtime settings for the accessibility bridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SemanticsConfig {
    /// Locale tag overriding the system locale.
    pub locale: Option<String>,
    /// First ID handed out to non-reserved action names.
    pub dynamic_action_base: i32,
}

impl Default for SemanticsConfig {
    fn default() -> Self {
        Self {
            locale: None,
            dynamic_action_base: ActionId::DYNAMIC_BASE.get(),
        }
    }
}

impl SemanticsConfig {
    /// Parse a configuration from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// The configured locale, or the system locale.
    pub fn locale(&self) -> Locale {
        match &self.locale {
            Some(tag) => Locale::parse(tag),
            None => Locale::current(),
        }
    }

    /// Build an empty action registry seeded at the configured base.
    pub fn build_registry(&self) -> Result<ActionRegistry> {
        Ok(ActionRegistry::with_base(self.dynamic_action_base)?)
    }
}
