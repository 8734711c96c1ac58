//! Engine configuration.
//!
//! Engines are configured from a small TOML document; every key is optional.
//!
//! ```toml
//! depth = 3      # search depth in plies
//! seed = 42      # seed for engines that make random choices
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Depth used when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Search depth in plies (half-moves)
    pub depth: u8,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}
