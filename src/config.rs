//! Engine configuration
//!
//! Settings come from built-in defaults, optionally overlaid by a TOML file.
//! Every field has a default, so a file only needs the keys it changes:
//!
//! ```toml
//! board_size = 4
//! tt_entries = 2000000
//! seed = "0x9e3779b97f4a7c15"
//! ```
//!
//! TOML integers are signed 64-bit, so a seed may also be given as a hex or
//! decimal string to cover the whole `u64` range. A plain integer still works
//! for seeds up to `i64::MAX`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{MAX_SIDE, MIN_SIDE};
use crate::error::{EngineError, Result};
use crate::search::DEFAULT_SEED;

/// Table size cap (about 1.6 GB of entries on 64-bit targets)
pub const MAX_TT_ENTRIES: usize = 100_000_000;

/// Default transposition table size for a board side length.
///
/// 3x3 and 4x4 use measured sizes; larger boards extrapolate with exponent
/// 9.4 from the 4x4 size, capped at [`MAX_TT_ENTRIES`].
pub fn default_tt_entries(board_size: usize) -> usize {
    match board_size {
        0..=3 => 100_000,
        4 => 1_500_000,
        n => {
            let scaled = 1_500_000.0 * (n as f64 / 4.0).powf(9.4);
            if scaled >= MAX_TT_ENTRIES as f64 {
                MAX_TT_ENTRIES
            } else {
                scaled as usize
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Board side length (3..=8)
    pub board_size: usize,
    /// Transposition table capacity in entries; 0 disables the table
    pub tt_entries: usize,
    /// Zobrist key seed
    #[serde(with = "seed_format")]
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::for_board_size(3)
    }
}

impl EngineConfig {
    /// Defaults for a board side length, with the matching table size.
    pub fn for_board_size(board_size: usize) -> Self {
        Self {
            board_size,
            tt_entries: default_tt_entries(board_size),
            seed: DEFAULT_SEED,
        }
    }

    /// Parse and validate a TOML document.
    ///
    /// A document that sets `board_size` without `tt_entries` gets the table
    /// size for that board, not the 3x3 default.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(s)?;
        let board_size = raw.board_size.unwrap_or(3);
        let config = Self {
            board_size,
            tt_entries: raw
                .tt_entries
                .unwrap_or_else(|| default_tt_entries(board_size)),
            seed: raw.seed.unwrap_or(DEFAULT_SEED),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_SIDE..=MAX_SIDE).contains(&self.board_size) {
            return Err(EngineError::InvalidBoardSize(self.board_size));
        }
        if self.tt_entries > MAX_TT_ENTRIES {
            return Err(EngineError::Config(format!(
                "tt_entries {} exceeds the maximum of {MAX_TT_ENTRIES}",
                self.tt_entries
            )));
        }
        Ok(())
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| EngineError::Config(e.to_string()))
    }
}

/// File form with every key optional, so defaults can depend on `board_size`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    board_size: Option<usize>,
    tt_entries: Option<usize>,
    #[serde(deserialize_with = "seed_format::deserialize_opt")]
    seed: Option<u64>,
}

/// Parse a seed written as decimal or as `0x`-prefixed hex.
pub fn parse_seed(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse(),
    };
    parsed.map_err(|e| format!("invalid seed {s:?}: {e}"))
}

/// Seeds are written as hex strings; integers and decimal strings are read too.
mod seed_format {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SeedRepr {
        Int(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(seed: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{seed:#018x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match SeedRepr::deserialize(deserializer)? {
            SeedRepr::Int(seed) => Ok(seed),
            SeedRepr::Text(text) => super::parse_seed(&text).map_err(de::Error::custom),
        }
    }

    pub fn deserialize_opt<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        deserialize(deserializer).map(Some)
    }
}
