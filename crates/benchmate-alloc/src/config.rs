// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Allocator configuration.
//!
//! Defaults reproduce the reference numbering and validation behavior exactly.
//! A configuration can be built in code with the chained setters or loaded from
//! a TOML document in which every key is optional:
//!
//! ```toml
//! benches_per_row = 10
//!
//! [validator]
//! pair_key = "ordered"          # or "unordered"
//! detect_seat_reuse = false
//! detect_duplicate_positions = false
//! ```

use crate::{
    assign::DEFAULT_BENCHES_PER_ROW,
    error::ConfigError,
    validate::{PairKeyMode, ValidatorConfig},
};
use serde::{Deserialize, Serialize};
use std::{num::NonZeroU32, path::Path};

/// Settings for one `Allocator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllocatorConfig {
    /// A new row block opens every `benches_per_row` bench numbers.
    pub benches_per_row: NonZeroU32,
    /// Checks applied to the produced plan.
    pub validator: ValidatorConfig,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            benches_per_row: DEFAULT_BENCHES_PER_ROW,
            validator: ValidatorConfig::default(),
        }
    }
}

impl AllocatorConfig {
    /// Creates the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML, unknown keys, or a
    /// `benches_per_row` of zero.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Parse` as for `from_toml_str`.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Sets the row block width.
    #[inline]
    pub fn benches_per_row(mut self, benches_per_row: NonZeroU32) -> Self {
        self.benches_per_row = benches_per_row;
        self
    }

    /// Replaces the validator settings.
    #[inline]
    pub fn validator(mut self, validator: ValidatorConfig) -> Self {
        self.validator = validator;
        self
    }

    /// Sets how duplicate pairings are keyed.
    #[inline]
    pub fn pair_key(mut self, pair_key: PairKeyMode) -> Self {
        self.validator.pair_key = pair_key;
        self
    }

    /// Enables or disables the seat reuse check.
    #[inline]
    pub fn detect_seat_reuse(mut self, enabled: bool) -> Self {
        self.validator.detect_seat_reuse = enabled;
        self
    }

    /// Enables or disables the duplicate bench position check.
    #[inline]
    pub fn detect_duplicate_positions(mut self, enabled: bool) -> Self {
        self.validator.detect_duplicate_positions = enabled;
        self
    }
}

impl std::fmt::Display for AllocatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AllocatorConfig(benches_per_row: {}, pair_key: {:?}, seat_reuse: {}, duplicate_positions: {})",
            self.benches_per_row,
            self.validator.pair_key,
            self.validator.detect_seat_reuse,
            self.validator.detect_duplicate_positions
        )
    }
}
