//! Configuration management.
//!
//! Provides the flag set selected on the command line and the policy for
//! failing object blocks. Both are handed to the parser explicitly; nothing
//! in the crate reads them from ambient state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// A collection of flags that can be set via the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags(u32);

impl Flags {
    // cli
    pub const INTERACTIVE: Flags = Flags(1 << 0);

    // logging/verbosity
    pub const SHOW_WARNINGS: Flags = Flags(1 << 1);
    pub const SHOW_INFOS: Flags = Flags(1 << 2);
    pub const SHOW_DEBUG: Flags = Flags(1 << 3);
    pub const QUIET: Flags = Flags(1 << 4);

    // info included in the calendar
    pub const DISPLAY_PLACE: Flags = Flags(1 << 5);
    pub const DISPLAY_COORDINATE: Flags = Flags(1 << 6);
    pub const DISPLAY_EQUINOX: Flags = Flags(1 << 7);
    pub const DISPLAY_DELTA_T: Flags = Flags(1 << 8);

    pub const NONE: Flags = Flags(0);

    /// Every named flag
    pub const NAMED: &'static [(&'static str, Flags)] = &[
        ("INTERACTIVE", Self::INTERACTIVE),
        ("SHOW_WARNINGS", Self::SHOW_WARNINGS),
        ("SHOW_INFOS", Self::SHOW_INFOS),
        ("SHOW_DEBUG", Self::SHOW_DEBUG),
        ("QUIET", Self::QUIET),
        ("DISPLAY_PLACE", Self::DISPLAY_PLACE),
        ("DISPLAY_COORDINATE", Self::DISPLAY_COORDINATE),
        ("DISPLAY_EQUINOX", Self::DISPLAY_EQUINOX),
        ("DISPLAY_DELTA_T", Self::DISPLAY_DELTA_T),
    ];

    pub const ALL: Flags = {
        let mut bits = 0;
        let mut i = 0;
        while i < Self::NAMED.len() {
            bits |= (Self::NAMED[i].1).0;
            i += 1;
        }
        Flags(bits)
    };

    pub const DEFAULT: Flags =
        Flags(Self::INTERACTIVE.0 | Self::SHOW_WARNINGS.0 | Self::DISPLAY_PLACE.0);

    /// Raw bit value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build from raw bits, dropping bits that belong to no named flag
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Flags(bits & Self::ALL.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check whether every flag in `other` is set
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Flags) {
        self.0 &= !other.0;
    }

    /// Set or clear `other` depending on `value`
    pub fn set(&mut self, other: Flags, value: bool) {
        if value {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }

    /// Iterate over the names of the named flags that are set
    pub fn iter_names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .iter()
            .filter(move |(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
    }

    /// Determine the tracing level from the verbosity flags
    pub fn log_level(self) -> &'static str {
        if self.contains(Self::QUIET) {
            "error"
        } else if self.contains(Self::SHOW_DEBUG) {
            "debug"
        } else if self.contains(Self::SHOW_INFOS) {
            "info"
        } else if self.contains(Self::SHOW_WARNINGS) {
            "warn"
        } else {
            "error"
        }
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Flags {
    type Output = Flags;

    fn bitand(self, rhs: Flags) -> Flags {
        Flags(self.0 & rhs.0)
    }
}

impl Not for Flags {
    type Output = Flags;

    /// Complement within the named flags only
    fn not(self) -> Flags {
        Flags(!self.0 & Self::ALL.0)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let names: Vec<&str> = self.iter_names().collect();
        write!(f, "{}", names.join(" | "))
    }
}

/// What to do when one object block fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockErrorPolicy {
    /// Stop and return the block's error
    #[default]
    Abort,
    /// Record the failure and continue with the next block
    SkipAndContinue,
}

/// Parser configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Flags selected on the command line
    pub flags: Flags,

    /// Handling of failing object blocks
    pub block_error_policy: BlockErrorPolicy,
}

impl Config {
    /// Create configuration with the given flag set
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Create configuration with the given block error policy
    pub fn with_block_error_policy(mut self, policy: BlockErrorPolicy) -> Self {
        self.block_error_policy = policy;
        self
    }

    /// Skip failing blocks instead of aborting
    pub fn skipping_invalid_blocks(self) -> Self {
        self.with_block_error_policy(BlockErrorPolicy::SkipAndContinue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_union_of_named_flags() {
        let mut union = Flags::NONE;
        for (_, flag) in Flags::NAMED {
            union |= *flag;
        }
        assert_eq!(Flags::ALL, union);
        assert_eq!(Flags::ALL.bits(), 0b1_1111_1111);
    }

    #[test]
    fn test_default_flags() {
        let flags = Flags::default();
        assert!(flags.contains(Flags::INTERACTIVE));
        assert!(flags.contains(Flags::SHOW_WARNINGS));
        assert!(flags.contains(Flags::DISPLAY_PLACE));
        assert!(!flags.contains(Flags::DISPLAY_EQUINOX));
        assert_eq!(flags.to_string(), "INTERACTIVE | SHOW_WARNINGS | DISPLAY_PLACE");
    }

    #[test]
    fn test_complement_stays_within_named_flags() {
        assert_eq!(!Flags::NONE, Flags::ALL);
        assert_eq!(!Flags::ALL, Flags::NONE);
        assert_eq!(Flags::from_bits_truncate(u32::MAX), Flags::ALL);
        assert_eq!(!Flags::DEFAULT | Flags::DEFAULT, Flags::ALL);
    }

    #[test]
    fn test_insert_remove_set() {
        let mut flags = Flags::NONE;
        flags.insert(Flags::QUIET);
        flags.set(Flags::DISPLAY_DELTA_T, true);
        assert!(flags.contains(Flags::QUIET | Flags::DISPLAY_DELTA_T));
        flags.remove(Flags::QUIET);
        flags.set(Flags::DISPLAY_DELTA_T, false);
        assert!(flags.is_empty());
        assert_eq!(flags.to_string(), "NONE");
    }

    #[test]
    fn test_log_level() {
        assert_eq!(Flags::DEFAULT.log_level(), "warn");
        assert_eq!((Flags::DEFAULT | Flags::SHOW_INFOS).log_level(), "info");
        assert_eq!((Flags::SHOW_INFOS | Flags::SHOW_DEBUG).log_level(), "debug");
        assert_eq!((Flags::ALL).log_level(), "error");
        assert_eq!(Flags::NONE.log_level(), "error");
    }

    #[test]
    fn test_config_builders() {
        let config = Config::default();
        assert_eq!(config.block_error_policy, BlockErrorPolicy::Abort);
        assert_eq!(config.flags, Flags::DEFAULT);

        let config = Config::default()
            .with_flags(Flags::QUIET)
            .skipping_invalid_blocks();
        assert_eq!(config.flags, Flags::QUIET);
        assert_eq!(config.block_error_policy, BlockErrorPolicy::SkipAndContinue);
    }
}
