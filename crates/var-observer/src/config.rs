#![forbid(unsafe_code)]

//! Registry configuration: the debug flag and the reserved-name set.
//!
//! Reserved names are data rather than logic so hosts can extend them with
//! their own built-in member names.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment variable consulted by [`ObserverConfig::from_env`].
pub const DEBUG_ENV_VAR: &str = "VAR_OBSERVER_DEBUG";

/// Names that can never be registered as variables by default.
pub const DEFAULT_RESERVED: [&str; 5] = [
    "debug",
    "prototype",
    "hasOwnProperty",
    "constructor",
    "propertyIsEnumerable",
];

#[inline]
fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// A set of names rejected by variable-name validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ReservedNames {
    names: BTreeSet<String>,
}

impl Default for ReservedNames {
    fn default() -> Self {
        DEFAULT_RESERVED.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ReservedNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl ReservedNames {
    /// An empty set: only the empty name is rejected.
    #[must_use]
    pub fn none() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Add a name to the set. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate the reserved names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether `name` may be used as a variable name.
    #[must_use]
    pub fn permits(&self, name: &str) -> bool {
        !name.is_empty() && !self.contains(name)
    }
}

/// Configuration for a [`VariableObserver`](crate::VariableObserver).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObserverConfig {
    /// Emit a `tracing` debug event for state-changing operations.
    pub debug: bool,
    /// Names rejected by `add`.
    pub reserved: ReservedNames,
}

impl ObserverConfig {
    /// Default configuration: debug off, default reserved names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with `debug` taken from [`DEBUG_ENV_VAR`].
    ///
    /// Accepts `1`, `true`, `yes`, `on` (any case). Unset or anything else
    /// leaves debug off.
    #[must_use]
    pub fn from_env() -> Self {
        let debug = std::env::var(DEBUG_ENV_VAR)
            .map(|v| env_flag(&v))
            .unwrap_or(false);
        Self::default().with_debug(debug)
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Replace the reserved-name set.
    #[must_use]
    pub fn with_reserved(mut self, reserved: ReservedNames) -> Self {
        self.reserved = reserved;
        self
    }

    /// Extend the reserved-name set with one more name.
    #[must_use]
    pub fn reserve(mut self, name: impl Into<String>) -> Self {
        self.reserved.insert(name);
        self
    }
}
