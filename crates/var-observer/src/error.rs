#![forbid(unsafe_code)]

//! Error type shared by every registry operation.
//!
//! # Failure Modes
//!
//! | Error | Raised by | Cause |
//! |-------|-----------|-------|
//! | `InvalidName` | `add`, `declare`, `add_with` | Empty or reserved name |
//! | `MissingParameter` | cursor-resolving calls | No valid name and no selection |
//! | `InvalidSelection` | `select` | No name given |
//! | `ListenerTypeError` | `add_listener` | Param absent, or hook of the wrong kind |
//! | `ListenerMissing` | `add_listener` | Name given but no listener |
//! | `UnknownVariable` | accessors, dangling selection | Name has no slot |
//!
//! Every operation validates before mutating, so an `Err` always leaves the
//! registry exactly as it was.

use crate::slot::HookKind;

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, ObserverError>;

/// Errors from [`VariableObserver`](crate::VariableObserver) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverError {
    /// The name is empty or in the reserved set.
    InvalidName(String),
    /// No explicit, existing variable name was given and nothing is selected.
    MissingParameter,
    /// `select` was called without a name.
    InvalidSelection,
    /// The listener parameter was neither a hook nor a name, or the hook
    /// does not match the requested kind.
    ListenerTypeError {
        expected: HookKind,
        found: Option<HookKind>,
    },
    /// A target name was given but the listener itself was absent.
    ListenerMissing,
    /// The variable has no slot in this registry.
    UnknownVariable(String),
}

impl std::fmt::Display for ObserverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(name) => write!(f, "invalid variable name: {name:?}"),
            Self::MissingParameter => {
                write!(f, "a variable name must be given or selected by chaining")
            }
            Self::InvalidSelection => write!(f, "a variable name must be given to select"),
            Self::ListenerTypeError { expected, found } => match found {
                Some(found) => write!(
                    f,
                    "improperly defined listener: expected {expected} hook, got {found} hook"
                ),
                None => write!(f, "improperly defined listener: expected {expected} hook"),
            },
            Self::ListenerMissing => write!(f, "the listener was not properly defined"),
            Self::UnknownVariable(name) => write!(f, "unknown variable: {name:?}"),
        }
    }
}

impl std::error::Error for ObserverError {}
