#![forbid(unsafe_code)]

//! Named variables with read/write interception.
//!
//! [`VariableObserver`] registers variables by name, runs a get hook on
//! every read and a change hook on every write, and can lock a variable so
//! writes are ignored. Configuration calls chain, and the name can be left
//! out of a call to reuse the variable selected by the previous one:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use var_observer::prelude::*;
//!
//! # fn main() -> var_observer::Result<()> {
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&log);
//!
//! let mut vars = VariableObserver::new();
//! vars.add_with("x", 0, move |new, old| sink.borrow_mut().push((*old, *new)))?;
//! vars.set("x", 5)?.set("x", 5)?;
//! assert_eq!(*log.borrow(), vec![(0, 5), (5, 5)]);
//!
//! vars.lock(None)?.set("x", 9)?;
//! assert_eq!(vars.get("x")?, 5);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`registry`]: the registry itself.
//! - [`slot`]: hook types and hook kinds.
//! - [`listener`]: call shapes for [`VariableObserver::add_listener`].
//! - [`config`]: debug flag and reserved names.
//! - [`error`]: [`ObserverError`].
//!
//! # Logging
//!
//! With `debug` enabled, lock changes, silencing, and listener attachment
//! emit `tracing` events at debug level under the `var_observer` target.
//! Rejected names and ignored writes are reported at trace level. No
//! subscriber is installed by this crate.

pub mod config;
pub mod error;
pub mod listener;
pub mod registry;
pub mod slot;

pub use config::{DEBUG_ENV_VAR, DEFAULT_RESERVED, ObserverConfig, ReservedNames};
pub use error::{ObserverError, Result};
pub use listener::ListenerParam;
pub use registry::VariableObserver;
pub use slot::{ChangeHook, GetHook, Hook, HookKind};

/// Everything needed to build and drive a registry.
pub mod prelude {
    pub use crate::{
        Hook, HookKind, ListenerParam, ObserverConfig, ObserverError, ReservedNames,
        VariableObserver,
    };
}
