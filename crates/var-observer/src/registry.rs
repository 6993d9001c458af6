#![forbid(unsafe_code)]

//! The variable registry: named slots, hook dispatch, and the selection
//! cursor used for chained configuration.
//!
//! # Design
//!
//! [`VariableObserver<T>`] maps variable names to private slots. Every read
//! goes through [`get`](VariableObserver::get) or
//! [`with`](VariableObserver::with) and every write through
//! [`set`](VariableObserver::set), so hooks fire on each access; the slot
//! map itself is never exposed.
//!
//! Configuration calls take an optional name and fall back to the current
//! selection, which makes chains like the following possible:
//!
//! ```
//! use var_observer::VariableObserver;
//!
//! # fn main() -> var_observer::Result<()> {
//! let mut vars = VariableObserver::new();
//! vars.add("a", 1)?.add("b", 2)?.lock("a")?.unlock(None)?;
//! assert_eq!(vars.selected(), Some("a"));
//! assert!(!vars.is_locked("a")?);
//! # Ok(())
//! # }
//! ```
//!
//! # Invariants
//!
//! 1. Every registered name passed validation (non-empty, not reserved).
//! 2. `add`, a resolved name, and `end` leave the cursor naming an existing
//!    slot or nothing. Only `select` can point it elsewhere.
//! 3. A read runs the get hook exactly once before the value is returned.
//! 4. A write to a locked slot changes nothing and runs no hook. Otherwise
//!    the change hook sees `(new, old)` and then the value is replaced.
//! 5. A failed call mutates nothing.
//!
//! # Failure Modes
//!
//! - **Unknown name in a chained call**: an explicit name with no slot is
//!   ignored and the previous selection is used instead. Check with
//!   [`contains`](VariableObserver::contains) first if that matters.
//! - **Dangling selection**: `select` accepts names with no slot. A later
//!   call that resolves to it fails with `UnknownVariable`.
//! - **Panicking hook**: unwinds through `get`/`set` to the caller. A change
//!   hook that panics leaves the old value in place.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::config::ObserverConfig;
use crate::error::{ObserverError, Result};
use crate::listener::ListenerParam;
use crate::slot::{ChangeHook, Hook, HookKind, Slot};

/// A registry of observed variables with per-variable read/write hooks.
///
/// Values are read with [`get`](Self::get) / [`with`](Self::with) and
/// written with [`set`](Self::set). Configuration methods return
/// `&mut Self` so calls chain with `?`.
pub struct VariableObserver<T> {
    slots: HashMap<String, Slot<T>>,
    /// Currently selected variable, for chaining.
    cursor: Option<String>,
    config: ObserverConfig,
}

impl<T: fmt::Debug> fmt::Debug for VariableObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableObserver")
            .field("variables", &self.slots.len())
            .field("selected", &self.cursor)
            .field("debug", &self.config.debug)
            .finish()
    }
}

impl<T: 'static> Default for VariableObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> VariableObserver<T> {
    /// An empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ObserverConfig::default())
    }

    #[must_use]
    pub fn with_config(config: ObserverConfig) -> Self {
        Self {
            slots: HashMap::new(),
            cursor: None,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    /// Whether diagnostic events are emitted.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.config.debug
    }

    pub fn set_debug(&mut self, debug: bool) -> &mut Self {
        self.config.debug = debug;
        self
    }

    // -- registration ------------------------------------------------------

    /// Register `name` with an initial value and no change hook.
    ///
    /// An existing variable of the same name is replaced outright: its
    /// hooks and lock state are discarded. Selects `name`.
    pub fn add(&mut self, name: impl Into<String>, value: T) -> Result<&mut Self> {
        self.insert(name.into(), value, None)
    }

    /// Register `name` with an initial value and a change hook.
    pub fn add_with(
        &mut self,
        name: impl Into<String>,
        value: T,
        on_change: impl Fn(&T, &T) + 'static,
    ) -> Result<&mut Self> {
        let hook: ChangeHook<T> = Rc::new(on_change);
        self.insert(name.into(), value, Some(hook))
    }

    /// Register `name` holding `T::default()`.
    pub fn declare(&mut self, name: impl Into<String>) -> Result<&mut Self>
    where
        T: Default,
    {
        self.insert(name.into(), T::default(), None)
    }

    fn insert(
        &mut self,
        name: String,
        value: T,
        on_change: Option<ChangeHook<T>>,
    ) -> Result<&mut Self> {
        if !self.config.reserved.permits(&name) {
            tracing::trace!(variable = %name, "variable observer: rejected name");
            return Err(ObserverError::InvalidName(name));
        }
        self.slots.insert(name.clone(), Slot::new(value, on_change));
        self.cursor = Some(name);
        Ok(self)
    }

    /// Drop a variable and its hooks, returning its value without running
    /// the get hook. Clears the selection if it named this variable.
    pub fn remove(&mut self, name: &str) -> Result<T> {
        let slot = self
            .slots
            .remove(name)
            .ok_or_else(|| ObserverError::UnknownVariable(name.to_string()))?;
        if self.cursor.as_deref() == Some(name) {
            self.cursor = None;
        }
        Ok(slot.into_value())
    }

    // -- access ------------------------------------------------------------

    /// Read a variable: runs its get hook, then returns a clone.
    pub fn get(&self, name: &str) -> Result<T>
    where
        T: Clone,
    {
        self.with(name, T::clone)
    }

    /// Read a variable by reference: runs its get hook, then calls `f`.
    pub fn with<R>(&self, name: &str, f: impl FnOnce(&T) -> R) -> Result<R> {
        Ok(f(self.slot(name)?.read()))
    }

    /// Write a variable. A locked variable ignores the write.
    pub fn set(&mut self, name: &str, value: T) -> Result<&mut Self> {
        let written = self.slot_mut(name)?.write(value);
        if !written {
            tracing::trace!(variable = name, "variable observer: locked, write ignored");
        }
        Ok(self)
    }

    /// Modify a copy of the current value and write it back through the
    /// normal write rule. The get hook does not run.
    pub fn update(&mut self, name: &str, f: impl FnOnce(&mut T)) -> Result<&mut Self>
    where
        T: Clone,
    {
        let slot = self.slot_mut(name)?;
        if slot.locked() {
            return Ok(self);
        }
        let mut next = slot.value().clone();
        f(&mut next);
        slot.write(next);
        Ok(self)
    }

    // -- selection ---------------------------------------------------------

    /// Select a variable for chaining without checking that it exists.
    ///
    /// Fails only when no name is given. A name with no slot is accepted;
    /// the next call that relies on the selection reports it.
    pub fn select<'a>(&mut self, name: impl Into<Option<&'a str>>) -> Result<&mut Self> {
        let name = name.into().ok_or(ObserverError::InvalidSelection)?;
        self.cursor = Some(name.to_string());
        Ok(self)
    }

    /// Clear the selection, ending a chain.
    pub fn end(&mut self) -> &mut Self {
        self.cursor = None;
        self
    }

    /// The currently selected variable name, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Resolve the target of a chained call.
    ///
    /// An explicit name that exists becomes the selection; anything else
    /// keeps the previous selection. With no selection the call fails.
    fn check(&mut self, name: Option<&str>) -> Result<String> {
        match name {
            Some(name) if self.slots.contains_key(name) => {
                self.cursor = Some(name.to_string());
            }
            _ => {}
        }
        let target = self.cursor.clone().ok_or(ObserverError::MissingParameter)?;
        if !self.slots.contains_key(&target) {
            return Err(ObserverError::UnknownVariable(target));
        }
        Ok(target)
    }

    // -- lock state --------------------------------------------------------

    /// Lock a variable: writes are ignored until it is unlocked.
    pub fn lock<'a>(&mut self, name: impl Into<Option<&'a str>>) -> Result<&mut Self> {
        self.set_lock(name.into(), true)
    }

    pub fn unlock<'a>(&mut self, name: impl Into<Option<&'a str>>) -> Result<&mut Self> {
        self.set_lock(name.into(), false)
    }

    /// Flip a variable's lock state.
    pub fn toggle<'a>(&mut self, name: impl Into<Option<&'a str>>) -> Result<&mut Self> {
        let target = self.check(name.into())?;
        let slot = self.slot_mut(&target)?;
        let locked = !slot.locked();
        slot.set_locked(locked);
        self.trace(if locked { "locked" } else { "unlocked" }, &target);
        Ok(self)
    }

    fn set_lock(&mut self, name: Option<&str>, locked: bool) -> Result<&mut Self> {
        let target = self.check(name)?;
        self.slot_mut(&target)?.set_locked(locked);
        self.trace(if locked { "locked" } else { "unlocked" }, &target);
        Ok(self)
    }

    /// Whether writes to `name` are currently ignored.
    pub fn is_locked(&self, name: &str) -> Result<bool> {
        Ok(self.slot(name)?.locked())
    }

    // -- hooks -------------------------------------------------------------

    /// Replace both hooks of a variable with no-ops.
    pub fn silence<'a>(&mut self, name: impl Into<Option<&'a str>>) -> Result<&mut Self> {
        let target = self.check(name.into())?;
        self.slot_mut(&target)?.silence();
        self.trace("silenced", &target);
        Ok(self)
    }

    /// Attach a change hook, called with `(new, old)` on every write.
    ///
    /// With `None` the hook goes to the current selection.
    pub fn on_change<'a>(
        &mut self,
        name: impl Into<Option<&'a str>>,
        hook: impl Fn(&T, &T) + 'static,
    ) -> Result<&mut Self> {
        let target = self.attach_to(HookKind::Change, name.into(), Hook::change(hook))?;
        self.trace("addlistener onchange", &target);
        Ok(self)
    }

    /// Attach a get hook, called before every read.
    pub fn on_get<'a>(
        &mut self,
        name: impl Into<Option<&'a str>>,
        hook: impl Fn() + 'static,
    ) -> Result<&mut Self> {
        let target = self.attach_to(HookKind::Get, name.into(), Hook::get(hook))?;
        self.trace("addlistener onget", &target);
        Ok(self)
    }

    fn attach_to(&mut self, kind: HookKind, name: Option<&str>, hook: Hook<T>) -> Result<String> {
        match name {
            Some(name) => self.attach(kind, ListenerParam::name(name), Some(hook)),
            None => self.attach(kind, ListenerParam::Hook(hook), None),
        }
    }

    /// Attach a listener of `kind`.
    ///
    /// `param` is either the hook itself (attached to the current
    /// selection) or a variable name, in which case `listener` supplies the
    /// hook. `ListenerParam::Absent` and a hook of the wrong kind fail with
    /// `ListenerTypeError`; a name without a listener fails with
    /// `ListenerMissing`.
    pub fn add_listener<'a>(
        &mut self,
        kind: HookKind,
        param: impl Into<ListenerParam<'a, T>>,
        listener: Option<Hook<T>>,
    ) -> Result<&mut Self> {
        self.attach(kind, param.into(), listener)?;
        Ok(self)
    }

    fn attach(
        &mut self,
        kind: HookKind,
        param: ListenerParam<'_, T>,
        listener: Option<Hook<T>>,
    ) -> Result<String> {
        let (name, listener) = match param {
            ListenerParam::Hook(hook) => (None, Some(hook)),
            ListenerParam::Name(name) => (Some(name), listener),
            ListenerParam::Absent => {
                return Err(ObserverError::ListenerTypeError {
                    expected: kind,
                    found: None,
                });
            }
        };
        let listener = listener.ok_or(ObserverError::ListenerMissing)?;
        if listener.kind() != kind {
            return Err(ObserverError::ListenerTypeError {
                expected: kind,
                found: Some(listener.kind()),
            });
        }
        let target = self.check(name.as_deref())?;
        self.slot_mut(&target)?.install(listener);
        Ok(target)
    }

    // -- introspection -----------------------------------------------------

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered variable names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.slots.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    // -- internals ---------------------------------------------------------

    fn slot(&self, name: &str) -> Result<&Slot<T>> {
        self.slots
            .get(name)
            .ok_or_else(|| ObserverError::UnknownVariable(name.to_string()))
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut Slot<T>> {
        self.slots
            .get_mut(name)
            .ok_or_else(|| ObserverError::UnknownVariable(name.to_string()))
    }

    fn trace(&self, op: &'static str, variable: &str) {
        if self.config.debug {
            tracing::debug!(target: "var_observer", op, variable, "variable observer");
        }
    }
}
