#![forbid(unsafe_code)]

//! Per-variable storage and hook dispatch.
//!
//! A slot holds the stored value, one change hook, one get hook, and the
//! lock flag. Hooks are kept as `Rc<dyn Fn ..>` so a read can run the get
//! hook through `&self`.

use std::fmt;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Change hook: called with `(new, old)` before the value is replaced.
pub type ChangeHook<T> = Rc<dyn Fn(&T, &T)>;

/// Get hook: called before the value is returned from a read.
pub type GetHook = Rc<dyn Fn()>;

/// Which hook of a slot a listener targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HookKind {
    Change,
    Get,
}

impl HookKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Change => "onchange",
            Self::Get => "onget",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listener of either kind.
pub enum Hook<T> {
    Change(ChangeHook<T>),
    Get(GetHook),
}

impl<T> Hook<T> {
    /// Wrap a change closure.
    pub fn change(f: impl Fn(&T, &T) + 'static) -> Self {
        Self::Change(Rc::new(f))
    }

    /// Wrap a get closure.
    pub fn get(f: impl Fn() + 'static) -> Self {
        Self::Get(Rc::new(f))
    }

    #[must_use]
    pub fn kind(&self) -> HookKind {
        match self {
            Self::Change(_) => HookKind::Change,
            Self::Get(_) => HookKind::Get,
        }
    }
}

impl<T> Clone for Hook<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Change(f) => Self::Change(Rc::clone(f)),
            Self::Get(f) => Self::Get(Rc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hook").field(&self.kind()).finish()
    }
}

fn noop_change<T: 'static>() -> ChangeHook<T> {
    Rc::new(|_: &T, _: &T| {})
}

fn noop_get() -> GetHook {
    Rc::new(|| {})
}

/// Storage for one observed variable.
pub(crate) struct Slot<T> {
    stored: T,
    on_change: ChangeHook<T>,
    on_get: GetHook,
    locked: bool,
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("stored", &self.stored)
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Slot<T> {
    /// A fresh, unlocked slot with a no-op get hook.
    pub(crate) fn new(stored: T, on_change: Option<ChangeHook<T>>) -> Self {
        Self {
            stored,
            on_change: on_change.unwrap_or_else(noop_change),
            on_get: noop_get(),
            locked: false,
        }
    }

    /// Run the get hook, then hand out the value.
    pub(crate) fn read(&self) -> &T {
        (self.on_get)();
        &self.stored
    }

    /// Apply the write rule. Returns whether the write took effect.
    ///
    /// Locked: nothing happens. Unlocked: `on_change(new, old)` runs with
    /// the pre-write value, then the value is replaced.
    pub(crate) fn write(&mut self, value: T) -> bool {
        if self.locked {
            return false;
        }
        (self.on_change)(&value, &self.stored);
        self.stored = value;
        true
    }

    /// The stored value, bypassing the get hook.
    pub(crate) fn value(&self) -> &T {
        &self.stored
    }

    pub(crate) fn into_value(self) -> T {
        self.stored
    }

    pub(crate) fn install(&mut self, hook: Hook<T>) {
        match hook {
            Hook::Change(f) => self.on_change = f,
            Hook::Get(f) => self.on_get = f,
        }
    }

    pub(crate) fn silence(&mut self) {
        self.on_change = noop_change();
        self.on_get = noop_get();
    }

    pub(crate) fn locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn read_runs_get_hook_once() {
        let mut slot = Slot::new(7, None);
        let reads = Rc::new(Cell::new(0u32));
        let reads_clone = Rc::clone(&reads);
        slot.install(Hook::get(move || reads_clone.set(reads_clone.get() + 1)));

        assert_eq!(*slot.read(), 7);
        assert_eq!(reads.get(), 1);
        assert_eq!(*slot.read(), 7);
        assert_eq!(reads.get(), 2);
    }

    #[test]
    fn write_passes_new_then_old() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = Rc::clone(&log);
        let hook: ChangeHook<i32> = Rc::new(move |new: &i32, old: &i32| {
            log_clone.borrow_mut().push((*new, *old));
        });
        let mut slot = Slot::new(1, Some(hook));

        assert!(slot.write(2));
        assert!(slot.write(2));
        assert_eq!(*log.borrow(), vec![(2, 1), (2, 2)]);
        assert_eq!(*slot.read(), 2);
    }

    #[test]
    fn locked_write_is_noop() {
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let mut slot = Slot::new("a".to_string(), None);
        slot.install(Hook::change(move |_: &String, _: &String| {
            calls_clone.set(calls_clone.get() + 1);
        }));
        slot.set_locked(true);

        assert!(!slot.write("b".to_string()));
        assert_eq!(slot.read(), "a");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn silence_replaces_both_hooks() {
        let calls = Rc::new(Cell::new(0u32));
        let (c1, c2) = (Rc::clone(&calls), Rc::clone(&calls));
        let mut slot = Slot::new(0, None);
        slot.install(Hook::change(move |_: &i32, _: &i32| c1.set(c1.get() + 1)));
        slot.install(Hook::get(move || c2.set(c2.get() + 1)));

        slot.silence();
        slot.write(3);
        let _ = slot.read();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn hook_kind_and_debug() {
        let hook: Hook<i32> = Hook::get(|| {});
        assert_eq!(hook.kind(), HookKind::Get);
        assert_eq!(format!("{hook:?}"), "Hook(Get)");
        assert_eq!(HookKind::Change.to_string(), "onchange");
    }
}
