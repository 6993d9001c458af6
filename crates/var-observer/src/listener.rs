#![forbid(unsafe_code)]

//! Call shapes accepted by [`VariableObserver::add_listener`].
//!
//! A listener can be attached either to the current selection by passing
//! the hook in the parameter position, or to a named variable by passing
//! the name and then the hook. Both shapes are variants of
//! [`ListenerParam`]; `Absent` stands for a call that supplied neither.
//!
//! [`VariableObserver::add_listener`]: crate::VariableObserver::add_listener

use std::borrow::Cow;

use crate::slot::Hook;

/// The parameter position of an `add_listener` call.
#[derive(Debug, Clone)]
pub enum ListenerParam<'a, T> {
    /// The hook itself; the target is the current selection.
    Hook(Hook<T>),
    /// The target variable name; the hook comes in the listener position.
    Name(Cow<'a, str>),
    /// Neither a hook nor a name.
    Absent,
}

impl<'a, T> ListenerParam<'a, T> {
    /// Target the variable `name`.
    pub fn name(name: impl Into<Cow<'a, str>>) -> Self {
        Self::Name(name.into())
    }
}

impl<'a, T> From<&'a str> for ListenerParam<'a, T> {
    fn from(name: &'a str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }
}

impl<T> From<String> for ListenerParam<'_, T> {
    fn from(name: String) -> Self {
        Self::Name(Cow::Owned(name))
    }
}

impl<T> From<Hook<T>> for ListenerParam<'_, T> {
    fn from(hook: Hook<T>) -> Self {
        Self::Hook(hook)
    }
}

impl<'a, T, P: Into<ListenerParam<'a, T>>> From<Option<P>> for ListenerParam<'a, T> {
    fn from(param: Option<P>) -> Self {
        param.map_or(Self::Absent, Into::into)
    }
}
