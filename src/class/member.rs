// src/class/member.rs
//! Declared members of a class: properties and methods

use crate::runtime::{Args, Value};
use crate::AccessError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared visibility of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Whether a member declared `depth` levels above the runtime class is
    /// visible from the runtime class's scope.
    ///
    /// Private members are visible only on the class that declares them.
    #[inline]
    pub fn visible_at(self, depth: usize) -> bool {
        match self {
            Visibility::Public | Visibility::Protected => true,
            Visibility::Private => depth == 0,
        }
    }
}

/// Number of arguments a method accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    /// Inclusive on both ends
    Between(usize, usize),
}

impl Arity {
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(min) => count >= min,
            Arity::Between(min, max) => (min..=max).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(min) => write!(f, "at least {}", min),
            Arity::Between(min, max) => write!(f, "between {} and {}", min, max),
        }
    }
}

pub(crate) type Getter<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;
pub(crate) type Setter<T> = Box<dyn Fn(&mut T, Value) -> Result<(), AccessError> + Send + Sync>;
pub(crate) type Body<T> = Box<dyn Fn(&mut T, Args) -> Result<Value, AccessError> + Send + Sync>;

/// A property declared on a class
pub(crate) struct Property<T> {
    pub visibility: Visibility,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T> Property<T> {
    pub fn new(visibility: Visibility, get: Getter<T>, set: Setter<T>) -> Self {
        Self {
            visibility,
            get,
            set,
        }
    }

    #[inline]
    pub fn get(&self, target: &T) -> Value {
        (self.get)(target)
    }

    #[inline]
    pub fn set(&self, target: &mut T, value: Value) -> Result<(), AccessError> {
        (self.set)(target, value)
    }
}

/// A method declared on a class
pub(crate) struct Method<T> {
    pub visibility: Visibility,
    pub arity: Arity,
    body: Body<T>,
}

impl<T> Method<T> {
    pub fn new(visibility: Visibility, arity: Arity, body: Body<T>) -> Self {
        Self {
            visibility,
            arity,
            body,
        }
    }

    /// Check the argument count, then run the body exactly once
    pub fn call(
        &self,
        class: &'static str,
        name: &'static str,
        target: &mut T,
        args: Vec<Value>,
    ) -> Result<Value, AccessError> {
        if !self.arity.accepts(args.len()) {
            return Err(AccessError::ArgumentMismatch {
                class,
                method: name.to_string(),
                detail: format!("expected {} argument(s), got {}", self.arity, args.len()),
            });
        }

        (self.body)(target, Args::new(class, name, args))
    }
}
