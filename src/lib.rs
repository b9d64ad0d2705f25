// src/lib.rs
//! # Member Accessor
//!
//! Read, write and invoke any member of an object, whatever its declared
//! visibility. Built for generic frameworks (serializers, mappers, test
//! harnesses) that need to reach object internals without the type exposing
//! public getters and setters.
//!
//! Rust has no runtime reflection, so each accessible type publishes a
//! [`Class`] table from inside its own module by implementing [`Members`].
//! The table's closures run with the type's own privacy, which is the scope
//! the [`MemberAccessor`] enters on every call.
//!
//! ## Logging
//!
//! Failures are only ever returned, never logged. Member lookups emit
//! `tracing` events at `TRACE` level (target `member_accessor`), which
//! stay silent unless a subscriber enables that level for this crate.
//! Filter them out with `member_accessor=off` in `RUST_LOG`.
//!
//! ## Example
//!
//! ```rust
//! use member_accessor::{args, Class, MemberAccessor, Members, Value, Visibility};
//! use std::sync::OnceLock;
//!
//! struct Counter {
//!     counter: i64,
//! }
//!
//! impl Counter {
//!     fn increment(&mut self) -> i64 {
//!         self.counter += 1;
//!         self.counter
//!     }
//! }
//!
//! impl Members for Counter {
//!     fn class() -> &'static Class<Self> {
//!         static CLASS: OnceLock<Class<Counter>> = OnceLock::new();
//!         CLASS.get_or_init(|| {
//!             Class::<Self>::new("Counter")
//!                 .field("counter", Visibility::Private, |c| &c.counter, |c| &mut c.counter)
//!                 .method0("increment", Visibility::Private, |c| Ok(c.increment().into()))
//!         })
//!     }
//! }
//!
//! let accessor = MemberAccessor::new();
//! let mut counter = Counter { counter: 0 };
//!
//! accessor.execute_method(&mut counter, "increment", args![]).unwrap();
//! assert_eq!(
//!     accessor.get_property_value(&counter, "counter").unwrap(),
//!     Value::Int(1)
//! );
//! ```

pub mod class;
pub mod runtime;

use thiserror::Error;
use tracing::trace;

pub use class::{Arity, Class, DynamicProperties, Members, Target, Visibility};
pub use runtime::{Args, FromValue, Value};

/// Errors surfaced by member access.
///
/// Nothing is retried, logged or suppressed: every failure reaches the
/// immediate caller.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Member not found: {class}::{member}")]
    MemberNotFound { class: &'static str, member: String },

    #[error("Argument mismatch calling {class}::{method}: {detail}")]
    ArgumentMismatch {
        class: &'static str,
        method: String,
        detail: String,
    },

    /// A typed field rejected the value being stored
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Error raised by the target's own code, passed through as-is
    #[error(transparent)]
    Raised(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl AccessError {
    /// Wrap an error raised inside a method body
    pub fn raised(error: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        AccessError::Raised(error.into())
    }

    /// The error raised by target code, if it has type `E`
    pub fn downcast_raised<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            AccessError::Raised(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Take back the error raised by target code
    pub fn into_raised(self) -> Result<Box<dyn std::error::Error + Send + Sync + 'static>, Self> {
        match self {
            AccessError::Raised(err) => Ok(err),
            other => Err(other),
        }
    }
}

/// Build a method argument list from anything convertible into [`Value`]
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}

/// Visibility-unrestricted access to one member of one object.
///
/// The accessor is stateless: it keeps nothing between calls and never
/// holds on to a target past the call that borrowed it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberAccessor;

impl MemberAccessor {
    pub fn new() -> Self {
        Self
    }

    /// Read a property as stored on the instance
    ///
    /// # Example
    ///
    /// ```rust
    /// use member_accessor::{Class, MemberAccessor, Members, Value, Visibility};
    /// use std::sync::OnceLock;
    ///
    /// struct Vault {
    ///     secret: i64,
    /// }
    ///
    /// impl Members for Vault {
    ///     fn class() -> &'static Class<Self> {
    ///         static CLASS: OnceLock<Class<Vault>> = OnceLock::new();
    ///         CLASS.get_or_init(|| {
    ///             Class::<Self>::new("Vault").field("secret", Visibility::Private, |v| &v.secret, |v| &mut v.secret)
    ///         })
    ///     }
    /// }
    ///
    /// let vault = Vault { secret: 42 };
    /// let value = MemberAccessor::new().get_property_value(&vault, "secret").unwrap();
    /// assert_eq!(value, Value::Int(42));
    /// ```
    pub fn get_property_value(&self, target: &dyn Target, name: &str) -> Result<Value, AccessError> {
        trace!(class = target.class_name(), property = name, "get property");
        target.read_member(name)
    }

    /// Overwrite a property and return the value written.
    ///
    /// An unknown property is created only when the target's class declares
    /// dynamic property storage; otherwise this is [`AccessError::MemberNotFound`].
    pub fn set_property_value(
        &self,
        target: &mut dyn Target,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<Value, AccessError> {
        trace!(class = target.class_name(), property = name, "set property");
        target.write_member(name, value.into())
    }

    /// Invoke a method for its return value
    pub fn get_method_value(
        &self,
        target: &mut dyn Target,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Value, AccessError> {
        self.dispatch(target, name, args)
    }

    /// Invoke a method for its side effects.
    ///
    /// Same dispatch as [`MemberAccessor::get_method_value`]; the return
    /// value is still handed back.
    pub fn execute_method(
        &self,
        target: &mut dyn Target,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Value, AccessError> {
        self.dispatch(target, name, args)
    }

    /// Whether [`MemberAccessor::get_property_value`] would find `name`
    pub fn has_property(&self, target: &dyn Target, name: &str) -> bool {
        target.has_property(name)
    }

    /// Whether a method called `name` resolves on the target
    pub fn has_method(&self, target: &dyn Target, name: &str) -> bool {
        target.has_method(name)
    }

    fn dispatch(&self, target: &mut dyn Target, name: &str, args: Vec<Value>) -> Result<Value, AccessError> {
        trace!(class = target.class_name(), method = name, args = args.len(), "call method");
        target.call_member(name, args)
    }
}
