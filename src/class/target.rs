// src/class/target.rs
//! Traits implemented by accessible types

use crate::class::Class;
use crate::runtime::Value;
use crate::AccessError;
use ahash::HashMap;
use serde::{Deserialize, Serialize};

/// A type that exposes its members through a [`Class`] table.
///
/// Implement this in the type's own module so the table's closures can
/// reach private fields and private inherent methods:
///
/// ```rust
/// use member_accessor::{Class, Members, Visibility};
/// use std::sync::OnceLock;
///
/// pub struct Vault {
///     secret: i64,
/// }
///
/// impl Members for Vault {
///     fn class() -> &'static Class<Self> {
///         static CLASS: OnceLock<Class<Vault>> = OnceLock::new();
///         CLASS.get_or_init(|| {
///             Class::<Self>::new("Vault").field(
///                 "secret",
///                 Visibility::Private,
///                 |vault| &vault.secret,
///                 |vault| &mut vault.secret,
///             )
///         })
///     }
/// }
/// ```
pub trait Members: Sized + 'static {
    fn class() -> &'static Class<Self>;
}

/// Object-safe view of any [`Members`] type.
///
/// Every call enters the runtime class's scope, so private members of that
/// class are reachable. Lets callers work with `&dyn Target` or
/// `Box<dyn Target>` without naming the concrete type.
pub trait Target {
    fn class_name(&self) -> &'static str;

    fn read_member(&self, name: &str) -> Result<Value, AccessError>;

    fn write_member(&mut self, name: &str, value: Value) -> Result<Value, AccessError>;

    fn call_member(&mut self, name: &str, args: Vec<Value>) -> Result<Value, AccessError>;

    fn has_property(&self, name: &str) -> bool;

    fn has_method(&self, name: &str) -> bool;
}

impl<T: Members> Target for T {
    #[inline]
    fn class_name(&self) -> &'static str {
        T::class().name()
    }

    #[inline]
    fn read_member(&self, name: &str) -> Result<Value, AccessError> {
        T::class().read(self, name)
    }

    #[inline]
    fn write_member(&mut self, name: &str, value: Value) -> Result<Value, AccessError> {
        T::class().write(self, name, value)
    }

    #[inline]
    fn call_member(&mut self, name: &str, args: Vec<Value>) -> Result<Value, AccessError> {
        T::class().invoke(self, name, args)
    }

    fn has_property(&self, name: &str) -> bool {
        T::class().has_property(self, name)
    }

    fn has_method(&self, name: &str) -> bool {
        T::class().has_method(name)
    }
}

/// Per-instance storage for properties attached at runtime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynamicProperties {
    fields: HashMap<String, Value>,
}

impl DynamicProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
