// src/class/mod.rs
//! Member tables
//!
//! A [`Class`] lists the properties and methods of one Rust type. The table
//! is built inside the type's own module, so its getters, setters and method
//! bodies see private fields and private inherent methods exactly as the
//! type's own code does. Entering that table is how the accessor gains the
//! target's scope.
//!
//! ## Resolution
//!
//! Members are looked up starting at the runtime class (depth 0) and walking
//! up through [`Class::extends`] links:
//!
//! - every member of the runtime class is visible;
//! - on ancestors only `Public` and `Protected` members are visible;
//! - the first visible declaration wins, so derived classes shadow their parents;
//! - dynamic property storage is consulted only after the whole declared chain.

pub(crate) mod hierarchy;
pub mod member;
pub mod target;

use crate::runtime::{Args, FromValue, Value};
use crate::AccessError;
use ahash::HashMap;
use hierarchy::{Ancestor, Link};
use member::{Method, Property};
use tracing::trace;

pub use member::{Arity, Visibility};
pub use target::{DynamicProperties, Members, Target};

/// Outcome of resolving a member at one level of the hierarchy.
///
/// `Unresolved` hands the input back so the next level can try it.
pub(crate) enum Resolution<R, U> {
    Resolved(R),
    Unresolved(U),
}

/// Member table of the type `T`
pub struct Class<T: 'static> {
    name: &'static str,
    properties: HashMap<&'static str, Property<T>>,
    methods: HashMap<&'static str, Method<T>>,
    parent: Option<Box<dyn Ancestor<T>>>,
    dynamic: Option<(
        fn(&T) -> &DynamicProperties,
        fn(&mut T) -> &mut DynamicProperties,
    )>,
}

macro_rules! fixed_arity_methods {
    ($($(#[$doc:meta])* $fn_name:ident($($arg:ident: $ty:ident),*) => $arity:expr;)*) => {$(
        $(#[$doc])*
        pub fn $fn_name<$($ty,)* F>(self, name: &'static str, visibility: Visibility, body: F) -> Self
        where
            $($ty: FromValue,)*
            F: Fn(&mut T, $($ty),*) -> Result<Value, AccessError> + Send + Sync + 'static,
        {
            self.method(name, visibility, Arity::Exact($arity), move |target: &mut T, args: Args| {
                #[allow(unused_mut, unused_variables)]
                let mut args = args;
                $(let $arg = args.take::<$ty>()?;)*
                body(target, $($arg),*)
            })
        }
    )*};
}

impl<T: 'static> Class<T> {
    /// Start an empty table.
    ///
    /// Name the type up front (`Class::<Self>::new(..)`) so the closures
    /// passed to the builders below know what they receive.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            properties: HashMap::default(),
            methods: HashMap::default(),
            parent: None,
            dynamic: None,
        }
    }

    /// Declare a property stored in a field of type `F`.
    ///
    /// Reads clone the field into a [`Value`]. Writes accept only values that
    /// `F` can be extracted from without coercion; anything else fails with
    /// [`AccessError::TypeMismatch`] and leaves the field untouched.
    pub fn field<F, G, M>(self, name: &'static str, visibility: Visibility, get: G, get_mut: M) -> Self
    where
        F: Clone + Into<Value> + FromValue + 'static,
        G: Fn(&T) -> &F + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut F + Send + Sync + 'static,
    {
        self.property(
            name,
            visibility,
            move |target: &T| get(target).clone().into(),
            move |target: &mut T, value: Value| {
                *get_mut(target) = F::from_value(value)?;
                Ok(())
            },
        )
    }

    /// Declare a property with custom read and write logic
    pub fn property<G, S>(mut self, name: &'static str, visibility: Visibility, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Value + Send + Sync + 'static,
        S: Fn(&mut T, Value) -> Result<(), AccessError> + Send + Sync + 'static,
    {
        self.properties
            .insert(name, Property::new(visibility, Box::new(get), Box::new(set)));
        self
    }

    /// Declare a method taking its arguments through [`Args`].
    ///
    /// The argument count is checked against `arity` before `body` runs.
    pub fn method<F>(mut self, name: &'static str, visibility: Visibility, arity: Arity, body: F) -> Self
    where
        F: Fn(&mut T, Args) -> Result<Value, AccessError> + Send + Sync + 'static,
    {
        self.methods
            .insert(name, Method::new(visibility, arity, Box::new(body)));
        self
    }

    /// Declare a method accepting `min` or more arguments
    pub fn variadic<F>(self, name: &'static str, visibility: Visibility, min: usize, body: F) -> Self
    where
        F: Fn(&mut T, Args) -> Result<Value, AccessError> + Send + Sync + 'static,
    {
        self.method(name, visibility, Arity::AtLeast(min), body)
    }

    fixed_arity_methods! {
        /// Declare a method taking no arguments
        method0() => 0;
        /// Declare a method taking one typed argument
        method1(a: A) => 1;
        method2(a: A, b: B) => 2;
        method3(a: A, b: B, c: C) => 3;
        method4(a: A, b: B, c: C, d: D) => 4;
        method5(a: A, b: B, c: C, d: D, e: E) => 5;
    }

    /// Inherit the members of `P`, which `T` embeds.
    pub fn extends<P: Members>(mut self, project: fn(&T) -> &P, project_mut: fn(&mut T) -> &mut P) -> Self {
        self.parent = Some(Box::new(Link::new(project, project_mut)));
        self
    }

    /// Allow properties to be attached at runtime, stored in `storage`
    pub fn dynamic(
        mut self,
        storage: fn(&T) -> &DynamicProperties,
        storage_mut: fn(&mut T) -> &mut DynamicProperties,
    ) -> Self {
        self.dynamic = Some((storage, storage_mut));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent_name(&self) -> Option<&'static str> {
        self.parent.as_ref().map(|parent| parent.class_name())
    }

    /// Whether this class or an ancestor can store dynamic properties
    pub fn allows_dynamic_properties(&self) -> bool {
        self.dynamic.is_some()
            || self
                .parent
                .as_ref()
                .map_or(false, |parent| parent.allows_dynamic_properties())
    }

    // Entry points used by `Target`, always at the runtime class

    pub(crate) fn read(&self, target: &T, name: &str) -> Result<Value, AccessError> {
        if let Some(value) = self.read_declared(target, name, 0) {
            return Ok(value);
        }

        if let Some(value) = self.dynamic_of(target).and_then(|props| props.get(name)) {
            trace!(class = self.name, property = name, "resolved dynamic property");
            return Ok(value.clone());
        }

        Err(self.not_found(name))
    }

    pub(crate) fn write(&self, target: &mut T, name: &str, value: Value) -> Result<Value, AccessError> {
        let written = value.clone();

        let value = match self.write_declared(target, name, value, 0) {
            Resolution::Resolved(result) => return result.map(|()| written),
            Resolution::Unresolved(value) => value,
        };

        match self.dynamic_of_mut(target) {
            Some(props) => {
                trace!(class = self.name, property = name, "storing dynamic property");
                props.insert(name, value);
                Ok(written)
            }
            None => Err(self.not_found(name)),
        }
    }

    pub(crate) fn invoke(&self, target: &mut T, name: &str, args: Vec<Value>) -> Result<Value, AccessError> {
        match self.invoke_declared(target, name, args, 0) {
            Resolution::Resolved(result) => result,
            Resolution::Unresolved(_) => Err(self.not_found(name)),
        }
    }

    pub(crate) fn has_property(&self, target: &T, name: &str) -> bool {
        self.declares_property(name, 0)
            || self
                .dynamic_of(target)
                .map_or(false, |props| props.contains(name))
    }

    pub(crate) fn has_method(&self, name: &str) -> bool {
        self.declares_method(name, 0)
    }

    // Per-level resolution, also reached through `Ancestor` links

    pub(crate) fn read_declared(&self, target: &T, name: &str, depth: usize) -> Option<Value> {
        if let Some(property) = self.visible_property(name, depth) {
            trace!(class = self.name, property = name, depth, "resolved property");
            return Some(property.get(target));
        }

        self.parent
            .as_ref()
            .and_then(|parent| parent.read(target, name, depth + 1))
    }

    pub(crate) fn write_declared(
        &self,
        target: &mut T,
        name: &str,
        value: Value,
        depth: usize,
    ) -> Resolution<Result<(), AccessError>, Value> {
        if let Some(property) = self.visible_property(name, depth) {
            trace!(class = self.name, property = name, depth, "resolved property");
            return Resolution::Resolved(property.set(target, value));
        }

        match &self.parent {
            Some(parent) => parent.write(target, name, value, depth + 1),
            None => Resolution::Unresolved(value),
        }
    }

    pub(crate) fn invoke_declared(
        &self,
        target: &mut T,
        name: &str,
        args: Vec<Value>,
        depth: usize,
    ) -> Resolution<Result<Value, AccessError>, Vec<Value>> {
        if let Some((declared, method)) = self
            .methods
            .get_key_value(name)
            .filter(|(_, method)| method.visibility.visible_at(depth))
        {
            trace!(class = self.name, method = name, depth, args = args.len(), "resolved method");
            return Resolution::Resolved(method.call(self.name, *declared, target, args));
        }

        match &self.parent {
            Some(parent) => parent.invoke(target, name, args, depth + 1),
            None => Resolution::Unresolved(args),
        }
    }

    pub(crate) fn declares_property(&self, name: &str, depth: usize) -> bool {
        self.visible_property(name, depth).is_some()
            || self
                .parent
                .as_ref()
                .map_or(false, |parent| parent.declares_property(name, depth + 1))
    }

    pub(crate) fn declares_method(&self, name: &str, depth: usize) -> bool {
        self.methods
            .get(name)
            .map_or(false, |method| method.visibility.visible_at(depth))
            || self
                .parent
                .as_ref()
                .map_or(false, |parent| parent.declares_method(name, depth + 1))
    }

    /// Nearest dynamic storage, starting at this class
    pub(crate) fn dynamic_of<'a>(&self, target: &'a T) -> Option<&'a DynamicProperties> {
        match (&self.dynamic, &self.parent) {
            (Some((storage, _)), _) => Some(storage(target)),
            (None, Some(parent)) => parent.dynamic(target),
            (None, None) => None,
        }
    }

    pub(crate) fn dynamic_of_mut<'a>(&self, target: &'a mut T) -> Option<&'a mut DynamicProperties> {
        match (&self.dynamic, &self.parent) {
            (Some((_, storage_mut)), _) => Some(storage_mut(target)),
            (None, Some(parent)) => parent.dynamic_mut(target),
            (None, None) => None,
        }
    }

    #[inline]
    fn visible_property(&self, name: &str, depth: usize) -> Option<&Property<T>> {
        self.properties
            .get(name)
            .filter(|property| property.visibility.visible_at(depth))
    }

    fn not_found(&self, name: &str) -> AccessError {
        AccessError::MemberNotFound {
            class: self.name,
            member: name.to_string(),
        }
    }
}
