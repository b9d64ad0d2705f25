// src/class/hierarchy.rs
//! Links from a class to its parent class
//!
//! Inheritance is modelled by composition: a derived type embeds its base
//! type and the link projects into that embedded value before resolving
//! members on the parent's table.

use crate::class::target::{DynamicProperties, Members};
use crate::class::{Class, Resolution};
use crate::runtime::Value;
use crate::AccessError;

/// Type-erased view of a parent class as seen from a derived type `T`
pub(crate) trait Ancestor<T>: Send + Sync {
    fn class_name(&self) -> &'static str;

    fn read(&self, target: &T, name: &str, depth: usize) -> Option<Value>;

    fn write(
        &self,
        target: &mut T,
        name: &str,
        value: Value,
        depth: usize,
    ) -> Resolution<Result<(), AccessError>, Value>;

    fn invoke(
        &self,
        target: &mut T,
        name: &str,
        args: Vec<Value>,
        depth: usize,
    ) -> Resolution<Result<Value, AccessError>, Vec<Value>>;

    fn declares_property(&self, name: &str, depth: usize) -> bool;

    fn declares_method(&self, name: &str, depth: usize) -> bool;

    fn allows_dynamic_properties(&self) -> bool;

    fn dynamic<'a>(&self, target: &'a T) -> Option<&'a DynamicProperties>;

    fn dynamic_mut<'a>(&self, target: &'a mut T) -> Option<&'a mut DynamicProperties>;
}

pub(crate) struct Link<T, P: 'static> {
    class: &'static Class<P>,
    project: fn(&T) -> &P,
    project_mut: fn(&mut T) -> &mut P,
}

impl<T, P: Members> Link<T, P> {
    pub fn new(project: fn(&T) -> &P, project_mut: fn(&mut T) -> &mut P) -> Self {
        Self {
            class: P::class(),
            project,
            project_mut,
        }
    }
}

impl<T, P: Members> Ancestor<T> for Link<T, P> {
    fn class_name(&self) -> &'static str {
        self.class.name()
    }

    fn read(&self, target: &T, name: &str, depth: usize) -> Option<Value> {
        self.class.read_declared((self.project)(target), name, depth)
    }

    fn write(
        &self,
        target: &mut T,
        name: &str,
        value: Value,
        depth: usize,
    ) -> Resolution<Result<(), AccessError>, Value> {
        self.class
            .write_declared((self.project_mut)(target), name, value, depth)
    }

    fn invoke(
        &self,
        target: &mut T,
        name: &str,
        args: Vec<Value>,
        depth: usize,
    ) -> Resolution<Result<Value, AccessError>, Vec<Value>> {
        self.class
            .invoke_declared((self.project_mut)(target), name, args, depth)
    }

    fn declares_property(&self, name: &str, depth: usize) -> bool {
        self.class.declares_property(name, depth)
    }

    fn declares_method(&self, name: &str, depth: usize) -> bool {
        self.class.declares_method(name, depth)
    }

    fn allows_dynamic_properties(&self) -> bool {
        self.class.allows_dynamic_properties()
    }

    fn dynamic<'a>(&self, target: &'a T) -> Option<&'a DynamicProperties> {
        self.class.dynamic_of((self.project)(target))
    }

    fn dynamic_mut<'a>(&self, target: &'a mut T) -> Option<&'a mut DynamicProperties> {
        self.class.dynamic_of_mut((self.project_mut)(target))
    }
}
