// src/runtime/args.rs
//! Positional argument list handed to a method body

use crate::runtime::value::{FromValue, Value};
use crate::AccessError;

/// Ordered arguments of one method invocation.
///
/// Arguments are consumed front to back with [`Args::take`]. The arity
/// declared at registration is checked before the body runs, so `take`
/// only fails on a missing optional argument or an incompatible type.
#[derive(Debug)]
pub struct Args {
    class: &'static str,
    method: &'static str,
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl Args {
    pub(crate) fn new(class: &'static str, method: &'static str, values: Vec<Value>) -> Self {
        Self {
            class,
            method,
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Number of arguments not yet taken
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// Take the next argument as `V`
    pub fn take<V: FromValue>(&mut self) -> Result<V, AccessError> {
        let index = self.position;
        let value = self
            .values
            .next()
            .ok_or_else(|| self.mismatch(format!("missing argument {}", index)))?;
        self.position += 1;

        V::from_value(value).map_err(|err| match err {
            AccessError::TypeMismatch { expected, actual } => {
                self.mismatch(format!("argument {}: expected {}, got {}", index, expected, actual))
            }
            other => other,
        })
    }

    /// Take the next argument if there is one
    pub fn take_optional<V: FromValue>(&mut self) -> Result<Option<V>, AccessError> {
        if self.values.len() == 0 {
            return Ok(None);
        }
        self.take().map(Some)
    }

    /// Every argument not yet taken, in order
    pub fn rest(self) -> Vec<Value> {
        self.values.collect()
    }

    /// Build an argument mismatch error for this call
    pub fn mismatch(&self, detail: impl Into<String>) -> AccessError {
        AccessError::ArgumentMismatch {
            class: self.class,
            method: self.method.to_string(),
            detail: detail.into(),
        }
    }
}
