// src/runtime/mod.rs
//! Runtime values exchanged with target objects

pub mod args;
pub mod value;

pub use args::Args;
pub use value::{FromValue, Value};
