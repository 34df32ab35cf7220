//! FFI bindings to libclang.
//!
//! This module contains the raw C types and the runtime-loaded symbol table.
//! Users should prefer the safe Rust wrappers in the parent modules.

pub mod error;
pub mod handles;
pub mod library;
pub mod raw;

#[cfg(test)]
pub mod fake;

pub use error::check_parse;
pub use handles::*;
pub use library::{library, load, loaded, LibClang};
pub use raw::*;
