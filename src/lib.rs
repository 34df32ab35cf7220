//! Safe Rust bindings for libclang's C indexing API.
//!
//! This crate wraps libclang's opaque handles (indices, translation units,
//! cursors, types, source locations and files) in typed Rust values, converts
//! results into owned Rust data, and turns `clang_visitChildren` into a call
//! that drives an ordinary closure.
//!
//! libclang is loaded at runtime. Set `LIBCLANG_PATH` to a library file or the
//! directory holding it, or call [`load`] before anything else.
//!
//! # Example
//!
//! ```no_run
//! use cindex::{kind, ChildVisit, Index, TranslationUnit};
//!
//! fn main() -> cindex::Result<()> {
//!     let index = Index::new(false, true)?;
//!     let unit = TranslationUnit::parse(&index, Some("main.c"), &["-std=c11"], &[], 0)?;
//!
//!     unit.cursor()?.visit_children(|cursor, _parent| {
//!         let Ok(code) = cursor.kind() else {
//!             return ChildVisit::Break;
//!         };
//!         if kind::is_declaration(code).unwrap_or(false) {
//!             println!("{}", cursor.display_name().unwrap_or_default());
//!         }
//!         ChildVisit::Recurse
//!     })?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Lifetimes
//!
//! [`Index`] and [`TranslationUnit`] own their libclang resource and dispose
//! it when dropped. A translation unit borrows its index, and every cursor,
//! type, range, location and file borrows its translation unit, so none of
//! them can be used after the resource behind them is gone.

mod args;
mod convert;
pub mod cursor;
mod dispatch;
pub mod error;
pub mod ffi;
pub mod handle;
pub mod index;
pub mod kind;
pub mod source;
pub mod ty;
pub mod types;
pub mod unit;
pub mod visit;

// Re-export main types at the crate root
pub use error::{Error, ParseErrorKind, Result};
pub use handle::{Cursor, File, Handle, SourceLocation, SourceRange, Type};
pub use index::Index;
pub use source::Location;
pub use types::{
    parse_flags, ChildVisit, IndexOptions, KindCode, LibraryConfig, UnsavedFile, VisitStatus,
};
pub use unit::TranslationUnit;
pub use visit::VisitResult;

use tracing::debug;

/// The version string of the loaded libclang, e.g. `clang version 17.0.6`.
pub fn clang_version() -> Result<String> {
    let lib = ffi::library()?;
    unsafe {
        let raw = (lib.clang_getClangVersion)();
        Ok(convert::CxString::new(lib, raw).to_string_lossy())
    }
}

/// Load libclang from an explicit location.
///
/// Only the first successful load counts; once a library is loaded, later
/// calls succeed without opening anything. Without an explicit load the
/// library is found through [`LibraryConfig::from_env`] on first use.
pub fn load(config: &LibraryConfig) -> Result<()> {
    let lib = ffi::load(config)?;
    debug!(dynamic = lib.is_dynamic(), "libclang ready");
    Ok(())
}

/// Whether libclang has been loaded in this process.
pub fn is_loaded() -> bool {
    ffi::loaded().is_some()
}
