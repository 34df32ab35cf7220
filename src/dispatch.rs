//! Call shapes shared by most wrapped operations.
//!
//! Both adapters do exactly three things: get the single argument into its
//! foreign form, call the selected libclang function once, and convert the
//! result.

use std::os::raw::c_int;

use tracing::trace;

use crate::convert::{narrow_kind, FromForeign};
use crate::error::Result;
use crate::ffi::{self, LibClang};
use crate::handle::Handle;
use crate::types::KindCode;

/// Picks a single-argument function out of the symbol table.
pub(crate) type Select<A, R> = fn(&LibClang) -> unsafe extern "C" fn(A) -> R;

/// Handle in, converted value out.
pub(crate) fn with_handle<H, R, T>(handle: &H, op: &'static str, select: Select<H::Raw, R>) -> Result<T>
where
    H: Handle,
    T: FromForeign<R>,
{
    let lib = ffi::library()?;
    trace!(op, "calling libclang");
    unsafe {
        let raw = select(lib)(handle.raw());
        Ok(T::from_foreign(lib, raw))
    }
}

/// Kind code in, converted value out.
pub(crate) fn with_kind<R, T>(code: KindCode, op: &'static str, select: Select<c_int, R>) -> Result<T>
where
    T: FromForeign<R>,
{
    let kind = narrow_kind(code, op)?;
    let lib = ffi::library()?;
    trace!(op, kind, "calling libclang");
    unsafe {
        let raw = select(lib)(kind);
        Ok(T::from_foreign(lib, raw))
    }
}
