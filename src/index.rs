//! The libclang index, the root object every parse hangs off.

use std::mem;
use std::os::raw::c_int;

use tracing::debug;

use crate::error::{Error, Result};
use crate::ffi::{self, CXIndex};
use crate::handle::Handle;
use crate::types::IndexOptions;

/// A set of translation units that share declarations.
///
/// The index is disposed when dropped. Translation units borrow it, so it
/// always outlives them.
///
/// # Example
///
/// ```no_run
/// # fn example() -> cindex::Result<()> {
/// let index = cindex::Index::new(false, true)?;
/// # Ok(())
/// # }
/// ```
pub struct Index {
    raw: CXIndex,
}

impl Index {
    /// Create an index.
    pub fn new(exclude_declarations_from_pch: bool, display_diagnostics: bool) -> Result<Self> {
        Self::with_options(IndexOptions {
            exclude_declarations_from_pch,
            display_diagnostics,
        })
    }

    /// Create an index from an options struct.
    pub fn with_options(options: IndexOptions) -> Result<Self> {
        let lib = ffi::library()?;
        let raw = unsafe {
            (lib.clang_createIndex)(
                c_int::from(options.exclude_declarations_from_pch),
                c_int::from(options.display_diagnostics),
            )
        };
        if raw.is_null() {
            return Err(Error::NullHandle {
                op: "clang_createIndex",
            });
        }

        debug!(?options, "created index");
        Ok(Self { raw })
    }

    /// Give up ownership of the foreign index without disposing it.
    pub fn into_raw(self) -> CXIndex {
        let raw = self.raw;
        mem::forget(self);
        raw
    }
}

impl Handle for Index {
    type Raw = CXIndex;

    unsafe fn from_raw(raw: CXIndex) -> Self {
        Self { raw }
    }

    fn raw(&self) -> CXIndex {
        self.raw
    }
}

impl Drop for Index {
    fn drop(&mut self) {
        if self.raw.is_null() {
            return;
        }
        // An index can only exist once the library has been loaded.
        if let Some(lib) = ffi::loaded() {
            unsafe { (lib.clang_disposeIndex)(self.raw) };
            debug!("disposed index");
        }
    }
}

// The index may move to another thread; libclang does not allow concurrent
// use of one index, so it is not Sync.
unsafe impl Send for Index {}
