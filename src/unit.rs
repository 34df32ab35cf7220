//! Parsed translation units.

use std::marker::PhantomData;
use std::mem;
use std::os::raw::c_char;
use std::ptr;

use tracing::debug;

use crate::args::{self, ArgBuffer, UnsavedBuffer};
use crate::dispatch::with_handle;
use crate::error::{Error, Result};
use crate::ffi::{self, check_parse, CXTranslationUnit};
use crate::handle::{Cursor, Handle};
use crate::index::Index;
use crate::types::UnsavedFile;

const PARSE_OP: &str = "clang_parseTranslationUnit2";

/// A parsed source file together with everything it includes.
///
/// Disposed when dropped. Cursors and the other views borrow the unit and
/// cannot outlive it.
///
/// # Example
///
/// ```no_run
/// # use cindex::{Index, TranslationUnit};
/// # fn example() -> cindex::Result<()> {
/// let index = Index::new(false, false)?;
/// let unit = TranslationUnit::parse(&index, Some("main.c"), &["-std=c11"], &[], 0)?;
/// println!("{}", unit.cursor()?.spelling()?);
/// # Ok(())
/// # }
/// ```
pub struct TranslationUnit<'i> {
    raw: CXTranslationUnit,
    _index: PhantomData<&'i Index>,
}

impl<'i> TranslationUnit<'i> {
    /// Parse a source file.
    ///
    /// `filename` may be `None` when the source file is named in `args`.
    /// `options` is a bitwise OR of [`parse_flags`](crate::parse_flags).
    pub fn parse<S: AsRef<str>>(
        index: &'i Index,
        filename: Option<&str>,
        args: &[S],
        unsaved: &[UnsavedFile],
        options: u32,
    ) -> Result<Self> {
        let lib = ffi::library()?;
        let c_filename = filename
            .map(|name| args::c_string(name, "source file name"))
            .transpose()?;

        let mut raw = CXTranslationUnit::null();
        // The argument buffers are released at the end of this block, before
        // the status is looked at, whichever way the parse went.
        let code = {
            let argv = ArgBuffer::new(args)?;
            let mut files = UnsavedBuffer::new(unsaved)?;
            let filename_ptr = c_filename
                .as_ref()
                .map_or(ptr::null::<c_char>(), |name| name.as_ptr());

            debug!(
                file = filename.unwrap_or("<args>"),
                argc = args.len(),
                unsaved = unsaved.len(),
                options,
                "parsing translation unit"
            );
            unsafe {
                (lib.clang_parseTranslationUnit2)(
                    index.raw(),
                    filename_ptr,
                    argv.as_ptr(),
                    argv.count()?,
                    files.as_mut_ptr(),
                    files.count()?,
                    options,
                    &mut raw,
                )
            }
        };

        check_parse(code, filename)?;
        if raw.is_null() {
            return Err(Error::NullHandle { op: PARSE_OP });
        }

        Ok(Self {
            raw,
            _index: PhantomData,
        })
    }

    /// The cursor for the whole unit.
    pub fn cursor(&self) -> Result<Cursor<'_>> {
        with_handle(self, "clang_getTranslationUnitCursor", |lib| {
            lib.clang_getTranslationUnitCursor
        })
    }

    /// The name of the unit's main file.
    pub fn spelling(&self) -> Result<String> {
        with_handle(self, "clang_getTranslationUnitSpelling", |lib| {
            lib.clang_getTranslationUnitSpelling
        })
    }

    /// Give up ownership of the foreign unit without disposing it.
    pub fn into_raw(self) -> CXTranslationUnit {
        let raw = self.raw;
        mem::forget(self);
        raw
    }
}

impl Handle for TranslationUnit<'_> {
    type Raw = CXTranslationUnit;

    unsafe fn from_raw(raw: CXTranslationUnit) -> Self {
        Self {
            raw,
            _index: PhantomData,
        }
    }

    fn raw(&self) -> CXTranslationUnit {
        self.raw
    }
}

impl Drop for TranslationUnit<'_> {
    fn drop(&mut self) {
        if self.raw.is_null() {
            return;
        }
        if let Some(lib) = ffi::loaded() {
            unsafe { (lib.clang_disposeTranslationUnit)(self.raw) };
            debug!("disposed translation unit");
        }
    }
}

unsafe impl Send for TranslationUnit<'_> {}
