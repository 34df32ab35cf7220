//! Source ranges, locations and files.

use std::os::raw::c_uint;

use tracing::trace;

use crate::convert::FromForeign;
use crate::dispatch::with_handle;
use crate::error::Result;
use crate::ffi::{self, CXFile, LibClang, LocationFn};
use crate::handle::{File, Handle, SourceLocation, SourceRange};

/// A location resolved to a file and position.
#[derive(Debug, Clone, Copy)]
pub struct Location<'tu> {
    /// The file, or `None` when the location is not in any file (for example
    /// a built-in declaration).
    pub file: Option<File<'tu>>,
    /// 1-based line.
    pub line: u32,
    /// 1-based column, in bytes.
    pub column: u32,
    /// Byte offset from the start of the file.
    pub offset: u32,
}

impl<'tu> SourceRange<'tu> {
    pub fn start(&self) -> Result<SourceLocation<'tu>> {
        with_handle(self, "clang_getRangeStart", |lib| lib.clang_getRangeStart)
    }

    pub fn end(&self) -> Result<SourceLocation<'tu>> {
        with_handle(self, "clang_getRangeEnd", |lib| lib.clang_getRangeEnd)
    }
}

impl<'tu> SourceLocation<'tu> {
    /// File and position after macro expansion.
    pub fn instantiation_location(&self) -> Result<Location<'tu>> {
        self.resolve("clang_getInstantiationLocation", |lib| {
            lib.clang_getInstantiationLocation
        })
    }

    /// File and position where the text was actually spelled.
    pub fn spelling_location(&self) -> Result<Location<'tu>> {
        self.resolve("clang_getSpellingLocation", |lib| lib.clang_getSpellingLocation)
    }

    fn resolve(&self, op: &'static str, select: fn(&LibClang) -> LocationFn) -> Result<Location<'tu>> {
        let lib = ffi::library()?;
        let mut file = CXFile::null();
        let (mut line, mut column, mut offset): (c_uint, c_uint, c_uint) = (0, 0, 0);

        trace!(op, "calling libclang");
        unsafe {
            select(lib)(self.raw(), &mut file, &mut line, &mut column, &mut offset);
            Ok(Location {
                file: Option::from_foreign(lib, file),
                line,
                column,
                offset,
            })
        }
    }
}

impl<'tu> File<'tu> {
    /// The file's path as libclang knows it.
    pub fn name(&self) -> Result<String> {
        with_handle(self, "clang_getFileName", |lib| lib.clang_getFileName)
    }
}
