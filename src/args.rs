//! Marshalling of parser arguments into C arrays.
//!
//! The buffers here own every byte libclang reads during a parse and free it
//! in `Drop`, so the release happens on success, on a failed parse, and while
//! unwinding alike.

use std::ffi::CString;
use std::marker::PhantomData;
use std::os::raw::{c_char, c_int, c_uint, c_ulong};
use std::ptr;

use crate::error::{Error, Result};
use crate::ffi::CXUnsavedFile;
use crate::types::UnsavedFile;

const PARSE_OP: &str = "clang_parseTranslationUnit2";

fn nul_error(what: &str, err: std::ffi::NulError) -> Error {
    Error::InvalidArgument {
        op: PARSE_OP,
        message: format!("{what} contains a NUL byte at {}", err.nul_position()),
    }
}

/// Convert a Rust string to an owned C string for the parser.
pub(crate) fn c_string(value: &str, what: &str) -> Result<CString> {
    CString::new(value).map_err(|err| nul_error(what, err))
}

/// A `char **argv`-style array and the strings it points at.
pub(crate) struct ArgBuffer {
    // Pointers into `strings`; a CString's heap buffer does not move when the
    // CString itself does.
    ptrs: Vec<*const c_char>,
    strings: Vec<CString>,
}

impl ArgBuffer {
    /// Build one NUL-terminated buffer per argument. An empty slice allocates
    /// nothing.
    pub(crate) fn new<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        if args.is_empty() {
            return Ok(Self {
                ptrs: Vec::new(),
                strings: Vec::new(),
            });
        }

        let strings = args
            .iter()
            .map(|arg| c_string(arg.as_ref(), "command-line argument"))
            .collect::<Result<Vec<_>>>()?;
        let ptrs = strings.iter().map(|s| s.as_ptr()).collect();

        Ok(Self { ptrs, strings })
    }

    /// Pointer to the array, or null when there are no arguments.
    pub(crate) fn as_ptr(&self) -> *const *const c_char {
        if self.ptrs.is_empty() {
            ptr::null()
        } else {
            self.ptrs.as_ptr()
        }
    }

    /// Number of arguments as the C `int` the parser takes.
    pub(crate) fn count(&self) -> Result<c_int> {
        c_int::try_from(self.strings.len()).map_err(|_| Error::InvalidArgument {
            op: PARSE_OP,
            message: format!("{} command-line arguments is too many", self.strings.len()),
        })
    }

    #[cfg(test)]
    fn strings(&self) -> &[CString] {
        &self.strings
    }
}

/// An array of `CXUnsavedFile` borrowing the contents it describes.
pub(crate) struct UnsavedBuffer<'a> {
    files: Vec<CXUnsavedFile>,
    _names: Vec<CString>,
    _contents: PhantomData<&'a [UnsavedFile]>,
}

impl<'a> UnsavedBuffer<'a> {
    pub(crate) fn new(unsaved: &'a [UnsavedFile]) -> Result<Self> {
        if unsaved.is_empty() {
            return Ok(Self {
                files: Vec::new(),
                _names: Vec::new(),
                _contents: PhantomData,
            });
        }

        let names = unsaved
            .iter()
            .map(|file| c_string(&file.filename, "unsaved file name"))
            .collect::<Result<Vec<_>>>()?;

        let files = unsaved
            .iter()
            .zip(&names)
            .map(|(file, name)| {
                let length = c_ulong::try_from(file.contents.len()).map_err(|_| {
                    Error::InvalidArgument {
                        op: PARSE_OP,
                        message: format!("unsaved file {} is too large", file.filename),
                    }
                })?;
                Ok(CXUnsavedFile {
                    Filename: name.as_ptr(),
                    Contents: file.contents.as_ptr() as *const c_char,
                    Length: length,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            files,
            _names: names,
            _contents: PhantomData,
        })
    }

    /// Pointer to the array, or null when there are no files.
    pub(crate) fn as_mut_ptr(&mut self) -> *mut CXUnsavedFile {
        if self.files.is_empty() {
            ptr::null_mut()
        } else {
            self.files.as_mut_ptr()
        }
    }

    pub(crate) fn count(&self) -> Result<c_uint> {
        c_uint::try_from(self.files.len()).map_err(|_| Error::InvalidArgument {
            op: PARSE_OP,
            message: format!("{} unsaved files is too many", self.files.len()),
        })
    }
}
