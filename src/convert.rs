//! Conversion of libclang results into Rust values, and of Rust kind codes
//! back into libclang enums.

use std::ffi::CStr;
use std::os::raw::{c_int, c_uint};

use crate::error::{Error, Result};
use crate::ffi::{CXCursor, CXFile, CXSourceLocation, CXSourceRange, CXString, CXType, LibClang};
use crate::handle::{Cursor, File, Handle, SourceLocation, SourceRange, Type};
use crate::types::KindCode;

/// Conversion from a raw libclang result.
pub(crate) trait FromForeign<R>: Sized {
    /// Convert `raw`, taking ownership of any foreign resource it carries.
    ///
    /// # Safety
    ///
    /// `raw` must be a value just returned by `lib`.
    unsafe fn from_foreign(lib: &LibClang, raw: R) -> Self;
}

/// A `CXString` that is disposed when dropped.
pub(crate) struct CxString<'l> {
    lib: &'l LibClang,
    raw: CXString,
}

impl<'l> CxString<'l> {
    /// Take ownership of `raw`.
    ///
    /// # Safety
    ///
    /// `raw` must come from `lib` and must not be disposed elsewhere.
    pub(crate) unsafe fn new(lib: &'l LibClang, raw: CXString) -> Self {
        Self { lib, raw }
    }

    /// Copy the characters out. A null string reads as empty.
    pub(crate) fn to_string_lossy(&self) -> String {
        unsafe {
            let ptr = (self.lib.clang_getCString)(self.raw);
            if ptr.is_null() {
                return String::new();
            }
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        }
    }
}

impl Drop for CxString<'_> {
    fn drop(&mut self) {
        unsafe { (self.lib.clang_disposeString)(self.raw) }
    }
}

impl FromForeign<CXString> for String {
    unsafe fn from_foreign(lib: &LibClang, raw: CXString) -> Self {
        let guard = CxString::new(lib, raw);
        guard.to_string_lossy()
    }
}

impl FromForeign<c_int> for KindCode {
    unsafe fn from_foreign(_lib: &LibClang, raw: c_int) -> Self {
        KindCode::from(raw)
    }
}

impl FromForeign<c_int> for bool {
    unsafe fn from_foreign(_lib: &LibClang, raw: c_int) -> Self {
        raw != 0
    }
}

impl FromForeign<c_uint> for bool {
    unsafe fn from_foreign(_lib: &LibClang, raw: c_uint) -> Self {
        raw != 0
    }
}

impl<'tu> FromForeign<CXCursor> for Cursor<'tu> {
    unsafe fn from_foreign(_lib: &LibClang, raw: CXCursor) -> Self {
        Cursor::from_raw(raw)
    }
}

impl<'tu> FromForeign<CXSourceRange> for SourceRange<'tu> {
    unsafe fn from_foreign(_lib: &LibClang, raw: CXSourceRange) -> Self {
        SourceRange::from_raw(raw)
    }
}

impl<'tu> FromForeign<CXSourceLocation> for SourceLocation<'tu> {
    unsafe fn from_foreign(_lib: &LibClang, raw: CXSourceLocation) -> Self {
        SourceLocation::from_raw(raw)
    }
}

impl<'tu> FromForeign<CXType> for Type<'tu> {
    unsafe fn from_foreign(_lib: &LibClang, raw: CXType) -> Self {
        Type::from_raw(raw)
    }
}

impl<'tu> FromForeign<CXFile> for Option<File<'tu>> {
    unsafe fn from_foreign(_lib: &LibClang, raw: CXFile) -> Self {
        if raw.is_null() {
            None
        } else {
            Some(File::from_raw(raw))
        }
    }
}

/// Narrow a kind code to the C enum width, rejecting values that do not fit.
pub(crate) fn narrow_kind(code: KindCode, op: &'static str) -> Result<c_int> {
    c_int::try_from(code).map_err(|_| Error::KindOutOfRange { op, code })
}
