//! Type queries.

use crate::dispatch::{with_handle, with_kind};
use crate::error::Result;
use crate::handle::{Handle, Type};
use crate::types::KindCode;

impl<'tu> Type<'tu> {
    /// The type as it would be written in source, e.g. `const char *`.
    pub fn spelling(&self) -> Result<String> {
        with_handle(self, "clang_getTypeSpelling", |lib| lib.clang_getTypeSpelling)
    }

    /// `CXTypeKind` code. Read from the wrapped value; libclang is not called.
    pub fn kind(&self) -> KindCode {
        KindCode::from(self.raw().kind)
    }

    /// Name of this type's kind, e.g. `Pointer`.
    pub fn kind_spelling(&self) -> Result<String> {
        with_kind(self.kind(), "clang_getTypeKindSpelling", |lib| {
            lib.clang_getTypeKindSpelling
        })
    }
}
