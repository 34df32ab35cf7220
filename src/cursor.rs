//! Cursor queries.

use crate::dispatch::with_handle;
use crate::error::Result;
use crate::handle::{Cursor, SourceRange, Type};
use crate::types::KindCode;

impl<'tu> Cursor<'tu> {
    /// The name of the entity, e.g. `main` for a function.
    pub fn spelling(&self) -> Result<String> {
        with_handle(self, "clang_getCursorSpelling", |lib| lib.clang_getCursorSpelling)
    }

    /// The name with extra detail, such as a function's parameter list.
    pub fn display_name(&self) -> Result<String> {
        with_handle(self, "clang_getCursorDisplayName", |lib| {
            lib.clang_getCursorDisplayName
        })
    }

    /// Unified Symbol Resolution string. Empty for entities without one.
    pub fn usr(&self) -> Result<String> {
        with_handle(self, "clang_getCursorUSR", |lib| lib.clang_getCursorUSR)
    }

    /// `CXCursorKind` code.
    pub fn kind(&self) -> Result<KindCode> {
        with_handle(self, "clang_getCursorKind", |lib| lib.clang_getCursorKind)
    }

    /// Source range the cursor covers.
    pub fn extent(&self) -> Result<SourceRange<'tu>> {
        with_handle(self, "clang_getCursorExtent", |lib| lib.clang_getCursorExtent)
    }

    pub fn cursor_type(&self) -> Result<Type<'tu>> {
        with_handle(self, "clang_getCursorType", |lib| lib.clang_getCursorType)
    }

    /// `CXLinkageKind` code.
    pub fn linkage(&self) -> Result<KindCode> {
        with_handle(self, "clang_getCursorLinkage", |lib| lib.clang_getCursorLinkage)
    }

    /// `CXVisibilityKind` code.
    pub fn visibility(&self) -> Result<KindCode> {
        with_handle(self, "clang_getCursorVisibility", |lib| {
            lib.clang_getCursorVisibility
        })
    }

    /// `CXAvailabilityKind` code.
    pub fn availability(&self) -> Result<KindCode> {
        with_handle(self, "clang_getCursorAvailability", |lib| {
            lib.clang_getCursorAvailability
        })
    }

    /// `CXLanguageKind` code.
    pub fn language(&self) -> Result<KindCode> {
        with_handle(self, "clang_getCursorLanguage", |lib| lib.clang_getCursorLanguage)
    }

    /// `CXTLSKind` code.
    pub fn tls_kind(&self) -> Result<KindCode> {
        with_handle(self, "clang_getCursorTLSKind", |lib| lib.clang_getCursorTLSKind)
    }

    /// Whether this is the null cursor.
    pub fn is_null(&self) -> Result<bool> {
        with_handle(self, "clang_Cursor_isNull", |lib| lib.clang_Cursor_isNull)
    }
}
