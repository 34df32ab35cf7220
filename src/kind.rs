//! Classification and naming of kind codes.
//!
//! Each function narrows its code to the C enum width first; a code that does
//! not fit is rejected with [`Error::KindOutOfRange`](crate::Error) rather
//! than truncated.
//!
//! ```no_run
//! # fn example(cursor: cindex::Cursor<'_>) -> cindex::Result<()> {
//! let kind = cursor.kind()?;
//! if cindex::kind::is_declaration(kind)? {
//!     println!("{} declares something", cindex::kind::cursor_kind_spelling(kind)?);
//! }
//! # Ok(())
//! # }
//! ```

use crate::dispatch::with_kind;
use crate::error::Result;
use crate::types::KindCode;

macro_rules! kind_predicates {
    ($( $(#[$meta:meta])* $name:ident => $symbol:ident; )*) => {
        $(
            $(#[$meta])*
            pub fn $name(kind: KindCode) -> Result<bool> {
                with_kind(kind, stringify!($symbol), |lib| lib.$symbol)
            }
        )*
    };
}

kind_predicates! {
    /// Whether the cursor kind is a declaration.
    is_declaration => clang_isDeclaration;
    /// Whether the cursor kind is a reference to a declaration.
    is_reference => clang_isReference;
    /// Whether the cursor kind is an expression.
    is_expression => clang_isExpression;
    /// Whether the cursor kind is a statement.
    is_statement => clang_isStatement;
    /// Whether the cursor kind is an attribute.
    is_attribute => clang_isAttribute;
    /// Whether the cursor kind marks an invalid cursor.
    is_invalid => clang_isInvalid;
    /// Whether the cursor kind is the translation unit.
    is_translation_unit => clang_isTranslationUnit;
    /// Whether the cursor kind is a preprocessing entity such as a macro
    /// definition or an inclusion directive.
    is_preprocessing => clang_isPreprocessing;
    /// Whether the cursor kind is one libclang does not expose in detail.
    is_unexposed => clang_isUnexposed;
}

/// Name of a cursor kind, e.g. `FunctionDecl`.
pub fn cursor_kind_spelling(kind: KindCode) -> Result<String> {
    with_kind(kind, "clang_getCursorKindSpelling", |lib| {
        lib.clang_getCursorKindSpelling
    })
}

/// Name of a type kind, e.g. `Int`.
pub fn type_kind_spelling(kind: KindCode) -> Result<String> {
    with_kind(kind, "clang_getTypeKindSpelling", |lib| lib.clang_getTypeKindSpelling)
}
