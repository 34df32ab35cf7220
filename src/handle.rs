//! Typed containers for libclang handles.
//!
//! Every libclang resource category gets its own Rust type holding exactly one
//! foreign value. [`Index`](crate::Index) and
//! [`TranslationUnit`](crate::TranslationUnit) own their resource; the view
//! types defined here borrow the translation unit they came from, so they
//! cannot outlive it.

use std::fmt;
use std::marker::PhantomData;

use crate::ffi::{CXCursor, CXFile, CXSourceLocation, CXSourceRange, CXType};

/// A value that wraps exactly one libclang handle.
pub trait Handle: Sized {
    /// The foreign value.
    type Raw: Copy;

    /// Wrap a foreign value.
    ///
    /// # Safety
    ///
    /// `raw` must have been produced by libclang for this category, and the
    /// resource it refers to must stay alive for as long as the wrapper is
    /// used. For owning types the wrapper takes over disposal.
    unsafe fn from_raw(raw: Self::Raw) -> Self;

    /// The wrapped foreign value.
    fn raw(&self) -> Self::Raw;
}

/// Macro to define a non-owning view handle tied to a translation unit.
macro_rules! define_view {
    ($(#[$meta:meta])* $name:ident($raw:ty)) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name<'tu> {
            raw: $raw,
            _unit: PhantomData<&'tu ()>,
        }

        impl<'tu> Handle for $name<'tu> {
            type Raw = $raw;

            #[inline]
            unsafe fn from_raw(raw: $raw) -> Self {
                Self {
                    raw,
                    _unit: PhantomData,
                }
            }

            #[inline]
            fn raw(&self) -> $raw {
                self.raw
            }
        }

        impl<'tu> $name<'tu> {
            /// Replace the wrapped value.
            ///
            /// # Safety
            ///
            /// Same contract as [`Handle::from_raw`].
            #[inline]
            pub unsafe fn set_raw(&mut self, raw: $raw) {
                self.raw = raw;
            }
        }

        impl fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.raw).finish()
            }
        }
    };
}

define_view! {
    /// A node in the AST.
    Cursor(CXCursor)
}

define_view! {
    /// A half-open range of source text.
    SourceRange(CXSourceRange)
}

define_view! {
    /// A position in source text.
    SourceLocation(CXSourceLocation)
}

define_view! {
    /// A source file known to a translation unit. Never wraps a null file.
    File(CXFile)
}

define_view! {
    /// The type of a cursor.
    Type(CXType)
}
