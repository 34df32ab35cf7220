//! Pointer-sized opaque handle types.
//!
//! Each handle type is a transparent newtype around the `void *` libclang
//! hands out, so an index can never be passed where a file is expected.

use std::os::raw::c_void;

/// Macro to define a pointer handle type.
macro_rules! define_handle {
    ($name:ident) => {
        /// Opaque libclang pointer handle.
        #[repr(transparent)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            ptr: *mut c_void,
        }

        impl $name {
            /// Create a null handle.
            #[inline]
            pub const fn null() -> Self {
                Self {
                    ptr: std::ptr::null_mut(),
                }
            }

            /// Wrap a raw pointer.
            #[inline]
            pub const fn from_ptr(ptr: *mut c_void) -> Self {
                Self { ptr }
            }

            /// The raw pointer.
            #[inline]
            pub const fn as_ptr(&self) -> *mut c_void {
                self.ptr
            }

            /// Check if this handle is null.
            #[inline]
            pub fn is_null(&self) -> bool {
                self.ptr.is_null()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::null()
            }
        }
    };
}

define_handle!(CXIndex);
define_handle!(CXTranslationUnit);
define_handle!(CXFile);
