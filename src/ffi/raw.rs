//! Raw libclang types and constants.
//!
//! Layouts follow `clang-c/Index.h` and `clang-c/CXString.h`. Enumerations are
//! plain `c_int` codes; the few values this crate needs are named here.

#![allow(non_upper_case_globals, non_snake_case)]

use std::os::raw::{c_char, c_int, c_uint, c_ulong, c_void};

use super::handles::CXFile;

/// `enum CXErrorCode`.
pub type CXErrorCode = c_int;

pub const CXError_Success: CXErrorCode = 0;
pub const CXError_Failure: CXErrorCode = 1;
pub const CXError_Crashed: CXErrorCode = 2;
pub const CXError_InvalidArguments: CXErrorCode = 3;
pub const CXError_ASTReadError: CXErrorCode = 4;

/// `enum CXChildVisitResult`.
pub type CXChildVisitResult = c_int;

pub const CXChildVisit_Break: CXChildVisitResult = 0;
pub const CXChildVisit_Continue: CXChildVisitResult = 1;
pub const CXChildVisit_Recurse: CXChildVisitResult = 2;

/// `enum CXCursorKind`. Also used for the other libclang kind enums, which
/// share its width.
pub type CXCursorKind = c_int;

/// `CXClientData`.
pub type CXClientData = *mut c_void;

/// Disposable string returned by libclang.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CXString {
    pub data: *const c_void,
    pub private_flags: c_uint,
}

/// A cursor into the AST.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CXCursor {
    pub kind: CXCursorKind,
    pub xdata: c_int,
    pub data: [*const c_void; 3],
}

/// A type as seen by libclang.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CXType {
    pub kind: c_int,
    pub data: [*mut c_void; 2],
}

/// A location inside a source file.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CXSourceLocation {
    pub ptr_data: [*const c_void; 2],
    pub int_data: c_uint,
}

/// A half-open range inside a source file.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CXSourceRange {
    pub ptr_data: [*const c_void; 2],
    pub begin_int_data: c_uint,
    pub end_int_data: c_uint,
}

/// In-memory file contents handed to the parser.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CXUnsavedFile {
    pub Filename: *const c_char,
    pub Contents: *const c_char,
    pub Length: c_ulong,
}

/// `CXCursorVisitor`.
pub type CXCursorVisitor = Option<
    unsafe extern "C" fn(
        cursor: CXCursor,
        parent: CXCursor,
        client_data: CXClientData,
    ) -> CXChildVisitResult,
>;

/// Out-parameter shape shared by the `clang_get*Location` decompositions.
pub type LocationFn = unsafe extern "C" fn(
    location: CXSourceLocation,
    file: *mut CXFile,
    line: *mut c_uint,
    column: *mut c_uint,
    offset: *mut c_uint,
);
