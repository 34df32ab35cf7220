//! Runtime loading of libclang.
//!
//! The library is opened once per process and its symbols are copied into a
//! table of function pointers. Every safe wrapper goes through [`library()`].

use std::ffi::OsString;
use std::fs;
use std::os::raw::{c_char, c_int, c_uint};
use std::path::{Path, PathBuf};

use libloading::Library;
use once_cell::sync::OnceCell;
use tracing::debug;

use super::handles::{CXFile, CXIndex, CXTranslationUnit};
use super::raw::{
    CXClientData, CXCursor, CXCursorKind, CXCursorVisitor, CXErrorCode, CXSourceLocation,
    CXSourceRange, CXString, CXType, CXUnsavedFile,
};
use crate::error::{Error, Result};
use crate::types::LibraryConfig;

static LIBCLANG: OnceCell<LibClang> = OnceCell::new();

macro_rules! libclang_table {
    ($( fn $name:ident($($arg:ty),* $(,)?) $(-> $ret:ty)?; )*) => {
        /// Function pointers resolved from a loaded libclang.
        #[allow(non_snake_case)]
        pub struct LibClang {
            pub(crate) library: Option<Library>,
            $( pub $name: unsafe extern "C" fn($($arg),*) $(-> $ret)?, )*
        }

        impl LibClang {
            /// Resolve every symbol from an opened library.
            ///
            /// # Safety
            ///
            /// `library` must be a libclang build exporting the C API with the
            /// signatures declared in this table.
            unsafe fn from_library(library: Library) -> Result<Self> {
                $(
                    let $name = *library
                        .get::<unsafe extern "C" fn($($arg),*) $(-> $ret)?>(
                            concat!(stringify!($name), "\0").as_bytes(),
                        )
                        .map_err(|_| Error::MissingSymbol {
                            name: stringify!($name).to_string(),
                        })?;
                )*

                Ok(Self {
                    library: Some(library),
                    $( $name, )*
                })
            }
        }
    };
}

libclang_table! {
    // Strings
    fn clang_getCString(CXString) -> *const c_char;
    fn clang_disposeString(CXString);
    fn clang_getClangVersion() -> CXString;

    // Index and translation units
    fn clang_createIndex(c_int, c_int) -> CXIndex;
    fn clang_disposeIndex(CXIndex);
    fn clang_parseTranslationUnit2(
        CXIndex,
        *const c_char,
        *const *const c_char,
        c_int,
        *mut CXUnsavedFile,
        c_uint,
        c_uint,
        *mut CXTranslationUnit,
    ) -> CXErrorCode;
    fn clang_disposeTranslationUnit(CXTranslationUnit);
    fn clang_getTranslationUnitCursor(CXTranslationUnit) -> CXCursor;
    fn clang_getTranslationUnitSpelling(CXTranslationUnit) -> CXString;

    // Cursors
    fn clang_visitChildren(CXCursor, CXCursorVisitor, CXClientData) -> c_uint;
    fn clang_Cursor_isNull(CXCursor) -> c_int;
    fn clang_getCursorSpelling(CXCursor) -> CXString;
    fn clang_getCursorDisplayName(CXCursor) -> CXString;
    fn clang_getCursorUSR(CXCursor) -> CXString;
    fn clang_getCursorKind(CXCursor) -> CXCursorKind;
    fn clang_getCursorKindSpelling(CXCursorKind) -> CXString;
    fn clang_getCursorExtent(CXCursor) -> CXSourceRange;
    fn clang_getCursorType(CXCursor) -> CXType;
    fn clang_getCursorLinkage(CXCursor) -> c_int;
    fn clang_getCursorVisibility(CXCursor) -> c_int;
    fn clang_getCursorAvailability(CXCursor) -> c_int;
    fn clang_getCursorLanguage(CXCursor) -> c_int;
    fn clang_getCursorTLSKind(CXCursor) -> c_int;

    // Kind predicates
    fn clang_isDeclaration(CXCursorKind) -> c_uint;
    fn clang_isReference(CXCursorKind) -> c_uint;
    fn clang_isExpression(CXCursorKind) -> c_uint;
    fn clang_isStatement(CXCursorKind) -> c_uint;
    fn clang_isAttribute(CXCursorKind) -> c_uint;
    fn clang_isInvalid(CXCursorKind) -> c_uint;
    fn clang_isTranslationUnit(CXCursorKind) -> c_uint;
    fn clang_isPreprocessing(CXCursorKind) -> c_uint;
    fn clang_isUnexposed(CXCursorKind) -> c_uint;

    // Source locations and files
    fn clang_getRangeStart(CXSourceRange) -> CXSourceLocation;
    fn clang_getRangeEnd(CXSourceRange) -> CXSourceLocation;
    fn clang_getInstantiationLocation(
        CXSourceLocation,
        *mut CXFile,
        *mut c_uint,
        *mut c_uint,
        *mut c_uint,
    );
    fn clang_getSpellingLocation(
        CXSourceLocation,
        *mut CXFile,
        *mut c_uint,
        *mut c_uint,
        *mut c_uint,
    );
    fn clang_getFileName(CXFile) -> CXString;

    // Types
    fn clang_getTypeSpelling(CXType) -> CXString;
    fn clang_getTypeKindSpelling(c_int) -> CXString;
}

impl LibClang {
    /// Open the first libclang candidate from `config` that loads.
    fn open(config: &LibraryConfig) -> Result<Self> {
        let mut last_error = None;

        for candidate in candidates(config) {
            debug!(path = %candidate.display(), "trying libclang");
            // Loading runs the library's initializers; libclang has no
            // unusual ones.
            match unsafe { Library::new(&candidate) } {
                Ok(library) => {
                    let table = unsafe { Self::from_library(library)? };
                    debug!(path = %candidate.display(), "loaded libclang");
                    return Ok(table);
                }
                Err(err) => {
                    last_error = Some(Error::Load {
                        path: candidate.display().to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Load {
            path: String::new(),
            message: "no libclang candidates to try".to_string(),
        }))
    }

    /// Whether this table was resolved from a real shared library.
    pub fn is_dynamic(&self) -> bool {
        self.library.is_some()
    }
}

/// Paths to try, most specific first.
fn candidates(config: &LibraryConfig) -> Vec<PathBuf> {
    let file_name = libloading::library_filename("clang");

    if let Some(path) = &config.path {
        if path.is_dir() {
            return vec![path.join(&file_name), path.join("libclang.so.1")];
        }
        return vec![path.clone()];
    }

    let mut out = vec![PathBuf::from(&file_name)];
    if cfg!(target_os = "linux") {
        out.push(PathBuf::from("libclang.so.1"));
        for root in ["/usr/lib", "/usr/lib64"] {
            out.extend(llvm_dirs(Path::new(root), &file_name));
        }
    }
    out
}

/// `<root>/llvm-*/lib/<file_name>`, newest version first.
fn llvm_dirs(root: &Path, file_name: &OsString) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.starts_with("llvm"))
        })
        .map(|path| path.join("lib").join(file_name))
        .filter(|path| path.exists())
        .collect();

    dirs.sort_by_key(|path| std::cmp::Reverse(llvm_version(path)));
    dirs
}

/// Major version parsed from a `.../llvm-<N>/lib/...` path.
fn llvm_version(path: &Path) -> u32 {
    path.components()
        .filter_map(|c| c.as_os_str().to_str())
        .find_map(|c| c.strip_prefix("llvm-"))
        .and_then(|v| v.split('.').next())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Load libclang using `config`.
///
/// The first successful load wins for the rest of the process; later calls
/// return the table that is already loaded.
pub fn load(config: &LibraryConfig) -> Result<&'static LibClang> {
    LIBCLANG.get_or_try_init(|| LibClang::open(config))
}

/// The loaded library, loading it from the environment on first use.
#[cfg(not(test))]
pub fn library() -> Result<&'static LibClang> {
    if let Some(lib) = LIBCLANG.get() {
        return Ok(lib);
    }
    load(&LibraryConfig::from_env())
}

/// Unit tests run against the in-crate fake.
#[cfg(test)]
pub fn library() -> Result<&'static LibClang> {
    Ok(LIBCLANG.get_or_init(super::fake::table))
}

/// The loaded library, if any. Never loads.
pub fn loaded() -> Option<&'static LibClang> {
    LIBCLANG.get()
}
