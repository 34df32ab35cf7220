//! Type definitions, options and control codes.

use std::env;
use std::os::raw::c_uint;
use std::path::PathBuf;

/// An enumeration value from libclang (cursor kind, linkage, visibility,
/// availability, language, TLS kind or type kind), widened without loss.
pub type KindCode = i64;

/// What a traversal closure tells libclang to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildVisit {
    /// Stop the whole traversal.
    Break,
    /// Skip this cursor's children and continue with its siblings.
    Continue,
    /// Descend into this cursor's children.
    Recurse,
}

impl ChildVisit {
    /// Match a numeric control code. Anything but 0, 1 or 2 is `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ChildVisit::Break),
            1 => Some(ChildVisit::Continue),
            2 => Some(ChildVisit::Recurse),
            _ => None,
        }
    }

    /// The numeric code libclang expects.
    pub fn code(self) -> i32 {
        self.into()
    }
}

impl From<ChildVisit> for i32 {
    fn from(visit: ChildVisit) -> i32 {
        match visit {
            ChildVisit::Break => 0,
            ChildVisit::Continue => 1,
            ChildVisit::Recurse => 2,
        }
    }
}

/// How a call to `clang_visitChildren` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStatus {
    /// Every requested cursor was visited.
    Completed,
    /// A visitor returned [`ChildVisit::Break`].
    Stopped,
}

impl VisitStatus {
    /// The integer libclang returned: 0 when completed, non-zero when stopped.
    pub fn code(self) -> i64 {
        match self {
            VisitStatus::Completed => 0,
            VisitStatus::Stopped => 1,
        }
    }

    /// Whether the traversal ran to the end.
    pub fn is_completed(self) -> bool {
        self == VisitStatus::Completed
    }
}

impl From<c_uint> for VisitStatus {
    fn from(code: c_uint) -> Self {
        if code == 0 {
            VisitStatus::Completed
        } else {
            VisitStatus::Stopped
        }
    }
}

/// Translation unit parse options (`CXTranslationUnit_*`).
pub mod parse_flags {
    /// No special options.
    pub const NONE: u32 = 0x0;
    /// Keep a detailed preprocessing record (macro definitions and expansions).
    pub const DETAILED_PREPROCESSING_RECORD: u32 = 0x01;
    /// The unit is incomplete, e.g. a header parsed on its own.
    pub const INCOMPLETE: u32 = 0x02;
    /// Build a precompiled preamble.
    pub const PRECOMPILED_PREAMBLE: u32 = 0x04;
    /// Cache code-completion results.
    pub const CACHE_COMPLETION_RESULTS: u32 = 0x08;
    /// The unit will be serialized with `clang_saveTranslationUnit`.
    pub const FOR_SERIALIZATION: u32 = 0x10;
    /// Skip function bodies.
    pub const SKIP_FUNCTION_BODIES: u32 = 0x40;
    /// Include brief documentation comments in code completion.
    pub const INCLUDE_BRIEF_COMMENTS_IN_CODE_COMPLETION: u32 = 0x80;
    /// Do not stop at the first fatal error.
    pub const KEEP_GOING: u32 = 0x200;
    /// Parse only the main file, without following includes.
    pub const SINGLE_FILE_PARSE: u32 = 0x400;
}

/// Options for creating an index.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexOptions {
    /// Skip declarations that come from a precompiled header.
    pub exclude_declarations_from_pch: bool,
    /// Print diagnostics to stderr while parsing.
    pub display_diagnostics: bool,
}

/// A file whose contents are supplied from memory instead of disk.
#[derive(Debug, Clone)]
pub struct UnsavedFile {
    /// Path the parser should see.
    pub filename: String,
    /// File contents.
    pub contents: Vec<u8>,
}

impl UnsavedFile {
    /// Create an in-memory file.
    pub fn new(filename: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }
}

/// Where to find libclang.
#[derive(Debug, Clone, Default)]
pub struct LibraryConfig {
    /// A libclang shared library, or a directory containing one. `None`
    /// searches the platform's usual locations.
    pub path: Option<PathBuf>,
}

impl LibraryConfig {
    /// Environment variable naming the library or its directory.
    pub const PATH_VAR: &'static str = "LIBCLANG_PATH";

    /// Configuration from `LIBCLANG_PATH`, if set and non-empty.
    pub fn from_env() -> Self {
        let path = env::var_os(Self::PATH_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self { path }
    }

    /// Configuration pointing at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}
