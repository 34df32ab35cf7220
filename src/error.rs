//! Error types for the cindex crate.

use std::fmt;

use thiserror::Error;

/// Result type alias for cindex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for cindex operations.
#[derive(Error, Debug)]
pub enum Error {
    /// libclang could not be opened.
    #[error("failed to load libclang from {path:?}: {message}")]
    Load {
        /// Path that was tried last.
        path: String,
        /// Loader error message.
        message: String,
    },

    /// libclang was opened but lacks a required function.
    #[error("libclang does not export `{name}`")]
    MissingSymbol {
        /// Symbol name.
        name: String,
    },

    /// `clang_parseTranslationUnit2` returned a non-success code.
    #[error("clang_parseTranslationUnit2 failed for {}: {kind}", .file.as_deref().unwrap_or("<args>"))]
    Parse {
        /// What libclang reported.
        kind: ParseErrorKind,
        /// Source file passed to the parser, if any.
        file: Option<String>,
    },

    /// A string or list argument could not be handed to libclang.
    #[error("{op}: invalid argument: {message}")]
    InvalidArgument {
        /// Operation that rejected the argument.
        op: &'static str,
        /// What was wrong.
        message: String,
    },

    /// libclang returned a null handle where a resource was expected.
    #[error("{op} returned a null handle")]
    NullHandle {
        /// Operation that returned it.
        op: &'static str,
    },

    /// A kind code does not fit the C enum it is narrowed to.
    #[error("{op}: kind code {code} is out of range")]
    KindOutOfRange {
        /// Operation that received the code.
        op: &'static str,
        /// The rejected code.
        code: i64,
    },
}

impl Error {
    /// Check if this is a parse failure.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// Check if this is a library loading error.
    pub fn is_load(&self) -> bool {
        matches!(self, Error::Load { .. } | Error::MissingSymbol { .. })
    }

    /// Check if this is an argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument { .. } | Error::KindOutOfRange { .. }
        )
    }
}

/// Failure reported by `clang_parseTranslationUnit2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Generic failure, e.g. the source file does not exist.
    Failure,
    /// libclang crashed while parsing.
    Crashed,
    /// The arguments were rejected.
    InvalidArguments,
    /// An AST file could not be deserialized.
    AstRead,
    /// A code this crate does not know.
    Unknown(i32),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Failure => f.write_str("failure"),
            ParseErrorKind::Crashed => f.write_str("crashed"),
            ParseErrorKind::InvalidArguments => f.write_str("invalid arguments"),
            ParseErrorKind::AstRead => f.write_str("AST read error"),
            ParseErrorKind::Unknown(code) => write!(f, "unknown error code {code}"),
        }
    }
}
