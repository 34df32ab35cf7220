//! Error conversion utilities for FFI.

use super::raw::{
    CXErrorCode, CXError_ASTReadError, CXError_Crashed, CXError_Failure,
    CXError_InvalidArguments, CXError_Success,
};
use crate::error::{Error, ParseErrorKind, Result};

/// Map a `CXErrorCode` to a parse error kind. `None` means success.
pub fn parse_error_kind(code: CXErrorCode) -> Option<ParseErrorKind> {
    match code {
        CXError_Success => None,
        CXError_Failure => Some(ParseErrorKind::Failure),
        CXError_Crashed => Some(ParseErrorKind::Crashed),
        CXError_InvalidArguments => Some(ParseErrorKind::InvalidArguments),
        CXError_ASTReadError => Some(ParseErrorKind::AstRead),
        other => Some(ParseErrorKind::Unknown(other)),
    }
}

/// Check a parse status code and convert to Result.
pub fn check_parse(code: CXErrorCode, file: Option<&str>) -> Result<()> {
    match parse_error_kind(code) {
        None => Ok(()),
        Some(kind) => Err(Error::Parse {
            kind,
            file: file.map(str::to_string),
        }),
    }
}
