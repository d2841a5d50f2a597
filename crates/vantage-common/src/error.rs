//! Error types and error codes for Vantage
//!
//! This module defines:
//! - `VantageError`: errors raised while building or checking contract values
//! - `ErrorCode`: structured error codes carried in API envelopes

use serde::{Deserialize, Serialize};

/// Errors raised by the contract layer
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VantageError {
    #[error("caused: {0}")]
    IllegalArgument(String),

    #[error("contract violation: {0}")]
    ContractViolation(String),

    #[error("{message}")]
    ApiError { code: i32, message: String },
}

impl VantageError {
    pub fn api(code: ErrorCode<'_>) -> Self {
        VantageError::ApiError {
            code: code.code,
            message: code.message.to_string(),
        }
    }
}

/// Error code structure for API responses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

// General success and error codes
pub const SUCCESS: ErrorCode<'static> = ErrorCode {
    code: 0,
    message: "success",
};

/// Alternate success code used by HTTP-style backends
pub const HTTP_OK: ErrorCode<'static> = ErrorCode {
    code: 200,
    message: "ok",
};

pub const PARAMETER_MISSING: ErrorCode<'static> = ErrorCode {
    code: 10000,
    message: "parameter missing",
};

pub const ACCESS_DENIED: ErrorCode<'static> = ErrorCode {
    code: 10001,
    message: "access denied",
};

pub const UNAUTHORIZED: ErrorCode<'static> = ErrorCode {
    code: 10003,
    message: "unauthorized",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20004,
    message: "resource not found",
};

pub const EXPORT_FAILED: ErrorCode<'static> = ErrorCode {
    code: 20010,
    message: "export failed",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};

/// Whether `code` belongs to the success class of envelope codes
pub fn is_success_code(code: i32) -> bool {
    code == SUCCESS.code || code == HTTP_OK.code
}
