// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod ops;
mod schema;
mod sqlite;

pub use sqlite::{SqliteStore, StoreTx};

use std::fmt::{Display, Formatter};

pub const CRATE_NAME: &str = "cgd-store";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    Validation,
    Conflict,
    Io,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation_error",
            Self::Conflict => "conflict",
            Self::Io => "io_error",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == StoreErrorCode::NotFound
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

pub(crate) fn map_sqlite_error(err: rusqlite::Error) -> StoreError {
    use rusqlite::ffi::ErrorCode;
    match &err {
        rusqlite::Error::QueryReturnedNoRows => {
            StoreError::new(StoreErrorCode::NotFound, "no record matched the key")
        }
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::ConstraintViolation => {
                StoreError::new(StoreErrorCode::Conflict, err.to_string())
            }
            ErrorCode::CannotOpen | ErrorCode::DiskFull | ErrorCode::ReadOnly => {
                StoreError::new(StoreErrorCode::Io, err.to_string())
            }
            _ => StoreError::new(StoreErrorCode::Internal, err.to_string()),
        },
        _ => StoreError::new(StoreErrorCode::Internal, err.to_string()),
    }
}
