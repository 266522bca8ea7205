//! Errors raised by tracker rules.
//!
//! Authentication failures belong to the application layer; the domain only
//! knows about rejected input, missing records and refused operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Submitted fields break a rule (blank name, unknown literal, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password error: {0}")]
    Password(String),

    /// Named record does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Named record collides with an existing one
    #[error("{0} already exists")]
    Conflict(String),

    /// The policy refused the operation for this actor
    #[error("Permission denied")]
    Forbidden,

    /// Hashing or another rule helper failed unexpectedly
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        DomainError::NotFound(what.into())
    }

    pub fn conflict(what: impl Into<String>) -> Self {
        DomainError::Conflict(what.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
