//! Errors raised by the core types themselves.
//!
//! Service, cache and session failures have their own enums in
//! `quill-api`, `quill-query` and `quill-auth`.

use thiserror::Error;

use crate::enums::AbTestStatus;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An unknown enum name or an out-of-range value.
    #[error("{0}")]
    Validation(String),

    #[error("cannot move A/B test from {from} to {to}")]
    InvalidTransition { from: AbTestStatus, to: AbTestStatus },
}
