//! # quill-core
//!
//! Core types shared across all Quill crates:
//! - Entity structs mirroring backend resources (users, A/B tests, saved
//!   projects, templates, contents, settings, analytics)
//! - Status enums with state machine transitions
//! - Request payloads sent to the backend
//! - Client-side form validation with per-field messages
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod requests;
pub mod validation;
