//! # quill-auth
//!
//! Client-side authentication state for Quill.
//!
//! - [`storage`]: the persisted key/value store holding the bearer token
//!   and the mock-backend flag, with a file implementation (0600 JSON
//!   file) and an in-memory one for tests.
//! - [`session`]: the `Loading -> Authenticated | Unauthenticated` state
//!   machine, including the sticky override after a rejected token.
//! - [`guard`]: the per-navigation route decision derived from a session.

pub mod error;
pub mod guard;
pub mod session;
pub mod storage;

pub use error::AuthError;
pub use guard::{GuardDecision, RouteGuard};
pub use session::{Session, SessionEvent, SessionState};
pub use storage::{ClientStorage, FileStorage, MemoryStorage};
