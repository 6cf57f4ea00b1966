//! # quill-sync
//!
//! The dashboard's data layer, assembled:
//! - [`keys`]: the cache key of every resource
//! - [`hooks`]: per-resource queries and invalidating mutations
//! - [`AuthContext`]: drives the session from the current-user query,
//!   token verification, login and logout
//! - [`forms::submit`]: validate locally, then mutate
//! - [`Notifier`]: toasts from mutation events
//! - [`App`]: the composition root that owns one cache and one backend

pub mod app;
pub mod auth_context;
pub mod error;
pub mod forms;
pub mod hooks;
pub mod keys;
pub mod notifier;

pub use app::App;
pub use auth_context::AuthContext;
pub use error::{SubmitError, SyncError};
pub use notifier::{Notifier, Toast, ToastVariant};
