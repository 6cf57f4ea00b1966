use quill_query::CacheEvent;
use quill_sync::{Notifier, ToastVariant};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::cli::GlobalFlags;

/// Print the toasts raised while the command ran.
pub fn drain(events: &mut broadcast::Receiver<CacheEvent>, flags: GlobalFlags) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                let Some(toast) = Notifier.toast_for(&event) else {
                    continue;
                };
                match toast.variant {
                    ToastVariant::Success if !flags.quiet => eprintln!("✓ {toast}"),
                    ToastVariant::Success => {}
                    ToastVariant::Error => tracing::warn!(%toast, "mutation failed"),
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "dropped cache events");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}
