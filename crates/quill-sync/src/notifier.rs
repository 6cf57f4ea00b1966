//! Toasts derived from cache events.
//!
//! Mutations never show notifications themselves. The notifier listens to
//! the cache's event stream and turns mutation outcomes into [`Toast`]s for
//! whatever front end is attached.

use std::fmt;

use quill_query::CacheEvent;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::hooks::names;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)?;
        if let Some(description) = &self.description {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

/// Maps mutation events to toasts. Fetch and invalidation events are
/// silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Notifier;

impl Notifier {
    #[must_use]
    pub fn toast_for(self, event: &CacheEvent) -> Option<Toast> {
        match event {
            CacheEvent::MutationSucceeded { name } => success_title(name).map(|title| Toast {
                title: title.to_string(),
                description: None,
                variant: ToastVariant::Success,
            }),
            CacheEvent::MutationFailed { name, message } => Some(Toast {
                title: failure_title(name).to_string(),
                description: Some(message.clone()),
                variant: ToastVariant::Error,
            }),
            _ => None,
        }
    }

    /// Forward toasts from `events` into `toasts` until either side closes.
    ///
    /// A lagging receiver skips the events it missed and keeps going.
    pub fn spawn(
        self,
        mut events: broadcast::Receiver<CacheEvent>,
        toasts: mpsc::UnboundedSender<Toast>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        if let Some(toast) = self.toast_for(&event)
                            && toasts.send(toast).is_err()
                        {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "notifier lagged behind cache events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            tracing::debug!("notifier stopped");
        })
    }
}

fn success_title(name: &str) -> Option<&'static str> {
    let title = match name {
        names::CREATE_AB_TEST => "A/B test created",
        names::START_AB_TEST => "A/B test started",
        names::COMPLETE_AB_TEST => "A/B test completed",
        names::RECORD_AB_METRIC => "Metric recorded",
        names::DELETE_AB_TEST => "A/B test deleted",
        names::CREATE_SAVED_PROJECT => "Project saved",
        names::UPDATE_SAVED_PROJECT => "Project updated",
        names::DELETE_SAVED_PROJECT => "Project deleted",
        names::CREATE_TEMPLATE => "Template created",
        names::UPDATE_TEMPLATE => "Template updated",
        names::DELETE_TEMPLATE => "Template deleted",
        names::CREATE_CONTENT => "Content created",
        names::UPDATE_CONTENT => "Content updated",
        names::DELETE_CONTENT => "Content deleted",
        names::ENHANCE_CONTENT => "Content enhanced",
        names::GENERATE_CONTENT => "Content generated",
        names::UPDATE_ACCOUNT => "Account updated",
        names::UPDATE_APPEARANCE => "Appearance updated",
        names::CHANGE_PASSWORD => "Password changed",
        names::LOGIN => "Welcome back",
        _ => return None,
    };
    Some(title)
}

fn failure_title(name: &str) -> &'static str {
    match name {
        names::CREATE_AB_TEST => "Failed to create A/B test",
        names::START_AB_TEST => "Failed to start A/B test",
        names::COMPLETE_AB_TEST => "Failed to complete A/B test",
        names::RECORD_AB_METRIC => "Failed to record metric",
        names::DELETE_AB_TEST => "Failed to delete A/B test",
        names::CREATE_SAVED_PROJECT
        | names::UPDATE_SAVED_PROJECT
        | names::DELETE_SAVED_PROJECT => "Failed to save project",
        names::CREATE_TEMPLATE | names::UPDATE_TEMPLATE | names::DELETE_TEMPLATE => {
            "Failed to save template"
        }
        names::ENHANCE_CONTENT => "Failed to enhance content",
        names::GENERATE_CONTENT => "Failed to generate content",
        names::ANALYZE_SEO => "SEO analysis failed",
        names::UPDATE_ACCOUNT | names::UPDATE_APPEARANCE => "Failed to update settings",
        names::CHANGE_PASSWORD => "Failed to change password",
        names::LOGIN => "Login failed",
        _ => "Something went wrong",
    }
}
