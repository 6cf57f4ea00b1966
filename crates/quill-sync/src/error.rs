use quill_api::ApiError;
use quill_auth::AuthError;
use quill_config::ConfigError;
use quill_core::validation::ValidationErrors;
use quill_query::MutationError;
use thiserror::Error;

/// Failures while composing the app or running a flow that spans services
/// and client storage.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Outcome of submitting a form through a mutation.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form was rejected locally; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Mutation(#[from] MutationError),
}

impl SubmitError {
    /// Validation message for `field`, if the form was rejected locally.
    #[must_use]
    pub fn field_message(&self, field: &str) -> Option<&str> {
        match self {
            Self::Invalid(errors) => errors.message_for(field),
            Self::Mutation(_) => None,
        }
    }

    /// The backend error behind a failed mutation.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Mutation(error) => error
                .source_as::<ApiError>()
                .or_else(|| match error.source_as::<SyncError>() {
                    Some(SyncError::Api(api)) => Some(api),
                    _ => None,
                }),
            Self::Invalid(_) => None,
        }
    }
}
