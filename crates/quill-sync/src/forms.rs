//! Form submission: validate locally, then fire the mutation.

use quill_core::validation::Validate;
use quill_query::Mutation;

use crate::error::SubmitError;

/// Validate `form` and, only if every field passes, run `mutation` with the
/// resulting payload.
///
/// # Errors
///
/// Returns [`SubmitError::Invalid`] without touching the network when
/// validation fails, or [`SubmitError::Mutation`] when the write fails.
pub async fn submit<F, O>(form: &F, mutation: &Mutation<F::Output, O>) -> Result<O, SubmitError>
where
    F: Validate,
    F::Output: Clone + Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    let payload = form.validate().inspect_err(|errors| {
        tracing::debug!(mutation = mutation.name(), %errors, "form rejected before submit");
    })?;
    Ok(mutation.mutate(payload).await?)
}
