//! Mutations: write operations with post-success cache invalidation.

use std::error::Error as StdError;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::client::QueryClient;
use crate::error::{BoxError, MutationError};
use crate::event::CacheEvent;
use crate::key::QueryKey;

type MutateFn<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, Result<O, BoxError>> + Send + Sync>;
type InvalidatesFn<I, O> = Arc<dyn Fn(&I, &O) -> Vec<QueryKey> + Send + Sync>;
type UpdateFn<I, O> = Arc<dyn Fn(&QueryClient, &I, &O) + Send + Sync>;

/// Observable state of a mutation.
#[derive(Debug, Clone, Default)]
pub struct MutationState {
    /// Calls currently in flight.
    pub pending: usize,
    /// Error of the most recent failed call, cleared by the next call.
    pub error: Option<MutationError>,
    pub successes: u64,
    pub failures: u64,
}

impl MutationState {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending > 0
    }
}

/// A write operation bound to a cache.
///
/// On success the mutation first applies its direct cache updates, then
/// invalidates every declared key prefix, then publishes
/// [`CacheEvent::MutationSucceeded`]. On failure it only records the error
/// and publishes [`CacheEvent::MutationFailed`].
pub struct Mutation<I, O> {
    client: QueryClient,
    name: String,
    mutate: MutateFn<I, O>,
    invalidates: InvalidatesFn<I, O>,
    updates: Option<UpdateFn<I, O>>,
    state: Arc<Mutex<MutationState>>,
}

impl<I, O> Clone for Mutation<I, O> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            name: self.name.clone(),
            mutate: Arc::clone(&self.mutate),
            invalidates: Arc::clone(&self.invalidates),
            updates: self.updates.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<I, O> Mutation<I, O>
where
    I: Clone + Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    pub(crate) fn new<F, Fut, E>(client: QueryClient, name: String, mutate: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        let mutate: MutateFn<I, O> = Arc::new(move |input| {
            mutate(input)
                .map(|result| result.map_err(|error| Box::new(error) as BoxError))
                .boxed()
        });
        Self {
            client,
            name,
            mutate,
            invalidates: Arc::new(|_, _| Vec::new()),
            updates: None,
            state: Arc::new(Mutex::new(MutationState::default())),
        }
    }

    /// Declare the key prefixes to invalidate after a successful call.
    #[must_use]
    pub fn invalidates(
        mut self,
        keys: impl Fn(&I, &O) -> Vec<QueryKey> + Send + Sync + 'static,
    ) -> Self {
        self.invalidates = Arc::new(keys);
        self
    }

    /// Write directly into the cache after a successful call, before the
    /// declared invalidations run.
    #[must_use]
    pub fn updates(
        mut self,
        update: impl Fn(&QueryClient, &I, &O) + Send + Sync + 'static,
    ) -> Self {
        self.updates = Some(Arc::new(update));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn state(&self) -> MutationState {
        self.lock_state().clone()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock_state().is_pending()
    }

    #[must_use]
    pub fn error(&self) -> Option<MutationError> {
        self.lock_state().error.clone()
    }

    /// Clear the recorded error.
    pub fn reset(&self) {
        self.lock_state().error = None;
    }

    /// Run the write.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Failed`] wrapping the mutate function's
    /// error. The cache is not modified in that case.
    pub async fn mutate(&self, input: I) -> Result<O, MutationError> {
        let pending = Pending::start(&self.state);
        let result = (self.mutate)(input.clone()).await;
        drop(pending);

        match result {
            Ok(output) => {
                if let Some(update) = &self.updates {
                    update(&self.client, &input, &output);
                }
                let prefixes = (self.invalidates)(&input, &output);
                for prefix in &prefixes {
                    self.client.invalidate(prefix);
                }
                self.lock_state().successes += 1;
                tracing::debug!(mutation = %self.name, invalidated = prefixes.len(), "mutation succeeded");
                self.client.emit(CacheEvent::MutationSucceeded {
                    name: self.name.clone(),
                });
                Ok(output)
            }
            Err(error) => {
                let error = MutationError::from_box(error);
                {
                    let mut state = self.lock_state();
                    state.failures += 1;
                    state.error = Some(error.clone());
                }
                tracing::warn!(mutation = %self.name, %error, "mutation failed");
                self.client.emit(CacheEvent::MutationFailed {
                    name: self.name.clone(),
                    message: error.to_string(),
                });
                Err(error)
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, MutationState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<MutationState>) -> MutexGuard<'_, MutationState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One in-flight call. Dropping it ends the call, including when the
/// caller cancels the `mutate` future.
struct Pending<'a> {
    state: &'a Mutex<MutationState>,
}

impl<'a> Pending<'a> {
    fn start(state: &'a Mutex<MutationState>) -> Self {
        let mut guard = lock(state);
        guard.pending += 1;
        guard.error = None;
        drop(guard);
        Self { state }
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        state.pending = state.pending.saturating_sub(1);
    }
}

impl<I, O> std::fmt::Debug for Mutation<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mutation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
