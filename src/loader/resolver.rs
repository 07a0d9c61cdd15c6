use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};

/// A failure reported by a fetch for a single key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LoadError {
    message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Every per-key failure of one submission, rendered one message per line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .messages.join("\n"))]
pub struct BatchError {
    messages: Vec<String>,
}

impl BatchError {
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Per-key outcome of a fetch. Keys missing from the map resolved to nothing.
pub type FetchResults<K, V> = HashMap<K, std::result::Result<V, LoadError>>;

/// The fetch behind a [`BatchedResolver`].
///
/// `load` is called once per batch with deduplicated keys.
pub trait BatchFn: Send + Sync + 'static {
    type Key: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;
    type Value: Clone + Send + Sync + 'static;

    fn load(
        &self,
        keys: &[Self::Key],
    ) -> impl Future<Output = FetchResults<Self::Key, Self::Value>> + Send;
}

/// Batch window tuning. The default is a single-yield window with no cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// How long the first awaiting handle waits before closing the batch.
    /// Zero means a single yield to the executor.
    pub delay: Duration,
    /// Keys per fetch. Zero means unbounded.
    pub max_batch_size: usize,
}

/// The outcome of one [`Deferred`]: one slot per submitted key, in
/// submission order, plus the aggregate error if any slot failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<V> {
    pub results: Vec<std::result::Result<Option<V>, LoadError>>,
    pub error: Option<BatchError>,
}

impl<V> Loaded<V> {
    fn new(results: Vec<std::result::Result<Option<V>, LoadError>>) -> Self {
        let messages: Vec<String> = results
            .iter()
            .filter_map(|slot| slot.as_ref().err())
            .map(|err| err.message().to_string())
            .collect();
        let error = (!messages.is_empty()).then_some(BatchError { messages });
        Self { results, error }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Splits into the partial values (failed slots become `None`) and the
    /// aggregate error.
    pub fn into_parts(self) -> (Vec<Option<V>>, Option<BatchError>) {
        let values = self
            .results
            .into_iter()
            .map(|slot| slot.ok().flatten())
            .collect();
        (values, self.error)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Batch<K, V> {
    keys: Mutex<Vec<K>>,
    /// Set once the keys have been handed to the fetch.
    dispatched: AtomicBool,
    results: OnceCell<FetchResults<K, V>>,
}

impl<K, V> Batch<K, V> {
    fn new() -> Self {
        Self {
            keys: Mutex::new(Vec::new()),
            dispatched: AtomicBool::new(false),
            results: OnceCell::new(),
        }
    }
}

struct State<K, V> {
    /// The batch still accepting keys, if any.
    open: Option<Arc<Batch<K, V>>>,
    /// Every key ever submitted, mapped to the batch that fetches it.
    known: HashMap<K, Arc<Batch<K, V>>>,
    dispatched: usize,
    fetched_keys: usize,
}

struct Shared<F: BatchFn> {
    name: &'static str,
    fetch: F,
    options: BatchOptions,
    state: Mutex<State<F::Key, F::Value>>,
}

impl<F: BatchFn> Shared<F> {
    fn open_batch(&self, state: &mut State<F::Key, F::Value>) -> Arc<Batch<F::Key, F::Value>> {
        let limit = self.options.max_batch_size;
        if let Some(open) = &state.open {
            if limit == 0 || lock(&open.keys).len() < limit {
                return Arc::clone(open);
            }
        }
        let batch = Arc::new(Batch::new());
        state.open = Some(Arc::clone(&batch));
        batch
    }

    /// Closes the batch window and runs the fetch. Only ever called from
    /// the batch's `OnceCell` initializer.
    ///
    /// The keys go to the fetch at most once. If the future running the
    /// fetch is dropped, the next initializer reports every key as failed
    /// instead of fetching again.
    async fn dispatch(&self, batch: &Arc<Batch<F::Key, F::Value>>) -> FetchResults<F::Key, F::Value> {
        if batch.dispatched.load(Ordering::Acquire) {
            return abandoned(&lock(&batch.keys));
        }

        if self.options.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.options.delay).await;
        }

        let keys = {
            let mut state = lock(&self.state);
            if state.open.as_ref().is_some_and(|open| Arc::ptr_eq(open, batch)) {
                state.open = None;
            }
            let keys = lock(&batch.keys).clone();
            if batch.dispatched.swap(true, Ordering::AcqRel) {
                return abandoned(&keys);
            }
            state.dispatched += 1;
            state.fetched_keys += keys.len();
            keys
        };

        debug!(relation = self.name, keys = keys.len(), "dispatching batch");
        self.fetch.load(&keys).await
    }
}

fn abandoned<K, V>(keys: &[K]) -> FetchResults<K, V>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    warn!(keys = keys.len(), "batch fetch was dropped before completing");
    keys.iter()
        .map(|key| {
            let err = LoadError::new(format!("fetch for key {key:?} was cancelled"));
            (key.clone(), Err(err))
        })
        .collect()
}

/// Collects keys from any number of [`submit`](Self::submit) calls and
/// fetches each distinct key once.
///
/// Cloning shares the same batches and cache.
pub struct BatchedResolver<F: BatchFn> {
    shared: Arc<Shared<F>>,
}

impl<F: BatchFn> Clone for BatchedResolver<F> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<F: BatchFn> BatchedResolver<F> {
    pub fn new(name: &'static str, fetch: F, options: BatchOptions) -> Self {
        Self {
            shared: Arc::new(Shared {
                name,
                fetch,
                options,
                state: Mutex::new(State {
                    open: None,
                    known: HashMap::new(),
                    dispatched: 0,
                    fetched_keys: 0,
                }),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.shared.name
    }

    pub fn fetcher(&self) -> &F {
        &self.shared.fetch
    }

    /// Number of fetches run so far.
    pub fn dispatched_batches(&self) -> usize {
        lock(&self.shared.state).dispatched
    }

    /// Total keys handed to the fetch so far.
    pub fn fetched_keys(&self) -> usize {
        lock(&self.shared.state).fetched_keys
    }

    /// Registers `keys` and returns a handle for their results.
    ///
    /// Registration happens here, not when the handle is awaited, so every
    /// submission made before the batch window closes lands in one fetch.
    pub fn submit<I>(&self, keys: I) -> Deferred<F>
    where
        I: IntoIterator<Item = F::Key>,
    {
        let keys: Vec<F::Key> = keys.into_iter().collect();
        let mut batches = Vec::with_capacity(keys.len());
        let mut added = 0;
        {
            let mut state = lock(&self.shared.state);
            for key in &keys {
                let batch = match state.known.get(key).cloned() {
                    Some(batch) => batch,
                    None => {
                        let batch = self.shared.open_batch(&mut state);
                        lock(&batch.keys).push(key.clone());
                        state.known.insert(key.clone(), Arc::clone(&batch));
                        added += 1;
                        batch
                    }
                };
                batches.push(batch);
            }
        }

        trace!(
            relation = self.shared.name,
            submitted = keys.len(),
            new = added,
            "keys submitted"
        );

        Deferred {
            inner: Arc::new(DeferredInner {
                shared: Arc::clone(&self.shared),
                keys,
                batches,
                outcome: OnceCell::new(),
            }),
        }
    }
}

struct DeferredInner<F: BatchFn> {
    shared: Arc<Shared<F>>,
    keys: Vec<F::Key>,
    /// The batch serving each key, parallel to `keys`.
    batches: Vec<Arc<Batch<F::Key, F::Value>>>,
    outcome: OnceCell<Loaded<F::Value>>,
}

impl<F: BatchFn> DeferredInner<F> {
    async fn assemble(&self) -> Loaded<F::Value> {
        let mut results = Vec::with_capacity(self.keys.len());
        for (key, batch) in self.keys.iter().zip(&self.batches) {
            let fetched = batch
                .results
                .get_or_init(|| self.shared.dispatch(batch))
                .await;
            results.push(match fetched.get(key) {
                Some(Ok(value)) => Ok(Some(value.clone())),
                Some(Err(err)) => Err(err.clone()),
                None => Ok(None),
            });
        }
        Loaded::new(results)
    }
}

/// Handle to the results of one [`BatchedResolver::submit`] call.
///
/// Awaiting [`get`](Self::get) from any number of clones runs the
/// underlying work once; later calls return the memoized outcome.
pub struct Deferred<F: BatchFn> {
    inner: Arc<DeferredInner<F>>,
}

impl<F: BatchFn> Clone for Deferred<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: BatchFn> Deferred<F> {
    pub fn keys(&self) -> &[F::Key] {
        &self.inner.keys
    }

    pub async fn get(&self) -> Loaded<F::Value> {
        self.inner
            .outcome
            .get_or_init(|| self.inner.assemble())
            .await
            .clone()
    }
}
