use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use analyzer::{
    Catalogue, CatalogueBuilder, Evaluation, GraphScope, Token, evaluate_cancellable, structure,
};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::{CompletionItem, EngineConfig, IdeError};

/// A published completion result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSnapshot {
    pub generation: u64,
    pub input: String,
    pub items: Vec<CompletionItem>,
    pub evaluation: Evaluation,
    /// `evaluation.path` after the structuring pass.
    pub tree: Vec<Token>,
}

/// Dispatches completion requests and keeps the most recent published result.
///
/// Cloning is cheap; clones share the catalogue, the generation counter and the current
/// snapshot.
#[derive(Clone)]
pub struct CompletionEngine {
    inner: Arc<Inner>,
}

struct Inner {
    catalogue: Arc<Catalogue>,
    config: EngineConfig,
    generation: AtomicU64,
    current: Mutex<Option<Arc<CompletionSnapshot>>>,
    in_flight: Mutex<Option<CancellationToken>>,
    /// Runs once on the worker after an evaluation that will be published.
    #[cfg(test)]
    before_publish: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl CompletionEngine {
    pub fn new(catalogue: Arc<Catalogue>, config: EngineConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                catalogue,
                config,
                generation: AtomicU64::new(0),
                current: Mutex::new(None),
                in_flight: Mutex::new(None),
                #[cfg(test)]
                before_publish: Mutex::new(None),
            }),
        }
    }

    /// Builds the catalogue on the blocking pool, then creates the engine.
    pub async fn build(builder: CatalogueBuilder, config: EngineConfig) -> Result<Self, IdeError> {
        let catalogue = tokio::task::spawn_blocking(move || builder.build())
            .await
            .map_err(IdeError::CatalogueBuild)?;
        debug!(types = catalogue.len(), "catalogue built");
        Ok(Self::new(Arc::new(catalogue), config))
    }

    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.inner.catalogue
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Generation of the most recently dispatched request (0 before the first one).
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// The last published snapshot.
    pub fn current(&self) -> Option<Arc<CompletionSnapshot>> {
        self.inner.current.lock().clone()
    }

    /// Dispatches a request for `input` (the text before the cursor).
    ///
    /// The handle yields `None` when a newer request was dispatched before this one
    /// finished, or when it was cancelled.
    pub fn request(
        &self,
        input: impl Into<String>,
        scope: GraphScope,
    ) -> JoinHandle<Option<Arc<CompletionSnapshot>>> {
        let input = input.into();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();
        let superseded = self.inner.in_flight.lock().replace(cancel.clone());
        if let Some(previous) = superseded
            && self.inner.config.cancel_superseded
        {
            previous.cancel();
        }
        debug!(generation, input = %input, "completion requested");

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let worker = Arc::clone(&inner);
            let result = tokio::task::spawn_blocking(move || {
                let snapshot = worker.run(input, &scope, generation, &cancel);
                if snapshot.is_some() {
                    worker.before_publish();
                }
                snapshot
            })
            .await;

            match result {
                Ok(Some(snapshot)) => inner.publish(snapshot),
                Ok(None) => {
                    debug!(generation, "completion superseded");
                    None
                }
                Err(err) => {
                    warn!(generation, error = %IdeError::Evaluation(err), "completion dropped");
                    None
                }
            }
        })
    }

    /// Like [`request`](Self::request), but hands the snapshot to `on_publish` instead.
    /// The callback is not invoked for superseded requests.
    pub fn request_with<F>(
        &self,
        input: impl Into<String>,
        scope: GraphScope,
        on_publish: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(Arc<CompletionSnapshot>) + Send + 'static,
    {
        let handle = self.request(input, scope);
        tokio::spawn(async move {
            if let Ok(Some(snapshot)) = handle.await {
                on_publish(snapshot);
            }
        })
    }

    /// Dispatches a request and waits for it.
    pub async fn complete(
        &self,
        input: impl Into<String>,
        scope: GraphScope,
    ) -> Result<Option<Arc<CompletionSnapshot>>, IdeError> {
        self.request(input, scope).await.map_err(IdeError::Evaluation)
    }

    /// Installs a one-shot hook that the next evaluating worker runs right before publishing.
    #[cfg(test)]
    pub(crate) fn set_before_publish(&self, hook: impl FnOnce() + Send + 'static) {
        *self.inner.before_publish.lock() = Some(Box::new(hook));
    }
}

impl Inner {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    #[cfg(test)]
    fn before_publish(&self) {
        let hook = self.before_publish.lock().take();
        if let Some(hook) = hook {
            hook();
        }
    }

    #[cfg(not(test))]
    fn before_publish(&self) {}

    fn run(
        &self,
        input: String,
        scope: &GraphScope,
        generation: u64,
        cancel: &CancellationToken,
    ) -> Option<CompletionSnapshot> {
        if !self.is_current(generation) {
            return None;
        }
        let evaluation = evaluate_cancellable(
            &input,
            &self.catalogue,
            scope,
            &self.config.resolver,
            Some(cancel),
        )?;
        let tree = structure(&evaluation.path);

        let mut items: Vec<CompletionItem> = evaluation
            .completions
            .iter()
            .map(|token| CompletionItem::from_token(token, &self.catalogue))
            .collect();
        if let Some(max) = self.config.max_items {
            items.truncate(max);
        }
        trace!(generation, items = items.len(), "completion resolved");

        Some(CompletionSnapshot {
            generation,
            input,
            items,
            evaluation,
            tree,
        })
    }

    fn publish(&self, snapshot: CompletionSnapshot) -> Option<Arc<CompletionSnapshot>> {
        let mut current = self.current.lock();
        if !self.is_current(snapshot.generation) {
            debug!(generation = snapshot.generation, "stale completion discarded");
            return None;
        }
        let snapshot = Arc::new(snapshot);
        *current = Some(Arc::clone(&snapshot));
        debug!(
            generation = snapshot.generation,
            items = snapshot.items.len(),
            "completion published"
        );
        Some(snapshot)
    }
}
