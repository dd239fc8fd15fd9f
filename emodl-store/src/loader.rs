//! Concurrent emote loading.
//!
//! [`EmoteLoader::load`] runs one task per fetch. Tasks never touch the
//! catalog: each one normalizes its records and sends a single message to
//! the merge consumer, which is the only writer of the catalog.
//!
//! ```text
//!   global/user tasks ──┐
//!   7TV user task ──► set tasks ──┤──► mpsc ──► merge consumer ──► EmoteCatalog
//!                                 │                 ▲
//!                   deadline ─────┴── cancel ───────┘
//! ```
//!
//! Every task holds a clone of the sender, so the channel closes only after
//! the last task (including set tasks spawned by a user lookup) has
//! finished. That closure is the fan-out barrier. If the deadline passes
//! first, the consumer is cancelled and the catalog merged so far is
//! returned. Tasks still in flight keep running; their late messages are
//! discarded.
//!
//! Each fetch body runs in its own inner task. A panic there is reported as
//! a [`FetchError::TaskPanicked`] failure of that fetch, so a crashed task
//! can never look like a provider that returned nothing.
//!
//! Batches merge in completion order. When two providers share a name, the
//! one that finished last wins, and that order is not deterministic.

use chrono::{DateTime, Utc};
use emodl_core::{ProviderKind, UserScope};
use emodl_fetch::{FetchContext, FetchError, FetchSettings};
use emodl_providers::{EmoteSource, ProviderRegistry, UserEmotes};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::{EmoteBatch, EmoteCatalog};
use crate::error::{FetchStage, JoinedError, LoadError, ProviderFailure};

// ============================================================================
// Options
// ============================================================================

/// Default aggregation deadline.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// What to load from one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOptions {
    /// Whether the provider is loaded at all.
    pub enabled: bool,
    /// Optional user/channel whose emotes are added to the global ones.
    pub scope: Option<UserScope>,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            scope: None,
        }
    }
}

impl ProviderOptions {
    /// Options for a disabled provider.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            scope: None,
        }
    }

    /// Returns options with a user scope.
    pub fn with_scope(mut self, scope: UserScope) -> Self {
        self.scope = Some(scope);
        self
    }
}

/// Options for one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// BTTV options.
    pub bttv: ProviderOptions,
    /// FFZ options.
    pub ffz: ProviderOptions,
    /// 7TV options.
    pub seven_tv: ProviderOptions,
    /// Upper bound on the whole load.
    pub deadline: Duration,
    /// Timeout of each HTTP request.
    pub http_timeout: Duration,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            bttv: ProviderOptions::default(),
            ffz: ProviderOptions::default(),
            seven_tv: ProviderOptions::default(),
            deadline: DEFAULT_DEADLINE,
            http_timeout: settings.timeout,
        }
    }
}

impl LoaderOptions {
    /// Returns options with a custom deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Returns options with a custom HTTP timeout.
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Returns options with one provider replaced.
    pub fn with_provider(mut self, kind: ProviderKind, options: ProviderOptions) -> Self {
        *self.provider_mut(kind) = options;
        self
    }

    /// Returns the options of a provider.
    pub fn provider(&self, kind: ProviderKind) -> &ProviderOptions {
        match kind {
            ProviderKind::Bttv => &self.bttv,
            ProviderKind::Ffz => &self.ffz,
            ProviderKind::SevenTv => &self.seven_tv,
        }
    }

    /// Returns the options of a provider for editing.
    pub fn provider_mut(&mut self, kind: ProviderKind) -> &mut ProviderOptions {
        match kind {
            ProviderKind::Bttv => &mut self.bttv,
            ProviderKind::Ffz => &mut self.ffz,
            ProviderKind::SevenTv => &mut self.seven_tv,
        }
    }

    /// Returns the enabled providers.
    pub fn enabled(&self) -> Vec<ProviderKind> {
        ProviderKind::all()
            .iter()
            .copied()
            .filter(|kind| self.provider(*kind).enabled)
            .collect()
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// How a load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Every task succeeded before the deadline.
    Complete,
    /// Some data was merged, but a task failed or the deadline passed.
    Partial,
    /// Nothing was merged and a task failed or the deadline passed.
    Failed,
}

/// Result of [`EmoteLoader::load`].
#[derive(Debug)]
pub struct LoadOutcome {
    /// Everything merged before the load returned.
    pub catalog: EmoteCatalog,
    /// Failures of individual tasks.
    pub errors: JoinedError,
    /// Whether the deadline passed before every task finished.
    pub timed_out: bool,
    /// The deadline the load ran under.
    pub deadline: Duration,
    /// Wall time of the load.
    pub duration: Duration,
    /// When the load returned.
    pub finished_at: DateTime<Utc>,
    /// Whether the merge consumer crashed. Its catalog and errors are lost.
    pub merge_failed: bool,
}

impl LoadOutcome {
    /// Classifies the outcome.
    pub fn status(&self) -> LoadStatus {
        if self.merge_failed {
            return LoadStatus::Failed;
        }
        let clean = self.errors.is_empty() && !self.timed_out;
        if clean {
            LoadStatus::Complete
        } else if self.catalog.merged_batches() == 0 {
            LoadStatus::Failed
        } else {
            LoadStatus::Partial
        }
    }

    /// Returns the catalog if the load completed, otherwise the reason.
    ///
    /// # Errors
    ///
    /// [`LoadError::MergeFailed`] if the merge consumer crashed, else
    /// [`LoadError::DeadlineExceeded`] if the deadline passed (with any
    /// failures collected until then), else [`LoadError::Providers`] if a
    /// task failed.
    pub fn into_result(self) -> Result<EmoteCatalog, LoadError> {
        if self.merge_failed {
            Err(LoadError::MergeFailed {
                errors: self.errors,
            })
        } else if self.timed_out {
            Err(LoadError::DeadlineExceeded {
                deadline: self.deadline,
                errors: self.errors,
            })
        } else if !self.errors.is_empty() {
            Err(LoadError::Providers(self.errors))
        } else {
            Ok(self.catalog)
        }
    }
}

// ============================================================================
// Loader
// ============================================================================

/// Message from a fetch task to the merge consumer.
enum TaskMessage {
    Batch(EmoteBatch),
    Failed(ProviderFailure),
}

/// State owned by the merge consumer.
#[derive(Default)]
struct MergeState {
    catalog: EmoteCatalog,
    errors: JoinedError,
}

/// Loads emotes from every enabled provider concurrently.
pub struct EmoteLoader {
    options: LoaderOptions,
    sources: Vec<Arc<dyn EmoteSource>>,
    ctx: Arc<FetchContext>,
}

impl EmoteLoader {
    /// Creates a loader for the registered providers.
    pub fn new(options: LoaderOptions) -> Self {
        let sources = ProviderRegistry::all()
            .iter()
            .map(|desc| desc.build_source())
            .collect();
        Self::with_sources(options, sources)
    }

    /// Creates a loader with explicit sources.
    ///
    /// Sources whose provider is disabled in `options` are skipped at load
    /// time.
    pub fn with_sources(options: LoaderOptions, sources: Vec<Arc<dyn EmoteSource>>) -> Self {
        let settings = FetchSettings::default().with_timeout(options.http_timeout);

        Self {
            options,
            sources,
            ctx: Arc::new(FetchContext::with_settings(settings)),
        }
    }

    /// Replaces the fetch context handed to sources.
    ///
    /// The deadline still comes from [`LoaderOptions::deadline`]; only the
    /// HTTP client and request timeout are taken from `ctx`.
    #[must_use]
    pub fn with_context(mut self, ctx: FetchContext) -> Self {
        self.ctx = Arc::new(ctx);
        self
    }

    /// Returns the options.
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Runs one load.
    ///
    /// Always returns by the deadline (plus the time to stop the merge
    /// consumer), whatever the providers do.
    #[instrument(skip(self), fields(deadline = ?self.options.deadline))]
    pub async fn load(&self) -> LoadOutcome {
        let started = Instant::now();
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let mut launched = 0usize;
        for source in &self.sources {
            let kind = source.kind();
            let options = self.options.provider(kind);
            if !options.enabled {
                debug!(provider = %kind, "Provider disabled, skipping");
                continue;
            }

            spawn_global(Arc::clone(source), Arc::clone(&self.ctx), tx.clone());
            launched += 1;

            if let Some(scope) = &options.scope {
                spawn_user(
                    Arc::clone(source),
                    Arc::clone(&self.ctx),
                    scope.clone(),
                    tx.clone(),
                );
                launched += 1;
            }
        }
        drop(tx);
        info!(tasks = launched, "Launched fetch tasks");

        let mut consumer = tokio::spawn(consume(rx, cancel.clone()));

        let (joined, timed_out) = tokio::select! {
            joined = &mut consumer => (joined, false),
            () = tokio::time::sleep(self.options.deadline) => {
                warn!(deadline = ?self.options.deadline, "Deadline exceeded, returning partial catalog");
                cancel.cancel();
                (consumer.await, true)
            }
        };

        let (MergeState { catalog, mut errors }, merge_failed) = match joined {
            Ok(state) => (state, false),
            Err(e) => {
                error!(error = %e, "Merge consumer failed");
                (MergeState::default(), true)
            }
        };
        errors.sort();

        let outcome = LoadOutcome {
            catalog,
            errors,
            timed_out,
            deadline: self.options.deadline,
            duration: started.elapsed(),
            finished_at: Utc::now(),
            merge_failed,
        };

        info!(
            emotes = outcome.catalog.len(),
            batches = outcome.catalog.merged_batches(),
            errors = outcome.errors.len(),
            timed_out,
            elapsed_ms = outcome.duration.as_millis(),
            "Load finished"
        );
        outcome
    }
}

impl std::fmt::Debug for EmoteLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmoteLoader")
            .field("options", &self.options)
            .field("sources", &self.sources.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tasks
// ============================================================================

/// Merges messages until every sender is gone or the load is cancelled.
async fn consume(
    mut rx: mpsc::UnboundedReceiver<TaskMessage>,
    cancel: CancellationToken,
) -> MergeState {
    let mut state = MergeState::default();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Merge consumer cancelled");
                break;
            }
            message = rx.recv() => match message {
                Some(TaskMessage::Batch(batch)) => {
                    debug!(
                        provider = %batch.provider,
                        stage = %batch.stage,
                        count = batch.len(),
                        "Merging batch"
                    );
                    state.catalog.merge(batch);
                }
                Some(TaskMessage::Failed(failure)) => {
                    warn!(error = %failure, "Fetch failed");
                    state.errors.push(failure);
                }
                None => break,
            }
        }
    }

    state
}

fn submit(tx: &mpsc::UnboundedSender<TaskMessage>, message: TaskMessage) {
    if tx.send(message).is_err() {
        debug!("Load already returned, discarding late result");
    }
}

/// Runs a fetch body in its own task so a panic surfaces as an error.
async fn guarded<T, F>(body: F) -> Result<T, FetchError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    match tokio::spawn(body).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Fetch task crashed");
            Err(FetchError::TaskPanicked(e.to_string()))
        }
    }
}

fn batch_message(
    provider: ProviderKind,
    stage: FetchStage,
    result: Result<EmoteBatch, FetchError>,
) -> TaskMessage {
    match result {
        Ok(batch) => TaskMessage::Batch(batch),
        Err(error) => TaskMessage::Failed(ProviderFailure::new(provider, stage, error)),
    }
}

fn spawn_global(
    source: Arc<dyn EmoteSource>,
    ctx: Arc<FetchContext>,
    tx: mpsc::UnboundedSender<TaskMessage>,
) {
    tokio::spawn(async move {
        let kind = source.kind();
        let result = guarded(async move {
            let records = source.fetch_global(&ctx).await?;
            Ok::<_, FetchError>(EmoteBatch::normalize(kind, FetchStage::Global, records))
        })
        .await;
        submit(&tx, batch_message(kind, FetchStage::Global, result));
    });
}

/// Fetches a user's emotes. When the provider answers with set ids, one set
/// task is spawned per id before this task's sender is dropped.
fn spawn_user(
    source: Arc<dyn EmoteSource>,
    ctx: Arc<FetchContext>,
    scope: UserScope,
    tx: mpsc::UnboundedSender<TaskMessage>,
) {
    tokio::spawn(async move {
        let kind = source.kind();
        let lookup = {
            let source = Arc::clone(&source);
            let ctx = Arc::clone(&ctx);
            let scope = scope.clone();
            guarded(async move { source.fetch_user(&ctx, &scope).await })
        };

        match lookup.await {
            Ok(UserEmotes::Emotes(records)) => {
                let result = guarded(async move {
                    Ok::<_, FetchError>(EmoteBatch::normalize(kind, FetchStage::User, records))
                })
                .await;
                submit(&tx, batch_message(kind, FetchStage::User, result));
            }
            Ok(UserEmotes::Sets(set_ids)) => {
                debug!(provider = %kind, %scope, sets = set_ids.len(), "Resolved emote sets");
                for set_id in set_ids {
                    spawn_set(Arc::clone(&source), Arc::clone(&ctx), set_id, tx.clone());
                }
            }
            Err(error) => {
                submit(
                    &tx,
                    TaskMessage::Failed(ProviderFailure::new(kind, FetchStage::User, error)),
                );
            }
        }
    });
}

fn spawn_set(
    source: Arc<dyn EmoteSource>,
    ctx: Arc<FetchContext>,
    set_id: String,
    tx: mpsc::UnboundedSender<TaskMessage>,
) {
    tokio::spawn(async move {
        let kind = source.kind();
        let stage = FetchStage::Set(set_id.clone());
        let result = guarded(async move {
            let records = source.fetch_set(&ctx, &set_id).await?;
            Ok::<_, FetchError>(EmoteBatch::normalize(kind, FetchStage::Set(set_id), records))
        })
        .await;
        submit(&tx, batch_message(kind, stage, result));
    });
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(batches: usize, errors: JoinedError, timed_out: bool) -> LoadOutcome {
        let mut catalog = EmoteCatalog::new();
        for _ in 0..batches {
            catalog.merge(EmoteBatch::normalize(ProviderKind::Bttv, FetchStage::Global, Vec::new()));
        }
        LoadOutcome {
            catalog,
            errors,
            timed_out,
            deadline: DEFAULT_DEADLINE,
            duration: Duration::ZERO,
            finished_at: Utc::now(),
            merge_failed: false,
        }
    }

    fn one_error() -> JoinedError {
        let mut errors = JoinedError::new();
        errors.push(ProviderFailure::new(
            ProviderKind::Ffz,
            FetchStage::Global,
            FetchError::Unsupported("x".into()),
        ));
        errors
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(outcome(2, JoinedError::new(), false).status(), LoadStatus::Complete);
        assert_eq!(outcome(0, JoinedError::new(), false).status(), LoadStatus::Complete);
        assert_eq!(outcome(1, one_error(), false).status(), LoadStatus::Partial);
        assert_eq!(outcome(1, JoinedError::new(), true).status(), LoadStatus::Partial);
        assert_eq!(outcome(0, one_error(), false).status(), LoadStatus::Failed);
        assert_eq!(outcome(0, JoinedError::new(), true).status(), LoadStatus::Failed);
    }

    #[test]
    fn test_into_result() {
        assert!(outcome(1, JoinedError::new(), false).into_result().is_ok());

        let err = outcome(1, one_error(), true).into_result().unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(err.errors().len(), 1);

        let err = outcome(1, one_error(), false).into_result().unwrap_err();
        assert!(matches!(err, LoadError::Providers(_)));
    }

    #[test]
    fn test_crashed_merge_is_failed() {
        let mut crashed = outcome(0, JoinedError::new(), false);
        crashed.merge_failed = true;
        assert_eq!(crashed.status(), LoadStatus::Failed);
        assert!(matches!(
            crashed.into_result(),
            Err(LoadError::MergeFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_guarded_reports_panic() {
        let result = guarded(async {
            let empty: Vec<u8> = Vec::new();
            Ok::<_, FetchError>(empty[0])
        })
        .await;

        assert!(matches!(result, Err(FetchError::TaskPanicked(_))));
    }

    #[test]
    fn test_options() {
        let options = LoaderOptions::default()
            .with_provider(ProviderKind::Ffz, ProviderOptions::disabled())
            .with_provider(
                ProviderKind::SevenTv,
                ProviderOptions::default().with_scope(UserScope::account("abc")),
            );

        assert_eq!(options.enabled(), vec![ProviderKind::Bttv, ProviderKind::SevenTv]);
        assert_eq!(options.provider(ProviderKind::SevenTv).scope, Some(UserScope::account("abc")));
        assert_eq!(options.deadline, DEFAULT_DEADLINE);
    }

    #[test]
    fn test_new_uses_registered_sources() {
        let loader = EmoteLoader::new(LoaderOptions::default());
        assert_eq!(loader.sources.len(), ProviderRegistry::count());
    }
}
