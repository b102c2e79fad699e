//! The Store: state owner, action serializer and effect executor.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::handle::{EffectCounter, EffectHandle};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use ticket_desk_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{RwLock, broadcast, watch};

/// Runtime for one reducer and the state it owns
///
/// Cloning is cheap: clones are handles onto the same state, so a Store can
/// be passed to every task that produces actions.
///
/// Type parameters are the state `S`, action `A`, environment `E` and the
/// reducer `R` tying them together.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    env: Arc<E>,
    config: StoreConfig,
    closed: Arc<AtomicBool>,
    /// Effects running across every action; drained by `shutdown`.
    in_flight: EffectCounter,
    /// Latest state after each applied action.
    snapshots: Arc<watch::Sender<S>>,
    /// Actions produced by effects.
    feedback: broadcast::Sender<A>,
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            env: Arc::clone(&self.env),
            config: self.config.clone(),
            closed: Arc::clone(&self.closed),
            in_flight: self.in_flight.clone(),
            snapshots: Arc::clone(&self.snapshots),
            feedback: self.feedback.clone(),
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
    A: Clone + std::fmt::Debug + Send + 'static,
    E: Send + Sync + 'static,
{
    /// Store with [`StoreConfig::default`]
    #[must_use]
    pub fn new(initial_state: S, reducer: R, env: E) -> Self {
        Self::with_config(initial_state, reducer, env, StoreConfig::default())
    }

    /// Store with explicit tunables
    #[must_use]
    pub fn with_config(initial_state: S, reducer: R, env: E, config: StoreConfig) -> Self {
        let (feedback, _) = broadcast::channel(config.broadcast_capacity.max(1));
        let (snapshots, _) = watch::channel(initial_state.clone());

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            env: Arc::new(env),
            config,
            closed: Arc::new(AtomicBool::new(false)),
            in_flight: EffectCounter::new(),
            snapshots: Arc::new(snapshots),
            feedback,
        }
    }

    /// Apply an action
    ///
    /// The reducer runs under the state's write lock, so concurrent senders
    /// are applied one after another and none observes a half-applied action.
    /// The new snapshot is published before the lock is released, then the
    /// reducer's effects are started. The returned handle tracks them.
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] once [`shutdown`](Self::shutdown) has begun.
    #[tracing::instrument(skip(self), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
        if self.closed.load(Ordering::Acquire) {
            tracing::warn!("store closed, action rejected");
            metrics::counter!("store.shutdown.rejected_actions").increment(1);
            return Err(StoreError::ShutdownInProgress);
        }
        metrics::counter!("store.commands.total").increment(1);

        let effects = {
            let mut state = self.state.write().await;
            let _span = tracing::debug_span!("reduce").entered();

            let started = Instant::now();
            let effects = self.reducer.reduce(&mut state, action, &self.env);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(started.elapsed().as_secs_f64());

            self.snapshots.send_replace(state.clone());
            effects
        };
        tracing::trace!(effects = effects.len(), "action applied");

        let tracked = EffectCounter::new();
        let handle = tracked.handle();
        for effect in effects {
            self.execute(effect, &tracked);
        }
        Ok(handle)
    }

    /// Read the state through a closure
    ///
    /// ```ignore
    /// let open = store.state(|s| s.session.is_some()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        f(&*self.state.read().await)
    }

    /// Owned copy of the current state
    pub async fn snapshot(&self) -> S {
        self.state(S::clone).await
    }

    /// Receiver of post-action snapshots
    ///
    /// It starts at the current state and is marked changed after each
    /// applied action.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.snapshots.subscribe()
    }

    /// Receiver of the actions effects feed back into the store
    ///
    /// Actions passed to [`send`](Self::send) directly are not included.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.feedback.subscribe()
    }

    /// Effects still running, across all actions
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.in_flight.running()
    }

    /// [`shutdown`](Self::shutdown) with the configured deadline
    ///
    /// # Errors
    ///
    /// As [`shutdown`](Self::shutdown).
    pub async fn shutdown_default(&self) -> Result<(), StoreError> {
        self.shutdown(self.config.shutdown_timeout).await
    }

    /// Stop accepting actions and wait for running effects to finish
    ///
    /// Actions that running effects produce after this point are dropped.
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownTimeout`] with the number of effects still
    /// running when `timeout` elapses.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.closed.store(true, Ordering::Release);
        metrics::counter!("store.shutdown.initiated").increment(1);
        tracing::info!(pending = self.pending_effects(), "shutting down");

        let mut running = self.in_flight.handle();
        if running.wait_with_timeout(timeout).await.is_ok() {
            tracing::info!("shutdown complete");
            return Ok(());
        }

        let pending = self.pending_effects();
        tracing::error!(pending, ?timeout, "shutdown deadline passed");
        metrics::counter!("store.shutdown.timeout").increment(1);
        Err(StoreError::ShutdownTimeout(pending))
    }

    /// Start one effect, counting it against `tracked` and the store
    fn execute(&self, effect: Effect<A>, tracked: &EffectCounter) {
        match effect {
            Effect::None => {
                metrics::counter!("store.effects.executed", "type" => "none").increment(1);
            },
            Effect::Parallel(effects) => {
                metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);
                for effect in effects {
                    self.execute(effect, tracked);
                }
            },
            Effect::Sequential(effects) => {
                metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);
                let guards = (self.in_flight.enter(), tracked.enter());
                let store = self.clone();
                tokio::spawn(async move {
                    let _guards = guards;
                    for effect in effects {
                        let step = EffectCounter::new();
                        let mut done = step.handle();
                        store.execute(effect, &step);
                        done.wait().await;
                    }
                });
            },
            Effect::Delay { duration, action } => {
                metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                let guards = (self.in_flight.enter(), tracked.enter());
                let store = self.clone();
                tokio::spawn(async move {
                    let _guards = guards;
                    tokio::time::sleep(duration).await;
                    store.feed_back(*action).await;
                });
            },
            Effect::Future(future) => {
                metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                let guards = (self.in_flight.enter(), tracked.enter());
                let store = self.clone();
                tokio::spawn(async move {
                    let _guards = guards;
                    if let Some(action) = future.await {
                        store.feed_back(action).await;
                    }
                });
            },
        }
    }

    async fn feed_back(&self, action: A) {
        let _ = self.feedback.send(action.clone());
        if let Err(error) = self.send(action).await {
            tracing::debug!(%error, "effect action dropped");
        }
    }
}
