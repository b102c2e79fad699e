use thiserror::Error;

/// Failures reported by the [`Store`](crate::Store)
#[derive(Error, Debug)]
pub enum StoreError {
    /// `send` was called after shutdown began
    #[error("store is shutting down; action rejected")]
    ShutdownInProgress,

    /// Effects were still running when the shutdown deadline passed
    #[error("shutdown deadline passed with {0} effect(s) still running")]
    ShutdownTimeout(usize),

    /// An [`EffectHandle`](crate::EffectHandle) wait hit its deadline
    #[error("timed out waiting for effects to finish")]
    Timeout,
}
