//! The collaborator seam: ARM client and LRO poller traits.
//!
//! The engine never builds credentials or HTTP machinery itself; the host
//! supplies an [`ArmClient`] built from its own client factory. Calls are
//! addressed by the descriptor's [`ApiCall`] names and the resource identity
//! tuple, and mutations either complete immediately or hand back an
//! [`LroPoll`] the mutator drives to a terminal state.

use armrec_core::{ApiCall, Identity};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Transport-level failure from the collaborator.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The resource does not exist. Reads map this to `Absent`.
    #[error("resource not found")]
    NotFound,

    /// Non-404 HTTP failure.
    #[error("ARM request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    /// Opaque cause from the underlying client; retained for surfacing.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound) || matches!(self, Self::Http { status: 404, .. })
    }
}

/// Result of a point read.
#[derive(Debug, Clone)]
pub enum ReadOutcome {
    Found(Value),
    NotFound,
}

/// Terminal and non-terminal states of a long-running operation.
#[derive(Debug, Clone)]
pub enum LroStatus {
    /// Still running; the service may hint at a polling delay.
    InProgress { retry_after: Option<Duration> },
    Succeeded,
    Failed { message: String },
}

/// Handle for a long-running ARM operation.
///
/// `poll` is called until it yields a terminal status; `result` is only
/// called after `Succeeded`.
#[async_trait]
pub trait LroPoll: Send {
    async fn poll(&mut self) -> Result<LroStatus, ClientError>;
    async fn result(&mut self) -> Result<Option<Value>, ClientError>;
}

/// What a mutating call handed back.
pub enum MutationStarted {
    /// The operation completed synchronously, possibly with a body.
    Complete(Option<Value>),
    /// The operation was accepted and must be polled.
    Accepted(Box<dyn LroPoll>),
}

/// The ARM client surface the engine drives.
///
/// Implementations are shared across invocations and assumed thread-safe;
/// the engine never closes the client.
#[async_trait]
pub trait ArmClient: Send + Sync {
    /// Point read by identity.
    async fn read(&self, call: &ApiCall, identity: &Identity) -> Result<ReadOutcome, ClientError>;

    /// List read for the facts path; `identity` holds the bound prefix.
    async fn list(&self, call: &ApiCall, identity: &Identity) -> Result<Vec<Value>, ClientError>;

    /// Create/update/delete. `body` is `None` for deletes.
    async fn mutate(
        &self,
        call: &ApiCall,
        identity: &Identity,
        body: Option<&Value>,
    ) -> Result<MutationStarted, ClientError>;

    /// Resource-group helper, used for auto-location defaulting.
    async fn resource_group(&self, name: &str) -> Result<Value, ClientError>;
}
