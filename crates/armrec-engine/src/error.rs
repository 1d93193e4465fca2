//! Engine error taxonomy.

use crate::client::ClientError;
use armrec_bind::BindError;
use armrec_core::RegistryError;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by one engine invocation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Registry lookup miss; fails before any network call.
    #[error(transparent)]
    UnknownKind(#[from] RegistryError),

    /// Binding failure; fails before any network call.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// Non-404 failure on a read or list. Never retried by the engine and
    /// never downgraded to an assumed-absent observation.
    #[error("transport failure on {call}: {source}")]
    Transport {
        call: String,
        #[source]
        source: ClientError,
    },

    /// A mutating call or its long-running operation reported failure.
    #[error("operation {call} failed: {message}")]
    OperationFailed { call: String, message: String },

    /// The long-running operation exceeded the configured poll timeout.
    #[error("operation {call} did not complete within {timeout:?}")]
    OperationTimeout { call: String, timeout: Duration },

    /// The post-delete settle loop never observed the resource absent.
    #[error("resource still present {waited:?} after delete")]
    SettleTimeout { waited: Duration },

    /// Host cancellation honored at a suspension point.
    #[error("invocation cancelled by host")]
    Cancelled,
}

impl EngineError {
    /// Stable token for the result envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownKind(_) => "unknown_resource_kind",
            Self::Bind(e) => e.kind(),
            Self::Transport { .. } => "transport_error",
            Self::OperationFailed { .. } => "operation_failed",
            Self::OperationTimeout { .. } => "operation_timeout",
            Self::SettleTimeout { .. } => "settle_timeout",
            Self::Cancelled => "cancelled",
        }
    }
}
