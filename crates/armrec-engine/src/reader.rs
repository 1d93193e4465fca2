//! State reading.
//!
//! Fetches the current ARM representation by identity and distinguishes
//! "does not exist" from transport failures. Reads are never retried here;
//! a non-404 failure is fatal for the invocation and is never downgraded to
//! an assumed-absent observation.
//!
//! The observed object is kept whole. Churn fields (`etag`, plus the
//! descriptor's compare-ignore list) are skipped at comparison time by the
//! differ, while report-time stripping happens in the shaper; the two strip
//! sets are independent.

use crate::cancel::CancelToken;
use crate::client::{ArmClient, ClientError, ReadOutcome};
use crate::error::EngineError;
use armrec_core::{Identity, ResourceDescriptor};
use serde_json::{Map, Value};

/// Read the observed state, `Ok(None)` meaning absent. The read is a
/// suspension point and races against host cancellation like every other
/// client call.
pub async fn read_state<C: ArmClient>(
    client: &C,
    rd: &ResourceDescriptor,
    identity: &Identity,
    cancel: &CancelToken,
) -> Result<Option<Map<String, Value>>, EngineError> {
    let call = rd.read_api();
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(EngineError::Cancelled),
        r = client.read(&call, identity) => r,
    };
    match outcome {
        Ok(ReadOutcome::Found(value)) => Ok(Some(into_object(value))),
        Ok(ReadOutcome::NotFound) => Ok(None),
        Err(e) if e.is_not_found() => Ok(None),
        Err(source) => Err(EngineError::Transport {
            call: call.to_string(),
            source,
        }),
    }
}

/// List reads for the facts path.
pub async fn list_state<C: ArmClient>(
    client: &C,
    rd: &ResourceDescriptor,
    method: &'static str,
    identity: &Identity,
) -> Result<Vec<Map<String, Value>>, EngineError> {
    let call = armrec_core::ApiCall {
        group: rd.client_group,
        method,
    };
    match client.list(&call, identity).await {
        Ok(items) => Ok(items.into_iter().map(into_object).collect()),
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        Err(source) => Err(EngineError::Transport {
            call: call.to_string(),
            source,
        }),
    }
}

pub fn transport(call: impl ToString, source: ClientError) -> EngineError {
    EngineError::Transport {
        call: call.to_string(),
        source,
    }
}

/// ARM objects are JSON objects; anything else is preserved under `value`
/// so comparison and stripping stay uniform.
fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}
