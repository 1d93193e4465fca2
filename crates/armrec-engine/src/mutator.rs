//! Action execution.
//!
//! Performs the planned action against the ARM client, drives long-running
//! operations with bounded exponential backoff, and settles deletes by
//! polling the read call until the resource is gone. Check mode
//! short-circuits every mutating call while preserving the `changed`
//! computation.
//!
//! One invocation runs as a single cooperative task; the only suspension
//! points are the client calls and the sleeps below, each raced against the
//! host's cancellation token. No compensating action is ever attempted.

use crate::cancel::CancelToken;
use crate::client::{ArmClient, LroPoll, LroStatus, MutationStarted};
use crate::config::EngineConfig;
use crate::differ::Action;
use crate::error::EngineError;
use crate::reader;
use armrec_core::{ApiCall, Identity, ResourceDescriptor};
use serde_json::{Map, Value};
use tokio::time::Instant;

pub struct Mutator<'a, C: ArmClient> {
    client: &'a C,
    config: &'a EngineConfig,
    cancel: &'a CancelToken,
}

impl<'a, C: ArmClient> Mutator<'a, C> {
    pub fn new(client: &'a C, config: &'a EngineConfig, cancel: &'a CancelToken) -> Self {
        Self {
            client,
            config,
            cancel,
        }
    }

    /// Execute `action`. Returns the raw final state (when the call produced
    /// one) and the `changed` flag. `issued` is set the moment a mutating
    /// call leaves the engine, so a later failure still reports a
    /// conservative `changed`.
    pub async fn apply(
        &self,
        rd: &ResourceDescriptor,
        action: &Action,
        identity: &Identity,
        observed: Option<&Map<String, Value>>,
        check_mode: bool,
        issued: &mut bool,
    ) -> Result<(Option<Value>, bool), EngineError> {
        match action {
            Action::NoAction => Ok((observed.cloned().map(Value::Object), false)),
            _ if check_mode => Ok((synthesize(action, observed), true)),
            Action::Create { body } => {
                let state = self
                    .mutate(rd.create_api(), identity, Some(body), issued)
                    .await?;
                Ok((state, true))
            }
            Action::Update { body } => {
                let state = self
                    .mutate(rd.update_api(), identity, Some(body), issued)
                    .await?;
                Ok((state, true))
            }
            Action::Delete => {
                self.mutate(rd.delete_api(), identity, None, issued).await?;
                if rd.post_delete_settle {
                    self.settle(rd, identity).await?;
                }
                Ok((None, true))
            }
        }
    }

    async fn mutate(
        &self,
        call: ApiCall,
        identity: &Identity,
        body: Option<&Value>,
        issued: &mut bool,
    ) -> Result<Option<Value>, EngineError> {
        tracing::debug!(call = %call, identity = %identity, "issuing mutation");
        *issued = true;

        let started = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(EngineError::Cancelled),
            r = self.client.mutate(&call, identity, body) => r,
        }
        .map_err(|source| EngineError::OperationFailed {
            call: call.to_string(),
            message: source.to_string(),
        })?;

        match started {
            MutationStarted::Complete(state) => Ok(state),
            MutationStarted::Accepted(poller) => self.drive_lro(call, poller).await,
        }
    }

    /// Poll an accepted operation to a terminal state. Delay starts at the
    /// configured floor, doubles per poll up to the ceiling, and yields to a
    /// service-provided retry-after hint; total wall time is bounded by the
    /// LRO timeout.
    async fn drive_lro(
        &self,
        call: ApiCall,
        mut poller: Box<dyn LroPoll>,
    ) -> Result<Option<Value>, EngineError> {
        let timeout = self.config.lro_timeout();
        let started = Instant::now();
        let mut delay = self.config.poll_floor();

        loop {
            let status = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(EngineError::Cancelled),
                s = poller.poll() => s,
            }
            .map_err(|source| EngineError::OperationFailed {
                call: call.to_string(),
                message: source.to_string(),
            })?;

            match status {
                LroStatus::Succeeded => {
                    let state = poller.result().await.map_err(|source| {
                        EngineError::OperationFailed {
                            call: call.to_string(),
                            message: source.to_string(),
                        }
                    })?;
                    return Ok(state);
                }
                LroStatus::Failed { message } => {
                    return Err(EngineError::OperationFailed {
                        call: call.to_string(),
                        message,
                    });
                }
                LroStatus::InProgress { retry_after } => {
                    let wait = retry_after.unwrap_or(delay);
                    if started.elapsed() + wait > timeout {
                        return Err(EngineError::OperationTimeout {
                            call: call.to_string(),
                            timeout,
                        });
                    }
                    tracing::trace!(call = %call, ?wait, "operation in progress");
                    self.sleep(wait).await?;
                    delay = (delay * 2).min(self.config.poll_ceiling());
                }
            }
        }
    }

    /// Poll the read call at a fixed cadence until it reports absent,
    /// bounded by the settle max-wait.
    async fn settle(&self, rd: &ResourceDescriptor, identity: &Identity) -> Result<(), EngineError> {
        let max_wait = self.config.settle_max_wait();
        let interval = self.config.settle_interval();
        let started = Instant::now();

        loop {
            if started.elapsed() + interval > max_wait {
                return Err(EngineError::SettleTimeout {
                    waited: started.elapsed(),
                });
            }
            self.sleep(interval).await?;

            // The delete just returned; only the post-sleep read can
            // meaningfully observe the resource gone.
            if reader::read_state(self.client, rd, identity, self.cancel)
                .await?
                .is_none()
            {
                tracing::debug!(kind = rd.kind, identity = %identity, "delete settled");
                return Ok(());
            }
            tracing::trace!(kind = rd.kind, identity = %identity, "delete not yet settled");
        }
    }

    async fn sleep(&self, wait: std::time::Duration) -> Result<(), EngineError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(EngineError::Cancelled),
            _ = tokio::time::sleep(wait) => Ok(()),
        }
    }
}

/// Check-mode stand-in for the state a mutation would have produced.
fn synthesize(action: &Action, observed: Option<&Map<String, Value>>) -> Option<Value> {
    match action {
        Action::Create { body } => Some(body.clone()),
        Action::Update { body } => {
            let mut merged = observed.cloned().unwrap_or_default();
            if let Some(patch) = body.as_object() {
                for (k, v) in patch {
                    merged.insert(k.clone(), v.clone());
                }
            }
            Some(Value::Object(merged))
        }
        Action::Delete | Action::NoAction => None,
    }
}
