//! Declarative reconciliation engine for Azure Resource Manager.
//!
//! One invocation turns a `(kind, identity, desired-state)` triple into the
//! correct idempotent sequence of ARM calls: bind the options against the
//! kind's descriptor, read the current state, plan an action, apply it
//! (driving long-running operations and post-delete settling), and shape the
//! `changed`/`unchanged` result envelope. Facts-only invocations stop after
//! the read phase.
//!
//! The engine is a library: the host supplies the [`ArmClient`] collaborator
//! and owns every outer surface (CLI, credentials, process lifecycle).

pub mod cancel;
pub mod client;
pub mod config;
pub mod differ;
pub mod error;
pub mod mutator;
pub mod phase;
pub mod reader;
pub mod shaper;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use client::{ArmClient, ClientError, LroPoll, LroStatus, MutationStarted, ReadOutcome};
pub use config::EngineConfig;
pub use differ::Action;
pub use error::EngineError;
pub use phase::Phase;

pub use armrec_bind::{BindError, DesiredState};
pub use armrec_core::{Invocation, Outcome, Params, Registry};

use armrec_core::{Identity, ResourceDescriptor};
use serde_json::{Map, Value};
use tracing::Instrument;

/// The reconciliation engine. Shares the descriptor registry and the ARM
/// client across invocations; both are immutable from the engine's side.
pub struct Engine<C: ArmClient> {
    client: C,
    registry: &'static Registry,
    config: EngineConfig,
}

impl<C: ArmClient> Engine<C> {
    /// Engine over the built-in catalog registry.
    pub fn new(client: C) -> Self {
        Self::with_registry(client, armrec_catalog::registry())
    }

    pub fn with_registry(client: C, registry: &'static Registry) -> Self {
        Self {
            client,
            registry,
            config: EngineConfig::default(),
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Registered kinds, for diagnostics.
    pub fn list_kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.registry.kinds()
    }

    /// Run one reconciliation invocation to completion.
    pub async fn run(&self, invocation: Invocation) -> Outcome {
        self.run_with_cancel(invocation, CancelToken::never()).await
    }

    /// As [`run`](Self::run), honoring host cancellation at the next
    /// suspension point.
    pub async fn run_with_cancel(&self, invocation: Invocation, cancel: CancelToken) -> Outcome {
        let span = tracing::debug_span!(
            "invocation",
            id = %invocation.invocation_id,
            kind = %invocation.kind,
        );
        async {
            let mut issued = false;
            let mut phase = Phase::Init;
            match self.execute(&invocation, &cancel, &mut issued, &mut phase).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!(phase = %phase, error = %err, "invocation failed");
                    Outcome::failure(err.kind(), err.to_string(), issued)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Run a read-only facts invocation.
    pub async fn run_facts(&self, invocation: Invocation) -> Outcome {
        let span = tracing::debug_span!(
            "facts",
            id = %invocation.invocation_id,
            kind = %invocation.kind,
        );
        async {
            match self.execute_facts(&invocation).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!(error = %err, "facts invocation failed");
                    Outcome::failure(err.kind(), err.to_string(), false)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &self,
        invocation: &Invocation,
        cancel: &CancelToken,
        issued: &mut bool,
        phase: &mut Phase,
    ) -> Result<Outcome, EngineError> {
        let rd = self.registry.get(&invocation.kind)?;

        let mut desired = armrec_bind::bind(rd, &invocation.params)?;
        *phase = Phase::Bound;

        if invocation.check_mode && !rd.supports_check_mode {
            tracing::debug!(kind = rd.kind, "kind does not honor check mode, skipping");
            return Ok(Outcome::skipped());
        }

        self.default_location(rd, &mut desired).await?;

        let observed = reader::read_state(&self.client, rd, &desired.identity, cancel).await?;
        *phase = Phase::Observed;

        let action = differ::plan(rd, &desired, observed.as_ref());
        *phase = Phase::Planned;
        tracing::debug!(
            kind = rd.kind,
            identity = %desired.identity,
            action = action.name(),
            check_mode = invocation.check_mode,
            "planned"
        );

        let mutator = mutator::Mutator::new(&self.client, &self.config, cancel);
        let (raw_state, changed) = mutator
            .apply(
                rd,
                &action,
                &desired.identity,
                observed.as_ref(),
                invocation.check_mode,
                issued,
            )
            .await?;
        *phase = Phase::Applied;

        let final_state = self
            .final_state(
                rd,
                &action,
                &desired.identity,
                raw_state,
                observed,
                invocation.check_mode,
                cancel,
            )
            .await?;

        let outcome = shaper::shape(rd, final_state, changed, &desired.identity);
        *phase = Phase::Reported;
        Ok(outcome)
    }

    async fn execute_facts(&self, invocation: &Invocation) -> Result<Outcome, EngineError> {
        let rd = self.registry.get(&invocation.kind)?;
        let identity = armrec_bind::bind_facts_identity(rd, &invocation.params)?;

        let resources = if identity.len() == rd.identity.len() {
            match reader::read_state(&self.client, rd, &identity, &CancelToken::never()).await? {
                Some(state) => vec![state],
                None => Vec::new(),
            }
        } else {
            let call = rd
                .list_calls
                .iter()
                .find(|lc| lc.prefix_len == identity.len())
                .ok_or_else(|| {
                    // No list call fits the given prefix; the first omitted
                    // identity key is what the caller must supply.
                    EngineError::Bind(BindError::MissingRequired {
                        key: rd.identity[identity.len()].to_string(),
                    })
                })?;
            reader::list_state(&self.client, rd, call.method, &identity).await?
        };

        tracing::debug!(
            kind = rd.kind,
            identity = %identity,
            count = resources.len(),
            "facts gathered"
        );
        Ok(shaper::shape_facts(rd, resources, &identity))
    }

    /// Fill `location` from the containing resource group when the
    /// descriptor asks for it and the caller left it out.
    async fn default_location(
        &self,
        rd: &ResourceDescriptor,
        desired: &mut DesiredState,
    ) -> Result<(), EngineError> {
        if !rd.auto_location || desired.is_absent() || desired.has("location") {
            return Ok(());
        }
        let Some(group) = desired.identity.get("resource_group") else {
            return Ok(());
        };
        let info = self
            .client
            .resource_group(group)
            .await
            .map_err(|source| reader::transport(format!("resource_groups.get({group})"), source))?;
        if let Some(location) = info.get("location").and_then(Value::as_str) {
            tracing::debug!(kind = rd.kind, location, "defaulted location from resource group");
            desired
                .body
                .insert("location".to_string(), Value::String(location.to_string()));
        }
        Ok(())
    }

    /// Pick the state to report: the mutation's returned object when there
    /// is one, a fresh read when a real mutation returned no body, the
    /// pre-read echo otherwise. Deletes report no state.
    #[allow(clippy::too_many_arguments)]
    async fn final_state(
        &self,
        rd: &ResourceDescriptor,
        action: &Action,
        identity: &Identity,
        raw_state: Option<Value>,
        observed: Option<Map<String, Value>>,
        check_mode: bool,
        cancel: &CancelToken,
    ) -> Result<Option<Map<String, Value>>, EngineError> {
        if matches!(action, Action::Delete) {
            return Ok(None);
        }
        if let Some(state) = raw_state {
            return Ok(Some(match state {
                Value::Object(map) => map,
                other => {
                    let mut map = Map::new();
                    map.insert("value".to_string(), other);
                    map
                }
            }));
        }
        if action.is_mutation() && !check_mode {
            return reader::read_state(&self.client, rd, identity, cancel).await;
        }
        Ok(observed)
    }
}
