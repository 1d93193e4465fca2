//! Invocation and result envelopes.
//!
//! The host hands the engine an [`Invocation`] (kind, raw options, dry-run
//! flag) and receives an [`Outcome`]: the idempotent `changed`/`failed`
//! envelope with the stripped state projection and any hoisted surface
//! fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Raw option map as supplied by the host.
pub type Params = Map<String, Value>;

/// Whether the caller wants the resource to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Present,
    Absent,
}

impl Presence {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }
}

/// Ordered identity tuple for one resource instance.
///
/// Keys follow the descriptor's declared order; the last key names the
/// instance itself. Identity values are never compared for change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pairs: Vec<(&'static str, String)>,
}

impl Identity {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn push(&mut self, key: &'static str, value: String) {
        self.pairs.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The trailing key, i.e. the instance name, when present.
    pub fn leaf(&self) -> Option<(&'static str, &str)> {
        self.pairs.last().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn to_map(&self) -> Map<String, Value> {
        self.pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::String(v.clone())))
            .collect()
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (k, v)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

/// One engine invocation as handed over by the host.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Resource kind, resolved against the registry.
    pub kind: String,
    /// Identity and body options, unvalidated.
    pub params: Params,
    /// Dry-run flag from the host; forbids mutating calls.
    pub check_mode: bool,
    /// Correlation id carried on the invocation's tracing span.
    pub invocation_id: Uuid,
}

impl Invocation {
    pub fn new(kind: impl Into<String>, params: Params) -> Self {
        Self {
            kind: kind.into(),
            params,
            check_mode: false,
            invocation_id: Uuid::new_v4(),
        }
    }

    pub fn check_mode(mut self, on: bool) -> Self {
        self.check_mode = on;
        self
    }
}

/// Typed failure surfaced in the result envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureInfo {
    /// Stable error kind token, e.g. `settle_timeout`.
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

/// The result envelope returned to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether a mutation was (or, in check mode, would have been) made.
    pub changed: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,

    /// Set when check mode was requested on a kind that does not honor it.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,

    /// Stripped state projection, when present and non-fatal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,

    /// Facts-path result list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Value>>,

    /// Surface fields hoisted out of the state per the descriptor,
    /// plus the identity echo.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub surface: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureInfo>,
}

impl Outcome {
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            failed: false,
            skipped: false,
            state: None,
            resources: None,
            surface: Map::new(),
            error: None,
        }
    }

    pub fn failure(kind: impl Into<String>, message: impl Into<String>, changed: bool) -> Self {
        Self {
            changed,
            failed: true,
            error: Some(FailureInfo {
                kind: kind.into(),
                message: message.into(),
            }),
            ..Self::unchanged()
        }
    }

    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::unchanged()
        }
    }

    /// Flatten into the wire-shaped JSON envelope: surface keys are hoisted
    /// to the top level next to `changed`/`failed`/`state`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("changed".into(), Value::Bool(self.changed));
        if self.failed {
            map.insert("failed".into(), Value::Bool(true));
        }
        if self.skipped {
            map.insert("skipped".into(), Value::Bool(true));
        }
        if let Some(err) = &self.error {
            map.insert("msg".into(), Value::String(err.message.clone()));
            map.insert("error_kind".into(), Value::String(err.kind.clone()));
        }
        for (k, v) in &self.surface {
            map.insert(k.clone(), v.clone());
        }
        if let Some(state) = &self.state {
            map.insert("state".into(), state.clone());
        }
        if let Some(resources) = &self.resources {
            map.insert("resources".into(), Value::Array(resources.clone()));
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_preserves_declared_order() {
        let mut id = Identity::new();
        id.push("resource_group", "rg1".into());
        id.push("server_name", "srv1".into());
        id.push("name", "fr1".into());
        assert_eq!(id.leaf(), Some(("name", "fr1")));
        assert_eq!(id.to_string(), "resource_group=rg1/server_name=srv1/name=fr1");
    }

    #[test]
    fn outcome_envelope_hoists_surface_keys() {
        let mut out = Outcome::unchanged();
        out.changed = true;
        out.surface.insert("id".into(), json!("/subscriptions/x"));
        out.state = Some(json!({"location": "eastus"}));

        let v = out.to_value();
        assert_eq!(v["changed"], json!(true));
        assert_eq!(v["id"], json!("/subscriptions/x"));
        assert_eq!(v["state"]["location"], json!("eastus"));
        assert!(v.get("failed").is_none());
    }

    #[test]
    fn failure_envelope_carries_kind_and_message() {
        let out = Outcome::failure("settle_timeout", "resource still present", true);
        let v = out.to_value();
        assert_eq!(v["failed"], json!(true));
        assert_eq!(v["changed"], json!(true));
        assert_eq!(v["error_kind"], json!("settle_timeout"));
    }
}
