//! The validated, normalized desired state.

use armrec_core::{Identity, Presence};
use serde_json::{Map, Value};

/// Output of a successful bind: identity out-of-band, body normalized and
/// enum-folded, tags merged when the kind supports them.
///
/// Frozen once produced; the engine only reads it. Fields the caller did not
/// supply are absent from `body`; ARM defaults stay the cloud's business.
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredState {
    pub identity: Identity,
    pub state: Presence,
    pub body: Map<String, Value>,
    pub tags: Option<Map<String, Value>>,
}

impl DesiredState {
    pub fn is_absent(&self) -> bool {
        self.state == Presence::Absent
    }

    /// Whether the caller supplied a value for a body field.
    pub fn has(&self, key: &str) -> bool {
        self.body.contains_key(key)
    }
}
