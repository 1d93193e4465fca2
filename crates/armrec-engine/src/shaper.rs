//! Result shaping.
//!
//! Builds the host-facing envelope: applies the descriptor's report strip
//! list, hoists surface fields and the identity echo, and never leaks
//! partial state on failure (failures are shaped in `Engine::run`, which
//! omits `state` entirely).

use armrec_core::{Identity, Outcome, ResourceDescriptor};
use serde_json::{Map, Value};

/// Shape a reconciliation result.
pub fn shape(
    rd: &ResourceDescriptor,
    state: Option<Map<String, Value>>,
    changed: bool,
    identity: &Identity,
) -> Outcome {
    let mut outcome = Outcome::unchanged();
    outcome.changed = changed;

    // Identity echo first; surface fields from the state may refine it.
    for (k, v) in identity.iter() {
        outcome
            .surface
            .insert(k.to_string(), Value::String(v.to_string()));
    }

    if let Some(state) = state {
        let reported = strip(rd, state);
        for key in rd.surface {
            if let Some(value) = reported.get(*key) {
                outcome.surface.insert((*key).to_string(), value.clone());
            }
        }
        outcome.state = Some(Value::Object(reported));
    }

    outcome
}

/// Shape a facts result: a stripped list, never `changed`.
pub fn shape_facts(
    rd: &ResourceDescriptor,
    resources: Vec<Map<String, Value>>,
    identity: &Identity,
) -> Outcome {
    let mut outcome = Outcome::unchanged();
    for (k, v) in identity.iter() {
        outcome
            .surface
            .insert(k.to_string(), Value::String(v.to_string()));
    }
    outcome.resources = Some(
        resources
            .into_iter()
            .map(|r| Value::Object(strip(rd, r)))
            .collect(),
    );
    outcome
}

/// Remove report-stripped fields. Deliberately independent of the
/// comparison-time churn suppression: a field may be compared yet withheld
/// from the report, or vice versa.
fn strip(rd: &ResourceDescriptor, mut state: Map<String, Value>) -> Map<String, Value> {
    for key in rd.result_strip {
        state.remove(*key);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use armrec_core::{FieldSpec, Identity, ResourceDescriptor};
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[FieldSpec::str("location")];
    static RD: ResourceDescriptor = ResourceDescriptor::new(
        "key_vault",
        "vaults",
        &["resource_group", "name"],
        FIELDS,
    )
    .strip(&["access_policies", "vault_uri_secret"])
    .surface_fields(&["id", "vault_uri"]);

    fn identity() -> Identity {
        let mut id = Identity::new();
        id.push("resource_group", "rg1".into());
        id.push("name", "kv1".into());
        id
    }

    #[test]
    fn stripped_fields_never_reach_the_report() {
        let state = json!({
            "id": "/subscriptions/x/vaults/kv1",
            "vault_uri": "https://kv1.vault.azure.net/",
            "access_policies": [{"object_id": "secret"}],
            "location": "eastus",
        });
        let outcome = shape(&RD, Some(state.as_object().unwrap().clone()), true, &identity());

        let reported = outcome.state.unwrap();
        assert!(reported.get("access_policies").is_none());
        assert_eq!(reported["location"], json!("eastus"));
        assert_eq!(outcome.surface["id"], json!("/subscriptions/x/vaults/kv1"));
        assert_eq!(outcome.surface["vault_uri"], json!("https://kv1.vault.azure.net/"));
        assert_eq!(outcome.surface["name"], json!("kv1"));
    }

    #[test]
    fn absent_state_reports_identity_only() {
        let outcome = shape(&RD, None, true, &identity());
        assert!(outcome.state.is_none());
        assert_eq!(outcome.surface["resource_group"], json!("rg1"));
    }

    #[test]
    fn facts_are_stripped_per_resource() {
        let rows = vec![
            json!({"id": "a", "access_policies": []}).as_object().unwrap().clone(),
            json!({"id": "b"}).as_object().unwrap().clone(),
        ];
        let outcome = shape_facts(&RD, rows, &identity());
        assert!(!outcome.changed);
        let resources = outcome.resources.unwrap();
        assert_eq!(resources.len(), 2);
        assert!(resources[0].get("access_policies").is_none());
    }
}
