//! Action planning.
//!
//! Pure computation of the reconciliation action from the desired and
//! observed states plus the descriptor. Rules, in order:
//!
//! 1. Absent observed: `absent` desired means nothing to do, anything else
//!    means create.
//! 2. Present observed: `absent` desired deletes, beating any body
//!    divergence. Otherwise the diverging desired fields decide: none (and
//!    tags unchanged) is a no-op; a divergence on a non-updatable field
//!    falls back to create-or-update with the full body; otherwise an
//!    update, carrying either the diverging fields (PATCH kinds) or the
//!    full creatable projection (PUT kinds).
//!
//! Comparison is structural: objects compare key-by-key over the desired
//! keys only (ARM-defaulted extras never count as drift), sequences are
//! order-sensitive unless the field is marked unordered, and identity
//! fields are never compared at all.

use armrec_bind::DesiredState;
use armrec_core::{FieldSpec, ResourceDescriptor, UpdateStyle};
use serde_json::{Map, Value};

/// The planned reconciliation action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    NoAction,
    Create { body: Value },
    Update { body: Value },
    Delete,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoAction => "no_action",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete => "delete",
        }
    }

    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::NoAction)
    }
}

/// Compute the action for one invocation.
pub fn plan(
    rd: &ResourceDescriptor,
    desired: &DesiredState,
    observed: Option<&Map<String, Value>>,
) -> Action {
    let Some(observed) = observed else {
        if desired.is_absent() {
            return Action::NoAction;
        }
        return Action::Create {
            body: create_body(rd, desired),
        };
    };

    // Requested absence beats any body divergence.
    if desired.is_absent() {
        return Action::Delete;
    }

    let diverging: Vec<&str> = desired
        .body
        .iter()
        .filter(|(key, value)| !field_matches(rd, key, value, observed))
        .map(|(key, _)| key.as_str())
        .collect();

    let tags_diverge = tags_changed(rd, desired, observed);

    if diverging.is_empty() && !tags_diverge {
        return Action::NoAction;
    }

    // A divergence the update call cannot carry forces the PUT path.
    let non_updatable = diverging
        .iter()
        .any(|key| rd.field(key).is_none_or(|f| !f.updatable));
    if non_updatable {
        return Action::Create {
            body: create_body(rd, desired),
        };
    }

    let body = match rd.update_style {
        UpdateStyle::Put => create_body_with_tags(rd, desired, observed),
        UpdateStyle::Patch => {
            let mut map = Map::new();
            for key in &diverging {
                if let Some(value) = desired.body.get(*key) {
                    map.insert((*key).to_string(), value.clone());
                }
            }
            if tags_diverge {
                map.insert("tags".to_string(), Value::Object(merged_tags(desired, observed)));
            }
            Value::Object(map)
        }
    };

    Action::Update { body }
}

/// Full creatable projection for create-or-update calls.
pub fn create_body(rd: &ResourceDescriptor, desired: &DesiredState) -> Value {
    let mut map = desired.body.clone();
    if rd.supports_tags {
        if let Some(tags) = &desired.tags {
            map.insert("tags".to_string(), Value::Object(tags.clone()));
        }
    }
    Value::Object(map)
}

fn create_body_with_tags(
    rd: &ResourceDescriptor,
    desired: &DesiredState,
    observed: &Map<String, Value>,
) -> Value {
    let mut map = desired.body.clone();
    if rd.supports_tags && desired.tags.is_some() {
        map.insert("tags".to_string(), Value::Object(merged_tags(desired, observed)));
    }
    Value::Object(map)
}

fn field_matches(
    rd: &ResourceDescriptor,
    key: &str,
    desired: &Value,
    observed: &Map<String, Value>,
) -> bool {
    // Comparison-time churn suppression; distinct from report stripping.
    if key == "etag" || rd.compare_ignore.contains(&key) {
        return true;
    }
    let Some(observed) = observed.get(key) else {
        return false;
    };
    values_equal(rd.field(key), desired, observed)
}

fn values_equal(spec: Option<&'static FieldSpec>, desired: &Value, observed: &Value) -> bool {
    match (desired, observed) {
        (Value::Object(d), Value::Object(o)) => {
            // Subset compare: only the keys the caller expressed an opinion
            // on count; server-populated extras are not drift.
            d.iter().all(|(k, dv)| match o.get(k) {
                Some(ov) => values_equal(None, dv, ov),
                None => false,
            })
        }
        (Value::Array(d), Value::Array(o)) => {
            if spec.is_some_and(|f| f.unordered) {
                multiset_equal(d, o)
            } else {
                d.len() == o.len()
                    && d.iter().zip(o.iter()).all(|(dv, ov)| values_equal(None, dv, ov))
            }
        }
        (Value::Number(d), Value::Number(o)) => match (d.as_f64(), o.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => d == o,
        },
        _ => desired == observed,
    }
}

fn multiset_equal(a: &[Value], b: &[Value]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<String> = a.iter().map(|v| v.to_string()).collect();
    let mut b: Vec<String> = b.iter().map(|v| v.to_string()).collect();
    a.sort();
    b.sort();
    a == b
}

/// Merge semantics: a desired tag that is absent or different on the
/// observed side is a change; observed-only tags are never removed.
fn tags_changed(
    rd: &ResourceDescriptor,
    desired: &DesiredState,
    observed: &Map<String, Value>,
) -> bool {
    if !rd.supports_tags {
        return false;
    }
    let Some(desired_tags) = &desired.tags else {
        return false;
    };
    let observed_tags = observed_tags(observed);
    desired_tags
        .iter()
        .any(|(k, v)| observed_tags.and_then(|t| t.get(k)) != Some(v))
}

fn merged_tags(desired: &DesiredState, observed: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = observed_tags(observed).cloned().unwrap_or_default();
    if let Some(tags) = &desired.tags {
        for (k, v) in tags {
            merged.insert(k.clone(), v.clone());
        }
    }
    merged
}

fn observed_tags(observed: &Map<String, Value>) -> Option<&Map<String, Value>> {
    observed.get("tags").and_then(Value::as_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use armrec_bind::bind;
    use armrec_core::{FieldSpec, Identity, Presence, ResourceDescriptor};
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::str("start_ip_address").updatable().required(),
        FieldSpec::str("end_ip_address").updatable().required(),
        FieldSpec::str("sku"),
        FieldSpec::str_list("zones").unordered(),
        FieldSpec::sub("profile", PROFILE).updatable(),
    ];

    const PROFILE: &[FieldSpec] = &[
        FieldSpec::int("capacity").updatable(),
        FieldSpec::str("tier").updatable(),
    ];

    static RD_PUT: ResourceDescriptor = ResourceDescriptor::new(
        "mysql_firewall_rule",
        "firewall_rules",
        &["resource_group", "server_name", "name"],
        FIELDS,
    )
    .tags();

    static RD_PATCH: ResourceDescriptor = ResourceDescriptor::new(
        "mysql_firewall_rule_patch",
        "firewall_rules",
        &["resource_group", "server_name", "name"],
        FIELDS,
    )
    .tags()
    .patch_updates("update");

    fn desired(rd: &ResourceDescriptor, params: serde_json::Value) -> DesiredState {
        bind(rd, params.as_object().unwrap()).unwrap()
    }

    fn base() -> serde_json::Value {
        json!({
            "resource_group": "rg1",
            "server_name": "srv1",
            "name": "fr1",
            "start_ip_address": "1.1.1.1",
            "end_ip_address": "1.1.1.9",
        })
    }

    #[test]
    fn absent_observed_present_desired_is_create() {
        let d = desired(&RD_PUT, base());
        let action = plan(&RD_PUT, &d, None);
        assert!(matches!(action, Action::Create { .. }));
    }

    #[test]
    fn absent_observed_absent_desired_is_noop() {
        let mut params = base();
        params["state"] = json!("absent");
        let d = desired(&RD_PUT, params);
        assert_eq!(plan(&RD_PUT, &d, None), Action::NoAction);
    }

    #[test]
    fn delete_beats_body_divergence() {
        let mut params = base();
        params["state"] = json!("absent");
        params["end_ip_address"] = json!("9.9.9.9");
        let d = desired(&RD_PUT, params);
        let observed = json!({"start_ip_address": "1.1.1.1", "end_ip_address": "1.1.1.9"});
        assert_eq!(
            plan(&RD_PUT, &d, observed.as_object()),
            Action::Delete
        );
    }

    #[test]
    fn matching_observed_is_noop() {
        let d = desired(&RD_PUT, base());
        let observed = json!({
            "id": "/subscriptions/x/firewallRules/fr1",
            "etag": "w/123",
            "start_ip_address": "1.1.1.1",
            "end_ip_address": "1.1.1.9",
        });
        assert_eq!(plan(&RD_PUT, &d, observed.as_object()), Action::NoAction);
    }

    #[test]
    fn put_update_carries_full_body() {
        let mut params = base();
        params["end_ip_address"] = json!("1.1.1.20");
        let d = desired(&RD_PUT, params);
        let observed = json!({"start_ip_address": "1.1.1.1", "end_ip_address": "1.1.1.9"});
        let Action::Update { body } = plan(&RD_PUT, &d, observed.as_object()) else {
            panic!("expected update");
        };
        assert_eq!(body["start_ip_address"], json!("1.1.1.1"));
        assert_eq!(body["end_ip_address"], json!("1.1.1.20"));
    }

    #[test]
    fn patch_update_carries_diverging_fields_only() {
        let mut params = base();
        params["end_ip_address"] = json!("1.1.1.20");
        let d = desired(&RD_PATCH, params);
        let observed = json!({"start_ip_address": "1.1.1.1", "end_ip_address": "1.1.1.9"});
        let Action::Update { body } = plan(&RD_PATCH, &d, observed.as_object()) else {
            panic!("expected update");
        };
        assert_eq!(
            body.as_object().unwrap().len(),
            1,
            "patch body must carry only the diverging field"
        );
        assert_eq!(body["end_ip_address"], json!("1.1.1.20"));
    }

    #[test]
    fn non_updatable_divergence_falls_back_to_create() {
        let mut params = base();
        params["sku"] = json!("GP_Gen5_2");
        let d = desired(&RD_PATCH, params);
        let observed = json!({
            "start_ip_address": "1.1.1.1",
            "end_ip_address": "1.1.1.9",
            "sku": "B_Gen5_1",
        });
        assert!(matches!(
            plan(&RD_PATCH, &d, observed.as_object()),
            Action::Create { .. }
        ));
    }

    #[test]
    fn unordered_list_compares_as_multiset() {
        let mut params = base();
        params["zones"] = json!(["1", "2", "3"]);
        let d = desired(&RD_PUT, params);
        let observed = json!({
            "start_ip_address": "1.1.1.1",
            "end_ip_address": "1.1.1.9",
            "zones": ["3", "1", "2"],
        });
        assert_eq!(plan(&RD_PUT, &d, observed.as_object()), Action::NoAction);
    }

    #[test]
    fn sub_object_subset_compare_ignores_server_extras() {
        let mut params = base();
        params["profile"] = json!({"capacity": 2});
        let d = desired(&RD_PUT, params.clone());
        let observed = json!({
            "start_ip_address": "1.1.1.1",
            "end_ip_address": "1.1.1.9",
            "profile": {"capacity": 2, "tier": "GeneralPurpose", "family": "Gen5"},
        });
        assert_eq!(plan(&RD_PUT, &d, observed.as_object()), Action::NoAction);

        params["profile"] = json!({"capacity": 4});
        let d = desired(&RD_PUT, params);
        assert!(matches!(
            plan(&RD_PUT, &d, observed.as_object()),
            Action::Update { .. }
        ));
    }

    #[test]
    fn tag_merge_diff_and_body() {
        let mut params = base();
        params["tags"] = json!({"env": "prod"});
        let d = desired(&RD_PATCH, params);

        // Same tag present: no-op.
        let observed = json!({
            "start_ip_address": "1.1.1.1",
            "end_ip_address": "1.1.1.9",
            "tags": {"env": "prod", "owner": "dba"},
        });
        assert_eq!(plan(&RD_PATCH, &d, observed.as_object()), Action::NoAction);

        // Diverging tag: patch body carries the merged map, observed-only
        // keys preserved.
        let observed = json!({
            "start_ip_address": "1.1.1.1",
            "end_ip_address": "1.1.1.9",
            "tags": {"env": "dev", "owner": "dba"},
        });
        let Action::Update { body } = plan(&RD_PATCH, &d, observed.as_object()) else {
            panic!("expected update");
        };
        assert_eq!(body["tags"], json!({"env": "prod", "owner": "dba"}));
    }

    #[test]
    fn etag_and_compare_ignore_never_count() {
        static RD: ResourceDescriptor = ResourceDescriptor::new(
            "kind_with_churn",
            "group",
            &["resource_group", "name"],
            CHURN_FIELDS,
        )
        .ignore_for_compare(&["provisioning_state"]);
        const CHURN_FIELDS: &[FieldSpec] = &[
            FieldSpec::str("provisioning_state").updatable(),
            FieldSpec::str("location"),
        ];

        let d = DesiredState {
            identity: Identity::new(),
            state: Presence::Present,
            body: json!({"provisioning_state": "Succeeded", "location": "eastus"})
                .as_object()
                .unwrap()
                .clone(),
            tags: None,
        };
        let observed = json!({"provisioning_state": "Updating", "location": "eastus"});
        assert_eq!(plan(&RD, &d, observed.as_object()), Action::NoAction);
    }
}
