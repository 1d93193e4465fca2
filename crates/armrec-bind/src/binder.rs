//! Schema-driven option binding.
//!
//! `bind` validates the host's raw option map against a descriptor and
//! produces a [`DesiredState`]: identity extracted in declared order, scalars
//! coerced to their declared types, enum tokens folded to ARM spelling,
//! nested sub-options bound recursively, tags normalized. Everything here is
//! pure; no network call happens until the state reader runs.

use crate::desired::DesiredState;
use crate::error::BindError;
use armrec_core::{FieldSpec, FieldType, Identity, Presence, ResourceDescriptor};
use regex::Regex;
use serde_json::{Map, Value};

/// Bind and validate one invocation's options.
pub fn bind(rd: &ResourceDescriptor, params: &Map<String, Value>) -> Result<DesiredState, BindError> {
    let identity = bind_identity(rd, params, rd.identity.len())?;
    let state = bind_presence(params)?;

    // Body options are ignored entirely when the caller asks for absence.
    if state == Presence::Absent {
        return Ok(DesiredState {
            identity,
            state,
            body: Map::new(),
            tags: None,
        });
    }

    let mut body = Map::new();
    for (key, value) in params {
        if rd.is_identity_key(key) || key == "state" || key == "tags" {
            continue;
        }
        if value.is_null() {
            continue;
        }
        let Some(spec) = rd.field(key) else {
            return Err(BindError::UnknownOption { key: key.clone() });
        };
        body.insert(key.clone(), bind_field(spec, value)?);
    }

    for spec in rd.fields.iter().filter(|f| f.required) {
        if !body.contains_key(spec.name) {
            return Err(BindError::MissingRequired {
                key: spec.name.to_string(),
            });
        }
    }

    let tags = match params.get("tags") {
        None => None,
        Some(Value::Null) => None,
        Some(value) if rd.supports_tags => Some(bind_tags(value)?),
        Some(_) => {
            return Err(BindError::UnknownOption {
                key: "tags".to_string(),
            });
        }
    };

    tracing::debug!(
        kind = rd.kind,
        identity = %identity,
        state = ?state,
        fields = body.len(),
        "options bound"
    );

    Ok(DesiredState {
        identity,
        state,
        body,
        tags,
    })
}

/// Bind the identity tuple for the facts path, where a trailing run of
/// identity keys may be omitted to select a list call instead of a point
/// read. Supplying a later key while an earlier one is missing is still an
/// error.
pub fn bind_facts_identity(
    rd: &ResourceDescriptor,
    params: &Map<String, Value>,
) -> Result<Identity, BindError> {
    let mut given = rd.identity.len();
    for (i, key) in rd.identity.iter().enumerate() {
        if !params.contains_key(*key) {
            given = i;
            break;
        }
    }
    for key in &rd.identity[given..] {
        if params.contains_key(*key) {
            // A hole in the identity prefix: the first omitted key is the
            // one the caller actually forgot.
            return Err(BindError::MissingRequired {
                key: rd.identity[given].to_string(),
            });
        }
    }
    bind_identity(rd, params, given)
}

fn bind_identity(
    rd: &ResourceDescriptor,
    params: &Map<String, Value>,
    take: usize,
) -> Result<Identity, BindError> {
    let mut identity = Identity::new();
    for key in &rd.identity[..take] {
        match params.get(*key) {
            None | Some(Value::Null) => {
                return Err(BindError::MissingRequired {
                    key: (*key).to_string(),
                });
            }
            Some(Value::String(s)) => identity.push(key, s.clone()),
            Some(other) => {
                return Err(BindError::TypeMismatch {
                    key: (*key).to_string(),
                    want: "string",
                    got: type_name(other).to_string(),
                });
            }
        }
    }
    Ok(identity)
}

fn bind_presence(params: &Map<String, Value>) -> Result<Presence, BindError> {
    match params.get("state") {
        None | Some(Value::Null) => Ok(Presence::Present),
        Some(Value::String(s)) => Presence::parse(s).ok_or_else(|| BindError::InvalidEnum {
            key: "state".to_string(),
            value: s.clone(),
        }),
        Some(other) => Err(BindError::TypeMismatch {
            key: "state".to_string(),
            want: "string",
            got: type_name(other).to_string(),
        }),
    }
}

fn bind_field(spec: &FieldSpec, value: &Value) -> Result<Value, BindError> {
    let bound = match spec.ty {
        FieldType::Str => Value::String(coerce_str(spec.name, value)?),
        FieldType::Int => coerce_int(spec.name, value)?,
        FieldType::Float => coerce_float(spec.name, value)?,
        FieldType::Bool => coerce_bool(spec.name, value)?,
        FieldType::StrList => coerce_str_list(spec.name, value)?,
        FieldType::Object => match value {
            Value::Object(_) => value.clone(),
            other => {
                return Err(BindError::TypeMismatch {
                    key: spec.name.to_string(),
                    want: "object",
                    got: type_name(other).to_string(),
                });
            }
        },
        FieldType::Sub(schema) => {
            let Value::Object(map) = value else {
                return Err(BindError::TypeMismatch {
                    key: spec.name.to_string(),
                    want: "object",
                    got: type_name(value).to_string(),
                });
            };
            Value::Object(bind_sub(spec.name, schema, map)?)
        }
        FieldType::SubList(schema) => {
            let Value::Array(items) = value else {
                return Err(BindError::TypeMismatch {
                    key: spec.name.to_string(),
                    want: "list",
                    got: type_name(value).to_string(),
                });
            };
            let mut bound = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let Value::Object(map) = item else {
                    return Err(BindError::TypeMismatch {
                        key: format!("{}[{i}]", spec.name),
                        want: "object",
                        got: type_name(item).to_string(),
                    });
                };
                bound.push(Value::Object(bind_sub(
                    &format!("{}[{i}]", spec.name),
                    schema,
                    map,
                )?));
            }
            Value::Array(bound)
        }
    };

    let bound = fold_enums(spec, bound)?;
    check_pattern(spec, &bound)?;
    Ok(bound)
}

fn bind_sub(
    parent: &str,
    schema: &'static [FieldSpec],
    map: &Map<String, Value>,
) -> Result<Map<String, Value>, BindError> {
    let mut out = Map::new();
    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        let Some(spec) = schema.iter().find(|f| f.name == key) else {
            return Err(BindError::UnknownOption { key: key.clone() }.nested(parent));
        };
        let bound = bind_field(spec, value).map_err(|e| e.nested(parent))?;
        out.insert(key.clone(), bound);
    }
    for spec in schema.iter().filter(|f| f.required) {
        if !out.contains_key(spec.name) {
            return Err(BindError::MissingRequired {
                key: spec.name.to_string(),
            }
            .nested(parent));
        }
    }
    Ok(out)
}

fn fold_enums(spec: &FieldSpec, value: Value) -> Result<Value, BindError> {
    if spec.enum_map.is_empty() {
        return Ok(value);
    }
    match value {
        Value::String(s) => match spec.fold_enum(&s) {
            Some(arm) => Ok(Value::String(arm.to_string())),
            None => Err(BindError::InvalidEnum {
                key: spec.name.to_string(),
                value: s,
            }),
        },
        Value::Array(items) => {
            let mut folded = Vec::with_capacity(items.len());
            for item in items {
                folded.push(fold_enums(spec, item)?);
            }
            Ok(Value::Array(folded))
        }
        other => Ok(other),
    }
}

fn check_pattern(spec: &FieldSpec, value: &Value) -> Result<(), BindError> {
    let Some(pattern) = spec.pattern else {
        return Ok(());
    };
    let Value::String(s) = value else {
        return Ok(());
    };
    let re = Regex::new(pattern).map_err(|_| BindError::InvalidPattern {
        key: spec.name.to_string(),
        pattern,
    })?;
    if re.is_match(s) {
        Ok(())
    } else {
        Err(BindError::PatternMismatch {
            key: spec.name.to_string(),
            pattern,
        })
    }
}

fn bind_tags(value: &Value) -> Result<Map<String, Value>, BindError> {
    let Value::Object(map) = value else {
        return Err(BindError::TypeMismatch {
            key: "tags".to_string(),
            want: "object",
            got: type_name(value).to_string(),
        });
    };
    let mut tags = Map::new();
    for (key, value) in map {
        // ARM tag values are strings; scalars are stringified.
        let s = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(BindError::TypeMismatch {
                    key: format!("tags.{key}"),
                    want: "string",
                    got: type_name(other).to_string(),
                });
            }
        };
        tags.insert(key.clone(), Value::String(s));
    }
    Ok(tags)
}

fn coerce_str(key: &str, value: &Value) -> Result<String, BindError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(BindError::TypeMismatch {
            key: key.to_string(),
            want: "string",
            got: type_name(other).to_string(),
        }),
    }
}

fn coerce_int(key: &str, value: &Value) -> Result<Value, BindError> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(|i| Value::Number(i.into()))
            .map_err(|_| BindError::TypeMismatch {
                key: key.to_string(),
                want: "integer",
                got: format!("string '{s}'"),
            }),
        other => Err(BindError::TypeMismatch {
            key: key.to_string(),
            want: "integer",
            got: type_name(other).to_string(),
        }),
    }
}

fn coerce_float(key: &str, value: &Value) -> Result<Value, BindError> {
    let parsed = match value {
        Value::Number(_) => return Ok(value.clone()),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| BindError::TypeMismatch {
            key: key.to_string(),
            want: "float",
            got: type_name(value).to_string(),
        })
}

fn coerce_bool(key: &str, value: &Value) -> Result<Value, BindError> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" => Ok(Value::Bool(true)),
            "false" | "no" | "off" => Ok(Value::Bool(false)),
            _ => Err(BindError::TypeMismatch {
                key: key.to_string(),
                want: "bool",
                got: format!("string '{s}'"),
            }),
        },
        other => Err(BindError::TypeMismatch {
            key: key.to_string(),
            want: "bool",
            got: type_name(other).to_string(),
        }),
    }
}

fn coerce_str_list(key: &str, value: &Value) -> Result<Value, BindError> {
    match value {
        // A bare scalar binds as a single-element list.
        Value::String(_) | Value::Number(_) => {
            Ok(Value::Array(vec![Value::String(coerce_str(key, value)?)]))
        }
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(Value::String(coerce_str(key, item)?));
            }
            Ok(Value::Array(out))
        }
        other => Err(BindError::TypeMismatch {
            key: key.to_string(),
            want: "list of strings",
            got: type_name(other).to_string(),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armrec_core::ResourceDescriptor;
    use serde_json::json;

    const IPV4: &str = r"^\d{1,3}(\.\d{1,3}){3}$";

    const KEY_TYPE_FOLDS: &[(&str, &str)] = &[
        ("service_managed", "ServiceManaged"),
        ("azure_key_vault", "AzureKeyVault"),
    ];

    const RETENTION_SUB: &[FieldSpec] = &[
        FieldSpec::int("days").updatable().required(),
        FieldSpec::bool("geo_redundant").updatable(),
    ];

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::str("start_ip_address")
            .updatable()
            .required()
            .pattern(IPV4),
        FieldSpec::str("end_ip_address").updatable().required().pattern(IPV4),
        FieldSpec::str("server_key_type").updatable().folds(KEY_TYPE_FOLDS),
        FieldSpec::int("capacity").updatable(),
        FieldSpec::sub("retention", RETENTION_SUB).updatable(),
        FieldSpec::str_list("zones").unordered(),
    ];

    static RD: ResourceDescriptor = ResourceDescriptor::new(
        "mysql_firewall_rule",
        "firewall_rules",
        &["resource_group", "server_name", "name"],
        FIELDS,
    )
    .tags();

    fn base_params() -> Map<String, Value> {
        json!({
            "resource_group": "rg1",
            "server_name": "srv1",
            "name": "fr1",
            "start_ip_address": "1.1.1.1",
            "end_ip_address": "1.1.1.9",
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn binds_identity_in_declared_order() {
        let desired = bind(&RD, &base_params()).unwrap();
        let keys: Vec<_> = desired.identity.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["resource_group", "server_name", "name"]);
        assert_eq!(desired.identity.get("server_name"), Some("srv1"));
        assert_eq!(desired.state, Presence::Present);
    }

    #[test]
    fn missing_identity_key_fails() {
        let mut params = base_params();
        params.remove("server_name");
        assert_eq!(
            bind(&RD, &params),
            Err(BindError::MissingRequired {
                key: "server_name".into()
            })
        );
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut params = base_params();
        params.insert("colour".into(), json!("blue"));
        assert_eq!(
            bind(&RD, &params),
            Err(BindError::UnknownOption { key: "colour".into() })
        );
    }

    #[test]
    fn missing_required_body_field_fails() {
        let mut params = base_params();
        params.remove("end_ip_address");
        assert_eq!(
            bind(&RD, &params),
            Err(BindError::MissingRequired {
                key: "end_ip_address".into()
            })
        );
    }

    #[test]
    fn absent_state_ignores_body_entirely() {
        let mut params = base_params();
        params.insert("state".into(), json!("absent"));
        params.insert("colour".into(), json!("blue"));
        params.remove("start_ip_address");

        let desired = bind(&RD, &params).unwrap();
        assert!(desired.is_absent());
        assert!(desired.body.is_empty());
    }

    #[test]
    fn bad_state_token_fails() {
        let mut params = base_params();
        params.insert("state".into(), json!("gone"));
        assert_eq!(
            bind(&RD, &params),
            Err(BindError::InvalidEnum {
                key: "state".into(),
                value: "gone".into()
            })
        );
    }

    #[test]
    fn enum_fold_both_spellings() {
        let mut params = base_params();
        params.insert("server_key_type".into(), json!("azure_key_vault"));
        let desired = bind(&RD, &params).unwrap();
        assert_eq!(desired.body["server_key_type"], json!("AzureKeyVault"));

        params.insert("server_key_type".into(), json!("AzureKeyVault"));
        let desired = bind(&RD, &params).unwrap();
        assert_eq!(desired.body["server_key_type"], json!("AzureKeyVault"));

        params.insert("server_key_type".into(), json!("vault"));
        assert_eq!(
            bind(&RD, &params),
            Err(BindError::InvalidEnum {
                key: "server_key_type".into(),
                value: "vault".into()
            })
        );
    }

    #[test]
    fn scalar_coercion_matrix() {
        let mut params = base_params();
        params.insert("capacity".into(), json!("4"));
        let desired = bind(&RD, &params).unwrap();
        assert_eq!(desired.body["capacity"], json!(4));

        params.insert("capacity".into(), json!("four"));
        assert!(matches!(
            bind(&RD, &params),
            Err(BindError::TypeMismatch { key, want: "integer", .. }) if key == "capacity"
        ));
    }

    #[test]
    fn bare_scalar_binds_as_single_element_list() {
        let mut params = base_params();
        params.insert("zones".into(), json!("1"));
        let desired = bind(&RD, &params).unwrap();
        assert_eq!(desired.body["zones"], json!(["1"]));
    }

    #[test]
    fn pattern_violation_fails() {
        let mut params = base_params();
        params.insert("start_ip_address".into(), json!("not-an-ip"));
        assert!(matches!(
            bind(&RD, &params),
            Err(BindError::PatternMismatch { key, .. }) if key == "start_ip_address"
        ));
    }

    #[test]
    fn sub_option_errors_carry_dotted_path() {
        let mut params = base_params();
        params.insert("retention".into(), json!({"days": 7, "offsite": true}));
        assert_eq!(
            bind(&RD, &params),
            Err(BindError::UnknownOption {
                key: "retention.offsite".into()
            })
        );

        params.insert("retention".into(), json!({"geo_redundant": true}));
        assert_eq!(
            bind(&RD, &params),
            Err(BindError::MissingRequired {
                key: "retention.days".into()
            })
        );

        params.insert("retention".into(), json!({"days": "7", "geo_redundant": "yes"}));
        let desired = bind(&RD, &params).unwrap();
        assert_eq!(desired.body["retention"], json!({"days": 7, "geo_redundant": true}));
    }

    #[test]
    fn tags_normalize_scalars_to_strings() {
        let mut params = base_params();
        params.insert("tags".into(), json!({"env": "prod", "tier": 2}));
        let desired = bind(&RD, &params).unwrap();
        assert_eq!(
            desired.tags,
            Some(
                json!({"env": "prod", "tier": "2"})
                    .as_object()
                    .unwrap()
                    .clone()
            )
        );
    }

    #[test]
    fn facts_identity_accepts_omitted_suffix() {
        let params = json!({"resource_group": "rg1", "server_name": "srv1"})
            .as_object()
            .unwrap()
            .clone();
        let identity = bind_facts_identity(&RD, &params).unwrap();
        assert_eq!(identity.len(), 2);
        assert_eq!(identity.leaf(), Some(("server_name", "srv1")));

        // A hole in the prefix is still an error.
        let params = json!({"resource_group": "rg1", "name": "fr1"})
            .as_object()
            .unwrap()
            .clone();
        assert_eq!(
            bind_facts_identity(&RD, &params),
            Err(BindError::MissingRequired {
                key: "server_name".into()
            })
        );
    }
}
