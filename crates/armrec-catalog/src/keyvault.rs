//! Key vault kinds.

use crate::folds::ENABLED_DISABLED;
use crate::patterns::UUID;
use armrec_core::{FieldSpec, ListCall, ResourceDescriptor};

const VAULT_SKU_FOLDS: &[(&str, &str)] = &[("standard", "standard"), ("premium", "premium")];

const ACCESS_POLICY_SCHEMA: &[FieldSpec] = &[
    FieldSpec::str("tenant_id").required().pattern(UUID),
    FieldSpec::str("object_id").required().pattern(UUID),
    FieldSpec::str_list("keys").unordered(),
    FieldSpec::str_list("secrets").unordered(),
    FieldSpec::str_list("certificates").unordered(),
    FieldSpec::str_list("storage").unordered(),
];

const KEY_VAULT_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::str("tenant_id").required().pattern(UUID),
    FieldSpec::str("sku").updatable().folds(VAULT_SKU_FOLDS),
    FieldSpec::sub_list("access_policies", ACCESS_POLICY_SCHEMA)
        .updatable()
        .unordered(),
    FieldSpec::bool("enabled_for_deployment").updatable(),
    FieldSpec::bool("enabled_for_disk_encryption").updatable(),
    FieldSpec::bool("enabled_for_template_deployment").updatable(),
    FieldSpec::bool("enable_soft_delete"),
    FieldSpec::bool("enable_purge_protection"),
    FieldSpec::str("public_network_access")
        .updatable()
        .folds(ENABLED_DISABLED),
];

pub static KEY_VAULT: ResourceDescriptor = ResourceDescriptor::new(
    "key_vault",
    "vaults",
    &["resource_group", "name"],
    KEY_VAULT_FIELDS,
)
.tags()
.lro()
.auto_location()
.readonly(&["vault_uri", "provisioning_state"])
.ignore_for_compare(&["provisioning_state"])
.strip(&["access_policies"])
.surface_fields(&["id", "vault_uri"])
.lists(&[
    ListCall {
        method: "list_by_resource_group",
        prefix_len: 1,
    },
    ListCall {
        method: "list",
        prefix_len: 0,
    },
]);
