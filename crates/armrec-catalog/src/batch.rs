//! Azure Batch kinds.

use armrec_core::{FieldSpec, ListCall, ResourceDescriptor};

const ALLOCATION_MODE_FOLDS: &[(&str, &str)] = &[
    ("batch_service", "BatchService"),
    ("user_subscription", "UserSubscription"),
];

const AUTO_STORAGE_SCHEMA: &[FieldSpec] =
    &[FieldSpec::str("storage_account_id").required()];

const BATCH_ACCOUNT_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::sub("auto_storage", AUTO_STORAGE_SCHEMA).updatable(),
    FieldSpec::str("pool_allocation_mode").folds(ALLOCATION_MODE_FOLDS),
    FieldSpec::str("key_vault_reference_id"),
];

pub static BATCH_ACCOUNT: ResourceDescriptor = ResourceDescriptor::new(
    "batch_account",
    "batch_accounts",
    &["resource_group", "name"],
    BATCH_ACCOUNT_FIELDS,
)
.tags()
.lro()
.auto_location()
.patch_updates("update")
.readonly(&[
    "account_endpoint",
    "provisioning_state",
    "dedicated_core_quota",
    "low_priority_core_quota",
    "pool_quota",
])
.ignore_for_compare(&["provisioning_state"])
.surface_fields(&["id", "account_endpoint"])
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
