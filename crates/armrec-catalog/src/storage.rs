//! Storage account kind.

use crate::folds::ENABLED_DISABLED;
use armrec_core::{FieldSpec, ListCall, ResourceDescriptor};

const SKU_NAME_FOLDS: &[(&str, &str)] = &[
    ("standard_lrs", "Standard_LRS"),
    ("standard_grs", "Standard_GRS"),
    ("standard_ragrs", "Standard_RAGRS"),
    ("standard_zrs", "Standard_ZRS"),
    ("premium_lrs", "Premium_LRS"),
    ("premium_zrs", "Premium_ZRS"),
];

const KIND_FOLDS: &[(&str, &str)] = &[
    ("storage", "Storage"),
    ("storage_v2", "StorageV2"),
    ("blob_storage", "BlobStorage"),
    ("block_blob_storage", "BlockBlobStorage"),
    ("file_storage", "FileStorage"),
];

const ACCESS_TIER_FOLDS: &[(&str, &str)] = &[("hot", "Hot"), ("cool", "Cool")];

const TLS_FOLDS: &[(&str, &str)] = &[
    ("1_0", "TLS1_0"),
    ("1_1", "TLS1_1"),
    ("1_2", "TLS1_2"),
];

const STORAGE_ACCOUNT_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::str("sku").updatable().required().folds(SKU_NAME_FOLDS),
    FieldSpec::str("kind").required().folds(KIND_FOLDS),
    FieldSpec::str("access_tier").updatable().folds(ACCESS_TIER_FOLDS),
    FieldSpec::bool("https_traffic_only").updatable(),
    FieldSpec::bool("allow_blob_public_access").updatable(),
    FieldSpec::str("minimum_tls_version").updatable().folds(TLS_FOLDS),
    FieldSpec::str("public_network_access")
        .updatable()
        .folds(ENABLED_DISABLED),
];

pub static STORAGE_ACCOUNT: ResourceDescriptor = ResourceDescriptor::new(
    "storage_account",
    "storage_accounts",
    &["resource_group", "name"],
    STORAGE_ACCOUNT_FIELDS,
)
.tags()
.lro()
.auto_location()
.patch_updates("update")
.readonly(&["primary_endpoints", "secondary_endpoints", "provisioning_state", "creation_time"])
.ignore_for_compare(&["provisioning_state"])
.surface_fields(&["id", "primary_endpoints"])
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
