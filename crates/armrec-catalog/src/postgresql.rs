//! Azure Database for PostgreSQL kinds.

use crate::folds::ENABLED_DISABLED;
use crate::patterns::IPV4;
use armrec_core::{FieldSpec, ListCall, ResourceDescriptor};

const TIER_FOLDS: &[(&str, &str)] = &[
    ("basic", "Basic"),
    ("general_purpose", "GeneralPurpose"),
    ("memory_optimized", "MemoryOptimized"),
];

const SKU_SCHEMA: &[FieldSpec] = &[
    FieldSpec::str("name").required(),
    FieldSpec::str("tier").folds(TIER_FOLDS),
    FieldSpec::int("capacity"),
    FieldSpec::str("family"),
];

const STORAGE_PROFILE: &[FieldSpec] = &[
    FieldSpec::int("storage_mb").updatable(),
    FieldSpec::int("backup_retention_days").updatable(),
    FieldSpec::str("geo_redundant_backup").folds(ENABLED_DISABLED),
    FieldSpec::str("storage_autogrow").updatable().folds(ENABLED_DISABLED),
];

const POSTGRESQL_SERVER_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::sub("sku", SKU_SCHEMA).updatable(),
    FieldSpec::str("admin_username"),
    FieldSpec::str("admin_password").updatable(),
    FieldSpec::str("version"),
    FieldSpec::str("ssl_enforcement").updatable().folds(ENABLED_DISABLED),
    FieldSpec::sub("storage_profile", STORAGE_PROFILE).updatable(),
    FieldSpec::str("create_mode"),
];

pub static POSTGRESQL_SERVER: ResourceDescriptor = ResourceDescriptor::new(
    "postgresql_server",
    "servers",
    &["resource_group", "name"],
    POSTGRESQL_SERVER_FIELDS,
)
.tags()
.lro()
.auto_location()
.patch_updates("update")
.readonly(&["fully_qualified_domain_name", "user_visible_state", "earliest_restore_date"])
.ignore_for_compare(&["user_visible_state"])
.strip(&["admin_password"])
.surface_fields(&["id", "version", "fully_qualified_domain_name"])
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

const POSTGRESQL_DATABASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("charset"),
    FieldSpec::str("collation"),
];

pub static POSTGRESQL_DATABASE: ResourceDescriptor = ResourceDescriptor::new(
    "postgresql_database",
    "databases",
    &["resource_group", "server_name", "name"],
    POSTGRESQL_DATABASE_FIELDS,
)
.lro()
.lists(&[ListCall {
    method: "list_by_server",
    prefix_len: 2,
}]);

const POSTGRESQL_FIREWALL_RULE_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("start_ip_address")
        .updatable()
        .required()
        .pattern(IPV4),
    FieldSpec::str("end_ip_address")
        .updatable()
        .required()
        .pattern(IPV4),
];

pub static POSTGRESQL_FIREWALL_RULE: ResourceDescriptor = ResourceDescriptor::new(
    "postgresql_firewall_rule",
    "firewall_rules",
    &["resource_group", "server_name", "name"],
    POSTGRESQL_FIREWALL_RULE_FIELDS,
)
.lro()
.lists(&[ListCall {
    method: "list_by_server",
    prefix_len: 2,
}]);
