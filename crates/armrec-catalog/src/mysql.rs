//! Azure Database for MySQL kinds.

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
    FieldSpec::str("backup_retention_days"),
    FieldSpec::str("geo_redundant_backup").folds(ENABLED_DISABLED),
    FieldSpec::str("storage_autogrow").updatable().folds(ENABLED_DISABLED),
];

const MYSQL_SERVER_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::sub("sku", SKU_SCHEMA).updatable(),
    FieldSpec::str("admin_username"),
    FieldSpec::str("admin_password").updatable(),
    FieldSpec::str("version"),
    FieldSpec::str("ssl_enforcement").updatable().folds(ENABLED_DISABLED),
    FieldSpec::sub("storage_profile", STORAGE_PROFILE).updatable(),
    FieldSpec::str("create_mode"),
    FieldSpec::bool("restarted").updatable(),
];

pub static MYSQL_SERVER: ResourceDescriptor = ResourceDescriptor::new(
    "mysql_server",
    "servers",
    &["resource_group", "name"],
    MYSQL_SERVER_FIELDS,
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

const MYSQL_DATABASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("charset"),
    FieldSpec::str("collation"),
];

pub static MYSQL_DATABASE: ResourceDescriptor = ResourceDescriptor::new(
    "mysql_database",
    "databases",
    &["resource_group", "server_name", "name"],
    MYSQL_DATABASE_FIELDS,
)
.lro()
.lists(&[ListCall {
    method: "list_by_server",
    prefix_len: 2,
}]);

const MYSQL_FIREWALL_RULE_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("start_ip_address")
        .updatable()
        .required()
        .pattern(IPV4),
    FieldSpec::str("end_ip_address")
        .updatable()
        .required()
        .pattern(IPV4),
];

pub static MYSQL_FIREWALL_RULE: ResourceDescriptor = ResourceDescriptor::new(
    "mysql_firewall_rule",
    "firewall_rules",
    &["resource_group", "server_name", "name"],
    MYSQL_FIREWALL_RULE_FIELDS,
)
.lro()
.lists(&[ListCall {
    method: "list_by_server",
    prefix_len: 2,
}]);

const MYSQL_CONFIGURATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("value").updatable().required(),
    FieldSpec::str("source").updatable(),
];

pub static MYSQL_CONFIGURATION: ResourceDescriptor = ResourceDescriptor::new(
    "mysql_configuration",
    "configurations",
    &["resource_group", "server_name", "name"],
    MYSQL_CONFIGURATION_FIELDS,
)
.lro()
.readonly(&["default_value", "data_type", "allowed_values"])
.lists(&[ListCall {
    method: "list_by_server",
    prefix_len: 2,
}]);
