//! Azure SQL kinds: servers, databases, elastic pools, firewall rules, and
//! the server encryption protector.

use crate::folds::ENABLED_DISABLED;
use crate::patterns::IPV4;
use armrec_core::{FieldSpec, ListCall, ResourceDescriptor};

const TLS_FOLDS: &[(&str, &str)] = &[("1_0", "1.0"), ("1_1", "1.1"), ("1_2", "1.2")];

const SQL_SERVER_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::str("version"),
    FieldSpec::str("admin_username"),
    FieldSpec::str("admin_password").updatable(),
    FieldSpec::str("minimal_tls_version").updatable().folds(TLS_FOLDS),
    FieldSpec::str("public_network_access")
        .updatable()
        .folds(ENABLED_DISABLED),
];

pub static SQL_SERVER: ResourceDescriptor = ResourceDescriptor::new(
    "sql_server",
    "sql_servers",
    &["resource_group", "name"],
    SQL_SERVER_FIELDS,
)
.tags()
.lro()
.auto_location()
.readonly(&["fully_qualified_domain_name", "state"])
.strip(&["admin_password"])
.surface_fields(&["id", "version", "state", "fully_qualified_domain_name"])
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

const SKU_SCHEMA: &[FieldSpec] = &[
    FieldSpec::str("name").required(),
    FieldSpec::str("tier"),
    FieldSpec::str("family"),
    FieldSpec::int("capacity"),
];

const SQL_DATABASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::sub("sku", SKU_SCHEMA).updatable(),
    FieldSpec::str("collation"),
    FieldSpec::int("max_size_bytes").updatable(),
    FieldSpec::bool("zone_redundant").updatable(),
    FieldSpec::str("read_scale").updatable().folds(ENABLED_DISABLED),
    FieldSpec::str("elastic_pool_id").updatable(),
    FieldSpec::str("create_mode"),
    FieldSpec::str("source_database_id"),
];

pub static SQL_DATABASE: ResourceDescriptor = ResourceDescriptor::new(
    "sql_database",
    "databases",
    &["resource_group", "server_name", "name"],
    SQL_DATABASE_FIELDS,
)
.tags()
.lro()
.auto_location()
.patch_updates("update")
.readonly(&["status", "database_id", "creation_date", "default_secondary_location"])
.ignore_for_compare(&["status", "creation_date"])
.strip(&["creation_date"])
.surface_fields(&["id", "status"])
.lists(&[ListCall {
    method: "list_by_server",
    prefix_len: 2,
}]);

const PER_DATABASE_SETTINGS: &[FieldSpec] = &[
    FieldSpec::float("min_capacity").updatable(),
    FieldSpec::float("max_capacity").updatable(),
];

const SQL_ELASTIC_POOL_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::sub("sku", SKU_SCHEMA).updatable(),
    FieldSpec::sub("per_database_settings", PER_DATABASE_SETTINGS).updatable(),
    FieldSpec::int("max_size_bytes").updatable(),
    FieldSpec::bool("zone_redundant").updatable(),
];

pub static SQL_ELASTIC_POOL: ResourceDescriptor = ResourceDescriptor::new(
    "sql_elastic_pool",
    "elastic_pools",
    &["resource_group", "server_name", "name"],
    SQL_ELASTIC_POOL_FIELDS,
)
.tags()
.lro()
.auto_location()
.patch_updates("update")
.readonly(&["state", "creation_date"])
.ignore_for_compare(&["state", "creation_date"])
.lists(&[ListCall {
    method: "list_by_server",
    prefix_len: 2,
}]);

const SQL_FIREWALL_RULE_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("start_ip_address")
        .updatable()
        .required()
        .pattern(IPV4),
    FieldSpec::str("end_ip_address")
        .updatable()
        .required()
        .pattern(IPV4),
];

pub static SQL_FIREWALL_RULE: ResourceDescriptor = ResourceDescriptor::new(
    "sql_firewall_rule",
    "firewall_rules",
    &["resource_group", "server_name", "name"],
    SQL_FIREWALL_RULE_FIELDS,
)
.lists(&[ListCall {
    method: "list_by_server",
    prefix_len: 2,
}]);

const KEY_TYPE_FOLDS: &[(&str, &str)] = &[
    ("service_managed", "ServiceManaged"),
    ("azure_key_vault", "AzureKeyVault"),
];

const SQL_ENCRYPTION_PROTECTOR_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("server_key_type")
        .updatable()
        .required()
        .folds(KEY_TYPE_FOLDS),
    FieldSpec::str("server_key_name").updatable(),
];

// The protector is a singleton per server; its identity stops at the server.
pub static SQL_ENCRYPTION_PROTECTOR: ResourceDescriptor = ResourceDescriptor::new(
    "sql_encryption_protector",
    "encryption_protectors",
    &["resource_group", "server_name"],
    SQL_ENCRYPTION_PROTECTOR_FIELDS,
)
.lro()
.readonly(&["uri", "thumbprint"])
.surface_fields(&["id", "uri"]);
