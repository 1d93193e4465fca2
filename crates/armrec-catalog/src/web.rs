//! App Service kinds: plans, web apps, and deployment slots.

use armrec_core::{FieldSpec, ListCall, ResourceDescriptor};

const PLAN_SKU_FOLDS: &[(&str, &str)] = &[
    ("free", "F1"),
    ("shared", "D1"),
    ("basic_small", "B1"),
    ("basic_medium", "B2"),
    ("basic_large", "B3"),
    ("standard_small", "S1"),
    ("standard_medium", "S2"),
    ("standard_large", "S3"),
    ("premium_v2_small", "P1v2"),
    ("premium_v2_medium", "P2v2"),
    ("premium_v2_large", "P3v2"),
];

const APP_SERVICE_PLAN_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::str("sku").updatable().folds(PLAN_SKU_FOLDS),
    FieldSpec::bool("reserved"),
    FieldSpec::int("number_of_workers").updatable(),
    FieldSpec::bool("per_site_scaling").updatable(),
];

pub static APP_SERVICE_PLAN: ResourceDescriptor = ResourceDescriptor::new(
    "app_service_plan",
    "app_service_plans",
    &["resource_group", "name"],
    APP_SERVICE_PLAN_FIELDS,
)
.tags()
.lro()
.auto_location()
.readonly(&["status", "provisioning_state", "maximum_number_of_workers"])
.ignore_for_compare(&["status", "provisioning_state"])
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

const APP_SETTING_SCHEMA: &[FieldSpec] = &[
    FieldSpec::str("name").required(),
    FieldSpec::str("value").required(),
];

const SITE_CONFIG_SCHEMA: &[FieldSpec] = &[
    FieldSpec::str("linux_fx_version").updatable(),
    FieldSpec::bool("always_on").updatable(),
    FieldSpec::str("min_tls_version").updatable(),
    FieldSpec::bool("http20_enabled").updatable(),
    FieldSpec::str("ftps_state").updatable(),
    FieldSpec::int("number_of_workers").updatable(),
];

const WEB_APP_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::str("server_farm_id").updatable(),
    FieldSpec::sub("site_config", SITE_CONFIG_SCHEMA).updatable(),
    FieldSpec::sub_list("app_settings", APP_SETTING_SCHEMA)
        .updatable()
        .unordered(),
    FieldSpec::bool("https_only").updatable(),
    FieldSpec::bool("client_affinity_enabled").updatable(),
];

pub static WEB_APP: ResourceDescriptor = ResourceDescriptor::new(
    "web_app",
    "web_apps",
    &["resource_group", "name"],
    WEB_APP_FIELDS,
)
.tags()
.lro()
.auto_location()
.readonly(&["state", "default_host_name", "outbound_ip_addresses", "enabled_host_names"])
.ignore_for_compare(&["state"])
.surface_fields(&["id", "state", "default_host_name"])
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

pub static WEB_APP_SLOT: ResourceDescriptor = ResourceDescriptor::new(
    "web_app_slot",
    "web_apps",
    &["resource_group", "app_name", "name"],
    WEB_APP_FIELDS,
)
.tags()
.lro()
.auto_location()
.readonly(&["state", "default_host_name", "outbound_ip_addresses", "enabled_host_names"])
.ignore_for_compare(&["state"])
.surface_fields(&["id", "state", "default_host_name"])
.calls("create_or_update_slot", "get_slot", "delete_slot")
.lists(&[ListCall {
    method: "list_slots",
    prefix_len: 2,
}]);
