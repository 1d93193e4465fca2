//! Container kinds: registries and container instance groups.

use armrec_core::{FieldSpec, ListCall, ResourceDescriptor};

const REGISTRY_SKU_FOLDS: &[(&str, &str)] = &[
    ("basic", "Basic"),
    ("standard", "Standard"),
    ("premium", "Premium"),
];

const CONTAINER_REGISTRY_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::str("sku").updatable().required().folds(REGISTRY_SKU_FOLDS),
    FieldSpec::bool("admin_user_enabled").updatable(),
];

pub static CONTAINER_REGISTRY: ResourceDescriptor = ResourceDescriptor::new(
    "container_registry",
    "registries",
    &["resource_group", "name"],
    CONTAINER_REGISTRY_FIELDS,
)
.tags()
.lro()
.auto_location()
.patch_updates("update")
.readonly(&["login_server", "creation_date", "provisioning_state"])
.ignore_for_compare(&["provisioning_state"])
.strip(&["credentials"])
.surface_fields(&["id", "login_server"])
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

const OS_TYPE_FOLDS: &[(&str, &str)] = &[("linux", "Linux"), ("windows", "Windows")];

const RESTART_POLICY_FOLDS: &[(&str, &str)] = &[
    ("always", "Always"),
    ("on_failure", "OnFailure"),
    ("never", "Never"),
];

const IP_TYPE_FOLDS: &[(&str, &str)] = &[("public", "Public"), ("private", "Private")];

const CONTAINER_SCHEMA: &[FieldSpec] = &[
    FieldSpec::str("name").required(),
    FieldSpec::str("image").required(),
    FieldSpec::float("memory"),
    FieldSpec::float("cpu"),
    FieldSpec::str_list("ports").unordered(),
    FieldSpec::object("environment_variables"),
];

const CONTAINER_GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::str("os_type").required().folds(OS_TYPE_FOLDS),
    FieldSpec::str("restart_policy").folds(RESTART_POLICY_FOLDS),
    FieldSpec::str("ip_address_type").folds(IP_TYPE_FOLDS),
    FieldSpec::str("dns_name_label"),
    FieldSpec::sub_list("containers", CONTAINER_SCHEMA).required(),
];

pub static CONTAINER_GROUP: ResourceDescriptor = ResourceDescriptor::new(
    "container_group",
    "container_groups",
    &["resource_group", "name"],
    CONTAINER_GROUP_FIELDS,
)
.tags()
.lro()
.auto_location()
.readonly(&["ip_address", "provisioning_state", "instance_view"])
.ignore_for_compare(&["provisioning_state"])
.surface_fields(&["id", "ip_address"])
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
