//! Networking kinds: virtual networks, subnets, security groups, public IPs,
//! watchers, application gateways, and route tables.

use crate::patterns::CIDR;
use armrec_core::{FieldSpec, ListCall, ResourceDescriptor};

const VIRTUAL_NETWORK_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::str_list("address_prefixes").updatable().unordered(),
    FieldSpec::str_list("dns_servers").updatable().unordered(),
    FieldSpec::bool("enable_ddos_protection").updatable(),
];

pub static VIRTUAL_NETWORK: ResourceDescriptor = ResourceDescriptor::new(
    "virtual_network",
    "virtual_networks",
    &["resource_group", "name"],
    VIRTUAL_NETWORK_FIELDS,
)
.tags()
.lro()
.auto_location()
.readonly(&["provisioning_state", "resource_guid"])
.ignore_for_compare(&["provisioning_state"])
.lists(&[
    ListCall {
        method: "list",
        prefix_len: 1,
    },
    ListCall {
        method: "list_all",
        prefix_len: 0,
    },
]);

const SUBNET_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("address_prefix").updatable().required().pattern(CIDR),
    FieldSpec::str("network_security_group_id").updatable(),
    FieldSpec::str("route_table_id").updatable(),
    FieldSpec::str_list("service_endpoints").updatable().unordered(),
];

pub static SUBNET: ResourceDescriptor = ResourceDescriptor::new(
    "subnet",
    "subnets",
    &["resource_group", "virtual_network_name", "name"],
    SUBNET_FIELDS,
)
.lro()
.readonly(&["provisioning_state"])
.ignore_for_compare(&["provisioning_state"])
.lists(&[ListCall {
    method: "list",
    prefix_len: 2,
}]);

const RULE_PROTOCOL_FOLDS: &[(&str, &str)] = &[
    ("tcp", "Tcp"),
    ("udp", "Udp"),
    ("icmp", "Icmp"),
    ("any", "*"),
];

const RULE_ACCESS_FOLDS: &[(&str, &str)] = &[("allow", "Allow"), ("deny", "Deny")];

const RULE_DIRECTION_FOLDS: &[(&str, &str)] =
    &[("inbound", "Inbound"), ("outbound", "Outbound")];

const SECURITY_RULE_SCHEMA: &[FieldSpec] = &[
    FieldSpec::str("name").required(),
    FieldSpec::str("protocol").required().folds(RULE_PROTOCOL_FOLDS),
    FieldSpec::str("access").required().folds(RULE_ACCESS_FOLDS),
    FieldSpec::str("direction").required().folds(RULE_DIRECTION_FOLDS),
    FieldSpec::int("priority").required(),
    FieldSpec::str("source_address_prefix"),
    FieldSpec::str("destination_address_prefix"),
    FieldSpec::str("source_port_range"),
    FieldSpec::str("destination_port_range"),
    FieldSpec::str("description"),
];

const NETWORK_SECURITY_GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::sub_list("security_rules", SECURITY_RULE_SCHEMA)
        .updatable()
        .unordered(),
];

pub static NETWORK_SECURITY_GROUP: ResourceDescriptor = ResourceDescriptor::new(
    "network_security_group",
    "network_security_groups",
    &["resource_group", "name"],
    NETWORK_SECURITY_GROUP_FIELDS,
)
.tags()
.lro()
.auto_location()
.readonly(&["provisioning_state", "resource_guid", "default_security_rules"])
.ignore_for_compare(&["provisioning_state"])
.lists(&[
    ListCall {
        method: "list",
        prefix_len: 1,
    },
    ListCall {
        method: "list_all",
        prefix_len: 0,
    },
]);

const IP_ALLOCATION_FOLDS: &[(&str, &str)] = &[("static", "Static"), ("dynamic", "Dynamic")];

const IP_SKU_FOLDS: &[(&str, &str)] = &[("basic", "Basic"), ("standard", "Standard")];

const IP_VERSION_FOLDS: &[(&str, &str)] = &[("ipv4", "IPv4"), ("ipv6", "IPv6")];

const PUBLIC_IP_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::str("allocation_method")
        .updatable()
        .folds(IP_ALLOCATION_FOLDS),
    FieldSpec::str("sku").folds(IP_SKU_FOLDS),
    FieldSpec::str("version").folds(IP_VERSION_FOLDS),
    FieldSpec::str("domain_name_label").updatable(),
    FieldSpec::int("idle_timeout_in_minutes").updatable(),
];

pub static PUBLIC_IP_ADDRESS: ResourceDescriptor = ResourceDescriptor::new(
    "public_ip_address",
    "public_ip_addresses",
    &["resource_group", "name"],
    PUBLIC_IP_FIELDS,
)
.tags()
.lro()
.auto_location()
.readonly(&["ip_address", "provisioning_state", "resource_guid"])
.ignore_for_compare(&["provisioning_state"])
.surface_fields(&["id", "ip_address"])
.lists(&[
    ListCall {
        method: "list",
        prefix_len: 1,
    },
    ListCall {
        method: "list_all",
        prefix_len: 0,
    },
]);

const NETWORK_WATCHER_FIELDS: &[FieldSpec] = &[FieldSpec::str("location")];

// Watcher deletes return before the instance is gone; the engine keeps
// re-reading until the read comes back 404.
pub static NETWORK_WATCHER: ResourceDescriptor = ResourceDescriptor::new(
    "network_watcher",
    "network_watchers",
    &["resource_group", "name"],
    NETWORK_WATCHER_FIELDS,
)
.tags()
.lro()
.auto_location()
.settle_after_delete()
.readonly(&["provisioning_state"])
.ignore_for_compare(&["provisioning_state"])
.lists(&[
    ListCall {
        method: "list",
        prefix_len: 1,
    },
    ListCall {
        method: "list_all",
        prefix_len: 0,
    },
]);

const GATEWAY_SKU_FOLDS: &[(&str, &str)] = &[
    ("standard_small", "Standard_Small"),
    ("standard_medium", "Standard_Medium"),
    ("standard_large", "Standard_Large"),
    ("standard_v2", "Standard_v2"),
    ("waf_medium", "WAF_Medium"),
    ("waf_large", "WAF_Large"),
    ("waf_v2", "WAF_v2"),
];

const GATEWAY_SKU_SCHEMA: &[FieldSpec] = &[
    FieldSpec::str("name").required().folds(GATEWAY_SKU_FOLDS),
    FieldSpec::str("tier"),
    FieldSpec::int("capacity"),
];

const APPLICATION_GATEWAY_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::sub("sku", GATEWAY_SKU_SCHEMA).updatable(),
    FieldSpec::object("gateway_ip_configurations").updatable(),
    FieldSpec::object("frontend_ip_configurations").updatable(),
    FieldSpec::object("frontend_ports").updatable(),
    FieldSpec::object("backend_address_pools").updatable(),
    FieldSpec::object("backend_http_settings_collection").updatable(),
    FieldSpec::object("http_listeners").updatable(),
    FieldSpec::object("request_routing_rules").updatable(),
];

pub static APPLICATION_GATEWAY: ResourceDescriptor = ResourceDescriptor::new(
    "application_gateway",
    "application_gateways",
    &["resource_group", "name"],
    APPLICATION_GATEWAY_FIELDS,
)
.tags()
.lro()
.auto_location()
.readonly(&["operational_state", "provisioning_state", "resource_guid"])
.ignore_for_compare(&["operational_state", "provisioning_state"])
.surface_fields(&["id", "operational_state"])
.lists(&[
    ListCall {
        method: "list",
        prefix_len: 1,
    },
    ListCall {
        method: "list_all",
        prefix_len: 0,
    },
]);

const ROUTE_TABLE_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("location"),
    FieldSpec::bool("disable_bgp_route_propagation").updatable(),
];

pub static ROUTE_TABLE: ResourceDescriptor = ResourceDescriptor::new(
    "route_table",
    "route_tables",
    &["resource_group", "name"],
    ROUTE_TABLE_FIELDS,
)
.tags()
.lro()
.auto_location()
.readonly(&["provisioning_state"])
.ignore_for_compare(&["provisioning_state"])
.lists(&[
    ListCall {
        method: "list",
        prefix_len: 1,
    },
    ListCall {
        method: "list_all",
        prefix_len: 0,
    },
]);

const NEXT_HOP_FOLDS: &[(&str, &str)] = &[
    ("virtual_network_gateway", "VirtualNetworkGateway"),
    ("vnet_local", "VnetLocal"),
    ("internet", "Internet"),
    ("virtual_appliance", "VirtualAppliance"),
    ("none", "None"),
];

const ROUTE_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("address_prefix").updatable().required().pattern(CIDR),
    FieldSpec::str("next_hop_type").updatable().required().folds(NEXT_HOP_FOLDS),
    FieldSpec::str("next_hop_ip_address").updatable(),
];

pub static ROUTE: ResourceDescriptor = ResourceDescriptor::new(
    "route",
    "routes",
    &["resource_group", "route_table_name", "name"],
    ROUTE_FIELDS,
)
.lro()
.readonly(&["provisioning_state"])
.ignore_for_compare(&["provisioning_state"])
.lists(&[ListCall {
    method: "list",
    prefix_len: 2,
}]);
