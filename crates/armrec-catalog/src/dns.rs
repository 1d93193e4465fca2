//! DNS kinds: zones and record sets.

use armrec_core::{FieldSpec, ListCall, ResourceDescriptor};

const ZONE_TYPE_FOLDS: &[(&str, &str)] = &[("public", "Public"), ("private", "Private")];

const DNS_ZONE_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("zone_type").updatable().folds(ZONE_TYPE_FOLDS),
    FieldSpec::str_list("registration_virtual_networks").updatable().unordered(),
    FieldSpec::str_list("resolution_virtual_networks").updatable().unordered(),
];

pub static DNS_ZONE: ResourceDescriptor = ResourceDescriptor::new(
    "dns_zone",
    "zones",
    &["resource_group", "name"],
    DNS_ZONE_FIELDS,
)
.tags()
.lro()
.readonly(&["name_servers", "number_of_record_sets", "max_number_of_record_sets"])
.surface_fields(&["id", "name_servers"])
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

const RECORD_TYPE_FOLDS: &[(&str, &str)] = &[
    ("a", "A"),
    ("aaaa", "AAAA"),
    ("cname", "CNAME"),
    ("mx", "MX"),
    ("ns", "NS"),
    ("ptr", "PTR"),
    ("srv", "SRV"),
    ("txt", "TXT"),
    ("caa", "CAA"),
];

const RECORD_SCHEMA: &[FieldSpec] = &[
    FieldSpec::str("value").required(),
    FieldSpec::int("priority"),
    FieldSpec::int("weight"),
    FieldSpec::int("port"),
];

const DNS_RECORD_SET_FIELDS: &[FieldSpec] = &[
    FieldSpec::str("record_type").required().folds(RECORD_TYPE_FOLDS),
    FieldSpec::int("ttl").updatable(),
    FieldSpec::sub_list("records", RECORD_SCHEMA).updatable().unordered(),
];

pub static DNS_RECORD_SET: ResourceDescriptor = ResourceDescriptor::new(
    "dns_record_set",
    "record_sets",
    &["resource_group", "zone_name", "name"],
    DNS_RECORD_SET_FIELDS,
)
.readonly(&["fqdn", "provisioning_state"])
.ignore_for_compare(&["provisioning_state"])
.surface_fields(&["id", "fqdn"])
.lists(&[ListCall {
    method: "list_by_dns_zone",
    prefix_len: 2,
}]);
