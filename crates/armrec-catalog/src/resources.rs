//! Resource group kinds.

use armrec_core::{FieldSpec, ListCall, ResourceDescriptor};

const RESOURCE_GROUP_FIELDS: &[FieldSpec] = &[FieldSpec::str("location").required()];

pub static RESOURCE_GROUP: ResourceDescriptor = ResourceDescriptor::new(
    "resource_group",
    "resource_groups",
    &["name"],
    RESOURCE_GROUP_FIELDS,
)
.tags()
.lro()
.readonly(&["provisioning_state"])
.ignore_for_compare(&["provisioning_state"])
.lists(&[ListCall {
    method: "list",
    prefix_len: 0,
}]);
