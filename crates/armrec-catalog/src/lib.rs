//! Descriptor catalog: one static row per supported Azure resource kind.
//!
//! Rows are declarative data, grouped by service module. Adding a kind means
//! appending a row and listing it in [`ROWS`]; the engine itself never grows
//! a per-kind code path. The registry is built once, on first use, and is
//! immutable afterwards.

pub mod batch;
pub mod containers;
pub mod dns;
pub mod keyvault;
pub mod mysql;
pub mod network;
pub mod postgresql;
pub mod resources;
pub mod sql;
pub mod storage;
pub mod web;

use armrec_core::{Registry, ResourceDescriptor};
use std::sync::LazyLock;

/// Common validation patterns referenced from the rows.
pub mod patterns {
    pub const IPV4: &str = r"^(\d{1,3}\.){3}\d{1,3}$";
    pub const CIDR: &str = r"^(\d{1,3}\.){3}\d{1,3}/\d{1,2}$";
    pub const UUID: &str = r"^[0-9a-fA-F]{8}(-[0-9a-fA-F]{4}){3}-[0-9a-fA-F]{12}$";
}

/// Folds shared by many kinds.
pub(crate) mod folds {
    pub const ENABLED_DISABLED: &[(&str, &str)] =
        &[("enabled", "Enabled"), ("disabled", "Disabled")];
}

static ROWS: &[&ResourceDescriptor] = &[
    // Resource groups
    &resources::RESOURCE_GROUP,
    // SQL
    &sql::SQL_SERVER,
    &sql::SQL_DATABASE,
    &sql::SQL_ELASTIC_POOL,
    &sql::SQL_FIREWALL_RULE,
    &sql::SQL_ENCRYPTION_PROTECTOR,
    // MySQL
    &mysql::MYSQL_SERVER,
    &mysql::MYSQL_DATABASE,
    &mysql::MYSQL_FIREWALL_RULE,
    &mysql::MYSQL_CONFIGURATION,
    // PostgreSQL
    &postgresql::POSTGRESQL_SERVER,
    &postgresql::POSTGRESQL_DATABASE,
    &postgresql::POSTGRESQL_FIREWALL_RULE,
    // Network
    &network::VIRTUAL_NETWORK,
    &network::SUBNET,
    &network::NETWORK_SECURITY_GROUP,
    &network::PUBLIC_IP_ADDRESS,
    &network::NETWORK_WATCHER,
    &network::APPLICATION_GATEWAY,
    &network::ROUTE_TABLE,
    &network::ROUTE,
    // Key vault
    &keyvault::KEY_VAULT,
    // Storage
    &storage::STORAGE_ACCOUNT,
    // Web
    &web::APP_SERVICE_PLAN,
    &web::WEB_APP,
    &web::WEB_APP_SLOT,
    // Batch
    &batch::BATCH_ACCOUNT,
    // Containers
    &containers::CONTAINER_REGISTRY,
    &containers::CONTAINER_GROUP,
    // DNS
    &dns::DNS_ZONE,
    &dns::DNS_RECORD_SET,
];

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| Registry::from_rows(ROWS));

/// The process-wide registry over all catalog rows.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use armrec_core::UpdateStyle;
    use std::collections::HashSet;

    fn all_fields(
        fields: &'static [armrec_core::FieldSpec],
        out: &mut Vec<&'static armrec_core::FieldSpec>,
    ) {
        for f in fields {
            out.push(f);
            match f.ty {
                armrec_core::FieldType::Sub(schema) | armrec_core::FieldType::SubList(schema) => {
                    all_fields(schema, out)
                }
                _ => {}
            }
        }
    }

    /// Mechanical lint over every registered row: the invariants the engine
    /// assumes of its tables.
    #[test]
    fn catalog_rows_are_well_formed() {
        let registry = registry();
        assert!(registry.len() >= 30);

        for rd in registry.iter() {
            assert!(!rd.identity.is_empty(), "{}: identity must not be empty", rd.kind);

            let identity: HashSet<_> = rd.identity.iter().collect();
            assert_eq!(
                identity.len(),
                rd.identity.len(),
                "{}: duplicate identity key",
                rd.kind
            );

            // Readonly fields are server-owned; they must not overlap the
            // creatable set or the identity tuple.
            for ro in rd.readonly_fields {
                assert!(rd.field(ro).is_none(), "{}: readonly field {} is creatable", rd.kind, ro);
                assert!(!rd.is_identity_key(ro), "{}: readonly field {} is identity", rd.kind, ro);
            }

            // Patch-style rows must name their update entry point.
            if rd.update_style == UpdateStyle::Patch {
                assert!(rd.update_call.is_some(), "{}: patch row without update call", rd.kind);
            }

            // List calls bind a strict identity prefix, one per length.
            let mut prefixes = HashSet::new();
            for lc in rd.list_calls {
                assert!(
                    lc.prefix_len < rd.identity.len(),
                    "{}: list call {} requires the full identity",
                    rd.kind,
                    lc.method
                );
                assert!(
                    prefixes.insert(lc.prefix_len),
                    "{}: two list calls for the same prefix",
                    rd.kind
                );
            }

            let mut fields = Vec::new();
            all_fields(rd.fields, &mut fields);
            for f in &fields {
                // Enum tables must be unambiguous.
                let mut inputs = HashSet::new();
                for (input, _) in f.enum_map {
                    assert!(
                        inputs.insert(input),
                        "{}: duplicate enum token {} on {}",
                        rd.kind,
                        input,
                        f.name
                    );
                }
                // Declared patterns must compile.
                if let Some(p) = f.pattern {
                    assert!(
                        regex::Regex::new(p).is_ok(),
                        "{}: pattern on {} does not compile",
                        rd.kind,
                        f.name
                    );
                }
            }
        }
    }

    #[test]
    fn named_kinds_resolve() {
        let registry = registry();

        let fr = registry.get("mysql_firewall_rule").unwrap();
        assert_eq!(fr.identity, &["resource_group", "server_name", "name"]);
        assert_eq!(fr.client_group, "firewall_rules");

        let nw = registry.get("network_watcher").unwrap();
        assert!(nw.post_delete_settle);

        let ep = registry.get("sql_encryption_protector").unwrap();
        let key_type = ep.field("server_key_type").unwrap();
        assert_eq!(key_type.fold_enum("azure_key_vault"), Some("AzureKeyVault"));

        assert!(matches!(
            registry.get("floppy_disk"),
            Err(armrec_core::RegistryError::UnknownResourceKind(_))
        ));
    }
}
