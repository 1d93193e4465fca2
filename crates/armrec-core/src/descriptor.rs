//! Per-kind resource descriptors.
//!
//! A [`ResourceDescriptor`] is a static row of metadata that parameterizes the
//! engine for one Azure resource kind: which client group and entry points to
//! call, which keys identify an instance, which fields may be created or
//! updated, how enum tokens fold into ARM spelling, and how results are
//! stripped before they are reported.
//!
//! Descriptors are process-wide constants. The catalog crate declares them as
//! `static` rows and registers them once at startup; nothing mutates a
//! descriptor after that.

/// Declared type of an option field, used by the binder for coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 string.
    Str,
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Boolean.
    Bool,
    /// List of strings.
    StrList,
    /// Free-form JSON object, passed through uncoerced.
    Object,
    /// Nested sub-option object bound against its own field schema.
    Sub(&'static [FieldSpec]),
    /// List of nested sub-option objects.
    SubList(&'static [FieldSpec]),
}

/// Schema for a single creatable option field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Option name as the caller spells it (snake_case).
    pub name: &'static str,
    /// Declared type for coercion.
    pub ty: FieldType,
    /// Whether a divergence on this field may be converged with an update
    /// call. Non-updatable fields fall back to create-or-update.
    pub updatable: bool,
    /// Fold table from input tokens to ARM tokens. Empty for non-enums.
    pub enum_map: &'static [(&'static str, &'static str)],
    /// Regex the bound string value must match, if any.
    pub pattern: Option<&'static str>,
    /// Compare list values as a multiset instead of a sequence.
    pub unordered: bool,
    /// Whether the binder requires the field for `state=present`.
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            updatable: false,
            enum_map: &[],
            pattern: None,
            unordered: false,
            required: false,
        }
    }

    pub const fn str(name: &'static str) -> Self {
        Self::new(name, FieldType::Str)
    }

    pub const fn int(name: &'static str) -> Self {
        Self::new(name, FieldType::Int)
    }

    pub const fn float(name: &'static str) -> Self {
        Self::new(name, FieldType::Float)
    }

    pub const fn bool(name: &'static str) -> Self {
        Self::new(name, FieldType::Bool)
    }

    pub const fn str_list(name: &'static str) -> Self {
        Self::new(name, FieldType::StrList)
    }

    pub const fn object(name: &'static str) -> Self {
        Self::new(name, FieldType::Object)
    }

    pub const fn sub(name: &'static str, schema: &'static [FieldSpec]) -> Self {
        Self::new(name, FieldType::Sub(schema))
    }

    pub const fn sub_list(name: &'static str, schema: &'static [FieldSpec]) -> Self {
        Self::new(name, FieldType::SubList(schema))
    }

    pub const fn updatable(mut self) -> Self {
        self.updatable = true;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn folds(mut self, map: &'static [(&'static str, &'static str)]) -> Self {
        self.enum_map = map;
        self
    }

    pub const fn pattern(mut self, re: &'static str) -> Self {
        self.pattern = Some(re);
        self
    }

    pub const fn unordered(mut self) -> Self {
        self.unordered = true;
        self
    }

    /// Fold an input token through the enum table. Tokens already in ARM
    /// spelling pass through unchanged.
    pub fn fold_enum(&self, token: &str) -> Option<&'static str> {
        for (input, arm) in self.enum_map {
            if *input == token {
                return Some(arm);
            }
        }
        // Accept the ARM-side spelling as-is.
        for (_, arm) in self.enum_map {
            if *arm == token {
                return Some(arm);
            }
        }
        None
    }
}

/// How update bodies are projected for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateStyle {
    /// Create-or-update PUT: updates carry the full creatable projection.
    #[default]
    Put,
    /// PATCH-style update call: updates carry only the diverging fields.
    Patch,
}

/// A named ARM SDK entry point within a client group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiCall {
    /// Client group, e.g. `sql_servers`.
    pub group: &'static str,
    /// Method name, e.g. `create_or_update`.
    pub method: &'static str,
}

impl std::fmt::Display for ApiCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.group, self.method)
    }
}

/// A list-style read used by the facts path.
#[derive(Debug, Clone, Copy)]
pub struct ListCall {
    /// Method name on the client group.
    pub method: &'static str,
    /// How many leading identity keys the call requires.
    pub prefix_len: usize,
}

/// Static metadata for one resource kind.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDescriptor {
    /// Stable kind name, e.g. `mysql_firewall_rule`.
    pub kind: &'static str,
    /// ARM client group name, e.g. `firewall_rules`.
    pub client_group: &'static str,
    /// Ordered identity keys; the last one names the instance.
    pub identity: &'static [&'static str],
    /// Creatable option fields.
    pub fields: &'static [FieldSpec],
    /// Server-populated fields; never accepted as input, never compared.
    pub readonly_fields: &'static [&'static str],
    /// Whether the kind carries an ARM tag map.
    pub supports_tags: bool,
    /// Whether dry-run invocations are honored for this kind.
    pub supports_check_mode: bool,
    /// Whether mutating calls return a long-running-operation handle.
    pub lro: bool,
    /// Poll the read call until the resource is gone after a delete.
    pub post_delete_settle: bool,
    /// Default `location` from the containing resource group when omitted.
    pub auto_location: bool,
    /// PUT vs PATCH update body projection.
    pub update_style: UpdateStyle,
    /// Fields removed from the reported state.
    pub result_strip: &'static [&'static str],
    /// Fields ignored for comparison, in addition to `etag`.
    pub compare_ignore: &'static [&'static str],
    /// Fields hoisted to the top of the result envelope.
    pub surface: &'static [&'static str],
    pub create_call: &'static str,
    /// Distinct PATCH entry point, when the kind has one.
    pub update_call: Option<&'static str>,
    pub delete_call: &'static str,
    pub read_call: &'static str,
    /// List entry points for the facts path, longest prefix first.
    pub list_calls: &'static [ListCall],
}

impl ResourceDescriptor {
    /// A row with engine defaults: tag-less, synchronous, check-mode capable,
    /// PUT-style `create_or_update` / `get` / `delete` entry points.
    pub const fn new(
        kind: &'static str,
        client_group: &'static str,
        identity: &'static [&'static str],
        fields: &'static [FieldSpec],
    ) -> Self {
        Self {
            kind,
            client_group,
            identity,
            fields,
            readonly_fields: &[],
            supports_tags: false,
            supports_check_mode: true,
            lro: false,
            post_delete_settle: false,
            auto_location: false,
            update_style: UpdateStyle::Put,
            result_strip: &[],
            compare_ignore: &[],
            surface: &["id"],
            create_call: "create_or_update",
            update_call: None,
            delete_call: "delete",
            read_call: "get",
            list_calls: &[],
        }
    }

    pub const fn tags(mut self) -> Self {
        self.supports_tags = true;
        self
    }

    pub const fn lro(mut self) -> Self {
        self.lro = true;
        self
    }

    pub const fn settle_after_delete(mut self) -> Self {
        self.post_delete_settle = true;
        self
    }

    pub const fn auto_location(mut self) -> Self {
        self.auto_location = true;
        self
    }

    pub const fn patch_updates(mut self, update_call: &'static str) -> Self {
        self.update_style = UpdateStyle::Patch;
        self.update_call = Some(update_call);
        self
    }

    pub const fn readonly(mut self, fields: &'static [&'static str]) -> Self {
        self.readonly_fields = fields;
        self
    }

    pub const fn strip(mut self, fields: &'static [&'static str]) -> Self {
        self.result_strip = fields;
        self
    }

    pub const fn ignore_for_compare(mut self, fields: &'static [&'static str]) -> Self {
        self.compare_ignore = fields;
        self
    }

    pub const fn surface_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.surface = fields;
        self
    }

    pub const fn calls(
        mut self,
        create: &'static str,
        read: &'static str,
        delete: &'static str,
    ) -> Self {
        self.create_call = create;
        self.read_call = read;
        self.delete_call = delete;
        self
    }

    pub const fn lists(mut self, calls: &'static [ListCall]) -> Self {
        self.list_calls = calls;
        self
    }

    pub const fn no_check_mode(mut self) -> Self {
        self.supports_check_mode = false;
        self
    }

    /// Look up a creatable field schema by option name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_identity_key(&self, name: &str) -> bool {
        self.identity.contains(&name)
    }

    pub fn is_readonly(&self, name: &str) -> bool {
        self.readonly_fields.contains(&name)
    }

    /// Fields the differ may converge via an update call.
    pub fn updatable_fields(&self) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        self.fields.iter().filter(|f| f.updatable)
    }

    pub fn read_api(&self) -> ApiCall {
        ApiCall {
            group: self.client_group,
            method: self.read_call,
        }
    }

    pub fn create_api(&self) -> ApiCall {
        ApiCall {
            group: self.client_group,
            method: self.create_call,
        }
    }

    /// The entry point updates route through: the distinct update call when
    /// one is declared, the create-or-update call otherwise.
    pub fn update_api(&self) -> ApiCall {
        ApiCall {
            group: self.client_group,
            method: self.update_call.unwrap_or(self.create_call),
        }
    }

    pub fn delete_api(&self) -> ApiCall {
        ApiCall {
            group: self.client_group,
            method: self.delete_call,
        }
    }

    pub fn list_api(&self, call: &ListCall) -> ApiCall {
        ApiCall {
            group: self.client_group,
            method: call.method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_TYPE_FOLDS: &[(&str, &str)] = &[
        ("service_managed", "ServiceManaged"),
        ("azure_key_vault", "AzureKeyVault"),
    ];

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::str("server_key_type")
            .updatable()
            .required()
            .folds(KEY_TYPE_FOLDS),
        FieldSpec::str("server_key_name").updatable(),
    ];

    static RD: ResourceDescriptor = ResourceDescriptor::new(
        "sql_encryption_protector",
        "encryption_protectors",
        &["resource_group", "server_name"],
        FIELDS,
    )
    .readonly(&["uri", "thumbprint"]);

    #[test]
    fn fold_accepts_input_and_arm_spelling() {
        let f = RD.field("server_key_type").unwrap();
        assert_eq!(f.fold_enum("azure_key_vault"), Some("AzureKeyVault"));
        assert_eq!(f.fold_enum("AzureKeyVault"), Some("AzureKeyVault"));
        assert_eq!(f.fold_enum("vault"), None);
    }

    #[test]
    fn identity_and_readonly_lookups() {
        assert!(RD.is_identity_key("server_name"));
        assert!(!RD.is_identity_key("server_key_type"));
        assert!(RD.is_readonly("thumbprint"));
    }

    #[test]
    fn update_api_defaults_to_create_call() {
        assert_eq!(RD.update_api().method, "create_or_update");
        assert_eq!(RD.update_api().group, "encryption_protectors");
    }

    #[test]
    fn field_specs_compare_structurally() {
        assert_eq!(FIELDS[0], FIELDS[0]);
        assert_ne!(FIELDS[0], FIELDS[1]);
        assert_eq!(FieldType::Sub(FIELDS), FieldType::Sub(FIELDS));
        assert_ne!(FieldType::Sub(FIELDS), FieldType::SubList(FIELDS));
    }
}
