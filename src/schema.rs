//! Static description of the provider's configuration fields.

/// Value type of a provider field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    String,
    Bool,
    Int,
}

/// One configurable provider field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldSchema {
    pub name: &'static str,
    /// Environment variable consulted when the field is not set explicitly.
    pub env: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Fallback used when neither the field nor its variable is set.
    pub default: Option<&'static str>,
    pub description: &'static str,
}

pub const API_URL: FieldSchema = FieldSchema {
    name: "api_url",
    env: "ICINGA2_API_URL",
    kind: FieldKind::String,
    required: true,
    default: None,
    description: "The address of the Icinga2 server.",
};

pub const API_USER: FieldSchema = FieldSchema {
    name: "api_user",
    env: "ICINGA2_API_USER",
    kind: FieldKind::String,
    required: true,
    default: None,
    description: "The user to authenticate to the Icinga2 Server as.",
};

pub const API_PASSWORD: FieldSchema = FieldSchema {
    name: "api_password",
    env: "ICINGA2_API_PASSWORD",
    kind: FieldKind::String,
    required: true,
    default: None,
    description: "The password for authenticating to the Icinga2 server.",
};

pub const INSECURE_SKIP_TLS_VERIFY: FieldSchema = FieldSchema {
    name: "insecure_skip_tls_verify",
    env: "ICINGA2_INSECURE_SKIP_TLS_VERIFY",
    kind: FieldKind::Bool,
    required: false,
    default: Some("false"),
    description: "Disable TLS verify when connecting to Icinga2 Server",
};

pub const RETRIES: FieldSchema = FieldSchema {
    name: "retries",
    env: "ICINGA2_RETRIES",
    kind: FieldKind::Int,
    required: false,
    default: Some("0"),
    description: "How many times to retry on low level errors and `503 Icinga is reloading`. Defaults to `0`.",
};

pub const RETRY_DELAY: FieldSchema = FieldSchema {
    name: "retry_delay",
    env: "ICINGA2_RETRY_DELAY",
    kind: FieldKind::String,
    required: false,
    default: Some("0"),
    description: "Delay between retry attempts. Valid values are durations expressed as `500ms`, etc. or a plain number which is treated as whole seconds.",
};

/// All provider fields, in declaration order.
pub const FIELDS: &[FieldSchema] = &[
    API_URL,
    API_USER,
    API_PASSWORD,
    INSECURE_SKIP_TLS_VERIFY,
    RETRIES,
    RETRY_DELAY,
];

pub fn field(name: &str) -> Option<&'static FieldSchema> {
    FIELDS.iter().find(|field| field.name == name)
}

pub fn description(name: &str) -> Option<&'static str> {
    field(name).map(|field| field.description)
}
