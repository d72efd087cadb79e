//! Central schema registry for every backend response shape.
//!
//! Schemas are built from `ops-core` types with [`schemars::schema_for!`] and
//! compiled once into `jsonschema` validators.

use std::collections::HashMap;
use std::sync::LazyLock;

use jsonschema::Validator;
use schemars::schema_for;

use crate::error::SchemaError;

/// Registered schema names.
pub mod names {
    pub const TOKEN: &str = "token_response";
    pub const AUTH_URL: &str = "auth_url_response";
    pub const USER_PROFILE: &str = "user_profile";
    pub const ORGANIZATIONS: &str = "organizations_response";
    pub const FORM: &str = "form";
    pub const FORM_LIST: &str = "form_list";
    pub const SUBMISSIONS_PAGE: &str = "submissions_page";
}

struct Entry {
    schema: serde_json::Value,
    validator: Validator,
}

/// Compiled JSON Schemas for all response types, keyed by name.
pub struct SchemaRegistry {
    entries: HashMap<&'static str, Entry>,
}

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::new);

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value` and compiling it. Panics if either step fails, which
/// only happens for a broken derive.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {{
        let schema = serde_json::to_value(schema_for!($ty)).unwrap();
        let validator = jsonschema::validator_for(&schema).unwrap();
        $map.insert($name, Entry { schema, validator });
    }};
}

impl SchemaRegistry {
    /// Build a registry containing every response schema from `ops-core`.
    ///
    /// # Panics
    ///
    /// Panics if a `schemars`-generated schema fails to serialize or compile.
    /// Neither is expected for derived schemas.
    #[must_use]
    pub fn new() -> Self {
        use ops_core::entities::{Form, UserProfile};
        use ops_core::responses::{
            AuthUrlResponse, OrganizationsResponse, SubmissionsPage, TokenResponse,
        };

        let mut entries = HashMap::new();

        register!(entries, names::TOKEN, TokenResponse);
        register!(entries, names::AUTH_URL, AuthUrlResponse);
        register!(entries, names::USER_PROFILE, UserProfile);
        register!(entries, names::ORGANIZATIONS, OrganizationsResponse);
        register!(entries, names::FORM, Form);
        register!(entries, names::FORM_LIST, Vec<Form>);
        register!(entries, names::SUBMISSIONS_PAGE, SubmissionsPage);

        Self { entries }
    }

    /// Process-wide registry, built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.entries.get(name).map(|entry| &entry.schema)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let errors: Vec<String> = entry
            .validator
            .iter_errors(instance)
            .map(|e| {
                let pointer = e.instance_path.to_string();
                let at = if pointer.is_empty() { "/" } else { &pointer };
                format!("{at}: {e}")
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
