use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single question rendered by the embeddable form widget.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FormQuestion {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Contact field toggle (e.g. `email`, `phone`) collected alongside answers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ContactField {
    pub required: bool,
    pub label: String,
}

/// Form definition as authored in the editor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<FormQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_fields: Option<BTreeMap<String, ContactField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_description: Option<String>,
}

/// A stored form, owned by a supplier organization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub supplier_id: String,
    pub form_key: String,
    pub version: u32,
    pub schema: FormSchema,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of `POST /forms`. The backend stores `schema` as text, so it is sent
/// JSON-stringified.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    pub supplier_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_key: Option<String>,
    #[serde(serialize_with = "stringified")]
    pub schema: FormSchema,
}

/// Body of `PUT /forms/:id`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FormUpdate {
    #[serde(serialize_with = "stringified")]
    pub schema: FormSchema,
}

fn stringified<S>(schema: &FormSchema, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let text = serde_json::to_string(schema).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}
