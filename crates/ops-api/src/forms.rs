use ops_core::entities::{Form, FormDraft, FormUpdate};
use ops_schema::names;

use crate::client::ApiClient;
use crate::decode::{Shape, decode};
use crate::error::ApiError;

const FORM_LIST_SHAPE: Shape = Shape {
    schema: names::FORM_LIST,
    expected: "expected array of forms",
};

const FORM_SHAPE: Shape = Shape {
    schema: names::FORM,
    expected: "expected form object",
};

fn form_endpoint(id: &str) -> String {
    format!("/forms/{}", urlencoding::encode(id))
}

impl ApiClient {
    /// Forms owned by the active organization.
    ///
    /// # Errors
    ///
    /// Returns the request failure or `ApiError::InvalidResponse` unless the
    /// body is an array of forms.
    pub async fn list_forms(&self) -> Result<Vec<Form>, ApiError> {
        let value = self.get("/forms").await?;
        decode(value, FORM_LIST_SHAPE)
    }

    /// # Errors
    ///
    /// Returns the request failure or `ApiError::InvalidResponse`.
    pub async fn get_form(&self, id: &str) -> Result<Form, ApiError> {
        let value = self.get(&form_endpoint(id)).await?;
        decode(value, FORM_SHAPE)
    }

    /// # Errors
    ///
    /// Returns the request failure or `ApiError::InvalidResponse`.
    pub async fn create_form(&self, draft: &FormDraft) -> Result<Form, ApiError> {
        let value = self.post("/forms", draft).await?;
        let form: Form = decode(value, FORM_SHAPE)?;
        tracing::info!(form_id = %form.id, "form created");
        Ok(form)
    }

    /// # Errors
    ///
    /// Returns the request failure or `ApiError::InvalidResponse`.
    pub async fn update_form(&self, id: &str, update: &FormUpdate) -> Result<Form, ApiError> {
        let value = self.put(&form_endpoint(id), update).await?;
        let form: Form = decode(value, FORM_SHAPE)?;
        tracing::info!(form_id = %form.id, version = form.version, "form updated");
        Ok(form)
    }
}
