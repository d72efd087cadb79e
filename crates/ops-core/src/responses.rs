//! Envelope types returned by the backend around entities.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Membership, Submission};

/// `POST /auth/exchange` and `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

/// `GET /auth/url`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthUrlResponse {
    pub url: String,
}

/// `GET /organizations`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OrganizationsResponse {
    pub organizations: Vec<Membership>,
}

/// `GET /submissions?page=&per_page=`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsPage {
    pub submissions: Vec<Submission>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}
