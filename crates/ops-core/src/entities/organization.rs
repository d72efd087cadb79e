use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of organization a user can be a member of.
///
/// Kinds this client does not know yet decode as `Unknown`, so one new kind
/// does not hide the user's other memberships.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationKind {
    Supplier,
    Brand,
    #[serde(other)]
    Unknown,
}

/// A user's membership in a supplier or brand organization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: String,
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub kind: OrganizationKind,
    pub display_name: String,
    pub role: String,
}

/// Resolve the active organization from the stored scope id.
///
/// The stored id wins when it matches a membership; otherwise the first
/// membership is used. Returns `None` only when there are no memberships.
#[must_use]
pub fn select_current<'a>(
    memberships: &'a [Membership],
    stored: Option<&str>,
) -> Option<&'a Membership> {
    stored
        .and_then(|id| memberships.iter().find(|m| m.id == id))
        .or_else(|| memberships.first())
}
