use ops_core::entities::{Membership, select_current};
use ops_core::responses::OrganizationsResponse;
use ops_schema::names;

use crate::client::ApiClient;
use crate::decode::{Shape, decode};
use crate::error::ApiError;

const ORGANIZATIONS_SHAPE: Shape = Shape {
    schema: names::ORGANIZATIONS,
    expected: "missing or invalid organizations data",
};

impl ApiClient {
    /// Organizations the signed-in user belongs to.
    ///
    /// # Errors
    ///
    /// Returns the request failure or `ApiError::InvalidResponse`.
    pub async fn list_organizations(&self) -> Result<Vec<Membership>, ApiError> {
        let value = self.get("/organizations").await?;
        let body: OrganizationsResponse = decode(value, ORGANIZATIONS_SHAPE)?;
        Ok(body.organizations)
    }

    /// Active organization: the stored scope if it is still a membership,
    /// otherwise the first membership.
    ///
    /// # Errors
    ///
    /// See [`Self::list_organizations`].
    pub async fn current_organization(&self) -> Result<Option<Membership>, ApiError> {
        let memberships = self.list_organizations().await?;
        let stored = self.session().snapshot().scope;
        Ok(select_current(&memberships, stored.as_deref()).cloned())
    }

    /// Make `id` the organization scope for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::UnknownOrganization` if `id` is not a membership,
    /// plus the failures of [`Self::list_organizations`].
    pub async fn switch_organization(&self, id: &str) -> Result<Membership, ApiError> {
        let memberships = self.list_organizations().await?;
        let membership = memberships
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| ApiError::UnknownOrganization(id.to_string()))?;
        self.session().set_scope(&membership.id)?;
        tracing::info!(organization = %membership.id, "organization scope switched");
        Ok(membership)
    }

    /// Drop the stored scope; requests go out with an empty scope header.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Session` if the stored scope cannot be removed.
    pub fn reset_organization(&self) -> Result<(), ApiError> {
        self.session().clear_scope()?;
        Ok(())
    }
}
