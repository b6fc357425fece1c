use serde_json::Value;

use crate::classify::Family;
use crate::client::CloudClient;
use crate::error::ClientError;
use crate::models::{
    NewRole, PermissionId, PermissionIds, PermissionListing, RoleId, RoleIds, RoleListing, UserId,
};
use crate::normalize::{ArrayField, Passthrough};
use crate::transport::{ApiRequest, Service, Transport};

impl<T: Transport> CloudClient<T> {
    pub async fn get_user_roles(
        &self,
        token: &str,
        user_id: UserId,
    ) -> Result<RoleListing, ClientError> {
        let request = ApiRequest::get(Service::Identity, format!("/api/v1/users/{}/roles", user_id))
            .bearer(token);
        let roles = self
            .exchange(request, Family::Resource("fetch user roles"), ArrayField("roles"))
            .await?;
        Ok(RoleListing { roles })
    }

    pub async fn get_all_roles(&self, token: &str) -> Result<RoleListing, ClientError> {
        let request = ApiRequest::get(Service::Identity, "/api/v1/roles").bearer(token);
        let roles = self
            .exchange(request, Family::Resource("fetch roles"), ArrayField("roles"))
            .await?;
        Ok(RoleListing { roles })
    }

    pub async fn create_role(
        &self,
        token: &str,
        role_name: &str,
        description: &str,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::post(Service::Identity, "/api/v1/role")
            .bearer(token)
            .json(&NewRole {
                role_name,
                description,
            })?;
        self.exchange(request, Family::Resource("create role"), Passthrough)
            .await
    }

    pub async fn delete_role(&self, token: &str, role_id: RoleId) -> Result<Value, ClientError> {
        let request = ApiRequest::delete(Service::Identity, format!("/api/v1/roles/{}", role_id))
            .bearer(token);
        self.exchange(request, Family::Resource("delete role"), Passthrough)
            .await
    }

    pub async fn assign_permissions_to_role(
        &self,
        token: &str,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::post(
            Service::Identity,
            format!("/api/v1/roles/{}/permissions", role_id),
        )
        .bearer(token)
        .json(&PermissionIds { permission_ids })?;
        self.exchange(request, Family::Resource("assign permissions to role"), Passthrough)
            .await
    }

    /// Permission names granted to a user through their roles. Callers other
    /// than the user themselves need `manage_roles`.
    pub async fn get_user_permissions(
        &self,
        token: &str,
        user_id: UserId,
    ) -> Result<PermissionListing, ClientError> {
        let request = ApiRequest::get(
            Service::Identity,
            format!("/api/v1/users/{}/permissions", user_id),
        )
        .bearer(token);
        let permissions = self
            .exchange(
                request,
                Family::Resource("fetch user permissions"),
                ArrayField("permissions"),
            )
            .await?;
        Ok(PermissionListing { permissions })
    }

    /// Permissions of whoever the token belongs to.
    pub async fn get_current_user_permissions(
        &self,
        token: &str,
    ) -> Result<PermissionListing, ClientError> {
        let request = ApiRequest::get(Service::Identity, "/api/v1/permissions").bearer(token);
        let permissions = self
            .exchange(request, Family::Resource("fetch permissions"), ArrayField("permissions"))
            .await?;
        Ok(PermissionListing { permissions })
    }

    pub async fn assign_roles_to_user(
        &self,
        token: &str,
        user_id: UserId,
        role_ids: &[RoleId],
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::post(
            Service::Identity,
            format!("/api/v1/users/{}/roles", user_id),
        )
        .bearer(token)
        .json(&RoleIds { role_ids })?;
        self.exchange(request, Family::Resource("assign roles to user"), Passthrough)
            .await
    }
}
