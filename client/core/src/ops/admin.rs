use serde_json::Value;

use crate::classify::Family;
use crate::client::CloudClient;
use crate::error::ClientError;
use crate::models::UserId;
use crate::normalize::Passthrough;
use crate::transport::{ApiRequest, Service, Transport};

impl<T: Transport> CloudClient<T> {
    /// Every user with their role names. Served by the identity service.
    pub async fn get_all_users(&self, token: &str) -> Result<Value, ClientError> {
        let request = ApiRequest::get(Service::Identity, "/api/v1/admin/users").bearer(token);
        self.exchange(request, Family::Resource("fetch all users"), Passthrough)
            .await
    }

    pub async fn get_system_stats(&self, token: &str) -> Result<Value, ClientError> {
        let request = ApiRequest::get(Service::Files, "/api/v1/admin/stats").bearer(token);
        self.exchange(request, Family::Resource("fetch system stats"), Passthrough)
            .await
    }

    pub async fn get_user_content(
        &self,
        token: &str,
        user_id: UserId,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::get(
            Service::Files,
            format!("/api/v1/admin/users/{}/content", user_id),
        )
        .bearer(token);
        self.exchange(request, Family::Resource("fetch user content"), Passthrough)
            .await
    }

    pub async fn get_all_files_admin(&self, token: &str) -> Result<Value, ClientError> {
        let request = ApiRequest::get(Service::Files, "/api/v1/admin/files").bearer(token);
        self.exchange(request, Family::Resource("fetch all files"), Passthrough)
            .await
    }

    pub async fn get_all_folders_admin(&self, token: &str) -> Result<Value, ClientError> {
        let request = ApiRequest::get(Service::Files, "/api/v1/admin/folders").bearer(token);
        self.exchange(request, Family::Resource("fetch all folders"), Passthrough)
            .await
    }
}
