use serde_json::Value;

use crate::classify::Family;
use crate::client::CloudClient;
use crate::error::ClientError;
use crate::models::{Credentials, PasswordChange};
use crate::normalize::Passthrough;
use crate::transport::{ApiRequest, Service, Transport};

impl<T: Transport> CloudClient<T> {
    /// Exchange credentials for a session token. Sent without Authorization.
    pub async fn login(&self, credentials: &Credentials) -> Result<Value, ClientError> {
        let request = ApiRequest::post(Service::Identity, "/api/v1/login").json(credentials)?;
        self.exchange(request, Family::Login, Passthrough).await
    }

    pub async fn signup(&self, credentials: &Credentials) -> Result<Value, ClientError> {
        let request = ApiRequest::post(Service::Identity, "/api/v1/signup").json(credentials)?;
        self.exchange(request, Family::Signup, Passthrough).await
    }

    pub async fn change_password(
        &self,
        token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::post(Service::Identity, "/api/v1/change-password")
            .bearer(token)
            .json(&PasswordChange {
                current_password,
                new_password,
            })?;
        self.exchange(request, Family::ChangePassword, Passthrough).await
    }
}
