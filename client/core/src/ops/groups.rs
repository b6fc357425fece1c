use serde_json::Value;

use crate::classify::Family;
use crate::client::CloudClient;
use crate::error::ClientError;
use crate::models::{GroupId, GroupListing, NewGroup, RenameGroup, UserId};
use crate::normalize::{ArrayField, Passthrough};
use crate::transport::{ApiRequest, Service, Transport};

impl<T: Transport> CloudClient<T> {
    pub async fn get_all_groups(&self, token: &str) -> Result<GroupListing, ClientError> {
        let request = ApiRequest::get(Service::Identity, "/api/v1/groups").bearer(token);
        let groups = self
            .exchange(request, Family::Resource("fetch groups"), ArrayField("groups"))
            .await?;
        Ok(GroupListing { groups })
    }

    pub async fn get_user_groups(
        &self,
        token: &str,
        user_id: UserId,
    ) -> Result<GroupListing, ClientError> {
        let request = ApiRequest::get(
            Service::Identity,
            format!("/api/v1/users/{}/groups", user_id),
        )
        .bearer(token);
        let groups = self
            .exchange(request, Family::Resource("fetch user groups"), ArrayField("groups"))
            .await?;
        Ok(GroupListing { groups })
    }

    pub async fn create_group(&self, token: &str, group_name: &str) -> Result<Value, ClientError> {
        let request = ApiRequest::post(Service::Identity, "/api/v1/groups")
            .bearer(token)
            .json(&NewGroup { group_name })?;
        self.exchange(request, Family::Resource("create group"), Passthrough)
            .await
    }

    pub async fn rename_group(
        &self,
        token: &str,
        group_id: GroupId,
        new_name: &str,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::put(Service::Identity, format!("/api/v1/groups/{}", group_id))
            .bearer(token)
            .json(&RenameGroup { new_name })?;
        self.exchange(request, Family::Resource("rename group"), Passthrough)
            .await
    }

    pub async fn delete_group(&self, token: &str, group_id: GroupId) -> Result<Value, ClientError> {
        let request = ApiRequest::delete(Service::Identity, format!("/api/v1/groups/{}", group_id))
            .bearer(token);
        self.exchange(request, Family::Resource("delete group"), Passthrough)
            .await
    }

    pub async fn add_user_to_group(
        &self,
        token: &str,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::post(
            Service::Identity,
            format!("/api/v1/groups/{}/add/{}", group_id, user_id),
        )
        .bearer(token);
        self.exchange(request, Family::Resource("add user to group"), Passthrough)
            .await
    }

    pub async fn remove_user_from_group(
        &self,
        token: &str,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::delete(
            Service::Identity,
            format!("/api/v1/groups/{}/remove/{}", group_id, user_id),
        )
        .bearer(token);
        self.exchange(request, Family::Resource("remove user from group"), Passthrough)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::testing::{client, json_body, MockTransport};
    use crate::transport::{RequestBody, Service};
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_groups_normalizes() {
        let api = client(
            MockTransport::default()
                .respond_json(200, json!({ "groups": [{ "group_id": 1, "group_name": "staff" }] }))
                .respond_json(200, json!({ "groups": "broken" })),
        );
        let listing = api.get_all_groups("tok").await.unwrap();
        assert_eq!(listing.groups.len(), 1);
        assert_eq!(listing.groups[0]["group_name"], "staff");

        let listing = api.get_all_groups("tok").await.unwrap();
        assert!(listing.groups.is_empty());

        let sent = api.transport().last_request();
        assert_eq!(sent.service, Service::Identity);
        assert_eq!(sent.path, "/api/v1/groups");
    }

    #[tokio::test]
    async fn test_user_groups_path() {
        let api = client(MockTransport::default().respond_json(200, json!({ "groups": [] })));
        api.get_user_groups("tok", 17).await.unwrap();
        assert_eq!(api.transport().last_request().path, "/api/v1/users/17/groups");
    }

    #[tokio::test]
    async fn test_create_and_rename_bodies() {
        let api = client(
            MockTransport::default()
                .respond_json(200, json!({ "message": "Group created successfully" }))
                .respond_json(200, json!({ "message": "Group renamed successfully" })),
        );
        let created = api.create_group("tok", "staff").await.unwrap();
        assert_eq!(created["message"], "Group created successfully");
        api.rename_group("tok", 3, "crew").await.unwrap();

        let sent = api.transport().requests();
        assert_eq!(json_body(&sent[0]), json!({ "group_name": "staff" }));
        assert_eq!(sent[1].method, Method::PUT);
        assert_eq!(sent[1].path, "/api/v1/groups/3");
        assert_eq!(json_body(&sent[1]), json!({ "new_name": "crew" }));
    }

    #[tokio::test]
    async fn test_delete_missing_group_is_uniform_failure() {
        let api = client(MockTransport::default().respond(404, "Group not found"));
        let err = api.delete_group("tok", 99).await.unwrap_err();

        assert_eq!(err.kind(), Some(&ErrorKind::OperationFailed("delete group")));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(api.transport().last_request().path, "/api/v1/groups/99");
    }

    #[tokio::test]
    async fn test_rename_conflict_is_uniform_failure() {
        let api = client(MockTransport::default().respond(409, "name taken"));
        let err = api.rename_group("tok", 1, "dup").await.unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::OperationFailed("rename group")));
    }

    #[tokio::test]
    async fn test_membership_paths() {
        let api = client(
            MockTransport::default()
                .respond_json(200, json!({ "message": "User added to group successfully" }))
                .respond_json(200, json!({ "message": "User removed from group successfully" })),
        );
        api.add_user_to_group("tok", 5, 2).await.unwrap();
        api.remove_user_from_group("tok", 5, 2).await.unwrap();

        let sent = api.transport().requests();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].path, "/api/v1/groups/2/add/5");
        assert!(matches!(sent[0].body, RequestBody::Empty));
        assert_eq!(sent[1].method, Method::DELETE);
        assert_eq!(sent[1].path, "/api/v1/groups/2/remove/5");
    }
}
