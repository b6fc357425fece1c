use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::client::CloudClient;
use crate::error::ClientError;
use crate::transport::{ApiRequest, RawResponse, RequestBody, Transport};

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn respond(self, status: u16, body: impl Into<bytes::Bytes>) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.responses
            .lock()
            .unwrap()
            .push_back(RawResponse::new(status, HeaderMap::new(), body));
        self
    }

    pub fn respond_json(self, status: u16, body: Value) -> Self {
        self.respond(status, body.to_string())
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no canned response left");
        Ok(response)
    }
}

pub fn client(transport: MockTransport) -> CloudClient<MockTransport> {
    CloudClient::with_transport(transport)
}

pub fn json_body(request: &ApiRequest) -> Value {
    match &request.body {
        RequestBody::Json(value) => value.clone(),
        other => panic!("expected a JSON body, got {:?}", other),
    }
}

pub fn query_value<'a>(request: &'a ApiRequest, key: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
}
