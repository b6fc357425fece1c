use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::config::Endpoints;
use crate::error::ClientError;
use crate::models::Upload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Identity,
    Files,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Identity => f.write_str("identity"),
            Service::Files => f.write_str("files"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Upload),
}

#[derive(Clone)]
pub struct ApiRequest {
    pub service: Service,
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub token: Option<String>,
    pub body: RequestBody,
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("service", &self.service)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("body", &self.body)
            .finish()
    }
}

impl ApiRequest {
    pub fn new(service: Service, method: Method, path: impl Into<String>) -> Self {
        Self {
            service,
            method,
            path: path.into(),
            query: Vec::new(),
            token: None,
            body: RequestBody::Empty,
        }
    }

    pub fn get(service: Service, path: impl Into<String>) -> Self {
        Self::new(service, Method::GET, path)
    }

    pub fn post(service: Service, path: impl Into<String>) -> Self {
        Self::new(service, Method::POST, path)
    }

    pub fn put(service: Service, path: impl Into<String>) -> Self {
        Self::new(service, Method::PUT, path)
    }

    pub fn delete(service: Service, path: impl Into<String>) -> Self {
        Self::new(service, Method::DELETE, path)
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, upload: Upload) -> Self {
        self.body = RequestBody::Multipart(upload);
        self
    }
}

/// Status, headers and the undecoded body of one exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// True when the body is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.body.iter().all(|b| b.is_ascii_whitespace())
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn into_bytes(self) -> Bytes {
        self.body
    }
}

/// Issues exactly one HTTP request and hands back the raw outcome. A 500 is
/// as much a `RawResponse` as a 200. No retries and no timeouts.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpTransport {
    pub fn new(endpoints: Endpoints) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cloudbox/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.endpoints.base_url(request.service), request.path)
    }

    /// Translate an `ApiRequest` into a ready-to-send reqwest request.
    ///
    /// Content-Type is only set for JSON bodies; multipart bodies carry their
    /// own boundary. Authorization is only set when a token is present.
    pub fn build_request(&self, request: &ApiRequest) -> Result<reqwest::Request, ClientError> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url_for(request));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(value)?),
            RequestBody::Multipart(upload) => builder.multipart(upload_form(upload)?),
        };

        Ok(builder.build()?)
    }
}

fn upload_form(upload: &Upload) -> Result<Form, ClientError> {
    let mut part = Part::stream(upload.content.clone()).file_name(upload.file_name.clone());
    if let Some(mime) = &upload.mime {
        part = part.mime_str(mime)?;
    }
    Ok(Form::new().part("file", part))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let http_request = self.build_request(&request)?;
        let response = self.client.execute(http_request).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(RawResponse::new(status, headers, body))
    }
}
