use crate::classify::{classify, Family};
use crate::config::Endpoints;
use crate::error::ClientError;
use crate::normalize::Shape;
use crate::transport::{ApiRequest, HttpTransport, RawResponse, Transport};

/// Bodies longer than this are cut short in diagnostic logs.
const LOGGED_BODY_LIMIT: usize = 512;

/// Entry point for every operation against the identity and file services.
///
/// Holds no session state: the bearer token travels with each call.
#[derive(Debug, Clone)]
pub struct CloudClient<T = HttpTransport> {
    transport: T,
}

impl CloudClient<HttpTransport> {
    pub fn new(endpoints: Endpoints) -> Result<Self, ClientError> {
        Ok(Self::with_transport(HttpTransport::new(endpoints)?))
    }
}

impl<T: Transport> CloudClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request, then settle its outcome.
    pub(crate) async fn exchange<S: Shape>(
        &self,
        request: ApiRequest,
        family: Family,
        shape: S,
    ) -> Result<S::Output, ClientError> {
        tracing::debug!(
            service = %request.service,
            method = %request.method,
            path = %request.path,
            "issuing request"
        );
        let response = self.transport.send(request).await?;
        settle(response, family, &shape)
    }
}

/// Second stage of an exchange: normalize a success, classify anything else.
pub fn settle<S: Shape>(
    response: RawResponse,
    family: Family,
    shape: &S,
) -> Result<S::Output, ClientError> {
    if response.is_success() {
        return shape.normalize(response);
    }

    let err = classify(response.status(), family, response.body());
    let body = response.text();
    tracing::warn!(
        status = response.status().as_u16(),
        body = %truncated(&body),
        kind = ?err.kind,
        "request failed"
    );
    Err(err.into())
}

fn truncated(text: &str) -> &str {
    match text.char_indices().nth(LOGGED_BODY_LIMIT) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::normalize::{ArrayField, Passthrough};
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;

    fn raw(status: u16, body: &'static str) -> RawResponse {
        RawResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            body.as_bytes(),
        )
    }

    #[test]
    fn test_success_goes_through_normalizer() {
        let items = settle(
            raw(200, r#"{"groups":null}"#),
            Family::Resource("fetch groups"),
            &ArrayField("groups"),
        )
        .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_failure_goes_through_classifier() {
        let err = settle(
            raw(404, "Group not found"),
            Family::Resource("delete group"),
            &Passthrough,
        )
        .unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::OperationFailed("delete group")));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_failure_with_valid_json_is_still_failure() {
        let err = settle(
            raw(500, r#"{"files":[]}"#),
            Family::Resource("fetch file tree"),
            &ArrayField("files"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::OperationFailed("fetch file tree")));
    }

    #[test]
    fn test_redirect_status_is_not_success() {
        let err = settle(raw(304, ""), Family::Login, &Passthrough).unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::LoginFailed));
    }

    #[test]
    fn test_truncated_respects_char_boundaries() {
        let long = "é".repeat(LOGGED_BODY_LIMIT + 10);
        assert_eq!(truncated(&long).chars().count(), LOGGED_BODY_LIMIT);
        assert_eq!(truncated("short"), "short");
    }
}
