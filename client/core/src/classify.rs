use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{DomainError, ErrorKind};

const GENERIC_VALIDATION_MESSAGE: &str = "password does not meet requirements";

/// Which status-to-kind table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Login,
    Signup,
    ChangePassword,
    /// Files, folders, groups, roles and admin reporting. The name shows up
    /// in `ErrorKind::OperationFailed`.
    Resource(&'static str),
}

pub fn classify(status: StatusCode, family: Family, body: &[u8]) -> DomainError {
    let kind = match family {
        Family::Login => match status {
            StatusCode::NOT_FOUND => ErrorKind::UserNotFound,
            StatusCode::UNAUTHORIZED => ErrorKind::InvalidCredentials,
            _ => ErrorKind::LoginFailed,
        },
        Family::Signup => match status {
            StatusCode::CONFLICT => ErrorKind::UserAlreadyExists,
            _ => ErrorKind::SignupFailed,
        },
        Family::ChangePassword => match status {
            StatusCode::UNAUTHORIZED => ErrorKind::IncorrectCurrentPassword,
            StatusCode::BAD_REQUEST => ErrorKind::ValidationFailed(
                error_message(body).unwrap_or_else(|| GENERIC_VALIDATION_MESSAGE.to_string()),
            ),
            _ => ErrorKind::PasswordChangeFailed,
        },
        Family::Resource(operation) => ErrorKind::OperationFailed(operation),
    };

    DomainError::new(kind, status)
}

/// The `error` field of a JSON error body, if there is a usable one.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(status: u16, family: Family, body: &str) -> ErrorKind {
        classify(StatusCode::from_u16(status).unwrap(), family, body.as_bytes()).kind
    }

    #[test]
    fn test_login_table() {
        assert_eq!(kind(404, Family::Login, ""), ErrorKind::UserNotFound);
        assert_eq!(kind(401, Family::Login, ""), ErrorKind::InvalidCredentials);
        assert_eq!(
            kind(400, Family::Login, r#"{"error":"Invalid input"}"#),
            ErrorKind::LoginFailed
        );
        assert_eq!(kind(500, Family::Login, "boom"), ErrorKind::LoginFailed);
        assert_eq!(kind(403, Family::Login, ""), ErrorKind::LoginFailed);
    }

    #[test]
    fn test_signup_table() {
        assert_eq!(kind(409, Family::Signup, ""), ErrorKind::UserAlreadyExists);
        assert_eq!(kind(400, Family::Signup, ""), ErrorKind::SignupFailed);
        assert_eq!(kind(404, Family::Signup, ""), ErrorKind::SignupFailed);
        assert_eq!(kind(500, Family::Signup, ""), ErrorKind::SignupFailed);
    }

    #[test]
    fn test_change_password_table() {
        assert_eq!(
            kind(401, Family::ChangePassword, ""),
            ErrorKind::IncorrectCurrentPassword
        );
        assert_eq!(
            kind(400, Family::ChangePassword, r#"{"error":"Password too short"}"#),
            ErrorKind::ValidationFailed("Password too short".into())
        );
        assert_eq!(kind(500, Family::ChangePassword, ""), ErrorKind::PasswordChangeFailed);
        assert_eq!(kind(404, Family::ChangePassword, ""), ErrorKind::PasswordChangeFailed);
    }

    #[test]
    fn test_validation_falls_back_to_generic_message() {
        let bodies = [
            "",
            "plain text",
            r#"{"message":"x"}"#,
            r#"{"error":42}"#,
            r#"{"error":"  "}"#,
        ];
        for body in bodies {
            assert_eq!(
                kind(400, Family::ChangePassword, body),
                ErrorKind::ValidationFailed(GENERIC_VALIDATION_MESSAGE.into()),
                "body {:?}",
                body
            );
        }
    }

    #[test]
    fn test_resource_fallback_ignores_status() {
        for status in [400, 401, 403, 404, 409, 500, 503] {
            let err = classify(
                StatusCode::from_u16(status).unwrap(),
                Family::Resource("delete group"),
                b"",
            );
            assert_eq!(err.kind, ErrorKind::OperationFailed("delete group"));
            assert_eq!(err.status.as_u16(), status);
        }
    }

    #[test]
    fn test_classify_is_deterministic() {
        let body = br#"{"error":"weak"}"#;
        let a = classify(StatusCode::BAD_REQUEST, Family::ChangePassword, body);
        let b = classify(StatusCode::BAD_REQUEST, Family::ChangePassword, body);
        assert_eq!(a, b);
    }
}
