use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection refused, DNS failure, broken body stream. Never classified.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// A successful response whose body was not the JSON we expected.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// The classified kind, if the server answered with a failure status.
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            ClientError::Domain(err) => Some(&err.kind),
            _ => None,
        }
    }

    /// The raw HTTP status of a classified failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Domain(err) => Some(err.status),
            _ => None,
        }
    }
}

/// A classified non-2xx outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct DomainError {
    pub kind: ErrorKind,
    pub status: StatusCode,
}

impl DomainError {
    pub fn new(kind: ErrorKind, status: StatusCode) -> Self {
        Self { kind, status }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("user not found")]
    UserNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("login failed")]
    LoginFailed,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("signup failed")]
    SignupFailed,
    #[error("current password is incorrect")]
    IncorrectCurrentPassword,
    #[error("{0}")]
    ValidationFailed(String),
    #[error("password change failed")]
    PasswordChangeFailed,
    #[error("failed to {0}")]
    OperationFailed(&'static str),
}
