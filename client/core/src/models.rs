use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::ClientError;

pub type FileId = i64;
pub type FolderId = i64;
pub type GroupId = i64;
pub type UserId = i64;
pub type RoleId = i64;
pub type PermissionId = i64;

/// The folder with no real parent.
pub const ROOT_FOLDER: FolderId = 0;

// --- Identity payloads ---

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
pub(crate) struct PasswordChange<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

// --- File service payloads ---

#[derive(Serialize)]
pub(crate) struct NewFolder<'a> {
    pub folder_name: &'a str,
    pub parent_folder_id: FolderId,
}

#[derive(Serialize)]
pub(crate) struct MoveFile {
    pub file_id: FileId,
    pub target_folder_id: FolderId,
}

#[derive(Serialize)]
pub(crate) struct MoveFiles<'a> {
    pub file_ids: &'a [FileId],
    pub target_folder_id: FolderId,
}

#[derive(Serialize)]
pub(crate) struct FileIds<'a> {
    pub file_ids: &'a [FileId],
}

#[derive(Serialize)]
pub(crate) struct FileFavorite {
    pub file_id: FileId,
    pub is_favorite: bool,
}

#[derive(Serialize)]
pub(crate) struct FolderFavorite {
    pub folder_id: FolderId,
    pub is_favorite: bool,
}

// --- Group and role payloads ---

#[derive(Serialize)]
pub(crate) struct NewGroup<'a> {
    pub group_name: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RenameGroup<'a> {
    pub new_name: &'a str,
}

#[derive(Serialize)]
pub(crate) struct NewRole<'a> {
    pub role_name: &'a str,
    pub description: &'a str,
}

#[derive(Serialize)]
pub(crate) struct PermissionIds<'a> {
    pub permission_ids: &'a [PermissionId],
}

#[derive(Serialize)]
pub(crate) struct RoleIds<'a> {
    pub role_ids: &'a [RoleId],
}

// --- Normalized listings ---
//
// Entities stay opaque JSON; only the enclosing list is guaranteed.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileListing {
    pub files: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderListing {
    pub folders: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupListing {
    pub groups: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleListing {
    pub roles: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionListing {
    pub permissions: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Favorites {
    pub files: Vec<Value>,
    pub folders: Vec<Value>,
}

// --- Upload ---

/// A file to be sent as the single `file` field of a multipart body.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content: Bytes,
    pub mime: Option<String>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a local file, guessing its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let mime = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string());

        Ok(Self {
            file_name,
            content: Bytes::from(content),
            mime,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("alice@example.com", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("alice@example.com"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_payloads_use_snake_case_fields() {
        let body = serde_json::to_value(MoveFiles {
            file_ids: &[1, 2],
            target_folder_id: 7,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "file_ids": [1, 2], "target_folder_id": 7 }));

        let body = serde_json::to_value(NewFolder {
            folder_name: "docs",
            parent_folder_id: ROOT_FOLDER,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "folder_name": "docs", "parent_folder_id": 0 }));
    }

    #[tokio::test]
    async fn test_upload_from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let upload = Upload::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, "notes.txt");
        assert_eq!(upload.content, Bytes::from_static(b"hello"));
        assert_eq!(upload.mime.as_deref(), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_upload_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Upload::from_path(dir.path().join("missing.bin")).await.unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
        assert!(err.kind().is_none());
    }
}
