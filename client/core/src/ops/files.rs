use bytes::Bytes;
use serde_json::Value;

use crate::classify::Family;
use crate::client::CloudClient;
use crate::error::ClientError;
use crate::models::{
    FileId, FileIds, FileListing, FolderId, FolderListing, MoveFile, MoveFiles, NewFolder, Upload,
    ROOT_FOLDER,
};
use crate::normalize::{ArrayField, Binary, Discard, Passthrough};
use crate::transport::{ApiRequest, Service, Transport};

impl<T: Transport> CloudClient<T> {
    /// Files directly inside `folder_id`; `None` means the root folder.
    pub async fn get_file_tree(
        &self,
        token: &str,
        folder_id: Option<FolderId>,
    ) -> Result<FileListing, ClientError> {
        let request = ApiRequest::get(Service::Files, "/api/v1/files")
            .query("folder_id", folder_id.unwrap_or(ROOT_FOLDER))
            .bearer(token);
        let files = self
            .exchange(request, Family::Resource("fetch file tree"), ArrayField("files"))
            .await?;
        Ok(FileListing { files })
    }

    /// Sub-folders of `parent_folder_id`; `None` means the root folder.
    pub async fn get_folders(
        &self,
        token: &str,
        parent_folder_id: Option<FolderId>,
    ) -> Result<FolderListing, ClientError> {
        let request = ApiRequest::get(Service::Files, "/api/v1/folders")
            .query("parent_folder_id", parent_folder_id.unwrap_or(ROOT_FOLDER))
            .bearer(token);
        let folders = self
            .exchange(request, Family::Resource("fetch folders"), ArrayField("folders"))
            .await?;
        Ok(FolderListing { folders })
    }

    pub async fn upload_file(
        &self,
        token: &str,
        folder_id: FolderId,
        upload: Upload,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::post(Service::Files, "/api/v1/files")
            .query("folder_id", folder_id)
            .bearer(token)
            .multipart(upload);
        self.exchange(request, Family::Resource("upload file"), Passthrough)
            .await
    }

    pub async fn move_file(
        &self,
        token: &str,
        file_id: FileId,
        target_folder_id: FolderId,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::put(Service::Files, "/api/v1/file/move")
            .bearer(token)
            .json(&MoveFile {
                file_id,
                target_folder_id,
            })?;
        self.exchange(request, Family::Resource("move file"), Passthrough)
            .await
    }

    /// Move several files at once. An empty list is sent as-is; the server
    /// decides what that means.
    pub async fn move_files(
        &self,
        token: &str,
        file_ids: &[FileId],
        target_folder_id: FolderId,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::put(Service::Files, "/api/v1/files/move")
            .bearer(token)
            .json(&MoveFiles {
                file_ids,
                target_folder_id,
            })?;
        self.exchange(request, Family::Resource("move files"), Passthrough)
            .await
    }

    pub async fn delete_files(&self, token: &str, file_ids: &[FileId]) -> Result<(), ClientError> {
        let request = ApiRequest::delete(Service::Files, "/api/v1/files")
            .bearer(token)
            .json(&FileIds { file_ids })?;
        self.exchange(request, Family::Resource("delete files"), Discard)
            .await
    }

    pub async fn download_file(&self, token: &str, file_id: FileId) -> Result<Bytes, ClientError> {
        let request = ApiRequest::get(Service::Files, "/api/v1/file")
            .query("file_id", file_id)
            .bearer(token);
        self.exchange(request, Family::Resource("download file"), Binary)
            .await
    }

    pub async fn create_folder(
        &self,
        token: &str,
        folder_name: &str,
        parent_folder_id: Option<FolderId>,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::post(Service::Files, "/api/v1/folders")
            .bearer(token)
            .json(&NewFolder {
                folder_name,
                parent_folder_id: parent_folder_id.unwrap_or(ROOT_FOLDER),
            })?;
        self.exchange(request, Family::Resource("create folder"), Passthrough)
            .await
    }

    pub async fn delete_folder(&self, token: &str, folder_id: FolderId) -> Result<(), ClientError> {
        let request = ApiRequest::delete(Service::Files, format!("/api/v1/folders/{}", folder_id))
            .bearer(token);
        self.exchange(request, Family::Resource("delete folder"), Discard)
            .await
    }
}
