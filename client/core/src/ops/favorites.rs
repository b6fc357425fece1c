use serde_json::Value;

use crate::classify::Family;
use crate::client::CloudClient;
use crate::error::ClientError;
use crate::models::{
    Favorites, FileFavorite, FileId, FileListing, FolderFavorite, FolderId, FolderListing,
};
use crate::normalize::{take_array, ArrayField, Passthrough, Shape};
use crate::transport::{ApiRequest, RawResponse, Service, Transport};

/// `{files, folders}` with both lists guaranteed.
struct FavoritesShape;

impl Shape for FavoritesShape {
    type Output = Favorites;

    fn normalize(&self, response: RawResponse) -> Result<Favorites, ClientError> {
        let mut body = Passthrough.normalize(response)?;
        Ok(Favorites {
            files: take_array(&mut body, "files"),
            folders: take_array(&mut body, "folders"),
        })
    }
}

impl<T: Transport> CloudClient<T> {
    pub async fn set_file_favorite(
        &self,
        token: &str,
        file_id: FileId,
        is_favorite: bool,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::put(Service::Files, "/api/v1/favorites/file")
            .bearer(token)
            .json(&FileFavorite {
                file_id,
                is_favorite,
            })?;
        self.exchange(request, Family::Resource("update file favorite"), Passthrough)
            .await
    }

    pub async fn set_folder_favorite(
        &self,
        token: &str,
        folder_id: FolderId,
        is_favorite: bool,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::put(Service::Files, "/api/v1/favorites/folder")
            .bearer(token)
            .json(&FolderFavorite {
                folder_id,
                is_favorite,
            })?;
        self.exchange(request, Family::Resource("update folder favorite"), Passthrough)
            .await
    }

    pub async fn get_favorite_files(&self, token: &str) -> Result<FileListing, ClientError> {
        let request = ApiRequest::get(Service::Files, "/api/v1/favorites/files").bearer(token);
        let files = self
            .exchange(request, Family::Resource("fetch favorite files"), ArrayField("files"))
            .await?;
        Ok(FileListing { files })
    }

    pub async fn get_favorite_folders(&self, token: &str) -> Result<FolderListing, ClientError> {
        let request = ApiRequest::get(Service::Files, "/api/v1/favorites/folders").bearer(token);
        let folders = self
            .exchange(request, Family::Resource("fetch favorite folders"), ArrayField("folders"))
            .await?;
        Ok(FolderListing { folders })
    }

    pub async fn get_all_favorites(&self, token: &str) -> Result<Favorites, ClientError> {
        let request = ApiRequest::get(Service::Files, "/api/v1/favorites").bearer(token);
        self.exchange(request, Family::Resource("fetch favorites"), FavoritesShape)
            .await
    }
}
