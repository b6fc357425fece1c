//! Client for the Cloudbox identity and file services
//!
//! Every operation is one request/response exchange in two stages: the
//! transport sends the request and returns the raw outcome, then `settle`
//! either normalizes a 2xx body into the promised shape or classifies the
//! failure into an [`ErrorKind`].
//!
//! ```no_run
//! use cloudbox_core::{CloudClient, Credentials, Endpoints};
//!
//! # async fn run() -> Result<(), cloudbox_core::ClientError> {
//! let client = CloudClient::new(Endpoints::default())?;
//! let login = client.login(&Credentials::new("alice@example.com", "secret")).await?;
//! let token = login["token"].as_str().unwrap_or_default();
//! let listing = client.get_file_tree(token, None).await?;
//! println!("{} files in root", listing.files.len());
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod session;
pub mod transport;

mod ops;

#[cfg(test)]
mod testing;

pub use classify::{classify, Family};
pub use client::{settle, CloudClient};
pub use config::{Config, ConfigError, Endpoints};
pub use error::{ClientError, DomainError, ErrorKind};
pub use models::{
    Credentials, Favorites, FileId, FileListing, FolderId, FolderListing, GroupId, GroupListing,
    PermissionId, PermissionListing, RoleId, RoleListing, Upload, UserId, ROOT_FOLDER,
};
pub use session::{Language, Preferences, Session, SessionStore, Theme};
pub use transport::{ApiRequest, HttpTransport, RawResponse, RequestBody, Service, Transport};
