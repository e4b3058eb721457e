pub mod auth;
pub mod error;
pub mod list;
pub mod tmdb;
pub mod traits;

pub use auth::{AuthClient, AuthSession};
pub use error::RemoteError;
pub use list::SavedListClient;
pub use tmdb::TmdbClient;
pub use traits::{CatalogApi, RemoteListApi};
