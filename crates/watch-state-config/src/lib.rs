pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{AccountConfig, CatalogConfig, Config};
pub use credentials::CredentialStore;
pub use paths::PathManager;
