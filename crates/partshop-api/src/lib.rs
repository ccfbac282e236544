// partshop-api: Async Rust client for the partshop storefront backend

pub mod account;
pub mod admin;
pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;
pub mod upload;

pub use admin::PageRequest;
pub use auth::LoginStrategy;
pub use client::{ApiClient, RequestBody, RequestOptions};
pub use error::{Error, FieldErrors};
pub use session::Session;
pub use transport::{TlsMode, TransportConfig};
pub use upload::Upload;
