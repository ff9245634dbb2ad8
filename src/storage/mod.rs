//! Azure Blob Storage upload path
//!
//! Reports are written with plain REST calls signed with the account's
//! Shared Key, so the only inputs are a connection string and a container
//! name.

pub mod auth;
pub mod client;
pub mod connection;

pub use auth::SharedKeyCredential;
pub use client::{BlobContainerClient, ReportStore, DOCX_CONTENT_TYPE};
pub use connection::StorageAccount;
