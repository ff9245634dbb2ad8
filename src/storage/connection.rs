//! Azure Storage connection string parsing

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Storage account details taken from a connection string
#[derive(Clone, PartialEq, Eq)]
pub struct StorageAccount {
    pub account_name: String,
    /// Decoded account key
    pub account_key: Vec<u8>,
    pub protocol: String,
    pub endpoint_suffix: String,
    /// Explicit `BlobEndpoint`, used by emulators and private endpoints
    pub blob_endpoint: Option<String>,
}

impl StorageAccount {
    /// Parse `Key=Value;Key=Value` pairs.
    ///
    /// `AccountName` and `AccountKey` are required; the key must be base64.
    pub fn from_connection_string(conn: &str) -> Result<Self> {
        let mut account_name = None;
        let mut account_key = None;
        let mut protocol = None;
        let mut endpoint_suffix = None;
        let mut blob_endpoint = None;

        for part in conn.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                Error::ConfigError(format!("Malformed connection string segment '{}'", redact(part)))
            })?;

            match key.to_ascii_lowercase().as_str() {
                "accountname" => account_name = Some(value.to_string()),
                "accountkey" => account_key = Some(value.to_string()),
                "defaultendpointsprotocol" => protocol = Some(value.to_string()),
                "endpointsuffix" => endpoint_suffix = Some(value.to_string()),
                "blobendpoint" => blob_endpoint = Some(value.trim_end_matches('/').to_string()),
                // Queue/Table/File endpoints and the like are irrelevant here
                _ => {}
            }
        }

        let account_name = account_name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::ConfigError("Connection string has no AccountName".to_string()))?;
        let encoded_key = account_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::ConfigError("Connection string has no AccountKey".to_string()))?;
        let account_key = STANDARD
            .decode(encoded_key.as_bytes())
            .map_err(|e| Error::ConfigError(format!("AccountKey is not valid base64: {}", e)))?;

        Ok(Self {
            account_name,
            account_key,
            protocol: protocol.unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            endpoint_suffix: endpoint_suffix.unwrap_or_else(|| DEFAULT_ENDPOINT_SUFFIX.to_string()),
            blob_endpoint,
        })
    }

    /// Base URL of the blob service
    pub fn blob_endpoint(&self) -> String {
        match &self.blob_endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!(
                "{}://{}.blob.{}",
                self.protocol, self.account_name, self.endpoint_suffix
            ),
        }
    }
}

impl FromStr for StorageAccount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_connection_string(s)
    }
}

impl fmt::Debug for StorageAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageAccount")
            .field("account_name", &self.account_name)
            .field("account_key", &"<redacted>")
            .field("protocol", &self.protocol)
            .field("endpoint_suffix", &self.endpoint_suffix)
            .field("blob_endpoint", &self.blob_endpoint)
            .finish()
    }
}

// Segments may contain the key; only the name part is safe to echo.
fn redact(segment: &str) -> String {
    let name: String = segment.chars().take(16).collect();
    format!("{}...", name)
}
