//! Azure Storage Shared Key authorization

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName};
use reqwest::{Method, Url};
use sha2::Sha256;

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Standard headers that take part in the string-to-sign, in order
const SIGNED_HEADERS: [&str; 11] = [
    "content-encoding",
    "content-language",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "if-modified-since",
    "if-match",
    "if-none-match",
    "if-unmodified-since",
    "range",
];

/// Account name and decoded key used to sign requests
#[derive(Clone)]
pub struct SharedKeyCredential {
    account: String,
    key: Vec<u8>,
}

impl SharedKeyCredential {
    pub fn new(account: impl Into<String>, key: Vec<u8>) -> Self {
        Self {
            account: account.into(),
            key,
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self, method: &Method, url: &Url, headers: &HeaderMap) -> Result<String> {
        let string_to_sign = self.string_to_sign(method, url, headers);
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| Error::ConfigError(format!("Invalid storage account key: {}", e)))?;
        mac.update(string_to_sign.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());
        Ok(format!("SharedKey {}:{}", self.account, signature))
    }

    pub(crate) fn string_to_sign(&self, method: &Method, url: &Url, headers: &HeaderMap) -> String {
        let mut out = String::new();
        out.push_str(method.as_str());
        out.push('\n');

        for name in SIGNED_HEADERS {
            let value = header_str(headers, name);
            // A zero length is signed as the empty string
            if name == "content-length" && value == "0" {
                out.push('\n');
                continue;
            }
            out.push_str(value);
            out.push('\n');
        }

        out.push_str(&canonicalized_headers(headers));
        out.push_str(&self.canonicalized_resource(url));
        out
    }

    fn canonicalized_resource(&self, url: &Url) -> String {
        let mut resource = format!("/{}{}", self.account, url.path());

        let mut params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_lowercase(), v.into_owned()))
            .collect();
        params.sort();

        let mut i = 0;
        while i < params.len() {
            let name = params[i].0.clone();
            let mut values = Vec::new();
            while i < params.len() && params[i].0 == name {
                values.push(params[i].1.clone());
                i += 1;
            }
            resource.push_str(&format!("\n{}:{}", name, values.join(",")));
        }

        resource
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

fn canonicalized_headers(headers: &HeaderMap) -> String {
    let mut ms_headers: Vec<(&HeaderName, &str)> = headers
        .iter()
        .filter(|(name, _)| name.as_str().starts_with("x-ms-"))
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name, v.trim())))
        .collect();
    ms_headers.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));

    ms_headers
        .into_iter()
        .map(|(name, value)| format!("{}:{}\n", name.as_str(), value))
        .collect()
}
