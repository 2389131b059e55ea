// API client module: a small blocking HTTP client for the VWS target
// management API. Every call goes through `send`, which signs the request
// with the caller's credentials.

use crate::error::{VwsError, VwsResult};
use crate::signer::{authorization_header, http_date};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, DATE};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Target management host.
pub const DEFAULT_BASE_URL: &str = "https://vws.vuforia.com";
/// Environment variable overriding the base URL.
pub const ENDPOINT_ENV: &str = "VWS_ENDPOINT";
pub const JSON_CONTENT_TYPE: &str = "application/json";
const TARGETS_PATH: &str = "/targets";

/// Physical width sent for every uploaded target, in scene units.
pub const TARGET_WIDTH: f64 = 100.0;

/// Access key and secret key issued for a cloud database.
#[derive(Clone)]
pub struct Credentials {
    pub access_key: String,
    secret_key: Vec<u8>,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<Vec<u8>>) -> Self {
        Credentials {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Where requests go and how bodies are labelled.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub content_type: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.into(),
            content_type: JSON_CONTENT_TYPE.into(),
        }
    }
}

impl ClientConfig {
    /// Base URL from `VWS_ENDPOINT`, or the public host when unset.
    pub fn from_env() -> Self {
        let base_url = std::env::var(ENDPOINT_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        ClientConfig::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Status code and raw body of a response, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// A new target is acknowledged with 200 or 201.
    pub fn is_created(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    fn expect_ok(self) -> VwsResult<Self> {
        if self.status != 200 {
            return Err(VwsError::Remote {
                status: self.status,
                body: self.body,
            });
        }
        Ok(self)
    }
}

/// Body of `GET /targets`.
#[derive(Deserialize, Debug)]
pub struct TargetList {
    pub results: Vec<String>,
}

/// Body of `POST /targets`. Field order is the order on the wire.
#[derive(Serialize, Debug)]
pub struct NewTarget<'a> {
    pub name: &'a str,
    pub width: f64,
    pub image: String,
}

/// Blocking client bound to one set of credentials.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(config: ClientConfig, credentials: Credentials) -> VwsResult<Self> {
        let client = Client::builder().build()?;
        Ok(ApiClient {
            client,
            config,
            credentials,
        })
    }

    /// Create an ApiClient configured from the environment variable
    /// `VWS_ENDPOINT` or fall back to `https://vws.vuforia.com`.
    pub fn from_env(credentials: Credentials) -> VwsResult<Self> {
        ApiClient::new(ClientConfig::from_env(), credentials)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sign and send one request. Only transport failures are errors here;
    /// any status the server returns is handed back to the caller.
    fn send(&self, method: Method, path: &str, body: Vec<u8>) -> VwsResult<ApiResponse> {
        let date = http_date(Utc::now());
        let token = authorization_header(
            &self.credentials.access_key,
            &self.credentials.secret_key,
            method.as_str(),
            &body,
            &self.config.content_type,
            &date,
            path,
        );

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(AUTHORIZATION, header_value("authorization", &token)?);
        headers.insert(CONTENT_TYPE, header_value("content type", &self.config.content_type)?);
        headers.insert(DATE, header_value("date", &date)?);

        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        tracing::debug!(%method, %url, body_len = body.len(), "sending request");

        let mut req = self.client.request(method, &url).headers(headers);
        if !body.is_empty() {
            req = req.body(body);
        }
        let res = req.send()?;
        let status = res.status().as_u16();
        let body = res.text()?;
        tracing::debug!(status, "received response");
        Ok(ApiResponse { status, body })
    }

    /// IDs of every target in the database, in the order the server lists them.
    pub fn list_targets(&self) -> VwsResult<Vec<String>> {
        let res = self.send(Method::GET, TARGETS_PATH, Vec::new())?.expect_ok()?;
        let list: TargetList =
            serde_json::from_str(&res.body).map_err(|e| VwsError::Response(e.to_string()))?;
        Ok(list.results)
    }

    /// Delete one target. Returns the raw response body on 200.
    pub fn delete_target(&self, target_id: &str) -> VwsResult<String> {
        let path = format!("{}/{}", TARGETS_PATH, target_id);
        let res = self.send(Method::DELETE, &path, Vec::new())?.expect_ok()?;
        Ok(res.body)
    }

    /// Upload the image at `image_path` as a new target named after the file
    /// stem. The response is returned as is; see `ApiResponse::is_created`.
    pub fn add_target(&self, image_path: &Path) -> VwsResult<ApiResponse> {
        let image = encode_image(image_path)?;
        let name = target_name(image_path);
        let body = serde_json::to_vec(&NewTarget {
            name: &name,
            width: TARGET_WIDTH,
            image,
        })
        .map_err(|e| VwsError::Response(e.to_string()))?;

        self.send(Method::POST, TARGETS_PATH, body)
    }
}

/// Base64 of the file contents. An empty payload is an error so that no
/// target is ever created without an image.
pub fn encode_image(image_path: &Path) -> VwsResult<String> {
    let bytes = std::fs::read(image_path).map_err(|source| VwsError::File {
        path: image_path.to_path_buf(),
        source,
    })?;
    let encoded = STANDARD.encode(bytes);
    if encoded.is_empty() {
        return Err(VwsError::EmptyImage {
            path: image_path.to_path_buf(),
        });
    }
    Ok(encoded)
}

/// File name without its extension.
pub fn target_name(image_path: &Path) -> String {
    image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn header_value(what: &str, value: &str) -> VwsResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| VwsError::Argument(format!("{} is not a valid header value", what)))
}
