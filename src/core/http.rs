use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{BoxStream, StreamExt, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;

use crate::core::error::TransportError;

const APP_USER_AGENT: &str = concat!("mc-launcher/", env!("CARGO_PKG_VERSION"));

pub const VERSION_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";
pub const RESOURCES_URL: &str = "https://resources.download.minecraft.net";

/// Remote locations the pipeline talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Release catalog (list of every published version).
    pub catalog_url: String,
    /// Base of the content-addressed asset store.
    pub resources_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            catalog_url: VERSION_MANIFEST_URL.to_string(),
            resources_url: RESOURCES_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// URL of an asset object: `<resources>/<hash[0:2]>/<hash>`.
    pub fn asset_url(&self, prefix: &str, hash: &str) -> String {
        format!("{}/{}/{}", self.resources_url.trim_end_matches('/'), prefix, hash)
    }
}

pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(APP_USER_AGENT)
        .default_headers(default_headers)
        .build()
}

pub type ByteStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// The only way the pipeline reaches the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a document and return its body as text.
    async fn get_text(&self, url: &str) -> Result<String, TransportError>;

    /// GET a binary resource as a stream of chunks.
    async fn get_stream(&self, url: &str) -> Result<ByteStream, TransportError>;
}

/// `Transport` backed by a shared `reqwest::Client`.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, TransportError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        Ok(self.get(url).await?.text().await?)
    }

    async fn get_stream(&self, url: &str) -> Result<ByteStream, TransportError> {
        let response = self.get(url).await?;
        Ok(response.bytes_stream().map_err(TransportError::from).boxed())
    }
}
