use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use crate::config::HttpConfig;
use crate::errors::{AppResult, SourceError, SourceResult};
use crate::utils::url::UrlUtils;
use crate::utils::{CompressionFormat, DecompressionService};

/// HTTP client trait that provides automatic decompression of playlist bodies
#[async_trait]
pub trait DecompressingHttpClient: Send + Sync {
    /// Fetch URL and return decompressed text content
    async fn fetch_text(&self, url: &str) -> SourceResult<String>;
}

/// Default implementation of DecompressingHttpClient using reqwest
pub struct StandardHttpClient {
    client: Client,
}

impl StandardHttpClient {
    /// Create a client with the configured timeouts and user agent
    pub fn new(config: &HttpConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self { client })
    }

    fn map_request_error(error: reqwest::Error, url: &str) -> SourceError {
        let url = UrlUtils::obfuscate_credentials(url);
        if error.is_timeout() {
            SourceError::Timeout { url }
        } else {
            SourceError::unavailable(url, UrlUtils::obfuscate_credentials(&error.to_string()))
        }
    }

    /// Process response with automatic decompression
    async fn process_response_to_bytes(response: Response, url: &str) -> SourceResult<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: UrlUtils::obfuscate_credentials(url),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Self::map_request_error(e, url))?;

        debug!("Fetched {} bytes of raw content", bytes.len());

        let compression_format = DecompressionService::detect_compression_format(&bytes);
        debug!("Detected compression format: {:?}", compression_format);

        match compression_format {
            CompressionFormat::Uncompressed => Ok(bytes.to_vec()),
            _ => DecompressionService::decompress(bytes).map_err(|e| {
                SourceError::decode(UrlUtils::obfuscate_credentials(url), format!("{e:#}"))
            }),
        }
    }
}

/// Decode a playlist body, tolerating stray invalid bytes and a UTF-8 BOM.
pub fn decode_text(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let text: &str = &decoded;
    text.strip_prefix('\u{feff}').unwrap_or(text).to_string()
}

#[async_trait]
impl DecompressingHttpClient for StandardHttpClient {
    async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        debug!("Fetching text content from: {}", UrlUtils::obfuscate_credentials(url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_request_error(e, url))?;

        let decompressed_bytes = Self::process_response_to_bytes(response, url).await?;
        let content = decode_text(&decompressed_bytes);

        debug!("Successfully fetched {} characters of text content", content.len());
        Ok(content)
    }
}
