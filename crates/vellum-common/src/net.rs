//! Resource fetching for the resource inliner.
//!
//! Provides an async HTTP GET wrapper over `reqwest`, `data:` URL decoding and
//! encoding, and media-type sniffing for responses that do not declare one.
use base64::Engine;
use data_url::DataUrl;
use thiserror::Error;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Errors produced while fetching a single resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
    /// The request could not be sent or the body could not be read.
    #[error("request for {url} failed: {message}")]
    Request {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("HTTP error {status} for {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },
    /// A `data:` URL could not be decoded.
    #[error("invalid data URL: {0}")]
    DataUrl(String),
}

/// A fetched resource: body plus its media type ("blob type").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResource {
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// Essence of the declared (or sniffed) media type, lowercase, without parameters.
    pub media_type: String,
}

impl FetchedResource {
    /// Build a resource, normalizing `content_type` and sniffing when it is absent.
    #[must_use]
    pub fn new(bytes: Vec<u8>, content_type: Option<&str>) -> Self {
        let media_type = content_type
            .map(media_type_essence)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| sniff_media_type(&bytes).to_string());
        Self { bytes, media_type }
    }

    /// Encode this resource as a base64 `data:` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        encode_data_url(&self.media_type, &self.bytes)
    }
}

/// [MIME Sniffing § 2.1](https://mimesniff.spec.whatwg.org/#mime-type-essence)
///
/// "A MIME type's essence is its type, followed by U+002F (/), followed by its subtype."
///
/// Returns an empty string when `content_type` is not a valid MIME type.
#[must_use]
pub fn media_type_essence(content_type: &str) -> String {
    content_type
        .trim()
        .parse::<mime::Mime>()
        .map(|mime| mime.essence_str().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Sniff the media type of an undeclared body.
///
/// Trims leading whitespace and checks the first 256 bytes for `<?xml` or
/// `<svg` prefixes, then a few raster/font magic numbers.
#[must_use]
pub fn sniff_media_type(bytes: &[u8]) -> &'static str {
    let trimmed = bytes
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take(256)
        .copied()
        .collect::<Vec<u8>>();

    if trimmed.starts_with(b"<?xml") || trimmed.starts_with(b"<svg") {
        "image/svg+xml"
    } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(b"\xff\xd8\xff") {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WEBP") {
        "image/webp"
    } else if bytes.starts_with(b"wOF2") {
        "font/woff2"
    } else if bytes.starts_with(b"wOFF") {
        "font/woff"
    } else {
        "application/octet-stream"
    }
}

/// Encode bytes as a base64 `data:` URL.
#[must_use]
pub fn encode_data_url(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{media_type};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// A parsed `data:` URL that can be decoded into raw bytes.
///
/// [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397)
pub struct DataURL<'a> {
    /// The full raw `data:` URL string (e.g. `data:image/png;base64,...`).
    pub raw_data: &'a str,
}

impl<'a> DataURL<'a> {
    /// Wrap a raw data URL string.
    #[must_use]
    pub const fn new(raw_data: &'a str) -> Self {
        Self { raw_data }
    }

    /// Decode the data URL into a [`FetchedResource`].
    ///
    /// [Fetch § 4.2 data: URLs](https://fetch.spec.whatwg.org/#data-urls)
    ///
    /// "If mimeTypeRecord is failure, then set mimeTypeRecord to
    /// text/plain;charset=US-ASCII."
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::DataUrl`] if the comma separator is missing or
    /// the base64 payload is malformed.
    pub fn decode(&self) -> Result<FetchedResource, FetchError> {
        let url = DataUrl::process(self.raw_data).map_err(|e| FetchError::DataUrl(format!("{e:?}")))?;
        let (bytes, _fragment) = url
            .decode_to_vec()
            .map_err(|e| FetchError::DataUrl(format!("base64 decode error: {e:?}")))?;
        Ok(FetchedResource::new(bytes, Some(&url.mime_type().to_string())))
    }
}

/// Async HTTP client shared by all fetches of one inlining pass.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client sending `user_agent` with every request.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the TLS backend cannot be initialized.
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch a URL and return its body with its declared media type.
    ///
    /// `data:` URLs are decoded locally without touching the network.
    /// Timeouts are applied by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response has a non-success
    /// status, or the body cannot be read.
    pub async fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError> {
        if url.starts_with("data:") {
            return DataURL::new(url).decode();
        }

        let request_error = |e: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(request_error)?;

        Ok(FetchedResource::new(bytes.to_vec(), content_type.as_deref()))
    }
}
