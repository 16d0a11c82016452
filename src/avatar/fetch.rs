//! Avatar fetching over HTTP.

use std::time::Duration;

use image::DynamicImage;
use reqwest::blocking::Client;

/// Edge length avatars are downscaled to before they reach the UI thread.
pub const AVATAR_THUMBNAIL_PX: u32 = 128;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum AvatarError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response body was empty")]
    EmptyBody,
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Source of avatar images.
pub trait AvatarFetcher {
    /// Fetch and decode the image at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body is not a decodable image.
    fn fetch(&self, url: &str) -> Result<DynamicImage, AvatarError>;
}

/// Fetches avatars with a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with a request timeout and a crate user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, AvatarError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("robolist/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl AvatarFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<DynamicImage, AvatarError> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let bytes = response.bytes()?;
        if bytes.is_empty() {
            return Err(AvatarError::EmptyBody);
        }
        let image = image::load_from_memory(&bytes)?;
        Ok(image.thumbnail(AVATAR_THUMBNAIL_PX, AVATAR_THUMBNAIL_PX))
    }
}
