use crate::error::ShortenerError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens a raw URL and returns the code it can be resolved with.
    ///
    /// The URL is normalized first, so `example.com` and
    /// `https://example.com` are the same input.
    async fn shorten(&self, raw_url: &str) -> Result<ShortCode>;

    /// Resolves a code (stored or display form) to the URL it was created for.
    ///
    /// Returns `Err(NotFound)` for a well-formed code that was never issued.
    async fn resolve(&self, raw_code: &str) -> Result<String>;
}
