use crate::settings::{CollisionPolicy, ShortenerSettings};
use async_trait::async_trait;
use snip_codec::{Codec, ConfigError, Decoded, Encoding};
use snip_core::{
    normalize, RecordKey, Repository, ShortCode, Shortener, ShortenerError, StorageError,
    UrlRecord,
};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Codec` to handle:
/// - URL normalization
/// - Code derivation and storage, according to the codec
/// - Collision handling for content-derived codes
/// - Resolution of stored and self-contained codes
#[derive(Debug, Clone)]
pub struct ShortenerService<R> {
    repository: Arc<R>,
    codec: Codec,
    collision: CollisionPolicy,
}

/// Outcome of storing a content-derived code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    Stored,
    /// The code already maps to the same URL.
    Existing,
    /// The code belongs to a different URL.
    Collision,
}

impl<R: Repository> ShortenerService<R> {
    /// Creates a new `ShortenerService`, validating the codec configuration.
    pub fn new(repository: R, settings: ShortenerSettings) -> Result<Self, ConfigError> {
        Self::with_shared(Arc::new(repository), settings)
    }

    /// Like [`ShortenerService::new`] for a repository that is shared elsewhere.
    pub fn with_shared(repository: Arc<R>, settings: ShortenerSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            repository,
            codec: Codec::from_kind(&settings.codec)?,
            collision: settings.collision,
        })
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Stores `url` under `code` unless another URL already owns it.
    async fn claim(&self, code: &ShortCode, url: &str) -> Result<Claim, ShortenerError> {
        match self.repository.insert(code, UrlRecord::new(url)).await {
            Ok(()) => Ok(Claim::Stored),
            Err(StorageError::Conflict(_)) => {
                let existing = self
                    .repository
                    .get(&RecordKey::Code(code.clone()))
                    .await?;
                if existing.is_some_and(|record| record.original_url == url) {
                    Ok(Claim::Existing)
                } else {
                    Ok(Claim::Collision)
                }
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl<R: Repository> Shortener for ShortenerService<R> {
    async fn shorten(&self, raw_url: &str) -> Result<ShortCode, ShortenerError> {
        let url = normalize(raw_url)?;
        trace!(url = %url, codec = %self.codec, "shortening url");

        let mut collided = None;
        for attempt in 0..self.collision.attempts() {
            match self.codec.encode(&url, attempt)? {
                Encoding::Assigned => {
                    let id = self.repository.insert_assigned(UrlRecord::new(&url)).await?;
                    let code = self.codec.encode_id(id)?;
                    info!(code = %code, id, url = %url, "stored url");
                    return Ok(code);
                }
                Encoding::SelfContained(code) => {
                    debug!(code = %code, "encoded url without storing");
                    return Ok(code);
                }
                Encoding::Keyed(code) => match self.claim(&code, &url).await? {
                    Claim::Stored => {
                        info!(code = %code, url = %url, attempt, "stored url");
                        return Ok(code);
                    }
                    Claim::Existing => {
                        debug!(code = %code, url = %url, attempt, "url already stored");
                        return Ok(code);
                    }
                    Claim::Collision => {
                        warn!(code = %code, url = %url, attempt, "short code collision");
                        collided = Some(code);
                    }
                },
            }
        }

        let code = collided.map(|code| code.display()).unwrap_or_default();
        Err(ShortenerError::DuplicateKey(code))
    }

    async fn resolve(&self, raw_code: &str) -> Result<String, ShortenerError> {
        let code = ShortCode::parse(raw_code)?;
        trace!(code = %code, "resolving short code");

        match self.codec.decode(&code)? {
            Decoded::Url(url) => {
                debug!(code = %code, url = %url, "decoded self-contained code");
                Ok(url)
            }
            Decoded::Key(key) => match self.repository.get(&key).await? {
                Some(record) => {
                    debug!(code = %code, key = %key, url = %record.original_url, "resolved short code");
                    Ok(record.original_url)
                }
                None => {
                    trace!(code = %code, key = %key, "short code not found");
                    Err(ShortenerError::NotFound(code.display()))
                }
            },
        }
    }
}
