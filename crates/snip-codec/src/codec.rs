use crate::alphabet::{IdAlphabet, DEFAULT_ID_ALPHABET};
use crate::base58::{self, DEFAULT_TRUNCATED_LENGTH};
use crate::error::ConfigError;
use crate::readable::{self, DEFAULT_READABLE_LENGTH};
use serde::{Deserialize, Serialize};
use snip_core::{normalize, CoreError, RecordKey, ShortCode};
use std::fmt::{Display, Formatter};

/// Which code derivation a deployment uses.
///
/// This is plain configuration; [`Codec::from_kind`] validates it and builds
/// the codec itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodecKind {
    /// Store first, then encode the store-assigned id.
    SurrogateKey { alphabet: String, min_length: usize },
    /// Base58 of the URL cut to `length` characters; resolved via the store.
    TruncatedBase58 { length: usize },
    /// Pronounceable code of at most `max_len` letters; resolved via the store.
    Readable { max_len: usize },
    /// Full base58 of the URL; resolved without the store.
    Base58,
}

impl Default for CodecKind {
    fn default() -> Self {
        CodecKind::Readable {
            max_len: DEFAULT_READABLE_LENGTH,
        }
    }
}

impl CodecKind {
    pub fn surrogate_key() -> Self {
        CodecKind::SurrogateKey {
            alphabet: DEFAULT_ID_ALPHABET.to_string(),
            min_length: 0,
        }
    }

    pub fn truncated_base58() -> Self {
        CodecKind::TruncatedBase58 {
            length: DEFAULT_TRUNCATED_LENGTH,
        }
    }
}

impl Display for CodecKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecKind::SurrogateKey { .. } => write!(f, "surrogate-key"),
            CodecKind::TruncatedBase58 { .. } => write!(f, "truncated-base58"),
            CodecKind::Readable { .. } => write!(f, "readable"),
            CodecKind::Base58 => write!(f, "base58"),
        }
    }
}

/// What the service has to do with a freshly encoded URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
    /// Nothing to encode yet: store the URL, then pass the assigned id to
    /// [`Codec::encode_id`].
    Assigned,
    /// Store the URL under this code.
    Keyed(ShortCode),
    /// The code carries the whole URL; nothing is stored.
    SelfContained(ShortCode),
}

/// Where a decoded code leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Look the record up under this key.
    Key(RecordKey),
    /// The URL itself, recovered without the store.
    Url(String),
}

/// A configured short-code strategy.
#[derive(Debug, Clone)]
pub enum Codec {
    SurrogateKey(IdAlphabet),
    TruncatedBase58 { length: usize },
    Readable { max_len: usize },
    Base58,
}

impl Codec {
    /// Validates `kind` and builds the matching codec.
    pub fn from_kind(kind: &CodecKind) -> Result<Self, ConfigError> {
        match kind {
            CodecKind::SurrogateKey {
                alphabet,
                min_length,
            } => Ok(Codec::SurrogateKey(IdAlphabet::new(alphabet, *min_length)?)),
            CodecKind::TruncatedBase58 { length } => {
                if *length == 0 {
                    return Err(ConfigError::ZeroLength);
                }
                Ok(Codec::TruncatedBase58 { length: *length })
            }
            CodecKind::Readable { max_len } => {
                if *max_len == 0 {
                    return Err(ConfigError::ZeroLength);
                }
                Ok(Codec::Readable { max_len: *max_len })
            }
            CodecKind::Base58 => Ok(Codec::Base58),
        }
    }

    /// Whether two different URLs can end up with the same code.
    pub fn may_collide(&self) -> bool {
        matches!(self, Codec::TruncatedBase58 { .. } | Codec::Readable { .. })
    }

    /// Encodes a normalized URL.
    ///
    /// `attempt` is 0 for the first try. Higher values salt the derivation so
    /// a colliding URL gets a different code; codecs that cannot collide
    /// ignore it.
    pub fn encode(&self, url: &str, attempt: u32) -> Result<Encoding, CoreError> {
        match self {
            Codec::SurrogateKey(_) => Ok(Encoding::Assigned),
            Codec::TruncatedBase58 { length } => {
                let seed = salted(url.as_bytes().to_vec(), attempt);
                derived(base58::truncated(seed, *length), url).map(Encoding::Keyed)
            }
            Codec::Readable { max_len } => {
                // seed: the URL followed by its character count plus one
                let mut seed = url.as_bytes().to_vec();
                seed.extend_from_slice((url.chars().count() + 1).to_string().as_bytes());
                let seed = salted(seed, attempt);
                derived(readable::generate(&seed, *max_len), url).map(Encoding::Keyed)
            }
            Codec::Base58 => derived(base58::encode(url), url).map(Encoding::SelfContained),
        }
    }

    /// Encodes a store-assigned id. Only meaningful for the surrogate-key codec.
    pub fn encode_id(&self, id: u64) -> Result<ShortCode, CoreError> {
        match self {
            Codec::SurrogateKey(alphabet) => Ok(ShortCode::new_unchecked(alphabet.encode(id))),
            other => Err(CoreError::InvalidCode(format!(
                "the {} codec does not encode ids",
                other.name()
            ))),
        }
    }

    /// Decodes a stored-form code.
    ///
    /// Fails with `InvalidCode` when the code could not have been produced by
    /// this codec.
    pub fn decode(&self, code: &ShortCode) -> Result<Decoded, CoreError> {
        match self {
            Codec::SurrogateKey(alphabet) => {
                let id = alphabet.decode(code.as_str())?;
                Ok(Decoded::Key(RecordKey::Id(id)))
            }
            Codec::TruncatedBase58 { length } => {
                check_len(code, *length)?;
                base58::decode(code.as_str())?;
                Ok(Decoded::Key(RecordKey::Code(code.clone())))
            }
            Codec::Readable { max_len } => {
                check_len(code, *max_len)?;
                if !code.as_str().chars().all(|c| c.is_ascii_lowercase()) {
                    return Err(CoreError::InvalidCode(format!(
                        "'{code}' must contain only lowercase letters"
                    )));
                }
                Ok(Decoded::Key(RecordKey::Code(code.clone())))
            }
            Codec::Base58 => {
                let bytes = base58::decode(code.as_str())?;
                let url = String::from_utf8(bytes).map_err(|_| {
                    CoreError::InvalidCode(format!("'{code}' does not decode to text"))
                })?;
                // only normalized URLs are ever encoded
                if normalize(&url).ok().as_deref() != Some(url.as_str()) {
                    return Err(CoreError::InvalidCode(format!(
                        "'{code}' does not decode to a url"
                    )));
                }
                Ok(Decoded::Url(url))
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Codec::SurrogateKey(_) => "surrogate-key",
            Codec::TruncatedBase58 { .. } => "truncated-base58",
            Codec::Readable { .. } => "readable",
            Codec::Base58 => "base58",
        }
    }
}

impl Display for Codec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Prefixes the seed with `"{attempt}:"` for retries.
///
/// Both derivations are dominated by their leading bytes, so the salt has to
/// go in front to change the code.
fn salted(seed: Vec<u8>, attempt: u32) -> Vec<u8> {
    if attempt == 0 {
        return seed;
    }
    let mut out = format!("{attempt}:").into_bytes();
    out.extend(seed);
    out
}

fn derived(code: String, url: &str) -> Result<ShortCode, CoreError> {
    if code.is_empty() {
        return Err(CoreError::InvalidUrl(format!("'{url}' derives an empty code")));
    }
    Ok(ShortCode::new_unchecked(code))
}

fn check_len(code: &ShortCode, max: usize) -> Result<(), CoreError> {
    if code.len() > max {
        return Err(CoreError::InvalidCode(format!(
            "'{code}' is longer than {max} characters"
        )));
    }
    Ok(())
}
