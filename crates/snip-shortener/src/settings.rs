use snip_codec::CodecKind;
use typed_builder::TypedBuilder;

/// Retries allowed by [`CollisionPolicy::SaltedRetry`] unless configured otherwise.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// What to do when a content-derived code is already taken by another URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Fail with `DuplicateKey`.
    #[default]
    Reject,
    /// Re-derive with a salt, up to `max_attempts` derivations in total,
    /// then fail with `DuplicateKey`.
    SaltedRetry { max_attempts: u32 },
}

impl CollisionPolicy {
    /// Total number of derivations to try for one URL.
    pub fn attempts(&self) -> u32 {
        match self {
            CollisionPolicy::Reject => 1,
            CollisionPolicy::SaltedRetry { max_attempts } => (*max_attempts).max(1),
        }
    }
}

/// Process-wide shortener configuration, fixed at startup.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ShortenerSettings {
    #[builder(default)]
    pub codec: CodecKind,
    #[builder(default)]
    pub collision: CollisionPolicy,
}
