use clap::{ArgGroup, Parser, ValueEnum};
use snip_codec::alphabet::DEFAULT_ID_ALPHABET;
use snip_codec::base58::DEFAULT_TRUNCATED_LENGTH;
use snip_codec::readable::DEFAULT_READABLE_LENGTH;
use snip_codec::CodecKind;
use snip_shortener::{CollisionPolicy, ShortenerSettings, DEFAULT_MAX_ATTEMPTS};
use std::fmt::{Display, Formatter};

pub const STORAGE_BACKEND_ENV: &str = "SNIP_STORAGE_BACKEND";
pub const DATABASE_URL_ENV: &str = "SNIP_DATABASE_URL";
pub const CODEC_ENV: &str = "SNIP_CODEC";
pub const CODE_LENGTH_ENV: &str = "SNIP_CODE_LENGTH";
pub const MIN_ID_LENGTH_ENV: &str = "SNIP_MIN_ID_LENGTH";
pub const ID_ALPHABET_ENV: &str = "SNIP_ID_ALPHABET";
pub const COLLISION_ENV: &str = "SNIP_COLLISION";
pub const MAX_ATTEMPTS_ENV: &str = "SNIP_MAX_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "SNIP_LOG_FORMAT";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://urls.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CodecArg {
    #[value(name = "readable")]
    Readable,
    #[value(name = "truncated-base58")]
    TruncatedBase58,
    #[value(name = "base58")]
    Base58,
    #[value(name = "surrogate-key")]
    SurrogateKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionArg {
    #[value(name = "reject")]
    Reject,
    #[value(name = "salted-retry")]
    SaltedRetry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

/// What the invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Shorten(String),
    Resolve(String),
}

#[derive(Debug, Parser)]
#[command(name = "snip", about = "Shorten URLs into readable codes and resolve them back")]
#[command(group(ArgGroup::new("action").required(true).args(["url", "decode"])))]
pub struct CLI {
    /// URL to shorten
    #[arg(long)]
    pub url: Option<String>,

    /// Short code to resolve back to its URL
    #[arg(long)]
    pub decode: Option<String>,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = DATABASE_URL_ENV, default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    #[arg(long, env = CODEC_ENV, value_enum, default_value_t = CodecArg::Readable)]
    pub codec: CodecArg,

    /// Code length for the readable and truncated-base58 codecs
    #[arg(long, env = CODE_LENGTH_ENV)]
    pub code_length: Option<usize>,

    /// Minimum code length for the surrogate-key codec
    #[arg(long, env = MIN_ID_LENGTH_ENV, default_value_t = 0)]
    pub min_id_length: usize,

    #[arg(long, env = ID_ALPHABET_ENV, default_value = DEFAULT_ID_ALPHABET)]
    pub id_alphabet: String,

    #[arg(long, env = COLLISION_ENV, value_enum, default_value_t = CollisionArg::Reject)]
    pub collision: CollisionArg,

    /// Derivations tried per URL with the salted-retry policy
    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl CLI {
    pub fn command(&self) -> Option<Command> {
        match (&self.url, &self.decode) {
            (Some(url), None) => Some(Command::Shorten(url.clone())),
            (None, Some(code)) => Some(Command::Resolve(code.clone())),
            _ => None,
        }
    }

    pub fn settings(&self) -> ShortenerSettings {
        let codec = match self.codec {
            CodecArg::Readable => CodecKind::Readable {
                max_len: self.code_length.unwrap_or(DEFAULT_READABLE_LENGTH),
            },
            CodecArg::TruncatedBase58 => CodecKind::TruncatedBase58 {
                length: self.code_length.unwrap_or(DEFAULT_TRUNCATED_LENGTH),
            },
            CodecArg::Base58 => CodecKind::Base58,
            CodecArg::SurrogateKey => CodecKind::SurrogateKey {
                alphabet: self.id_alphabet.clone(),
                min_length: self.min_id_length,
            },
        };

        let collision = match self.collision {
            CollisionArg::Reject => CollisionPolicy::Reject,
            CollisionArg::SaltedRetry => CollisionPolicy::SaltedRetry {
                max_attempts: self.max_attempts,
            },
        };

        ShortenerSettings::builder()
            .codec(codec)
            .collision(collision)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CLI, clap::Error> {
        CLI::try_parse_from(std::iter::once("snip").chain(args.iter().copied()))
    }

    #[test]
    fn url_or_decode_is_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--url", "a.com", "--decode", "abcd"]).is_err());
    }

    #[test]
    fn shorten_with_defaults() {
        let cli = parse(&["--url", "example.com"]).unwrap();
        assert_eq!(cli.command(), Some(Command::Shorten("example.com".to_string())));
        assert_eq!(cli.storage, StorageBackendArg::Sqlite);
        assert_eq!(cli.database_url, DEFAULT_DATABASE_URL);

        let settings = cli.settings();
        assert_eq!(settings.codec, CodecKind::default());
        assert_eq!(settings.collision, CollisionPolicy::Reject);
    }

    #[test]
    fn decode_with_surrogate_codec() {
        let cli = parse(&[
            "--decode",
            "xK",
            "--codec",
            "surrogate-key",
            "--min-id-length",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.command(), Some(Command::Resolve("xK".to_string())));
        assert_eq!(
            cli.settings().codec,
            CodecKind::SurrogateKey {
                alphabet: DEFAULT_ID_ALPHABET.to_string(),
                min_length: 4,
            }
        );
    }

    #[test]
    fn code_length_and_collision_policy() {
        let cli = parse(&[
            "--url",
            "a.com",
            "--codec",
            "truncated-base58",
            "--code-length",
            "8",
            "--collision",
            "salted-retry",
            "--max-attempts",
            "5",
        ])
        .unwrap();
        let settings = cli.settings();
        assert_eq!(settings.codec, CodecKind::TruncatedBase58 { length: 8 });
        assert_eq!(
            settings.collision,
            CollisionPolicy::SaltedRetry { max_attempts: 5 }
        );
    }
}
