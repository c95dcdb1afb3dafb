//! Short-code derivations.
//!
//! Each strategy turns a normalized URL into a [`ShortCode`] and back:
//!
//! - [`alphabet`]: reversible integer encoding for store-assigned ids.
//! - [`base58`]: byte-to-text encoding, full or truncated.
//! - [`readable`]: one-way, pronounceable codes.
//!
//! [`Codec`] ties them together behind one interface chosen by
//! configuration.
//!
//! [`ShortCode`]: snip_core::ShortCode

pub mod alphabet;
pub mod base58;
pub mod codec;
pub mod error;
pub mod readable;

pub use alphabet::{IdAlphabet, DEFAULT_ID_ALPHABET};
pub use codec::{Codec, CodecKind, Decoded, Encoding};
pub use error::ConfigError;
