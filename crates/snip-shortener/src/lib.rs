//! URL shortener service implementation.
//!
//! This crate provides [`ShortenerService`], which combines a configured
//! [`Codec`](snip_codec::Codec) with a [`Repository`](snip_core::Repository),
//! and the settings that choose between the codecs. Core types are
//! re-exported from `snip_core`.

pub mod service;
pub mod settings;

pub use service::ShortenerService;
pub use settings::{CollisionPolicy, ShortenerSettings, DEFAULT_MAX_ATTEMPTS};
pub use snip_core::{ShortCode, Shortener, ShortenerError};
