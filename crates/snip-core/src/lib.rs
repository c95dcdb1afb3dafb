//! Core types and traits for the snip URL shortener.
//!
//! This crate holds everything that does not depend on a particular code
//! derivation or storage engine: the error taxonomy, the [`ShortCode`] type
//! and its display formatting, URL normalization, and the repository and
//! shortener contracts.

pub mod error;
pub mod format;
pub mod normalize;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, ShortenerError, StorageError};
pub use normalize::normalize;
pub use repository::{ReadRepository, RecordKey, Repository, UrlRecord};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
