use crate::error::CoreError;
use crate::format;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// A short code in its stored (canonical) form.
///
/// Stored codes are non-empty and contain only ASCII alphanumeric
/// characters. The hyphen-grouped rendering shown to people is produced by
/// [`ShortCode::display`] and accepted back by [`ShortCode::parse`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ShortCode(SmolStr);

impl ShortCode {
    /// Creates a `ShortCode` from its stored form after validating it.
    pub fn new(code: impl AsRef<str>) -> Result<Self, CoreError> {
        let code = code.as_ref();
        Self::validate(code)?;
        Ok(Self(SmolStr::new(code)))
    }

    /// Parses user input that may be in display form.
    ///
    /// Separators are stripped before validation, so `abcd-efgh` and
    /// `abcdefgh` name the same code.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        Self::new(format::unformat(input.trim()))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by the codecs in this workspace,
    /// which never emit separators or non-alphanumeric characters.
    pub fn new_unchecked(code: impl AsRef<str>) -> Self {
        Self(SmolStr::new(code.as_ref()))
    }

    /// Returns the stored form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hyphen-grouped display form.
    pub fn display(&self) -> String {
        format::format(&self.0)
    }

    /// Returns the number of characters in the stored form.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validate(code: &str) -> Result<(), CoreError> {
        if code.is_empty() {
            return Err(CoreError::InvalidCode("code must not be empty".to_string()));
        }

        if let Some(bad) = code.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidCode(format!(
                "unexpected character {bad:?} in '{code}'"
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ShortCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = SmolStr::deserialize(deserializer)?;
        ShortCode::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("a").is_ok());
        assert!(ShortCode::new("bomutafekilo").is_ok());
        assert!(ShortCode::new("3xK9pQ2mZ").is_ok());
    }

    #[test]
    fn empty_is_rejected() {
        assert!(matches!(
            ShortCode::new(""),
            Err(CoreError::InvalidCode(_))
        ));
        assert!(ShortCode::parse("---").is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("abc def").is_err());
        assert!(ShortCode::new("abc/def").is_err());
        assert!(ShortCode::new("abc-def").is_err());
        assert!(ShortCode::new("abcé").is_err());
    }

    #[test]
    fn parse_accepts_display_form() {
        let code = ShortCode::parse("bomu-tafe-kilo").unwrap();
        assert_eq!(code.as_str(), "bomutafekilo");
        assert_eq!(code.display(), "bomu-tafe-kilo");
    }

    #[test]
    fn parse_trims_whitespace() {
        let code = ShortCode::parse("  abcd-ef \n").unwrap();
        assert_eq!(code.as_str(), "abcdef");
    }

    #[test]
    fn display_trait_prints_stored_form() {
        let code = ShortCode::new("abcdefgh").unwrap();
        assert_eq!(code.to_string(), "abcdefgh");
        assert_eq!(code.len(), 8);
    }

    #[test]
    fn deserialize_validates() {
        use serde::de::value::{Error as ValueError, StrDeserializer};
        use serde::de::IntoDeserializer;

        let ok: StrDeserializer<'_, ValueError> = "abcd".into_deserializer();
        assert_eq!(ShortCode::deserialize(ok).unwrap().as_str(), "abcd");

        let bad: StrDeserializer<'_, ValueError> = "ab/cd".into_deserializer();
        assert!(ShortCode::deserialize(bad).is_err());
    }
}
