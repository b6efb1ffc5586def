//! Feedback record identifiers.
//!
//! Records are keyed by an opaque token in a *canonical* form: **32 lowercase
//! hexadecimal characters** (the simple rendering of a v4 UUID, no hyphens).
//!
//! - Generated ids carry enough entropy that collisions are vanishingly
//!   unlikely; the store still refuses to overwrite on the off chance.
//! - Externally supplied ids (API paths, CLI arguments) must already be in
//!   canonical form. Use [`FeedbackId::parse`] to validate them; uppercase,
//!   hyphenated, or wrong-length values are rejected.

use crate::error::{FeedbackError, FeedbackResult};

/// A canonical feedback record identifier.
///
/// Once constructed, the inner value is guaranteed to be 32 lowercase hex
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeedbackId(String);

impl FeedbackId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Validates an externally supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError::InvalidId` unless the input is exactly 32
    /// lowercase hexadecimal characters.
    pub fn parse(input: &str) -> FeedbackResult<Self> {
        if input.len() != 32 {
            return Err(FeedbackError::InvalidId(format!(
                "expected 32 characters, got {}",
                input.len()
            )));
        }
        if !input
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        {
            return Err(FeedbackError::InvalidId(
                "expected lowercase hexadecimal characters only".into(),
            ));
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for FeedbackId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for FeedbackId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FeedbackId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_canonical_form() {
        let id = FeedbackId::generate();
        assert_eq!(id.as_str().len(), 32);
        assert!(id
            .as_str()
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }

    #[test]
    fn parse_round_trips_generated_ids() {
        let id = FeedbackId::generate();
        let parsed = FeedbackId::parse(id.as_str()).expect("generated id should parse");
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_non_canonical_input() {
        assert!(FeedbackId::parse("").is_err());
        assert!(FeedbackId::parse("short").is_err());
        assert!(
            FeedbackId::parse("550E8400E29B41D4A716446655440000").is_err(),
            "uppercase is not canonical"
        );
        assert!(
            FeedbackId::parse("550e8400-e29b-41d4-a716-446655440000").is_err(),
            "hyphenated form is not canonical"
        );
    }
}
