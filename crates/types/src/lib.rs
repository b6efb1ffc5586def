//! Validated primitive types shared across the plaudit crates.
//!
//! Feedback fields are validated once, at construction, so the rest of the
//! codebase never has to re-check them. A `NonEmptyText` is always trimmed
//! and non-empty; a `Rating` is always within the 1..=5 star scale.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when creating a [`Rating`].
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    /// The value fell outside the 1..=5 star scale
    #[error("Rating must be between {min} and {max}, got {value}", min = Rating::MIN, max = Rating::MAX)]
    OutOfRange { value: u8 },
}

/// A string type that guarantees non-empty content.
///
/// Wraps a `String` and ensures it contains at least one non-whitespace
/// character. Input is trimmed of leading and trailing whitespace during
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed before the emptiness check, so whitespace-only
    /// input is rejected with [`TextError::Empty`].
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper, returning the validated `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A star rating on the 1..=5 scale.
///
/// Construction rejects out-of-range values, so a stored `Rating` can be
/// rendered or compared without further checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Creates a new `Rating`, rejecting values outside 1..=5.
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(RatingError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Returns the numeric rating value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Renders the rating as filled and unfilled stars, e.g. 4 -> `★★★★☆`.
    pub fn stars(self) -> String {
        let filled = usize::from(self.0);
        let mut s = "★".repeat(filled);
        s.push_str(&"☆".repeat(usize::from(Self::MAX) - filled));
        s
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Rating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Rating::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_whitespace() {
        let text = NonEmptyText::new("  hello  ").expect("should accept padded input");
        assert_eq!(text.as_str(), "hello");
    }

    #[test]
    fn non_empty_text_rejects_empty_and_whitespace() {
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new("   \t\n"), Err(TextError::Empty)));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_blank() {
        let result: Result<NonEmptyText, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err(), "blank JSON string should be rejected");

        let ok: NonEmptyText = serde_json::from_str("\"fine\"").expect("valid text");
        assert_eq!(ok.as_str(), "fine");
    }

    #[test]
    fn rating_accepts_full_scale() {
        for value in 1..=5u8 {
            let rating = Rating::new(value).expect("in-range rating should succeed");
            assert_eq!(rating.get(), value);
        }
    }

    #[test]
    fn rating_rejects_out_of_range() {
        assert!(matches!(
            Rating::new(0),
            Err(RatingError::OutOfRange { value: 0 })
        ));
        assert!(matches!(
            Rating::new(6),
            Err(RatingError::OutOfRange { value: 6 })
        ));
    }

    #[test]
    fn rating_renders_stars() {
        assert_eq!(Rating::new(4).unwrap().stars(), "★★★★☆");
        assert_eq!(Rating::new(1).unwrap().stars(), "★☆☆☆☆");
        assert_eq!(Rating::new(5).unwrap().stars(), "★★★★★");
    }

    #[test]
    fn rating_deserialize_validates() {
        let ok: Rating = serde_json::from_str("3").expect("valid rating");
        assert_eq!(ok.get(), 3);

        let result: Result<Rating, _> = serde_json::from_str("9");
        assert!(result.is_err(), "out-of-range rating should be rejected");
    }
}
