use std::{fmt, num::NonZeroU32, str::FromStr};

use non_empty_string::NonEmptyString;
use nonempty::NonEmpty;

/// The stable identifier of a master within a catalogue.
///
/// Identifiers are positive integers, as they appear in the detail path
/// (`show 3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MasterId(NonZeroU32);

impl MasterId {
    /// Creates an identifier from a raw integer.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMasterIdError`] if the value is zero.
    pub const fn new(value: u32) -> Result<Self, InvalidMasterIdError> {
        match NonZeroU32::new(value) {
            Some(id) => Ok(Self(id)),
            None => Err(InvalidMasterIdError::Zero),
        }
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for MasterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MasterId {
    type Err = InvalidMasterIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| InvalidMasterIdError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<u32> for MasterId {
    type Error = InvalidMasterIdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Error returned when an identifier is not a positive integer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidMasterIdError {
    /// The identifier was zero.
    #[error("Invalid master id '0': must be a positive integer")]
    Zero,

    /// The identifier was not a number.
    #[error("Invalid master id '{0}': must be a positive integer")]
    NotANumber(String),
}

/// A star rating between 0 and 5 inclusive.
///
/// Used both for a master's overall rating and for the minimum-rating
/// threshold of the directory filters, where zero means "no constraint".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rating(u8);

impl Rating {
    /// The highest possible rating.
    pub const MAX: Self = Self(5);

    /// The lowest possible rating. As a threshold it excludes nothing.
    pub const ZERO: Self = Self(0);

    /// Creates a rating.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRatingError`] if the value is greater than 5.
    pub const fn new(value: u8) -> Result<Self, InvalidRatingError> {
        if value > Self::MAX.0 {
            return Err(InvalidRatingError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = InvalidRatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = InvalidRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| InvalidRatingError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a rating lies outside 0..=5.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidRatingError {
    /// The rating was greater than 5.
    #[error("Invalid rating '{0}': must be an integer between 0 and 5")]
    OutOfRange(u8),

    /// The rating was not a number.
    #[error("Invalid rating '{0}': must be an integer between 0 and 5")]
    NotANumber(String),
}

/// A service provider listed in the directory.
///
/// This is the record the directory filters and sorts. Descriptive-only
/// fields (biography, phone, portfolio, reviews) live on
/// [`ProfileDetails`](crate::domain::ProfileDetails).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Master {
    /// Unique, stable identifier.
    pub id: MasterId,
    /// Display name, e.g. "Александр Петров".
    pub name: NonEmptyString,
    /// Avatar image reference. Presentational only.
    pub avatar: Option<String>,
    /// Overall rating.
    pub rating: Rating,
    /// Number of reviews the rating is based on.
    pub review_count: u32,
    /// Services this master offers.
    pub specializations: NonEmpty<String>,
    /// The district the master works in.
    pub district: String,
    /// Hourly price in roubles.
    pub price_per_hour: u32,
    /// Years of experience.
    pub experience: u32,
    /// Whether the master is currently online.
    pub is_online: bool,
}

impl Master {
    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Whether the master lists `service` among their specializations.
    ///
    /// The comparison is exact; facet values come from a fixed vocabulary.
    #[must_use]
    pub fn offers(&self, service: &str) -> bool {
        self.specializations.iter().any(|spec| spec == service)
    }

    /// The avatar fallback: the first letter of each part of the name.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use nonempty::nonempty;
    use test_case::test_case;

    use super::*;

    fn master(name: &str) -> Master {
        Master {
            id: MasterId::new(1).unwrap(),
            name: NonEmptyString::new(name.to_string()).unwrap(),
            avatar: None,
            rating: Rating::new(5).unwrap(),
            review_count: 47,
            specializations: nonempty!["Сборка мебели".to_string(), "Электрика".to_string()],
            district: "Центральный".to_string(),
            price_per_hour: 800,
            experience: 5,
            is_online: true,
        }
    }

    #[test]
    fn zero_id_is_rejected() {
        assert_eq!(MasterId::new(0), Err(InvalidMasterIdError::Zero));
        assert!("0".parse::<MasterId>().is_err());
    }

    #[test]
    fn id_parses_from_string() {
        let id: MasterId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test_case(0; "zero")]
    #[test_case(3; "middle")]
    #[test_case(5; "maximum")]
    fn rating_accepts_valid_values(value: u8) {
        assert_eq!(Rating::new(value).unwrap().get(), value);
    }

    #[test_case(6; "just above maximum")]
    #[test_case(255; "far above maximum")]
    fn rating_rejects_out_of_range(value: u8) {
        assert_eq!(Rating::new(value), Err(InvalidRatingError::OutOfRange(value)));
    }

    #[test_case("abc"; "letters")]
    #[test_case("-3"; "negative")]
    #[test_case("4000000000000"; "overflow")]
    fn id_parse_error_names_the_input(input: &str) {
        let error = input.parse::<MasterId>().unwrap_err();
        assert_eq!(error, InvalidMasterIdError::NotANumber(input.to_string()));
        assert!(error.to_string().contains(&format!("'{input}'")));
    }

    #[test_case("five"; "word")]
    #[test_case("4.5"; "fraction")]
    #[test_case("300"; "overflow")]
    fn rating_parse_error_names_the_input(input: &str) {
        let error = input.parse::<Rating>().unwrap_err();
        assert_eq!(error, InvalidRatingError::NotANumber(input.to_string()));
        assert!(error.to_string().contains(&format!("'{input}'")));
    }

    #[test]
    fn out_of_range_rating_error_names_the_value() {
        let error = "7".parse::<Rating>().unwrap_err();
        assert_eq!(error.to_string(), "Invalid rating '7': must be an integer between 0 and 5");
    }

    #[test]
    fn offers_matches_exact_service() {
        let master = master("Александр Петров");
        assert!(master.offers("Электрика"));
        assert!(!master.offers("электрика"));
        assert!(!master.offers("Сантехника"));
    }

    #[test]
    fn initials_take_first_letter_of_each_name_part() {
        assert_eq!(master("Александр Петров").initials(), "АП");
        assert_eq!(master("Олег").initials(), "О");
    }
}
