//! Filter criteria for the directory and the predicate they define.
//!
//! A [`Criteria`] value is never mutated in place. Every user action produces
//! a new value from the previous one, so the derivation step can treat its
//! input as a plain immutable value.

use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::domain::{Master, Rating};

/// A closed price interval, inclusive on both ends.
///
/// The interval is always well-formed: `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceRange {
    min: u32,
    max: u32,
}

impl PriceRange {
    /// The full price span used when no price constraint is set.
    pub const FULL: Self = Self {
        min: 0,
        max: 10_000,
    };

    /// Creates a price range.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPriceRangeError`] if `min` is greater than `max`.
    pub const fn new(min: u32, max: u32) -> Result<Self, InvalidPriceRangeError> {
        if min > max {
            return Err(InvalidPriceRangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// The lower bound.
    #[must_use]
    pub const fn min(self) -> u32 {
        self.min
    }

    /// The upper bound.
    #[must_use]
    pub const fn max(self) -> u32 {
        self.max
    }

    /// Whether `price` lies within the interval.
    #[must_use]
    pub const fn contains(self, price: u32) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for PriceRange {
    type Err = InvalidPriceRangeError;

    /// Parses `MIN-MAX`, e.g. `500-1000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidPriceRangeError::Malformed(s.to_string());

        let (min, max) = s.trim().split_once('-').ok_or_else(malformed)?;
        let min = min.trim().parse().map_err(|_| malformed())?;
        let max = max.trim().parse().map_err(|_| malformed())?;
        Self::new(min, max)
    }
}

/// Error returned when a price range cannot be constructed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidPriceRangeError {
    /// The lower bound exceeds the upper bound.
    #[error("Invalid price range: minimum {min} is greater than maximum {max}")]
    Inverted {
        /// The requested lower bound.
        min: u32,
        /// The requested upper bound.
        max: u32,
    },
    /// The text is not of the form `MIN-MAX`.
    #[error("Invalid price range '{0}': expected MIN-MAX, e.g. 500-1000")]
    Malformed(String),
}

/// The current combination of search text and facet selections.
///
/// Facets combine with logical AND. Within a multi-select facet (services,
/// districts) any selected value matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Criteria {
    services: BTreeSet<String>,
    districts: BTreeSet<String>,
    price_range: PriceRange,
    min_rating: Rating,
    query: String,
}

impl Criteria {
    /// Criteria that constrain nothing, with the given full price span.
    #[must_use]
    pub fn unconstrained(span: PriceRange) -> Self {
        Self {
            price_range: span,
            ..Self::default()
        }
    }

    /// The selected services.
    #[must_use]
    pub const fn services(&self) -> &BTreeSet<String> {
        &self.services
    }

    /// The selected districts.
    #[must_use]
    pub const fn districts(&self) -> &BTreeSet<String> {
        &self.districts
    }

    /// The price interval.
    #[must_use]
    pub const fn price_range(&self) -> PriceRange {
        self.price_range
    }

    /// The minimum rating threshold.
    #[must_use]
    pub const fn min_rating(&self) -> Rating {
        self.min_rating
    }

    /// The free-text query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether anything narrows the result beyond the given full span.
    #[must_use]
    pub fn is_constrained(&self, span: PriceRange) -> bool {
        !self.services.is_empty()
            || !self.districts.is_empty()
            || self.price_range != span
            || self.min_rating != Rating::ZERO
            || !self.query.is_empty()
    }

    /// Selects `service` if it is not selected, deselects it otherwise.
    #[must_use]
    pub fn toggle_service(&self, service: &str) -> Self {
        Self {
            services: toggled(&self.services, service),
            ..self.clone()
        }
    }

    /// Selects `district` if it is not selected, deselects it otherwise.
    #[must_use]
    pub fn toggle_district(&self, district: &str) -> Self {
        Self {
            districts: toggled(&self.districts, district),
            ..self.clone()
        }
    }

    /// Replaces the price interval.
    #[must_use]
    pub fn with_price_range(&self, price_range: PriceRange) -> Self {
        Self {
            price_range,
            ..self.clone()
        }
    }

    /// Replaces the minimum rating threshold.
    #[must_use]
    pub fn with_min_rating(&self, min_rating: Rating) -> Self {
        Self {
            min_rating,
            ..self.clone()
        }
    }

    /// Replaces the free-text query.
    #[must_use]
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self.clone()
        }
    }

    /// Decides whether `master` is part of the filtered result.
    #[must_use]
    pub fn matches(&self, master: &Master) -> bool {
        self.matches_query(master)
            && self.matches_services(master)
            && self.matches_district(master)
            && self.price_range.contains(master.price_per_hour)
            && master.rating >= self.min_rating
    }

    fn matches_query(&self, master: &Master) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let needle = self.query.to_lowercase();
        master.name().to_lowercase().contains(&needle)
            || master
                .specializations
                .iter()
                .any(|spec| spec.to_lowercase().contains(&needle))
    }

    fn matches_services(&self, master: &Master) -> bool {
        self.services.is_empty() || self.services.iter().any(|service| master.offers(service))
    }

    fn matches_district(&self, master: &Master) -> bool {
        self.districts.is_empty() || self.districts.contains(&master.district)
    }
}

fn toggled(set: &BTreeSet<String>, value: &str) -> BTreeSet<String> {
    let mut set = set.clone();
    if !set.remove(value) {
        set.insert(value.to_string());
    }
    set
}

#[cfg(test)]
mod tests {
    use non_empty_string::NonEmptyString;
    use nonempty::NonEmpty;
    use test_case::test_case;

    use super::*;
    use crate::domain::MasterId;

    fn master(name: &str, specs: &[&str], district: &str, price: u32, rating: u8) -> Master {
        Master {
            id: MasterId::new(1).unwrap(),
            name: NonEmptyString::new(name.to_string()).unwrap(),
            avatar: None,
            rating: Rating::new(rating).unwrap(),
            review_count: 10,
            specializations: NonEmpty::from_vec(specs.iter().map(ToString::to_string).collect())
                .unwrap(),
            district: district.to_string(),
            price_per_hour: price,
            experience: 3,
            is_online: true,
        }
    }

    fn petrov() -> Master {
        master(
            "Александр Петров",
            &["Сборка мебели", "Электрика", "Монтаж полок"],
            "Центральный",
            800,
            5,
        )
    }

    #[test]
    fn unconstrained_criteria_match_everything_in_span() {
        let criteria = Criteria::default();
        assert!(criteria.matches(&petrov()));
        assert!(!criteria.is_constrained(PriceRange::FULL));
    }

    #[test_case(""; "empty query")]
    #[test_case("петров"; "lowercase name fragment")]
    #[test_case("АЛЕКСАНДР"; "uppercase name fragment")]
    #[test_case("электрика"; "lowercase specialization")]
    #[test_case("ПОЛОК"; "uppercase specialization fragment")]
    fn query_matches_name_or_specialization(query: &str) {
        let criteria = Criteria::default().with_query(query);
        assert!(criteria.matches(&petrov()));
    }

    #[test_case("сантехника"; "unrelated specialization")]
    #[test_case("Иванов"; "other name")]
    #[test_case("Центральный"; "district is not searched")]
    fn query_rejects_non_matching_text(query: &str) {
        let criteria = Criteria::default().with_query(query);
        assert!(!criteria.matches(&petrov()));
    }

    #[test]
    fn any_selected_service_matches() {
        let criteria = Criteria::default()
            .toggle_service("Сантехника")
            .toggle_service("Электрика");
        assert!(criteria.matches(&petrov()));

        let criteria = Criteria::default().toggle_service("Сантехника");
        assert!(!criteria.matches(&petrov()));
    }

    #[test]
    fn service_selection_is_exact() {
        let criteria = Criteria::default().toggle_service("электрика");
        assert!(!criteria.matches(&petrov()));
    }

    #[test]
    fn district_must_be_selected_when_any_are() {
        let criteria = Criteria::default().toggle_district("Центральный");
        assert!(criteria.matches(&petrov()));

        let criteria = Criteria::default()
            .toggle_district("Северный")
            .toggle_district("Южный");
        assert!(!criteria.matches(&petrov()));
    }

    #[test_case(0, 10_000, true; "full span")]
    #[test_case(800, 800, true; "degenerate interval on price")]
    #[test_case(500, 800, true; "price at upper bound")]
    #[test_case(800, 1000, true; "price at lower bound")]
    #[test_case(0, 799, false; "price just above")]
    #[test_case(801, 2000, false; "price just below")]
    fn price_range_is_inclusive(min: u32, max: u32, included: bool) {
        let range = PriceRange::new(min, max).unwrap();
        let criteria = Criteria::default().with_price_range(range);
        assert_eq!(criteria.matches(&petrov()), included);
    }

    #[test_case(0, true; "no threshold")]
    #[test_case(4, true; "below rating")]
    #[test_case(5, true; "equal to rating")]
    fn rating_threshold_is_inclusive(threshold: u8, included: bool) {
        let criteria = Criteria::default().with_min_rating(Rating::new(threshold).unwrap());
        assert_eq!(criteria.matches(&petrov()), included);
    }

    #[test]
    fn rating_threshold_excludes_lower_ratings() {
        let three_stars = master("Олег Кузнецов", &["Покраска"], "Советский", 400, 3);
        let criteria = Criteria::default().with_min_rating(Rating::new(4).unwrap());
        assert!(!criteria.matches(&three_stars));
    }

    #[test]
    fn all_clauses_must_hold() {
        let criteria = Criteria::default()
            .with_query("электр")
            .toggle_service("Сборка мебели")
            .toggle_district("Центральный")
            .with_price_range(PriceRange::new(500, 1000).unwrap())
            .with_min_rating(Rating::new(4).unwrap());
        assert!(criteria.matches(&petrov()));

        // Each clause on its own is enough to exclude.
        assert!(!criteria.with_query("покраска").matches(&petrov()));
        assert!(
            !criteria
                .toggle_district("Центральный")
                .toggle_district("Южный")
                .matches(&petrov())
        );
        assert!(
            !criteria
                .with_price_range(PriceRange::new(1000, 2000).unwrap())
                .matches(&petrov())
        );
    }

    #[test]
    fn toggling_twice_restores_the_original() {
        let original = Criteria::default().toggle_service("Покраска");

        assert_eq!(
            original
                .toggle_service("Электрика")
                .toggle_service("Электрика"),
            original
        );
        assert_eq!(
            original.toggle_service("Покраска").toggle_service("Покраска"),
            original
        );
        assert_eq!(
            original
                .toggle_district("Северный")
                .toggle_district("Северный"),
            original
        );
    }

    #[test]
    fn selections_iterate_in_sorted_order() {
        let criteria = Criteria::default()
            .toggle_service("Электрика")
            .toggle_service("Покраска")
            .toggle_service("Сантехника");
        let services: Vec<&str> = criteria.services().iter().map(String::as_str).collect();
        assert_eq!(services, ["Покраска", "Сантехника", "Электрика"]);

        let reversed = Criteria::default()
            .toggle_service("Сантехника")
            .toggle_service("Покраска")
            .toggle_service("Электрика");
        assert_eq!(reversed, criteria);
    }

    #[test]
    fn mutations_leave_the_previous_value_untouched() {
        let before = Criteria::default();
        let after = before
            .toggle_service("Электрика")
            .toggle_district("Южный")
            .with_query("петров")
            .with_min_rating(Rating::new(3).unwrap());

        assert_eq!(before, Criteria::default());
        assert!(after.services().contains("Электрика"));
        assert!(after.districts().contains("Южный"));
        assert_eq!(after.query(), "петров");
        assert_eq!(after.min_rating().get(), 3);
    }

    #[test]
    fn unconstrained_uses_the_given_span() {
        let span = PriceRange::new(0, 5000).unwrap();
        let criteria = Criteria::unconstrained(span);
        assert_eq!(criteria.price_range(), span);
        assert!(!criteria.is_constrained(span));
        assert!(criteria.is_constrained(PriceRange::FULL));
    }

    #[test]
    fn inverted_price_range_is_rejected() {
        assert_eq!(
            PriceRange::new(1000, 500),
            Err(InvalidPriceRangeError::Inverted {
                min: 1000,
                max: 500
            })
        );
    }

    #[test_case("500-1000", 500, 1000; "plain")]
    #[test_case(" 0 - 500 ", 0, 500; "with spaces")]
    fn price_range_parses(input: &str, min: u32, max: u32) {
        let range: PriceRange = input.parse().unwrap();
        assert_eq!((range.min(), range.max()), (min, max));
    }

    #[test_case("500"; "single number")]
    #[test_case("cheap-expensive"; "not numbers")]
    #[test_case("1000-500"; "inverted")]
    fn price_range_parse_failures(input: &str) {
        assert!(input.parse::<PriceRange>().is_err());
    }
}
