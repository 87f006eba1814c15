use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::Master;

/// The orderings offered for the view list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Highest rated first; ties broken by the larger review count.
    #[default]
    Rating,
    /// Cheapest first.
    #[serde(alias = "price-ascending")]
    PriceAsc,
    /// Most expensive first.
    #[serde(alias = "price-descending")]
    PriceDesc,
    /// Most experienced first.
    Experience,
}

impl SortKey {
    /// Every sort key, in the order they are offered to the user.
    pub const ALL: [Self; 4] = [
        Self::Rating,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::Experience,
    ];

    /// The canonical key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Experience => "experience",
        }
    }

    /// The label shown in the sort selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rating => "По рейтингу",
            Self::PriceAsc => "Цена: по возрастанию",
            Self::PriceDesc => "Цена: по убыванию",
            Self::Experience => "По опыту",
        }
    }

    /// Parses a key name, returning `None` for anything unrecognised.
    ///
    /// An unrecognised key leaves the filtered order unchanged rather than
    /// being an error, so callers pass the `Option` straight to [`sort`].
    #[must_use]
    pub fn parse_lenient(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Compares two masters under this key.
    #[must_use]
    pub fn compare(self, a: &Master, b: &Master) -> Ordering {
        match self {
            Self::Rating => b
                .rating
                .cmp(&a.rating)
                .then_with(|| b.review_count.cmp(&a.review_count)),
            Self::PriceAsc => a.price_per_hour.cmp(&b.price_per_hour),
            Self::PriceDesc => b.price_per_hour.cmp(&a.price_per_hour),
            Self::Experience => b.experience.cmp(&a.experience),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Ok(Self::Rating),
            "price-asc" | "price-ascending" => Ok(Self::PriceAsc),
            "price-desc" | "price-descending" => Ok(Self::PriceDesc),
            "experience" => Ok(Self::Experience),
            _ => Err(UnknownSortKeyError(s.to_string())),
        }
    }
}

/// Error returned when a sort key name is not recognised.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown sort key '{0}': expected one of rating, price-asc, price-desc, experience")]
pub struct UnknownSortKeyError(String);

/// Orders `masters` in place by `key`.
///
/// The sort is stable: masters that compare equal keep their relative order.
/// With no key the order is left untouched.
pub fn sort(masters: &mut [&Master], key: Option<SortKey>) {
    if let Some(key) = key {
        masters.sort_by(|a, b| key.compare(a, b));
    }
}
