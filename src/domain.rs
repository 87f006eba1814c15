//! Domain models for the masters directory.
//!
//! This module contains the core domain types: the listed masters and their
//! profiles, the filter criteria and sort keys, the derivation of the view
//! list, and configuration.

/// Listed masters, their identifiers and ratings.
pub mod master;
pub use master::{InvalidMasterIdError, InvalidRatingError, Master, MasterId, Rating};

/// Extended profile detail, reviews and booking.
pub mod profile;
pub use profile::{
    BookingError, BookingRequest, MasterProfile, ProfileDetails, Review, Status,
    UnknownStatusError,
};

pub mod criteria;
pub use criteria::{Criteria, InvalidPriceRangeError, PriceRange};

/// Sort keys for the view list.
pub mod sort;
pub use sort::{SortKey, UnknownSortKeyError};

pub mod view;
pub use view::{Action, DirectoryView, derive, filter};

mod config;
pub use config::{Config, ConfigError, InvalidConfigError, PricePreset};
