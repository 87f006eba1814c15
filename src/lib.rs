//! A searchable, filterable directory of handyman masters.
//!
//! The directory lists masters, narrows them down by free-text search and
//! facet filters, orders them by a chosen sort key, and shows a detailed
//! profile for each.

pub mod domain;
pub use domain::{
    Action, Config, Criteria, DirectoryView, Master, MasterId, MasterProfile, PriceRange, Rating,
    SortKey,
};

/// Loading masters and their profiles into memory.
pub mod storage;
pub use storage::{Catalogue, LoadError};
