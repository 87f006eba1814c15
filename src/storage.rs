use std::{io, path::PathBuf};

use crate::domain::{InvalidMasterIdError, InvalidRatingError, MasterId, UnknownStatusError};

pub mod catalogue;
/// Serialized catalogue records.
pub mod record;

pub use catalogue::Catalogue;
pub use record::{CatalogueFile, MasterRecord, ProfileRecord, ReviewRecord};

/// Errors that can occur loading a catalogue.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The catalogue file could not be read.
    #[error("Failed to read catalogue {}: {source}", path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The catalogue is not valid YAML, or does not have the expected shape.
    #[error("Failed to parse catalogue: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A master has an invalid identifier.
    #[error(transparent)]
    InvalidId(#[from] InvalidMasterIdError),
    /// Two masters share an identifier.
    #[error("Duplicate master id {0}")]
    DuplicateId(MasterId),
    /// A master has an empty name.
    #[error("Master {0} has an empty name")]
    EmptyName(MasterId),
    /// A master lists no specializations.
    #[error("Master {0} lists no specializations")]
    NoSpecializations(MasterId),
    /// A master or one of their reviews has a rating outside 0..=5.
    #[error("Master {id}: {source}")]
    InvalidRating {
        /// The master the rating belongs to.
        id: MasterId,
        /// The rating error.
        source: InvalidRatingError,
    },
    /// A profile has an unrecognised status.
    #[error("Master {id}: {source}")]
    InvalidStatus {
        /// The master the profile belongs to.
        id: MasterId,
        /// The status error.
        source: UnknownStatusError,
    },
}
