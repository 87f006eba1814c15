//! An in-memory catalogue of masters.
//!
//! The [`Catalogue`] is the record source behind both pages: it supplies the
//! full list of masters for the directory and, separately, the profile detail
//! for a given identifier. It is read-only once loaded.

use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use tracing::{debug, info};

use crate::{
    domain::{Master, MasterId, MasterProfile, ProfileDetails},
    storage::{
        LoadError,
        record::{CatalogueFile, MasterRecord},
    },
};

/// The catalogue shipped with the binary.
const BUILTIN: &str = include_str!("seed.yaml");

/// A read-only set of masters and their profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    masters: Vec<Master>,
    details: HashMap<MasterId, ProfileDetails>,
}

impl Catalogue {
    /// The built-in catalogue.
    ///
    /// # Panics
    ///
    /// Panics if the embedded seed data is invalid, which is covered by tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_yaml(BUILTIN).expect("the built-in catalogue must be valid")
    }

    /// Loads a catalogue from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// contains invalid records (see [`Catalogue::from_records`]).
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalogue = Self::from_yaml(&content)?;
        info!(
            "Loaded {} masters from {}",
            catalogue.len(),
            path.display()
        );
        Ok(catalogue)
    }

    /// Parses a catalogue from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML or contains invalid
    /// records.
    pub fn from_yaml(content: &str) -> Result<Self, LoadError> {
        let file: CatalogueFile = serde_yaml::from_str(content)?;
        Self::from_records(file.masters)
    }

    /// Builds a catalogue from raw records, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier is zero or repeated, a name is
    /// empty, a rating is out of range, a master lists no specializations, or
    /// a profile status is unknown.
    pub fn from_records(records: Vec<MasterRecord>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut masters = Vec::with_capacity(records.len());
        let mut details = HashMap::new();

        for record in records {
            let (master, profile) = record.into_domain()?;

            if !seen.insert(master.id) {
                return Err(LoadError::DuplicateId(master.id));
            }

            if let Some(profile) = profile {
                details.insert(master.id, profile);
            } else {
                debug!("master {} has no published profile", master.id);
            }

            masters.push(master);
        }

        Ok(Self { masters, details })
    }

    /// Every master, in catalogue order.
    #[must_use]
    pub fn masters(&self) -> &[Master] {
        &self.masters
    }

    /// The number of masters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.masters.len()
    }

    /// Whether the catalogue has no masters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masters.is_empty()
    }

    /// Finds a master's listing record by identifier.
    #[must_use]
    pub fn find(&self, id: MasterId) -> Option<&Master> {
        self.masters.iter().find(|master| master.id == id)
    }

    /// Looks up a master's full profile by identifier.
    ///
    /// Returns `None` if the master is unknown or has no published profile.
    #[must_use]
    pub fn profile(&self, id: MasterId) -> Option<MasterProfile<'_>> {
        let master = self.find(id)?;
        let details = self.details.get(&id)?;
        Some(MasterProfile { master, details })
    }
}
