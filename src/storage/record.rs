use chrono::NaiveDate;
use non_empty_string::NonEmptyString;
use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Master, MasterId, ProfileDetails, Rating, Review, Status},
    storage::LoadError,
};

/// The on-disk shape of a catalogue file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogueFile {
    /// Every listed master.
    #[serde(default)]
    pub masters: Vec<MasterRecord>,
}

/// A master as stored in a catalogue file.
///
/// Field names follow the camel case used by the listing front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterRecord {
    /// Positive identifier, unique within the file.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Avatar image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Stars, 0 to 5.
    pub rating: u8,
    /// Number of reviews.
    #[serde(default)]
    pub review_count: u32,
    /// Services offered. Must not be empty.
    pub specializations: Vec<String>,
    /// District worked in.
    pub district: String,
    /// Hourly price in roubles.
    pub price_per_hour: u32,
    /// Years of experience.
    #[serde(default)]
    pub experience: u32,
    /// Whether the master is online.
    #[serde(default)]
    pub is_online: bool,
    /// Extended profile detail, if published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileRecord>,
}

/// The descriptive part of a profile as stored in a catalogue file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// `available`, `busy` or `offline`.
    #[serde(default = "default_status")]
    pub status: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Biography.
    #[serde(default)]
    pub description: String,
    /// Jobs completed.
    #[serde(default)]
    pub completed_jobs: u32,
    /// Join date as displayed.
    #[serde(default)]
    pub join_date: String,
    /// Working hours as displayed.
    #[serde(default)]
    pub working_hours: String,
    /// Portfolio image references.
    #[serde(default)]
    pub portfolio: Vec<String>,
    /// Client reviews.
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,
}

/// A review as stored in a catalogue file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Identifier.
    pub id: u32,
    /// Reviewer name.
    pub author: String,
    /// Stars, 0 to 5.
    pub rating: u8,
    /// Review text.
    pub text: String,
    /// ISO date, e.g. `2024-05-15`.
    pub date: NaiveDate,
}

fn default_status() -> String {
    Status::default().as_str().to_string()
}

impl MasterRecord {
    /// Validates the record and splits it into the listing record and its
    /// optional profile detail.
    pub(crate) fn into_domain(self) -> Result<(Master, Option<ProfileDetails>), LoadError> {
        let id = MasterId::new(self.id)?;

        let name = NonEmptyString::new(self.name).map_err(|_| LoadError::EmptyName(id))?;
        let rating =
            Rating::new(self.rating).map_err(|source| LoadError::InvalidRating { id, source })?;
        let specializations =
            NonEmpty::from_vec(self.specializations).ok_or(LoadError::NoSpecializations(id))?;

        let details = self
            .profile
            .map(|profile| profile.into_domain(id))
            .transpose()?;

        let master = Master {
            id,
            name,
            avatar: self.avatar,
            rating,
            review_count: self.review_count,
            specializations,
            district: self.district,
            price_per_hour: self.price_per_hour,
            experience: self.experience,
            is_online: self.is_online,
        };

        Ok((master, details))
    }
}

impl ProfileRecord {
    fn into_domain(self, id: MasterId) -> Result<ProfileDetails, LoadError> {
        let status = self
            .status
            .parse::<Status>()
            .map_err(|source| LoadError::InvalidStatus { id, source })?;

        let reviews = self
            .reviews
            .into_iter()
            .map(|review| -> Result<Review, LoadError> {
                let rating = Rating::new(review.rating)
                    .map_err(|source| LoadError::InvalidRating { id, source })?;
                Ok(Review {
                    id: review.id,
                    author: review.author,
                    rating,
                    text: review.text,
                    date: review.date,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProfileDetails {
            status,
            phone: self.phone,
            description: self.description,
            completed_jobs: self.completed_jobs,
            join_date: self.join_date,
            working_hours: self.working_hours,
            portfolio: self.portfolio,
            reviews,
        })
    }
}
