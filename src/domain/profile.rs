// MasterProfile - a borrowed view joining a listing record with its detail.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::domain::{Master, MasterId, Rating};

/// Whether a master can currently take on work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Free to take bookings.
    #[default]
    Available,
    /// Working on another job.
    Busy,
    /// Not reachable.
    Offline,
}

impl Status {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Available, Self::Busy, Self::Offline];

    /// The machine-readable name, as used in catalogue files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Offline => "offline",
        }
    }

    /// The human-readable label shown on a profile.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Свободен",
            Self::Busy => "Занят",
            Self::Offline => "Не в сети",
        }
    }

    /// Only available masters can be booked.
    #[must_use]
    pub const fn is_bookable(self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatusError(s.to_string()))
    }
}

/// Error returned when parsing an unrecognised status.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown status '{0}': expected one of available, busy, offline")]
pub struct UnknownStatusError(String);

/// A client review of a master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Identifier, unique within one master's reviews.
    pub id: u32,
    /// Display name of the reviewer.
    pub author: String,
    /// Stars given.
    pub rating: Rating,
    /// Review text.
    pub text: String,
    /// When the review was left.
    pub date: NaiveDate,
}

/// The descriptive part of a master's profile.
///
/// None of these fields take part in filtering or sorting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileDetails {
    /// Current availability.
    pub status: Status,
    /// Contact phone number.
    pub phone: String,
    /// Free-text biography.
    pub description: String,
    /// Number of jobs completed through the marketplace.
    pub completed_jobs: u32,
    /// When the master joined, as displayed (typically a year).
    pub join_date: String,
    /// Working hours, as displayed.
    pub working_hours: String,
    /// Portfolio image references.
    pub portfolio: Vec<String>,
    /// Client reviews, newest first.
    pub reviews: Vec<Review>,
}

/// A borrowed view of a master's full profile.
///
/// Joins the listing record with its detail so the profile page can be
/// rendered without cloning either.
#[derive(Debug, Clone, Copy)]
pub struct MasterProfile<'a> {
    /// The listing record.
    pub master: &'a Master,
    /// The descriptive detail.
    pub details: &'a ProfileDetails,
}

impl MasterProfile<'_> {
    /// Request a booking.
    ///
    /// Booking is only acknowledged here; processing it is somebody else's
    /// job.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Unavailable`] if the master's status does not
    /// allow bookings.
    pub fn book(&self) -> Result<BookingRequest, BookingError> {
        if !self.details.status.is_bookable() {
            return Err(BookingError::Unavailable {
                name: self.master.name().to_string(),
                status: self.details.status,
            });
        }

        Ok(BookingRequest {
            master: self.master.id,
            name: self.master.name().to_string(),
            price_per_hour: self.master.price_per_hour,
        })
    }
}

/// An acknowledged booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Who was booked.
    pub master: MasterId,
    /// Their display name.
    pub name: String,
    /// Their hourly price at the time of booking.
    pub price_per_hour: u32,
}

/// Error returned when a master cannot be booked.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BookingError {
    /// The master is busy or offline.
    #[error("{name} is unavailable ({})", status.label())]
    Unavailable {
        /// The master's name.
        name: String,
        /// The status that prevents booking.
        status: Status,
    },
}

#[cfg(test)]
mod tests {
    use non_empty_string::NonEmptyString;
    use nonempty::nonempty;
    use test_case::test_case;

    use super::*;

    fn master() -> Master {
        Master {
            id: MasterId::new(1).unwrap(),
            name: NonEmptyString::new("Александр Петров".to_string()).unwrap(),
            avatar: None,
            rating: Rating::MAX,
            review_count: 47,
            specializations: nonempty!["Электрика".to_string()],
            district: "Центральный".to_string(),
            price_per_hour: 800,
            experience: 5,
            is_online: true,
        }
    }

    #[test_case("available", Status::Available; "available")]
    #[test_case("BUSY", Status::Busy; "uppercase busy")]
    #[test_case(" offline ", Status::Offline; "padded offline")]
    fn status_parses(input: &str, expected: Status) {
        assert_eq!(input.parse::<Status>().unwrap(), expected);
    }

    #[test]
    fn unknown_status_is_an_error() {
        assert!("away".parse::<Status>().is_err());
    }

    #[test]
    fn available_master_can_be_booked() {
        let master = master();
        let details = ProfileDetails::default();
        let profile = MasterProfile {
            master: &master,
            details: &details,
        };

        let request = profile.book().unwrap();
        assert_eq!(request.master, master.id);
        assert_eq!(request.price_per_hour, 800);
    }

    #[test_case(Status::Busy; "busy")]
    #[test_case(Status::Offline; "offline")]
    fn unavailable_master_cannot_be_booked(status: Status) {
        let master = master();
        let details = ProfileDetails {
            status,
            ..ProfileDetails::default()
        };
        let profile = MasterProfile {
            master: &master,
            details: &details,
        };

        let error = profile.book().unwrap_err();
        assert_eq!(
            error,
            BookingError::Unavailable {
                name: "Александр Петров".to_string(),
                status,
            }
        );
    }
}
