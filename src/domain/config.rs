use std::{io, path::Path};

use serde::{Deserialize, Serialize};

use crate::domain::{
    InvalidRatingError, Rating, SortKey,
    criteria::{InvalidPriceRangeError, PriceRange},
};

/// A named price interval offered by the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricePreset {
    /// The label shown to the user, e.g. "500-1000₽".
    pub label: String,
    /// The interval the preset selects.
    pub range: PriceRange,
}

/// Configuration for the directory.
///
/// This struct holds the facet vocabularies offered by the filter panel and
/// the defaults the listing starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// The full price span.
    ///
    /// This is the "no constraint" price interval restored by clearing all
    /// filters.
    price_span: PriceRange,

    /// The sort key the listing starts with.
    pub default_sort: SortKey,

    /// The services offered as filter badges.
    services: Vec<String>,

    /// The districts offered as filter badges.
    districts: Vec<String>,

    /// The price presets offered by the filter panel.
    price_presets: Vec<PricePreset>,

    /// The minimum-rating thresholds offered by the filter panel.
    rating_thresholds: Vec<Rating>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            price_span: PriceRange::FULL,
            default_sort: SortKey::default(),
            services: default_services(),
            districts: default_districts(),
            price_presets: default_price_presets()
                .into_iter()
                .filter_map(|preset| {
                    let range = PriceRange::new(preset.min, preset.max).ok()?;
                    Some(PricePreset {
                        label: preset.label,
                        range,
                    })
                })
                .collect(),
            rating_thresholds: default_rating_thresholds()
                .into_iter()
                .filter_map(|value| Rating::new(value).ok())
                .collect(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Loads the configuration at `path`, or the defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// Returns the full price span.
    #[must_use]
    pub const fn price_span(&self) -> PriceRange {
        self.price_span
    }

    /// Sets the full price span.
    pub const fn set_price_span(&mut self, span: PriceRange) {
        self.price_span = span;
    }

    /// Returns the services offered as filters.
    #[must_use]
    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// Returns the districts offered as filters.
    #[must_use]
    pub fn districts(&self) -> &[String] {
        &self.districts
    }

    /// Returns the price presets.
    #[must_use]
    pub fn price_presets(&self) -> &[PricePreset] {
        &self.price_presets
    }

    /// Returns the minimum-rating thresholds.
    #[must_use]
    pub fn rating_thresholds(&self) -> &[Rating] {
        &self.rating_thresholds
    }

    /// Resolves a price selection given either as a preset label or as
    /// `MIN-MAX`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is neither a known preset label nor a
    /// valid interval.
    pub fn resolve_price(&self, value: &str) -> Result<PriceRange, InvalidPriceRangeError> {
        self.price_presets
            .iter()
            .find(|preset| preset.label == value.trim())
            .map_or_else(|| value.parse(), |preset| Ok(preset.range))
    }
}

/// Errors that can occur reading or writing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] io::Error),
    /// The file is not valid configuration.
    #[error("Failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),
    /// The configuration could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),
    /// The file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] io::Error),
}

/// Errors in the content of an otherwise well-formed configuration file.
#[derive(Debug, thiserror::Error)]
pub enum InvalidConfigError {
    /// A price interval is inverted.
    #[error(transparent)]
    PriceRange(#[from] InvalidPriceRangeError),
    /// A rating threshold is out of range.
    #[error(transparent)]
    Rating(#[from] InvalidRatingError),
}

fn default_services() -> Vec<String> {
    [
        "Сборка мебели",
        "Электрика",
        "Сантехника",
        "Ремонт техники",
        "Монтаж полок",
        "Покраска",
        "Установка светильников",
        "Мелкий ремонт",
    ]
    .map(String::from)
    .to_vec()
}

fn default_districts() -> Vec<String> {
    [
        "Центральный",
        "Северный",
        "Южный",
        "Восточный",
        "Западный",
        "Советский",
        "Ленинский",
        "Октябрьский",
    ]
    .map(String::from)
    .to_vec()
}

fn default_price_presets() -> Vec<PresetV1> {
    [
        ("До 500₽", 0, 500),
        ("500-1000₽", 500, 1000),
        ("1000-2000₽", 1000, 2000),
        ("2000₽+", 2000, 10_000),
    ]
    .into_iter()
    .map(|(label, min, max)| PresetV1 {
        label: label.to_string(),
        min,
        max,
    })
    .collect()
}

fn default_rating_thresholds() -> Vec<u8> {
    vec![4, 3, 2, 1]
}

const fn default_price_span() -> [u32; 2] {
    [PriceRange::FULL.min(), PriceRange::FULL.max()]
}

/// A price preset as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PresetV1 {
    label: String,
    min: u32,
    max: u32,
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        /// The full price span as `[min, max]`.
        #[serde(default = "default_price_span")]
        price_span: [u32; 2],

        #[serde(default)]
        default_sort: SortKey,

        #[serde(default = "default_services")]
        services: Vec<String>,

        #[serde(default = "default_districts")]
        districts: Vec<String>,

        #[serde(default = "default_price_presets")]
        price_presets: Vec<PresetV1>,

        #[serde(default = "default_rating_thresholds")]
        rating_thresholds: Vec<u8>,
    },
}

impl TryFrom<Versions> for Config {
    type Error = InvalidConfigError;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                price_span: [min, max],
                default_sort,
                services,
                districts,
                price_presets,
                rating_thresholds,
            } => {
                let price_presets = price_presets
                    .into_iter()
                    .map(|preset| -> Result<PricePreset, InvalidPriceRangeError> {
                        Ok(PricePreset {
                            range: PriceRange::new(preset.min, preset.max)?,
                            label: preset.label,
                        })
                    })
                    .collect::<Result<_, InvalidPriceRangeError>>()?;

                let rating_thresholds = rating_thresholds
                    .into_iter()
                    .map(Rating::new)
                    .collect::<Result<_, _>>()?;

                Ok(Self {
                    price_span: PriceRange::new(min, max)?,
                    default_sort,
                    services,
                    districts,
                    price_presets,
                    rating_thresholds,
                })
            }
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            price_span: [config.price_span.min(), config.price_span.max()],
            default_sort: config.default_sort,
            services: config.services,
            districts: config.districts,
            price_presets: config
                .price_presets
                .into_iter()
                .map(|preset| PresetV1 {
                    label: preset.label,
                    min: preset.range.min(),
                    max: preset.range.max(),
                })
                .collect(),
            rating_thresholds: config
                .rating_thresholds
                .into_iter()
                .map(u8::from)
                .collect(),
        }
    }
}
