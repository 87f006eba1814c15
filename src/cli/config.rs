use std::path::Path;

use anyhow::Context as _;
use handyman::{Config, PriceRange, SortKey};
use tracing::{info, instrument};

use crate::cli::terminal::Colorize;

const KEYS: &str = "price_span\n  default_sort\n  services\n  districts\n  price_presets\n  \
                    rating_thresholds";

#[derive(Debug, clap::Parser)]
/// Show or modify configuration settings
///
/// Configuration is stored in handyman.toml (see --config) and controls the
/// filter vocabularies and listing defaults. A missing file means defaults.
///
/// Settable keys:
///   `price_span`    The "no constraint" price interval, as MIN-MAX
///   `default_sort`  rating, price-asc, price-desc or experience
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        ///
        /// Available keys: `price_span`, `default_sort`, services, districts,
        /// `price_presets`, `rating_thresholds`
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   handyman config set `default_sort` price-asc
    ///   handyman config set `price_span` 0-5000
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let mut config = Config::load_or_default(config_path)?;

        match self.command {
            ConfigCommand::Show => println!("{}", show(&config)),
            ConfigCommand::Get { key } => println!("{}", get(&config, &key)?),
            ConfigCommand::Set { key, value } => {
                set(&mut config, &key, &value)?;
                config.save(config_path)?;
                info!("Saved configuration to {}", config_path.display());
                println!("{} {key} = {value}", "✓".success());
            }
        }
        Ok(())
    }
}

fn show(config: &Config) -> String {
    let mut lines = vec!["Configuration:".to_string()];
    lines.push(format!(
        "  price_span: {} {}",
        config.price_span(),
        "(restored by clearing filters)".dim()
    ));
    lines.push(format!(
        "  default_sort: {} {}",
        config.default_sort,
        format!("({})", config.default_sort.label()).dim()
    ));
    lines.push(format!("  services: {}", config.services().join(", ")));
    lines.push(format!("  districts: {}", config.districts().join(", ")));
    lines.push(format!(
        "  price_presets: {}",
        config
            .price_presets()
            .iter()
            .map(|preset| format!("{} [{}]", preset.label, preset.range))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    lines.push(format!(
        "  rating_thresholds: {}",
        config
            .rating_thresholds()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    ));
    lines.join("\n")
}

fn get(config: &Config, key: &str) -> anyhow::Result<String> {
    let value = match key {
        "price_span" => config.price_span().to_string(),
        "default_sort" => config.default_sort.to_string(),
        "services" => config.services().join("\n"),
        "districts" => config.districts().join("\n"),
        "price_presets" => config
            .price_presets()
            .iter()
            .map(|preset| format!("{}\t{}", preset.label, preset.range))
            .collect::<Vec<_>>()
            .join("\n"),
        "rating_thresholds" => config
            .rating_thresholds()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => anyhow::bail!("Unknown configuration key: '{key}'\n\nAvailable keys:\n  {KEYS}"),
    };
    Ok(value)
}

fn set(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "price_span" => {
            let span: PriceRange = value
                .parse()
                .with_context(|| format!("invalid price span '{value}', expected MIN-MAX"))?;
            config.set_price_span(span);
        }
        "default_sort" => {
            config.default_sort = value.parse::<SortKey>()?;
        }
        "services" | "districts" | "price_presets" | "rating_thresholds" => {
            anyhow::bail!("'{key}' is a list; edit the configuration file to change it");
        }
        _ => anyhow::bail!("Unknown configuration key: '{key}'\n\nAvailable keys:\n  {KEYS}"),
    }
    Ok(())
}
