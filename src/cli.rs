use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

mod browse;
mod config;
mod facets;
mod list;
mod render;
mod select;
mod show;
mod terminal;

use anyhow::Context as _;
use browse::Browse;
use clap::ArgAction;
use facets::Facets;
use handyman::{Catalogue, Config, Criteria, MasterId, PriceRange, Rating, SortKey};
use list::List;
use select::Select;
use show::Show;
use tracing::{debug, warn};

/// Parse a master identifier from a CLI argument.
fn parse_id(s: &str) -> Result<MasterId, String> {
    s.parse().map_err(|e| format!("{e}"))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = "handyman.toml", global = true)]
    config: PathBuf,

    /// A YAML catalogue to load instead of the built-in masters
    #[arg(long, value_name = "PATH", global = true)]
    catalogue: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let command = self
            .command
            .unwrap_or_else(|| Command::List(List::default()));

        if let Command::Config(command) = command {
            return command.run(&self.config);
        }

        let context = Context::load(&self.config, self.catalogue.as_deref())?;
        command.run(&context)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List masters matching the search and filters (default)
    #[command(alias = "ls")]
    List(List),

    /// Show a master's full profile
    Show(Show),

    /// Select a master from the current results
    Select(Select),

    /// Show the available filters and which are active
    Facets(Facets),

    /// Browse the directory interactively
    ///
    /// Every change to the search text, filters or sort order recomputes
    /// the results immediately.
    Browse(Browse),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Command {
    fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(context)?,
            Self::Show(command) => command.run(context)?,
            Self::Select(command) => command.run(context)?,
            Self::Facets(command) => command.run(context)?,
            Self::Browse(command) => command.run(context)?,
            Self::Config(_) => unreachable!("config is handled before loading the catalogue"),
        }
        Ok(())
    }
}

/// What every directory command works against.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub catalogue: Catalogue,
}

impl Context {
    fn load(config_path: &Path, catalogue_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = Config::load_or_default(config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?;

        let catalogue = match catalogue_path {
            Some(path) => Catalogue::load(path)?,
            None => {
                debug!("using the built-in catalogue");
                Catalogue::builtin()
            }
        };

        Ok(Self { config, catalogue })
    }
}

/// Search and filter flags shared by the directory commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CriteriaArgs {
    /// Search by master name or service (case-insensitive substring)
    #[arg(short, long)]
    query: Option<String>,

    /// Only masters offering any of these services (comma-separated)
    #[arg(short, long, value_delimiter = ',', value_name = "SERVICE")]
    service: Vec<String>,

    /// Only masters working in any of these districts (comma-separated)
    #[arg(short, long, value_delimiter = ',', value_name = "DISTRICT")]
    district: Vec<String>,

    /// Price per hour: a preset label (e.g. "500-1000₽") or MIN-MAX
    #[arg(short, long, value_name = "RANGE")]
    price: Option<String>,

    /// Lowest price per hour (overrides the lower bound of --price)
    #[arg(long, value_name = "RUB")]
    min_price: Option<u32>,

    /// Highest price per hour (overrides the upper bound of --price)
    #[arg(long, value_name = "RUB")]
    max_price: Option<u32>,

    /// Minimum rating, 0 to 5 (0 = any)
    #[arg(short = 'r', long, value_name = "STARS")]
    min_rating: Option<Rating>,
}

impl CriteriaArgs {
    /// Builds criteria by applying each flag, in turn, to unconstrained
    /// criteria.
    pub fn criteria(&self, config: &Config) -> anyhow::Result<Criteria> {
        let span = config.price_span();
        let mut criteria = Criteria::unconstrained(span);

        if let Some(query) = &self.query {
            criteria = criteria.with_query(query.as_str());
        }

        for service in self.service.iter().collect::<BTreeSet<_>>() {
            if !config.services().contains(service) {
                warn!("'{service}' is not one of the configured services");
            }
            criteria = criteria.toggle_service(service);
        }

        for district in self.district.iter().collect::<BTreeSet<_>>() {
            if !config.districts().contains(district) {
                warn!("'{district}' is not one of the configured districts");
            }
            criteria = criteria.toggle_district(district);
        }

        let price = self.price_range(config)?;
        criteria = criteria.with_price_range(price);

        if let Some(rating) = self.min_rating {
            criteria = criteria.with_min_rating(rating);
        }

        Ok(criteria)
    }

    fn price_range(&self, config: &Config) -> anyhow::Result<PriceRange> {
        let base = match &self.price {
            Some(value) => config
                .resolve_price(value)
                .with_context(|| format!("invalid --price '{value}'"))?,
            None => config.price_span(),
        };

        if self.min_price.is_none() && self.max_price.is_none() {
            return Ok(base);
        }

        let range = PriceRange::new(
            self.min_price.unwrap_or_else(|| base.min()),
            self.max_price.unwrap_or_else(|| base.max()),
        )?;
        Ok(range)
    }
}

/// Resolves the sort key flag.
///
/// No flag means the configured default. An unrecognised key keeps the
/// catalogue order.
fn resolve_sort(name: Option<&str>, config: &Config) -> Option<SortKey> {
    let Some(name) = name else {
        return Some(config.default_sort);
    };

    let key = SortKey::parse_lenient(name);
    if key.is_none() {
        warn!("unknown sort key '{name}', keeping catalogue order");
    }
    key
}
