use clap::Parser;
use handyman::{Config, Criteria, Master, SortKey};
use tracing::instrument;

use super::{Context, CriteriaArgs, render, terminal::Colorize};

/// Command arguments for `handyman facets`.
#[derive(Debug, Parser)]
#[command(about = "Show the available filters and how many masters each matches")]
pub struct Facets {
    #[command(flatten)]
    criteria: CriteriaArgs,
}

impl Facets {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let criteria = self.criteria.criteria(&context.config)?;
        println!(
            "{}",
            render_facets(&context.config, &criteria, context.catalogue.masters())
        );
        Ok(())
    }
}

fn marker(active: bool) -> String {
    if active { "●".accent() } else { "○".dim() }
}

fn count(masters: &[Master], predicate: impl Fn(&Master) -> bool) -> usize {
    masters.iter().filter(|master| predicate(master)).count()
}

/// The filter panel: each facet's values, marked when active, with the
/// number of catalogue masters the value alone would match.
fn render_facets(config: &Config, criteria: &Criteria, masters: &[Master]) -> String {
    let mut lines = Vec::new();

    lines.push("Services".dim());
    for service in config.services() {
        lines.push(format!(
            "  {} {service} ({})",
            marker(criteria.services().contains(service)),
            count(masters, |master| master.offers(service))
        ));
    }

    lines.push(format!("\n{}", "Districts".dim()));
    for district in config.districts() {
        lines.push(format!(
            "  {} {district} ({})",
            marker(criteria.districts().contains(district)),
            count(masters, |master| &master.district == district)
        ));
    }

    lines.push(format!("\n{}", "Price per hour".dim()));
    for preset in config.price_presets() {
        lines.push(format!(
            "  {} {} ({})",
            marker(criteria.price_range() == preset.range),
            preset.label,
            count(masters, |master| preset.range.contains(master.price_per_hour))
        ));
    }
    let custom = criteria.price_range() != config.price_span()
        && !config
            .price_presets()
            .iter()
            .any(|preset| preset.range == criteria.price_range());
    if custom {
        let range = criteria.price_range();
        lines.push(format!(
            "  {} {} - {} ({})",
            marker(true),
            render::price(range.min()),
            render::price(range.max()),
            count(masters, |master| range.contains(master.price_per_hour))
        ));
    }

    lines.push(format!("\n{}", "Rating".dim()));
    for threshold in config.rating_thresholds() {
        lines.push(format!(
            "  {} {} and above ({})",
            marker(criteria.min_rating() == *threshold),
            render::stars(*threshold),
            count(masters, |master| master.rating >= *threshold)
        ));
    }

    lines.push(format!("\n{}", "Sort".dim()));
    for key in SortKey::ALL {
        lines.push(format!(
            "  {} {} ({})",
            marker(key == config.default_sort),
            key.as_str(),
            key.label()
        ));
    }

    if !criteria.query().is_empty() {
        lines.push(format!("\nSearch: \"{}\"", criteria.query()));
    }
    if criteria.is_constrained(config.price_span()) {
        lines.push(format!(
            "\n{}",
            "Filters are active; run without filter flags to clear them".dim()
        ));
    }

    lines.join("\n")
}
