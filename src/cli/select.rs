use clap::Parser;
use handyman::{DirectoryView, Master, MasterId};
use tracing::{info, instrument};

use super::{Context, CriteriaArgs, render, resolve_sort, terminal::Colorize};

/// Command arguments for `handyman select`.
///
/// Selection works against the current results, so the same search and
/// filter flags as `list` apply.
#[derive(Debug, Parser)]
#[command(about = "Select a master from the current results")]
pub struct Select {
    /// The identifier of the master to select
    #[clap(value_parser = super::parse_id)]
    id: MasterId,

    #[command(flatten)]
    criteria: CriteriaArgs,

    /// Sort key (default from config)
    #[arg(long, value_name = "KEY")]
    sort: Option<String>,
}

impl Select {
    #[instrument(level = "debug", skip(self, context), fields(id = %self.id))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let criteria = self.criteria.criteria(&context.config)?;
        let sort_key = resolve_sort(self.sort.as_deref(), &context.config);
        let directory = DirectoryView::with_criteria(
            context.catalogue.masters(),
            context.config.price_span(),
            criteria,
            sort_key,
        );

        let Some(master) = directory.select(self.id) else {
            if context.catalogue.find(self.id).is_some() {
                anyhow::bail!(
                    "Master {} is not among the current results; adjust the filters",
                    self.id
                );
            }
            anyhow::bail!("Master {} not found", self.id);
        };

        info!(master = %master.id, "master selected");
        println!("{}", summary(master));
        Ok(())
    }
}

/// What the caller learns about a selected master.
pub fn summary(master: &Master) -> String {
    [
        format!("{} {}", "Selected master:".success(), master.name()),
        format!(
            "  Specializations: {}",
            master
                .specializations
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        format!("  Price: {}/hour", render::price(master.price_per_hour)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use handyman::{Catalogue, Criteria, PriceRange};

    use super::*;

    #[test]
    fn summary_names_specializations_and_price() {
        let catalogue = Catalogue::builtin();
        let master = catalogue.find(MasterId::new(1).unwrap()).unwrap();

        let summary = summary(master);
        assert!(summary.contains("Александр Петров"));
        assert!(summary.contains("Сборка мебели, Электрика, Монтаж полок"));
        assert!(summary.contains("800₽/hour"));
    }

    #[test]
    fn filtered_out_master_cannot_be_selected() {
        let catalogue = Catalogue::builtin();
        let criteria = Criteria::unconstrained(PriceRange::FULL).toggle_district("Южный");
        let directory =
            DirectoryView::with_criteria(catalogue.masters(), PriceRange::FULL, criteria, None);

        assert!(directory.select(MasterId::new(3).unwrap()).is_some());
        assert!(directory.select(MasterId::new(1).unwrap()).is_none());
    }
}
