use clap::{Parser, ValueEnum};
use handyman::{DirectoryView, Master};
use serde::Serialize;
use tracing::instrument;

use super::{
    Context, CriteriaArgs,
    render::{self, csv_escape},
    resolve_sort,
    terminal::{self, Colorize},
};

/// Command arguments for `handyman list`.
#[derive(Debug, Default, Parser)]
#[command(about = "List masters matching the search and filters")]
pub struct List {
    #[command(flatten)]
    criteria: CriteriaArgs,

    /// Sort key: rating, price-asc, price-desc or experience (default from
    /// config). Unknown keys keep the catalogue order.
    #[arg(long, value_name = "KEY")]
    sort: Option<String>,

    /// Columns to display (comma-separated).
    #[arg(long, value_delimiter = ',', value_name = "COL")]
    columns: Vec<ListColumn>,

    /// Output format (default: cards).
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and counts for scripting.
    #[arg(long)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Cards,
    Table,
    Json,
    Csv,
}

/// Available table columns.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, ValueEnum)]
pub enum ListColumn {
    Id,
    Name,
    Rating,
    Reviews,
    Services,
    District,
    Price,
    Experience,
    Online,
}

impl ListColumn {
    const DEFAULT: [Self; 6] = [
        Self::Id,
        Self::Name,
        Self::Rating,
        Self::District,
        Self::Price,
        Self::Services,
    ];

    const fn header(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Rating => "Rating",
            Self::Reviews => "Reviews",
            Self::Services => "Services",
            Self::District => "District",
            Self::Price => "Price/h",
            Self::Experience => "Experience",
            Self::Online => "Online",
        }
    }

    fn value(self, master: &Master) -> String {
        match self {
            Self::Id => master.id.to_string(),
            Self::Name => master.name().to_string(),
            Self::Rating => render::stars(master.rating),
            Self::Reviews => master.review_count.to_string(),
            Self::Services => master
                .specializations
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            Self::District => master.district.clone(),
            Self::Price => render::price(master.price_per_hour),
            Self::Experience => master.experience.to_string(),
            Self::Online => if master.is_online { "yes" } else { "no" }.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SerializableMaster<'a> {
    id: u32,
    name: &'a str,
    rating: u8,
    review_count: u32,
    specializations: Vec<&'a str>,
    district: &'a str,
    price_per_hour: u32,
    experience: u32,
    is_online: bool,
}

impl<'a> From<&'a Master> for SerializableMaster<'a> {
    fn from(master: &'a Master) -> Self {
        Self {
            id: master.id.get(),
            name: master.name(),
            rating: master.rating.get(),
            review_count: master.review_count,
            specializations: master.specializations.iter().map(String::as_str).collect(),
            district: &master.district,
            price_per_hour: master.price_per_hour,
            experience: master.experience,
            is_online: master.is_online,
        }
    }
}

impl List {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let criteria = self.criteria.criteria(&context.config)?;
        let sort_key = resolve_sort(self.sort.as_deref(), &context.config);
        let span = context.config.price_span();

        let directory =
            DirectoryView::with_criteria(context.catalogue.masters(), span, criteria, sort_key);

        let output = self.render(&directory)?;
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    }

    /// Renders the view in the requested format. Quiet output of an empty
    /// view is empty.
    fn render(&self, directory: &DirectoryView<'_>) -> anyhow::Result<String> {
        let masters = directory.view();

        let output = match self.output {
            OutputFormat::Cards | OutputFormat::Table if directory.is_empty() && !self.quiet => {
                render_empty(directory)
            }
            OutputFormat::Cards => render_cards(directory, self.quiet),
            OutputFormat::Table => render_table(masters, &self.columns, self.quiet),
            OutputFormat::Json => serde_json::to_string_pretty(
                &masters
                    .iter()
                    .copied()
                    .map(SerializableMaster::from)
                    .collect::<Vec<_>>(),
            )?,
            OutputFormat::Csv => render_csv(masters, &self.columns, self.quiet),
        };
        Ok(output)
    }
}

fn results_line(directory: &DirectoryView<'_>) -> String {
    let sort = directory
        .sort_key()
        .map_or("catalogue order", |key| key.label());
    format!(
        "Found {} masters · {}",
        directory.results_count(),
        sort.dim()
    )
}

fn render_empty(directory: &DirectoryView<'_>) -> String {
    let mut lines = vec![
        "No masters found".warning(),
        "Try changing the search or the filters.".to_string(),
    ];
    if directory.criteria().is_constrained(directory.span()) {
        lines.push(
            "Run without --query, --service, --district, --price or --min-rating to clear them."
                .dim(),
        );
    }
    lines.join("\n")
}

fn render_cards(directory: &DirectoryView<'_>, quiet: bool) -> String {
    let separator = if terminal::is_narrow() { "\n" } else { "\n\n" };
    let cards = directory
        .view()
        .iter()
        .map(|master| render::card(master))
        .collect::<Vec<_>>()
        .join(separator);

    if quiet {
        cards
    } else {
        format!("{}\n\n{cards}", results_line(directory))
    }
}

fn selected_columns(columns: &[ListColumn], quiet: bool) -> Vec<ListColumn> {
    if !columns.is_empty() {
        columns.to_vec()
    } else if quiet {
        vec![ListColumn::Id]
    } else {
        ListColumn::DEFAULT.to_vec()
    }
}

fn render_table(masters: &[&Master], columns: &[ListColumn], quiet: bool) -> String {
    let columns = selected_columns(columns, quiet);

    let data: Vec<Vec<String>> = masters
        .iter()
        .map(|master| columns.iter().map(|column| column.value(master)).collect())
        .collect();

    if quiet {
        return data
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    // Widths count chars, which is what `{:<width$}` pads by.
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            data.iter()
                .map(|row| row[idx].chars().count())
                .max()
                .unwrap_or(0)
                .max(column.header().chars().count())
        })
        .collect();

    let dashes: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();

    let mut lines = Vec::with_capacity(data.len() + 2);
    lines.push(format_row(columns.iter().map(|column| column.header()), &widths));
    lines.push(format_row(dashes.iter().map(String::as_str), &widths));
    for row in &data {
        lines.push(format_row(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn render_csv(masters: &[&Master], columns: &[ListColumn], quiet: bool) -> String {
    let columns = selected_columns(columns, quiet);
    let mut lines = Vec::with_capacity(masters.len() + 1);

    if !quiet {
        lines.push(
            columns
                .iter()
                .map(|column| column.header())
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    for master in masters {
        lines.push(
            columns
                .iter()
                .map(|column| csv_escape(&column.value(master)))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}
