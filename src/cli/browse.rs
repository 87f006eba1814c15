//! Interactive browsing: the listing page as a menu loop.

use std::{collections::BTreeSet, io::IsTerminal};

use clap::Parser;
use dialoguer::{Confirm, Input, Select as Menu, theme::ColorfulTheme};
use handyman::{Action, Config, DirectoryView, Master, PriceRange, Rating, SortKey};
use tracing::{debug, instrument};

use super::{
    Context, CriteriaArgs, render, resolve_sort, select,
    show::{self, booking_confirmation},
    terminal::Colorize,
};

/// Command arguments for `handyman browse`.
#[derive(Debug, Parser)]
#[command(about = "Browse the directory interactively")]
pub struct Browse {
    /// Initial search and filters
    #[command(flatten)]
    criteria: CriteriaArgs,

    /// Initial sort key (default from config)
    #[arg(long, value_name = "KEY")]
    sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Search,
    Service,
    District,
    Price,
    Rating,
    Sort,
    ClearAll,
    Profile,
    Select,
    Quit,
}

impl MenuItem {
    const ALL: [Self; 10] = [
        Self::Search,
        Self::Service,
        Self::District,
        Self::Price,
        Self::Rating,
        Self::Sort,
        Self::ClearAll,
        Self::Profile,
        Self::Select,
        Self::Quit,
    ];

    /// The menu entry, showing the current state of what it changes.
    fn label(self, directory: &DirectoryView<'_>) -> String {
        let criteria = directory.criteria();
        match self {
            Self::Search if criteria.query().is_empty() => "Search".to_string(),
            Self::Search => format!("Search [{}]", criteria.query()),
            Self::Service => format!("Services ({} selected)", criteria.services().len()),
            Self::District => format!("Districts ({} selected)", criteria.districts().len()),
            Self::Price => format!("Price [{}]", criteria.price_range()),
            Self::Rating if criteria.min_rating() == Rating::ZERO => "Rating [any]".to_string(),
            Self::Rating => format!("Rating [{}+]", criteria.min_rating()),
            Self::Sort => format!(
                "Sort [{}]",
                directory.sort_key().map_or("catalogue order", SortKey::label)
            ),
            Self::ClearAll => "Clear all filters".to_string(),
            Self::Profile => "Open a profile".to_string(),
            Self::Select => "Select a master".to_string(),
            Self::Quit => "Quit".to_string(),
        }
    }
}

impl Browse {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        if !std::io::stdin().is_terminal() {
            anyhow::bail!("browse needs an interactive terminal; use `handyman list` instead");
        }

        let theme = ColorfulTheme::default();
        let criteria = self.criteria.criteria(&context.config)?;
        let sort_key = resolve_sort(self.sort.as_deref(), &context.config);
        let mut directory = DirectoryView::with_criteria(
            context.catalogue.masters(),
            context.config.price_span(),
            criteria,
            sort_key,
        );

        loop {
            println!("\n{}\n", overview(&directory));

            let labels: Vec<String> = MenuItem::ALL
                .iter()
                .map(|item| item.label(&directory))
                .collect();
            let choice = Menu::with_theme(&theme)
                .with_prompt("What next?")
                .items(&labels)
                .default(0)
                .interact()?;
            let item = MenuItem::ALL[choice];
            debug!(?item, "menu choice");

            match item {
                MenuItem::Quit => break,
                MenuItem::Search => {
                    let query: String = Input::with_theme(&theme)
                        .with_prompt("Search by name or service")
                        .with_initial_text(directory.criteria().query())
                        .allow_empty(true)
                        .interact_text()?;
                    directory.apply(Action::SetQuery(query));
                }
                MenuItem::Profile => {
                    if let Some(master) = pick_master(&theme, &directory)? {
                        open_profile(&theme, context, master)?;
                    }
                }
                MenuItem::Select => {
                    if let Some(master) = pick_master(&theme, &directory)? {
                        println!("\n{}", select::summary(master));
                    }
                }
                MenuItem::ClearAll => {
                    directory.apply(Action::ClearAll);
                }
                _ => {
                    let options = choice_labels(item, &context.config, &directory);
                    let index = Menu::with_theme(&theme)
                        .with_prompt(item.label(&directory))
                        .items(&options)
                        .default(0)
                        .interact()?;
                    if let Some(action) = choice_action(item, index, &context.config, &directory) {
                        directory.apply(action);
                    }
                }
            }
        }

        Ok(())
    }
}

fn pick_master<'a>(
    theme: &ColorfulTheme,
    directory: &DirectoryView<'a>,
) -> anyhow::Result<Option<&'a Master>> {
    if directory.is_empty() {
        println!("{}", "Nothing to choose from".warning());
        return Ok(None);
    }

    let labels: Vec<String> = directory.view().iter().map(|master| row(master)).collect();
    let index = Menu::with_theme(theme)
        .with_prompt("Master")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(directory.view().get(index).copied())
}

fn open_profile(theme: &ColorfulTheme, context: &Context, master: &Master) -> anyhow::Result<()> {
    let Some(profile) = context.catalogue.profile(master.id) else {
        println!("{}", select::summary(master));
        println!("{}", "No published profile".dim());
        return Ok(());
    };

    println!("\n{}\n", show::pretty(profile));

    if profile.details.status.is_bookable()
        && Confirm::with_theme(theme)
            .with_prompt(format!("Book {}?", master.name()))
            .default(false)
            .interact()?
    {
        let request = profile.book()?;
        println!("{}", booking_confirmation(&request));
    }
    Ok(())
}

/// One master per line, for the overview and the pickers.
fn row(master: &Master) -> String {
    format!(
        "{} {} · {} · {}/hour",
        master.name(),
        render::stars(master.rating),
        master.district,
        render::price(master.price_per_hour)
    )
}

/// The results count and the current view list.
fn overview(directory: &DirectoryView<'_>) -> String {
    if directory.is_empty() {
        return format!(
            "{}\n{}",
            "No masters found".warning(),
            "Try changing the search or clearing the filters.".dim()
        );
    }

    let mut lines = vec![format!("Found {} masters", directory.results_count())];
    lines.extend(directory.view().iter().map(|master| format!("  {}", row(master))));
    lines.join("\n")
}

/// The configured vocabulary, then any selected values outside it, so that
/// every active selection can be seen and toggled off.
fn facet_options(vocabulary: &[String], selected: &BTreeSet<String>) -> Vec<String> {
    vocabulary
        .iter()
        .chain(selected.iter().filter(|value| !vocabulary.contains(value)))
        .cloned()
        .collect()
}

fn toggle_labels(options: &[String], selected: &BTreeSet<String>) -> Vec<String> {
    options
        .iter()
        .map(|option| {
            let mark = if selected.contains(option) { "[x]" } else { "[ ]" };
            format!("{mark} {option}")
        })
        .collect()
}

/// "Any price" followed by the configured presets.
fn price_choices(config: &Config) -> Vec<(String, PriceRange)> {
    std::iter::once(("Any price".to_string(), config.price_span()))
        .chain(
            config
                .price_presets()
                .iter()
                .map(|preset| (preset.label.clone(), preset.range)),
        )
        .collect()
}

/// "Any rating" followed by the configured thresholds.
fn rating_choices(config: &Config) -> Vec<(String, Rating)> {
    std::iter::once(("Any rating".to_string(), Rating::ZERO))
        .chain(config.rating_thresholds().iter().map(|threshold| {
            (
                format!("{} and above", render::stars(*threshold)),
                *threshold,
            )
        }))
        .collect()
}

/// The options offered for a facet menu entry.
fn choice_labels(item: MenuItem, config: &Config, directory: &DirectoryView<'_>) -> Vec<String> {
    let criteria = directory.criteria();
    match item {
        MenuItem::Service => toggle_labels(
            &facet_options(config.services(), criteria.services()),
            criteria.services(),
        ),
        MenuItem::District => toggle_labels(
            &facet_options(config.districts(), criteria.districts()),
            criteria.districts(),
        ),
        MenuItem::Price => price_choices(config)
            .into_iter()
            .map(|(label, _)| label)
            .collect(),
        MenuItem::Rating => rating_choices(config)
            .into_iter()
            .map(|(label, _)| label)
            .collect(),
        MenuItem::Sort => SortKey::ALL
            .iter()
            .map(|key| key.label().to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// The action for choosing option `index` of a facet menu entry.
fn choice_action(
    item: MenuItem,
    index: usize,
    config: &Config,
    directory: &DirectoryView<'_>,
) -> Option<Action> {
    let criteria = directory.criteria();
    match item {
        MenuItem::Service => facet_options(config.services(), criteria.services())
            .into_iter()
            .nth(index)
            .map(Action::ToggleService),
        MenuItem::District => facet_options(config.districts(), criteria.districts())
            .into_iter()
            .nth(index)
            .map(Action::ToggleDistrict),
        MenuItem::Price => price_choices(config)
            .get(index)
            .map(|(_, range)| Action::SetPriceRange(*range)),
        MenuItem::Rating => rating_choices(config)
            .get(index)
            .map(|(_, rating)| Action::SetMinRating(*rating)),
        MenuItem::Sort => SortKey::ALL
            .get(index)
            .map(|key| Action::SetSort(Some(*key))),
        MenuItem::ClearAll => Some(Action::ClearAll),
        MenuItem::Search | MenuItem::Profile | MenuItem::Select | MenuItem::Quit => None,
    }
}
