use clap::Parser;
use handyman::{MasterId, MasterProfile, domain::BookingRequest};
use serde_json::json;
use tracing::{info, instrument};

use super::{Context, render, terminal::Colorize};

const DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Parser)]
#[command(about = "Display a master's full profile")]
pub struct Show {
    /// The identifier of the master to display
    #[clap(value_parser = super::parse_id)]
    id: MasterId,

    /// Output format
    #[arg(short, long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,

    /// Request a booking after showing the profile
    #[arg(long)]
    book: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Markdown,
}

impl Show {
    #[instrument(level = "debug", skip(self, context), fields(id = %self.id))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        if context.catalogue.find(self.id).is_none() {
            anyhow::bail!("Master {} not found", self.id);
        }
        let Some(profile) = context.catalogue.profile(self.id) else {
            anyhow::bail!("Master {} has no published profile", self.id);
        };

        let output = match self.output {
            OutputFormat::Pretty => pretty(profile),
            OutputFormat::Json => serde_json::to_string_pretty(&to_json(profile))?,
            OutputFormat::Markdown => markdown(profile),
        };
        println!("{output}");

        if self.book {
            let request = profile.book()?;
            println!("\n{}", booking_confirmation(&request));
        }

        Ok(())
    }
}

/// Logs and describes an acknowledged booking.
pub fn booking_confirmation(request: &BookingRequest) -> String {
    info!(master = %request.master, "booking requested");
    format!(
        "{} Booking request sent to {} ({}/hour)",
        "✓".success(),
        request.name,
        render::price(request.price_per_hour)
    )
}

/// The profile page as terminal text.
pub fn pretty(profile: MasterProfile<'_>) -> String {
    let MasterProfile { master, details } = profile;
    let mut lines = Vec::new();

    // Header
    lines.push(format!(
        "{} {}",
        master.name(),
        format!("({})", master.initials()).dim()
    ));
    lines.push(format!(
        "{} {} ({} reviews) · {}",
        render::coloured_stars(master.rating),
        master.rating,
        master.review_count,
        render::status(details.status)
    ));
    lines.push(format!(
        "📍 {} · experience {} years · {} jobs completed",
        master.district, master.experience, details.completed_jobs
    ));
    lines.push(format!(
        "{}/hour",
        render::price(master.price_per_hour).accent()
    ));

    if !details.description.is_empty() {
        lines.push(format!("\n{}", "About".dim()));
        lines.push(format!("  {}", details.description));
    }

    lines.push(format!("\n{}", "Specializations".dim()));
    for specialization in master.specializations.iter() {
        lines.push(format!("  • {specialization}"));
    }

    lines.push(format!("\n{}", "Contacts".dim()));
    if !details.phone.is_empty() {
        lines.push(format!("  Phone:   {}", details.phone));
    }
    lines.push(format!("  Address: {}", master.district));
    if !details.working_hours.is_empty() {
        lines.push(format!("  Hours:   {}", details.working_hours));
    }
    if !details.join_date.is_empty() {
        lines.push(format!("  Since:   {}", details.join_date));
    }

    if details.status.is_bookable() {
        lines.push(format!(
            "  {}",
            format!("Book with `handyman show {} --book`", master.id).success()
        ));
    } else {
        lines.push(format!("  {}", "Unavailable for booking".dim()));
    }

    if !details.portfolio.is_empty() {
        lines.push(format!("\n{}", "Portfolio".dim()));
        for image in &details.portfolio {
            lines.push(format!("  • {image}"));
        }
    }

    lines.push(format!(
        "\n{}",
        format!("Reviews ({})", details.reviews.len()).dim()
    ));
    if details.reviews.is_empty() {
        lines.push("  No reviews yet".to_string());
    }
    for review in &details.reviews {
        lines.push(format!(
            "  {} {} · {}",
            review.author,
            render::coloured_stars(review.rating),
            review.date.format(DATE_FORMAT).to_string().dim()
        ));
        lines.push(format!("    {}", review.text));
    }

    lines.join("\n")
}

fn to_json(profile: MasterProfile<'_>) -> serde_json::Value {
    let MasterProfile { master, details } = profile;

    let reviews: Vec<_> = details
        .reviews
        .iter()
        .map(|review| {
            json!({
                "id": review.id,
                "author": review.author,
                "rating": review.rating.get(),
                "text": review.text,
                "date": review.date.to_string(),
            })
        })
        .collect();

    json!({
        "id": master.id.get(),
        "name": master.name(),
        "initials": master.initials(),
        "avatar": master.avatar,
        "rating": master.rating.get(),
        "reviewCount": master.review_count,
        "specializations": master.specializations.iter().collect::<Vec<_>>(),
        "district": master.district,
        "pricePerHour": master.price_per_hour,
        "experience": master.experience,
        "isOnline": master.is_online,
        "status": details.status.as_str(),
        "bookable": details.status.is_bookable(),
        "phone": details.phone,
        "description": details.description,
        "completedJobs": details.completed_jobs,
        "joinDate": details.join_date,
        "workingHours": details.working_hours,
        "portfolio": details.portfolio,
        "reviews": reviews,
    })
}

fn markdown(profile: MasterProfile<'_>) -> String {
    let MasterProfile { master, details } = profile;
    let mut lines = vec![
        format!("# {}\n", master.name()),
        "| Property | Value |".to_string(),
        "| --- | --- |".to_string(),
        format!(
            "| Rating | {} ({} reviews) |",
            render::stars(master.rating),
            master.review_count
        ),
        format!("| Status | {} |", details.status.label()),
        format!("| District | {} |", master.district),
        format!("| Price | {}/hour |", render::price(master.price_per_hour)),
        format!("| Experience | {} years |", master.experience),
        format!("| Completed jobs | {} |", details.completed_jobs),
    ];
    if !details.phone.is_empty() {
        lines.push(format!("| Phone | {} |", details.phone));
    }
    if !details.working_hours.is_empty() {
        lines.push(format!("| Working hours | {} |", details.working_hours));
    }

    if !details.description.is_empty() {
        lines.push("\n## About\n".to_string());
        lines.push(details.description.clone());
    }

    lines.push("\n## Specializations\n".to_string());
    lines.extend(master.specializations.iter().map(|spec| format!("- {spec}")));

    if !details.reviews.is_empty() {
        lines.push("\n## Reviews\n".to_string());
        for review in &details.reviews {
            lines.push(format!(
                "- **{}** {} ({}): {}",
                review.author,
                render::stars(review.rating),
                review.date.format(DATE_FORMAT),
                review.text
            ));
        }
    }

    lines.join("\n")
}
