//! Text rendering shared by the listing, profile and browse commands.

use handyman::{Master, Rating, domain::Status};

use super::terminal::Colorize;

/// How many specialization badges a card shows before collapsing the rest.
pub const BADGE_LIMIT: usize = 3;

/// A five-star row, e.g. `★★★★☆` for a rating of 4.
pub fn stars(rating: Rating) -> String {
    let filled = usize::from(rating.get());
    let empty = usize::from(Rating::MAX.get()) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// The star row with the filled stars coloured.
pub fn coloured_stars(rating: Rating) -> String {
    let filled = usize::from(rating.get());
    let empty = usize::from(Rating::MAX.get()) - filled;
    format!("{}{}", "★".repeat(filled).star(), "☆".repeat(empty).dim())
}

/// A price in roubles, e.g. `800₽`.
pub fn price(amount: u32) -> String {
    format!("{amount}₽")
}

/// The first few specializations, followed by `+N` for the rest.
pub fn badges(master: &Master, limit: usize) -> String {
    let shown: Vec<&str> = master
        .specializations
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect();
    let hidden = master.specializations.len().saturating_sub(limit);

    let mut line = shown.join(" · ");
    if hidden > 0 {
        line.push_str(&format!(" +{hidden}"));
    }
    line
}

/// The status label, coloured by availability.
pub fn status(status: Status) -> String {
    match status {
        Status::Available => status.label().success(),
        Status::Busy => status.label().warning(),
        Status::Offline => status.label().dim(),
    }
}

/// An online marker for the listing.
pub fn online(master: &Master) -> String {
    if master.is_online {
        "● online".success()
    } else {
        "○ offline".dim()
    }
}

/// A listing card: identity, rating, location, badges and price.
pub fn card(master: &Master) -> String {
    let mut lines = Vec::with_capacity(5);

    lines.push(format!(
        "{} {} {}  {}",
        master.name(),
        format!("({})", master.initials()).dim(),
        online(master),
        format!("#{}", master.id).dim()
    ));
    lines.push(format!(
        "  {} {} ({} reviews)",
        coloured_stars(master.rating),
        master.rating,
        master.review_count
    ));
    lines.push(format!(
        "  📍 {} · experience {} years",
        master.district, master.experience
    ));
    lines.push(format!("  {}", badges(master, BADGE_LIMIT)));
    lines.push(format!("  {}/hour", price(master.price_per_hour).accent()));

    lines.join("\n")
}

/// Escapes a CSV field per RFC 4180.
pub fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
