use chrono::{DateTime, Datelike, Duration, Locale, NaiveDate, Utc};
use tracing::debug;

use crate::model::grid::DayCell;
use crate::time::DAYS_PER_WEEK;

const FALLBACK_LOCALE: Locale = Locale::en_US;

/// Short weekday names for `locale`, Sunday first.
///
/// Accepts POSIX (`de_DE.UTF-8`) and BCP 47 (`de-DE`) style tags as well as
/// a bare language (`de`). Unknown tags fall back to `en_US`.
pub fn weekday_labels(locale: &str) -> [String; DAYS_PER_WEEK] {
    let locale = resolve_locale(locale);
    // 1970-01-04 was a Sunday
    let first_sunday = DateTime::<Utc>::UNIX_EPOCH + Duration::days(3);
    std::array::from_fn(|day| {
        (first_sunday + Duration::days(day as i64))
            .format_localized("%a", locale)
            .to_string()
    })
}

fn resolve_locale(tag: &str) -> Locale {
    let name = tag
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('-', "_");

    if name.is_empty() || name == "C" || name == "POSIX" {
        return FALLBACK_LOCALE;
    }
    if let Ok(locale) = Locale::try_from(name.as_str()) {
        return locale;
    }
    // Bare language: "de" -> "de_DE"
    if !name.contains('_') {
        if let Ok(locale) = Locale::try_from(format!("{}_{}", name, name.to_uppercase()).as_str()) {
            return locale;
        }
    }

    debug!("Unknown locale '{}', using en_US", tag);
    FALLBACK_LOCALE
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// `July 21st`
pub fn format_date_with_ordinal(date: NaiveDate) -> String {
    format!("{} {}{}", date.format("%B"), date.day(), ordinal_suffix(date.day()))
}

/// `No contributions on January 1st.` / `12 contributions on May 2nd.`
pub fn popover_text(cell: &DayCell) -> String {
    let count = match cell.contribution_count {
        0 => "No".to_string(),
        n => n.to_string(),
    };
    format!("{} contributions on {}.", count, format_date_with_ordinal(cell.date))
}
