use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Article, Error};

/// Display language for labels and dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ko" | "ko-kr" => Ok(Self::Ko),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            other => Err(Error::InvalidArgument(format!("unsupported locale: {}", other))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ko => write!(f, "ko"),
            Self::En => write!(f, "en"),
        }
    }
}

/// Monday of the ISO week containing `date`. Sunday belongs to the week that
/// started six days earlier.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn sunday_of(monday: NaiveDate) -> NaiveDate {
    monday + Duration::days(6)
}

/// Parses the calendar part of the article's effective date.
pub fn effective_date(article: &Article) -> Option<NaiveDate> {
    article
        .date_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

/// Inclusive containment of the article's effective date in `[monday, monday + 6d]`.
/// Articles without a usable date are never in any week.
pub fn in_week(article: &Article, monday: NaiveDate) -> bool {
    effective_date(article).is_some_and(|d| d >= monday && d <= sunday_of(monday))
}

pub fn format_week_label(monday: NaiveDate, locale: Locale) -> String {
    let sunday = sunday_of(monday);
    let same_year = monday.year() == sunday.year();
    let same_month = same_year && monday.month() == sunday.month();

    match locale {
        Locale::Ko => {
            let start = format_long_date(monday, locale);
            if !same_year {
                format!("{} ~ {}", start, format_long_date(sunday, locale))
            } else if !same_month {
                format!("{} ~ {}월 {}일", start, sunday.month(), sunday.day())
            } else {
                format!("{} ~ {}일", start, sunday.day())
            }
        }
        Locale::En => {
            if !same_year {
                format!("{} – {}", monday.format("%b %-d, %Y"), sunday.format("%b %-d, %Y"))
            } else if !same_month {
                format!("{} – {}", monday.format("%b %-d"), sunday.format("%b %-d, %Y"))
            } else {
                format!("{} – {}", monday.format("%b %-d"), sunday.format("%-d, %Y"))
            }
        }
    }
}

pub fn format_long_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Ko => format!("{}년 {}월 {}일", date.year(), date.month(), date.day()),
        Locale::En => date.format("%B %-d, %Y").to_string(),
    }
}

/// A Monday–Sunday window identified by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Week {
    monday: NaiveDate,
}

impl Week {
    pub fn containing(date: NaiveDate) -> Self {
        Self { monday: monday_of(date) }
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    pub fn sunday(&self) -> NaiveDate {
        sunday_of(self.monday)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.monday && date <= self.sunday()
    }

    pub fn contains_article(&self, article: &Article) -> bool {
        in_week(article, self.monday)
    }

    /// Moves the window by whole weeks; negative goes back in time.
    /// `None` when the target week falls outside the supported calendar.
    pub fn shift(&self, weeks: i64) -> Option<Self> {
        let monday = Duration::try_weeks(weeks).and_then(|d| self.monday.checked_add_signed(d))?;
        monday.checked_add_signed(Duration::days(6))?;
        Some(Self { monday })
    }

    pub fn label(&self, locale: Locale) -> String {
        format_week_label(self.monday, locale)
    }
}

impl From<NaiveDate> for Week {
    fn from(date: NaiveDate) -> Self {
        Self::containing(date)
    }
}
