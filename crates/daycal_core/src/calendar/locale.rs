//! Localized month/weekday names for agenda headers.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Language used when rendering day labels.
///
/// Spanish is the default because the stored data and category fallbacks
/// (`Sin categoría`) are Spanish-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelLocale {
    #[default]
    Es,
    En,
}

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl LabelLocale {
    /// Parses a locale tag such as `es`, `es-ES` or `en_US`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn today_word(self) -> &'static str {
        match self {
            Self::Es => "Hoy",
            Self::En => "Today",
        }
    }

    pub fn tomorrow_word(self) -> &'static str {
        match self {
            Self::Es => "Mañana",
            Self::En => "Tomorrow",
        }
    }

    /// `month0` is zero-based (January = 0).
    pub fn month_name(self, month0: u32) -> &'static str {
        let index = (month0 % 12) as usize;
        match self {
            Self::Es => MONTHS_ES[index],
            Self::En => MONTHS_EN[index],
        }
    }

    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        match (self, weekday) {
            (Self::Es, Weekday::Mon) => "lunes",
            (Self::Es, Weekday::Tue) => "martes",
            (Self::Es, Weekday::Wed) => "miércoles",
            (Self::Es, Weekday::Thu) => "jueves",
            (Self::Es, Weekday::Fri) => "viernes",
            (Self::Es, Weekday::Sat) => "sábado",
            (Self::Es, Weekday::Sun) => "domingo",
            (Self::En, Weekday::Mon) => "Monday",
            (Self::En, Weekday::Tue) => "Tuesday",
            (Self::En, Weekday::Wed) => "Wednesday",
            (Self::En, Weekday::Thu) => "Thursday",
            (Self::En, Weekday::Fri) => "Friday",
            (Self::En, Weekday::Sat) => "Saturday",
            (Self::En, Weekday::Sun) => "Sunday",
        }
    }

    /// Formats "month day" in the locale's natural order.
    pub fn month_day(self, month0: u32, day: u32) -> String {
        match self {
            Self::Es => format!("{day} de {}", self.month_name(month0)),
            Self::En => format!("{} {day}", self.month_name(month0)),
        }
    }

    /// Formats "month year" for month-view headers.
    pub fn month_year(self, month0: u32, year: i32) -> String {
        match self {
            Self::Es => format!("{} de {year}", self.month_name(month0)),
            Self::En => format!("{} {year}", self.month_name(month0)),
        }
    }
}
