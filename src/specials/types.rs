use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week a special runs on. Ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Current day of the week from the local clock
    pub fn today() -> Self {
        chrono::Local::now().weekday().into()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Day::Monday => "🏁",
            Day::Tuesday => "🔥",
            Day::Wednesday => "🐪",
            Day::Thursday => "⚡",
            Day::Friday => "🎉",
            Day::Saturday => "🌟",
            Day::Sunday => "😴",
        }
    }

    /// Zero-based position in the week (Monday = 0)
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn next(&self) -> Self {
        Day::ALL[(self.index() + 1) % 7]
    }

    pub fn previous(&self) -> Self {
        Day::ALL[(self.index() + 6) % 7]
    }
}

impl From<chrono::Weekday> for Day {
    fn from(weekday: chrono::Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDayError(String);

impl fmt::Display for ParseDayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a day of the week", self.0)
    }
}

impl std::error::Error for ParseDayError {}

impl FromStr for Day {
    type Err = ParseDayError;

    /// Accepts full names and three-letter abbreviations, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Day::ALL
            .iter()
            .copied()
            .find(|day| {
                let name = day.name().to_lowercase();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| ParseDayError(s.to_string()))
    }
}

impl TryFrom<String> for Day {
    type Error = ParseDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Day> for String {
    fn from(day: Day) -> Self {
        day.name().to_string()
    }
}

/// A recurring weekly deal offered by one bar on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Special {
    pub bar: String,
    pub day: Day,
    pub deal: String,
}

impl Special {
    pub fn new(bar: impl Into<String>, day: Day, deal: impl Into<String>) -> Self {
        Self {
            bar: bar.into(),
            day,
            deal: deal.into(),
        }
    }
}
