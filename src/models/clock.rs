// Wall clock models

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Clock format preference; accepts the wizard's "24 hours" / "12 hours" strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    #[default]
    #[serde(rename = "24 hours", alias = "24h")]
    TwentyFourHour,
    #[serde(rename = "12 hours", alias = "12h")]
    TwelveHour,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockSnapshot {
    pub hour: String,
    pub minute: String,
    pub second: String,
    /// "AM"/"PM" in 12-hour mode, `None` in 24-hour mode.
    pub am_pm: Option<String>,
    pub weekday: String,
    pub day: String,
    pub month: String,
    pub year: String,
}

impl ClockSnapshot {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>, format: ClockFormat) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let (hour, am_pm) = match format {
            ClockFormat::TwentyFourHour => (now.format("%H").to_string(), None),
            ClockFormat::TwelveHour => (
                now.format("%I").to_string(),
                Some(now.format("%p").to_string()),
            ),
        };
        ClockSnapshot {
            hour,
            minute: now.format("%M").to_string(),
            second: now.format("%S").to_string(),
            am_pm,
            weekday: now.format("%A").to_string(),
            day: now.format("%d").to_string(),
            month: now.format("%B").to_string(),
            year: now.format("%Y").to_string(),
        }
    }
}
