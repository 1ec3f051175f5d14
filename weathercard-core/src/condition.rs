//! Maps free-text condition descriptions onto a fixed set of icons.

/// Icon shown on the result card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconCategory {
    Rain,
    Snow,
    Cloud,
    Drizzle,
    Clear,
}

impl IconCategory {
    pub fn label(&self) -> &'static str {
        match self {
            IconCategory::Rain => "rain",
            IconCategory::Snow => "snow",
            IconCategory::Cloud => "cloud",
            IconCategory::Drizzle => "drizzle",
            IconCategory::Clear => "clear",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            IconCategory::Rain => "🌧️",
            IconCategory::Snow => "🌨️",
            IconCategory::Cloud => "☁️",
            IconCategory::Drizzle => "🌦️",
            IconCategory::Clear => "☀️",
        }
    }
}

impl std::fmt::Display for IconCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a condition description, case-insensitively.
///
/// Rules are checked in order and the first match wins, so
/// "Heavy rain and cloud" is [`IconCategory::Rain`]. Anything unrecognised,
/// including a missing description, falls back to [`IconCategory::Cloud`].
pub fn classify(condition: Option<&str>) -> IconCategory {
    let lower = condition.unwrap_or_default().to_lowercase();

    if lower.contains("rain") || lower.contains("shower") {
        IconCategory::Rain
    } else if lower.contains("snow") {
        IconCategory::Snow
    } else if lower.contains("cloud") {
        IconCategory::Cloud
    } else if lower.contains("drizzle") {
        IconCategory::Drizzle
    } else if lower.contains("clear") || lower.contains("sunny") {
        IconCategory::Clear
    } else {
        IconCategory::Cloud
    }
}
