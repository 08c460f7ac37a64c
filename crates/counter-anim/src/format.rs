//! Locale-aware formatting of displayed counter values.

use num_format::Locale;
use num_format::ToFormattedString;

/// How a counter's value is rendered: thousands-separated per locale, with
/// an optional unit suffix the renderer de-emphasizes.
#[derive(Debug, Clone)]
pub struct CounterFormat {
    /// locale providing the thousands separator
    pub locale: Locale,
    /// unit suffix, e.g. "min" or "%"
    pub suffix: Option<String>,
}

impl CounterFormat {
    /// Format with the given locale and no suffix.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            suffix: None,
        }
    }

    /// set unit suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Number part only: rounded to the nearest integer with the locale's
    /// thousands separators.
    pub fn number(&self, value: f64) -> String {
        format_value(value, &self.locale)
    }
}

impl Default for CounterFormat {
    fn default() -> Self {
        Self::new(Locale::en)
    }
}

/// Round to the nearest integer and insert locale thousands separators.
pub fn format_value(value: f64, locale: &Locale) -> String {
    let rounded = value.round() as i64;
    rounded.to_formatted_string(locale)
}
