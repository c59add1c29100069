//! Currency codes, locale preferences and number rendering.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn minor_units(&self) -> u32 {
        minor_units_for(self.as_str())
    }

    pub fn symbol(&self) -> String {
        symbol_for(self.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl LocaleConfig {
    /// Builds separators for a BCP 47 tag; unknown tags fall back to `en-US`
    /// separators while keeping the tag for label selection.
    pub fn for_tag(tag: &str) -> Self {
        let normalized = tag.trim();
        let language = normalized
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let (decimal_separator, grouping_separator) = match language.as_str() {
            "de" | "es" | "it" | "pt" | "nl" | "id" => (',', '.'),
            "fr" | "sv" | "nb" | "fi" | "pl" | "cs" => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            language_tag: if normalized.is_empty() {
                "en-US".into()
            } else {
                normalized.to_string()
            },
            decimal_separator,
            grouping_separator,
        }
    }

    pub fn language(&self) -> String {
        self.language_tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyDisplay {
    #[default]
    Symbol,
    Code,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u32 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Renders `value` with `precision` fraction digits and locale grouping.
pub fn format_number(locale: &LocaleConfig, value: Decimal, precision: u32) -> String {
    let rounded = round_display(value, precision);
    let body = format!("{:.*}", precision as usize, rounded);
    let (negative, digits) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, locale.grouping_separator));
    if let Some(frac) = frac_part {
        out.push(locale.decimal_separator);
        out.push_str(frac);
    }
    out
}

fn round_display(value: Decimal, precision: u32) -> Decimal {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}

/// Renders an amount with its currency marker, e.g. `$1,234.50` or
/// `(1.234,50 EUR)` depending on display and negative style.
///
/// `precision` is usually [`CurrencyCode::minor_units`] unless the user
/// overrides it.
pub fn format_currency_value(
    amount: Decimal,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    precision: u32,
    display: CurrencyDisplay,
    negative_style: NegativeStyle,
) -> String {
    let rounded = round_display(amount, precision);
    let body = format_number(locale, rounded.abs(), precision);
    let marked = match display {
        CurrencyDisplay::Symbol => format!("{}{}", code.symbol(), body),
        CurrencyDisplay::Code => format!("{} {}", body, code.as_str()),
    };
    if !rounded.is_sign_negative() {
        return marked;
    }
    match negative_style {
        NegativeStyle::Sign => format!("-{marked}"),
        NegativeStyle::Parentheses => format!("({marked})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_thousands_with_locale_separators() {
        let locale = LocaleConfig {
            decimal_separator: ',',
            grouping_separator: ' ',
            ..LocaleConfig::default()
        };
        assert_eq!(format_number(&locale, dec!(1234567.5), 2), "1 234 567,50");
        assert_eq!(format_number(&LocaleConfig::default(), dec!(-1234), 0), "-1,234");
        assert_eq!(format_number(&LocaleConfig::default(), dec!(999), 2), "999.00");
    }

    #[test]
    fn formats_currency_with_marker_and_negative_style() {
        let eur = CurrencyCode::new("eur");
        let locale = LocaleConfig::for_tag("de-DE");
        let formatted = format_currency_value(
            dec!(-1234.5),
            &eur,
            &locale,
            eur.minor_units(),
            CurrencyDisplay::Symbol,
            NegativeStyle::Parentheses,
        );
        assert_eq!(formatted, "(€1.234,50)");

        let yen = format_currency_value(
            dec!(3000),
            &CurrencyCode::new("JPY"),
            &LocaleConfig::for_tag("ja-JP"),
            0,
            CurrencyDisplay::Code,
            NegativeStyle::Sign,
        );
        assert_eq!(yen, "3,000 JPY");
    }

    #[test]
    fn minor_units_follow_currency() {
        assert_eq!(CurrencyCode::new("JPY").minor_units(), 0);
        assert_eq!(CurrencyCode::new("usd").minor_units(), 2);
        assert_eq!(CurrencyCode::new("KWD").minor_units(), 3);
    }

    #[test]
    fn locale_presets_pick_language() {
        assert_eq!(LocaleConfig::for_tag("ja-JP").language(), "ja");
        assert_eq!(LocaleConfig::for_tag("").language_tag, "en-US");
        assert_eq!(LocaleConfig::for_tag("fr_FR").decimal_separator, ',');
    }
}
