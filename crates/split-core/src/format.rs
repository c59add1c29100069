use rust_decimal::Decimal;
use split_domain::currency::{
    format_currency_value, CurrencyCode, CurrencyDisplay, LocaleConfig, NegativeStyle,
};

use crate::money::round_to_minor;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: Decimal) -> String;
}

/// Currency and locale used to render amounts and balances.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BalanceStyle {
    pub currency: CurrencyCode,
    pub locale: LocaleConfig,
    pub display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
    /// Overrides the currency's minor units when set.
    pub precision: Option<u32>,
}

impl BalanceStyle {
    pub fn new(currency: CurrencyCode, locale: LocaleConfig) -> Self {
        Self {
            currency,
            locale,
            ..Self::default()
        }
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Minor-unit scale for rounding and display.
    pub fn scale(&self) -> u32 {
        self.precision.unwrap_or_else(|| self.currency.minor_units())
    }

    fn magnitude(&self, amount: Decimal) -> String {
        format_currency_value(
            amount.abs(),
            &self.currency,
            &self.locale,
            self.scale(),
            self.display,
            NegativeStyle::Sign,
        )
    }
}

impl CurrencyFormatter for BalanceStyle {
    fn format_amount(&self, amount: Decimal) -> String {
        format_currency_value(
            amount,
            &self.currency,
            &self.locale,
            self.scale(),
            self.display,
            self.negative_style,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceSign {
    Positive,
    Negative,
    Zero,
}

/// Presentation tone for a balance; renderers map it to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Credit,
    Debit,
    Neutral,
}

impl BalanceSign {
    pub fn tone(self) -> Tone {
        match self {
            BalanceSign::Positive => Tone::Credit,
            BalanceSign::Negative => Tone::Debit,
            BalanceSign::Zero => Tone::Neutral,
        }
    }

    pub fn label(self) -> BalanceLabel {
        match self {
            BalanceSign::Positive => BalanceLabel::IsOwed,
            BalanceSign::Negative => BalanceLabel::Owes,
            BalanceSign::Zero => BalanceLabel::Settled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceLabel {
    IsOwed,
    Owes,
    Settled,
}

impl BalanceLabel {
    /// Localized text; languages without a table fall back to English.
    pub fn text(self, language: &str) -> &'static str {
        match (language, self) {
            ("ja", BalanceLabel::IsOwed) => "受け取り",
            ("ja", BalanceLabel::Owes) => "支払い",
            ("ja", BalanceLabel::Settled) => "精算済み",
            (_, BalanceLabel::IsOwed) => "is owed",
            (_, BalanceLabel::Owes) => "owes",
            (_, BalanceLabel::Settled) => "settled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBalance {
    pub text: String,
    pub sign: BalanceSign,
    pub label: String,
}

impl FormattedBalance {
    pub fn tone(&self) -> Tone {
        self.sign.tone()
    }
}

/// Renders a balance as an explicitly signed amount plus a qualitative
/// label: `+$12.50`, `-¥500` or `±$0.00`.
///
/// The sign is decided after rounding to the minor unit, so a residue
/// smaller than one unit shows as settled.
pub fn format_balance(balance: Decimal, style: &BalanceStyle) -> FormattedBalance {
    let rounded = round_to_minor(balance, style.scale());
    let sign = if rounded > Decimal::ZERO {
        BalanceSign::Positive
    } else if rounded < Decimal::ZERO {
        BalanceSign::Negative
    } else {
        BalanceSign::Zero
    };
    let magnitude = style.magnitude(rounded);
    let prefix = match sign {
        BalanceSign::Positive => "+",
        BalanceSign::Negative => "-",
        BalanceSign::Zero => "±",
    };
    FormattedBalance {
        text: format!("{prefix}{magnitude}"),
        sign,
        label: sign.label().text(&style.locale.language()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn yen() -> BalanceStyle {
        BalanceStyle::new(CurrencyCode::new("JPY"), LocaleConfig::for_tag("ja-JP"))
    }

    #[test]
    fn yen_balances_carry_japanese_labels() {
        let owed = format_balance(dec!(1500), &yen());
        assert_eq!(owed.text, "+¥1,500");
        assert_eq!(owed.label, "受け取り");
        assert_eq!(owed.tone(), Tone::Credit);

        let owes = format_balance(dec!(-500), &yen());
        assert_eq!(owes.text, "-¥500");
        assert_eq!(owes.label, "支払い");
        assert_eq!(owes.sign, BalanceSign::Negative);

        let settled = format_balance(Decimal::ZERO, &yen());
        assert_eq!(settled.text, "±¥0");
        assert_eq!(settled.label, "精算済み");
        assert_eq!(settled.tone(), Tone::Neutral);
    }

    #[test]
    fn sub_unit_residue_renders_as_settled() {
        let style = BalanceStyle::default();
        let formatted = format_balance(dec!(-0.004), &style);
        assert_eq!(formatted.text, "±$0.00");
        assert_eq!(formatted.label, "settled");
    }

    #[test]
    fn precision_override_changes_scale() {
        let style = BalanceStyle::default().with_precision(0);
        assert_eq!(format_balance(dec!(12.5), &style).text, "+$13");
        assert_eq!(style.scale(), 0);
    }

    #[test]
    fn plain_amounts_follow_negative_style() {
        let style = BalanceStyle {
            negative_style: NegativeStyle::Parentheses,
            ..BalanceStyle::default()
        };
        assert_eq!(style.format_amount(dec!(-3.5)), "($3.50)");
        assert_eq!(style.format_amount(dec!(1234)), "$1,234.00");
    }
}
