use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use split_domain::currency::{CurrencyCode, CurrencyDisplay, LocaleConfig, NegativeStyle};

/// User preferences that shape how balances and transfers are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub currency_display: CurrencyDisplay,
    #[serde(default)]
    pub negative_style: NegativeStyle,
    /// Overrides the currency's minor units when set.
    #[serde(default)]
    pub default_currency_precision: Option<u8>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    /// Drops color and symbols from terminal output.
    #[serde(default)]
    pub screen_reader_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            currency_display: CurrencyDisplay::default(),
            negative_style: NegativeStyle::default(),
            default_currency_precision: None,
            ui_color_enabled: Self::default_ui_color_enabled(),
            screen_reader_mode: false,
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(&self.currency)
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    /// Minor-unit digits used for rounding: the precision override when
    /// present, otherwise the currency's own minor units.
    pub fn minor_unit_scale(&self) -> u32 {
        self.default_currency_precision
            .map(u32::from)
            .unwrap_or_else(|| self.currency_code().minor_units())
    }

    pub fn colors_enabled(&self) -> bool {
        self.ui_color_enabled && !self.screen_reader_mode
    }

    /// Directory holding preferences when no explicit base is given.
    pub fn default_base_dir() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("splitledger")
    }
}
