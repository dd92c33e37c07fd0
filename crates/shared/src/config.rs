//! Ledger configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Ledger core configuration.
///
/// Tunes validation tolerance and the naming conventions used to locate
/// the closing accounts in charts that predate account roles.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Maximum allowed difference between entry debits and credits.
    ///
    /// One unit of the lowest currency subdivision by default.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Decimal,
    /// Name fragment used to locate the Income Summary account when no
    /// account carries the role.
    #[serde(default = "default_income_summary_fragment")]
    pub income_summary_fragment: String,
    /// Name fragment used to locate the Retained Earnings account when no
    /// account carries the role.
    #[serde(default = "default_retained_earnings_fragment")]
    pub retained_earnings_fragment: String,
}

fn default_balance_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

fn default_income_summary_fragment() -> String {
    "Income Summary".to_string()
}

fn default_retained_earnings_fragment() -> String {
    "Retained Earnings".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: default_balance_tolerance(),
            income_summary_fragment: default_income_summary_fragment(),
            retained_earnings_fragment: default_retained_earnings_fragment(),
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_tolerance_is_one_cent() {
        let config = LedgerConfig::default();
        assert_eq!(config.balance_tolerance, dec!(0.01));
    }

    #[test]
    fn test_default_fragments() {
        let config = LedgerConfig::default();
        assert_eq!(config.income_summary_fragment, "Income Summary");
        assert_eq!(config.retained_earnings_fragment, "Retained Earnings");
    }
}
