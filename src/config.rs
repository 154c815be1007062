//! Configuration types for risk-engine

use rust_decimal::Decimal;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub forex: ForexConfig,
    #[serde(default)]
    pub crypto: CryptoConfig,
    #[serde(default)]
    pub options: OptionsConfig,
    #[serde(default)]
    pub futures: FuturesConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Default account used by the CLI when flags are omitted
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    /// Account balance in account currency
    #[serde(default = "default_balance")]
    pub balance: Decimal,

    /// Risk per trade in percent (1 = 1%)
    #[serde(default = "default_risk_percentage")]
    pub risk_percentage: Decimal,

    /// Account currency code
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_balance() -> Decimal {
    Decimal::new(10_000, 0)
}
fn default_risk_percentage() -> Decimal {
    Decimal::ONE
}
fn default_currency() -> String {
    "USD".to_string()
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            balance: default_balance(),
            risk_percentage: default_risk_percentage(),
            currency: default_currency(),
        }
    }
}

/// Forex calculator settings
#[derive(Debug, Clone, Deserialize)]
pub struct ForexConfig {
    /// Base-currency units in one standard lot
    #[serde(default = "default_contract_units")]
    pub contract_units: Decimal,

    /// Smallest broker-supported lot increment
    #[serde(default = "default_lot_step")]
    pub lot_step: Decimal,
}

fn default_contract_units() -> Decimal {
    Decimal::new(100_000, 0)
}
fn default_lot_step() -> Decimal {
    Decimal::new(1, 2) // 0.01 = micro lot
}

impl Default for ForexConfig {
    fn default() -> Self {
        Self {
            contract_units: default_contract_units(),
            lot_step: default_lot_step(),
        }
    }
}

/// Crypto margin calculator settings
#[derive(Debug, Clone, Deserialize)]
pub struct CryptoConfig {
    /// Maintenance margin rate used when a request omits one
    #[serde(default)]
    pub default_maintenance_margin_rate: Decimal,

    /// Hours between funding payments
    #[serde(default = "default_funding_interval_hours")]
    pub funding_interval_hours: Decimal,
}

fn default_funding_interval_hours() -> Decimal {
    Decimal::new(8, 0)
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            default_maintenance_margin_rate: Decimal::ZERO,
            funding_interval_hours: default_funding_interval_hours(),
        }
    }
}

/// Options calculator settings
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// Shares per contract
    #[serde(default = "default_contract_size")]
    pub contract_size: u32,

    /// Annual risk-free rate for Black-Scholes (0.05 = 5%)
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Relative band around the strike treated as at-the-money
    #[serde(default = "default_atm_band")]
    pub atm_band: Decimal,
}

fn default_contract_size() -> u32 {
    100
}
fn default_risk_free_rate() -> f64 {
    0.05
}
fn default_atm_band() -> Decimal {
    Decimal::new(1, 3) // 0.001 = 0.1%
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            contract_size: default_contract_size(),
            risk_free_rate: default_risk_free_rate(),
            atm_band: default_atm_band(),
        }
    }
}

/// Futures calculator settings
#[derive(Debug, Clone, Deserialize)]
pub struct FuturesConfig {
    /// Tick size used when a request omits one
    #[serde(default = "default_tick_size")]
    pub default_tick_size: Decimal,
}

fn default_tick_size() -> Decimal {
    Decimal::new(25, 2) // 0.25, E-mini index futures
}

impl Default for FuturesConfig {
    fn default() -> Self {
        Self {
            default_tick_size: default_tick_size(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
