use crate::config::validate_provider;
use crate::domain::model::{OutputFormat, Scenario, BASELINE_PRICE, DEFAULT_HORIZON, DEFAULT_RATE};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "price-comparison")]
#[command(about = "Compare token price trajectories across buyback amounts")]
pub struct CliConfig {
    /// Pricing model executable
    #[arg(long, default_value = "python3")]
    pub program: String,

    /// Arguments placed before `<amount> <horizon> <rate>` (repeatable)
    #[arg(
        long = "model-arg",
        action = clap::ArgAction::Append,
        allow_hyphen_values = true,
        default_value = "calculate_final_model.py"
    )]
    pub model_args: Vec<String>,

    /// Working directory for the pricing model
    #[arg(long)]
    pub working_dir: Option<String>,

    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    pub horizon: u32,

    #[arg(long, default_value_t = DEFAULT_RATE)]
    pub rate: f64,

    /// Buyback amounts, one table column each
    #[arg(long, value_delimiter = ',', default_values_t = [10_000u64, 50_000, 100_000])]
    pub amounts: Vec<Scenario>,

    #[arg(long, default_value_t = 1)]
    pub first_year: u32,

    #[arg(long, default_value_t = 10)]
    pub last_year: u32,

    /// Reference price for percentage change
    #[arg(long, default_value_t = BASELINE_PRICE)]
    pub baseline: f64,

    /// Kill the pricing model after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Output format: table, csv or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// TOML configuration file; replaces the model and scenario flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory usage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn program(&self) -> &str {
        &self.program
    }

    fn model_args(&self) -> &[String] {
        &self.model_args
    }

    fn working_dir(&self) -> Option<&str> {
        self.working_dir.as_deref()
    }

    fn horizon(&self) -> u32 {
        self.horizon
    }

    fn rate(&self) -> f64 {
        self.rate
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn amounts(&self) -> &[Scenario] {
        &self.amounts
    }

    fn first_year(&self) -> u32 {
        self.first_year
    }

    fn last_year(&self) -> u32 {
        self.last_year
    }

    fn baseline_price(&self) -> f64 {
        self.baseline
    }

    fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        if let Some(seconds) = self.timeout_secs {
            crate::utils::validation::validate_positive_number("timeout_secs", seconds, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_arguments() {
        let config = CliConfig::parse_from(["price-comparison"]);

        assert_eq!(config.program(), "python3");
        assert_eq!(config.model_args(), ["calculate_final_model.py".to_string()]);
        assert_eq!(config.amounts(), &[10_000, 50_000, 100_000]);
        assert_eq!(config.horizon(), 10);
        assert_eq!(config.rate(), 1.0);
        assert_eq!((config.first_year(), config.last_year()), (1, 10));
        assert_eq!(config.baseline_price(), 1.0);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.output_format(), OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_overrides() {
        let config = CliConfig::parse_from([
            "price-comparison",
            "--program",
            "./model",
            "--model-arg",
            "--fast",
            "--amounts",
            "20000,40000",
            "--last-year",
            "5",
            "--timeout-secs",
            "30",
            "--format",
            "csv",
        ]);

        assert_eq!(config.program(), "./model");
        assert_eq!(config.model_args(), ["--fast".to_string()]);
        assert_eq!(config.amounts(), &[20_000, 40_000]);
        assert_eq!(config.last_year(), 5);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.output_format(), OutputFormat::Csv);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let zero_amount = CliConfig::parse_from(["price-comparison", "--amounts", "10000,0"]);
        assert!(zero_amount.validate().is_err());

        let inverted = CliConfig::parse_from([
            "price-comparison",
            "--first-year",
            "8",
            "--last-year",
            "3",
        ]);
        assert!(inverted.validate().is_err());

        let zero_baseline = CliConfig::parse_from(["price-comparison", "--baseline", "0"]);
        assert!(zero_baseline.validate().is_err());

        let zero_timeout = CliConfig::parse_from(["price-comparison", "--timeout-secs", "0"]);
        assert!(zero_timeout.validate().is_err());
    }
}
