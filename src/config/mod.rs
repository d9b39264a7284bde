#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_amounts, validate_baseline, validate_finite, validate_non_empty_string,
    validate_year_span,
};

/// 各種配置來源共用的檢查
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_non_empty_string("program", config.program())?;
    validate_amounts("amounts", config.amounts())?;
    validate_year_span(config.first_year(), config.last_year(), config.horizon())?;
    validate_finite("rate", config.rate())?;
    validate_baseline("baseline_price", config.baseline_price())?;
    Ok(())
}
