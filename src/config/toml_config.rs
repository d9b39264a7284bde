use crate::config::validate_provider;
use crate::domain::model::{
    OutputFormat, Scenario, BASELINE_PRICE, DEFAULT_HORIZON, DEFAULT_RATE, DEFAULT_SCENARIOS,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{validate_positive_number, validate_required_field, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub model: ModelConfig,
    #[serde(default)]
    pub scenarios: ScenarioConfig,
    #[serde(default)]
    pub report: ReportConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    pub program: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    pub working_dir: Option<String>,
    pub horizon: Option<u32>,
    pub rate: Option<f64>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub amounts: Option<Vec<Scenario>>,
    pub first_year: Option<u32>,
    pub last_year: Option<u32>,
    pub baseline_price: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.report.format = Some(format);
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn program(&self) -> &str {
        self.model.program.as_deref().unwrap_or_default()
    }

    fn model_args(&self) -> &[String] {
        &self.model.args
    }

    fn working_dir(&self) -> Option<&str> {
        self.model.working_dir.as_deref()
    }

    fn horizon(&self) -> u32 {
        self.model.horizon.unwrap_or(DEFAULT_HORIZON)
    }

    fn rate(&self) -> f64 {
        self.model.rate.unwrap_or(DEFAULT_RATE)
    }

    fn timeout(&self) -> Option<Duration> {
        self.model.timeout_seconds.map(Duration::from_secs)
    }

    fn amounts(&self) -> &[Scenario] {
        self.scenarios.amounts.as_deref().unwrap_or(&DEFAULT_SCENARIOS)
    }

    fn first_year(&self) -> u32 {
        self.scenarios.first_year.unwrap_or(1)
    }

    fn last_year(&self) -> u32 {
        self.scenarios.last_year.unwrap_or_else(|| self.horizon())
    }

    fn baseline_price(&self) -> f64 {
        self.scenarios.baseline_price.unwrap_or(BASELINE_PRICE)
    }

    fn output_format(&self) -> OutputFormat {
        self.report.format.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_required_field("model.program", &self.model.program)?;
        validate_provider(self)?;
        if let Some(seconds) = self.model.timeout_seconds {
            validate_positive_number("model.timeout_seconds", seconds, 1)?;
        }
        Ok(())
    }
}
