use crate::domain::model::{ModelOutput, OutputFormat, Scenario};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn program(&self) -> &str;
    fn model_args(&self) -> &[String];
    fn working_dir(&self) -> Option<&str>;
    fn horizon(&self) -> u32;
    fn rate(&self) -> f64;
    fn timeout(&self) -> Option<Duration>;
    fn amounts(&self) -> &[Scenario];
    fn first_year(&self) -> u32;
    fn last_year(&self) -> u32;
    fn baseline_price(&self) -> f64;
    fn output_format(&self) -> OutputFormat;
}

/// 執行外部定價模型，回傳其原始文字輸出
#[async_trait]
pub trait ModelRunner: Send + Sync {
    async fn run(&self, amount: Scenario, horizon: u32, rate: f64) -> Result<ModelOutput>;
}

/// 取得某情境某年份的價格；任何失敗都回傳 None
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(&self, amount: Scenario, year: u32) -> Option<f64>;
}
