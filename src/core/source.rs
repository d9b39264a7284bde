use crate::core::parser::scrape_price;
use crate::domain::model::{PriceLookup, Scenario};
use crate::domain::ports::{ModelRunner, PriceSource};
use async_trait::async_trait;

/// 每次取價都重新執行一次模型，不做快取
pub struct ModelPriceSource<R: ModelRunner> {
    runner: R,
    horizon: u32,
    rate: f64,
}

impl<R: ModelRunner> ModelPriceSource<R> {
    pub fn new(runner: R, horizon: u32, rate: f64) -> Self {
        Self {
            runner,
            horizon,
            rate,
        }
    }
}

#[async_trait]
impl<R: ModelRunner> PriceSource for ModelPriceSource<R> {
    async fn fetch_price(&self, amount: Scenario, year: u32) -> Option<f64> {
        let output = match self.runner.run(amount, self.horizon, self.rate).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("⚠️ Model run failed for amount {}: {}", amount, e);
                return None;
            }
        };

        if let Some(code) = output.exit_code.filter(|code| *code != 0) {
            tracing::warn!(
                "⚠️ Model exited with status {} for amount {}, parsing its output anyway",
                code,
                amount
            );
        }

        let lookup = scrape_price(&output.text, year);
        match &lookup {
            PriceLookup::Found(price) => {
                tracing::debug!("amount={} year={} price={}", amount, year, price);
            }
            PriceLookup::MissingLine => {
                tracing::debug!("amount={} year={}: no line for this year", amount, year);
            }
            PriceLookup::MalformedNumber(token) => {
                tracing::debug!(
                    "amount={} year={}: malformed price token '{}'",
                    amount,
                    year,
                    token
                );
            }
        }

        lookup.price()
    }
}
