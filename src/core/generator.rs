use crate::core::report::{percent_change, render};
use crate::domain::model::{Observation, OutputFormat, PricePoint, Report, ReportRow, Scenario};
use crate::domain::ports::{ConfigProvider, PriceSource};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::io::Write;

pub struct ReportGenerator<S: PriceSource> {
    source: S,
    amounts: Vec<Scenario>,
    first_year: u32,
    last_year: u32,
    baseline_price: f64,
    monitor: SystemMonitor,
}

impl<S: PriceSource> ReportGenerator<S> {
    pub fn new(
        source: S,
        amounts: Vec<Scenario>,
        first_year: u32,
        last_year: u32,
        baseline_price: f64,
    ) -> Self {
        Self {
            source,
            amounts,
            first_year,
            last_year,
            baseline_price,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn from_config<C: ConfigProvider>(source: S, config: &C) -> Self {
        Self::new(
            source,
            config.amounts().to_vec(),
            config.first_year(),
            config.last_year(),
            config.baseline_price(),
        )
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = SystemMonitor::new(enabled);
        self
    }

    /// 逐年逐情境取價；任一情境缺值則整年略過
    pub async fn produce(&self) -> Report {
        let mut rows = Vec::new();
        let mut skipped_years = Vec::new();

        for year in self.first_year..=self.last_year {
            let mut observations = Vec::with_capacity(self.amounts.len());
            for &amount in &self.amounts {
                observations.push(Observation {
                    amount,
                    year,
                    price: self.source.fetch_price(amount, year).await,
                });
            }

            match self.build_row(year, &observations) {
                Some(row) => rows.push(row),
                None => {
                    tracing::debug!("Skipping year {}: at least one price unavailable", year);
                    skipped_years.push(year);
                }
            }
        }

        Report {
            baseline_price: self.baseline_price,
            amounts: self.amounts.clone(),
            first_year: self.first_year,
            last_year: self.last_year,
            rows,
            skipped_years,
        }
    }

    fn build_row(&self, year: u32, observations: &[Observation]) -> Option<ReportRow> {
        let points = observations
            .iter()
            .map(|observation| {
                observation.price.map(|price| PricePoint {
                    amount: observation.amount,
                    price,
                    change_pct: percent_change(price, self.baseline_price),
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(ReportRow { year, points })
    }

    /// 執行所有模型呼叫並整理成報表
    pub async fn collect(&self) -> Report {
        tracing::info!(
            "Fetching prices for {} scenarios, years {}-{}",
            self.amounts.len(),
            self.first_year,
            self.last_year
        );

        let report = self.produce().await;
        self.monitor.log_stats("Fetch");

        tracing::info!(
            "Collected {} rows, skipped {} years",
            report.rows.len(),
            report.skipped_years.len()
        );
        report
    }

    /// 只做渲染與輸出，不再呼叫模型
    pub fn write_report<W: Write>(
        &self,
        report: &Report,
        format: OutputFormat,
        out: &mut W,
    ) -> Result<()> {
        let rendered = render(report, format)?;
        out.write_all(rendered.as_bytes())?;
        out.flush()?;

        self.monitor.log_final_stats();
        Ok(())
    }

    /// 產生報表並寫入 `out`
    pub async fn run<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<Report> {
        let report = self.collect().await;
        self.write_report(&report, format, out)?;
        Ok(report)
    }
}
