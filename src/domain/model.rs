use serde::{Deserialize, Serialize};

/// 回購金額情境，僅作為定價模型的參數
pub type Scenario = u64;

pub const DEFAULT_SCENARIOS: [Scenario; 3] = [10_000, 50_000, 100_000];
pub const DEFAULT_HORIZON: u32 = 10;
pub const DEFAULT_RATE: f64 = 1.0;
pub const BASELINE_PRICE: f64 = 1.0;

/// 單一 (情境, 年份) 的觀測值，價格解析失敗時為 None
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub amount: Scenario,
    pub year: u32,
    pub price: Option<f64>,
}

/// 從模型輸出抓取某一年價格的結果
#[derive(Debug, Clone, PartialEq)]
pub enum PriceLookup {
    Found(f64),
    MissingLine,
    MalformedNumber(String),
}

impl PriceLookup {
    pub fn price(&self) -> Option<f64> {
        match self {
            PriceLookup::Found(price) => Some(*price),
            PriceLookup::MissingLine | PriceLookup::MalformedNumber(_) => None,
        }
    }
}

/// 外部模型一次執行的完整輸出 (stdout 之後接 stderr)
#[derive(Debug, Clone, Default)]
pub struct ModelOutput {
    pub text: String,
    pub exit_code: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub amount: Scenario,
    pub price: f64,
    pub change_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub year: u32,
    pub points: Vec<PricePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub baseline_price: f64,
    pub amounts: Vec<Scenario>,
    pub first_year: u32,
    pub last_year: u32,
    pub rows: Vec<ReportRow>,
    pub skipped_years: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unsupported format '{}', expected one of: table, csv, json",
                other
            )),
        }
    }
}
