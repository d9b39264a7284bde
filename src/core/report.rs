use crate::domain::model::{OutputFormat, Report, ReportRow, Scenario};
use crate::utils::error::{ReportError, Result};
use serde::Serialize;

const BANNER_WIDTH: usize = 80;
const RULE_WIDTH: usize = 60;
const YEAR_COLUMN_WIDTH: usize = 6;
const SCENARIO_COLUMN_WIDTH: usize = 15;

/// 相對基準價格的漲跌百分比
pub fn percent_change(price: f64, baseline: f64) -> f64 {
    ((price - baseline) / baseline) * 100.0
}

/// 欄位標題，整千的金額以 K 表示
pub fn scenario_label(amount: Scenario) -> String {
    if amount % 1000 == 0 {
        format!("回购 ${}K", amount / 1000)
    } else {
        format!("回购 ${}", amount)
    }
}

fn scenario_count_label(count: usize) -> String {
    const NUMERALS: [&str; 10] = ["一", "两", "三", "四", "五", "六", "七", "八", "九", "十"];
    match count {
        1..=10 => format!("{}种", NUMERALS[count - 1]),
        _ => format!("{}种", count),
    }
}

pub fn render_title(report: &Report) -> String {
    format!(
        "{}回购金额下 {}-{} 年每年的价格对比",
        scenario_count_label(report.amounts.len()),
        report.first_year,
        report.last_year
    )
}

pub fn render_header(amounts: &[Scenario]) -> String {
    let mut header = format!("{:<width$}", "年份", width = YEAR_COLUMN_WIDTH);
    for &amount in amounts {
        header.push_str(&format!(
            " {:<width$}",
            scenario_label(amount),
            width = SCENARIO_COLUMN_WIDTH
        ));
    }
    header
}

pub fn render_row(row: &ReportRow) -> String {
    let mut line = format!("{:<width$}", row.year, width = YEAR_COLUMN_WIDTH);
    for point in &row.points {
        line.push_str(&format!(" ${:<7.4} ({:+.1}%)", point.price, point.change_pct));
    }
    line
}

/// 固定寬度的終端表格，每行以換行結尾
pub fn render_table(report: &Report) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut lines = vec![
        banner.clone(),
        render_title(report),
        banner.clone(),
        String::new(),
        render_header(&report.amounts),
        "-".repeat(RULE_WIDTH),
    ];
    lines.extend(report.rows.iter().map(render_row));
    lines.push(String::new());
    lines.push(banner);

    let mut table = lines.join("\n");
    table.push('\n');
    table
}

#[derive(Debug, Serialize)]
struct CsvRecord {
    year: u32,
    amount: Scenario,
    price: f64,
    change_pct: f64,
}

pub fn render_csv(report: &Report) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for row in &report.rows {
        for point in &row.points {
            writer.serialize(CsvRecord {
                year: row.year,
                amount: point.amount,
                price: point.price,
                change_pct: point.change_pct,
            })?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| ReportError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

pub fn render_json(report: &Report) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(report)),
        OutputFormat::Csv => render_csv(report),
        OutputFormat::Json => render_json(report),
    }
}
