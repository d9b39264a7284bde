use crate::domain::model::PriceLookup;

/// 在模型輸出中尋找某一年的價格。
///
/// 取第一個「首欄等於年份且至少兩欄」的行，第二欄去掉一個前導 `$` 後解析為小數。
/// 欄位不足的行會被略過並繼續往下找；第一個完整的行若數字無效則直接判定失敗。
pub fn scrape_price(output: &str, year: u32) -> PriceLookup {
    let year_token = year.to_string();

    for line in output.lines() {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(year_token.as_str()) {
            continue;
        }

        let Some(price_token) = tokens.next() else {
            continue;
        };

        return parse_price_token(price_token);
    }

    PriceLookup::MissingLine
}

fn parse_price_token(token: &str) -> PriceLookup {
    let digits = token.strip_prefix('$').unwrap_or(token);

    match digits.parse::<f64>() {
        // inf / nan 不算合法價格
        Ok(price) if price.is_finite() => PriceLookup::Found(price),
        _ => PriceLookup::MalformedNumber(token.to_string()),
    }
}
