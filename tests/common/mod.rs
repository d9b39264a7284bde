#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const AMOUNTS: [u64; 3] = [10_000, 50_000, 100_000];

/// 可調整的假定價模型腳本
#[derive(Default)]
pub struct FakeModel {
    missing: Vec<(u64, u32)>,
    malformed: Vec<(u64, u32)>,
}

impl FakeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without(mut self, amount: u64, year: u32) -> Self {
        self.missing.push((amount, year));
        self
    }

    pub fn malformed(mut self, amount: u64, year: u32) -> Self {
        self.malformed.push((amount, year));
        self
    }

    pub fn price(amount: u64, year: u32) -> f64 {
        let index = AMOUNTS.iter().position(|a| *a == amount).unwrap_or(0);
        1.0 + (index as f64 + 1.0) * year as f64 / 100.0
    }

    fn script(&self) -> String {
        let mut script =
            String::from("#!/bin/sh\necho \"buyback model: $1 $2 $3\"\ncase \"$1\" in\n");
        for amount in AMOUNTS {
            script.push_str(&format!("  {})\n    cat <<'EOF'\nYear Price Supply\n", amount));
            for year in 1..=10u32 {
                if self.missing.contains(&(amount, year)) {
                    continue;
                }
                if self.malformed.contains(&(amount, year)) {
                    script.push_str(&format!("{} $abc 1000\n", year));
                } else {
                    script.push_str(&format!(
                        "{} ${:.4} {}\n",
                        year,
                        Self::price(amount, year),
                        1_000_000 - amount as u32 * year / 100
                    ));
                }
            }
            script.push_str("EOF\n    ;;\n");
        }
        script.push_str("esac\necho 'simulation finished' >&2\n");
        script
    }

    pub fn write_to(&self, dir: &Path) -> PathBuf {
        let path = dir.join("model.sh");
        std::fs::write(&path, self.script()).expect("write fake model");
        path
    }
}

pub fn data_rows(table: &str) -> Vec<String> {
    let lines: Vec<&str> = table.lines().collect();
    let rule = "-".repeat(60);
    let start = lines
        .iter()
        .position(|l| *l == rule)
        .expect("table has a header rule");
    lines[start + 1..]
        .iter()
        .take_while(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}
