pub mod generator;
pub mod parser;
pub mod report;
pub mod source;

pub use crate::domain::model::{Observation, PriceLookup, Report, ReportRow, Scenario};
pub use crate::domain::ports::{ConfigProvider, ModelRunner, PriceSource};
pub use crate::utils::error::Result;
