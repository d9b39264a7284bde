pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::command::CommandRunner;
pub use crate::core::{generator::ReportGenerator, source::ModelPriceSource};
pub use domain::model::{OutputFormat, Report};
pub use utils::error::{ReportError, Result};
