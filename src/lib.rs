//! Generator for the Activity-Based Costing demonstration workbook of the
//! bearing finishing workshop case.
//!
//! The workbook tabulates pre-computed figures and leaves the simple sums and
//! ratios to the spreadsheet as formulas:
//!
//! ```text
//! 说明 | 基础数据 | 成本归集 | 作业识别 | 成本动因 | 产品成本(ABC) | 成本对比 | 可视化图表
//! ```

pub mod charts;
pub mod config;
pub mod dataset;
pub mod generator;
pub mod inspect;
pub mod layout;
pub mod logging;
pub mod sheets;
pub mod styles;

pub use config::{CliOverrides, Config};
pub use dataset::Dataset;
pub use generator::{build_workbook, generate};
