//! # Reporting Module / 报告模块
//!
//! This module handles the display and export of run results: a colourful,
//! localised console summary and an optional JSON summary file.
//!
//! 此模块处理运行结果的显示和导出：彩色、本地化的控制台摘要，以及可选的 JSON 摘要文件。

pub mod console;
pub mod json;

// Re-export common reporting functions
pub use console::{print_failure_details, print_summary, print_verdict};
pub use json::write_json_report;
