//! # JSON Reporting Module / JSON 报告模块
//!
//! Writes the run summary as a JSON document for CI dashboards. This is the
//! runner's own summary; the xunit file is produced by the external tool.
//!
//! 将运行摘要写为 JSON 文档，供 CI 仪表盘使用。
//! 这是本运行器自己的摘要；xunit 文件由外部工具生成。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::{FileOutcome, RunOutcome, Verdict};
use crate::infra::fs::ensure_parent_dir;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub verdict: Verdict,
    pub tests_run: usize,
    pub successes: usize,
    pub failures: usize,
    pub elapsed_ms: u64,
    pub stopped_early: bool,
    pub files: &'a [FileOutcome],
}

impl<'a> JsonReport<'a> {
    pub fn from_outcome(outcome: &'a RunOutcome) -> Self {
        Self {
            generated_at: Utc::now(),
            verdict: outcome.verdict(),
            tests_run: outcome.total(),
            successes: outcome.successes(),
            failures: outcome.failures(),
            elapsed_ms: u64::try_from(outcome.elapsed().as_millis()).unwrap_or(u64::MAX),
            stopped_early: outcome.stopped_early(),
            files: outcome.files(),
        }
    }
}

/// Serializes `outcome` to pretty-printed JSON at `output_path`, creating
/// parent directories as needed.
///
/// 将 `outcome` 序列化为格式化的 JSON 并写入 `output_path`，必要时创建父目录。
pub fn write_json_report(outcome: &RunOutcome, output_path: &Path) -> Result<()> {
    let report = JsonReport::from_outcome(outcome);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;

    ensure_parent_dir(output_path)?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))?;
    Ok(())
}
