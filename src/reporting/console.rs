//! # Console Reporting Module / 控制台报告模块
//!
//! Prints the end-of-run summary: a per-file table, the totals line and the
//! final verdict, coloured and localised.
//!
//! 打印运行结束时的摘要：每个文件的结果表、汇总行以及最终判定，带颜色并支持本地化。

use colored::*;

use crate::core::models::{RunOutcome, Verdict};
use crate::infra::t;

/// Prints a formatted summary of the run to the console.
///
/// 在控制台打印格式化的运行摘要。
///
/// # Output Format / 输出格式
/// ```text
/// --- Test Summary ---
///   - Passed   | login.js                                 |     1.23s
///   - Failed   | checkout.coffee                          |     0.45s  (exit code 1)
/// Tests run: 2, Success: 1, Failures: 1. Time elapsed: 1702ms.
/// ```
pub fn print_summary(outcome: &RunOutcome) {
    println!("\n{}", t!("summary.banner").bold());

    if outcome.is_empty() {
        println!("  {}", t!("summary.no_tests").dimmed());
    }

    for file in outcome.files() {
        let status = if file.passed {
            t!("summary.status_passed").green()
        } else {
            t!("summary.status_failed").red()
        };
        let detail = file
            .detail
            .as_ref()
            .map(|d| format!(" ({d})"))
            .unwrap_or_default();

        let duration_str = format!("{:.2?}", file.duration);

        println!(
            "  - {:<8} | {:<40} | {:>10}{}",
            status, file.name, duration_str, detail
        );
    }

    if outcome.stopped_early() {
        println!("{}", t!("summary.stopped_early").yellow());
    }

    let line = t!(
        "summary.line",
        total = outcome.total(),
        success = outcome.successes(),
        failures = outcome.failures(),
        elapsed = outcome.elapsed().as_millis()
    );
    println!("{}", line.bold());
}

/// Prints the captured output of every failed file.
/// Only used in verbose mode: without it the output was already streamed.
///
/// 打印每个失败文件捕获到的输出。仅在详细模式下使用。
pub fn print_failure_details(outcome: &RunOutcome) {
    let failed: Vec<_> = outcome.files().iter().filter(|f| !f.passed).collect();
    if failed.is_empty() {
        return;
    }

    println!("\n{}", t!("summary.failure_banner").red().bold());
    println!("{}", "-".repeat(80));

    for (i, file) in failed.iter().enumerate() {
        println!(
            "[{}/{}] {} '{}'",
            i + 1,
            failed.len(),
            t!("summary.failure_header").red(),
            file.name.cyan()
        );
        println!("  {}", file.path.display());

        println!("\n--- {} ---\n", t!("summary.output_header").yellow());
        if file.output.trim().is_empty() {
            println!("{}", t!("summary.no_output").dimmed());
        } else {
            println!("{}", file.output.trim_end());
        }
        println!("\n{}", "-".repeat(80));
    }
}

/// Prints the closing verdict line.
pub fn print_verdict(outcome: &RunOutcome) {
    match outcome.verdict() {
        Verdict::Passed if outcome.failures() > 0 => {
            println!(
                "\n{}",
                t!("summary.failures_ignored", count = outcome.failures())
                    .yellow()
                    .bold()
            );
        }
        Verdict::Passed => println!("\n{}", t!("summary.all_passed").green().bold()),
        Verdict::Failed => println!("\n{}", t!("summary.run_failed").red().bold()),
    }
}
