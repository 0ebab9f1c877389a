//! # Casper Runner Library / Casper Runner 库
//!
//! This library provides the core functionality for the Casper Runner tool,
//! a configuration-driven orchestrator that discovers CasperJS test scripts
//! and runs the external `casperjs` executable once per file.
//!
//! 此库为 Casper Runner 工具提供核心功能，
//! 这是一个配置驱动的编排器，用于发现 CasperJS 测试脚本，
//! 并为每个文件运行一次外部 `casperjs` 可执行文件。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration, discovery, command construction and orchestration
//! - `infra` - Process execution, file system helpers and i18n
//! - `reporting` - Console and JSON summaries
//! - `cli` - Command-line interface and commands
//! - `errors` - Crate-wide error type
//! - `logging` - `tracing` subscriber setup
//!
//! - `core` - 配置、测试发现、命令构建和编排
//! - `infra` - 进程执行、文件系统辅助函数和国际化
//! - `reporting` - 控制台和 JSON 摘要
//! - `cli` - 命令行接口和命令
//! - `errors` - 全局错误类型
//! - `logging` - `tracing` 订阅器设置

pub mod cli;
pub mod core;
pub mod errors;
pub mod infra;
pub mod logging;
pub mod reporting;

// Re-export commonly used items
pub use core::{command, config, discovery, execution, models};
pub use errors::{Result, RunnerError};

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// Tries the full locale (e.g. "zh-CN"), then just the language code
/// (e.g. "en"), and finally falls back to "en".
pub fn init() {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    set_language(&locale);
}

/// Selects the console language, falling back the same way as [`init`].
pub fn set_language(requested: &str) {
    let available_locales = rust_i18n::available_locales!();

    let lang = if available_locales.contains(&requested) {
        requested
    } else {
        requested
            .split(['-', '_'])
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
