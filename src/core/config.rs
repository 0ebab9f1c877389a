//! # Configuration Module / 配置模块
//!
//! Defines [`RunConfiguration`], the immutable option set shared by every
//! component during a run, and [`SuiteConfig`], the shape of a
//! `CasperRunner.toml` file. Loading only deserializes; semantic checks live
//! in [`RunConfiguration::validate`] and [`SuiteConfig::tests_directory`].
//!
//! 定义 [`RunConfiguration`]（运行期间所有组件共享的不可变选项集）
//! 和 [`SuiteConfig`]（`CasperRunner.toml` 文件的结构）。
//! 加载过程只做反序列化；语义检查位于 [`RunConfiguration::validate`]
//! 和 [`SuiteConfig::tests_directory`] 中。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, RunnerError};
use crate::infra::fs::is_directory;
use crate::logging::parse_level_str;

/// Name of the configuration file looked up in the working directory.
/// 在工作目录中查找的配置文件名。
pub const DEFAULT_CONFIG_FILE: &str = "CasperRunner.toml";

/// Executable used when none is configured.
/// 未配置时使用的可执行文件。
pub const DEFAULT_EXECUTABLE: &str = "casperjs";

/// Execution options for one run of the external test runner.
/// Built once before the run and only read afterwards.
///
/// 外部测试运行器一次运行的执行选项。
/// 在运行前构建一次，之后只读。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfiguration {
    /// Executable name or path, optionally followed by leading arguments
    /// (e.g. `"node /opt/casperjs/bin/casperjs"`).
    /// 可执行文件名称或路径，可以附带前置参数。
    pub executable: String,
    /// Run `*.js` files. / 运行 `*.js` 文件。
    pub include_javascript: bool,
    /// Run `*.coffee` files. / 运行 `*.coffee` 文件。
    pub include_coffeescript: bool,
    /// Stop after the first failing file and pass `--fail-fast` to the tool.
    /// 在第一个失败的文件后停止，并向工具传递 `--fail-fast`。
    pub fail_fast: bool,
    /// Report success even when some tests failed.
    /// 即使部分测试失败也报告成功。
    pub ignore_failures: bool,
    /// Log the reason when a process cannot be started.
    /// 当进程无法启动时记录原因。
    pub verbose: bool,
    /// Pass `--direct` so the tool logs to the console.
    /// 传递 `--direct`，使工具将日志输出到控制台。
    pub direct: bool,
    /// Files included before each test (`--includes=`).
    pub includes: Option<String>,
    /// Scripts run before the suite (`--pre=`).
    pub pre: Option<String>,
    /// Scripts run after the suite (`--post=`).
    pub post: Option<String>,
    /// Where the tool writes its xunit report (`--xunit=`).
    pub xunit: Option<String>,
    /// Threshold for this runner's own logs.
    /// 本运行器自身日志的级别阈值。
    pub log_level: Option<String>,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            include_javascript: true,
            include_coffeescript: true,
            fail_fast: false,
            ignore_failures: false,
            verbose: false,
            direct: false,
            includes: None,
            pre: None,
            post: None,
            xunit: None,
            log_level: None,
        }
    }
}

impl RunConfiguration {
    /// Checks the invariants that must hold before anything is executed.
    ///
    /// 检查在执行任何操作之前必须满足的不变量。
    pub fn validate(&self) -> Result<()> {
        if self.executable.trim().is_empty() {
            return Err(RunnerError::Configuration(
                "CasperJS executable is not defined".to_string(),
            ));
        }

        if let Some(level) = non_blank(&self.log_level) {
            if parse_level_str(level).is_none() {
                return Err(RunnerError::Configuration(format!(
                    "invalid log_level '{level}' (expected error, warn, info, debug or trace)"
                )));
            }
        }

        Ok(())
    }
}

/// Returns the trimmed value when it is present and not blank.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Contents of a `CasperRunner.toml` file.
///
/// `CasperRunner.toml` 文件的内容。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Directory scanned (non-recursively) for test scripts.
    /// 扫描测试脚本的目录（非递归）。
    pub tests_directory: Option<PathBuf>,
    /// Language for console messages (e.g. "en", "zh-CN").
    /// 控制台消息的语言。
    pub language: Option<String>,
    /// Optional JSON summary written after the run.
    /// 运行结束后写入的可选 JSON 摘要。
    pub json_report: Option<PathBuf>,
    /// Options handed to the orchestrator.
    #[serde(flatten)]
    pub run: RunConfiguration,
}

impl SuiteConfig {
    /// Returns the tests directory, failing when it is unset or is not a directory.
    ///
    /// 返回测试目录；未设置或不是目录时失败。
    pub fn tests_directory(&self) -> Result<&Path> {
        let dir = self.tests_directory.as_deref().ok_or_else(|| {
            RunnerError::Configuration("tests directory is not defined".to_string())
        })?;

        if !is_directory(dir) {
            return Err(RunnerError::Configuration(format!(
                "tests directory '{}' does not exist or is not a directory",
                dir.display()
            )));
        }

        Ok(dir)
    }
}

/// Loads a suite configuration from a TOML file.
/// Missing keys take their defaults; no semantic validation happens here.
///
/// 从 TOML 文件加载套件配置。
/// 缺失的键使用默认值；此处不做语义校验。
pub fn load_suite_config(path: &Path) -> Result<SuiteConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        RunnerError::Configuration(format!("failed to read {}: {e}", path.display()))
    })?;
    parse_suite_config(&contents)
}

pub fn parse_suite_config(contents: &str) -> Result<SuiteConfig> {
    Ok(toml::from_str(contents)?)
}
