//! # Command Construction Module / 命令构建模块
//!
//! Turns a [`RunConfiguration`] and a [`TestFile`] into the exact invocation
//! of the external test runner.
//!
//! Argument order is fixed: `--includes`, `--pre`, `--post`, `--xunit`,
//! `--fail-fast`, `--direct`, then the test file. Downstream tooling matches
//! on the raw command text, so options are never reordered and blank values
//! are left out rather than passed empty.
//!
//! 将 [`RunConfiguration`] 和 [`TestFile`] 转换为外部测试运行器的确切调用。
//! 参数顺序固定：`--includes`、`--pre`、`--post`、`--xunit`、`--fail-fast`、
//! `--direct`，最后是测试文件。空值会被省略，而不是作为空参数传递。

use std::fmt;

use crate::core::config::{non_blank, RunConfiguration};
use crate::core::models::TestFile;
use crate::errors::{Result, RunnerError};

/// A fully formed external process invocation.
///
/// 一个完整的外部进程调用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to launch / 要启动的程序
    pub program: String,
    /// Ordered arguments / 有序参数列表
    pub args: Vec<String>,
    /// Forward the child's output to our own stdout/stderr while it runs.
    /// 运行期间将子进程输出转发到本进程的 stdout/stderr。
    pub stream_output: bool,
}

impl CommandSpec {
    /// Renders the invocation as a single shell-quoted line.
    ///
    /// 将调用渲染为单行、经过 shell 引号处理的字符串。
    pub fn command_line(&self) -> String {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        shlex::try_join(words.clone()).unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "))
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Builds invocations of the external test runner for one run.
///
/// The executable identifier is expanded (`~`, `$VAR`) and split into words
/// once, when the builder is created.
///
/// 为一次运行构建外部测试运行器的调用。
/// 可执行文件标识在创建构建器时展开（`~`、`$VAR`）并拆分为单词，仅执行一次。
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    leading_args: Vec<String>,
    options: Vec<String>,
}

impl CommandBuilder {
    pub fn new(config: &RunConfiguration) -> Result<Self> {
        let (program, leading_args) = split_executable(&config.executable)?;
        Ok(Self {
            program,
            leading_args,
            options: file_options(config),
        })
    }

    /// `<executable> --version`, run quietly to validate the environment.
    pub fn version_query(&self) -> CommandSpec {
        let mut args = self.leading_args.clone();
        args.push("--version".to_string());
        CommandSpec {
            program: self.program.clone(),
            args,
            stream_output: false,
        }
    }

    /// The invocation for a single test file. The file path is always last.
    ///
    /// 单个测试文件的调用。文件路径始终位于最后。
    pub fn build(&self, file: &TestFile) -> CommandSpec {
        let mut args = Vec::with_capacity(self.leading_args.len() + self.options.len() + 1);
        args.extend(self.leading_args.iter().cloned());
        args.extend(self.options.iter().cloned());
        args.push(file.path.to_string_lossy().into_owned());
        CommandSpec {
            program: self.program.clone(),
            args,
            stream_output: true,
        }
    }
}

/// Options shared by every per-file invocation, in their fixed order.
/// Values are trimmed before being appended; blank ones are left out.
fn file_options(config: &RunConfiguration) -> Vec<String> {
    let mut options = Vec::new();

    // Files included before each test
    if let Some(includes) = non_blank(&config.includes) {
        options.push(format!("--includes={includes}"));
    }
    // Scripts executed before the suite
    if let Some(pre) = non_blank(&config.pre) {
        options.push(format!("--pre={pre}"));
    }
    // Scripts executed after the suite
    if let Some(post) = non_blank(&config.post) {
        options.push(format!("--post={post}"));
    }
    // Export results as an xunit XML file
    if let Some(xunit) = non_blank(&config.xunit) {
        options.push(format!("--xunit={xunit}"));
    }
    if config.fail_fast {
        options.push("--fail-fast".to_string());
    }
    // Tool log messages go straight to the console
    if config.direct {
        options.push("--direct".to_string());
    }

    options
}

/// Splits an executable identifier like `"node ~/casperjs/bin/casperjs"` into
/// the program and its leading arguments.
fn split_executable(executable: &str) -> Result<(String, Vec<String>)> {
    if executable.trim().is_empty() {
        return Err(RunnerError::Configuration(
            "CasperJS executable is not defined".to_string(),
        ));
    }

    let expanded = shellexpand::full(executable).map_err(|e| {
        RunnerError::Configuration(format!("failed to expand executable '{executable}': {e}"))
    })?;

    let mut words = shlex::split(&expanded)
        .ok_or_else(|| {
            RunnerError::Configuration(format!("failed to parse executable '{expanded}'"))
        })?
        .into_iter();

    let program = words.next().ok_or_else(|| {
        RunnerError::Configuration(format!("executable '{executable}' is empty after parsing"))
    })?;

    Ok((program, words.collect()))
}
