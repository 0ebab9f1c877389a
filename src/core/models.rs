//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures that flow through a run: the
//! discovered [`TestFile`], the per-invocation [`InvocationResult`], and the
//! aggregate [`RunOutcome`] owned by the orchestrator.
//!
//! 此模块定义了在一次运行中流转的数据结构：发现的 [`TestFile`]、
//! 每次调用的 [`InvocationResult`]，以及由编排器持有的汇总 [`RunOutcome`]。

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::config::RunConfiguration;

/// A category of test scripts sharing one file extension.
/// Groups are always processed in the order of [`ExtensionGroup::ALL`].
///
/// 共享同一文件扩展名的一类测试脚本。
/// 各组始终按 [`ExtensionGroup::ALL`] 的顺序处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExtensionGroup {
    JavaScript,
    CoffeeScript,
}

impl ExtensionGroup {
    pub const ALL: [ExtensionGroup; 2] = [ExtensionGroup::JavaScript, ExtensionGroup::CoffeeScript];

    pub fn extension(self) -> &'static str {
        match self {
            ExtensionGroup::JavaScript => ".js",
            ExtensionGroup::CoffeeScript => ".coffee",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExtensionGroup::JavaScript => "JavaScript",
            ExtensionGroup::CoffeeScript => "CoffeeScript",
        }
    }

    pub fn is_enabled(self, config: &RunConfiguration) -> bool {
        match self {
            ExtensionGroup::JavaScript => config.include_javascript,
            ExtensionGroup::CoffeeScript => config.include_coffeescript,
        }
    }
}

/// A single discovered test script.
/// 单个被发现的测试脚本。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestFile {
    /// Absolute path handed to the external tool / 传给外部工具的绝对路径
    pub path: PathBuf,
    /// File name used in logs and reports / 用于日志和报告的文件名
    pub name: String,
}

impl TestFile {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

impl fmt::Display for TestFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The outcome of one external process execution.
///
/// 一次外部进程执行的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationResult {
    /// The process ran to completion. `code` is `None` when it was killed by a signal.
    /// 进程运行结束。被信号终止时 `code` 为 `None`。
    Exited { code: Option<i32>, output: String },
    /// The process could not be started or waited on.
    /// 进程无法启动或无法等待其结束。
    Failed { reason: String },
}

impl InvocationResult {
    /// Exit code 0 is the only success signal.
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResult::Exited { code: Some(0), .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            InvocationResult::Exited { code, .. } => *code,
            InvocationResult::Failed { .. } => None,
        }
    }

    pub fn output(&self) -> &str {
        match self {
            InvocationResult::Exited { output, .. } => output,
            InvocationResult::Failed { .. } => "",
        }
    }

    /// Short human-readable description of why this invocation failed, if it did.
    pub fn failure_detail(&self) -> Option<String> {
        match self {
            InvocationResult::Exited { code: Some(0), .. } => None,
            InvocationResult::Exited { code: Some(code), .. } => Some(format!("exit code {code}")),
            InvocationResult::Exited { code: None, .. } => {
                Some("terminated by signal".to_string())
            }
            InvocationResult::Failed { reason } => Some(reason.clone()),
        }
    }
}

/// Terminal verdict of a run.
/// 一次运行的最终判定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Passed,
    Failed,
}

/// Result of executing one test file, kept for reporting.
///
/// 单个测试文件的执行结果，用于报告。
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub name: String,
    pub path: PathBuf,
    pub group: ExtensionGroup,
    pub passed: bool,
    pub exit_code: Option<i32>,
    /// Why the file failed (exit code, signal or launch error).
    pub detail: Option<String>,
    pub output: String,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl FileOutcome {
    pub fn new(
        file: TestFile,
        group: ExtensionGroup,
        result: &InvocationResult,
        duration: Duration,
    ) -> Self {
        Self {
            name: file.name,
            path: file.path,
            group,
            passed: result.is_success(),
            exit_code: result.exit_code(),
            detail: result.failure_detail(),
            output: result.output().to_string(),
            duration,
        }
    }
}

/// Aggregate result of a run.
///
/// Only the orchestrator records into it; everyone else reads the finished
/// value through the accessors.
///
/// 一次运行的汇总结果。
/// 只有编排器会写入；其他组件只能通过访问器读取最终结果。
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    successes: usize,
    failures: usize,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    elapsed: Duration,
    stopped_early: bool,
    ignore_failures: bool,
    files: Vec<FileOutcome>,
}

impl RunOutcome {
    pub(crate) fn new(ignore_failures: bool) -> Self {
        Self {
            successes: 0,
            failures: 0,
            elapsed: Duration::ZERO,
            stopped_early: false,
            ignore_failures,
            files: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, file: FileOutcome) {
        if file.passed {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        self.files.push(file);
    }

    pub(crate) fn mark_stopped_early(&mut self) {
        self.stopped_early = true;
    }

    pub(crate) fn finish(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    pub fn successes(&self) -> usize {
        self.successes
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn total(&self) -> usize {
        self.successes + self.failures
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// `true` when fail-fast cut the run short.
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }

    pub fn ignores_failures(&self) -> bool {
        self.ignore_failures
    }

    pub fn files(&self) -> &[FileOutcome] {
        &self.files
    }

    /// No test file was executed at all.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn verdict(&self) -> Verdict {
        if self.failures > 0 && !self.ignore_failures {
            Verdict::Failed
        } else {
            Verdict::Passed
        }
    }

    /// `Tests run: N, Success: S, Failures: F. Time elapsed: Tms.`
    pub fn summary_line(&self) -> String {
        format!(
            "Tests run: {}, Success: {}, Failures: {}. Time elapsed: {}ms.",
            self.total(),
            self.successes,
            self.failures,
            self.elapsed.as_millis()
        )
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
