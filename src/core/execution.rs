//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! [`RunOrchestrator`] sequences a whole run: it checks that the external
//! test runner answers `--version`, walks the enabled extension groups in
//! order, runs one process per discovered file, and folds the results into a
//! [`RunOutcome`].
//!
//! Execution is strictly sequential. Per-file failures are counted, never
//! propagated; only configuration and environment errors abort the run.
//!
//! [`RunOrchestrator`] 负责整个运行流程：检查外部测试运行器是否响应
//! `--version`，按顺序遍历启用的扩展名分组，为每个发现的文件运行一个进程，
//! 并将结果汇总到 [`RunOutcome`] 中。
//! 执行严格串行。单个文件的失败只计数，不会向上传播；
//! 只有配置和环境错误会中止运行。

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    core::{
        command::CommandBuilder,
        config::RunConfiguration,
        discovery,
        models::{ExtensionGroup, FileOutcome, InvocationResult, RunOutcome},
    },
    errors::{Result, RunnerError},
    infra::process::ProcessRunner,
};

/// Drives one run of the test suite with a given [`ProcessRunner`].
///
/// 使用给定的 [`ProcessRunner`] 驱动测试套件的一次运行。
pub struct RunOrchestrator<R> {
    config: RunConfiguration,
    runner: R,
}

impl<R: ProcessRunner> RunOrchestrator<R> {
    pub fn new(config: RunConfiguration, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &RunConfiguration {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Fails fast when the configuration is unusable or the external tool
    /// does not answer `--version` with exit code 0.
    ///
    /// 当配置不可用或外部工具未以退出码 0 响应 `--version` 时立即失败。
    pub async fn validate_environment(&self) -> Result<()> {
        self.config.validate()?;
        let builder = CommandBuilder::new(&self.config)?;
        let query = builder.version_query();

        match self.runner.execute(&query).await {
            InvocationResult::Exited { code: Some(0), output } => {
                info!(
                    executable = %self.config.executable,
                    version = %output.trim(),
                    "external test runner is available"
                );
                Ok(())
            }
            InvocationResult::Exited { code, .. } => Err(RunnerError::Environment(format!(
                "An error occurred when trying to execute {}: `{}` exited with {}",
                self.config.executable,
                query,
                code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}"))
            ))),
            InvocationResult::Failed { reason } => Err(RunnerError::Environment(format!(
                "An error occurred when trying to execute {}: {reason}",
                self.config.executable
            ))),
        }
    }

    /// Runs every enabled test file found directly in `tests_directory`.
    ///
    /// 运行 `tests_directory` 中直接包含的所有启用的测试文件。
    pub async fn run(&self, tests_directory: &Path) -> Result<RunOutcome> {
        self.validate_environment().await?;
        let builder = CommandBuilder::new(&self.config)?;

        let started = Instant::now();
        let mut outcome = RunOutcome::new(self.config.ignore_failures);

        info!(dir = %tests_directory.display(), "looking for scripts");

        'groups: for group in ExtensionGroup::ALL {
            if !group.is_enabled(&self.config) {
                info!("{} files ignored", group.label());
                continue;
            }

            let files = discovery::list(
                tests_directory,
                discovery::extension_predicate(group.extension()),
            );
            if files.is_empty() {
                info!(
                    dir = %tests_directory.display(),
                    "no {} files found", group.extension()
                );
                continue;
            }

            for file in files {
                let spec = builder.build(&file);
                debug!(test = %file.name, command = %spec, "execution of test");

                let file_started = Instant::now();
                let result = self.runner.execute(&spec).await;
                let record = FileOutcome::new(file, group, &result, file_started.elapsed());

                let passed = record.passed;
                if !passed {
                    warn!(
                        test = %record.name,
                        detail = record.detail.as_deref().unwrap_or("unknown"),
                        "test has failure"
                    );
                }
                outcome.record(record);

                if !passed && self.config.fail_fast {
                    warn!("fail-fast enabled; skipping remaining test files");
                    outcome.mark_stopped_early();
                    break 'groups;
                }
            }
        }

        outcome.finish(started.elapsed());
        info!("{}", outcome.summary_line());

        Ok(outcome)
    }
}
