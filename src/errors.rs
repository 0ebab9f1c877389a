//! # Error Types / 错误类型
//!
//! Crate-wide error enum and result alias. Only configuration and environment
//! problems abort a run; per-file failures never surface here, they are
//! counted in [`RunOutcome`](crate::core::models::RunOutcome).
//!
//! 全局错误枚举和结果别名。只有配置和环境问题会中止运行；
//! 单个文件的失败不会出现在这里，而是计入 `RunOutcome`。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    /// The configuration is unusable (blank executable, missing tests directory, ...).
    /// 配置不可用（可执行文件为空、缺少测试目录等）。
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The external test runner is missing or did not answer `--version`.
    /// 外部测试运行器不存在或未响应 `--version`。
    #[error("Environment error: {0}")]
    Environment(String),

    /// At least one test failed and failures are not ignored.
    /// 至少有一个测试失败，且未配置忽略失败。
    #[error("There are {failures} tests failures")]
    TestFailures { failures: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
