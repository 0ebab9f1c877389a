//! # Core Module / 核心模块
//!
//! This module contains the orchestration logic of Casper Runner:
//! configuration, data models, test discovery, command construction and the
//! run orchestrator.
//!
//! 此模块包含 Casper Runner 的编排逻辑：
//! 配置、数据模型、测试发现、命令构建以及运行编排器。

pub mod command;
pub mod config;
pub mod discovery;
pub mod execution;
pub mod models;

// Re-exports
pub use command::{CommandBuilder, CommandSpec};
pub use config::{RunConfiguration, SuiteConfig};
pub use execution::RunOrchestrator;
pub use models::{InvocationResult, RunOutcome, TestFile, Verdict};
