//! # Commands / 命令
//!
//! One module per subcommand.
//!
//! 每个子命令一个模块。

pub mod init;
pub mod run;
