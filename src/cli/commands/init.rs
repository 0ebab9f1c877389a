//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which creates a new
//! `CasperRunner.toml` either through an interactive wizard or, with
//! `--non-interactive`, from the built-in defaults.
//!
//! 此模块实现 `init` 命令，通过交互式向导或（使用 `--non-interactive` 时）
//! 根据内置默认值创建新的 `CasperRunner.toml`。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::fs;
use std::path::Path;

use crate::core::config::{DEFAULT_CONFIG_FILE, DEFAULT_EXECUTABLE};
use crate::infra::t;

/// Default location of the test scripts suggested by the wizard.
pub const DEFAULT_TESTS_DIRECTORY: &str = "src/test/casperjs";

/// Answers collected by the wizard.
///
/// 向导收集到的答案。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitAnswers {
    pub executable: String,
    pub tests_directory: String,
    pub include_javascript: bool,
    pub include_coffeescript: bool,
    pub fail_fast: bool,
}

impl Default for InitAnswers {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            tests_directory: DEFAULT_TESTS_DIRECTORY.to_string(),
            include_javascript: true,
            include_coffeescript: true,
            fail_fast: false,
        }
    }
}

/// Renders a commented configuration file from the wizard answers.
///
/// 根据向导答案渲染带注释的配置文件。
pub fn render_config(answers: &InitAnswers) -> String {
    format!(
        r#"# Casper Runner configuration
# Every key is optional except `tests_directory`.

# Directory scanned (non-recursively) for test scripts
tests_directory = {tests_directory:?}

# Executable name or path, optionally with leading arguments
executable = {executable:?}

# Extension groups, run in this order
include_javascript = {include_javascript}
include_coffeescript = {include_coffeescript}

# Stop after the first failing file
fail_fast = {fail_fast}
# Report success even when tests fail
ignore_failures = false
# Log why a test process could not be started
verbose = false
# Let the test runner log straight to the console (--direct)
direct = false

# Options forwarded to the test runner when set
# includes = "tests/helpers.js"
# pre = "tests/pre.js"
# post = "tests/post.js"
# xunit = "target/casperjs/xunit.xml"

# Runner log level: error, warn, info, debug or trace
# log_level = "info"

# Console language ("en", "zh-CN")
# language = "en"

# JSON summary of the run
# json_report = "target/casperjs/summary.json"
"#,
        tests_directory = answers.tests_directory,
        executable = answers.executable,
        include_javascript = answers.include_javascript,
        include_coffeescript = answers.include_coffeescript,
        fail_fast = answers.fail_fast,
    )
}

/// Runs the interactive wizard to generate a `CasperRunner.toml` file in the
/// working directory.
///
/// 运行交互式向导，在工作目录中生成 `CasperRunner.toml` 文件。
pub fn run_init_wizard(non_interactive: bool, force: bool) -> Result<()> {
    let config_path = Path::new(DEFAULT_CONFIG_FILE);

    if non_interactive {
        if config_path.exists() && !force {
            println!(
                "{}",
                t!("init.file_exists", path = config_path.display()).red()
            );
            println!("{}", t!("init.use_force").yellow());
            return Ok(());
        }
        return write_config(config_path, &InitAnswers::default());
    }

    let theme = ColorfulTheme::default();
    println!("\n{}", t!("init.wizard_welcome").cyan().bold());
    println!("{}", t!("init.wizard_description"));

    if config_path.exists() && !force {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", path = config_path.display()))
            .default(false)
            .interact()
            .context(t!("init.user_confirmation_failed").to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted"));
            return Ok(());
        }
    }

    let defaults = InitAnswers::default();

    let executable: String = Input::with_theme(&theme)
        .with_prompt(t!("init.executable_prompt"))
        .default(defaults.executable)
        .interact_text()
        .context(t!("init.user_confirmation_failed").to_string())?;

    let tests_directory: String = Input::with_theme(&theme)
        .with_prompt(t!("init.tests_directory_prompt"))
        .default(defaults.tests_directory)
        .interact_text()
        .context(t!("init.user_confirmation_failed").to_string())?;

    let include_javascript = Confirm::with_theme(&theme)
        .with_prompt(t!("init.include_javascript_prompt"))
        .default(true)
        .interact()
        .context(t!("init.user_confirmation_failed").to_string())?;

    let include_coffeescript = Confirm::with_theme(&theme)
        .with_prompt(t!("init.include_coffeescript_prompt"))
        .default(true)
        .interact()
        .context(t!("init.user_confirmation_failed").to_string())?;

    if !include_javascript && !include_coffeescript {
        println!("{}", t!("init.no_groups_selected").yellow());
    }

    let fail_fast = Confirm::with_theme(&theme)
        .with_prompt(t!("init.fail_fast_prompt"))
        .default(false)
        .interact()
        .context(t!("init.user_confirmation_failed").to_string())?;

    let answers = InitAnswers {
        executable,
        tests_directory,
        include_javascript,
        include_coffeescript,
        fail_fast,
    };

    write_config(config_path, &answers)
}

fn write_config(path: &Path, answers: &InitAnswers) -> Result<()> {
    fs::write(path, render_config(answers))
        .with_context(|| t!("init.write_failed", path = path.display()).to_string())?;

    println!("{}", t!("init.success", path = path.display()).green());
    println!("{}", t!("init.next_steps"));
    Ok(())
}
