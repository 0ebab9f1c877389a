//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command: it merges `CasperRunner.toml`
//! with command-line overrides, runs the suite through the orchestrator and
//! reports the outcome.
//!
//! 此模块实现 `run` 命令：合并 `CasperRunner.toml` 与命令行覆盖项，
//! 通过编排器运行测试套件并报告结果。

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::*;
use std::path::{Path, PathBuf};

use crate::{
    core::{
        config::{load_suite_config, SuiteConfig, DEFAULT_CONFIG_FILE},
        execution::RunOrchestrator,
        models::Verdict,
    },
    errors::RunnerError,
    infra::{
        fs::{absolute_path, expand_path},
        process::SystemProcessRunner,
        t,
    },
    logging::init_logging,
    reporting::{print_failure_details, print_summary, print_verdict, write_json_report},
};

/// Command-line arguments of `casper-runner run`.
///
/// `casper-runner run` 的命令行参数。
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub tests_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub executable: Option<String>,
    pub no_javascript: bool,
    pub no_coffeescript: bool,
    pub fail_fast: bool,
    pub ignore_failures: bool,
    pub verbose: bool,
    pub direct: bool,
    pub includes: Option<String>,
    pub pre: Option<String>,
    pub post: Option<String>,
    pub xunit: Option<String>,
    pub log_level: Option<String>,
    pub json_report: Option<PathBuf>,
    pub language: Option<String>,
}

impl RunArgs {
    pub fn from_matches(matches: &ArgMatches, language: Option<String>) -> Self {
        let string = |id: &str| matches.get_one::<String>(id).cloned();
        let path = |id: &str| matches.get_one::<PathBuf>(id).cloned();

        Self {
            tests_dir: path("tests-dir"),
            config: path("config"),
            executable: string("executable"),
            no_javascript: matches.get_flag("no-javascript"),
            no_coffeescript: matches.get_flag("no-coffeescript"),
            fail_fast: matches.get_flag("fail-fast"),
            ignore_failures: matches.get_flag("ignore-failures"),
            verbose: matches.get_flag("verbose"),
            direct: matches.get_flag("direct"),
            includes: string("includes"),
            pre: string("pre"),
            post: string("post"),
            xunit: string("xunit"),
            log_level: string("log-level"),
            json_report: path("json-report"),
            language,
        }
    }

    /// Applies the command-line values on top of a loaded configuration.
    /// Flags only ever switch a behaviour on (or, for `--no-*`, off).
    ///
    /// 将命令行值覆盖到已加载的配置上。
    pub fn apply_to(&self, suite: &mut SuiteConfig) {
        if let Some(dir) = &self.tests_dir {
            suite.tests_directory = Some(expand_path(dir));
        }
        if let Some(report) = &self.json_report {
            suite.json_report = Some(report.clone());
        }
        if let Some(language) = &self.language {
            suite.language = Some(language.clone());
        }

        let run = &mut suite.run;
        if let Some(executable) = &self.executable {
            run.executable = executable.clone();
        }
        if self.no_javascript {
            run.include_javascript = false;
        }
        if self.no_coffeescript {
            run.include_coffeescript = false;
        }
        run.fail_fast |= self.fail_fast;
        run.ignore_failures |= self.ignore_failures;
        run.verbose |= self.verbose;
        run.direct |= self.direct;

        for (target, value) in [
            (&mut run.includes, &self.includes),
            (&mut run.pre, &self.pre),
            (&mut run.post, &self.post),
            (&mut run.xunit, &self.xunit),
            (&mut run.log_level, &self.log_level),
        ] {
            if value.is_some() {
                target.clone_from(value);
            }
        }
    }
}

/// Loads the configuration named by `--config`, or `CasperRunner.toml` from
/// the working directory when it exists, or the defaults otherwise.
/// Paths in the file are resolved relative to the file's directory.
///
/// 加载 `--config` 指定的配置；若未指定且工作目录中存在 `CasperRunner.toml`
/// 则加载它；否则使用默认值。文件中的路径相对于文件所在目录解析。
pub fn resolve_suite_config(args: &RunArgs) -> Result<(SuiteConfig, Option<PathBuf>)> {
    let config_path = match &args.config {
        Some(path) => Some(expand_path(path)),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    };

    let Some(config_path) = config_path else {
        let mut suite = SuiteConfig::default();
        args.apply_to(&mut suite);
        return Ok((suite, None));
    };

    let mut suite = load_suite_config(&config_path)
        .with_context(|| t!("run.config_load_failed", path = config_path.display()).to_string())?;

    let base = config_base_dir(&config_path);
    suite.tests_directory = suite
        .tests_directory
        .map(|dir| resolve_relative(&base, &expand_path(&dir)));
    suite.json_report = suite
        .json_report
        .map(|report| resolve_relative(&base, &expand_path(&report)));

    args.apply_to(&mut suite);
    Ok((suite, Some(config_path)))
}

fn config_base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Executes the run command with the provided arguments.
///
/// # Returns
/// `Ok(())` when every test passed or failures are ignored; an error
/// otherwise, which `main` turns into a non-zero exit code.
pub async fn execute(args: RunArgs) -> Result<()> {
    let (suite, config_path) = resolve_suite_config(&args)?;

    if args.language.is_none() {
        if let Some(language) = &suite.language {
            crate::set_language(language);
        }
    }

    suite.run.validate()?;
    init_logging(suite.run.log_level.as_deref())?;

    if let Some(path) = &config_path {
        println!("{}", t!("run.using_config", path = path.display()));
    }

    let tests_dir = absolute_path(suite.tests_directory()?)?;
    println!("{}", t!("run.tests_directory", path = tests_dir.display()));
    println!(
        "{}",
        t!("run.executable", executable = &suite.run.executable).cyan()
    );

    let runner = SystemProcessRunner::new(suite.run.verbose);
    let orchestrator = RunOrchestrator::new(suite.run.clone(), runner);
    let outcome = orchestrator.run(&tests_dir).await?;

    print_summary(&outcome);
    if suite.run.verbose {
        print_failure_details(&outcome);
    }

    if let Some(report_path) = &suite.json_report {
        println!("\n{}", t!("run.json_report", path = report_path.display()));
        if let Err(e) = write_json_report(&outcome, report_path) {
            eprintln!("{} {:#}", t!("run.json_report_failed").red(), e);
        }
    }

    print_verdict(&outcome);

    match outcome.verdict() {
        Verdict::Passed => Ok(()),
        Verdict::Failed => Err(RunnerError::TestFailures {
            failures: outcome.failures(),
        }
        .into()),
    }
}
