// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::infra::t;

pub mod commands;

use commands::run::RunArgs;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang="))
        .map(str::to_string)
}

pub fn build_cli() -> Command {
    Command::new("casper-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about").to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang").to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cli.run_about").to_string())
                .arg(
                    Arg::new("tests-dir")
                        .help(t!("cli.arg_tests_dir").to_string())
                        .value_name("TESTS_DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("cli.arg_config").to_string())
                        .value_name("CONFIG")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("executable")
                        .short('e')
                        .long("executable")
                        .help(t!("cli.arg_executable").to_string())
                        .value_name("EXECUTABLE")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("no-javascript")
                        .long("no-javascript")
                        .help(t!("cli.arg_no_javascript").to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-coffeescript")
                        .long("no-coffeescript")
                        .help(t!("cli.arg_no_coffeescript").to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("fail-fast")
                        .long("fail-fast")
                        .help(t!("cli.arg_fail_fast").to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("ignore-failures")
                        .long("ignore-failures")
                        .help(t!("cli.arg_ignore_failures").to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .help(t!("cli.arg_verbose").to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("direct")
                        .long("direct")
                        .help(t!("cli.arg_direct").to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(option_arg("includes", "INCLUDES", t!("cli.arg_includes").to_string()))
                .arg(option_arg("pre", "PRE", t!("cli.arg_pre").to_string()))
                .arg(option_arg("post", "POST", t!("cli.arg_post").to_string()))
                .arg(option_arg("xunit", "XUNIT", t!("cli.arg_xunit").to_string()))
                .arg(option_arg("log-level", "LOG_LEVEL", t!("cli.arg_log_level").to_string()))
                .arg(
                    Arg::new("json-report")
                        .long("json-report")
                        .help(t!("cli.arg_json_report").to_string())
                        .value_name("JSON_REPORT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cli.init_about").to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("cli.arg_non_interactive").to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help(t!("cli.arg_force").to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn option_arg(name: &'static str, value_name: &'static str, help: String) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_name(value_name)
        .action(ArgAction::Set)
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    match &language {
        Some(lang) => crate::set_language(lang),
        None => crate::init(),
    }

    let matches = build_cli().get_matches();
    dispatch(&matches, language).await
}

async fn dispatch(matches: &ArgMatches, language: Option<String>) -> Result<()> {
    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let args = RunArgs::from_matches(run_matches, language);
            commands::run::execute(args).await?;
        }
        Some(("init", init_matches)) => {
            let non_interactive = init_matches.get_flag("non-interactive");
            let force = init_matches.get_flag("force");
            commands::init::run_init_wizard(non_interactive, force)?;
        }
        _ => {
            // `subcommand_required` makes clap print help before we get here.
        }
    }
    Ok(())
}
