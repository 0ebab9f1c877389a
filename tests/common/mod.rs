// Shared test helpers for integration tests
#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::io;
use std::sync::{Arc, Mutex};

use casper_runner::command::CommandSpec;
use casper_runner::config::RunConfiguration;
use casper_runner::infra::process::ProcessRunner;
use casper_runner::models::InvocationResult;
use tempfile::{tempdir, TempDir};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// A `ProcessRunner` that never spawns anything.
///
/// - answers `--version` with `version_result`
/// - fails files whose name is in `failing` (exit code 1)
/// - reports launch failures for files in `unreachable`
/// - passes everything else
/// - records every command it was asked to run
pub struct FakeRunner {
    version_result: InvocationResult,
    failing: HashSet<String>,
    unreachable: HashSet<String>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub fn passing() -> Self {
        Self {
            version_result: InvocationResult::Exited {
                code: Some(0),
                output: "1.1.4\n".to_string(),
            },
            failing: HashSet::new(),
            unreachable: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(names: &[&str]) -> Self {
        let mut runner = Self::passing();
        runner.failing = names.iter().map(|s| s.to_string()).collect();
        runner
    }

    pub fn unreachable_on(mut self, names: &[&str]) -> Self {
        self.unreachable = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// The tool exists but `--version` exits with the given code.
    pub fn broken_tool(code: i32) -> Self {
        let mut runner = Self::passing();
        runner.version_result = InvocationResult::Exited {
            code: Some(code),
            output: String::new(),
        };
        runner
    }

    /// The tool cannot be started at all.
    pub fn missing_tool() -> Self {
        let mut runner = Self::passing();
        runner.version_result = InvocationResult::Failed {
            reason: "No such file or directory (os error 2)".to_string(),
        };
        runner
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// File names of every per-file invocation, in execution order.
    pub fn executed_files(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter(|spec| !is_version_query(spec))
            .filter_map(|spec| spec.args.last())
            .map(|arg| file_name_of(arg))
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    fn execute<'a>(
        &'a self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = InvocationResult> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(spec.clone());

            if is_version_query(spec) {
                return self.version_result.clone();
            }

            let name = spec.args.last().map(|a| file_name_of(a)).unwrap_or_default();
            if self.unreachable.contains(&name) {
                InvocationResult::Failed {
                    reason: format!("failed to start '{}'", spec.program),
                }
            } else if self.failing.contains(&name) {
                InvocationResult::Exited {
                    code: Some(1),
                    output: format!("FAIL {name}\n"),
                }
            } else {
                InvocationResult::Exited {
                    code: Some(0),
                    output: format!("PASS {name}\n"),
                }
            }
        })
    }
}

fn is_version_query(spec: &CommandSpec) -> bool {
    spec.args.last().map(String::as_str) == Some("--version")
}

fn file_name_of(arg: &str) -> String {
    Path::new(arg)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| arg.to_string())
}

/// Creates a temporary tests directory containing empty files with the given names.
pub fn tests_dir_with(names: &[&str]) -> TempDir {
    let dir = tempdir().expect("Failed to create temporary directory");
    for name in names {
        fs::write(dir.path().join(name), "// test script\n").expect("Failed to write test file");
    }
    dir
}

pub fn config() -> RunConfiguration {
    RunConfiguration::default()
}

/// Writes a POSIX shell script standing in for `casperjs`.
///
/// It answers `--version`, appends every other invocation's arguments to
/// `invocations.log` next to the script, and fails any file whose name
/// contains "fail".
pub fn write_fake_tool(dir: &Path) -> PathBuf {
    let log = dir.join("invocations.log");
    let script = dir.join("fake-casperjs.sh");
    let content = format!(
        r#"if [ "$1" = "--version" ]; then
  echo "1.1.4"
  exit 0
fi
for arg in "$@"; do last="$arg"; done
echo "$*" >> "{log}"
case "$last" in
  *fail*) echo "FAIL $last"; exit 1 ;;
esac
echo "PASS $last"
exit 0
"#,
        log = log.display()
    );
    fs::write(&script, content).expect("Failed to write fake tool");
    script
}

/// Writes a script whose `--version` exits with code 2.
pub fn write_broken_tool(dir: &Path) -> PathBuf {
    let script = dir.join("broken-casperjs.sh");
    fs::write(&script, "echo 'broken install' >&2\nexit 2\n").expect("Failed to write broken tool");
    script
}

/// Executable identifier running `script` through `sh`, so no exec bit is needed.
pub fn sh_executable(script: &Path) -> String {
    let quoted = shlex::try_quote(&script.to_string_lossy())
        .expect("script path is quotable")
        .into_owned();
    format!("sh {quoted}")
}

/// Lines appended by the fake tool, one per test file invocation.
pub fn read_invocations(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("invocations.log"))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Collects formatted `tracing` events written on the current thread.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Installs a debug-level subscriber as the thread-local default.
    /// Events are recorded until the returned guard is dropped.
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(capture.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    /// Number of recorded lines containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.contents().lines().filter(|l| l.contains(needle)).count()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
