//! # Process Execution Module / 进程执行模块
//!
//! The [`ProcessRunner`] seam between the orchestrator and the operating
//! system. The orchestrator awaits each invocation before starting the next
//! one, so a runner never has more than one child alive.
//!
//! 编排器与操作系统之间的 [`ProcessRunner`] 接口。
//! 编排器会等待每次调用结束后再开始下一次，因此运行器同一时间最多只有一个子进程。

use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::core::command::CommandSpec;
use crate::core::models::InvocationResult;

/// Executes a command and reports how it ended.
///
/// Implementations never return low-level errors: anything that prevents the
/// process from running or being waited on becomes
/// [`InvocationResult::Failed`]. Tests provide fakes that do not spawn.
///
/// 执行命令并报告其结束方式。
/// 实现不会返回底层错误：任何导致进程无法运行或无法等待的情况
/// 都会变成 [`InvocationResult::Failed`]。
pub trait ProcessRunner: Send + Sync {
    fn execute<'a>(
        &'a self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = InvocationResult> + Send + 'a>>;
}

/// Runs real OS processes through `tokio::process`.
///
/// 通过 `tokio::process` 运行真实的操作系统进程。
#[derive(Debug, Clone, Default)]
pub struct SystemProcessRunner {
    verbose: bool,
}

impl SystemProcessRunner {
    /// With `verbose`, launch failures are logged with their cause; otherwise
    /// they only show up as a failed test.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn execute<'a>(
        &'a self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = InvocationResult> + Send + 'a>> {
        Box::pin(async move {
            let result = spawn_and_capture(spec).await;
            if let InvocationResult::Failed { reason } = &result {
                if self.verbose {
                    error!(command = %spec, error = %reason, "could not run external command");
                }
            }
            result
        })
    }
}

/// Spawns the command, captures stdout and stderr, and waits for it to exit.
///
/// Both streams are read concurrently and appended to one buffer; when
/// `spec.stream_output` is set every line is also echoed as it arrives.
///
/// 派生命令，捕获 stdout 和 stderr，并等待其退出。
/// 两个流被并发读取并追加到同一缓冲区；当设置了 `spec.stream_output` 时，
/// 每一行在到达时也会被回显。
pub async fn spawn_and_capture(spec: &CommandSpec) -> InvocationResult {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            return InvocationResult::Failed {
                reason: format!("failed to start '{}': {e}", spec.program),
            };
        }
    };

    let output = Arc::new(tokio::sync::Mutex::new(String::new()));

    let stdout_handle = child
        .stdout
        .take()
        .map(|s| pump_lines(s, Arc::clone(&output), spec.stream_output, Stream::Stdout));
    let stderr_handle = child
        .stderr
        .take()
        .map(|s| pump_lines(s, Arc::clone(&output), spec.stream_output, Stream::Stderr));

    let status = child.wait().await;

    // Drain the readers so no trailing output is lost.
    for handle in [stdout_handle, stderr_handle].into_iter().flatten() {
        if let Err(e) = handle.await {
            debug!(error = %e, "output reader task did not finish cleanly");
        }
    }

    match status {
        Ok(status) => InvocationResult::Exited {
            code: status.code(),
            output: output.lock().await.clone(),
        },
        Err(e) => InvocationResult::Failed {
            reason: format!("failed to wait for '{}': {e}", spec.program),
        },
    }
}

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

fn pump_lines<R>(
    reader: R,
    output: Arc<tokio::sync::Mutex<String>>,
    echo: bool,
    stream: Stream,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        // Raw bytes: non-UTF-8 output must not end the reader and close the pipe.
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        let mut consecutive_errors = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => consecutive_errors = 0,
                Err(e) => {
                    consecutive_errors += 1;
                    debug!(error = %e, "failed to read child output");
                    if consecutive_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                        break;
                    }
                    if buf.is_empty() {
                        continue;
                    }
                }
            }

            let line = decode_line(&buf);
            if echo {
                match stream {
                    Stream::Stdout => println!("{line}"),
                    Stream::Stderr => eprintln!("{line}"),
                }
            }
            let mut output = output.lock().await;
            output.push_str(&line);
            output.push('\n');
        }
    })
}

const MAX_CONSECUTIVE_READ_ERRORS: u32 = 8;

/// Strips the line terminator and replaces invalid UTF-8 sequences.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}
