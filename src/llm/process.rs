//! Bounded execution of the judge process.
//!
//! The prompt is written to the child's stdin and stdout/stderr are drained
//! on helper threads. The caller waits on a channel with a deadline; if the
//! deadline passes the child is killed and reaped.
//!
//! Killing the child does not stop its own children. A grandchild that
//! inherited stdout or stderr keeps the pipes open, so the detached reader
//! threads stay blocked until it exits. The caller never waits on them past
//! the deadline.

use std::io::{self, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;

use super::JudgeError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured output of a finished process.
#[derive(Debug)]
pub struct ProcessOutput {
    /// Exit status
    pub status: ExitStatus,
    /// Captured stdout
    pub stdout: Vec<u8>,
    /// Captured stderr
    pub stderr: Vec<u8>,
}

/// Run `command` with `input` on stdin, giving up after `timeout`.
pub fn run_with_timeout(
    mut command: Command,
    input: &str,
    timeout: Duration,
) -> Result<ProcessOutput, JudgeError> {
    let deadline = Instant::now() + timeout;

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(JudgeError::Spawn)?;

    if let Some(mut stdin) = child.stdin.take() {
        let input = input.to_owned();
        // Dropping stdin at the end of the thread closes the pipe
        thread::spawn(move || {
            if let Err(e) = stdin.write_all(input.as_bytes()) {
                log::debug!("Judge stdin closed early: {}", e);
            }
        });
    }

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let (tx, rx) = crossbeam_channel::bounded(1);

    thread::spawn(move || {
        let stderr_reader = thread::spawn(move || drain(stderr));
        let out = drain(stdout);
        let err = stderr_reader
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("stderr reader panicked")));
        let _ = tx.send(out.and_then(|out| err.map(|err| (out, err))));
    });

    let remaining = deadline.saturating_duration_since(Instant::now());
    let (stdout, stderr) = match rx.recv_timeout(remaining) {
        Ok(Ok(captured)) => captured,
        Ok(Err(e)) => {
            kill(&mut child);
            return Err(JudgeError::Io(e));
        }
        Err(RecvTimeoutError::Timeout) => {
            // Readers are left behind; they finish once the last pipe holder exits
            kill(&mut child);
            return Err(JudgeError::Timeout(timeout));
        }
        Err(RecvTimeoutError::Disconnected) => {
            kill(&mut child);
            return Err(JudgeError::Io(io::Error::other("output reader disconnected")));
        }
    };

    let status = wait_until(&mut child, deadline).ok_or(JudgeError::Timeout(timeout))?;

    Ok(ProcessOutput {
        status,
        stdout,
        stderr,
    })
}

fn drain<R: Read>(reader: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut reader) = reader {
        reader.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

/// Poll for exit until the deadline. Kills the child and returns `None` if
/// it is still running when time is up.
fn wait_until(child: &mut Child, deadline: Instant) -> Option<ExitStatus> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(status),
            Ok(None) if Instant::now() < deadline => thread::sleep(POLL_INTERVAL),
            Ok(None) | Err(_) => {
                kill(child);
                return None;
            }
        }
    }
}

fn kill(child: &mut Child) {
    if let Err(e) = child.kill() {
        log::debug!("Failed to kill judge process: {}", e);
    }
    let _ = child.wait();
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut command = Command::new("sh");
        command.arg("-c").arg(script);
        command
    }

    #[test]
    fn test_captures_stdout_from_stdin() {
        let output = run_with_timeout(sh("cat"), "rate this", Duration::from_secs(5)).unwrap();
        assert!(output.status.success());
        assert_eq!(output.stdout, b"rate this");
    }

    #[test]
    fn test_nonzero_status_is_reported() {
        let output = run_with_timeout(sh("echo oops >&2; exit 3"), "", Duration::from_secs(5))
            .unwrap();
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(String::from_utf8_lossy(&output.stderr).trim(), "oops");
    }

    #[test]
    fn test_timeout_kills_process() {
        let started = Instant::now();
        let result = run_with_timeout(sh("exec sleep 5"), "", Duration::from_millis(200));
        assert!(matches!(result, Err(JudgeError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_timeout_returns_while_grandchild_holds_pipes() {
        let started = Instant::now();
        let result = run_with_timeout(
            sh("sleep 3 & exec sleep 3"),
            "",
            Duration::from_millis(200),
        );
        assert!(matches!(result, Err(JudgeError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let command = Command::new("/nonexistent/judge-binary");
        let result = run_with_timeout(command, "", Duration::from_secs(1));
        assert!(matches!(result, Err(JudgeError::Spawn(_))));
    }
}
