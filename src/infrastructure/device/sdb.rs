//! sdb bridge
//!
//! Implements the DeviceBridge port by running the `sdb` command line tool.
//! Every invocation is bounded by a timeout and killed when it runs over.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace};
use wait_timeout::ChildExt;

use crate::domain::ports::{BridgeError, DeviceBridge};

/// Bridge that shells out to `sdb`
#[derive(Debug, Clone)]
pub struct SdbBridge {
    program: String,
    timeout: Duration,
}

impl SdbBridge {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[&str]) -> Result<String, BridgeError> {
        let rendered = format!("{} {}", self.program, args.join(" "));
        debug!(command = %rendered, "running bridge command");

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                BridgeError::ConnectionError(format!("failed to run '{}': {}", self.program, e))
            })?;

        // Drain both pipes while waiting; a full pipe would stall the child.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(BridgeError::Timeout(format!(
                    "'{}' did not finish within {} seconds",
                    rendered,
                    self.timeout.as_secs()
                )));
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(BridgeError::CommandFailed(format!("{}: {}", rendered, e)));
            }
        };

        let stdout = collect(stdout);
        let stderr = collect(stderr);
        trace!(%stdout, %stderr, "bridge output");

        check_output(&rendered, status.success(), &stdout, &stderr)
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn collect(reader: Option<JoinHandle<Vec<u8>>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}

/// sdb exits 0 on many failures and only reports them as `error: ...`
fn check_output(
    command: &str,
    success: bool,
    stdout: &str,
    stderr: &str,
) -> Result<String, BridgeError> {
    let combined = format!("{}{}", stdout, stderr);
    if !success || combined.contains("error:") {
        let detail = combined.trim();
        return Err(BridgeError::CommandFailed(if detail.is_empty() {
            command.to_string()
        } else {
            format!("{}: {}", command, detail)
        }));
    }
    Ok(stdout.to_string())
}

impl DeviceBridge for SdbBridge {
    fn name(&self) -> &str {
        "sdb"
    }

    fn ensure_connected(&self) -> Result<(), BridgeError> {
        let state = self.run(&["get-state"]).map_err(|e| match e {
            BridgeError::CommandFailed(msg) => BridgeError::ConnectionError(msg),
            other => other,
        })?;
        match state.trim() {
            "device" => Ok(()),
            other => Err(BridgeError::ConnectionError(format!(
                "device state is '{}'",
                other
            ))),
        }
    }

    fn push(&self, local: &Path, remote: &str) -> Result<(), BridgeError> {
        let local = local.to_string_lossy();
        self.run(&["push", &local, remote]).map(|_| ())
    }

    fn shell(&self, command: &str) -> Result<String, BridgeError> {
        self.run(&["shell", command])
    }

    fn forward(&self, local_port: u16, remote_port: u16) -> Result<(), BridgeError> {
        let local = format!("tcp:{}", local_port);
        let remote = format!("tcp:{}", remote_port);
        self.run(&["forward", &local, &remote]).map(|_| ())
    }
}
