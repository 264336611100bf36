//! External key tool integration.
//!
//! The tool is a black box with two capabilities. [`OpensslTool`] is the
//! production implementation; tests substitute their own [`KeyTool`].

use std::ffi::OsStr;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::KeyProviderConfig;
use crate::error::{KeyError, KeyResult};

/// How often a running child is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long pipe readers get to finish once a child has been killed.
const READER_GRACE: Duration = Duration::from_secs(1);

/// Marker every PEM private key carries, PKCS#1 or PKCS#8.
const PRIVATE_KEY_MARKER: &str = "PRIVATE KEY-----";

/// Black-box RSA key capability.
pub trait KeyTool: Send + Sync {
    /// Produce a PEM-encoded RSA private key of `bits` length.
    fn generate_private_key(&self, bits: u32) -> KeyResult<String>;

    /// Read the PEM private key at `private_key` and write the matching PEM
    /// public key to `public_key`.
    fn derive_public_key(&self, private_key: &Path, public_key: &Path) -> KeyResult<()>;
}

/// Key tool backed by the `openssl` command line.
#[derive(Debug, Clone)]
pub struct OpensslTool {
    program: PathBuf,
    timeout: Duration,
}

impl Default for OpensslTool {
    fn default() -> Self {
        Self::from_config(&KeyProviderConfig::default())
    }
}

impl OpensslTool {
    /// Create a tool for the given executable and per-call timeout
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Create a tool from provider settings
    #[must_use]
    pub fn from_config(config: &KeyProviderConfig) -> Self {
        Self::new(config.program.clone(), config.timeout_duration())
    }
}

impl KeyTool for OpensslTool {
    fn generate_private_key(&self, bits: u32) -> KeyResult<String> {
        let bits = bits.to_string();
        let output = run_tool(
            &self.program,
            &[OsStr::new("genrsa"), OsStr::new(&bits)],
            "genrsa",
            self.timeout,
        )?;

        let pem = String::from_utf8(output).map_err(|_| KeyError::MalformedOutput {
            step: "genrsa",
            reason: "output is not UTF-8".into(),
        })?;
        if !pem.contains(PRIVATE_KEY_MARKER) {
            return Err(KeyError::MalformedOutput {
                step: "genrsa",
                reason: "no PEM private key in output".into(),
            });
        }
        Ok(pem)
    }

    fn derive_public_key(&self, private_key: &Path, public_key: &Path) -> KeyResult<()> {
        run_tool(
            &self.program,
            &[
                OsStr::new("rsa"),
                OsStr::new("-in"),
                private_key.as_os_str(),
                OsStr::new("-out"),
                public_key.as_os_str(),
                OsStr::new("-pubout"),
                OsStr::new("-outform"),
                OsStr::new("PEM"),
            ],
            "rsa -pubout",
            self.timeout,
        )?;
        Ok(())
    }
}

/// Run `program args..`, returning its standard output.
///
/// Blocks for at most `timeout`; on expiry the child is killed. Standard
/// output and error are drained on helper threads so a chatty child never
/// stalls on a full pipe.
pub(crate) fn run_tool(
    program: &Path,
    args: &[&OsStr],
    step: &'static str,
    timeout: Duration,
) -> KeyResult<Vec<u8>> {
    let tool = program.display().to_string();
    debug!(tool = %tool, step, "running key tool");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                KeyError::ToolNotFound { tool: tool.clone() }
            } else {
                KeyError::Launch {
                    tool: tool.clone(),
                    source: e,
                }
            }
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_reader = thread::spawn(move || drain(stdout));
    let stderr_reader = thread::spawn(move || drain(stderr));

    // A timeout too large to represent is no deadline at all.
    let deadline = Instant::now().checked_add(timeout);
    let status: ExitStatus = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if deadline.is_some_and(|d| Instant::now() >= d) => {
                warn!(tool = %tool, step, timeout_secs = timeout.as_secs(), "key tool timed out, killing");
                let _ = child.kill();
                let _ = child.wait();
                reap_readers([stdout_reader, stderr_reader]);
                return Err(KeyError::Timeout {
                    step,
                    seconds: timeout.as_secs(),
                });
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                reap_readers([stdout_reader, stderr_reader]);
                return Err(KeyError::Launch { tool, source });
            }
        }
    };

    let out = stdout_reader.join().unwrap_or_default();
    let err = stderr_reader.join().unwrap_or_default();

    if !status.success() {
        return Err(KeyError::NonZeroExit {
            step,
            code: status.code(),
            stderr: String::from_utf8_lossy(&err).trim().to_string(),
        });
    }

    debug!(tool = %tool, step, bytes = out.len(), "key tool finished");
    Ok(out)
}

/// Join pipe readers of a killed child. A reader still blocked after
/// [`READER_GRACE`] means a grandchild holds the pipe open; it is detached
/// and exits when that process does.
fn reap_readers<const N: usize>(readers: [JoinHandle<Vec<u8>>; N]) {
    let grace_end = Instant::now() + READER_GRACE;
    for reader in readers {
        while !reader.is_finished() && Instant::now() < grace_end {
            thread::sleep(POLL_INTERVAL);
        }
        if reader.is_finished() {
            let _ = reader.join();
        } else {
            debug!("pipe reader still blocked after kill, detaching");
        }
    }
}

fn drain<R: Read>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}
