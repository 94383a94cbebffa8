//! Shell invocation and combined output capture.

use crate::error::{ParalixError, Result};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const READ_CHUNK: usize = 8 * 1024;

/// The shell a concrete command is handed to, e.g. `sh -c`.
///
/// The command string is appended as the last argument, so pipes, globs and
/// redirections in the template work as typed. Values are not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: String,
    args: Vec<String>,
}

impl Shell {
    /// Parse a shell prefix such as `"bash -c"` or `"/bin/zsh -o pipefail -c"`.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut words = shell_words::split(spec)
            .map_err(|e| ParalixError::Config(format!("failed to parse shell '{}': {}", spec, e)))?;

        if words.is_empty() {
            return Err(ParalixError::Config("shell must not be empty".to_string()));
        }

        let program = words.remove(0);
        Ok(Self {
            program,
            args: words,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Start `command` under this shell with stdout and stderr piped.
    pub fn spawn(&self, command: &str) -> std::io::Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self {
            program: "sh".to_string(),
            args: vec!["-c".to_string()],
        }
    }
}

/// Stdout and stderr interleaved in arrival order, plus how the process ended.
///
/// `output` holds every byte read before a pipe failed, so a read error still
/// leaves the partial output available.
#[derive(Debug)]
pub struct Captured {
    pub status: std::io::Result<ExitStatus>,
    pub output: Vec<u8>,
}

/// Drain both pipes of `child` into one buffer, then wait for it to exit.
pub async fn capture(mut child: Child) -> Captured {
    let (output, drained) = drain(child.stdout.take(), child.stderr.take()).await;

    // Reap the child even when a pipe failed.
    let status = child.wait().await;
    Captured {
        status: drained.and(status),
        output,
    }
}

async fn drain<O, E>(stdout: Option<O>, stderr: Option<E>) -> (Vec<u8>, std::io::Result<()>)
where
    O: AsyncRead + Unpin + Send + 'static,
    E: AsyncRead + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();

    let readers = [
        stdout.map(|out| forward(out, tx.clone())),
        stderr.map(|err| forward(err, tx.clone())),
    ];
    drop(tx);

    let mut output = Vec::new();
    while let Some(chunk) = rx.recv().await {
        output.extend_from_slice(&chunk);
    }

    let mut result = Ok(());
    for reader in readers.into_iter().flatten() {
        let read = reader.await.map_err(std::io::Error::other).and_then(|r| r);
        if result.is_ok() {
            result = read;
        }
    }

    (output, result)
}

fn forward<R>(mut reader: R, tx: mpsc::UnboundedSender<Vec<u8>>) -> JoinHandle<std::io::Result<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; READ_CHUNK];
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 || tx.send(buf[..n].to_vec()).is_err() {
                return Ok(());
            }
        }
    })
}
