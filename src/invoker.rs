//! Process Invoker
//!
//! Spawns the external translation tool, writes the request to its stdin and
//! streams stdout back as UTF-8 chunks.

use crate::config::ToolCommand;
use crate::error::{TransError, TransResult};
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::{mpsc, oneshot, Notify};
use tracing::{debug, error, warn};

/// Size of a single stdout read
const READ_BUFFER_SIZE: usize = 4096;

/// Trait for anything that can run a translation command
#[async_trait]
pub trait ProcessInvoker: Send + Sync + std::fmt::Debug {
    /// Start `command`, feed it `input` plus a newline, and return its output stream.
    ///
    /// Fails only when the process cannot be started.
    async fn invoke(&self, command: &ToolCommand, input: &str) -> TransResult<Invocation>;
}

/// How the external process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolExit {
    Success,
    /// Non-zero exit, or killed by a signal (`None`)
    Failed(Option<i32>),
    Cancelled,
}

/// Cancellation handle shared between an invocation and its caller
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    inner: Arc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the child is killed and the chunk stream ends
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called. Every clone waiting here wakes.
    pub async fn cancelled(&self) {
        loop {
            // Registered before the flag check so a concurrent cancel is not missed
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// A running (or finished) translation request.
///
/// Yields stdout chunks in arrival order, then ends.
#[derive(Debug)]
pub struct Invocation {
    chunks: mpsc::UnboundedReceiver<String>,
    exit: Option<oneshot::Receiver<ToolExit>>,
    cancel: CancelHandle,
}

impl Invocation {
    pub fn new(
        chunks: mpsc::UnboundedReceiver<String>,
        exit: Option<oneshot::Receiver<ToolExit>>,
        cancel: CancelHandle,
    ) -> Self {
        Self {
            chunks,
            exit,
            cancel,
        }
    }

    /// An invocation fed by hand; the stream ends when the sender is dropped
    pub fn channel() -> (mpsc::UnboundedSender<String>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx, None, CancelHandle::new()))
    }

    /// An already completed invocation that replays `chunks`
    pub fn from_chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        for chunk in chunks {
            let _ = tx.send(chunk.into());
        }
        let (exit_tx, exit_rx) = oneshot::channel();
        let _ = exit_tx.send(ToolExit::Success);
        Self::new(rx, Some(exit_rx), CancelHandle::new())
    }

    /// Next chunk of output, `None` once the tool closed stdout
    pub async fn next_chunk(&mut self) -> Option<String> {
        self.chunks.recv().await
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Wait for the exit report. `None` when the invocation has none.
    pub async fn exit(self) -> Option<ToolExit> {
        match self.exit {
            Some(rx) => rx.await.ok(),
            None => None,
        }
    }
}

impl Stream for Invocation {
    type Item = String;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.get_mut().chunks.poll_recv(cx)
    }
}

/// Runs the tool as a real child process
#[derive(Debug, Default, Clone)]
pub struct CommandInvoker;

impl CommandInvoker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessInvoker for CommandInvoker {
    async fn invoke(&self, command: &ToolCommand, input: &str) -> TransResult<Invocation> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| {
                error!("❌ Failed to spawn {}: {}", command.program, source);
                TransError::ProcessSpawn {
                    program: command.program.clone(),
                    source,
                }
            })?;

        debug!("🚀 Spawned '{}' (pid {:?})", command, child.id());

        if let Some(stdin) = child.stdin.take() {
            let request = input.to_string();
            tokio::spawn(async move {
                if let Err(e) = write_request(stdin, &request).await {
                    debug!("Translation tool closed stdin early: {}", e);
                }
            });
        }

        let stdout = child.stdout.take();
        let (chunk_tx, chunk_rx) = mpsc::unbounded_channel();
        let (exit_tx, exit_rx) = oneshot::channel();
        let cancel = CancelHandle::new();

        tokio::spawn(pump_output(
            child,
            stdout,
            chunk_tx,
            exit_tx,
            cancel.clone(),
            command.to_string(),
        ));

        Ok(Invocation::new(chunk_rx, Some(exit_rx), cancel))
    }
}

/// Write the request text, a newline, then close the stream (end of input)
pub async fn write_request<W>(mut writer: W, input: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(input.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.shutdown().await?;
    Ok(())
}

async fn pump_output(
    mut child: Child,
    stdout: Option<ChildStdout>,
    chunks: mpsc::UnboundedSender<String>,
    exit: oneshot::Sender<ToolExit>,
    cancel: CancelHandle,
    command: String,
) {
    if let Some(mut stdout) = stdout {
        let mut decoder = Utf8Chunker::default();
        let mut buf = [0u8; READ_BUFFER_SIZE];

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    kill_cancelled(&mut child, &command).await;
                    let _ = exit.send(ToolExit::Cancelled);
                    return;
                }
                read = stdout.read(&mut buf) => match read {
                    Ok(0) => break,
                    Ok(n) => {
                        if let Some(text) = decoder.push(&buf[..n]) {
                            // Receiver gone means nobody renders; keep draining anyway
                            let _ = chunks.send(text);
                        }
                    }
                    Err(e) => {
                        warn!("Failed reading output of '{}': {}", command, e);
                        break;
                    }
                }
            }
        }

        if let Some(rest) = decoder.finish() {
            let _ = chunks.send(rest);
        }
    }
    drop(chunks);

    let outcome = tokio::select! {
        _ = cancel.cancelled() => {
            kill_cancelled(&mut child, &command).await;
            ToolExit::Cancelled
        }
        status = child.wait() => match status {
            Ok(status) if status.success() => {
                debug!("✅ '{}' finished", command);
                ToolExit::Success
            }
            Ok(status) => {
                warn!("⚠️ '{}' exited with {}", command, status);
                ToolExit::Failed(status.code())
            }
            Err(e) => {
                warn!("⚠️ Could not wait for '{}': {}", command, e);
                ToolExit::Failed(None)
            }
        }
    };
    let _ = exit.send(outcome);
}

async fn kill_cancelled(child: &mut Child, command: &str) {
    debug!("🛑 Cancelling '{}'", command);
    if let Err(e) = child.kill().await {
        debug!("Kill of '{}' failed: {}", command, e);
    }
}

/// Reassembles stdout reads into strings without splitting code points.
#[derive(Debug, Default)]
pub(crate) struct Utf8Chunker {
    pending: Vec<u8>,
}

impl Utf8Chunker {
    /// Feed raw bytes; returns the decodable prefix, if any
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Option<String> {
        self.pending.extend_from_slice(bytes);
        let ready = self.pending.len() - incomplete_tail(&self.pending);
        if ready == 0 {
            return None;
        }
        let head: Vec<u8> = self.pending.drain(..ready).collect();
        Some(String::from_utf8_lossy(&head).into_owned())
    }

    /// Flush whatever is left, lossily
    pub(crate) fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

/// Number of trailing bytes that start a code point not yet complete
fn incomplete_tail(bytes: &[u8]) -> usize {
    for back in 1..=bytes.len().min(3) {
        let byte = bytes[bytes.len() - back];
        if byte & 0b1100_0000 == 0b1000_0000 {
            continue;
        }
        let width = match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        return if width > back { back } else { 0 };
    }
    0
}
