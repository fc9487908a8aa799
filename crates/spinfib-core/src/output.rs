//! Serialized terminal output.
//!
//! The spinner and the result printer never touch the terminal directly.
//! They send [`Frame`]s to a single [`OutputWriter`] task which owns the
//! sink and writes frames in arrival order, so a glyph can never land in
//! the middle of the result line.
//!
//! ```text
//!   Spinner ──Glyph──┐
//!                    ├──► mpsc ──► OutputWriter ──► sink (stdout)
//!   Demo ────Line────┘
//! ```

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use spinfib_common::DemoError;

/// A display update sent to the output writer.
#[derive(Debug)]
pub enum Frame {
    /// Replace the current spinner glyph: `\r{glyph}`.
    Glyph(char),
    /// Print a full line over the spinner: `\r{line}\n`.
    Line(String),
    /// Erase the spinner glyph: `\r \r`.
    Clear,
    /// Flush the sink, then acknowledge.
    Flush(oneshot::Sender<()>),
}

/// Cloneable sender side of the output writer.
#[derive(Debug, Clone)]
pub struct OutputHandle {
    tx: mpsc::UnboundedSender<Frame>,
}

impl OutputHandle {
    /// Queue a spinner glyph.
    pub fn glyph(&self, glyph: char) -> Result<(), DemoError> {
        self.send(Frame::Glyph(glyph))
    }

    /// Queue a full line.
    pub fn line(&self, line: impl Into<String>) -> Result<(), DemoError> {
        self.send(Frame::Line(line.into()))
    }

    /// Queue an erase of the spinner glyph.
    pub fn clear(&self) -> Result<(), DemoError> {
        self.send(Frame::Clear)
    }

    /// Wait until every frame queued before this call has been written
    /// and flushed.
    pub async fn flush(&self) -> Result<(), DemoError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.send(Frame::Flush(ack_tx))?;
        ack_rx.await.map_err(|_| DemoError::OutputClosed)
    }

    /// Returns `true` once the writer has stopped accepting frames.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn send(&self, frame: Frame) -> Result<(), DemoError> {
        self.tx.send(frame).map_err(|_| DemoError::OutputClosed)
    }
}

/// Handle to the running output writer task.
#[derive(Debug)]
pub struct OutputTask {
    handle: JoinHandle<Result<u64, io::Error>>,
}

impl OutputTask {
    /// Wait for the writer to drain.
    ///
    /// The writer finishes once every [`OutputHandle`] has been dropped.
    /// Returns the total number of bytes written.
    pub async fn join(self) -> Result<u64, DemoError> {
        self.handle
            .await
            .map_err(|e| DemoError::worker_panicked(format!("output writer: {e}")))?
            .map_err(DemoError::from)
    }
}

/// The task that owns the output sink.
pub struct OutputWriter<W> {
    sink: W,
    rx: mpsc::UnboundedReceiver<Frame>,
    written: u64,
}

impl<W> OutputWriter<W>
where
    W: Write + Send + 'static,
{
    /// Spawn a writer task that owns `sink`.
    pub fn spawn(sink: W) -> (OutputHandle, OutputTask) {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = Self {
            sink,
            rx,
            written: 0,
        };
        let handle = tokio::spawn(writer.run());

        (OutputHandle { tx }, OutputTask { handle })
    }

    async fn run(mut self) -> Result<u64, io::Error> {
        while let Some(frame) = self.rx.recv().await {
            if let Err(e) = self.write_frame(frame) {
                warn!(error = %e, "Output write failed");
                self.rx.close();
                return Err(e);
            }
        }

        self.sink.flush()?;
        debug!(bytes = self.written, "Output writer drained");
        Ok(self.written)
    }

    fn write_frame(&mut self, frame: Frame) -> io::Result<()> {
        match frame {
            Frame::Glyph(glyph) => self.write_bytes(format!("\r{glyph}").as_bytes())?,
            Frame::Line(line) => self.write_bytes(format!("\r{line}\n").as_bytes())?,
            Frame::Clear => self.write_bytes(b"\r \r")?,
            Frame::Flush(ack) => {
                self.sink.flush()?;
                // The caller may have stopped waiting.
                let _ = ack.send(());
                return Ok(());
            }
        }
        self.sink.flush()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.sink.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }
}

/// An in-memory sink that can be cloned and inspected while a writer owns it.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.lock().len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.lock().is_empty()
    }
}

impl Write for MemorySink {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_frame_encoding() {
        let sink = MemorySink::new();
        let (output, task) = OutputWriter::spawn(sink.clone());
        assert!(sink.is_empty());

        assert_ok!(output.glyph('-'));
        assert_ok!(output.glyph('\\'));
        assert_ok!(output.clear());
        assert_ok!(output.line("done"));
        drop(output);

        let written = task.join().await.unwrap();
        assert!(!sink.is_empty());
        assert_eq!(sink.contents(), "\r-\r\\\r \r\rdone\n");
        assert_eq!(written, sink.len() as u64);
    }

    #[tokio::test]
    async fn test_flush_waits_for_earlier_frames() {
        let sink = MemorySink::new();
        let (output, task) = OutputWriter::spawn(sink.clone());

        output.line("first").unwrap();
        output.line("second").unwrap();
        assert_ok!(output.flush().await);
        assert_eq!(sink.contents(), "\rfirst\n\rsecond\n");

        drop(output);
        task.join().await.unwrap();
    }

    #[tokio::test]
    async fn test_frames_from_clones_are_not_interleaved() {
        let sink = MemorySink::new();
        let (output, task) = OutputWriter::spawn(sink.clone());

        let mut workers = Vec::new();
        for id in 0..4 {
            let output = output.clone();
            workers.push(tokio::spawn(async move {
                for i in 0..50 {
                    output.line(format!("worker-{id}-line-{i}")).unwrap();
                    tokio::task::yield_now().await;
                }
            }));
        }
        for worker in workers {
            worker.await.unwrap();
        }
        drop(output);
        task.join().await.unwrap();

        let contents = sink.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 200);
        for line in lines {
            assert!(line.starts_with("\rworker-"), "torn line: {line:?}");
        }
    }

    #[tokio::test]
    async fn test_write_error_closes_output() {
        let (output, task) = OutputWriter::spawn(BrokenSink);

        output.line("lost").unwrap();
        let result = task.join().await;
        assert!(matches!(result, Err(DemoError::Io(_))));

        assert!(output.is_closed());
        assert_err!(output.glyph('-'));
    }
}
