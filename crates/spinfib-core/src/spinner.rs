//! Spinner animation task.
//!
//! The spinner cycles through a fixed set of glyphs, sending one
//! [`Frame::Glyph`](crate::output::Frame::Glyph) to the output writer and
//! then sleeping for the configured delay. The sleep is its only suspension
//! point, and the only place it listens for the stop signal.
//!
//! A running spinner is controlled through a [`SpinnerHandle`]:
//! - [`SpinnerHandle::stop`] signals the task and waits, with a timeout,
//!   for it to finish.
//! - [`SpinnerHandle::abandon`] detaches the task and lets it spin until
//!   the runtime shuts down.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use spinfib_common::{DemoError, SpinnerConfig};

use crate::output::OutputHandle;

/// Infinite iterator over a glyph sequence, starting at the first glyph.
#[derive(Debug, Clone)]
pub struct GlyphCycle {
    glyphs: Vec<char>,
    next: usize,
}

impl GlyphCycle {
    /// The classic `- \ | /` rotation.
    pub const DEFAULT: [char; 4] = ['-', '\\', '|', '/'];

    /// Create a cycle over `glyphs`.
    ///
    /// # Errors
    ///
    /// Returns an error if `glyphs` is empty.
    pub fn new(glyphs: impl IntoIterator<Item = char>) -> Result<Self, DemoError> {
        let glyphs: Vec<char> = glyphs.into_iter().collect();
        if glyphs.is_empty() {
            return Err(DemoError::invalid_config("spinner needs at least one glyph"));
        }
        Ok(Self { glyphs, next: 0 })
    }

    /// Number of glyphs in one full rotation.
    pub fn period(&self) -> usize {
        self.glyphs.len()
    }

    /// Return the current glyph and move to the next one.
    pub fn advance(&mut self) -> char {
        let glyph = self.glyphs[self.next];
        self.next = (self.next + 1) % self.glyphs.len();
        glyph
    }
}

impl Default for GlyphCycle {
    fn default() -> Self {
        Self {
            glyphs: Self::DEFAULT.to_vec(),
            next: 0,
        }
    }
}

impl Iterator for GlyphCycle {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        Some(self.advance())
    }
}

/// Why a spinner task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerExit {
    /// The stop signal was received.
    Stopped,
    /// The output writer went away.
    OutputClosed,
}

/// Summary returned by a finished spinner task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinnerReport {
    /// Number of glyphs sent to the output writer.
    pub frames: u64,
    /// Why the task ended.
    pub exit: SpinnerExit,
}

/// Spinner task launcher.
pub struct Spinner {
    glyphs: GlyphCycle,
    delay: Duration,
}

impl Spinner {
    /// Create a spinner from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the glyph set is empty or the delay is zero.
    pub fn new(config: &SpinnerConfig) -> Result<Self, DemoError> {
        if config.delay_ms == 0 {
            return Err(DemoError::invalid_config(
                "spinner delay must be greater than zero",
            ));
        }

        Ok(Self {
            glyphs: GlyphCycle::new(config.glyphs.chars())?,
            delay: config.delay(),
        })
    }

    /// Start the spinner as a background task writing to `output`.
    pub fn spawn(self, output: OutputHandle) -> SpinnerHandle {
        let (stop_tx, stop_rx) = oneshot::channel();

        debug!(
            period = self.glyphs.period(),
            delay = ?self.delay,
            "Spawning spinner"
        );
        let handle = tokio::spawn(self.run(output, stop_rx));

        SpinnerHandle {
            stop_tx: Some(stop_tx),
            handle,
        }
    }

    async fn run(self, output: OutputHandle, mut stop_rx: oneshot::Receiver<()>) -> SpinnerReport {
        let mut glyphs = self.glyphs;
        let mut frames = 0;
        // Cleared once the handle is dropped without signalling.
        let mut listening = true;

        loop {
            let glyph = glyphs.advance();
            if output.glyph(glyph).is_err() {
                debug!(frames, "Output closed, spinner exiting");
                return SpinnerReport {
                    frames,
                    exit: SpinnerExit::OutputClosed,
                };
            }
            frames += 1;

            let sleep = tokio::time::sleep(self.delay);
            tokio::pin!(sleep);

            tokio::select! {
                signal = &mut stop_rx, if listening => match signal {
                    Ok(()) => {
                        // Best effort: the writer may already be gone.
                        let _ = output.clear();
                        debug!(frames, "Spinner stopped");
                        return SpinnerReport {
                            frames,
                            exit: SpinnerExit::Stopped,
                        };
                    }
                    Err(_) => {
                        listening = false;
                        sleep.await;
                    }
                },
                () = &mut sleep => {}
            }
        }
    }
}

/// Control handle for a running spinner task.
#[derive(Debug)]
pub struct SpinnerHandle {
    /// Stop signal sender.
    stop_tx: Option<oneshot::Sender<()>>,
    /// Spinner task handle.
    handle: JoinHandle<SpinnerReport>,
}

impl SpinnerHandle {
    /// Returns `true` if the spinner task has ended.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signal the spinner to stop and wait up to `timeout` for it to finish.
    ///
    /// If the task does not finish in time it is aborted and
    /// [`DemoError::SpinnerStopTimeout`] is returned.
    pub async fn stop(mut self, timeout: Duration) -> Result<SpinnerReport, DemoError> {
        if let Some(tx) = self.stop_tx.take() {
            // The task may already have exited on its own.
            let _ = tx.send(());
        }

        match tokio::time::timeout(timeout, &mut self.handle).await {
            Ok(Ok(report)) => Ok(report),
            Ok(Err(e)) => Err(DemoError::worker_panicked(format!("spinner: {e}"))),
            Err(_) => {
                self.handle.abort();
                let duration_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(duration_ms, "Spinner did not acknowledge stop, aborted");
                Err(DemoError::SpinnerStopTimeout { duration_ms })
            }
        }
    }

    /// Detach the spinner without signalling it.
    ///
    /// The task keeps emitting glyphs until the output writer closes or the
    /// runtime shuts down.
    pub fn abandon(self) {
        debug!("Abandoning spinner");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{MemorySink, OutputWriter};
    use tokio_test::assert_ok;

    fn fast_config() -> SpinnerConfig {
        SpinnerConfig {
            delay_ms: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_cycle() {
        let glyphs: String = GlyphCycle::default().take(10).collect();
        assert_eq!(glyphs, r"-\|/-\|/-\");
    }

    #[test]
    fn test_any_window_is_a_rotation() {
        let emitted: Vec<char> = GlyphCycle::default().skip(3).take(12).collect();
        let rotations: Vec<Vec<char>> = (0..4)
            .map(|offset| {
                GlyphCycle::DEFAULT
                    .iter()
                    .cycle()
                    .skip(offset)
                    .take(4)
                    .copied()
                    .collect()
            })
            .collect();

        for window in emitted.windows(4) {
            assert!(rotations.contains(&window.to_vec()), "{window:?}");
        }
    }

    #[test]
    fn test_advance_wraps_around() {
        let mut cycle = GlyphCycle::new(['x']).unwrap();
        assert_eq!(cycle.advance(), 'x');
        assert_eq!(cycle.advance(), 'x');

        let mut cycle = GlyphCycle::default();
        let glyphs: Vec<char> = (0..5).map(|_| cycle.advance()).collect();
        assert_eq!(glyphs, vec!['-', '\\', '|', '/', '-']);
        assert_eq!(cycle.next(), Some('\\'));
    }

    #[test]
    fn test_custom_cycle() {
        let cycle = GlyphCycle::new(".oO".chars()).unwrap();
        assert_eq!(cycle.period(), 3);
        let glyphs: String = cycle.take(7).collect();
        assert_eq!(glyphs, ".oO.oO.");
    }

    #[test]
    fn test_empty_cycle_rejected() {
        assert!(GlyphCycle::new(std::iter::empty()).is_err());
    }

    #[test]
    fn test_spinner_rejects_zero_delay() {
        let config = SpinnerConfig {
            delay_ms: 0,
            ..Default::default()
        };
        assert!(Spinner::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_stop_acknowledged() {
        let sink = MemorySink::new();
        let (output, task) = OutputWriter::spawn(sink.clone());

        let handle = Spinner::new(&fast_config()).unwrap().spawn(output.clone());
        tokio::time::sleep(Duration::from_millis(20)).await;

        let report = handle.stop(Duration::from_secs(1)).await.unwrap();
        assert_eq!(report.exit, SpinnerExit::Stopped);
        assert!(report.frames >= 1);

        drop(output);
        task.join().await.unwrap();

        // Every frame was written, and the glyph was erased at the end.
        let contents = sink.contents();
        let glyphs: String = contents
            .strip_suffix("\r \r")
            .unwrap()
            .split('\r')
            .filter(|frame| !frame.is_empty())
            .collect();
        assert_eq!(glyphs.chars().count() as u64, report.frames);
        let expected: String = GlyphCycle::default().take(glyphs.chars().count()).collect();
        assert_eq!(glyphs, expected);
    }

    #[tokio::test]
    async fn test_stop_timeout_aborts() {
        // A task that never reaches a suspension point with the stop signal.
        let (stop_tx, _stop_rx) = oneshot::channel();
        let handle = SpinnerHandle {
            stop_tx: Some(stop_tx),
            handle: tokio::spawn(std::future::pending::<SpinnerReport>()),
        };

        let result = handle.stop(Duration::from_millis(10)).await;
        assert!(matches!(
            result,
            Err(DemoError::SpinnerStopTimeout { duration_ms: 10 })
        ));
    }

    #[tokio::test]
    async fn test_spinner_exits_when_output_closes() {
        struct FailingSink;

        impl std::io::Write for FailingSink {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let (output, task) = OutputWriter::spawn(FailingSink);
        let handle = Spinner::new(&fast_config()).unwrap().spawn(output);

        assert!(task.join().await.is_err());
        tokio::time::timeout(Duration::from_secs(1), async {
            while !handle.is_finished() {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .unwrap();

        let report = assert_ok!(handle.stop(Duration::from_secs(1)).await);
        assert_eq!(report.exit, SpinnerExit::OutputClosed);
        assert!(report.frames >= 1);
    }

    #[tokio::test]
    async fn test_abandoned_spinner_keeps_running() {
        let sink = MemorySink::new();
        let (output, _task) = OutputWriter::spawn(sink.clone());

        Spinner::new(&fast_config()).unwrap().spawn(output).abandon();

        tokio::time::sleep(Duration::from_millis(10)).await;
        let before = sink.len();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(sink.len() > before, "abandoned spinner stopped emitting");
    }
}
