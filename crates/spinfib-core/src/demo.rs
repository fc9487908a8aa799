//! Demo orchestration.
//!
//! [`Demo::run`] wires the pieces together:
//!
//! 1. Start the output writer on the given sink
//! 2. Spawn the spinner (unless disabled)
//! 3. Compute the Fibonacci number on a blocking thread
//! 4. Stop or abandon the spinner, per [`ShutdownMode`]
//! 5. Print `Fibonacci(n) = value` and wait for it to be flushed

use std::io::Write;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use spinfib_common::{DemoConfig, DemoError, ShutdownMode, Strategy};

use crate::fibonacci;
use crate::output::OutputWriter;
use crate::spinner::{Spinner, SpinnerHandle, SpinnerReport};

/// Result of a completed demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOutcome {
    /// The index that was computed.
    pub index: i64,
    /// Fibonacci number at `index`.
    pub value: u64,
    /// Algorithm used.
    pub strategy: Strategy,
    /// Wall-clock time spent in the computation.
    pub elapsed: Duration,
    /// Spinner summary, if the spinner ran and was stopped cleanly.
    pub spinner: Option<SpinnerReport>,
}

impl DemoOutcome {
    /// The line printed when the demo finishes.
    pub fn result_line(&self) -> String {
        format!("Fibonacci({}) = {}", self.index, self.value)
    }
}

/// A validated demo ready to run.
#[derive(Debug, Clone)]
pub struct Demo {
    config: DemoConfig,
}

impl Demo {
    /// Create a demo from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation, including a
    /// negative or overflowing Fibonacci index.
    pub fn new(config: DemoConfig) -> Result<Self, DemoError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the demo configuration.
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Run the demo, writing all output to `sink`.
    ///
    /// In [`ShutdownMode::Stop`] the spinner has finished and the writer has
    /// drained by the time this returns. In [`ShutdownMode::Abandon`] only
    /// the result line is guaranteed to be flushed; the spinner keeps going
    /// until the runtime shuts down.
    #[instrument(
        skip_all,
        fields(
            index = self.config.fibonacci.index,
            strategy = %self.config.fibonacci.strategy,
        )
    )]
    pub async fn run<W>(&self, sink: W) -> Result<DemoOutcome, DemoError>
    where
        W: Write + Send + 'static,
    {
        let (output, writer) = OutputWriter::spawn(sink);

        let spinner = if self.config.spinner.enabled {
            Some(Spinner::new(&self.config.spinner)?.spawn(output.clone()))
        } else {
            None
        };

        let index = self.config.fibonacci.index;
        let strategy = self.config.fibonacci.strategy;
        let started = Instant::now();

        debug!("Starting computation");
        let computed =
            tokio::task::spawn_blocking(move || fibonacci::compute(index, strategy)).await;
        let elapsed = started.elapsed();

        let spinner = match spinner {
            Some(handle) => self.finish_spinner(handle).await,
            None => None,
        };

        let value = computed.map_err(|e| DemoError::worker_panicked(format!("fibonacci: {e}")))??;
        info!(value, elapsed = ?elapsed, "Computation finished");

        let outcome = DemoOutcome {
            index,
            value,
            strategy,
            elapsed,
            spinner,
        };

        output.line(outcome.result_line())?;
        output.flush().await?;

        if self.config.shutdown.mode == ShutdownMode::Stop {
            drop(output);
            let bytes = writer.join().await?;
            debug!(bytes, "Output drained");
        }

        Ok(outcome)
    }

    async fn finish_spinner(&self, handle: SpinnerHandle) -> Option<SpinnerReport> {
        match self.config.shutdown.mode {
            ShutdownMode::Stop => match handle.stop(self.config.spinner.stop_timeout()).await {
                Ok(report) => {
                    debug!(frames = report.frames, exit = ?report.exit, "Spinner finished");
                    Some(report)
                }
                Err(e) => {
                    warn!(error = %e, "Spinner shutdown failed");
                    None
                }
            },
            ShutdownMode::Abandon => {
                handle.abandon();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;
    use crate::spinner::SpinnerExit;
    use spinfib_common::FibonacciError;

    fn config(index: i64, strategy: Strategy) -> DemoConfig {
        let mut config = DemoConfig::default();
        config.fibonacci.index = index;
        config.fibonacci.strategy = strategy;
        config.spinner.delay_ms = 1;
        config
    }

    #[test]
    fn test_result_line_format() {
        let outcome = DemoOutcome {
            index: 45,
            value: 1_134_903_170,
            strategy: Strategy::Recursive,
            elapsed: Duration::ZERO,
            spinner: None,
        };
        assert_eq!(outcome.result_line(), "Fibonacci(45) = 1134903170");
    }

    #[test]
    fn test_negative_index_rejected_up_front() {
        let result = Demo::new(config(-5, Strategy::Recursive));
        assert!(matches!(
            result,
            Err(DemoError::Fibonacci(FibonacciError::InvalidArgument { index: -5 }))
        ));
    }

    #[test]
    fn test_config_is_kept() {
        let demo = Demo::new(config(12, Strategy::Memoized)).unwrap();
        assert_eq!(demo.config().fibonacci.index, 12);
        assert_eq!(demo.config().fibonacci.strategy, Strategy::Memoized);
    }

    #[tokio::test]
    async fn test_run_prints_result() {
        let sink = MemorySink::new();
        let demo = Demo::new(config(20, Strategy::Recursive)).unwrap();

        let outcome = demo.run(sink.clone()).await.unwrap();

        assert_eq!(outcome.value, 6765);
        assert_eq!(outcome.spinner.map(|r| r.exit), Some(SpinnerExit::Stopped));
        assert!(sink.contents().ends_with("\rFibonacci(20) = 6765\n"));
    }

    #[tokio::test]
    async fn test_run_without_spinner() {
        let sink = MemorySink::new();
        let mut config = config(10, Strategy::Iterative);
        config.spinner.enabled = false;

        let outcome = Demo::new(config).unwrap().run(sink.clone()).await.unwrap();

        assert!(outcome.spinner.is_none());
        assert_eq!(sink.contents(), "\rFibonacci(10) = 55\n");
    }
}
