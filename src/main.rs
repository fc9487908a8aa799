//! spinfib CLI entry point.
//!
//! Computes a Fibonacci number while a spinner animates on stdout, or prints
//! one of the walkthroughs. Logs go to stderr so stdout carries only the
//! program output.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, FromArgMatches, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spinfib_common::{DemoConfig, ShutdownMode, Strategy};
use spinfib_core::{Demo, Lesson};

#[derive(Debug, Parser)]
#[command(name = "spinfib", version, about = "Compute Fibonacci numbers with a spinner")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true, env = "SPINFIB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute Fibonacci(n) with a spinner (default).
    Run(RunArgs),
    /// Print the variables and vectors walkthrough.
    Basics,
    /// Print the value-versus-reference walkthrough.
    Ownership,
}

#[derive(Debug, Default, Args)]
struct RunArgs {
    /// Fibonacci index.
    #[arg(short = 'n', long, env = "SPINFIB_INDEX", allow_negative_numbers = true)]
    index: Option<i64>,

    /// Computation strategy: recursive, iterative or memoized.
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Delay between spinner glyphs in milliseconds.
    #[arg(short, long, env = "SPINFIB_DELAY_MS")]
    delay_ms: Option<u64>,

    /// Spinner glyph cycle.
    #[arg(long)]
    glyphs: Option<String>,

    /// Disable the spinner.
    #[arg(long)]
    no_spinner: bool,

    /// Leave the spinner running instead of stopping it.
    #[arg(long)]
    abandon: bool,
}

impl RunArgs {
    /// Parse run options from an empty command line.
    ///
    /// Used when no subcommand is given, so the `env` fallbacks still apply.
    fn from_env() -> Result<Self, clap::Error> {
        let matches =
            Self::augment_args(clap::Command::new("run")).try_get_matches_from(["run"])?;
        Self::from_arg_matches(&matches)
    }

    /// Apply command-line overrides on top of `config`.
    fn apply(self, config: &mut DemoConfig) {
        if let Some(index) = self.index {
            config.fibonacci.index = index;
        }
        if let Some(strategy) = self.strategy {
            config.fibonacci.strategy = strategy;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.spinner.delay_ms = delay_ms;
        }
        if let Some(glyphs) = self.glyphs {
            config.spinner.glyphs = glyphs;
        }
        if self.no_spinner {
            config.spinner.enabled = false;
        }
        if self.abandon {
            config.shutdown.mode = ShutdownMode::Abandon;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => DemoConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DemoConfig::default(),
    };

    let command = match cli.command {
        Some(command) => command,
        None => Command::Run(RunArgs::from_env().context("Invalid environment")?),
    };

    match command {
        Command::Run(args) => {
            args.apply(&mut config);

            let demo = Demo::new(config).context("Invalid demo configuration")?;
            debug!(config = ?demo.config(), "Configuration loaded");
            let outcome = demo.run(io::stdout()).await?;

            info!(
                index = outcome.index,
                value = outcome.value,
                strategy = %outcome.strategy,
                elapsed = ?outcome.elapsed,
                "Demo complete"
            );
        }
        Command::Basics => {
            spinfib_core::lessons::print(Lesson::Basics, io::stdout()).await?;
        }
        Command::Ownership => {
            spinfib_core::lessons::print(Lesson::Ownership, io::stdout()).await?;
        }
    }

    Ok(())
}
