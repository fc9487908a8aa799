//! Core of spinfib: a Fibonacci computation with a spinner running alongside.
//!
//! This crate provides:
//! - [`fibonacci`](mod@fibonacci): The computation itself, with selectable strategy
//! - [`Spinner`]: Background glyph animation with a stop signal
//! - [`OutputWriter`]: Single owner of the terminal, fed by message passing
//! - [`Demo`]: Orchestration of all of the above
//! - [`lessons`]: Small walkthroughs printed through the same writer
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────┐
//! │  spawn_blocking      │        │  Spinner task        │
//! │  fibonacci::compute  │        │  glyph, sleep, ...   │
//! └──────────┬───────────┘        └──────────┬───────────┘
//!            │ value                         │ Frame::Glyph
//!            ▼                               ▼
//! ┌──────────────────────┐  Line  ┌──────────────────────┐
//! │  Demo::run           │───────►│  OutputWriter task   │──► stdout
//! │  stop spinner, print │        │  (sole writer)       │
//! └──────────────────────┘        └──────────────────────┘
//! ```

pub mod demo;
pub mod fibonacci;
pub mod lessons;
pub mod output;
pub mod spinner;

pub use demo::{Demo, DemoOutcome};
pub use fibonacci::{compute, fibonacci};
pub use lessons::Lesson;
pub use output::{Frame, MemorySink, OutputHandle, OutputTask, OutputWriter};
pub use spinner::{GlyphCycle, Spinner, SpinnerExit, SpinnerHandle, SpinnerReport};
