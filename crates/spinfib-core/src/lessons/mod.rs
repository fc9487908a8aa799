//! Short walkthroughs printed by the `basics` and `ownership` commands.
//!
//! Each walkthrough builds its output as a list of lines so it can be
//! checked in tests, then [`print`] sends the lines through the same
//! [`OutputWriter`] the demo uses.

pub mod basics;
pub mod ownership;

use std::io::Write;

use tracing::debug;

use spinfib_common::DemoError;

use crate::output::OutputWriter;

/// A printable walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lesson {
    /// Bindings, arithmetic, and growing a vector.
    Basics,
    /// Passing by value versus by mutable reference.
    Ownership,
}

impl Lesson {
    /// The lines this lesson prints.
    pub fn lines(self) -> Vec<String> {
        match self {
            Self::Basics => basics::lines(),
            Self::Ownership => ownership::lines(),
        }
    }
}

/// Print `lesson` to `sink` and wait for the output to drain.
///
/// Returns the number of bytes written.
pub async fn print<W>(lesson: Lesson, sink: W) -> Result<u64, DemoError>
where
    W: Write + Send + 'static,
{
    let (output, writer) = OutputWriter::spawn(sink);
    for line in lesson.lines() {
        output.line(line)?;
    }
    drop(output);

    let bytes = writer.join().await?;
    debug!(?lesson, bytes, "Lesson printed");
    Ok(bytes)
}
