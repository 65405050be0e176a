// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Formatted line output sinks for monitor reports.
// Author: Lukas Bower

//! Formatted line output sinks for monitor reports.
//!
//! Report lines go to a [`LineSink`], not to the logger: the sink is the
//! console the operator is looking at, the logger is for breadcrumbs. One
//! logical record per call, delivered in order; no further buffering
//! contract.

use core::fmt;

/// Destination for one formatted report line per call.
pub trait LineSink {
    /// Emit a single line.
    fn line(&mut self, args: fmt::Arguments<'_>);
}

/// Sink writing through to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn line(&mut self, args: fmt::Arguments<'_>) {
        println!("{args}");
    }
}

/// Sink capturing lines in memory for assertions and host tooling.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    /// An empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drop all captured lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl LineSink for MemorySink {
    fn line(&mut self, args: fmt::Arguments<'_>) {
        self.lines.push(args.to_string());
    }
}
