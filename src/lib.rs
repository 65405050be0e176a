// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Root library for the kmon kernel-monitor diagnostics.
// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Interactive kernel-monitor diagnostics: translation-state inspection and
//! frame-pointer call-stack recovery behind an injectable console session.
//!
//! Everything the monitor touches — translation root, registers, stack
//! memory, symbol tables, output — is reached through a seam in [`hal`],
//! [`trace::symbols`], or [`sink`], so the walkers run unchanged against
//! real hardware accessors or the synthetic machine used by the test suite.

/// Console command table, tokenizer, and monitor session.
pub mod console;

/// Hardware access seams and the synthetic stand-in machine.
pub mod hal;

/// Address model, translation entries, and the mapping report walker.
pub mod mem;

/// Formatted line output sinks.
pub mod sink;

/// Call-stack recovery and symbolication.
pub mod trace;

pub use console::{CommandSpec, Monitor, Status, COMMANDS};
pub use sink::{LineSink, MemorySink};
