// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Argument tokenization and hex address parsing for monitor commands.
// Author: Lukas Bower

//! Argument tokenization and hex address parsing for monitor commands.
//!
//! Address arguments are bare base-16 integers with an optional `0x`
//! prefix; anything with trailing non-hex characters is rejected outright.
//! Violations are values, not panics: the command prints them on the sink
//! and the session continues.

use heapless::Vec;
use thiserror::Error;

use crate::mem::{AddrSpan, VirtAddr};

/// Maximum number of whitespace-separated tokens per command line.
pub const MAX_ARGS: usize = 16;

/// Argument violations reported on the output sink.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    /// Not a bare base-16 integer.
    #[error("malformed hex address '{0}'")]
    BadHex(String),
    /// Span bounds supplied in the wrong order.
    #[error("low address {low:08x} exceeds high address {high:08x}")]
    Inverted {
        /// Offending low bound.
        low: VirtAddr,
        /// Offending high bound.
        high: VirtAddr,
    },
    /// Command line held more than the permitted number of tokens.
    #[error("too many arguments (max {0})")]
    TooManyArgs(usize),
}

/// Split a command line into at most [`MAX_ARGS`] whitespace-separated
/// tokens.
pub fn tokenize(line: &str) -> Result<Vec<&str, MAX_ARGS>, ArgError> {
    let mut argv = Vec::new();
    for token in line.split_whitespace() {
        argv.push(token).map_err(|_| ArgError::TooManyArgs(MAX_ARGS))?;
    }
    Ok(argv)
}

/// Parse one base-16 address argument, rejecting trailing non-hex
/// characters.
pub fn parse_hex_addr(arg: &str) -> Result<VirtAddr, ArgError> {
    let digits = arg
        .strip_prefix("0x")
        .or_else(|| arg.strip_prefix("0X"))
        .unwrap_or(arg);
    u32::from_str_radix(digits, 16)
        .map(VirtAddr::new)
        .map_err(|_| ArgError::BadHex(arg.to_owned()))
}

/// Parse and order-check a pair of hex address arguments.
pub fn parse_span(low: &str, high: &str) -> Result<AddrSpan, ArgError> {
    let low = parse_hex_addr(low)?;
    let high = parse_hex_addr(high)?;
    AddrSpan::new(low, high).ok_or(ArgError::Inverted { low, high })
}
