// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Call-stack recovery and symbolication.
// Author: Lukas Bower

//! Call-stack recovery and symbolication.

pub mod backtrace;
pub mod symbols;

pub use backtrace::ARG_WORDS;
pub use symbols::{DebugInfo, Symbol, SymbolResolver, SymbolTable, UNKNOWN_FILE};
