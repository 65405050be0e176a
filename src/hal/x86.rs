// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Hardware-backed execution context for 32-bit x86 targets.
// Author: Lukas Bower

//! Hardware-backed execution context for 32-bit x86 targets.
//!
//! Compilable stubs for the register and memory reads on the real target.
//! The inline-assembly backed accessors land during a future bring-up pass
//! once the final PC-class target is confirmed; every accessor currently
//! logs a debug message and returns an inert value so higher layers link.

use log::debug;

use crate::mem::VirtAddr;

use super::ExecutionContext;

/// Execution context backed by the live CPU registers.
#[derive(Debug, Default)]
pub struct HardwareContext;

impl ExecutionContext for HardwareContext {
    fn frame_pointer(&self) -> VirtAddr {
        debug!("hal/x86: frame_pointer() stub, returning null");
        VirtAddr::NULL
    }

    fn read_word(&self, addr: VirtAddr) -> u32 {
        debug!("hal/x86: read_word({addr:08x}) stub, returning 0");
        0
    }

    fn cycle_counter(&self) -> u64 {
        debug!("hal/x86: cycle_counter() stub, returning 0");
        0
    }
}
