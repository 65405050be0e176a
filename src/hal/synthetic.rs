// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: In-memory machine standing in for real translation and stack state.
// Author: Lukas Bower

//! In-memory machine standing in for real translation and stack state.
//!
//! Used by the test suite and the demo shell: page tables are constructed
//! slot by slot, stack memory is a sparse word map (absent words read as
//! zero, matching the best-effort contract of [`ExecutionContext`]), and
//! the cycle counter advances by a fixed step per read.

use std::cell::Cell;
use std::collections::BTreeMap;

use crate::mem::{PhysAddr, SecondLevelTable, TopLevelTable, VirtAddr};

use super::{ExecutionContext, TranslationSource};

/// Cycle-counter advance per read, so timed commands always observe a
/// non-zero elapsed interval.
const CYCLE_STEP: u64 = 64;

/// Constructed translation and stack state behind the monitor seams.
#[derive(Default)]
pub struct SyntheticMachine {
    root: TopLevelTable,
    tables: BTreeMap<u32, SecondLevelTable>,
    words: BTreeMap<u32, u32>,
    frame_pointer: VirtAddr,
    cycles: Cell<u64>,
}

impl SyntheticMachine {
    /// An empty machine: nothing mapped, null frame pointer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to the top-level table.
    pub fn root_mut(&mut self) -> &mut TopLevelTable {
        &mut self.root
    }

    /// Make `table` addressable at physical `base` for second-level walks.
    pub fn attach_table(&mut self, base: PhysAddr, table: SecondLevelTable) {
        self.tables.insert(base.get(), table);
    }

    /// Write one word of context memory.
    pub fn write_word(&mut self, addr: VirtAddr, value: u32) {
        self.words.insert(addr.get(), value);
    }

    /// Set the frame-pointer register.
    pub fn set_frame_pointer(&mut self, fp: VirtAddr) {
        self.frame_pointer = fp;
    }

    /// Lay out one activation record at `fp`: the saved caller frame
    /// pointer, the return address one word above, then the argument slots.
    pub fn push_frame(&mut self, fp: VirtAddr, caller_fp: VirtAddr, ret: VirtAddr, args: &[u32]) {
        self.write_word(fp, caller_fp.get());
        self.write_word(fp.wrapping_add(4), ret.get());
        for (slot, arg) in args.iter().enumerate() {
            self.write_word(fp.wrapping_add(8 + 4 * slot as u32), *arg);
        }
    }
}

impl TranslationSource for SyntheticMachine {
    fn root(&self) -> &TopLevelTable {
        &self.root
    }

    fn second_level(&self, base: PhysAddr) -> Option<&SecondLevelTable> {
        self.tables.get(&base.get())
    }
}

impl ExecutionContext for SyntheticMachine {
    fn frame_pointer(&self) -> VirtAddr {
        self.frame_pointer
    }

    fn read_word(&self, addr: VirtAddr) -> u32 {
        self.words.get(&addr.get()).copied().unwrap_or(0)
    }

    fn cycle_counter(&self) -> u64 {
        let now = self.cycles.get();
        self.cycles.set(now + CYCLE_STEP);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_words_read_as_zero() {
        let machine = SyntheticMachine::new();
        assert_eq!(machine.read_word(VirtAddr::new(0xdead_0000)), 0);
    }

    #[test]
    fn cycle_counter_advances_per_read() {
        let machine = SyntheticMachine::new();
        let first = machine.cycle_counter();
        let second = machine.cycle_counter();
        assert!(second > first);
    }

    #[test]
    fn frames_lay_out_ret_and_args() {
        let mut machine = SyntheticMachine::new();
        let fp = VirtAddr::new(0x0011_0000);
        machine.push_frame(fp, VirtAddr::NULL, VirtAddr::new(0x0010_0040), &[7, 8]);
        assert_eq!(machine.read_word(fp), 0);
        assert_eq!(machine.read_word(fp.wrapping_add(4)), 0x0010_0040);
        assert_eq!(machine.read_word(fp.wrapping_add(8)), 7);
        assert_eq!(machine.read_word(fp.wrapping_add(12)), 8);
    }
}
