// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Hardware access seams for the monitor walkers.
// Author: Lukas Bower

//! Hardware access seams for the monitor walkers.
//!
//! The walkers never read registers or physical memory directly; they go
//! through these traits. One implementation is backed by the real machine
//! ([`x86`]), one by constructed in-memory state ([`synthetic`]) so every
//! walk is exercisable on a host with no kernel underneath it.

pub mod synthetic;
pub mod x86;

use crate::mem::{PhysAddr, SecondLevelTable, TopLevelTable, VirtAddr};

/// Read-only view of the live translation structure.
pub trait TranslationSource {
    /// The top-level table every walk starts from.
    fn root(&self) -> &TopLevelTable;

    /// Translate a second-level table's physical base into a readable
    /// location, or `None` when the base is not locally addressable.
    fn second_level(&self, base: PhysAddr) -> Option<&SecondLevelTable>;
}

/// Access to the registers and stack memory of the halted context.
///
/// The diagnostic session is assumed quiesced: reads are unsynchronized
/// and a concurrently mutating context yields torn results.
pub trait ExecutionContext {
    /// Current frame-pointer register value.
    fn frame_pointer(&self) -> VirtAddr;

    /// Read one 32-bit word of context memory. Reads outside the frame
    /// chain return a best-effort value; the walkers perform no bounds
    /// validation against real stack extents.
    fn read_word(&self, addr: VirtAddr) -> u32;

    /// Free-running CPU cycle counter.
    fn cycle_counter(&self) -> u64;
}

/// Link-time landmarks of the running kernel image.
#[derive(Clone, Copy, Debug)]
pub struct ImageInfo {
    /// Entry point of the image.
    pub entry: VirtAddr,
    /// End of the text segment.
    pub etext: VirtAddr,
    /// End of initialized data.
    pub edata: VirtAddr,
    /// End of the whole image.
    pub end: VirtAddr,
    /// Virtual base the image is linked at; physical = virtual - base.
    pub link_base: u32,
}
