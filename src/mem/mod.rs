// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Address translation data model and the mapping report walker.
// Author: Lukas Bower

//! Address translation data model and the mapping report walker.

pub mod addr;
pub mod entry;
pub mod mappings;

pub use addr::{
    AddrSpan, PhysAddr, VirtAddr, ENTRY_COUNT, LARGE_PAGE_SHIFT, LARGE_PAGE_SIZE, PAGE_SHIFT,
    PAGE_SIZE,
};
pub use entry::{
    EntryFlags, Glyphs, SecondLevelEntry, SecondLevelTable, TopLevelEntry, TopLevelTable,
};
