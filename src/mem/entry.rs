// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Translation-table entries, attribute bits, and permission glyphs.
// Author: Lukas Bower

//! Translation-table entries, attribute bits, and permission glyphs.
//!
//! An entry is one raw word: a page-aligned physical base or'd with its
//! attribute bits. A non-present entry carries no other valid information
//! and must be skipped, never decoded.

use core::fmt;

use bitflags::bitflags;

use super::addr::{PhysAddr, ENTRY_COUNT, PAGE_SIZE};

bitflags! {
    /// Attribute bits shared by both translation levels.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct EntryFlags: u32 {
        /// Mapping is present and may be decoded.
        const PRESENT = 1 << 0;
        /// Mapping is writable.
        const WRITABLE = 1 << 1;
        /// Mapping is reachable from user mode.
        const USER = 1 << 2;
        /// Top-level entry maps its whole region directly.
        const LARGE = 1 << 7;
    }
}

impl EntryFlags {
    /// Render the four-character permission string in fixed order:
    /// Present, Writable, User, Large. Clear bits render as `-`.
    #[must_use]
    pub fn glyphs(self) -> Glyphs {
        let mut glyphs = [b'-'; 4];
        if self.contains(Self::PRESENT) {
            glyphs[0] = b'r';
        }
        if self.contains(Self::WRITABLE) {
            glyphs[1] = b'w';
        }
        if self.contains(Self::USER) {
            glyphs[2] = b'u';
        }
        if self.contains(Self::LARGE) {
            glyphs[3] = b's';
        }
        Glyphs(glyphs)
    }
}

/// Four-character permission rendering of one entry's attribute bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs([u8; 4]);

impl Glyphs {
    /// The glyphs as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII is ever stored.
        core::str::from_utf8(&self.0).unwrap_or("----")
    }
}

impl fmt::Display for Glyphs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const BASE_MASK: u32 = !(PAGE_SIZE - 1);

/// One slot of the top-level table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TopLevelEntry(u32);

impl TopLevelEntry {
    /// An absent slot.
    pub const ABSENT: Self = Self(0);

    /// Compose an entry from a page-aligned physical base and attribute bits.
    #[must_use]
    pub const fn new(base: PhysAddr, flags: EntryFlags) -> Self {
        Self((base.get() & BASE_MASK) | flags.bits())
    }

    /// The raw entry word.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Attribute bits of this entry.
    #[must_use]
    pub fn flags(self) -> EntryFlags {
        EntryFlags::from_bits_truncate(self.0)
    }

    /// Physical base address, page aligned.
    #[must_use]
    pub const fn base(self) -> PhysAddr {
        PhysAddr::new(self.0 & BASE_MASK)
    }

    /// Present-bit shorthand.
    #[must_use]
    pub fn is_present(self) -> bool {
        self.flags().contains(EntryFlags::PRESENT)
    }

    /// Large-page shorthand.
    #[must_use]
    pub fn is_large(self) -> bool {
        self.flags().contains(EntryFlags::LARGE)
    }
}

/// One slot of a second-level table. The large bit is not meaningful here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SecondLevelEntry(u32);

impl SecondLevelEntry {
    /// An absent slot.
    pub const ABSENT: Self = Self(0);

    /// Compose an entry from a page-aligned physical base and attribute bits.
    #[must_use]
    pub const fn new(base: PhysAddr, flags: EntryFlags) -> Self {
        Self((base.get() & BASE_MASK) | flags.bits())
    }

    /// The raw entry word.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Attribute bits of this entry.
    #[must_use]
    pub fn flags(self) -> EntryFlags {
        EntryFlags::from_bits_truncate(self.0)
    }

    /// Physical base address of the mapped page.
    #[must_use]
    pub const fn base(self) -> PhysAddr {
        PhysAddr::new(self.0 & BASE_MASK)
    }

    /// Present-bit shorthand.
    #[must_use]
    pub fn is_present(self) -> bool {
        self.flags().contains(EntryFlags::PRESENT)
    }
}

/// The fixed-size top-level translation table.
pub struct TopLevelTable {
    entries: [TopLevelEntry; ENTRY_COUNT],
}

impl TopLevelTable {
    /// A table with every slot absent.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: [TopLevelEntry::ABSENT; ENTRY_COUNT],
        }
    }

    /// The entry at `index`.
    #[must_use]
    pub fn entry(&self, index: usize) -> TopLevelEntry {
        self.entries[index]
    }

    /// Install `entry` at `index`.
    pub fn set_entry(&mut self, index: usize, entry: TopLevelEntry) {
        self.entries[index] = entry;
    }
}

impl Default for TopLevelTable {
    fn default() -> Self {
        Self::empty()
    }
}

/// One fixed-size second-level translation table.
pub struct SecondLevelTable {
    entries: [SecondLevelEntry; ENTRY_COUNT],
}

impl SecondLevelTable {
    /// A table with every slot absent.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: [SecondLevelEntry::ABSENT; ENTRY_COUNT],
        }
    }

    /// The entry at `index`.
    #[must_use]
    pub fn entry(&self, index: usize) -> SecondLevelEntry {
        self.entries[index]
    }

    /// Install `entry` at `index`.
    pub fn set_entry(&mut self, index: usize, entry: SecondLevelEntry) {
        self.entries[index] = entry;
    }
}

impl Default for SecondLevelTable {
    fn default() -> Self {
        Self::empty()
    }
}
