// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Range-coalesced report of the live translation structure.
// Author: Lukas Bower

//! Range-coalesced report of the live translation structure.
//!
//! The walk is read-only and run-to-completion: one pass from the low bound
//! to the high bound, skipping absent top-level regions in a single stride
//! and descending into second-level tables only for present, non-large
//! entries. Entries are never split — a report line always covers its
//! entry's whole naturally aligned region, even when only part of that
//! region falls inside the requested span.

use log::debug;

use crate::hal::TranslationSource;
use crate::sink::LineSink;

use super::addr::{AddrSpan, VirtAddr, ENTRY_COUNT, LARGE_PAGE_SIZE, PAGE_SIZE};
use super::entry::SecondLevelTable;

/// Report every present mapping intersecting `span`, in ascending order.
///
/// Cursor advances are overflow-checked, so a span ending at the
/// address-space ceiling terminates instead of wrapping back to zero.
pub fn show(src: &dyn TranslationSource, sink: &mut dyn LineSink, span: AddrSpan) {
    debug!("mapping walk {:08x}-{:08x}", span.low, span.high);
    sink.line(format_args!(
        "show mappings: {:08x}-{:08x}",
        span.low, span.high
    ));

    let mut cursor = Some(span.low);
    while let Some(cur) = cursor {
        if cur > span.high {
            break;
        }
        let index = cur.top_index();
        let tle = src.root().entry(index);
        if !tle.is_present() {
            // One stride skips the whole unmapped top-level region.
            cursor = cur.large_region_end().checked_add(1);
            continue;
        }

        let region = VirtAddr::of_top_index(index);
        let region_end = region.large_region_end();
        let glyphs = tle.flags().glyphs();
        if tle.is_large() {
            let base = tle.base();
            sink.line(format_args!(
                "PDE({index:03x}) {region:08x}-{region_end:08x} {LARGE_PAGE_SIZE:08x} {glyphs}  -->{base:08x}-{:08x}",
                base.large_region_end()
            ));
            cursor = region_end.checked_add(1);
            continue;
        }

        sink.line(format_args!(
            "PDE({index:03x}) {region:08x}-{region_end:08x} {LARGE_PAGE_SIZE:08x} {glyphs}"
        ));
        match src.second_level(tle.base()) {
            Some(table) => cursor = walk_second_level(table, sink, cur, span.high),
            None => {
                debug!(
                    "second-level table at {:08x} not addressable, skipping",
                    tle.base()
                );
                cursor = region_end.checked_add(1);
            }
        }
    }
}

/// Walk the second-level slots from `cursor`'s position to the end of the
/// table, printing present pages whose base does not exceed `high`.
/// Returns the cursor for the outer walk, `None` at the address-space
/// ceiling. The cursor moves one page per slot regardless of presence.
fn walk_second_level(
    table: &SecondLevelTable,
    sink: &mut dyn LineSink,
    cursor: VirtAddr,
    high: VirtAddr,
) -> Option<VirtAddr> {
    let mut page = cursor.page_base();
    for slot in cursor.second_index()..ENTRY_COUNT {
        if page > high {
            return Some(page);
        }
        let sle = table.entry(slot);
        if sle.is_present() {
            let base = sle.base();
            sink.line(format_args!(
                "  |--PTE({slot:03x}) {page:08x}-{:08x} {PAGE_SIZE:08x} {}  -->{base:08x}-{:08x}",
                page.page_end(),
                sle.flags().glyphs(),
                base.page_end()
            ));
        }
        page = page.checked_add(PAGE_SIZE)?;
    }
    Some(page)
}
