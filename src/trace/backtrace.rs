// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Frame-pointer chain walker with per-frame symbolication.
// Author: Lukas Bower

//! Frame-pointer chain walker with per-frame symbolication.
//!
//! Each activation record stores the caller's frame pointer at the frame
//! pointer itself, the return address one word above it, and argument
//! words above that. The walk follows that linked chain from the current
//! frame until the null sentinel, innermost frame first. There is no
//! unwind metadata: code compiled without frame pointers is out of scope.

use log::debug;

use crate::hal::ExecutionContext;
use crate::mem::VirtAddr;
use crate::sink::LineSink;

use super::symbols::SymbolResolver;

/// Number of argument words dumped per frame.
///
/// No arity metadata exists, so the dump is fixed-width best-effort:
/// reads past a frame's real allocation are tolerated and may show
/// whatever sits there.
pub const ARG_WORDS: usize = 5;

const WORD: u32 = 4;

/// Walk the saved-frame-pointer chain from the current frame, printing one
/// block per activation record followed by its resolved-or-placeholder
/// symbol line, then a completion marker.
pub fn walk(ctx: &dyn ExecutionContext, symbols: &dyn SymbolResolver, sink: &mut dyn LineSink) {
    sink.line(format_args!("Stack backtrace:"));
    let mut fp = ctx.frame_pointer();
    debug!("stack walk from frame pointer {fp:08x}");
    while !fp.is_null() {
        let ret = ctx.read_word(fp.wrapping_add(WORD));
        let mut args = [0u32; ARG_WORDS];
        for (slot, word) in args.iter_mut().enumerate() {
            *word = ctx.read_word(fp.wrapping_add(2 * WORD + WORD * slot as u32));
        }
        sink.line(format_args!(
            "eip {ret:08x} ebp {fp:08x} args {:08x} {:08x} {:08x} {:08x} {:08x}",
            args[0], args[1], args[2], args[3], args[4]
        ));

        let info = symbols.resolve(VirtAddr::new(ret));
        let offset = ret.wrapping_sub(info.fn_addr.get());
        sink.line(format_args!(
            "    {}:{}: {}+{}",
            info.file, info.line, info.fn_name, offset
        ));

        fp = VirtAddr::new(ctx.read_word(fp));
    }
    sink.line(format_args!("Backtrace success"));
}
