// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Validate the stack walker against constructed frame chains.
// Author: Lukas Bower

use kmon::hal::synthetic::SyntheticMachine;
use kmon::mem::VirtAddr;
use kmon::sink::MemorySink;
use kmon::trace::{backtrace, Symbol, SymbolTable};

fn symbols() -> SymbolTable {
    let mut table = SymbolTable::new();
    let functions = [
        (0x0010_0000u32, 0x0010_0040u32, "kern_start", "kern/entry.rs", 7u32),
        (0x0010_0040, 0x0010_0090, "kern_main", "kern/init.rs", 22),
        (0x0010_0090, 0x0010_00c0, "spin_halt", "kern/init.rs", 41),
    ];
    for (start, end, name, file, line) in functions {
        table.insert(Symbol {
            start: VirtAddr::new(start),
            end: VirtAddr::new(end),
            name: name.to_owned(),
            file: file.to_owned(),
            line,
        });
    }
    table
}

fn walk(machine: &SyntheticMachine, symbols: &SymbolTable) -> Vec<String> {
    let mut sink = MemorySink::new();
    backtrace::walk(machine, symbols, &mut sink);
    sink.lines().to_vec()
}

#[test]
fn three_frame_chain_prints_innermost_first() {
    let mut machine = SyntheticMachine::new();
    let outer = VirtAddr::new(0x0011_0f00);
    let middle = VirtAddr::new(0x0011_0e00);
    let inner = VirtAddr::new(0x0011_0d00);
    machine.push_frame(outer, VirtAddr::NULL, VirtAddr::new(0x0010_0014), &[]);
    machine.push_frame(middle, outer, VirtAddr::new(0x0010_0058), &[1, 2]);
    machine.push_frame(inner, middle, VirtAddr::new(0x0010_00a4), &[3, 4, 5]);
    machine.set_frame_pointer(inner);

    let lines = walk(&machine, &symbols());
    assert_eq!(
        lines,
        [
            "Stack backtrace:",
            "eip 001000a4 ebp 00110d00 args 00000003 00000004 00000005 00000000 00000000",
            "    kern/init.rs:41: spin_halt+20",
            "eip 00100058 ebp 00110e00 args 00000001 00000002 00000000 00000000 00000000",
            "    kern/init.rs:22: kern_main+24",
            "eip 00100014 ebp 00110f00 args 00000000 00000000 00000000 00000000 00000000",
            "    kern/entry.rs:7: kern_start+20",
            "Backtrace success",
        ]
    );
}

#[test]
fn null_frame_pointer_yields_empty_trace() {
    let machine = SyntheticMachine::new();
    let lines = walk(&machine, &symbols());
    assert_eq!(lines, ["Stack backtrace:", "Backtrace success"]);
}

#[test]
fn unresolved_return_address_uses_placeholder_and_continues() {
    let mut machine = SyntheticMachine::new();
    let outer = VirtAddr::new(0x0011_0f00);
    let inner = VirtAddr::new(0x0011_0e00);
    // Outer frame resolves, inner frame's return address is in a gap.
    machine.push_frame(outer, VirtAddr::NULL, VirtAddr::new(0x0010_0014), &[]);
    machine.push_frame(inner, outer, VirtAddr::new(0x00f0_0000), &[9]);
    machine.set_frame_pointer(inner);

    let lines = walk(&machine, &symbols());
    assert_eq!(
        lines,
        [
            "Stack backtrace:",
            "eip 00f00000 ebp 00110e00 args 00000009 00000000 00000000 00000000 00000000",
            "    <unknown>:0: +0",
            "eip 00100014 ebp 00110f00 args 00000000 00000000 00000000 00000000 00000000",
            "    kern/entry.rs:7: kern_start+20",
            "Backtrace success",
        ]
    );
}

#[test]
fn arg_dump_is_fixed_width_regardless_of_arity() {
    let mut machine = SyntheticMachine::new();
    let fp = VirtAddr::new(0x0011_0c00);
    // Seven words laid down above the return address; only five print.
    machine.push_frame(fp, VirtAddr::NULL, VirtAddr::new(0x0010_0014), &[1, 2, 3, 4, 5, 6, 7]);
    machine.set_frame_pointer(fp);

    let lines = walk(&machine, &symbols());
    assert_eq!(
        lines[1],
        "eip 00100014 ebp 00110c00 args 00000001 00000002 00000003 00000004 00000005"
    );
    assert_eq!(lines.len(), 4);
}

#[test]
fn resolver_is_queried_once_per_frame() {
    // A chain long enough to make skipped or duplicated queries visible as
    // missing or extra symbol lines.
    let mut machine = SyntheticMachine::new();
    let mut fp = VirtAddr::NULL;
    for depth in 0..8u32 {
        let frame = VirtAddr::new(0x0012_0000 + depth * 0x40);
        machine.push_frame(frame, fp, VirtAddr::new(0x0010_0014), &[depth]);
        fp = frame;
    }
    machine.set_frame_pointer(fp);

    let lines = walk(&machine, &symbols());
    assert_eq!(lines.len(), 2 + 8 * 2);
    let symbol_lines = lines
        .iter()
        .filter(|l| l.contains("kern_start+20"))
        .count();
    assert_eq!(symbol_lines, 8);
}
