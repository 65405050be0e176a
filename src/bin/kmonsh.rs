// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Host demo shell driving the monitor over a synthetic machine.
// Author: Lukas Bower

//! Host demo shell driving the monitor over a synthetic machine.
//!
//! A minimal readline front end: prompt on stdout, one command per line
//! from stdin, reports through a stdout sink. The machine behind the
//! session is synthetic, so every monitor command can be exercised on any
//! host without a kernel underneath.

use std::io::{self, BufRead, Write};

use log::info;

use kmon::console::{Monitor, Status, COMMANDS, PROMPT};
use kmon::hal::synthetic::SyntheticMachine;
use kmon::hal::ImageInfo;
use kmon::mem::{
    EntryFlags, PhysAddr, SecondLevelEntry, SecondLevelTable, TopLevelEntry, VirtAddr,
};
use kmon::sink::StdoutSink;
use kmon::trace::{Symbol, SymbolTable};

/// Populate a machine with a few mappings and a three-deep call chain so
/// `showmappings` and `backtrace` have something to report.
fn demo_machine() -> SyntheticMachine {
    let mut machine = SyntheticMachine::new();

    // Large kernel mapping at 0x00800000 and a partial small-page table
    // at 0x00000000.
    let mut table = SecondLevelTable::empty();
    let rw = EntryFlags::PRESENT | EntryFlags::WRITABLE;
    for slot in [2usize, 3, 8] {
        let base = PhysAddr::new(0x0020_0000 + (slot as u32) * 0x1000);
        table.set_entry(slot, SecondLevelEntry::new(base, rw));
    }
    machine.attach_table(PhysAddr::new(0x0004_0000), table);
    machine
        .root_mut()
        .set_entry(0, TopLevelEntry::new(PhysAddr::new(0x0004_0000), rw));
    machine.root_mut().set_entry(
        2,
        TopLevelEntry::new(PhysAddr::new(0x0080_0000), rw | EntryFlags::LARGE),
    );

    // Call chain: spin_halt <- kern_main <- kern_start.
    let outer = VirtAddr::new(0x0011_0f00);
    let middle = VirtAddr::new(0x0011_0e00);
    let inner = VirtAddr::new(0x0011_0d00);
    machine.push_frame(outer, VirtAddr::NULL, VirtAddr::new(0x0010_0014), &[]);
    machine.push_frame(middle, outer, VirtAddr::new(0x0010_0058), &[1, 2]);
    machine.push_frame(inner, middle, VirtAddr::new(0x0010_00a4), &[3, 4, 5]);
    machine.set_frame_pointer(inner);
    machine
}

fn demo_symbols() -> SymbolTable {
    let mut table = SymbolTable::new();
    let functions = [
        (0x0010_0000u32, 0x0010_0040u32, "kern_start", "kern/entry.rs", 7),
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

fn main() -> io::Result<()> {
    env_logger::init();
    info!("kmonsh starting over synthetic machine");

    let machine = demo_machine();
    let symbols = demo_symbols();
    let image = ImageInfo {
        entry: VirtAddr::new(0xf010_000c),
        etext: VirtAddr::new(0xf010_2000),
        edata: VirtAddr::new(0xf011_3000),
        end: VirtAddr::new(0xf011_6000),
        link_base: 0xf000_0000,
    };
    let mut sink = StdoutSink;
    let mut monitor = Monitor::new(COMMANDS, &mut sink, &machine, &machine, &symbols, image);

    println!("Welcome to the kmon kernel monitor!");
    println!("Type 'help' for a list of commands.");

    let stdin = io::stdin();
    let mut out = io::stdout();
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if monitor.interpret(&line) == Status::Exit {
            break;
        }
    }
    Ok(())
}
