// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Monitor session, command table, and built-in diagnostic commands.
// Author: Lukas Bower

//! Monitor session, command table, and built-in diagnostic commands.
//!
//! The session owns nothing: the command table, output sink, translation
//! source, execution context, symbol resolver, and image landmarks are all
//! injected, so a session runs identically over real hardware accessors or
//! the synthetic machine. Every command failure is reported on the sink and
//! the session keeps going; only `exit` tears it down.

pub mod args;

use log::debug;

use crate::hal::{ExecutionContext, ImageInfo, TranslationSource};
use crate::mem;
use crate::sink::LineSink;
use crate::trace::{self, SymbolResolver};

use args::{parse_span, tokenize};

/// Prompt printed by interactive front ends.
pub const PROMPT: &str = "K> ";

/// What the session loop should do after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Keep reading commands.
    Continue,
    /// Tear down the console session.
    Exit,
}

/// Handler signature shared by every monitor command. The argument list
/// includes the command name in slot zero.
pub type CommandFn = fn(&mut Monitor<'_>, &[&str]) -> Status;

/// One dispatchable console command.
#[derive(Clone, Copy)]
pub struct CommandSpec {
    /// Token the dispatcher matches on.
    pub name: &'static str,
    /// One-line description shown by `help`.
    pub desc: &'static str,
    /// Handler invoked with the full argument list.
    pub run: CommandFn,
}

/// The built-in command table. Injected explicitly so a session can carry
/// a reduced or extended set.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        desc: "Display this list of commands",
        run: cmd_help,
    },
    CommandSpec {
        name: "kerninfo",
        desc: "Display information about the kernel",
        run: cmd_kerninfo,
    },
    CommandSpec {
        name: "backtrace",
        desc: "Display backtrace",
        run: cmd_backtrace,
    },
    CommandSpec {
        name: "time",
        desc: "Display cpu cycles",
        run: cmd_time,
    },
    CommandSpec {
        name: "showmappings",
        desc: "Display the physical page mappings",
        run: cmd_showmappings,
    },
    CommandSpec {
        name: "exit",
        desc: "Leave the monitor",
        run: cmd_exit,
    },
];

/// One interactive monitor session over injected collaborators.
pub struct Monitor<'a> {
    commands: &'a [CommandSpec],
    sink: &'a mut dyn LineSink,
    translation: &'a dyn TranslationSource,
    ctx: &'a dyn ExecutionContext,
    symbols: &'a dyn SymbolResolver,
    image: ImageInfo,
}

impl<'a> Monitor<'a> {
    /// Build a session from its collaborators and command table.
    pub fn new(
        commands: &'a [CommandSpec],
        sink: &'a mut dyn LineSink,
        translation: &'a dyn TranslationSource,
        ctx: &'a dyn ExecutionContext,
        symbols: &'a dyn SymbolResolver,
        image: ImageInfo,
    ) -> Self {
        Self {
            commands,
            sink,
            translation,
            ctx,
            symbols,
            image,
        }
    }

    /// Tokenize and dispatch one console line. An empty line is a no-op.
    pub fn interpret(&mut self, line: &str) -> Status {
        let argv = match tokenize(line) {
            Ok(argv) => argv,
            Err(err) => {
                self.sink.line(format_args!("{err}"));
                return Status::Continue;
            }
        };
        if argv.is_empty() {
            return Status::Continue;
        }
        debug!("dispatching '{}'", argv[0]);
        self.dispatch(&argv)
    }

    fn dispatch(&mut self, argv: &[&str]) -> Status {
        match self.lookup(argv[0]) {
            Some(run) => run(self, argv),
            None => {
                self.sink
                    .line(format_args!("unknown command '{}'", argv[0]));
                Status::Continue
            }
        }
    }

    fn lookup(&self, name: &str) -> Option<CommandFn> {
        self.commands
            .iter()
            .find(|cmd| cmd.name == name)
            .map(|cmd| cmd.run)
    }
}

fn cmd_help(mon: &mut Monitor<'_>, _argv: &[&str]) -> Status {
    let commands = mon.commands;
    for cmd in commands {
        mon.sink.line(format_args!("{} - {}", cmd.name, cmd.desc));
    }
    Status::Continue
}

fn cmd_kerninfo(mon: &mut Monitor<'_>, _argv: &[&str]) -> Status {
    let image = mon.image;
    mon.sink.line(format_args!("Special kernel symbols:"));
    let landmarks = [
        ("entry", image.entry),
        ("etext", image.etext),
        ("edata", image.edata),
        ("end", image.end),
    ];
    for (label, addr) in landmarks {
        mon.sink.line(format_args!(
            "  {label:<6} {addr:08x} (virt)  {:08x} (phys)",
            addr.get().wrapping_sub(image.link_base)
        ));
    }
    let footprint_kib = image
        .end
        .get()
        .wrapping_sub(image.entry.get())
        .wrapping_add(1023)
        / 1024;
    mon.sink.line(format_args!(
        "Kernel executable memory footprint: {footprint_kib}KB"
    ));
    Status::Continue
}

fn cmd_backtrace(mon: &mut Monitor<'_>, _argv: &[&str]) -> Status {
    trace::backtrace::walk(mon.ctx, mon.symbols, mon.sink);
    Status::Continue
}

fn cmd_time(mon: &mut Monitor<'_>, argv: &[&str]) -> Status {
    let Some(inner) = argv.get(1) else {
        mon.sink.line(format_args!("usage: time <command> [args...]"));
        return Status::Continue;
    };
    let Some(run) = mon.lookup(inner) else {
        mon.sink.line(format_args!("unknown command '{inner}'"));
        return Status::Continue;
    };
    let start = mon.ctx.cycle_counter();
    let status = run(mon, &argv[1..]);
    let elapsed = mon.ctx.cycle_counter().wrapping_sub(start);
    mon.sink.line(format_args!("{inner} cycles: {elapsed}"));
    status
}

fn cmd_showmappings(mon: &mut Monitor<'_>, argv: &[&str]) -> Status {
    let (Some(low), Some(high)) = (argv.get(1), argv.get(2)) else {
        mon.sink
            .line(format_args!("usage: showmappings <low> <high>"));
        return Status::Continue;
    };
    match parse_span(low, high) {
        Ok(span) => mem::mappings::show(mon.translation, mon.sink, span),
        Err(err) => mon.sink.line(format_args!("showmappings: {err}")),
    }
    Status::Continue
}

fn cmd_exit(mon: &mut Monitor<'_>, _argv: &[&str]) -> Status {
    mon.sink.line(format_args!("leaving the monitor"));
    Status::Exit
}
