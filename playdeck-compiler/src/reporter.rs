//! Serialized status output.
//!
//! Playgrounds compile on several threads at once. Each reported step is an
//! info line followed by its status marker, and the pair is written under one
//! lock so another thread's output can never land between them.

use std::sync::{Mutex, PoisonError};

use playdeck_core::Console;

pub struct Reporter<'a> {
    console: &'a dyn Console,
    lock: Mutex<()>,
}

impl<'a> Reporter<'a> {
    pub fn new(console: &'a dyn Console) -> Self {
        Reporter {
            console,
            lock: Mutex::new(()),
        }
    }

    /// Info line plus its outcome, written as one unit.
    pub fn step(&self, info: &str, success: bool) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.console.print_info(info);
        self.console.print_status(success);
    }

    /// Step followed by detail lines (e.g. compiler diagnostics), as one unit.
    pub fn failed_step(&self, info: &str, details: &str) {
        let lines = detail_lines(details);
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.print_failure(info, &lines);
    }

    /// A failed step and the failed step enclosing it (a page and its
    /// playground), written as one unit.
    pub fn failed_nested_step(&self, info: &str, details: &str, outer: &str) {
        let lines = detail_lines(details);
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.print_failure(info, &lines);
        self.console.print_info(outer);
        self.console.print_status(false);
    }

    fn print_failure(&self, info: &str, lines: &[String]) {
        self.console.print_info(info);
        self.console.print_status(false);
        if !lines.is_empty() {
            self.console.print_substep(lines);
        }
    }
}

fn detail_lines(details: &str) -> Vec<String> {
    details
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}
