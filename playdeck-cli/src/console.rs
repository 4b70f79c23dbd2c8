//! [`Console`] that prints progress to the terminal.

use std::io::Write;

use colored::Colorize;

use playdeck_core::Console;

/// Info text, then ` ✓` / ` ✗` on the same line.
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn print_info(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "{text}");
        let _ = out.flush();
    }

    fn print_status(&self, success: bool) {
        let marker = if success { "✓".green() } else { "✗".red() };
        println!(" {marker}");
    }

    fn print_substep(&self, lines: &[String]) {
        for line in lines {
            println!("      {}", line.dimmed());
        }
    }
}
