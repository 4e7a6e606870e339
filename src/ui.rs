/// User interface output utilities
///
/// Standard output carries only the version string; everything else
/// goes to standard error.

use std::io::{IsTerminal, Write};

/// Print colored text to stderr, plain when stderr is not a terminal
fn eprint_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        eprint!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        if !std::io::stderr().is_terminal() {
            return false;
        }
        let Some(mut t) = term::stderr() else {
            return false;
        };
        if t.fg(fg).is_err() {
            return false;
        }
        let _ = t.attr(term::Attr::Bold);
        if write!(t, "{}", s).is_err() {
            return false;
        }
        let _ = t.reset();
        true
    }
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    eprint_color("error", term::color::BRIGHT_RED);
    eprintln!(": {}", msg);
}
