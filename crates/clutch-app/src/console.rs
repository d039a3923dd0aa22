//! Terminal-facing router and notifier.
//!
//! The protocol controllers are written against [`Router`] and [`Notifier`]
//! seams; in this binary "navigation" prints the destination and alerts go
//! to stderr.

use clutch_auth_gate::{Notifier, Route, Router};
use std::io::{self, BufRead, Write};

/// Router that prints the destination path.
pub struct ConsoleRouter;

impl Router for ConsoleRouter {
    fn replace(&self, route: Route) {
        println!("-> {}", route.path());
    }
}

/// Notifier that writes alerts to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }

    fn alert_with_recovery(&self, title: &str, message: &str, recovery: &str) {
        eprintln!("{title}: {message} [{recovery}]");
    }
}

/// Prompt on stderr and read one trimmed line from stdin.
pub fn prompt(label: &str) -> io::Result<String> {
    eprint!("{label}: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
