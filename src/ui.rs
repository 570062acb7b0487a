//! Terminal output abstraction.
//!
//! Commands write user-facing output through an explicit [`UserInterface`]
//! handle rather than printing directly, which keeps them testable with
//! [`MockUI`]. Diagnostic logging goes through `tracing` and is a separate
//! concern.

/// Trait for user-facing output.
pub trait UserInterface {
    /// Write a line of command output to stdout.
    fn message(&mut self, msg: &str);

    /// Write an error to stderr.
    fn error(&mut self, msg: &str);
}

/// Console implementation used by the binary.
#[derive(Debug, Default)]
pub struct ConsoleUI;

impl ConsoleUI {
    pub fn new() -> Self {
        Self
    }
}

impl UserInterface for ConsoleUI {
    fn message(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", console::style(msg).red());
    }
}

/// Recording implementation for tests.
#[derive(Debug, Default)]
pub struct MockUI {
    pub messages: Vec<String>,
    pub errors: Vec<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stdout lines joined, for substring assertions.
    pub fn stdout(&self) -> String {
        self.messages.join("\n")
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ui_records_output() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.message("world");
        ui.error("oops");

        assert_eq!(ui.stdout(), "hello\nworld");
        assert_eq!(ui.errors, vec!["oops"]);
    }
}
