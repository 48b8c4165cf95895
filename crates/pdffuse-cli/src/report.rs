//! Console reporting with quiet and verbose modes.

/// Controls what the CLI prints to stdout.
///
/// Errors always go to stderr and are unaffected by these settings.
pub struct Reporter {
    quiet: bool,
    verbose: bool,
}

impl Reporter {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }

    /// Whether normal progress output should be printed.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    pub fn info(&self, message: &str) {
        if self.should_print() {
            println!("{message}");
        }
    }

    pub fn success(&self, message: &str) {
        if self.should_print() {
            println!("✓ {message}");
        }
    }

    /// Indented key/value line, shown only in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.is_verbose() {
            println!("  {label}: {value}");
        }
    }

    pub fn blank_line(&self) {
        if self.should_print() {
            println!();
        }
    }
}
