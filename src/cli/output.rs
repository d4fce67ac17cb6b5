//! Styled console output for benchmark results
//!
//! Timings and speedups always go to stdout, even in quiet mode.

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("  {} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a workload header
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a step in a process
    pub fn step(&self, step: &str) {
        if !self.quiet {
            println!("{} {}", style("❯").cyan(), step);
        }
    }

    /// Print a key-value pair; measurement lines are printed even in quiet mode
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        let styled_value = if highlight {
            style(value).green().bold()
        } else {
            style(value).white()
        };
        println!("  {} {}", style(key).dim(), styled_value);
    }
}
