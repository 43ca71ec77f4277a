//! Terminal output and result writing

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use console::{style, Term};
use std::fs;
use std::path::Path;

/// Status messages on stderr, styled when colors are enabled.
///
/// Results go to stdout through [`write_result`]; these messages never
/// mix with them.
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Reporter {
    /// Create a reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Reporter honoring the configured color and verbosity
    #[must_use]
    pub fn from_config(config: &CliConfig) -> Self {
        Self::new(config.color.should_color(), config.verbosity.is_quiet())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };
        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Section heading for text output
    #[must_use]
    pub fn heading(&self, text: &str) -> String {
        if self.use_color {
            style(text).cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Write `content` to `path`, or to stdout when no path is given
pub fn write_result(content: &str, path: Option<&Path>) -> CliResult<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, content).map_err(|e| {
                CliError::output(format!("cannot write {}: {e}", path.display()))
            })
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}
