//! CLI configuration
//!
//! Defaults, then an optional YAML file, then command-line flags.

use crate::error::{CliError, CliResult};
use haulroute::{AnimationConfig, HaulrouteError, Size, Theme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// From the `-q` flag and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Check if debug mode
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Log filter used when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// Settings read from `--config <FILE.yaml>`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Surface width in pixels
    pub width: Option<f64>,
    /// Surface height in pixels
    pub height: Option<f64>,
    /// Theme override
    pub theme: Option<Theme>,
    /// Persisted application context (theme, session)
    pub context_file: Option<PathBuf>,
    /// Animation and layout parameters
    pub animation: Option<AnimationConfig>,
}

impl FileConfig {
    /// Parse YAML text
    pub fn from_yaml_str(yaml: &str) -> CliResult<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| CliError::config(format!("invalid YAML: {e}")))
    }

    /// Read and parse a YAML file
    pub fn load(path: &Path) -> CliResult<Self> {
        let yaml = fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }
}

/// Effective CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Surface width in pixels
    pub width: f64,
    /// Surface height in pixels
    pub height: f64,
    /// Theme override; the persisted context decides when unset
    pub theme: Option<Theme>,
    /// Persisted application context
    pub context_file: PathBuf,
    /// Animation and layout parameters
    pub animation: AnimationConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            width: 800.0,
            height: 600.0,
            theme: None,
            context_file: PathBuf::from(".haulroute/context.json"),
            animation: AnimationConfig::default(),
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set surface size
    #[must_use]
    pub const fn with_surface(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set theme override
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Set the context file
    #[must_use]
    pub fn with_context_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.context_file = path.into();
        self
    }

    /// Layer settings from a config file over this configuration
    #[must_use]
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(width) = file.width {
            self.width = width;
        }
        if let Some(height) = file.height {
            self.height = height;
        }
        if file.theme.is_some() {
            self.theme = file.theme;
        }
        if let Some(path) = file.context_file {
            self.context_file = path;
        }
        if let Some(animation) = file.animation {
            self.animation = animation;
        }
        self
    }

    /// Drawing surface
    #[must_use]
    pub const fn surface(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Reject sizes and animation parameters the engine cannot use
    pub fn validate(&self) -> CliResult<()> {
        let surface = self.surface();
        if !surface.has_area() {
            return Err(HaulrouteError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            }
            .into());
        }
        self.animation.validate()?;
        Ok(())
    }
}
