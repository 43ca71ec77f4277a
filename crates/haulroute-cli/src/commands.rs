//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Haulroute: lay out, animate and summarize freight trip routes
#[derive(Parser, Debug)]
#[command(name = "haulroute")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// YAML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the circular layout of a route
    Layout(LayoutArgs),

    /// Animate a route headlessly and write the final frame
    Render(RenderArgs),

    /// Print trip totals and per-leg cards
    Summary(SummaryArgs),

    /// Show or change the persisted theme
    Theme(ThemeArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Surface size flags shared by layout and render
#[derive(Parser, Debug, Clone, Copy, Default)]
pub struct SurfaceArgs {
    /// Surface width in pixels
    #[arg(long)]
    pub width: Option<f64>,

    /// Surface height in pixels
    #[arg(long)]
    pub height: Option<f64>,
}

/// Arguments for the layout command
#[derive(Parser, Debug)]
pub struct LayoutArgs {
    /// Trip plan or leg array (JSON)
    pub file: PathBuf,

    /// Surface size
    #[command(flatten)]
    pub surface: SurfaceArgs,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: LayoutFormat,
}

/// Layout output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Trip plan or leg array (JSON)
    pub file: PathBuf,

    /// Frames to run after the first one
    #[arg(long, default_value = "0")]
    pub frames: u64,

    /// Surface size
    #[command(flatten)]
    pub surface: SurfaceArgs,

    /// Theme (defaults to the persisted one)
    #[arg(long)]
    pub theme: Option<ThemeArg>,

    /// Render the loading placeholder instead of the route
    #[arg(long)]
    pub loading: bool,

    /// Output format
    #[arg(short, long, default_value = "svg")]
    pub format: RenderFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Render output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderFormat {
    /// SVG document
    #[default]
    Svg,
    /// Draw commands as JSON
    Json,
}

/// Arguments for the summary command
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Trip plan or leg array (JSON)
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: LayoutFormat,
}

/// Arguments for the theme command
#[derive(Parser, Debug)]
pub struct ThemeArgs {
    /// Theme to store; omit to print the current one
    pub theme: Option<ThemeArg>,

    /// Switch between light and dark
    #[arg(long, conflicts_with = "theme")]
    pub toggle: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print as YAML instead of text
    #[arg(long)]
    pub yaml: bool,
}

/// Theme argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeArg {
    /// Light background
    Light,
    /// Dark background
    Dark,
}

impl From<ThemeArg> for haulroute::Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let cli = Cli::try_parse_from(["haulroute", "layout", "trip.json", "--width", "400"]).unwrap();
        let Commands::Layout(args) = cli.command else {
            panic!("expected layout");
        };
        assert_eq!(args.file, PathBuf::from("trip.json"));
        assert_eq!(args.surface.width, Some(400.0));
        assert_eq!(args.surface.height, None);
        assert_eq!(args.format, LayoutFormat::Text);
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "haulroute", "render", "trip.json", "--frames", "30", "--theme", "light", "--loading",
            "--format", "json", "-o", "out.json",
        ])
        .unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.frames, 30);
        assert_eq!(args.theme, Some(ThemeArg::Light));
        assert!(args.loading);
        assert_eq!(args.format, RenderFormat::Json);
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "haulroute", "summary", "trip.json", "-vv", "--config", "h.yaml", "--color", "never",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("h.yaml")));
        assert!(matches!(cli.color, ColorArg::Never));
    }

    #[test]
    fn test_theme_toggle_conflicts_with_value() {
        assert!(Cli::try_parse_from(["haulroute", "theme", "dark", "--toggle"]).is_err());
        assert!(Cli::try_parse_from(["haulroute", "theme", "--toggle"]).is_ok());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["haulroute"]).is_err());
    }

    #[test]
    fn test_theme_arg_into_theme() {
        assert_eq!(haulroute::Theme::from(ThemeArg::Dark), haulroute::Theme::Dark);
    }
}
