//! Haulroute CLI Library
//!
//! Command-line front end for the haulroute engine: prints route layouts,
//! renders animation frames headlessly to SVG, summarizes trip plans and
//! manages the persisted theme.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod logging;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, ConfigArgs, LayoutArgs, LayoutFormat, RenderArgs, RenderFormat,
    SummaryArgs, SurfaceArgs, ThemeArg, ThemeArgs,
};
pub use config::{CliConfig, ColorChoice, FileConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::init_logging;
pub use output::{write_result, Reporter};
