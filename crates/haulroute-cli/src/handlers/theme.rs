//! Theme command handler

use crate::commands::ThemeArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use haulroute::{AppContext, FileStore, Theme};

/// Execute the theme command; returns the theme now stored
pub fn execute_theme(config: &CliConfig, args: &ThemeArgs) -> CliResult<Theme> {
    let store = FileStore::new(&config.context_file);
    let mut context = AppContext::load(&store);
    let reporter = Reporter::from_config(config);

    let theme = if args.toggle {
        context.toggle_theme(&store)?
    } else if let Some(theme) = args.theme {
        context.set_theme(theme.into(), &store)?;
        context.theme()
    } else {
        println!("{}", context.theme());
        return Ok(context.theme());
    };

    reporter.success(&format!("theme set to {theme} ({})", config.context_file.display()));
    Ok(theme)
}
