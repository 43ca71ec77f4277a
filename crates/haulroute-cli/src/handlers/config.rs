//! Config command handler

use crate::commands::ConfigArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Execute the config command
pub fn execute_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    if args.yaml {
        let yaml = serde_yaml_ng::to_string(config)
            .map_err(|e| CliError::config(format!("cannot serialize configuration: {e}")))?;
        print!("{yaml}");
    } else {
        print!("{}", describe(config));
    }
    Ok(())
}

/// Human-readable listing of the effective configuration
#[must_use]
pub fn describe(config: &CliConfig) -> String {
    let theme = config
        .theme
        .map_or_else(|| "from context file".to_string(), |t| t.to_string());
    format!(
        "Current configuration:\n  \
         Verbosity: {:?}\n  \
         Color: {:?}\n  \
         Surface: {}x{}\n  \
         Theme: {theme}\n  \
         Context file: {}\n  \
         Step: {}\n  \
         Placeholder step: {}\n  \
         Radius factor: {}\n",
        config.verbosity,
        config.color,
        config.width,
        config.height,
        config.context_file.display(),
        config.animation.step,
        config.animation.placeholder_step,
        config.animation.layout.radius_factor,
    )
}
