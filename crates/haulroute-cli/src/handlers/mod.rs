//! Command handlers - one module per subcommand
//!
//! Shared input helpers live here: route loading, surface and theme
//! resolution.

pub mod config;
pub mod layout;
pub mod render;
pub mod summary;
pub mod theme;

pub use config::execute_config;
pub use layout::execute_layout;
pub use render::execute_render;
pub use summary::execute_summary;
pub use theme::execute_theme;

use crate::commands::{SurfaceArgs, ThemeArg};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use haulroute::{AppContext, FileStore, Size, Theme, TripPlan};
use std::path::Path;
use tracing::debug;

/// Load a trip plan (or bare leg array) from JSON
pub fn load_plan(path: &Path) -> CliResult<TripPlan> {
    if !path.exists() {
        return Err(CliError::invalid_argument(format!(
            "Route file not found: {}",
            path.display()
        )));
    }
    let plan = TripPlan::load(path)?;
    debug!(path = %path.display(), legs = plan.legs().len(), "route loaded");
    Ok(plan)
}

/// Surface from config with flag overrides, validated
pub fn resolve_surface(config: &CliConfig, flags: SurfaceArgs) -> CliResult<Size> {
    let resolved = config.clone().with_surface(
        flags.width.unwrap_or(config.width),
        flags.height.unwrap_or(config.height),
    );
    resolved.validate()?;
    Ok(resolved.surface())
}

/// Flag, then config, then the persisted context
pub fn resolve_theme(config: &CliConfig, flag: Option<ThemeArg>) -> Theme {
    flag.map(Theme::from)
        .or(config.theme)
        .unwrap_or_else(|| AppContext::load(&FileStore::new(&config.context_file)).theme())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use haulroute::ContextStore;

    #[test]
    fn test_load_plan_missing_file() {
        let err = load_plan(Path::new("/nonexistent/trip.json")).unwrap_err();
        assert!(err.to_string().contains("Route file not found"));
    }

    #[test]
    fn test_resolve_surface_flags_win() {
        let flags = SurfaceArgs {
            width: Some(320.0),
            height: None,
        };
        let size = resolve_surface(&CliConfig::new(), flags).unwrap();
        assert_eq!(size, Size::new(320.0, 600.0));
    }

    #[test]
    fn test_resolve_surface_rejects_negative() {
        let flags = SurfaceArgs {
            width: Some(-1.0),
            height: None,
        };
        assert!(resolve_surface(&CliConfig::new(), flags).is_err());
    }

    #[test]
    fn test_resolve_theme_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.json");
        let store = FileStore::new(&path);
        AppContext::default().set_theme(Theme::Light, &store).unwrap();
        assert!(store.load().unwrap().is_some());

        let config = CliConfig::new().with_context_file(&path);
        assert_eq!(resolve_theme(&config, None), Theme::Light);
        assert_eq!(resolve_theme(&config, Some(ThemeArg::Dark)), Theme::Dark);

        let config = config.with_theme(Theme::Dark);
        assert_eq!(resolve_theme(&config, None), Theme::Dark);
    }

    #[test]
    fn test_resolve_theme_without_context_file() {
        let config = CliConfig::new().with_context_file("/nonexistent/context.json");
        assert_eq!(resolve_theme(&config, None), Theme::default());
    }
}
